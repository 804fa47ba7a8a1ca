//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::{Path as UrlPath, State};
use axum::http::{HeaderMap, Method, header};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use http::{Request, StatusCode};
use midly::num::{u4, u7, u15, u28};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};
use serde_json::{Value, json};
use tower::ServiceExt;

use polygen_core::config::AppConfig;
use polygen_core::error::AppError;
use polygen_core::result::AppResult;
use polygen_core::traits::MidiConverter;

/// Audio bytes served by the mock backend.
pub const SAMPLE_AUDIO: &[u8] = b"ID3\x04\x00\x00\x00\x00\x00\x00fake-mp3-frames";

/// One upload received by the mock backend.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Path segment after `/uploads/`
    pub name: String,
    /// Received `Content-Type`
    pub content_type: Option<String>,
    /// Body length
    pub size: usize,
}

/// Everything the mock backend saw.
#[derive(Debug, Default)]
pub struct BackendLog {
    /// `(job_id, body)` per callback, in arrival order
    pub callbacks: Mutex<Vec<(String, Value)>>,
    /// Uploaded MIDI files
    pub uploads: Mutex<Vec<Upload>>,
    /// Number of GETs for test files (HEAD excluded)
    pub downloads: Mutex<usize>,
}

/// In-process stand-in for the storage and callback backend.
pub struct MockBackend {
    /// `http://127.0.0.1:<port>`
    pub url: String,
    /// Recorded traffic
    pub log: Arc<BackendLog>,
}

impl MockBackend {
    /// Bind an ephemeral port and start serving.
    pub async fn start() -> Self {
        let log = Arc::new(BackendLog::default());
        let app = Router::new()
            .route("/test-files/{name}", get(serve_test_file))
            .route("/uploads/{name}", put(receive_upload))
            .route("/api/users/jobs/{job_id}/callback", post(receive_callback))
            .with_state(Arc::clone(&log));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock backend");
        });

        Self {
            url: format!("http://{addr}"),
            log,
        }
    }

    /// Callbacks received for `job_id`.
    pub fn callbacks_for(&self, job_id: &str) -> Vec<Value> {
        self.log
            .callbacks
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _)| id == job_id)
            .map(|(_, body)| body.clone())
            .collect()
    }

    /// `(status, progress)` pairs received for `job_id`.
    pub fn statuses_for(&self, job_id: &str) -> Vec<(String, u64)> {
        self.callbacks_for(job_id)
            .iter()
            .map(|b| {
                (
                    b["status"].as_str().unwrap_or_default().to_string(),
                    b["progress"].as_u64().unwrap_or(u64::MAX),
                )
            })
            .collect()
    }

    /// Wait until `job_id` has reported `completed` or `failed`.
    pub async fn wait_for_terminal(&self, job_id: &str) -> Value {
        let found = wait_until(Duration::from_secs(10), || {
            self.callbacks_for(job_id)
                .into_iter()
                .find(|b| b["status"] == "completed" || b["status"] == "failed")
        })
        .await;
        found.unwrap_or_else(|| panic!("no terminal callback for job {job_id}"))
    }

    /// Uploads received so far.
    pub fn uploads(&self) -> Vec<Upload> {
        self.log.uploads.lock().unwrap().clone()
    }

    /// Number of audio downloads so far.
    pub fn downloads(&self) -> usize {
        *self.log.downloads.lock().unwrap()
    }
}

async fn serve_test_file(
    State(log): State<Arc<BackendLog>>,
    method: Method,
    UrlPath(name): UrlPath<String>,
) -> impl IntoResponse {
    if name.starts_with("missing") {
        return StatusCode::NOT_FOUND.into_response();
    }
    if method == Method::GET {
        *log.downloads.lock().unwrap() += 1;
    }
    ([(header::CONTENT_TYPE, "audio/mpeg")], Bytes::from_static(SAMPLE_AUDIO)).into_response()
}

async fn receive_upload(
    State(log): State<Arc<BackendLog>>,
    UrlPath(name): UrlPath<String>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    log.uploads.lock().unwrap().push(Upload {
        name,
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        size: body.len(),
    });
    StatusCode::OK
}

async fn receive_callback(
    State(log): State<Arc<BackendLog>>,
    UrlPath(job_id): UrlPath<String>,
    axum::Json(body): axum::Json<Value>,
) -> StatusCode {
    log.callbacks.lock().unwrap().push((job_id, body));
    StatusCode::OK
}

/// What the fake converter does.
#[derive(Debug, Clone, Copy)]
pub enum ConverterMode {
    /// Write a small real MIDI file
    Succeed,
    /// Produce nothing
    NoOutput,
}

/// Stands in for the basic-pitch model.
#[derive(Debug)]
pub struct FakeConverter {
    mode: ConverterMode,
    /// Audio files the converter was handed
    pub seen: Mutex<Vec<PathBuf>>,
}

impl FakeConverter {
    /// Create a fake converter.
    pub fn new(mode: ConverterMode) -> Self {
        Self {
            mode,
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MidiConverter for FakeConverter {
    fn name(&self) -> &str {
        "fake-basic-pitch"
    }

    async fn convert(&self, audio_path: &Path, output_dir: &Path) -> AppResult<PathBuf> {
        self.seen.lock().unwrap().push(audio_path.to_path_buf());
        match self.mode {
            ConverterMode::Succeed => {
                tokio::fs::create_dir_all(output_dir).await?;
                let path = output_dir.join("input_audio_basic_pitch.mid");
                tokio::fs::write(&path, sample_midi()).await?;
                Ok(path)
            }
            ConverterMode::NoOutput => Err(AppError::conversion(
                "MIDI conversion failed: no MIDI file was generated",
            )),
        }
    }
}

/// A short single-track MIDI file: C major arpeggio.
pub fn sample_midi() -> Vec<u8> {
    let note = |delta: u32, key: u8, vel: u8| TrackEvent {
        delta: u28::from(delta),
        kind: TrackEventKind::Midi {
            channel: u4::from(0),
            message: MidiMessage::NoteOn {
                key: u7::from(key),
                vel: u7::from(vel),
            },
        },
    };

    let mut track = Vec::new();
    for key in [60u8, 64, 67] {
        track.push(note(0, key, 90));
        track.push(note(240, key, 0));
    }
    track.push(TrackEvent {
        delta: u28::from(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    let smf = Smf {
        header: Header {
            format: Format::SingleTrack,
            timing: Timing::Metrical(u15::from(480)),
        },
        tracks: vec![track],
    };
    let mut bytes = Vec::new();
    smf.write(&mut bytes).expect("write midi");
    bytes
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Mock storage/callback backend
    pub backend: MockBackend,
    /// Root under which job workspaces are created
    pub temp_root: tempfile::TempDir,
    /// The converter wired into the pipeline
    pub converter: Arc<FakeConverter>,
}

impl TestApp {
    /// Create a new test application
    pub async fn new(mode: ConverterMode) -> Self {
        let backend = MockBackend::start().await;
        let temp_root = tempfile::tempdir().expect("temp root");

        let mut config = AppConfig::default();
        config.backend.url = format!("{}/", backend.url);
        config.backend.callback_timeout_seconds = 5;
        config.transfer.probe_timeout_seconds = 5;
        config.transfer.transfer_timeout_seconds = 10;
        config.worker.temp_root = Some(temp_root.path().to_path_buf());
        config.validate().expect("valid test config");

        let converter = Arc::new(FakeConverter::new(mode));
        let state = polygen_api::build_state(config.clone(), converter.clone())
            .expect("Failed to build state");
        let router = polygen_api::build_router(state);

        Self {
            router,
            config,
            backend,
            temp_root,
            converter,
        }
    }

    /// A valid submission body for `file_name` served by the mock backend.
    pub fn job_body(&self, job_id: &str, file_name: &str) -> Value {
        json!({
            "jobId": job_id,
            "userId": "test_user_001",
            "inputFileUrl": format!("{}/test-files/{}", self.backend.url, file_name),
            "outputFileUrl": format!("{}/uploads/output_{}.mid?X-Amz-Signature=abc", self.backend.url, job_id),
            "processingType": "AUDIO2MIDI",
            "metadata": {
                "fileType": "audio/mpeg",
                "fileName": file_name,
                "originalFileId": format!("file_{job_id}"),
                "fileSize": SAMPLE_AUDIO.len()
            }
        })
    }

    /// Wait until no job workspace remains.
    pub async fn wait_for_clean_temp_root(&self) -> bool {
        let root = self.temp_root.path().to_path_buf();
        wait_until(Duration::from_secs(5), || {
            let empty = std::fs::read_dir(&root).ok()?.next().is_none();
            empty.then_some(())
        })
        .await
        .is_some()
    }

    /// Make a raw request against the router
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        self.raw_request(method, path, body_str).await
    }

    /// Make a request with a literal body
    pub async fn raw_request(&self, method: &str, path: &str, body: String) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Test response wrapper
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Poll `check` every 20ms until it yields a value or `limit` passes.
pub async fn wait_until<T>(limit: Duration, mut check: impl FnMut() -> Option<T>) -> Option<T> {
    let deadline = tokio::time::Instant::now() + limit;
    loop {
        if let Some(value) = check() {
            return Some(value);
        }
        if tokio::time::Instant::now() >= deadline {
            return None;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
