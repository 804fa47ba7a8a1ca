//! Integration tests for the background pipeline, observed through callbacks.

mod helpers;

use helpers::{ConverterMode, TestApp};
use http::StatusCode;
use serde_json::json;

fn pairs(items: &[(&str, u64)]) -> Vec<(String, u64)> {
    items.iter().map(|(s, p)| (s.to_string(), *p)).collect()
}

#[tokio::test]
async fn test_happy_path_reports_progress_and_size() {
    let app = TestApp::new(ConverterMode::Succeed).await;
    let job_id = "job-happy";

    let response = app
        .request("POST", "/process", Some(app.job_body(job_id, "sample_audio.mp3")))
        .await;
    assert_eq!(response.status, StatusCode::ACCEPTED);

    let terminal = app.backend.wait_for_terminal(job_id).await;
    let expected_size = helpers::sample_midi().len();

    assert_eq!(terminal["status"], "completed");
    assert_eq!(terminal["progress"], 100);
    assert_eq!(terminal["size"], expected_size);
    assert_eq!(terminal["message"], "Processing completed successfully.");
    assert_eq!(terminal["userId"], "test_user_001");
    assert_eq!(terminal["fileId"], format!("file_{job_id}"));
    assert_eq!(terminal["pythonJobId"], job_id);

    assert_eq!(
        app.backend.statuses_for(job_id),
        pairs(&[
            ("processing", 10),
            ("processing", 50),
            ("processing", 90),
            ("completed", 100),
        ])
    );

    let uploads = app.backend.uploads();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].name, format!("output_{job_id}.mid"));
    assert_eq!(uploads[0].size, expected_size);
    assert_eq!(uploads[0].content_type.as_deref(), Some("audio/midi"));

    let seen = app.converter.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].file_name().unwrap(), "input_audio.mp3");

    assert!(app.wait_for_clean_temp_root().await);
}

#[tokio::test]
async fn test_unsupported_extension_fails_before_download() {
    let app = TestApp::new(ConverterMode::Succeed).await;
    let job_id = "job-txt";

    let response = app
        .request("POST", "/process", Some(app.job_body(job_id, "notes.txt")))
        .await;
    assert_eq!(response.status, StatusCode::ACCEPTED);

    let terminal = app.backend.wait_for_terminal(job_id).await;

    assert_eq!(terminal["status"], "failed");
    assert_eq!(terminal["progress"], 0);
    assert_eq!(terminal["message"], "Unsupported audio format: .txt");
    assert!(terminal.get("size").is_none());
    assert_eq!(
        app.backend.statuses_for(job_id),
        pairs(&[("processing", 10), ("failed", 0)])
    );
    assert_eq!(app.backend.downloads(), 0);
    assert!(app.backend.uploads().is_empty());
    assert!(app.wait_for_clean_temp_root().await);
}

#[tokio::test]
async fn test_conversion_failure_reports_once_and_skips_upload() {
    let app = TestApp::new(ConverterMode::NoOutput).await;
    let job_id = "job-nomidi";

    app.request("POST", "/process", Some(app.job_body(job_id, "sample_audio.wav")))
        .await;

    let terminal = app.backend.wait_for_terminal(job_id).await;

    assert_eq!(terminal["status"], "failed");
    assert_eq!(
        terminal["message"],
        "MIDI conversion failed: no MIDI file was generated"
    );
    assert_eq!(
        app.backend.statuses_for(job_id),
        pairs(&[("processing", 10), ("processing", 50), ("failed", 0)])
    );
    assert!(app.backend.uploads().is_empty());
    assert!(app.wait_for_clean_temp_root().await);
}

#[tokio::test]
async fn test_upload_rejection_fails_job() {
    let app = TestApp::new(ConverterMode::Succeed).await;
    let job_id = "job-noupload";
    let mut body = app.job_body(job_id, "sample_audio.mp3");
    body["outputFileUrl"] = json!(format!("{}/nowhere/{job_id}.mid", app.backend.url));

    app.request("POST", "/process", Some(body)).await;

    let terminal = app.backend.wait_for_terminal(job_id).await;

    assert_eq!(terminal["status"], "failed");
    assert!(
        terminal["message"].as_str().unwrap().contains("HTTP 404"),
        "{terminal}"
    );
    assert_eq!(
        app.backend.statuses_for(job_id),
        pairs(&[
            ("processing", 10),
            ("processing", 50),
            ("processing", 90),
            ("failed", 0),
        ])
    );
    assert!(app.wait_for_clean_temp_root().await);
}

#[tokio::test]
async fn test_concurrent_jobs_each_complete_once() {
    let app = TestApp::new(ConverterMode::Succeed).await;
    let ids = ["job-a", "job-b", "job-c"];

    for id in ids {
        let response = app
            .request("POST", "/process", Some(app.job_body(id, "sample_audio.flac")))
            .await;
        assert_eq!(response.status, StatusCode::ACCEPTED);
    }

    for id in ids {
        app.backend.wait_for_terminal(id).await;
        let terminal: Vec<_> = app
            .backend
            .statuses_for(id)
            .into_iter()
            .filter(|(s, _)| s == "completed" || s == "failed")
            .collect();
        assert_eq!(terminal, pairs(&[("completed", 100)]));
    }

    assert_eq!(app.backend.uploads().len(), ids.len());
    assert!(app.wait_for_clean_temp_root().await);
}
