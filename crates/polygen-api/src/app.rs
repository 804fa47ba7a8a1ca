//! Application builder: wires transport, worker and router into a server.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use polygen_core::config::AppConfig;
use polygen_core::error::AppError;
use polygen_core::traits::{MidiConverter, StatusReporter};
use polygen_transfer::HttpTransport;
use polygen_worker::{AudioToMidiPipeline, CallbackReporter, JobRunner};

use crate::router::build_router;
use crate::state::AppState;

/// Build the shared state around a converter.
///
/// Status updates go to the configured backend through [`CallbackReporter`].
pub fn build_state(
    config: AppConfig,
    converter: Arc<dyn MidiConverter>,
) -> Result<AppState, AppError> {
    let transport = Arc::new(HttpTransport::new(&config.transfer)?);
    let reporter: Arc<dyn StatusReporter> = Arc::new(CallbackReporter::new(
        Arc::clone(&transport),
        &config.backend,
    ));

    let pipeline = AudioToMidiPipeline::new(
        Arc::clone(&transport),
        converter,
        reporter,
        config.worker.resolved_temp_root(),
    );
    let runner = JobRunner::new(Arc::new(pipeline));

    Ok(AppState::new(Arc::new(config), transport, runner))
}

/// Runs the Polygen server until a shutdown signal arrives.
pub async fn run_server(config: AppConfig, converter: Arc<dyn MidiConverter>) -> Result<(), AppError> {
    tracing::info!("Starting Polygen v{}", env!("CARGO_PKG_VERSION"));

    create_data_directories(&config).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    tracing::info!(
        backend = %config.backend.url,
        converter = converter.name(),
        "Callback backend configured"
    );

    let state = build_state(config, converter)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Polygen server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            let _ = shutdown_tx.send(true);
        })
        .into_future();

    // In-flight requests get `shutdown_grace_seconds` once the signal fires.
    let deadline = async move {
        let _ = shutdown_rx.wait_for(|stopping| *stopping).await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        _ = deadline => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Graceful shutdown timed out");
        }
    }

    tracing::info!("Polygen server stopped");
    Ok(())
}

/// Make sure the job working-area root exists.
async fn create_data_directories(config: &AppConfig) -> Result<(), AppError> {
    let root = config.worker.resolved_temp_root();
    tokio::fs::create_dir_all(&root).await.map_err(|e| {
        AppError::storage(format!(
            "Failed to create temp root '{}': {e}",
            root.display()
        ))
    })?;
    tracing::debug!(path = %root.display(), "Job temp root ready");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
