//! Job runner: detaches each accepted job onto its own task.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{self, Instrument};

use polygen_core::types::ProcessingJob;

use crate::pipeline::{AudioToMidiPipeline, JobOutcome};

/// Spawns one background task per job.
///
/// There is no queue, no concurrency limit and no registry of running jobs;
/// the only thing a job leaves behind is its callbacks.
#[derive(Debug, Clone)]
pub struct JobRunner {
    pipeline: Arc<AudioToMidiPipeline>,
}

impl JobRunner {
    /// Create a runner over a pipeline.
    pub fn new(pipeline: Arc<AudioToMidiPipeline>) -> Self {
        Self { pipeline }
    }

    /// Start `job` in the background and return immediately.
    ///
    /// The handle is only useful to tests; production callers drop it.
    pub fn spawn(&self, job: ProcessingJob) -> JoinHandle<JobOutcome> {
        let pipeline = Arc::clone(&self.pipeline);
        let span = tracing::info_span!("job", job_id = %job.job_id);

        tokio::spawn(async move { pipeline.run(job).await }.instrument(span))
    }
}
