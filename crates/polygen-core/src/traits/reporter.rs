//! Status reporting capability.

use async_trait::async_trait;

use crate::types::job::JobId;
use crate::types::status::StatusUpdate;

/// Delivers status updates for a job to whoever is listening.
///
/// Delivery is best effort: implementations log and swallow their own
/// failures, so the caller never observes an error.
#[async_trait]
pub trait StatusReporter: Send + Sync + std::fmt::Debug + 'static {
    /// Send one update for `job_id`.
    async fn report(&self, job_id: &JobId, update: &StatusUpdate);
}
