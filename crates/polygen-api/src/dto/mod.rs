//! Request and response bodies.

pub mod request;
pub mod response;

pub use request::{JobMetadataRequest, ProcessRequest};
pub use response::{HealthResponse, ProcessAccepted};
