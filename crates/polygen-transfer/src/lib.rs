//! # polygen-transfer
//!
//! Outbound HTTP for Polygen: reachability probes before a job is accepted,
//! audio downloads, MIDI uploads to pre-signed URLs, and JSON callbacks.
//! Every call carries a bounded timeout and nothing is retried.

pub mod client;
pub mod error;

pub use client::{HttpTransport, Reachability};
pub use error::TransferError;
