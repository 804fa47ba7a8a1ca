//! # polygen-core
//!
//! Core crate for the Polygen audio-to-MIDI service. Contains configuration
//! schemas, the job and status-update data model, the capability traits the
//! worker drives (converter and status reporter), and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Polygen crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
