//! # polygen-api
//!
//! HTTP API layer for Polygen built on Axum.
//!
//! Provides the job submission and health endpoints, request validation
//! (body shape and input URL reachability), middleware (CORS, logging,
//! tracing, body limit), DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod validation;

pub use app::{build_state, run_server};
pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
