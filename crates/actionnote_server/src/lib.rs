//! HTTP API for notes and action item extraction.
//!
//! # Responsibility
//! - Bind core services to JSON endpoints.
//! - Map core errors onto one error body shape and status code policy.
//!
//! # Invariants
//! - Handlers never block the async runtime; SQLite and LLM calls run on
//!   blocking worker threads.

pub mod error;
pub mod routes;
pub mod schemas;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run, AppState};
