//! Typed application error for apikit services
//!
//! `BackendError` is the one failure value the helper crates agree on: a
//! reason, an HTTP status code, and optional content, with a stable JSON
//! projection for error response bodies.

pub mod error;

pub use error::{BackendError, EmptyReason, INTERNAL_SERVER_ERROR};
