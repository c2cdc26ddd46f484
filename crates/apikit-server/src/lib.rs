#![allow(clippy::must_use_candidate)]

//! Axum glue for apikit services
//!
//! Decorates a router with the standard `/metadata` introspection routes and
//! converts [`BackendError`](apikit_core::BackendError) into HTTP error
//! responses, keeping the error type itself decoupled from axum.

mod error;
mod metadata;

pub use error::ApiError;
pub use metadata::{MetadataBody, MetadataRoutes};
