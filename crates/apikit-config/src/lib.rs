#![allow(clippy::must_use_candidate)]

//! Configuration types for apikit services
//!
//! Covers the three things a service declares up front: the metadata it
//! exposes on its introspection route, the auth scheme tag recorded in that
//! metadata, and the environment-driven logging configuration consumed by
//! `apikit-telemetry`.

pub mod auth;
mod error;
pub mod logging;
pub mod metadata;

pub use auth::Auth;
pub use error::ConfigError;
pub use logging::LogConfig;
pub use metadata::ServiceMetadata;
