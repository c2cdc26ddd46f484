#![allow(clippy::must_use_candidate)]

//! HTTP retry helper for apikit services
//!
//! Issues one HTTP request and, on a failure status, retries with linearly
//! increasing delay up to a bound, optionally notifying an observer between
//! attempts. Exhaustion surfaces as a single aggregated
//! [`BackendError`](apikit_core::BackendError).

mod credentials;
mod observer;
mod response;
mod retry;

pub use credentials::BasicCredentials;
pub use observer::{RetryEvent, RetryObserver};
pub use response::check_response;
pub use retry::{Method, RequestOptions, RetryClient, RetryPolicy, UnsupportedMethod};
