/// Snapshot of a failed attempt, delivered before the backoff sleep
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryEvent {
    /// Attempts completed so far (1-based)
    pub attempts: u32,
    /// Attempts remaining before the helper gives up
    pub remaining: u32,
    /// Status code of the failing response
    pub status_code: u16,
    /// Trimmed body of the failing response
    pub content: String,
}

/// Observer notified synchronously between retry attempts
///
/// Called once per failed attempt that will be retried; the final failure is
/// reported through the returned error instead.
pub trait RetryObserver: Send + Sync {
    /// Handle a failed attempt
    fn on_retry(&self, event: &RetryEvent);
}
