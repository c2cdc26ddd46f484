use serde::Serialize;

/// Reason used by [`BackendError::internal`] and the retry helper's
/// exhaustion error.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Rejected `BackendError` construction
///
/// The reason is the one field with a value constraint: it must be
/// non-empty. Status code and content are enforced by the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("backend error requires a non-empty reason")]
pub struct EmptyReason;

/// Structured failure value carrying a reason, an HTTP status code, and
/// optional content
///
/// Created whenever an HTTP interaction or internal validation fails and
/// consumed by the caller: re-raised via `?`, translated into an HTTP error
/// response body, or logged. Immutable after construction.
///
/// The serialized form is wire-stable:
/// `{"reason": string, "status_code": integer, "error_content": string|null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("BackendError: {status_code} {reason} [{}]", .content.as_deref().unwrap_or(""))]
pub struct BackendError {
    reason: String,
    status_code: u16,
    #[serde(rename = "error_content")]
    content: Option<String>,
}

impl BackendError {
    /// Create an error with the given reason, status code 400, and no
    /// content
    ///
    /// # Errors
    ///
    /// Returns [`EmptyReason`] if the reason is empty
    pub fn new(reason: impl Into<String>) -> Result<Self, EmptyReason> {
        let reason = reason.into();
        if reason.is_empty() {
            return Err(EmptyReason);
        }

        Ok(Self {
            reason,
            status_code: 400,
            content: None,
        })
    }

    /// Replace the status code
    #[must_use]
    pub const fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Attach content
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Wrap arbitrary error text into a 500 "Internal Server Error"
    ///
    /// The text (typically an underlying error's string form) becomes the
    /// content.
    #[must_use]
    pub fn internal(text: impl Into<String>) -> Self {
        Self {
            reason: INTERNAL_SERVER_ERROR.to_owned(),
            status_code: 500,
            content: Some(text.into()),
        }
    }

    /// Human-readable reason for the failure
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// HTTP status code associated with the failure
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Optional content, usually an upstream response body
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}
