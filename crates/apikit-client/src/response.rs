use apikit_core::BackendError;

/// Translate an already-failed response into a [`BackendError`]
///
/// Pass-through for status codes below 400. Otherwise the response is
/// consumed and the error reuses its status code, reason phrase, and body
/// text verbatim.
///
/// # Errors
///
/// Returns the translated [`BackendError`] for status codes of 400 and above
pub async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.as_u16() < 400 {
        return Ok(response);
    }

    let reason = status.canonical_reason().unwrap_or("Unknown Error");
    let body = response.text().await.unwrap_or_default();

    Err(BackendError::new(reason)
        .expect("canonical reason is non-empty")
        .with_status(status.as_u16())
        .with_content(body))
}
