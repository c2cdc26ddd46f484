/// Errors from metadata and auth validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required metadata field is empty
    #[error("metadata field `{0}` must be a non-empty string")]
    EmptyField(&'static str),

    /// Auth value is not one of the accepted forms
    #[error("unsupported auth value: `{0}`")]
    UnsupportedAuth(String),
}
