use serde::{Deserialize, Serialize};

use crate::auth::Auth;
use crate::error::ConfigError;

/// Service metadata exposed on the introspection route
///
/// All string fields must be non-empty. [`ServiceMetadata::new`] enforces
/// this; configurations arriving through `Deserialize` should be checked
/// with [`ServiceMetadata::validate`] before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceMetadata {
    /// Service name
    pub name: String,
    /// Version of the service
    pub version: String,
    /// URL of the repository containing the service's source code
    pub repository: String,
    /// Human-readable description
    pub description: String,
    /// Version of the service API framework
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Auth scheme tag (stored metadata only, never enforced)
    #[serde(default)]
    pub auth: Auth,
}

impl ServiceMetadata {
    /// Create metadata with the default API version and no auth
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyField`] if any field is empty
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        repository: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let metadata = Self {
            name: name.into(),
            version: version.into(),
            repository: repository.into(),
            description: description.into(),
            api_version: default_api_version(),
            auth: Auth::None,
        };
        metadata.validate()?;
        Ok(metadata)
    }

    /// Replace the API version
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyField`] if the version is empty
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Result<Self, ConfigError> {
        self.api_version = api_version.into();
        self.validate()?;
        Ok(self)
    }

    /// Replace the auth scheme
    #[must_use]
    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    /// Check that every field is non-empty
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyField`] naming the first empty field
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("name", &self.name),
            ("version", &self.version),
            ("repository", &self.repository),
            ("description", &self.description),
            ("api_version", &self.api_version),
        ];
        for (field, value) in fields {
            if value.is_empty() {
                return Err(ConfigError::EmptyField(field));
            }
        }
        Ok(())
    }
}

fn default_api_version() -> String {
    "1.0".to_owned()
}
