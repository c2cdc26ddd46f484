use apikit_config::{ConfigError, ServiceMetadata};
use axum::{Json, Router, routing::get};
use serde::Serialize;

/// JSON body served by the metadata routes
///
/// `auth` carries the scheme's type tag only, never the credential data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataBody {
    pub name: String,
    pub repository: String,
    pub version: String,
    pub description: String,
    pub api_version: String,
    pub auth: String,
}

impl From<&ServiceMetadata> for MetadataBody {
    fn from(metadata: &ServiceMetadata) -> Self {
        Self {
            name: metadata.name.clone(),
            repository: metadata.repository.clone(),
            version: metadata.version.clone(),
            description: metadata.description.clone(),
            api_version: metadata.api_version.clone(),
            auth: metadata.auth.type_tag().to_owned(),
        }
    }
}

/// Decorates a router with the standard metadata introspection routes
pub trait MetadataRoutes: Sized {
    /// Register the metadata routes at the router root
    ///
    /// Adds `GET` routes for `/metadata`, `/v{api_version}/metadata`, and
    /// both with `.json` appended.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the metadata fails validation
    fn with_metadata(self, metadata: &ServiceMetadata) -> Result<Self, ConfigError> {
        self.with_metadata_at(&[""], metadata)
    }

    /// Register the metadata routes under each of the given path prefixes
    ///
    /// Each prefix gets the same four route variants. Prefixes are
    /// normalized to a leading slash and no trailing slash.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the metadata fails validation
    fn with_metadata_at(
        self,
        prefixes: &[&str],
        metadata: &ServiceMetadata,
    ) -> Result<Self, ConfigError>;
}

impl MetadataRoutes for Router {
    fn with_metadata_at(
        mut self,
        prefixes: &[&str],
        metadata: &ServiceMetadata,
    ) -> Result<Self, ConfigError> {
        metadata.validate()?;
        let body = MetadataBody::from(metadata);

        for prefix in prefixes {
            for route_path in route_variants(prefix, &metadata.api_version) {
                let body = body.clone();
                self = self.route(
                    &route_path,
                    get(move || std::future::ready(Json(body.clone()))),
                );
            }
        }

        Ok(self)
    }
}

/// The four path variants served under one prefix
fn route_variants(prefix: &str, api_version: &str) -> [String; 4] {
    let base = normalize_prefix(prefix);
    [
        format!("{base}/metadata"),
        format!("{base}/metadata.json"),
        format!("{base}/v{api_version}/metadata"),
        format!("{base}/v{api_version}/metadata.json"),
    ]
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
