//! Minimal schema-registry HTTP client.
//!
//! The demo only needs one registry operation: resolve the latest schema
//! registered for a subject. Schema registration itself is an infrastructure
//! concern handled outside these programs.

use crate::{Config, Error, Result};
use serde::Deserialize;
use std::time::Duration;

/// The registry subject holding value schemas for a topic.
pub fn subject_for_topic(topic: &str) -> String {
    format!("{topic}-value")
}

/// A schema version as returned by `GET /subjects/{subject}/versions/latest`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredSchema {
    pub subject: String,
    pub version: i32,
    /// Globally unique schema id, used as the envelope prefix.
    pub id: u32,
    #[serde(default, rename = "schemaType")]
    pub schema_type: Option<String>,
    #[serde(default)]
    pub schema: String,
}

/// HTTP client for a Confluent-compatible schema registry.
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl RegistryClient {
    /// Build a client for the registry named in `config`.
    ///
    /// No connection is opened here; the first request happens on
    /// [`Self::latest_schema`].
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Resolve the latest schema version registered for `subject`.
    pub async fn latest_schema(&self, subject: &str) -> Result<RegisteredSchema> {
        let url = format!("{}/subjects/{subject}/versions/latest", self.base_url);
        tracing::debug!(url, "resolving latest schema");

        let mut request = self.http.get(&url);
        if !self.username.is_empty() {
            request = request.basic_auth(&self.username, Some(&self.password));
        }

        let response = request.send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::SchemaNotFound {
                subject: subject.to_string(),
            });
        }
        if !status.is_success() {
            return Err(Error::RegistryStatus {
                subject: subject.to_string(),
                status,
            });
        }

        let schema: RegisteredSchema = response.json().await?;
        tracing::debug!(
            subject = schema.subject,
            id = schema.id,
            version = schema.version,
            "resolved schema"
        );
        Ok(schema)
    }
}
