//! Management API client
//!
//! Fetches structure snapshots from `{api_base}/getStructure/{type}[/{name}]/showIds`
//! and the page/component names the request bar offers (`listPages`,
//! `listComponents`).

use crate::config::Config;
use crate::structure::{Snapshot, StructureRequest, StructureType};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const STRUCTURE_COMMAND: &str = "getStructure";
const FALLBACK_MESSAGE: &str = "Failed to load structure";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("No authentication token")]
    Unauthenticated,

    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// Successful response without a structure (absent or `null`)
    #[error("{0}")]
    MissingStructure(String),
}

/// Response envelope shared by the management endpoints
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    message: Option<String>,
    data: Option<T>,
}

impl<T> Envelope<T> {
    /// The backend's message, or the generic one when it sent none
    fn message_or_fallback(self) -> String {
        self.message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct StructureData {
    /// Absent and `null` both decode as `None`; `[]` is an empty structure
    #[serde(default)]
    structure: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct NameList {
    #[serde(default)]
    pages: Vec<Value>,
    #[serde(default)]
    components: Vec<Value>,
}

/// Accept either a full response envelope or a bare structure
pub fn extract_structure(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => map
            .get_mut("data")
            .and_then(|data| data.get_mut("structure"))
            .map(Value::take)
            .unwrap_or(Value::Null),
        other => other,
    }
}

/// Listing command for types addressed by name
fn list_command(structure_type: StructureType) -> Option<&'static str> {
    match structure_type {
        StructureType::Page => Some("listPages"),
        StructureType::Component => Some("listComponents"),
        StructureType::Menu | StructureType::Footer => None,
    }
}

/// List entries are either bare names or objects with a `name` field
fn entry_name(entry: &Value) -> Option<String> {
    entry
        .as_str()
        .or_else(|| entry.get("name").and_then(Value::as_str))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

#[derive(Clone)]
pub struct StructureClient {
    http: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl StructureClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        tracing::debug!(
            "Structure client ready: {} (timeout {}s)",
            config.api_base,
            config.timeout_secs
        );

        Ok(Self {
            http,
            api_base: config.api_base.clone(),
            token: config.token.clone(),
        })
    }

    /// `{api_base}/{command}/{segments...}`, each segment percent-encoded
    fn command_url<'a>(
        &self,
        command: &str,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url, FetchError> {
        let mut url =
            Url::parse(&self.api_base).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.api_base.clone()))?
            .pop_if_empty()
            .push(command)
            .extend(segments);
        Ok(url)
    }

    /// Full endpoint URL for a request
    pub fn structure_url(&self, request: &StructureRequest) -> Result<Url, FetchError> {
        self.command_url(STRUCTURE_COMMAND, request.path_segments())
    }

    /// Authenticated GET returning the decoded envelope of a 2xx response
    async fn get_envelope<T: DeserializeOwned>(&self, url: Url) -> Result<Envelope<T>, FetchError> {
        let token = self.token.as_deref().ok_or(FetchError::Unauthenticated)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !status.is_success() {
            // The backend puts a human-readable reason in the envelope when it can
            let message = serde_json::from_str::<Envelope<IgnoredAny>>(&body)
                .map(Envelope::message_or_fallback)
                .unwrap_or_else(|_| FALLBACK_MESSAGE.to_string());

            tracing::warn!(status = status.as_u16(), "Request failed: {}", message);
            return Err(FetchError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    pub async fn fetch(&self, request: &StructureRequest) -> Result<Snapshot, FetchError> {
        let url = self.structure_url(request)?;
        tracing::info!("Fetching {}", request.title());

        let mut envelope: Envelope<StructureData> = self.get_envelope(url).await?;
        let structure = envelope.data.take().and_then(|d| d.structure);
        let Some(structure) = structure.filter(|s| !s.is_null()) else {
            let message = envelope.message_or_fallback();
            tracing::warn!("{} has no structure: {}", request.title(), message);
            return Err(FetchError::MissingStructure(message));
        };

        let snapshot = Snapshot::new(request.clone(), structure);
        tracing::debug!(
            "Loaded {} ({} nodes)",
            request.title(),
            snapshot.forest.node_count()
        );
        Ok(snapshot)
    }

    /// Names the backend knows for `structure_type`. Menu and footer have
    /// none and never hit the network.
    pub async fn list_names(&self, structure_type: StructureType) -> Result<Vec<String>, FetchError> {
        let Some(command) = list_command(structure_type) else {
            return Ok(Vec::new());
        };
        let url = self.command_url(command, std::iter::empty())?;

        let envelope: Envelope<NameList> = self.get_envelope(url).await?;
        let list = envelope.data.unwrap_or_default();
        let entries = match structure_type {
            StructureType::Page => list.pages,
            _ => list.components,
        };

        let names: Vec<String> = entries.iter().filter_map(entry_name).collect();
        tracing::debug!("{} {} name(s) available", names.len(), structure_type);
        Ok(names)
    }
}
