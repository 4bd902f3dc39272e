//! HTTP client for the intake API.
//!
//! Provides a minimal client with configurable auth (Bearer token or X-API-Key),
//! generic JSON helpers, and the domain calls the uploader needs: metadata
//! registration and presigned upload URLs. The client implements
//! [`intake_core::MetadataRegistrar`] and backs [`PresignedTransfer`].

pub mod api;
pub mod registrar;
pub mod transfer;

use anyhow::{Context, Result};
use intake_core::IntakeConfig;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

const DEFAULT_API_VERSION: &str = "v0";

/// Authentication strategy for the API.
#[derive(Clone, Debug)]
pub enum Auth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// `X-API-Key: {key}`
    XApiKey(String),
}

/// Non-2xx response from the API.
#[derive(Debug, thiserror::Error)]
#[error("API request failed with status {status}: {body}")]
pub struct ApiStatusError {
    pub status: u16,
    pub body: String,
}

/// API version prefix (e.g. "/api/v0").
pub fn api_prefix(version: &str) -> String {
    format!("/api/{}", version.trim_matches('/'))
}

/// HTTP client for the intake API with configurable auth.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth: Auth,
    prefix: String,
}

impl ApiClient {
    pub fn new(base_url: String, auth: Auth) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
            prefix: api_prefix(DEFAULT_API_VERSION),
        })
    }

    /// Use a different API version than the default `v0`.
    pub fn with_api_version(mut self, version: &str) -> Self {
        self.prefix = api_prefix(version);
        self
    }

    /// Create client from configuration. Uses X-API-Key auth.
    pub fn from_config(config: &IntakeConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .context("Missing API key. Set INTAKE_API_KEY")?;

        Ok(Self::new(config.api_url.clone(), Auth::XApiKey(api_key))?
            .with_api_version(&config.api_version))
    }

    /// Create client from environment: INTAKE_API_URL, INTAKE_API_KEY, INTAKE_API_VERSION.
    pub fn from_env() -> Result<Self> {
        let config = IntakeConfig::from_env()?;
        Self::from_config(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Full URL of a versioned API endpoint.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.prefix, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Auth::Bearer(token) => request.header("Authorization", format!("Bearer {}", token)),
            Auth::XApiKey(key) => request.header("X-API-Key", key.as_str()),
        }
    }

    /// GET request with optional query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.build_url(path);
        let mut request = self.apply_auth(self.client.get(&url));

        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await.context("Failed to send request")?;
        Self::parse_json(response).await
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.build_url(path);
        let request = self.apply_auth(self.client.post(&url).json(body));

        let response = request.send().await.context("Failed to send request")?;
        Self::parse_json(response).await
    }

    async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiStatusError {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body: T = response
            .json()
            .await
            .context("Failed to parse response as JSON")?;

        Ok(body)
    }

    /// Raw client for requests outside the API, such as presigned URLs.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

pub use api::{PresignedUpload, PresignedUploadRequest};
pub use transfer::PresignedTransfer;
