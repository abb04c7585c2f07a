//! Scheduler API Client
//!
//! HTTP client for the scheduler API's collection endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::error::LoadError;
use crate::model::{Appointments, Day, Interviewers};

/// Source of the three scheduler collections
#[async_trait]
pub trait SchedulerApi: Send + Sync {
    async fn fetch_days(&self) -> Result<Vec<Day>, LoadError>;

    async fn fetch_appointments(&self) -> Result<Appointments, LoadError>;

    async fn fetch_interviewers(&self) -> Result<Interviewers, LoadError>;
}

/// Configuration for the HTTP scheduler client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the scheduler API (e.g., "http://localhost:8001")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// [`SchedulerApi`] over HTTP
pub struct HttpSchedulerApi {
    client: Client,
    config: ApiClientConfig,
}

impl HttpSchedulerApi {
    pub fn new(config: ApiClientConfig) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    fn url(&self, resource: &str) -> String {
        format!(
            "{}/api/{}",
            self.config.base_url.trim_end_matches('/'),
            resource
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: &'static str) -> Result<T, LoadError> {
        let url = self.url(resource);
        tracing::debug!(%url, "Fetching {}", resource);

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                LoadError::Timeout(resource)
            } else if e.is_connect() {
                LoadError::Unavailable(self.config.base_url.clone())
            } else {
                LoadError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LoadError::ApiError {
                resource,
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                LoadError::Timeout(resource)
            } else {
                LoadError::Request(e)
            }
        })?;

        serde_json::from_slice(&body).map_err(|e| LoadError::Decode {
            resource,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl SchedulerApi for HttpSchedulerApi {
    async fn fetch_days(&self) -> Result<Vec<Day>, LoadError> {
        self.get_json("days").await
    }

    async fn fetch_appointments(&self) -> Result<Appointments, LoadError> {
        self.get_json("appointments").await
    }

    async fn fetch_interviewers(&self) -> Result<Interviewers, LoadError> {
        self.get_json("interviewers").await
    }
}
