//! `reqwest`-backed [`RemoteFetcher`].

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;

use badgehub_core::config::RemoteFetchConfig;
use badgehub_core::error::{AppError, ErrorKind};
use badgehub_core::result::AppResult;
use badgehub_core::traits::RemoteFetcher;

/// Fetches JSON over HTTP with a total request timeout.
#[derive(Debug, Clone)]
pub struct HttpRemoteFetcher {
    client: reqwest::Client,
}

impl HttpRemoteFetcher {
    /// Builds a client with the configured timeout.
    pub fn new(config: &RemoteFetchConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl RemoteFetcher for HttpRemoteFetcher {
    async fn fetch_json(&self, url: &str) -> AppResult<Value> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        debug!(url = %url, status = status.as_u16(), "Remote server responded");

        if status != StatusCode::OK {
            return Err(AppError::upstream_status(
                status.as_u16(),
                format!("Remote server returned {}", status.as_u16()),
            ));
        }

        let body = response.bytes().await.map_err(request_error)?;
        serde_json::from_slice(&body).map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Invalid JSON response", e)
        })
    }
}

fn request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::with_source(ErrorKind::GatewayTimeout, "Request timeout", err)
    } else {
        AppError::with_source(ErrorKind::ExternalService, err.to_string(), err)
    }
}
