//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use badgehub_api::AppState;
use badgehub_core::config::{AppConfig, DatabaseConfig};
use badgehub_core::error::AppError;
use badgehub_core::result::AppResult;
use badgehub_core::traits::RemoteFetcher;
use badgehub_database::DatabasePool;
use badgehub_database::repositories::BadgeRepository;
use badgehub_service::{BadgeService, RemoteFetchService};

const BOUNDARY: &str = "badgehub-test-boundary";

/// Canned outcome for a mocked remote URL.
#[derive(Debug, Clone)]
pub enum MockReply {
    Json(Value),
    Status(u16),
    Timeout,
    Unreachable,
}

/// Remote fetcher that records every URL and replays canned outcomes.
#[derive(Debug, Default)]
pub struct RecordingFetcher {
    calls: Mutex<Vec<String>>,
    replies: Mutex<HashMap<String, MockReply>>,
}

impl RecordingFetcher {
    /// Set the outcome for `url`. Unknown URLs answer `{"url": <url>}`.
    pub fn reply(&self, url: &str, reply: MockReply) {
        self.replies
            .lock()
            .unwrap()
            .insert(url.to_string(), reply);
    }

    /// URLs fetched so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteFetcher for RecordingFetcher {
    async fn fetch_json(&self, url: &str) -> AppResult<Value> {
        self.calls.lock().unwrap().push(url.to_string());
        let reply = self.replies.lock().unwrap().get(url).cloned();
        match reply {
            None => Ok(serde_json::json!({ "url": url })),
            Some(MockReply::Json(value)) => Ok(value),
            Some(MockReply::Status(code)) => Err(AppError::upstream_status(
                code,
                format!("Remote server returned {code}"),
            )),
            Some(MockReply::Timeout) => Err(AppError::gateway_timeout("Request timeout")),
            Some(MockReply::Unreachable) => {
                Err(AppError::external_service("error sending request"))
            }
        }
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The mock remote fetcher wired into the app
    pub fetcher: Arc<RecordingFetcher>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application backed by an in-memory database.
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a test application with custom configuration.
    pub async fn with_config(config: AppConfig) -> Self {
        let fetcher = Arc::new(RecordingFetcher::default());
        let router = Self::build_router(config.clone(), fetcher.clone()).await;

        Self {
            router,
            fetcher,
            config,
        }
    }

    /// Build a router around any remote fetcher.
    pub async fn build_router(mut config: AppConfig, fetcher: Arc<dyn RemoteFetcher>) -> Router {
        config.database = DatabaseConfig::in_memory();

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        badgehub_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let badge_repo = Arc::new(BadgeRepository::new(db.into_pool()));
        let badge_service = Arc::new(BadgeService::new(badge_repo));
        let remote_service = Arc::new(RemoteFetchService::new(fetcher));

        let state = AppState::new(Arc::new(config), badge_service, remote_service);
        badgehub_api::build_app(state)
    }

    /// Make a JSON request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        self.send(method, path, Some("application/json"), body_str.into_bytes())
            .await
    }

    /// Upload a badge as multipart form data.
    pub async fn upload(&self, parts: &[Part<'_>]) -> TestResponse {
        let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
        self.send("POST", "/api/badges", Some(&content_type), multipart_body(parts))
            .await
    }

    /// Upload `badge_data` as the `badgeData` field, with an optional image.
    pub async fn upload_badge(&self, badge_data: Value, image: Option<(&str, &[u8])>) -> TestResponse {
        let text = badge_data.to_string();
        let mut parts = vec![Part::Text {
            name: "badgeData",
            value: &text,
        }];
        if let Some((mime, data)) = image {
            parts.push(Part::File {
                name: "file",
                file_name: "badge.png",
                content_type: mime,
                data,
            });
        }
        self.upload(&parts).await
    }

    /// Send raw bytes and keep the raw response body.
    pub async fn send(
        &self,
        method: &str,
        path: &str,
        content_type: Option<&str>,
        body: Vec<u8>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        if let Some(ct) = content_type {
            req = req.header("Content-Type", ct);
        }
        let req = req.body(Body::from(body)).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body")
            .to_vec();
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            bytes,
        }
    }
}

/// One part of a multipart body.
#[derive(Debug, Clone, Copy)]
pub enum Part<'a> {
    Text {
        name: &'a str,
        value: &'a str,
    },
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

/// Encode parts as `multipart/form-data` with the shared boundary.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body (`Null` when the body is not JSON)
    pub body: Value,
    /// Raw body bytes
    pub bytes: Vec<u8>,
}

impl TestResponse {
    /// The `error` message of an error response.
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
