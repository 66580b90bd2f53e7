//! URL checks and dispatch for the remote fetch proxy.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use badgehub_core::error::AppError;
use badgehub_core::result::AppResult;
use badgehub_core::traits::RemoteFetcher;

/// Proxies JSON documents from other servers.
#[derive(Debug, Clone)]
pub struct RemoteFetchService {
    /// Outbound HTTP client.
    fetcher: Arc<dyn RemoteFetcher>,
}

impl RemoteFetchService {
    /// Creates a new remote fetch service.
    pub fn new(fetcher: Arc<dyn RemoteFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetches the document named by the `url` member of `request`.
    ///
    /// The URL is checked before any outbound request is made.
    pub async fn fetch(&self, request: &Value) -> AppResult<Value> {
        let url = validate_url(request.get("url"))?;

        info!(url = %url, "Fetching remote document");
        self.fetcher.fetch_json(url).await.inspect_err(|e| {
            warn!(url = %url, error = %e, "Remote fetch failed");
        })
    }
}

/// Checks that a URL was given and uses the `http` or `https` scheme.
///
/// Any falsy JSON value (absent, `null`, `false`, `0`, `""`, `[]`, `{}`)
/// counts as missing.
pub fn validate_url(value: Option<&Value>) -> AppResult<&str> {
    let Some(value) = value.filter(|v| is_truthy(v)) else {
        return Err(AppError::validation("Missing URL"));
    };

    match value.as_str() {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => Ok(url),
        _ => Err(AppError::validation("Invalid URL")),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
