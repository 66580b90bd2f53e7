//! Outbound HTTP client trait used by the remote fetch proxy.

use async_trait::async_trait;

use crate::result::AppResult;

/// Fetches a JSON document from a remote HTTP(S) server.
///
/// The production implementation lives in `badgehub-service`; tests swap in
/// recording fakes. Implementations receive URLs that have already been
/// checked for an `http://` or `https://` prefix.
///
/// Errors must use these kinds so the gateway can map them:
/// - [`ErrorKind::UpstreamStatus`](crate::error::ErrorKind::UpstreamStatus) for a non-200 answer
/// - [`ErrorKind::GatewayTimeout`](crate::error::ErrorKind::GatewayTimeout) when the timeout elapses
/// - [`ErrorKind::ExternalService`](crate::error::ErrorKind::ExternalService) for network failures and non-JSON bodies
#[async_trait]
pub trait RemoteFetcher: Send + Sync + std::fmt::Debug + 'static {
    /// GET `url` with `Accept: application/json` and parse the body.
    async fn fetch_json(&self, url: &str) -> AppResult<serde_json::Value>;
}
