//! Remote badge document proxy.

pub mod fetch;
pub mod http;

pub use fetch::RemoteFetchService;
pub use http::HttpRemoteFetcher;
