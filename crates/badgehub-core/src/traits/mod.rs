//! Core traits defined in `badgehub-core` and implemented by other crates.

pub mod remote;

pub use remote::RemoteFetcher;
