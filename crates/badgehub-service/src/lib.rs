//! # badgehub-service
//!
//! Business logic for BadgeHub. [`BadgeService`] owns every read and write
//! of the badge table; [`RemoteFetchService`] proxies JSON documents from
//! other servers.
//!
//! Services take their collaborators at construction time.

pub mod badge;
pub mod remote;

pub use badge::{BadgeExport, BadgeService, ImageUpload, content_hash};
pub use remote::{HttpRemoteFetcher, RemoteFetchService};
