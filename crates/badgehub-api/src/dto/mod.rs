//! Response data transfer objects.

pub mod response;

pub use response::{
    BadgeResponse, ExportResponse, FetchRemoteResponse, HealthResponse, MessageResponse,
    StatsResponse,
};
