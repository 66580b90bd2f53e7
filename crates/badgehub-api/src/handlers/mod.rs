//! HTTP request handlers.

pub mod badge;
pub mod fallback;
pub mod health;
pub mod remote;
pub mod report;
