// Data source trait for power telemetry access
use crate::domain::power::{RawSnapshot, TimestampedRecord};
use async_trait::async_trait;
use thiserror::Error;

/// Failures talking to the power-data backend. Passed through to callers as-is.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

#[async_trait]
pub trait PowerDataSource: Send + Sync {
    /// Latest snapshot across all regions
    async fn current_snapshot(&self) -> Result<RawSnapshot, TransportError>;

    /// Stored snapshots, newest first as the backend returns them
    async fn history(&self, limit: u32) -> Result<Vec<TimestampedRecord>, TransportError>;

    /// Ask the backend to pull a fresh snapshot upstream and return it
    async fn fetch_now(&self) -> Result<RawSnapshot, TransportError>;

    /// Backend health payload, passed through untouched
    async fn health(&self) -> Result<serde_json::Value, TransportError>;
}
