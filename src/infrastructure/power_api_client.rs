// Power-data backend client
use crate::application::power_data_source::{PowerDataSource, TransportError};
use crate::domain::power::{RESULT_CODE_OK, RawSnapshot, TimestampedRecord};
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PowerApiClient {
    base_url: String,
    client: reqwest::Client,
}

/// Stored record as the backend returns it. `data` holds the upstream
/// snapshot, sometimes as an encoded JSON string.
#[derive(Debug, Deserialize)]
struct StoredRecord {
    timestamp: String,
    #[serde(default)]
    data: Value,
}

impl PowerApiClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, TransportError> {
        let url = self.url(path);
        let result = self.execute(&url, query).await;
        if let Err(e) = &result {
            tracing::error!("Backend call failed: {}", e);
        }
        result
    }

    async fn execute(&self, url: &str, query: &[(&str, String)]) -> Result<Value, TransportError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| TransportError::Request {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| TransportError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    fn decode_error(&self, path: &str, e: impl std::fmt::Display) -> TransportError {
        let err = TransportError::Decode {
            url: self.url(path),
            message: e.to_string(),
        };
        tracing::error!("Backend call failed: {}", err);
        err
    }
}

/// The upstream snapshot inside a stored-record envelope, or the body itself
/// when there is no envelope.
fn unwrap_envelope(body: Value) -> Result<Value, serde_json::Error> {
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::String(encoded)) => serde_json::from_str(&encoded),
            Some(Value::Null) | None => Ok(Value::Object(map)),
            Some(inner) => Ok(inner),
        },
        Value::String(encoded) => serde_json::from_str(&encoded),
        other => Ok(other),
    }
}

/// Decode a snapshot. Unsuccessful snapshots are accepted whatever their
/// payload looks like, since their data is never used.
fn decode_snapshot(value: Value) -> Result<RawSnapshot, serde_json::Error> {
    let result_code = value
        .get("result_code")
        .and_then(Value::as_str)
        .map(str::to_string);

    if result_code.as_deref() != Some(RESULT_CODE_OK) {
        return Ok(RawSnapshot {
            result_code,
            result_msg: value
                .get("result_msg")
                .or_else(|| value.get("message"))
                .or_else(|| value.get("error"))
                .and_then(Value::as_str)
                .map(str::to_string),
            result_data: None,
        });
    }

    serde_json::from_value(value)
}

/// Stored records in arrival order. Items that are not records are dropped;
/// records with an undecodable snapshot keep an invalid one.
fn decode_history(body: Value) -> Vec<TimestampedRecord> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    let mut records = Vec::with_capacity(items.len());
    for item in items {
        let stored: StoredRecord = match serde_json::from_value(item) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Skipping malformed history record: {}", e);
                continue;
            }
        };
        let snapshot = unwrap_envelope(stored.data)
            .and_then(decode_snapshot)
            .unwrap_or_else(|e| {
                tracing::warn!("Undecodable snapshot in record {}: {}", stored.timestamp, e);
                RawSnapshot::default()
            });
        records.push(TimestampedRecord::new(stored.timestamp, snapshot));
    }
    records
}

#[async_trait]
impl PowerDataSource for PowerApiClient {
    async fn current_snapshot(&self) -> Result<RawSnapshot, TransportError> {
        let path = "/api/power-data";
        let body = self.get_json(path, &[]).await?;
        unwrap_envelope(body)
            .and_then(decode_snapshot)
            .map_err(|e| self.decode_error(path, e))
    }

    async fn history(&self, limit: u32) -> Result<Vec<TimestampedRecord>, TransportError> {
        let path = "/api/power-data/history";
        let body = self.get_json(path, &[("limit", limit.to_string())]).await?;
        let records = decode_history(body);

        tracing::debug!("Fetched {} history records (limit {})", records.len(), limit);
        Ok(records)
    }

    async fn fetch_now(&self) -> Result<RawSnapshot, TransportError> {
        let path = "/api/power-data/fetch-now";
        let body = self.get_json(path, &[]).await?;
        unwrap_envelope(body)
            .and_then(decode_snapshot)
            .map_err(|e| self.decode_error(path, e))
    }

    async fn health(&self) -> Result<Value, TransportError> {
        self.get_json("/health", &[]).await
    }
}
