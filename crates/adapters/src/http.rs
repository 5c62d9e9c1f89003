// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP connector for the source store's JSON wire protocol.
//!
//! Speaks the PutItem/GetItem/Query subset against any endpoint URL
//! that accepts the protocol without enforcing request signing: a local
//! protocol-compatible port (e.g. an Alternator endpoint) or an
//! emulator. Round-trip time is measured here, around the whole HTTP
//! exchange, which is exactly what a migrating client would see.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use migratory_benchmarks::{BenchError, Connector, Outcome, Result};
use serde_json::{json, Value};
use tracing::trace;

const PROTOCOL_VERSION: &str = "DynamoDB_20120810";
const CONTENT_TYPE: &str = "application/x-amz-json-1.0";

/// Connector speaking the source store's JSON protocol over HTTP.
pub struct HttpConnector {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpConnector {
    /// Build a connector for the given endpoint URL.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Build a connector with a per-request timeout.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    async fn call(&self, operation: &str, body: Value) -> Result<Outcome> {
        let start = Instant::now();
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-amz-target", format!("{PROTOCOL_VERSION}.{operation}"))
            .header("content-type", CONTENT_TYPE)
            .json(&body)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let elapsed = start.elapsed();
        trace!(operation, status, ?elapsed, "wire call complete");
        Ok(classify_response(status, &text, elapsed))
    }
}

/// Transport-level failure means the store is unreachable; the run for
/// this store fails, the other store's run is unaffected.
fn classify_transport_error(err: reqwest::Error) -> BenchError {
    BenchError::Connection(err.to_string())
}

/// Map an HTTP response to a per-operation outcome. Throttling
/// exceptions are counted outcomes, not errors.
fn classify_response(status: u16, body: &str, elapsed: Duration) -> Outcome {
    if (200..300).contains(&status) {
        return Outcome::success(elapsed);
    }
    if body.contains("ProvisionedThroughputExceededException")
        || body.contains("ThrottlingException")
        || body.contains("RequestLimitExceeded")
    {
        return Outcome::throttled(elapsed);
    }
    Outcome::failed(elapsed)
}

/// Convert a flat JSON item to the wire attribute-value encoding.
fn to_attribute_values(item: &Value) -> Value {
    let mut attrs = serde_json::Map::new();
    if let Some(fields) = item.as_object() {
        for (name, value) in fields {
            let attr = match value {
                Value::Number(n) => json!({ "N": n.to_string() }),
                Value::Bool(b) => json!({ "BOOL": b }),
                Value::String(s) => json!({ "S": s }),
                other => json!({ "S": other.to_string() }),
            };
            attrs.insert(name.clone(), attr);
        }
    }
    Value::Object(attrs)
}

/// Pull the key value out of a `id = <value>` condition string.
fn condition_value(condition: &str) -> &str {
    condition
        .rsplit('=')
        .next()
        .map(str::trim)
        .unwrap_or(condition)
}

#[async_trait]
impl Connector for HttpConnector {
    async fn put(&self, table: &str, item: Value) -> Result<Outcome> {
        let body = json!({
            "TableName": table,
            "Item": to_attribute_values(&item),
        });
        self.call("PutItem", body).await
    }

    async fn get(&self, table: &str, key: &str) -> Result<Outcome> {
        let body = json!({
            "TableName": table,
            "Key": { "id": { "S": key } },
        });
        self.call("GetItem", body).await
    }

    async fn query(&self, table: &str, condition: &str) -> Result<Outcome> {
        let body = json!({
            "TableName": table,
            "KeyConditionExpression": "id = :v",
            "ExpressionAttributeValues": { ":v": { "S": condition_value(condition) } },
        });
        self.call("Query", body).await
    }
}

#[cfg(test)]
mod tests {
    use migratory_benchmarks::OutcomeStatus;

    use super::*;

    #[test]
    fn test_classify_success() {
        let outcome = classify_response(200, "{}", Duration::from_millis(3));
        assert_eq!(outcome.status, OutcomeStatus::Success);
        assert_eq!(outcome.elapsed, Duration::from_millis(3));
    }

    #[test]
    fn test_classify_throttle_exception() {
        let body = r#"{"__type":"com.amazonaws.dynamodb.v20120810#ProvisionedThroughputExceededException"}"#;
        let outcome = classify_response(400, body, Duration::from_millis(3));
        assert_eq!(outcome.status, OutcomeStatus::Throttled);
    }

    #[test]
    fn test_classify_other_client_error_failed() {
        let body = r#"{"__type":"com.amazonaws.dynamodb.v20120810#ResourceNotFoundException"}"#;
        let outcome = classify_response(400, body, Duration::from_millis(3));
        assert_eq!(outcome.status, OutcomeStatus::Failed);
    }

    #[test]
    fn test_attribute_value_encoding() {
        let item = json!({"id": "user1", "count": 3, "active": true});
        let attrs = to_attribute_values(&item);
        assert_eq!(attrs["id"], json!({"S": "user1"}));
        assert_eq!(attrs["count"], json!({"N": "3"}));
        assert_eq!(attrs["active"], json!({"BOOL": true}));
    }

    #[test]
    fn test_condition_value_extraction() {
        assert_eq!(condition_value("id = user42"), "user42");
        assert_eq!(condition_value("user42"), "user42");
    }
}
