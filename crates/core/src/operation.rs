// Copyright 2025 Migratory Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pre-parsed operation intermediate representation.
//!
//! The pattern analyzer never inspects source text. An external parsing
//! adapter distills whatever it has (a declared data model, a sampled
//! request log) into a flat list of [`Operation`] values plus the
//! secondary indexes declared on each table, and the core works only on
//! that typed IR. This keeps analysis deterministic and unit-testable.

use serde::{Deserialize, Serialize};

/// The kind of store operation an [`Operation`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Single-item write.
    Put,
    /// Single-item point read.
    Get,
    /// Partition-scoped range read.
    Query,
    /// Multi-item batched write.
    BatchWrite,
    /// Multi-item transactional write.
    TransactWrite,
}

impl OperationKind {
    /// Whether this kind writes data.
    pub fn is_write(self) -> bool {
        matches!(
            self,
            OperationKind::Put | OperationKind::BatchWrite | OperationKind::TransactWrite
        )
    }
}

/// One declared or observed store operation.
///
/// Optional fields are populated only when the parsing adapter could
/// recover them; detectors treat a missing field as absent evidence,
/// never as a malformed input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation kind.
    pub kind: OperationKind,
    /// Target table name.
    pub table: String,
    /// Literal partition key value, when the adapter saw one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_literal: Option<String>,
    /// Secondary index the operation targets, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
    /// Number of items touched (batch sizes, downstream write counts).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u32>,
    /// Total payload size in bytes, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_size_bytes: Option<u64>,
}

impl Operation {
    /// Build an operation with only the required fields set.
    pub fn new(kind: OperationKind, table: impl Into<String>) -> Self {
        Self {
            kind,
            table: table.into(),
            key_literal: None,
            index_name: None,
            item_count: None,
            item_size_bytes: None,
        }
    }

    /// Set the literal partition key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key_literal = Some(key.into());
        self
    }

    /// Set the item count.
    pub fn with_item_count(mut self, count: u32) -> Self {
        self.item_count = Some(count);
        self
    }

    /// Set the payload size in bytes.
    pub fn with_item_size(mut self, bytes: u64) -> Self {
        self.item_size_bytes = Some(bytes);
        self
    }
}

/// Attribute projection carried by a secondary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionType {
    /// All attributes projected into the index.
    All,
    /// Only the key attributes.
    KeysOnly,
    /// Keys plus a declared subset of attributes.
    Include,
}

/// One declared secondary index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDeclaration {
    /// Index name.
    pub name: String,
    /// Table the index is declared on.
    pub table: String,
    /// Attribute projection.
    pub projection_type: ProjectionType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_write_classification() {
        assert!(OperationKind::Put.is_write());
        assert!(OperationKind::BatchWrite.is_write());
        assert!(OperationKind::TransactWrite.is_write());
        assert!(!OperationKind::Get.is_write());
        assert!(!OperationKind::Query.is_write());
    }

    #[test]
    fn test_operation_serde_snake_case() {
        let op = Operation::new(OperationKind::BatchWrite, "events").with_item_count(25);
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["kind"], "batch_write");
        assert_eq!(json["table"], "events");
        assert_eq!(json["item_count"], 25);
        assert!(json.get("key_literal").is_none());
    }

    #[test]
    fn test_operation_builder_round_trip() {
        let op = Operation::new(OperationKind::Get, "users").with_key("user#42");
        let back: Operation = serde_json::from_str(&serde_json::to_string(&op).unwrap()).unwrap();
        assert_eq!(back, op);
    }
}
