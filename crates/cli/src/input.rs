//! Typed JSON input files.

use std::path::Path;

use anyhow::Context;
use migratory_core::{IndexDeclaration, Operation};
use serde::Deserialize;

/// Input to the `analyze` and `report` commands: the pre-parsed
/// operation list plus declared secondary indexes.
#[derive(Debug, Deserialize)]
pub struct AnalyzeInput {
    /// Declared or observed operations.
    #[serde(default)]
    pub operations: Vec<Operation>,
    /// Declared secondary indexes.
    #[serde(default)]
    pub indexes: Vec<IndexDeclaration>,
}

/// Read and deserialize a JSON file with path context on failure.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_input_defaults_missing_lists() {
        let input: AnalyzeInput = serde_json::from_str(r#"{"operations": []}"#).unwrap();
        assert!(input.operations.is_empty());
        assert!(input.indexes.is_empty());
    }

    #[test]
    fn test_analyze_input_parses_operations() {
        let input: AnalyzeInput = serde_json::from_str(
            r#"{
                "operations": [
                    {"kind": "get", "table": "users", "key_literal": "user#1"},
                    {"kind": "batch_write", "table": "events", "item_count": 40}
                ],
                "indexes": [
                    {"name": "by_email", "table": "users", "projection_type": "all"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(input.operations.len(), 2);
        assert_eq!(input.indexes.len(), 1);
    }
}
