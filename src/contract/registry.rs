//! Default contract registry
//!
//! Registry documents map operation names to contract definitions:
//!
//! ```yaml
//! pagination:
//!   ListTables:
//!     input_token: ExclusiveStartTableName
//!     output_token: LastEvaluatedTableName
//!   ListObjects:
//!     input_token: Marker
//!     output_token: NextMarker
//!     more_results: IsTruncated
//! ```

use super::types::ContractDefinition;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Supplies the default pagination contract for a named operation
pub trait ContractRegistry: Send + Sync {
    /// Look up the default definition for an operation
    fn lookup(&self, operation: &str) -> Option<ContractDefinition>;
}

impl ContractRegistry for HashMap<String, ContractDefinition> {
    fn lookup(&self, operation: &str) -> Option<ContractDefinition> {
        self.get(operation).cloned()
    }
}

/// In-memory registry, usually loaded from a YAML or JSON document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticRegistry {
    #[serde(default)]
    pagination: HashMap<String, ContractDefinition>,
}

impl StaticRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation (builder style)
    #[must_use]
    pub fn with(mut self, operation: impl Into<String>, definition: ContractDefinition) -> Self {
        self.insert(operation, definition);
        self
    }

    /// Add or replace an operation
    pub fn insert(&mut self, operation: impl Into<String>, definition: ContractDefinition) {
        self.pagination.insert(operation.into(), definition);
    }

    /// Number of registered operations
    pub fn len(&self) -> usize {
        self.pagination.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.pagination.is_empty()
    }

    /// Registered operation names, sorted
    pub fn operations(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.pagination.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Parse a registry from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse registry YAML: {e}")))
    }

    /// Parse a registry from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Failed to parse registry JSON: {e}")))
    }
}

impl ContractRegistry for StaticRegistry {
    fn lookup(&self, operation: &str) -> Option<ContractDefinition> {
        self.pagination.get(operation).cloned()
    }
}

/// Load a registry file; `.json` files are parsed as JSON, anything else as YAML
pub fn load_registry(path: impl AsRef<Path>) -> Result<StaticRegistry> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read registry file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        StaticRegistry::from_json_str(&content)
    } else {
        StaticRegistry::from_yaml_str(&content)
    }
}
