//! Common types used throughout pagechain
//!
//! This module contains the page representation, JSON aliases and the
//! callback control-flow signal shared by the traversals.

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::sync::Arc;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Page
// ============================================================================

/// One response produced by a single page source invocation.
///
/// A page is an ordered mapping from field name to JSON value. It is immutable
/// once fetched and cheap to clone, so the same page can be handed to a
/// callback, kept as the traversal's current page and returned on completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    fields: Arc<JsonObject>,
}

impl Page {
    /// Create a page from its fields
    pub fn new(fields: JsonObject) -> Self {
        Self {
            fields: Arc::new(fields),
        }
    }

    /// Create a page from a JSON value, which must be an object
    pub fn from_value(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(fields) => Ok(Self::new(fields)),
            other => Err(Error::invalid_page(format!(
                "expected an object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Get a field
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.fields.get(field)
    }

    /// Check whether a field is present
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// All fields of the page
    pub fn fields(&self) -> &JsonObject {
        &self.fields
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the page has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy the page into a standalone JSON value
    pub fn to_value(&self) -> JsonValue {
        JsonValue::Object((*self.fields).clone())
    }
}

impl From<JsonObject> for Page {
    fn from(fields: JsonObject) -> Self {
        Self::new(fields)
    }
}

impl TryFrom<JsonValue> for Page {
    type Error = Error;

    fn try_from(value: JsonValue) -> Result<Self> {
        Self::from_value(value)
    }
}

impl Serialize for Page {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

// ============================================================================
// Flow
// ============================================================================

/// What a page callback wants the traversal to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Keep fetching while the pagination contract allows it
    #[default]
    Continue,
    /// Stop after this page without treating it as a failure
    Stop,
}

impl Flow {
    /// Check if this is a stop signal
    pub fn is_stop(&self) -> bool {
        matches!(self, Self::Stop)
    }
}

impl From<()> for Flow {
    fn from((): ()) -> Self {
        Self::Continue
    }
}
