//! Pagination types
//!
//! Defines the continuation decision produced for every page.

use crate::types::{JsonObject, JsonValue};

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq)]
pub enum NextPage {
    /// More pages available
    Continue {
        /// Parameters to merge over the base request parameters
        overlay: JsonObject,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with an overlay
    pub fn with_overlay(overlay: JsonObject) -> Self {
        Self::Continue { overlay }
    }

    /// Create a continuation with a single parameter
    pub fn with_param(key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        let mut overlay = JsonObject::new();
        overlay.insert(key.into(), value.into());
        Self::Continue { overlay }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }

    /// Overlay for the next request, `None` when done
    pub fn overlay(&self) -> Option<&JsonObject> {
        match self {
            Self::Continue { overlay } => Some(overlay),
            Self::Done => None,
        }
    }
}
