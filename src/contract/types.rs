//! Contract types
//!
//! Raw definitions as written in configuration, and the canonical contract
//! the tracker works with.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Field List
// ============================================================================

/// A single field name or an ordered list of field names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldList {
    /// One field
    One(String),
    /// Several fields, paired by position
    Many(Vec<String>),
}

impl FieldList {
    /// Field names in order, skipping empty names
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(name) => {
                if name.is_empty() {
                    Vec::new()
                } else {
                    vec![name.clone()]
                }
            }
            Self::Many(names) => names.iter().filter(|n| !n.is_empty()).cloned().collect(),
        }
    }

    /// Check if the list names no field at all
    pub fn is_empty(&self) -> bool {
        self.to_vec().is_empty()
    }
}

impl From<&str> for FieldList {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl From<String> for FieldList {
    fn from(name: String) -> Self {
        Self::One(name)
    }
}

impl From<Vec<String>> for FieldList {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

impl From<Vec<&str>> for FieldList {
    fn from(names: Vec<&str>) -> Self {
        Self::Many(names.into_iter().map(String::from).collect())
    }
}

// ============================================================================
// Contract Definition
// ============================================================================

/// A partial pagination contract, as supplied by a caller or a registry.
///
/// `output_token` distinguishes an omitted key (`None`) from an explicit
/// `null` (`Some(None)`), which disables pagination outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDefinition {
    /// Request parameter(s) that receive the token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_token: Option<FieldList>,

    /// Response field(s) that carry the token
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub output_token: Option<Option<FieldList>>,

    /// Boolean response field that says whether more pages exist
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_results: Option<String>,
}

/// Maps a present key to `Some`, so that an explicit `null` becomes `Some(None)`
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ContractDefinition {
    /// Create an empty definition
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input token field(s)
    #[must_use]
    pub fn input_token(mut self, fields: impl Into<FieldList>) -> Self {
        self.input_token = Some(fields.into());
        self
    }

    /// Set the output token field(s)
    #[must_use]
    pub fn output_token(mut self, fields: impl Into<FieldList>) -> Self {
        self.output_token = Some(Some(fields.into()));
        self
    }

    /// Explicitly disable pagination
    #[must_use]
    pub fn no_output_token(mut self) -> Self {
        self.output_token = Some(None);
        self
    }

    /// Set the continuation flag field
    #[must_use]
    pub fn more_results(mut self, field: impl Into<String>) -> Self {
        self.more_results = Some(field.into());
        self
    }

    /// Check whether every key is specified, so no registry lookup is needed
    pub fn is_complete(&self) -> bool {
        self.input_token.is_some() && self.output_token.is_some() && self.more_results.is_some()
    }

    /// Overlay `self` on top of `defaults`, key by key
    #[must_use]
    pub fn merge(&self, defaults: &ContractDefinition) -> ContractDefinition {
        ContractDefinition {
            input_token: self
                .input_token
                .clone()
                .or_else(|| defaults.input_token.clone()),
            output_token: self
                .output_token
                .clone()
                .or_else(|| defaults.output_token.clone()),
            more_results: self
                .more_results
                .clone()
                .or_else(|| defaults.more_results.clone()),
        }
    }
}

// ============================================================================
// Canonical Contract
// ============================================================================

/// Input/output token fields paired by position.
///
/// Always holds at least one pair and equally long lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPairs {
    input_fields: Vec<String>,
    output_fields: Vec<String>,
}

impl TokenPairs {
    /// Pair input and output fields by position.
    ///
    /// Extra fields on the longer side are dropped. Returns `None` when no
    /// pair remains.
    pub fn new(input_fields: Vec<String>, output_fields: Vec<String>) -> Option<Self> {
        let len = input_fields.len().min(output_fields.len());
        if len == 0 {
            return None;
        }
        let mut input_fields = input_fields;
        let mut output_fields = output_fields;
        input_fields.truncate(len);
        output_fields.truncate(len);
        Some(Self {
            input_fields,
            output_fields,
        })
    }

    /// Request parameters written on the next call
    pub fn input_fields(&self) -> &[String] {
        &self.input_fields
    }

    /// Response fields read from a finished page
    pub fn output_fields(&self) -> &[String] {
        &self.output_fields
    }

    /// `(input, output)` pairs in order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.input_fields
            .iter()
            .map(String::as_str)
            .zip(self.output_fields.iter().map(String::as_str))
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.input_fields.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.input_fields.is_empty()
    }
}

/// Canonical pagination contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaginationContract {
    /// The operation is not paginated: exactly one page
    Disabled,

    /// Tokens are copied from each page into the next request
    Tokenized(TokenPairs),

    /// A boolean field gates continuation, optionally alongside tokens
    Flagged {
        /// Page field holding the continuation flag
        continue_field: String,
        /// Tokens carried forward when the flag allows it
        #[serde(skip_serializing_if = "Option::is_none")]
        tokens: Option<TokenPairs>,
    },
}

impl PaginationContract {
    /// Create a tokenized contract; `Disabled` when no pair can be formed
    pub fn tokenized(input: impl Into<FieldList>, output: impl Into<FieldList>) -> Self {
        match TokenPairs::new(input.into().to_vec(), output.into().to_vec()) {
            Some(tokens) => Self::Tokenized(tokens),
            None => Self::Disabled,
        }
    }

    /// Create a flag-only contract
    pub fn flagged(continue_field: impl Into<String>) -> Self {
        Self::Flagged {
            continue_field: continue_field.into(),
            tokens: None,
        }
    }

    /// Create a contract gated by a flag and carrying tokens
    pub fn flagged_with_tokens(
        continue_field: impl Into<String>,
        input: impl Into<FieldList>,
        output: impl Into<FieldList>,
    ) -> Self {
        Self::Flagged {
            continue_field: continue_field.into(),
            tokens: TokenPairs::new(input.into().to_vec(), output.into().to_vec()),
        }
    }

    /// Check if pagination is disabled
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// Token pairs, if any
    pub fn tokens(&self) -> Option<&TokenPairs> {
        match self {
            Self::Disabled => None,
            Self::Tokenized(tokens) => Some(tokens),
            Self::Flagged { tokens, .. } => tokens.as_ref(),
        }
    }

    /// Continuation flag field, if any
    pub fn continue_field(&self) -> Option<&str> {
        match self {
            Self::Flagged { continue_field, .. } => Some(continue_field),
            _ => None,
        }
    }
}
