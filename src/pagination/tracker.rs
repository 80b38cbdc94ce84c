//! Token tracker
//!
//! Applies the continuation policy of a [`PaginationContract`] to each page.

use super::types::NextPage;
use crate::contract::{PaginationContract, TokenPairs};
use crate::query::lookup;
use crate::types::{JsonObject, JsonValue, Page};
use tracing::debug;

/// Decides, page by page, whether to continue and which tokens to send next.
///
/// The tracked token state always mirrors the most recent page: a token field
/// missing from that page is not sent on the next request.
#[derive(Debug, Clone)]
pub struct TokenTracker {
    contract: PaginationContract,
    state: JsonObject,
}

impl TokenTracker {
    /// Create a tracker for a contract
    pub fn new(contract: PaginationContract) -> Self {
        Self {
            contract,
            state: JsonObject::new(),
        }
    }

    /// The contract being applied
    pub fn contract(&self) -> &PaginationContract {
        &self.contract
    }

    /// Tokens to overlay on the next request
    pub fn tokens(&self) -> &JsonObject {
        &self.state
    }

    /// Current value tracked for an input field
    pub fn token(&self, input_field: &str) -> Option<&JsonValue> {
        self.state.get(input_field)
    }

    /// Observe a freshly fetched page and decide what comes next
    pub fn observe(&mut self, page: &Page) -> NextPage {
        let next = match &self.contract {
            PaginationContract::Disabled => NextPage::Done,
            PaginationContract::Tokenized(tokens) => carry_tokens(tokens, page),
            PaginationContract::Flagged {
                continue_field,
                tokens,
            } => {
                // An explicit stop wins; otherwise tokens have the final say
                match (read_flag(page, continue_field), tokens) {
                    (Some(false), _) => NextPage::Done,
                    (_, Some(tokens)) => carry_tokens(tokens, page),
                    (Some(true), None) => NextPage::with_overlay(JsonObject::new()),
                    (None, None) => NextPage::Done,
                }
            }
        };

        self.state = match &next {
            NextPage::Continue { overlay } => overlay.clone(),
            NextPage::Done => JsonObject::new(),
        };
        debug!(
            done = next.is_done(),
            tokens = self.state.len(),
            "Observed page"
        );
        next
    }
}

/// Copy every present output field into its input field.
///
/// Output fields may be simple paths such as `Contents[-1].Key`.
fn carry_tokens(tokens: &TokenPairs, page: &Page) -> NextPage {
    let overlay: JsonObject = tokens
        .pairs()
        .filter_map(|(input, output)| {
            lookup(page, output)
                .filter(|value| is_present(value))
                .map(|value| (input.to_string(), value.clone()))
        })
        .collect();

    if overlay.is_empty() {
        NextPage::Done
    } else {
        NextPage::with_overlay(overlay)
    }
}

fn read_flag(page: &Page, field: &str) -> Option<bool> {
    lookup(page, field)
        .filter(|value| !value.is_null())
        .map(is_truthy)
}

/// A token counts as present unless it is null or an empty string
fn is_present(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::String(s) => !s.is_empty(),
        _ => true,
    }
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false")),
        JsonValue::Array(items) => !items.is_empty(),
        JsonValue::Object(fields) => !fields.is_empty(),
    }
}
