//! Contract resolution
//!
//! Turns a caller's partial definition plus the registry default into a
//! canonical [`PaginationContract`]. Malformed definitions are not rejected:
//! they resolve to whatever pairs can be formed and are logged.

use super::registry::ContractRegistry;
use super::types::{ContractDefinition, FieldList, PaginationContract, TokenPairs};
use tracing::{debug, warn};

impl ContractDefinition {
    /// Normalize this definition into a canonical contract
    pub fn resolve(&self) -> PaginationContract {
        let outputs = match &self.output_token {
            // Explicit null or empty output token turns pagination off
            Some(None) => return PaginationContract::Disabled,
            Some(Some(list)) if list.is_empty() => return PaginationContract::Disabled,
            Some(Some(list)) => list.to_vec(),
            None => Vec::new(),
        };
        let inputs = self
            .input_token
            .as_ref()
            .map(FieldList::to_vec)
            .unwrap_or_default();

        if inputs.len() != outputs.len() && !outputs.is_empty() {
            warn!(
                input_token = ?inputs,
                output_token = ?outputs,
                "Token field lists differ in length; unmatched fields are ignored"
            );
        }

        let tokens = TokenPairs::new(inputs, outputs);
        let flag = self.more_results.as_deref().filter(|f| !f.is_empty());

        match (flag, tokens) {
            (Some(field), tokens) => PaginationContract::Flagged {
                continue_field: field.to_string(),
                tokens,
            },
            (None, Some(tokens)) => PaginationContract::Tokenized(tokens),
            (None, None) => PaginationContract::Disabled,
        }
    }
}

/// Resolve the contract for an operation.
///
/// The registry is consulted only when `overrides` leaves at least one key
/// unspecified; caller keys win over registry keys.
pub fn resolve_contract<R>(
    operation: &str,
    overrides: &ContractDefinition,
    registry: &R,
) -> PaginationContract
where
    R: ContractRegistry + ?Sized,
{
    let merged = if overrides.is_complete() {
        overrides.clone()
    } else {
        match registry.lookup(operation) {
            Some(defaults) => overrides.merge(&defaults),
            None => overrides.clone(),
        }
    };

    let contract = merged.resolve();
    debug!(operation, ?contract, "Resolved pagination contract");
    contract
}
