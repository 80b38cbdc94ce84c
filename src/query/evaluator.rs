//! Query evaluators

use crate::error::{Error, Result};
use crate::types::{JsonValue, Page};

/// Evaluates a query against a single page.
///
/// Returns `None` when nothing matches. A returned array is flattened by the
/// search operators, any other value is yielded as one item.
pub trait QueryEvaluator: Send + Sync {
    /// Evaluate `query` against `page`
    fn evaluate(&self, query: &str, page: &Page) -> Result<Option<JsonValue>>;
}

// ============================================================================
// JSONPath Evaluator
// ============================================================================

/// JSONPath evaluator.
///
/// Simple paths such as `Items`, `$.data.items`, `TableNames[0]` or
/// `Contents[-1].Key` resolve to the value at that location. Anything else
/// (wildcards, filters, slices, recursive descent) is handed to
/// `jsonpath-rust` and resolves to the list of matches. `null` counts as no
/// match.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPathEvaluator;

impl QueryEvaluator for JsonPathEvaluator {
    fn evaluate(&self, query: &str, page: &Page) -> Result<Option<JsonValue>> {
        if let Some(segments) = parse_simple_path(query) {
            let found = if segments.is_empty() {
                Some(page.to_value())
            } else {
                lookup(page, query).cloned()
            };
            return Ok(found.filter(|value| !value.is_null()));
        }

        let root = page.to_value();
        let matches: Vec<JsonValue> = extract_with_jsonpath(&root, query)?
            .into_iter()
            .filter(|value| !value.is_null())
            .collect();
        if matches.is_empty() {
            Ok(None)
        } else {
            Ok(Some(JsonValue::Array(matches)))
        }
    }
}

// ============================================================================
// Closure Evaluator
// ============================================================================

/// Evaluator backed by a closure
pub struct FnEvaluator<F>(F);

/// Wrap a closure as a [`QueryEvaluator`]
pub fn evaluator_fn<F>(f: F) -> FnEvaluator<F>
where
    F: Fn(&str, &Page) -> Result<Option<JsonValue>> + Send + Sync,
{
    FnEvaluator(f)
}

impl<F> QueryEvaluator for FnEvaluator<F>
where
    F: Fn(&str, &Page) -> Result<Option<JsonValue>> + Send + Sync,
{
    fn evaluate(&self, query: &str, page: &Page) -> Result<Option<JsonValue>> {
        (self.0)(query, page)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Field(&'a str),
    Index(i64),
}

/// Parse a dot-notation path with optional integer indexes.
///
/// Returns `None` when the path needs a full JSONPath engine.
fn parse_simple_path(path: &str) -> Option<Vec<Segment<'_>>> {
    let path = path.trim();
    let path = match path.strip_prefix('$') {
        Some(rest) => rest.strip_prefix('.').unwrap_or(rest),
        None => path,
    };
    if path.is_empty() {
        return Some(Vec::new());
    }

    let mut segments = Vec::new();
    for part in path.split('.') {
        let (name, mut rest) = match part.find('[') {
            Some(pos) => (&part[..pos], &part[pos..]),
            None => (part, ""),
        };
        if !name.is_empty() {
            if !name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
                return None;
            }
            segments.push(Segment::Field(name));
        } else if rest.is_empty() {
            // Empty segment, e.g. recursive descent `..`
            return None;
        }

        while !rest.is_empty() {
            let close = rest.find(']')?;
            let index = rest[1..close].trim().parse::<i64>().ok()?;
            segments.push(Segment::Index(index));
            rest = &rest[close + 1..];
            if !rest.is_empty() && !rest.starts_with('[') {
                return None;
            }
        }
    }

    Some(segments)
}

/// Resolve a field name or simple path (`a.b`, `Contents[-1].Key`) on a page.
///
/// A top-level field whose name matches `path` exactly wins over path
/// navigation. Anything beyond dotted fields and integer indexes resolves to
/// `None`.
pub fn lookup<'p>(page: &'p Page, path: &str) -> Option<&'p JsonValue> {
    if let Some(value) = page.get(path) {
        return Some(value);
    }
    let segments = parse_simple_path(path)?;
    let (Segment::Field(name), rest) = segments.split_first()? else {
        return None;
    };
    walk(page.get(name)?, rest)
}

fn walk<'v>(value: &'v JsonValue, segments: &[Segment<'_>]) -> Option<&'v JsonValue> {
    let mut current = value;
    for segment in segments {
        current = match segment {
            Segment::Field(name) => current.as_object()?.get(*name)?,
            Segment::Index(index) => {
                let arr = current.as_array()?;
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_possible_wrap
                )]
                let idx = if *index < 0 {
                    let from_end = arr.len() as i64 + index;
                    if from_end < 0 {
                        return None;
                    }
                    from_end as usize
                } else {
                    *index as usize
                };
                arr.get(idx)?
            }
        };
    }
    Some(current)
}

/// Extract matches using jsonpath-rust
fn extract_with_jsonpath(value: &JsonValue, path: &str) -> Result<Vec<JsonValue>> {
    use jsonpath_rust::JsonPath;

    let normalized = if path.starts_with('$') {
        path.to_string()
    } else {
        format!("$.{path}")
    };

    let jp = JsonPath::try_from(normalized.as_str())
        .map_err(|e| Error::evaluator(path, format!("Invalid JSONPath: {e}")))?;

    let result = jp.find(value);

    match result {
        JsonValue::Array(arr) => Ok(arr),
        JsonValue::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}
