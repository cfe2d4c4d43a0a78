//! Result sorting
//!
//! Multi-key, stable, deterministic. Keys are compared in the order they
//! appear in the sort specification.

use serde_json::Value;

use super::collation::Collation;
use super::errors::{ExecutorError, ExecutorResult};
use super::filters::lookup;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn parse(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(1) => Some(SortDirection::Asc),
                Some(-1) => Some(SortDirection::Desc),
                _ => None,
            },
            Value::String(s) => match s.to_lowercase().as_str() {
                "asc" | "ascending" => Some(SortDirection::Asc),
                "desc" | "descending" => Some(SortDirection::Desc),
                _ => None,
            },
            _ => None,
        }
    }
}

/// One key of a sort specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Field path, dotted for nested fields
    pub field: String,
    pub direction: SortDirection,
}

/// Sort specification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self::default().then(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::default().then(field, SortDirection::Desc)
    }

    /// Appends a tie-breaking key
    pub fn then(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.keys.push(SortKey {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Parse a sort specification.
    ///
    /// Accepts `{field: 1 | -1 | "asc" | "desc"}` objects and
    /// space-separated strings such as `"price -date"`.
    pub fn parse(value: Option<&Value>) -> ExecutorResult<Self> {
        let mut spec = SortSpec::default();

        match value {
            None | Some(Value::Null) => {}
            Some(Value::Object(fields)) => {
                for (field, dir) in fields {
                    let direction = SortDirection::parse(dir).ok_or_else(|| {
                        ExecutorError::invalid_sort(format!(
                            "invalid direction {} for field '{}'",
                            dir, field
                        ))
                    })?;
                    spec = spec.then(field.as_str(), direction);
                }
            }
            Some(Value::String(s)) => {
                for part in s.split_whitespace() {
                    spec = match part.strip_prefix('-') {
                        Some("") => {
                            return Err(ExecutorError::invalid_sort("empty field name"));
                        }
                        Some(field) => spec.then(field, SortDirection::Desc),
                        None => spec.then(part.trim_start_matches('+'), SortDirection::Asc),
                    };
                }
            }
            Some(other) => {
                return Err(ExecutorError::invalid_sort(format!(
                    "sort must be an object or string, got {}",
                    other
                )))
            }
        }

        Ok(spec)
    }
}

/// Sorts result documents
pub struct ResultSorter;

impl ResultSorter {
    /// Sorts documents according to the sort specification.
    ///
    /// Sort is stable: documents equal on every key keep their input order.
    pub fn sort(documents: &mut [Value], spec: &SortSpec, collation: &Collation) {
        if spec.is_empty() {
            return;
        }

        documents.sort_by(|a, b| {
            for key in spec.keys() {
                let ordering = collation.compare(lookup(a, &key.field), lookup(b, &key.field));
                let ordering = match key.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                };
                if ordering.is_ne() {
                    return ordering;
                }
            }
            std::cmp::Ordering::Equal
        });
    }
}
