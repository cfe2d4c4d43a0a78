//! Field projection
//!
//! Inclusion keeps only the listed top-level fields plus `_id` (unless
//! `_id` is excluded explicitly). Exclusion drops the listed fields.
//! Mixing the two is only allowed for `_id`.

use serde_json::{Map, Value};

use super::errors::{ExecutorError, ExecutorResult};

const ID_FIELD: &str = "_id";

/// A parsed projection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Projection {
    /// Documents returned whole
    #[default]
    All,
    Include { fields: Vec<String>, keep_id: bool },
    Exclude(Vec<String>),
}

impl Projection {
    /// Parse `{field: 1|0|true|false}` objects or strings like `"title -_id"`.
    pub fn parse(value: Option<&Value>) -> ExecutorResult<Self> {
        let entries: Vec<(String, bool)> = match value {
            None | Some(Value::Null) => return Ok(Projection::All),
            Some(Value::Object(fields)) => fields
                .iter()
                .map(|(field, flag)| parse_flag(field, flag).map(|include| (field.clone(), include)))
                .collect::<ExecutorResult<_>>()?,
            Some(Value::String(s)) => s
                .split_whitespace()
                .map(|part| match part.strip_prefix('-') {
                    Some(field) => (field.to_string(), false),
                    None => (part.trim_start_matches('+').to_string(), true),
                })
                .collect(),
            Some(other) => {
                return Err(ExecutorError::invalid_projection(format!(
                    "projection must be an object or string, got {}",
                    other
                )))
            }
        };

        if entries.iter().any(|(field, _)| field.is_empty()) {
            return Err(ExecutorError::invalid_projection("empty field name"));
        }

        let keep_id = !entries.iter().any(|(f, include)| f == ID_FIELD && !include);
        let (included, excluded): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .filter(|(f, _)| f != ID_FIELD)
            .partition(|(_, include)| *include);

        match (included.is_empty(), excluded.is_empty()) {
            (true, true) if keep_id => Ok(Projection::All),
            (true, true) => Ok(Projection::Exclude(vec![ID_FIELD.to_string()])),
            (false, true) => Ok(Projection::Include {
                fields: included.into_iter().map(|(f, _)| f).collect(),
                keep_id,
            }),
            (true, false) => {
                let mut fields: Vec<String> = excluded.into_iter().map(|(f, _)| f).collect();
                if !keep_id {
                    fields.push(ID_FIELD.to_string());
                }
                Ok(Projection::Exclude(fields))
            }
            (false, false) => Err(ExecutorError::invalid_projection(
                "cannot mix inclusion and exclusion",
            )),
        }
    }

    /// Applies the projection to a document. Non-object documents pass
    /// through untouched.
    pub fn apply(&self, document: Value) -> Value {
        let Value::Object(map) = document else {
            return document;
        };

        match self {
            Projection::All => Value::Object(map),
            Projection::Include { fields, keep_id } => {
                let projected: Map<String, Value> = map
                    .into_iter()
                    .filter(|(k, _)| (*keep_id && k == ID_FIELD) || fields.contains(k))
                    .collect();
                Value::Object(projected)
            }
            Projection::Exclude(fields) => {
                let projected: Map<String, Value> =
                    map.into_iter().filter(|(k, _)| !fields.contains(k)).collect();
                Value::Object(projected)
            }
        }
    }
}

fn parse_flag(field: &str, flag: &Value) -> ExecutorResult<bool> {
    match flag {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(ExecutorError::invalid_projection(format!(
                "invalid flag {} for '{}'",
                n, field
            ))),
        },
        other => Err(ExecutorError::invalid_projection(format!(
            "invalid flag {} for '{}'",
            other, field
        ))),
    }
}
