//! Filter documents for query execution
//!
//! Filters use the document-store query shape:
//!
//! - `{field: value}` equality
//! - `{field: {$op: arg, ...}}` with `$eq $ne $gt $gte $lt $lte $in $nin
//!   $exists $regex` (`$options: "i"` for case-insensitive regexes)
//! - top-level `$and` / `$or` arrays of sub-filters
//!
//! Dotted field paths reach into nested objects and array indexes. Range
//! operators only compare numbers with numbers and strings with strings.
//! Equality against an array field matches if any element matches.

use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};

use super::collation::Collation;
use super::errors::{ExecutorError, ExecutorResult};

/// Filter operation types
#[derive(Debug, Clone)]
pub enum FilterOp {
    Eq(Value),
    Ne(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    In(Vec<Operand>),
    Nin(Vec<Operand>),
    Exists(bool),
    Regex(Regex),
}

/// A member of an `$in` / `$nin` list
#[derive(Debug, Clone)]
pub enum Operand {
    Value(Value),
    Pattern(Regex),
}

/// A single predicate (field path + operation)
#[derive(Debug, Clone)]
pub struct Predicate {
    pub field: String,
    pub op: FilterOp,
}

/// A parsed filter document
#[derive(Debug, Clone)]
pub enum FilterExpr {
    /// Every sub-expression must match; empty matches everything
    All(Vec<FilterExpr>),
    /// At least one sub-expression must match
    Any(Vec<FilterExpr>),
    Predicate(Predicate),
}

impl FilterExpr {
    /// Parse a filter document.
    ///
    /// An empty object matches every document.
    pub fn parse(filter: &Value) -> ExecutorResult<Self> {
        let clauses = filter.as_object().ok_or_else(|| {
            ExecutorError::invalid_filter(format!("filter must be an object, got {}", filter))
        })?;

        let mut all = Vec::with_capacity(clauses.len());

        for (key, condition) in clauses {
            match key.as_str() {
                "$and" | "$or" => {
                    let subs = condition
                        .as_array()
                        .filter(|subs| !subs.is_empty())
                        .ok_or_else(|| {
                            ExecutorError::invalid_filter(format!(
                                "{} requires a non-empty array",
                                key
                            ))
                        })?
                        .iter()
                        .map(Self::parse)
                        .collect::<ExecutorResult<Vec<_>>>()?;

                    all.push(if key == "$and" {
                        FilterExpr::All(subs)
                    } else {
                        FilterExpr::Any(subs)
                    });
                }
                op if op.starts_with('$') => {
                    return Err(ExecutorError::invalid_filter(format!(
                        "unknown top-level operator {}",
                        op
                    )));
                }
                field => all.extend(parse_condition(field, condition)?),
            }
        }

        Ok(FilterExpr::All(all))
    }

    /// Checks if a document matches this filter
    pub fn matches(&self, document: &Value, collation: &Collation) -> bool {
        match self {
            FilterExpr::All(subs) => subs.iter().all(|s| s.matches(document, collation)),
            FilterExpr::Any(subs) => subs.iter().any(|s| s.matches(document, collation)),
            FilterExpr::Predicate(pred) => matches_predicate(document, pred, collation),
        }
    }
}

/// Resolves a dotted path inside a document
pub(crate) fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(document, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn parse_condition(field: &str, condition: &Value) -> ExecutorResult<Vec<FilterExpr>> {
    let ops = match condition {
        Value::Object(ops) if ops.keys().any(|k| k.starts_with('$')) => ops,
        _ => {
            return Ok(vec![predicate(field, FilterOp::Eq(condition.clone()))]);
        }
    };

    let case_insensitive = regex_options(ops)?;
    let mut predicates = Vec::with_capacity(ops.len());

    for (op, arg) in ops {
        let op = match op.as_str() {
            "$eq" => FilterOp::Eq(arg.clone()),
            "$ne" => FilterOp::Ne(arg.clone()),
            "$gt" => FilterOp::Gt(arg.clone()),
            "$gte" => FilterOp::Gte(arg.clone()),
            "$lt" => FilterOp::Lt(arg.clone()),
            "$lte" => FilterOp::Lte(arg.clone()),
            "$in" => FilterOp::In(parse_operands(field, arg)?),
            "$nin" => FilterOp::Nin(parse_operands(field, arg)?),
            "$exists" => FilterOp::Exists(arg.as_bool().ok_or_else(|| {
                ExecutorError::invalid_filter(format!("$exists on '{}' requires a boolean", field))
            })?),
            "$regex" => FilterOp::Regex(compile_regex(field, arg, case_insensitive)?),
            "$options" => continue,
            other => {
                return Err(ExecutorError::invalid_filter(format!(
                    "unknown operator {} on '{}'",
                    other, field
                )));
            }
        };
        predicates.push(predicate(field, op));
    }

    Ok(predicates)
}

fn predicate(field: &str, op: FilterOp) -> FilterExpr {
    FilterExpr::Predicate(Predicate {
        field: field.to_string(),
        op,
    })
}

/// Reads `$options`, returning whether the `i` flag is set
fn regex_options(ops: &Map<String, Value>) -> ExecutorResult<bool> {
    match ops.get("$options") {
        None => Ok(false),
        Some(Value::String(flags)) => Ok(flags.contains('i')),
        Some(other) => Err(ExecutorError::invalid_filter(format!(
            "$options must be a string, got {}",
            other
        ))),
    }
}

fn compile_regex(field: &str, pattern: &Value, case_insensitive: bool) -> ExecutorResult<Regex> {
    let pattern = pattern.as_str().ok_or_else(|| {
        ExecutorError::invalid_filter(format!("$regex on '{}' requires a string", field))
    })?;

    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| ExecutorError::invalid_filter(format!("bad regex on '{}': {}", field, e)))
}

fn parse_operands(field: &str, arg: &Value) -> ExecutorResult<Vec<Operand>> {
    let items = arg.as_array().ok_or_else(|| {
        ExecutorError::invalid_filter(format!("$in/$nin on '{}' requires an array", field))
    })?;

    items
        .iter()
        .map(|item| match item {
            Value::Object(obj) if obj.contains_key("$regex") => {
                let case_insensitive = regex_options(obj)?;
                let pattern = obj.get("$regex").unwrap_or(&Value::Null);
                Ok(Operand::Pattern(compile_regex(field, pattern, case_insensitive)?))
            }
            other => Ok(Operand::Value(other.clone())),
        })
        .collect()
}

fn matches_predicate(document: &Value, predicate: &Predicate, collation: &Collation) -> bool {
    let field_value = lookup(document, &predicate.field);

    match &predicate.op {
        FilterOp::Exists(expected) => field_value.is_some() == *expected,
        FilterOp::Ne(expected) => !field_value.is_some_and(|v| eq_match(v, expected, collation)),
        FilterOp::Nin(operands) => {
            !field_value.is_some_and(|v| any_element(v, |e| in_match(e, operands, collation)))
        }
        op => {
            // Missing field = no match for every other operator
            let Some(actual) = field_value else {
                return false;
            };
            match op {
                FilterOp::Eq(expected) => eq_match(actual, expected, collation),
                FilterOp::Gt(bound) => range_match(actual, bound, collation, |o| o.is_gt()),
                FilterOp::Gte(bound) => range_match(actual, bound, collation, |o| o.is_ge()),
                FilterOp::Lt(bound) => range_match(actual, bound, collation, |o| o.is_lt()),
                FilterOp::Lte(bound) => range_match(actual, bound, collation, |o| o.is_le()),
                FilterOp::In(operands) => any_element(actual, |e| in_match(e, operands, collation)),
                FilterOp::Regex(re) => any_element(actual, |e| e.as_str().is_some_and(|s| re.is_match(s))),
                FilterOp::Exists(_) | FilterOp::Ne(_) | FilterOp::Nin(_) => false,
            }
        }
    }
}

/// Applies `check` to the value, or to each element of an array value
fn any_element(value: &Value, check: impl Fn(&Value) -> bool) -> bool {
    check(value) || value.as_array().is_some_and(|items| items.iter().any(&check))
}

fn eq_match(actual: &Value, expected: &Value, collation: &Collation) -> bool {
    any_element(actual, |e| collation.values_equal(e, expected))
}

fn in_match(actual: &Value, operands: &[Operand], collation: &Collation) -> bool {
    operands.iter().any(|operand| match operand {
        Operand::Value(expected) => collation.values_equal(actual, expected),
        Operand::Pattern(re) => actual.as_str().is_some_and(|s| re.is_match(s)),
    })
}

fn range_match(
    actual: &Value,
    bound: &Value,
    collation: &Collation,
    accept: impl Fn(std::cmp::Ordering) -> bool,
) -> bool {
    any_element(actual, |e| match (e, bound) {
        (Value::Number(_), Value::Number(_)) | (Value::String(_), Value::String(_)) => {
            accept(collation.compare(Some(e), Some(bound)))
        }
        _ => false,
    })
}
