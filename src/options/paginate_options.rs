//! Caller-facing pagination options
//!
//! Mirrors the option object of a document-store paginate call. Page, limit
//! and offset are kept as raw JSON so malformed input can be coerced to
//! defaults during normalization instead of failing deserialization.
//! Flags and custom labels of the wrong JSON type are ignored as if absent.
//! Keys the paginator does not interpret are collected in `extra` and
//! forwarded to the executor.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::labels::CustomLabels;

/// Options for a single paginate call.
///
/// ```
/// use docpage::options::PaginateOptions;
/// use serde_json::json;
///
/// let built = PaginateOptions::new()
///     .page(5)
///     .limit(10)
///     .sort(json!({"_id": 1}));
///
/// let parsed = PaginateOptions::from_value(json!({
///     "page": 5,
///     "limit": 10,
///     "sort": {"_id": 1}
/// }))
/// .unwrap();
///
/// assert_eq!(built, parsed);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Value>,
    /// Overrides the page-derived skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Value>,
    /// Projection; `projection` in `extra` is read as an alias
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub lean: Option<bool>,
    /// With `lean`, copy `_id` into a string `id` field
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub lean_with_id: Option<bool>,
    /// `false` returns every match as one page
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub pagination: Option<bool>,
    /// Count with the executor's collection-wide estimate
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub use_estimated_count: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_object")]
    pub custom_labels: Option<CustomLabels>,
    /// Executor passthrough options
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reads a value of the expected shape, or `None` for anything else
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_or_ignore(&value))
}

/// Like [`lenient`], but only objects qualify
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_object() {
        Ok(parse_or_ignore(&value))
    } else {
        if !value.is_null() {
            debug!(%value, "ignoring non-object option");
        }
        Ok(None)
    }
}

fn parse_or_ignore<T: DeserializeOwned>(value: &Value) -> Option<T> {
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            if !value.is_null() {
                debug!(%value, error = %e, "ignoring malformed option");
            }
            None
        }
    }
}

impl PaginateOptions {
    /// Empty options: every field defaulted
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON object
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(Value::from(page));
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(Value::from(limit));
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(Value::from(offset));
        self
    }

    pub fn sort(mut self, sort: Value) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn select(mut self, select: Value) -> Self {
        self.select = Some(select);
        self
    }

    pub fn collation(mut self, collation: Value) -> Self {
        self.collation = Some(collation);
        self
    }

    pub fn lean(mut self, lean: bool) -> Self {
        self.lean = Some(lean);
        self
    }

    pub fn lean_with_id(mut self, lean_with_id: bool) -> Self {
        self.lean_with_id = Some(lean_with_id);
        self
    }

    pub fn pagination(mut self, pagination: bool) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn use_estimated_count(mut self, estimated: bool) -> Self {
        self.use_estimated_count = Some(estimated);
        self
    }

    pub fn custom_labels(mut self, labels: CustomLabels) -> Self {
        self.custom_labels = Some(labels);
        self
    }

    /// Adds an executor passthrough option
    pub fn option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Layers these options over `defaults`, key by key.
    ///
    /// Keys set here win; `defaults` is left untouched.
    pub fn merged_over(self, defaults: &PaginateOptions) -> PaginateOptions {
        let mut extra = defaults.extra.clone();
        extra.extend(self.extra);

        PaginateOptions {
            page: self.page.or_else(|| defaults.page.clone()),
            limit: self.limit.or_else(|| defaults.limit.clone()),
            offset: self.offset.or_else(|| defaults.offset.clone()),
            sort: self.sort.or_else(|| defaults.sort.clone()),
            select: self.select.or_else(|| defaults.select.clone()),
            collation: self.collation.or_else(|| defaults.collation.clone()),
            lean: self.lean.or(defaults.lean),
            lean_with_id: self.lean_with_id.or(defaults.lean_with_id),
            pagination: self.pagination.or(defaults.pagination),
            use_estimated_count: self.use_estimated_count.or(defaults.use_estimated_count),
            custom_labels: self.custom_labels.or_else(|| defaults.custom_labels.clone()),
            extra,
        }
    }
}
