//! Option normalization
//!
//! Turns partial, possibly malformed caller options into a fully defined
//! request. Bad pagination input never fails: it is replaced by a default
//! and the replacement is logged at debug level.
//!
//! Resolution order:
//! 1. limit: coerced, else `default_limit`; clamped to `max_limit`
//! 2. page: coerced and >= 1, else 1
//! 3. offset: coerced, else absent
//! 4. skip: offset when present, else `(page - 1) * limit`
//! 5. pagination disabled: page 1, skip 0, fetch bounded only by
//!    `unpaginated_cap`

use serde_json::{Map, Value};
use tracing::debug;

use super::coerce::coerce_u64;
use super::config::PaginatorConfig;
use super::paginate_options::PaginateOptions;
use crate::executor::{CountOptions, FindOptions};
use crate::labels::CustomLabels;

const PROJECTION_ALIAS: &str = "projection";

/// Fully resolved options for one paginate call
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedOptions {
    /// Page reported in the result, always >= 1
    pub page: u64,
    /// Page size; 0 fetches nothing but still counts
    pub limit: u64,
    /// Documents skipped by the fetch
    pub skip: u64,
    /// Caller-supplied offset, if valid
    pub offset: Option<u64>,
    /// Bound passed to the executor, `None` for unbounded
    pub fetch_limit: Option<u64>,
    pub pagination: bool,
    pub sort: Option<Value>,
    pub select: Option<Value>,
    pub collation: Option<Value>,
    pub lean: bool,
    pub lean_with_id: bool,
    pub use_estimated_count: bool,
    pub custom_labels: CustomLabels,
    pub extra: Map<String, Value>,
}

impl NormalizedOptions {
    /// Builds the executor's find request
    pub fn find_options(&self) -> FindOptions {
        FindOptions {
            sort: self.sort.clone(),
            projection: self.select.clone(),
            collation: self.collation.clone(),
            skip: self.skip,
            limit: self.fetch_limit,
            lean: self.lean,
            extra: self.extra.clone(),
        }
    }

    /// Builds the count request; it shares the find's collation
    pub fn count_options(&self) -> CountOptions {
        CountOptions {
            collation: self.collation.clone(),
        }
    }

    /// Returns true if an offset starts the fetch partway into the results
    pub fn has_leading_offset(&self) -> bool {
        self.pagination && self.offset.is_some_and(|offset| offset > 0)
    }
}

/// Resolves caller options against a paginator configuration
pub struct OptionNormalizer<'a> {
    config: &'a PaginatorConfig,
}

impl<'a> OptionNormalizer<'a> {
    /// Creates a normalizer for `config`
    pub fn new(config: &'a PaginatorConfig) -> Self {
        Self { config }
    }

    /// Normalizes `options`. Never fails.
    pub fn normalize(&self, options: PaginateOptions) -> NormalizedOptions {
        let PaginateOptions {
            page: raw_page,
            limit: raw_limit,
            offset: raw_offset,
            sort,
            select,
            collation,
            lean,
            lean_with_id,
            pagination,
            use_estimated_count,
            custom_labels,
            mut extra,
        } = options;

        let limit = self.resolve_limit(raw_limit.as_ref());
        let requested_page = resolve_page(raw_page.as_ref());
        let offset = resolve_offset(raw_offset.as_ref());
        let pagination = pagination.unwrap_or(true);

        let (page, skip, fetch_limit) = if !pagination {
            (1, 0, self.config.unpaginated_cap)
        } else if let Some(offset) = offset {
            let page = requested_page.unwrap_or_else(|| page_of_offset(offset, limit));
            (page, offset, Some(limit))
        } else {
            let page = requested_page.unwrap_or(1);
            let skip = (page - 1).saturating_mul(limit);
            (page, skip, Some(limit))
        };

        let alias = extra.remove(PROJECTION_ALIAS);
        let select = match (select, alias) {
            (Some(select), _) => Some(select),
            (None, alias) => alias,
        };

        let normalized = NormalizedOptions {
            page,
            limit,
            skip,
            offset,
            fetch_limit,
            pagination,
            sort,
            select,
            collation,
            lean: lean.unwrap_or(false),
            lean_with_id: lean_with_id.unwrap_or(false),
            use_estimated_count: use_estimated_count.unwrap_or(false),
            custom_labels: custom_labels.unwrap_or_else(|| self.config.custom_labels.clone()),
            extra,
        };

        debug!(
            page = normalized.page,
            limit = normalized.limit,
            skip = normalized.skip,
            pagination = normalized.pagination,
            "normalized pagination options"
        );

        normalized
    }

    fn resolve_limit(&self, raw: Option<&Value>) -> u64 {
        let default = self.config.default_limit;
        let limit = match raw {
            None | Some(Value::Null) => default,
            Some(value) => coerce_u64(value).unwrap_or_else(|| {
                debug!(input = %value, default, "invalid limit replaced by default");
                default
            }),
        };

        match self.config.max_limit {
            Some(max) if limit > max => {
                debug!(limit, max, "limit clamped to maximum");
                max
            }
            _ => limit,
        }
    }
}

fn resolve_page(raw: Option<&Value>) -> Option<u64> {
    let value = match raw {
        None | Some(Value::Null) => return None,
        Some(value) => value,
    };

    let page = coerce_u64(value).filter(|page| *page >= 1);
    if page.is_none() {
        debug!(input = %value, "invalid page replaced by 1");
    }
    page
}

fn resolve_offset(raw: Option<&Value>) -> Option<u64> {
    let value = match raw {
        None | Some(Value::Null) => return None,
        Some(value) => value,
    };

    let offset = coerce_u64(value);
    if offset.is_none() {
        debug!(input = %value, "invalid offset ignored");
    }
    offset
}

fn page_of_offset(offset: u64, limit: u64) -> u64 {
    if limit == 0 {
        1
    } else {
        (offset / limit).saturating_add(1)
    }
}
