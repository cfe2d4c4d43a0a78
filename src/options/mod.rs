//! Pagination options and configuration
//!
//! Caller options arrive loosely typed and are resolved into a
//! [`NormalizedOptions`] against a [`PaginatorConfig`]. Invalid page, limit
//! or offset values are replaced by defaults, never reported as errors.

mod coerce;
mod config;
mod errors;
mod normalizer;
mod paginate_options;

pub use config::{PaginatorConfig, DEFAULT_LIMIT};
pub use errors::{ConfigError, ConfigResult};
pub use normalizer::{NormalizedOptions, OptionNormalizer};
pub use paginate_options::PaginateOptions;
