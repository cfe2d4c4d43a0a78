//! docpage - pagination over document queries
//!
//! Given a filter and pagination options, a [`Paginator`] counts the
//! matching documents, fetches one bounded page of them and reports where
//! that page sits in the full result set. Output field names follow a
//! caller-chosen [`CustomLabels`] scheme.
//!
//! Storage stays behind the [`QueryExecutor`] trait; [`MemoryCollection`]
//! is the bundled in-memory implementation.

pub mod cli;
pub mod executor;
pub mod labels;
pub mod observability;
pub mod options;
pub mod page;
pub mod paginator;

pub use executor::{ExecutorError, FindOptions, MemoryCollection, QueryExecutor};
pub use labels::{CustomLabels, LabeledPage};
pub use options::{PaginateOptions, PaginatorConfig};
pub use page::{PageField, PageMetadata, PageResult};
pub use paginator::{Paginate, Paginator};
