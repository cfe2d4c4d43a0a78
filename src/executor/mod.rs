//! Query executor seam and in-memory collection
//!
//! The paginator talks to storage through [`QueryExecutor`], which exposes
//! exactly two requests: count documents matching a filter, and find the
//! documents matching a filter shaped by sort, projection, skip and limit.
//! Both requests carry the same collation.
//!
//! [`MemoryCollection`] is the bundled implementation. It understands a
//! MongoDB-flavoured filter language:
//!
//! - `$eq`, `$ne`, `$gt`, `$gte`, `$lt`, `$lte`
//! - `$in`, `$nin` (regex operands allowed)
//! - `$exists`, `$regex` with `$options`
//! - `$and`, `$or`
//!
//! Field paths may be dotted to reach into nested objects.

mod collation;
mod contract;
mod errors;
mod filters;
mod memory;
mod projection;
mod sorter;

pub use collation::Collation;
pub use contract::{CountOptions, ExecutorFuture, FindOptions, QueryExecutor};
pub use errors::{ExecutorError, ExecutorResult};
pub use filters::{FilterExpr, FilterOp, Operand, Predicate};
pub use memory::MemoryCollection;
pub use projection::Projection;
pub use sorter::{ResultSorter, SortDirection, SortKey, SortSpec};
