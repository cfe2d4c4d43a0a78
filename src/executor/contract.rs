//! Query executor contract
//!
//! The paginator needs two capabilities from a document store: count the
//! documents matching a filter, and fetch a bounded, ordered, projected
//! slice of them. Filters, sorts, projections and collations are opaque
//! JSON here; only the executor interprets them.

use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use serde_json::{Map, Value};

/// Boxed future returned by executor operations
pub type ExecutorFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Parameters of a count request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CountOptions {
    /// Same collation as the paired find, so both see the same matches
    pub collation: Option<Value>,
}

/// Parameters of a find request
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FindOptions {
    pub sort: Option<Value>,
    pub projection: Option<Value>,
    pub collation: Option<Value>,
    /// Documents to skip before the first returned one
    pub skip: u64,
    /// Maximum documents to return, `None` for no bound
    pub limit: Option<u64>,
    /// Plain data instead of model instances
    pub lean: bool,
    /// Options the paginator does not interpret
    pub extra: Map<String, Value>,
}

/// A queryable document collection.
///
/// Both operations may fail; the paginator propagates `Error` unchanged.
pub trait QueryExecutor: Send + Sync {
    /// Error produced by this executor
    type Error: std::error::Error + Send + Sync + 'static;

    /// Count documents matching `filter`, ignoring any pagination
    fn count<'a>(
        &'a self,
        filter: &'a Value,
        options: &'a CountOptions,
    ) -> ExecutorFuture<'a, u64, Self::Error>;

    /// Collection-wide document count.
    ///
    /// Defaults to counting with an empty filter; stores with cheap
    /// metadata counts should override it.
    fn estimated_count(&self) -> ExecutorFuture<'_, u64, Self::Error> {
        Box::pin(async move {
            let everything = Value::Object(Map::new());
            self.count(&everything, &CountOptions::default()).await
        })
    }

    /// Fetch the documents matching `filter`, shaped by `options`
    fn find<'a>(
        &'a self,
        filter: &'a Value,
        options: &'a FindOptions,
    ) -> ExecutorFuture<'a, Vec<Value>, Self::Error>;
}
