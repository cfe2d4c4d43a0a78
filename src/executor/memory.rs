//! In-memory document collection
//!
//! Executes count/find requests against JSON documents held in memory.
//!
//! Execution flow (strict order):
//! 1. Refuse if the collection has been marked unavailable
//! 2. Parse filter, sort, projection and collation (fail on malformed input)
//! 3. Filter documents according to the filter
//! 4. Apply sort (if specified)
//! 5. Apply skip, then limit
//! 6. Apply projection
//!
//! A zero limit still runs steps 1-2, so malformed requests fail the same
//! way whatever the page size.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

use super::collation::Collation;
use super::contract::{CountOptions, ExecutorFuture, FindOptions, QueryExecutor};
use super::errors::{ExecutorError, ExecutorResult};
use super::filters::FilterExpr;
use super::projection::Projection;
use super::sorter::{ResultSorter, SortSpec};

/// A collection of JSON documents.
///
/// Cloning is cheap and clones share the same documents. Object documents
/// inserted without an `_id` receive a sequential integer one, starting at 1.
#[derive(Debug, Clone, Default)]
pub struct MemoryCollection {
    documents: Arc<RwLock<Vec<Value>>>,
    next_id: Arc<AtomicU64>,
    failure: Arc<RwLock<Option<ExecutorError>>>,
}

impl MemoryCollection {
    /// Creates an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection holding `documents`, in order
    pub fn from_documents(documents: impl IntoIterator<Item = Value>) -> Self {
        let collection = Self::new();
        collection.insert_many(documents);
        collection
    }

    /// Inserts a document
    pub fn insert(&self, document: Value) {
        let document = self.assign_id(document);
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(document);
    }

    /// Inserts documents, in order
    pub fn insert_many(&self, documents: impl IntoIterator<Item = Value>) {
        let documents: Vec<Value> = documents.into_iter().map(|d| self.assign_id(d)).collect();
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(documents);
    }

    /// Returns the number of stored documents
    pub fn len(&self) -> usize {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Makes every following request fail with `error`
    pub fn fail_with(&self, error: ExecutorError) {
        *self.failure.write().unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    /// Undoes [`fail_with`](Self::fail_with)
    pub fn recover(&self) {
        *self.failure.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Counts documents matching `filter` under the request's collation
    pub fn count_matching(&self, filter: &Value, options: &CountOptions) -> ExecutorResult<u64> {
        self.check_available()?;
        let expr = FilterExpr::parse(filter)?;
        let collation = Collation::parse(options.collation.as_ref())?;

        let documents = self.documents.read().unwrap_or_else(PoisonError::into_inner);
        Ok(documents
            .iter()
            .filter(|doc| expr.matches(doc, &collation))
            .count() as u64)
    }

    /// Returns the documents matching `filter`, shaped by `options`
    pub fn find_matching(&self, filter: &Value, options: &FindOptions) -> ExecutorResult<Vec<Value>> {
        // Steps 1-2
        self.check_available()?;
        let expr = FilterExpr::parse(filter)?;
        let sort = SortSpec::parse(options.sort.as_ref())?;
        let projection = Projection::parse(options.projection.as_ref())?;
        let collation = Collation::parse(options.collation.as_ref())?;

        if options.limit == Some(0) {
            return Ok(Vec::new());
        }

        // Step 3
        let mut candidates: Vec<Value> = {
            let documents = self.documents.read().unwrap_or_else(PoisonError::into_inner);
            documents
                .iter()
                .filter(|doc| expr.matches(doc, &collation))
                .cloned()
                .collect()
        };

        // Step 4
        ResultSorter::sort(&mut candidates, &sort, &collation);

        // Steps 5-6
        let skip = usize::try_from(options.skip).unwrap_or(usize::MAX);
        let limit = options
            .limit
            .map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));

        Ok(candidates
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|doc| projection.apply(doc))
            .collect())
    }

    fn check_available(&self) -> ExecutorResult<()> {
        match &*self.failure.read().unwrap_or_else(PoisonError::into_inner) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn assign_id(&self, document: Value) -> Value {
        match document {
            Value::Object(mut map) => {
                if !map.contains_key("_id") {
                    let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
                    map.insert("_id".to_string(), Value::from(id));
                }
                Value::Object(map)
            }
            other => other,
        }
    }
}

impl QueryExecutor for MemoryCollection {
    type Error = ExecutorError;

    fn count<'a>(
        &'a self,
        filter: &'a Value,
        options: &'a CountOptions,
    ) -> ExecutorFuture<'a, u64, ExecutorError> {
        Box::pin(async move { self.count_matching(filter, options) })
    }

    fn estimated_count(&self) -> ExecutorFuture<'_, u64, ExecutorError> {
        Box::pin(async move {
            self.check_available()?;
            Ok(self.len() as u64)
        })
    }

    fn find<'a>(
        &'a self,
        filter: &'a Value,
        options: &'a FindOptions,
    ) -> ExecutorFuture<'a, Vec<Value>, ExecutorError> {
        Box::pin(async move { self.find_matching(filter, options) })
    }
}
