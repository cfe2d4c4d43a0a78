//! Query dispatch
//!
//! Issues the count and find requests of one paginate call concurrently and
//! waits for both. The first failure wins and is returned unchanged; the
//! other request's result is discarded.

use futures_util::future::try_join;
use serde_json::Value;
use tracing::debug;

use crate::executor::QueryExecutor;
use crate::options::NormalizedOptions;

/// Sends the count/find pair of a paginate call to an executor
pub struct QueryDispatcher<'a, E: ?Sized> {
    executor: &'a E,
}

impl<'a, E: QueryExecutor + ?Sized> QueryDispatcher<'a, E> {
    pub fn new(executor: &'a E) -> Self {
        Self { executor }
    }

    /// Returns `(total_docs, docs)`.
    ///
    /// The count sees the filter and collation, never skip or limit. With `use_estimated_count` it is the
    /// executor's collection-wide estimate instead.
    pub async fn dispatch(
        &self,
        filter: &Value,
        options: &NormalizedOptions,
    ) -> Result<(u64, Vec<Value>), E::Error> {
        let find_options = options.find_options();
        let count_options = options.count_options();

        debug!(
            skip = find_options.skip,
            limit = ?find_options.limit,
            estimated = options.use_estimated_count,
            "dispatching count and find"
        );

        let count = if options.use_estimated_count {
            self.executor.estimated_count()
        } else {
            self.executor.count(filter, &count_options)
        };
        let find = self.executor.find(filter, &find_options);

        try_join(count, find).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{ExecutorError, MemoryCollection};
    use crate::options::{OptionNormalizer, PaginateOptions, PaginatorConfig};
    use serde_json::json;

    fn books(n: u64) -> MemoryCollection {
        MemoryCollection::from_documents(
            (1..=n).map(|i| json!({"title": format!("Book #{}", i), "price": i * 6})),
        )
    }

    fn normalized(options: PaginateOptions) -> NormalizedOptions {
        OptionNormalizer::new(&PaginatorConfig::default()).normalize(options)
    }

    #[tokio::test]
    async fn test_count_ignores_skip_and_limit() {
        let collection = books(30);
        let options = normalized(PaginateOptions::new().page(2).limit(4));

        let (total, docs) = QueryDispatcher::new(&collection)
            .dispatch(&json!({}), &options)
            .await
            .unwrap();

        assert_eq!(total, 30);
        assert_eq!(docs.len(), 4);
        assert_eq!(docs[0]["title"], "Book #5");
    }

    #[tokio::test]
    async fn test_estimated_count_ignores_filter() {
        let collection = books(30);
        let filter = json!({"price": {"$lt": 30}});

        let exact = normalized(PaginateOptions::new());
        let (total, _) = QueryDispatcher::new(&collection)
            .dispatch(&filter, &exact)
            .await
            .unwrap();
        assert_eq!(total, 4);

        let estimated = normalized(PaginateOptions::new().use_estimated_count(true));
        let (total, docs) = QueryDispatcher::new(&collection)
            .dispatch(&filter, &estimated)
            .await
            .unwrap();
        assert_eq!(total, 30);
        assert_eq!(docs.len(), 4);
    }

    #[tokio::test]
    async fn test_failure_propagates_unchanged() {
        let collection = books(3);
        collection.fail_with(ExecutorError::unavailable("down"));

        let err = QueryDispatcher::new(&collection)
            .dispatch(&json!({}), &normalized(PaginateOptions::new()))
            .await
            .unwrap_err();

        assert_eq!(err, ExecutorError::unavailable("down"));
    }

    #[tokio::test]
    async fn test_find_error_surfaces() {
        let collection = books(3);
        let options = normalized(PaginateOptions::new().sort(json!({"price": 7})));

        let err = QueryDispatcher::new(&collection)
            .dispatch(&json!({}), &options)
            .await
            .unwrap_err();

        assert_eq!(err.code(), "DOCPAGE_EXECUTOR_INVALID_SORT");
    }

    #[tokio::test]
    async fn test_count_shares_find_collation() {
        let collection = books(100);
        let options = normalized(
            PaginateOptions::new().collation(json!({"locale": "en", "strength": 2})),
        );

        let (total, docs) = QueryDispatcher::new(&collection)
            .dispatch(&json!({"title": "book #1"}), &options)
            .await
            .unwrap();

        assert_eq!(total, 1);
        assert_eq!(docs.len(), 1);
    }
}
