//! Paginator entry point
//!
//! One paginate call runs, in order:
//! 1. Merge call options over the paginator's default options
//! 2. Normalize them against the configuration
//! 3. Dispatch count and find concurrently
//! 4. Compute navigation metadata
//! 5. Apply custom labels
//!
//! Calls share no mutable state. Executor errors come back unchanged.

use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::debug;

use super::dispatcher::QueryDispatcher;
use crate::executor::QueryExecutor;
use crate::labels::{LabelMapper, LabeledPage};
use crate::options::{NormalizedOptions, OptionNormalizer, PaginateOptions, PaginatorConfig};
use crate::page::{PageMetadata, PageResult};

/// Paginates queries against a [`QueryExecutor`].
///
/// ```
/// use docpage::executor::MemoryCollection;
/// use docpage::options::PaginateOptions;
/// use docpage::paginator::Paginator;
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let books = MemoryCollection::from_documents(
///     (1..=25).map(|i| json!({"title": format!("Book #{}", i)})),
/// );
/// let paginator = Paginator::new(books);
///
/// let page = paginator
///     .paginate(&json!({}), PaginateOptions::new().page(2))
///     .await
///     .unwrap();
///
/// assert_eq!(page["totalDocs"], 25);
/// assert_eq!(page["nextPage"], 3);
/// # }
/// ```
#[derive(Debug)]
pub struct Paginator<E> {
    executor: Arc<E>,
    config: PaginatorConfig,
    defaults: PaginateOptions,
}

impl<E> Clone for Paginator<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            config: self.config.clone(),
            defaults: self.defaults.clone(),
        }
    }
}

impl<E: QueryExecutor> Paginator<E> {
    /// Creates a paginator with the default configuration
    pub fn new(executor: E) -> Self {
        Self::from_arc(Arc::new(executor))
    }

    /// Creates a paginator over a shared executor
    pub fn from_arc(executor: Arc<E>) -> Self {
        Self {
            executor,
            config: PaginatorConfig::default(),
            defaults: PaginateOptions::default(),
        }
    }

    /// Replaces the configuration
    pub fn with_config(mut self, config: PaginatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets options applied to every call; call options override them key by key
    pub fn with_default_options(mut self, defaults: PaginateOptions) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    /// Returns the canonical page, before labels are applied
    pub async fn page(
        &self,
        filter: &Value,
        options: PaginateOptions,
    ) -> Result<PageResult, E::Error> {
        let normalized = self.normalize(options);
        compute_page(self.executor.as_ref(), filter, &normalized).await
    }

    /// Returns the page with the call's custom labels applied
    pub async fn paginate(
        &self,
        filter: &Value,
        options: PaginateOptions,
    ) -> Result<LabeledPage, E::Error> {
        let normalized = self.normalize(options);
        let result = compute_page(self.executor.as_ref(), filter, &normalized).await?;
        Ok(LabelMapper::apply(result, &normalized.custom_labels))
    }

    fn normalize(&self, options: PaginateOptions) -> NormalizedOptions {
        let merged = options.merged_over(&self.defaults);
        OptionNormalizer::new(&self.config).normalize(merged)
    }
}

impl<E: QueryExecutor + 'static> Paginator<E> {
    /// Paginates in a background task and hands the outcome to `callback`.
    ///
    /// The callback runs exactly once, with the same result [`paginate`]
    /// would have returned. Await the handle to wait for it.
    ///
    /// Must be called within a tokio runtime.
    ///
    /// [`paginate`]: Self::paginate
    pub fn paginate_with_callback<F>(
        &self,
        filter: Value,
        options: PaginateOptions,
        callback: F,
    ) -> JoinHandle<()>
    where
        F: FnOnce(Result<LabeledPage, E::Error>) + Send + 'static,
    {
        let paginator = self.clone();
        tokio::spawn(async move {
            let outcome = paginator.paginate(&filter, options).await;
            callback(outcome);
        })
    }
}

/// Runs a normalized paginate request against `executor`
pub(crate) async fn compute_page<E: QueryExecutor + ?Sized>(
    executor: &E,
    filter: &Value,
    options: &NormalizedOptions,
) -> Result<PageResult, E::Error> {
    let (total_docs, mut docs) = QueryDispatcher::new(executor)
        .dispatch(filter, options)
        .await?;

    let meta = if !options.pagination {
        PageMetadata::single_page(total_docs, options.fetch_limit)
    } else if options.has_leading_offset() {
        PageMetadata::compute(total_docs, options.limit, options.page).with_leading_offset()
    } else {
        PageMetadata::compute(total_docs, options.limit, options.page)
    };

    if options.lean && options.lean_with_id {
        attach_string_ids(&mut docs);
    }

    debug!(
        total_docs = meta.total_docs,
        returned = docs.len(),
        page = meta.page,
        total_pages = ?meta.total_pages,
        "page computed"
    );

    Ok(PageResult::new(docs, meta))
}

/// Copies `_id` into a string `id` on documents that lack one
fn attach_string_ids(docs: &mut [Value]) {
    for doc in docs.iter_mut() {
        let Value::Object(map) = doc else {
            continue;
        };
        if map.contains_key("id") {
            continue;
        }
        let id = match map.get("_id") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Object(oid)) => match oid.get("$oid") {
                Some(Value::String(s)) => s.clone(),
                _ => continue,
            },
            Some(Value::Null) | None => continue,
            Some(other) => other.to_string(),
        };
        map.insert("id".to_string(), Value::String(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{ExecutorError, MemoryCollection};
    use crate::labels::CustomLabels;
    use crate::page::PageField;
    use serde_json::json;

    fn books(n: u64) -> MemoryCollection {
        MemoryCollection::from_documents(
            (1..=n).map(|i| json!({"title": format!("Book #{}", i), "price": i * 6})),
        )
    }

    #[tokio::test]
    async fn test_page_five_of_ten() {
        let paginator = Paginator::new(books(100));
        let options = PaginateOptions::new()
            .page(5)
            .limit(10)
            .sort(json!({"_id": 1}));

        let result = paginator.page(&json!({}), options).await.unwrap();

        assert_eq!(result.len(), 10);
        assert_eq!(result.docs[0]["title"], "Book #41");
        assert_eq!(result.meta, PageMetadata::compute(100, 10, 5));
    }

    #[tokio::test]
    async fn test_labels_applied() {
        let paginator = Paginator::new(books(20));
        let labels = CustomLabels::new()
            .rename(PageField::Docs, "items")
            .suppress(PageField::NextPage);

        let page = paginator
            .paginate(&json!({}), PaginateOptions::new().custom_labels(labels))
            .await
            .unwrap();

        assert_eq!(page["items"].as_array().map(Vec::len), Some(10));
        assert!(!page.contains_key("docs"));
        assert!(!page.contains_key("nextPage"));
        assert_eq!(page["hasNextPage"], true);
    }

    #[tokio::test]
    async fn test_default_options_merged_per_call() {
        let paginator = Paginator::new(books(30))
            .with_default_options(PaginateOptions::new().limit(5).sort(json!({"price": -1})));

        let first = paginator.page(&json!({}), PaginateOptions::new()).await.unwrap();
        assert_eq!(first.meta.limit, 5);
        assert_eq!(first.docs[0]["title"], "Book #30");

        let second = paginator
            .page(&json!({}), PaginateOptions::new().limit(2))
            .await
            .unwrap();
        assert_eq!(second.meta.limit, 2);

        let third = paginator.page(&json!({}), PaginateOptions::new()).await.unwrap();
        assert_eq!(third.meta.limit, 5);
    }

    #[tokio::test]
    async fn test_config_labels_fallback() {
        let config = PaginatorConfig::default()
            .with_custom_labels(CustomLabels::new().rename(PageField::TotalDocs, "count"));
        let paginator = Paginator::new(books(3)).with_config(config);

        let page = paginator
            .paginate(&json!({}), PaginateOptions::new())
            .await
            .unwrap();

        assert_eq!(page["count"], 3);
        assert!(!page.contains_key("totalDocs"));
    }

    #[tokio::test]
    async fn test_leading_offset() {
        let paginator = Paginator::new(books(30));
        let result = paginator
            .page(&json!({}), PaginateOptions::new().offset(3).limit(10))
            .await
            .unwrap();

        assert_eq!(result.docs[0]["title"], "Book #4");
        assert_eq!(result.meta.page, 1);
        assert!(result.meta.has_prev_page);
        assert_eq!(result.meta.prev_page, Some(1));
    }

    #[tokio::test]
    async fn test_offset_derives_page() {
        let paginator = Paginator::new(books(30));
        let result = paginator
            .page(&json!({}), PaginateOptions::new().offset(20).limit(10))
            .await
            .unwrap();

        assert_eq!(result.meta.page, 3);
        assert_eq!(result.meta.paging_counter, 21);
        assert_eq!(result.docs[0]["title"], "Book #21");
        assert!(!result.meta.has_next_page);
    }

    #[tokio::test]
    async fn test_unpaginated_cap() {
        let config = PaginatorConfig::default().with_unpaginated_cap(4);
        let paginator = Paginator::new(books(9)).with_config(config);

        let result = paginator
            .page(&json!({}), PaginateOptions::new().pagination(false))
            .await
            .unwrap();

        assert_eq!(result.len(), 4);
        assert_eq!(result.meta.total_docs, 9);
        assert_eq!(result.meta.limit, 4);
        assert_eq!(result.meta.total_pages, Some(3));
        assert!(result.meta.has_next_page);
        assert_eq!(result.meta.next_page, Some(2));
    }

    #[tokio::test]
    async fn test_lean_with_id() {
        let collection = books(2);
        collection.insert(json!({"_id": {"$oid": "65f0c0ffee"}, "title": "Oid"}));
        collection.insert(json!({"_id": "keep", "id": "mine", "title": "Has id"}));
        let paginator = Paginator::new(collection);

        let lean = PaginateOptions::new().lean(true).lean_with_id(true);
        let result = paginator.page(&json!({}), lean).await.unwrap();
        let ids: Vec<_> = result.docs.iter().map(|d| d["id"].clone()).collect();
        assert_eq!(ids, vec![json!("1"), json!("2"), json!("65f0c0ffee"), json!("mine")]);

        let not_lean = PaginateOptions::new().lean_with_id(true);
        let result = paginator.page(&json!({}), not_lean).await.unwrap();
        assert!(result.docs[0].get("id").is_none());
    }

    #[tokio::test]
    async fn test_callback_receives_result() {
        let paginator = Paginator::new(books(5));
        let (tx, rx) = tokio::sync::oneshot::channel();

        paginator
            .paginate_with_callback(json!({}), PaginateOptions::new().limit(2), move |outcome| {
                let _ = tx.send(outcome);
            })
            .await
            .unwrap();

        let page = rx.await.unwrap().unwrap();
        assert_eq!(page["totalPages"], 3);
    }

    #[tokio::test]
    async fn test_callback_receives_error() {
        let collection = books(5);
        collection.fail_with(ExecutorError::unavailable("offline"));
        let paginator = Paginator::new(collection);
        let (tx, rx) = tokio::sync::oneshot::channel();

        paginator
            .paginate_with_callback(json!({}), PaginateOptions::new(), move |outcome| {
                let _ = tx.send(outcome);
            })
            .await
            .unwrap();

        let err = rx.await.unwrap().unwrap_err();
        assert_eq!(err, ExecutorError::unavailable("offline"));
    }
}
