//! `paginate` on any executor

use serde_json::Value;

use super::paginator::compute_page;
use crate::executor::{ExecutorFuture, QueryExecutor};
use crate::labels::{LabelMapper, LabeledPage};
use crate::options::{OptionNormalizer, PaginateOptions, PaginatorConfig};

/// Adds `paginate` to every [`QueryExecutor`], using the default
/// configuration. Build a [`Paginator`](super::Paginator) for custom
/// configuration or default options.
pub trait Paginate: QueryExecutor {
    fn paginate<'a>(
        &'a self,
        filter: &'a Value,
        options: PaginateOptions,
    ) -> ExecutorFuture<'a, LabeledPage, Self::Error> {
        Box::pin(async move {
            let config = PaginatorConfig::default();
            let normalized = OptionNormalizer::new(&config).normalize(options);
            let result = compute_page(self, filter, &normalized).await?;
            Ok(LabelMapper::apply(result, &normalized.custom_labels))
        })
    }
}

impl<E: QueryExecutor + ?Sized> Paginate for E {}
