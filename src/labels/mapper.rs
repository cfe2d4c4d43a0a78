//! Label mapping
//!
//! A single rename pass over the canonical `(field, value)` pairs:
//!
//! 1. Suppressed fields are dropped; no key is written for them.
//! 2. Renamed fields are written under their new key.
//! 3. With a meta label, every metadata field that survives step 1 goes into
//!    a nested object under that label. `docs` always stays top-level and
//!    keeps its key if the meta label names the same one.
//!
//! Keys are written in canonical order. When two fields map to the same key
//! the later field's value wins and the key keeps its first position.

use serde_json::{Map, Value};
use tracing::trace;

use super::custom_labels::CustomLabels;
use super::labeled_page::LabeledPage;
use crate::page::PageResult;

/// Applies a label scheme to a canonical page result
pub struct LabelMapper;

impl LabelMapper {
    /// Produces the labelled output for `result`.
    ///
    /// `labels` is only read; nothing carries over to later calls.
    pub fn apply(result: PageResult, labels: &CustomLabels) -> LabeledPage {
        let meta_key = labels.meta_key();
        let mut output = Map::new();
        let mut meta = Map::new();

        for (field, value) in result.into_fields() {
            let key = match labels.output_key(field) {
                Some(key) => key.to_string(),
                None => {
                    trace!(field = field.as_str(), "label suppressed");
                    continue;
                }
            };

            if meta_key.is_some() && field.is_meta() {
                meta.insert(key, value);
            } else {
                output.insert(key, value);
            }
        }

        if let Some(meta_key) = meta_key {
            if output.contains_key(meta_key) {
                trace!(key = meta_key, "meta label collides with docs, metadata dropped");
            } else {
                output.insert(meta_key.to_string(), Value::Object(meta));
            }
        }

        LabeledPage::new(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{PageField, PageMetadata};
    use serde_json::json;

    fn book_page() -> PageResult {
        let docs = (41..=50).map(|i| json!({"title": format!("Book #{}", i)})).collect();
        PageResult::new(docs, PageMetadata::compute(100, 10, 5))
    }

    #[test]
    fn test_identity_yields_canonical_keys() {
        let page = LabelMapper::apply(book_page(), &CustomLabels::new());

        let keys: Vec<_> = page.keys().collect();
        let canonical: Vec<_> = PageField::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(keys, canonical);
        assert_eq!(page["pagingCounter"], 41);
    }

    #[test]
    fn test_full_rename() {
        let labels: CustomLabels = serde_json::from_value(json!({
            "totalDocs": "itemCount",
            "docs": "itemsList",
            "limit": "perPage",
            "page": "currentPage",
            "nextPage": "next",
            "prevPage": "prev",
            "totalPages": "pageCount",
            "pagingCounter": "pageCounter",
            "hasPrevPage": "hasPrevious",
            "hasNextPage": "hasNext"
        }))
        .unwrap();

        let page = LabelMapper::apply(book_page(), &labels);

        assert_eq!(page["itemsList"].as_array().map(Vec::len), Some(10));
        assert_eq!(page["itemsList"][0]["title"], "Book #41");
        assert_eq!(page["itemCount"], 100);
        assert_eq!(page["perPage"], 10);
        assert_eq!(page["currentPage"], 5);
        assert_eq!(page["pageCounter"], 41);
        assert_eq!(page["hasPrevious"], true);
        assert_eq!(page["hasNext"], true);
        assert_eq!(page["prev"], 4);
        assert_eq!(page["next"], 6);
        assert_eq!(page["pageCount"], 10);

        for field in PageField::ALL {
            assert!(!page.contains_key(field.as_str()), "{} still present", field);
        }
    }

    #[test]
    fn test_suppressed_fields_leave_siblings_intact() {
        let labels = CustomLabels::new()
            .suppress(PageField::NextPage)
            .rename(PageField::PrevPage, "");

        let page = LabelMapper::apply(book_page(), &labels);

        assert!(!page.contains_key("nextPage"));
        assert!(!page.contains_key("prevPage"));
        assert_eq!(page.len(), 8);
        assert_eq!(page["hasPrevPage"], true);
        assert_eq!(page["hasNextPage"], true);
        assert_eq!(page["totalPages"], 10);
    }

    #[test]
    fn test_meta_grouping() {
        let labels = CustomLabels::new()
            .meta("meta")
            .rename(PageField::Docs, "itemsList")
            .rename(PageField::TotalDocs, "total");

        let page = LabelMapper::apply(book_page(), &labels);

        assert_eq!(page.keys().collect::<Vec<_>>(), vec!["itemsList", "meta"]);
        assert_eq!(page["meta"]["total"], 100);
        assert_eq!(page["meta"]["page"], 5);
        assert_eq!(page["meta"]["nextPage"], 6);
        assert!(page["meta"].get("totalDocs").is_none());
        assert!(page["meta"].get("itemsList").is_none());
    }

    #[test]
    fn test_meta_grouping_respects_suppression() {
        let labels = CustomLabels::new().meta("paging").suppress(PageField::PagingCounter);
        let page = LabelMapper::apply(book_page(), &labels);

        assert!(page["paging"].get("pagingCounter").is_none());
        assert_eq!(page["paging"].as_object().map(Map::len), Some(8));
        assert!(page.contains_key("docs"));
    }

    #[test]
    fn test_meta_label_never_replaces_docs() {
        let page = LabelMapper::apply(book_page(), &CustomLabels::new().meta("docs"));

        assert_eq!(page.len(), 1);
        assert_eq!(page["docs"].as_array().map(Vec::len), Some(10));
        assert_eq!(page["docs"][0]["title"], "Book #41");

        let renamed = CustomLabels::new()
            .rename(PageField::Docs, "items")
            .meta("items");
        let page = LabelMapper::apply(book_page(), &renamed);
        assert!(page["items"].is_array());
    }

    #[test]
    fn test_meta_label_free_when_docs_suppressed() {
        let labels = CustomLabels::new().suppress(PageField::Docs).meta("docs");
        let page = LabelMapper::apply(book_page(), &labels);

        assert_eq!(page["docs"]["totalDocs"], 100);
    }

    #[test]
    fn test_colliding_labels_last_wins() {
        let labels = CustomLabels::new()
            .rename(PageField::PrevPage, "adjacent")
            .rename(PageField::NextPage, "adjacent");

        let page = LabelMapper::apply(book_page(), &labels);

        assert_eq!(page["adjacent"], 6);
        assert_eq!(page.len(), 9);
    }

    #[test]
    fn test_labels_not_mutated() {
        let labels = CustomLabels::new().meta("meta");
        let before = labels.clone();

        LabelMapper::apply(book_page(), &labels);
        LabelMapper::apply(book_page(), &labels);

        assert_eq!(labels, before);
    }
}
