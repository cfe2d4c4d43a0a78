//! Canonical page result

use serde::Serialize;
use serde_json::Value;

use super::field::PageField;
use super::metadata::PageMetadata;

/// A page of documents with its navigation metadata.
///
/// Serializes with the canonical field names. Use
/// [`LabelMapper`](crate::labels::LabelMapper) for caller-chosen names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult {
    /// Documents in result order, at most `limit` of them
    pub docs: Vec<Value>,
    #[serde(flatten)]
    pub meta: PageMetadata,
}

impl PageResult {
    /// Creates a page result
    pub fn new(docs: Vec<Value>, meta: PageMetadata) -> Self {
        Self { docs, meta }
    }

    /// Returns the number of documents on this page
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Returns true if this page holds no documents
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Consumes the result into `(field, value)` pairs in canonical order.
    pub fn into_fields(self) -> Vec<(PageField, Value)> {
        let meta = self.meta;
        let mut docs = Some(Value::Array(self.docs));

        PageField::ALL
            .into_iter()
            .map(|field| {
                let value = match field {
                    PageField::Docs => docs.take().unwrap_or(Value::Null),
                    PageField::TotalDocs => Value::from(meta.total_docs),
                    PageField::Limit => Value::from(meta.limit),
                    PageField::Page => Value::from(meta.page),
                    PageField::TotalPages => optional(meta.total_pages),
                    PageField::PagingCounter => Value::from(meta.paging_counter),
                    PageField::HasPrevPage => Value::Bool(meta.has_prev_page),
                    PageField::HasNextPage => Value::Bool(meta.has_next_page),
                    PageField::PrevPage => optional(meta.prev_page),
                    PageField::NextPage => optional(meta.next_page),
                };
                (field, value)
            })
            .collect()
    }
}

fn optional(value: Option<u64>) -> Value {
    value.map_or(Value::Null, Value::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> PageResult {
        PageResult::new(
            vec![json!({"title": "Book #41"}), json!({"title": "Book #42"})],
            PageMetadata::compute(100, 2, 21),
        )
    }

    #[test]
    fn test_fields_in_canonical_order() {
        let fields: Vec<_> = sample().into_fields().into_iter().map(|(f, _)| f).collect();
        assert_eq!(fields, PageField::ALL.to_vec());
    }

    #[test]
    fn test_field_values() {
        let fields = sample().into_fields();

        assert_eq!(fields[0].1.as_array().map(Vec::len), Some(2));
        assert_eq!(fields[1].1, json!(100));
        assert_eq!(fields[4].1, json!(50));
        assert_eq!(fields[5].1, json!(41));
        assert_eq!(fields[8].1, json!(20));
        assert_eq!(fields[9].1, json!(22));
    }

    #[test]
    fn test_absent_pages_are_null() {
        let result = PageResult::new(Vec::new(), PageMetadata::compute(12, 0, 1));
        let fields = result.into_fields();

        assert!(fields[4].1.is_null());
        assert!(fields[8].1.is_null());
        assert!(fields[9].1.is_null());
    }

    #[test]
    fn test_serializes_flat_canonical_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();

        assert_eq!(
            keys,
            PageField::ALL.iter().map(|f| f.as_str().to_string()).collect::<Vec<_>>()
        );
    }
}
