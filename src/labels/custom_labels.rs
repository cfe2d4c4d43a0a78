//! Caller-supplied field labels
//!
//! In JSON form a label is a string (rename), `false` or `""` (suppress).
//! Anything else, and any unknown key, leaves the field canonical.

use serde::de::{Deserializer, IgnoredAny};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::page::PageField;

/// How a single field is emitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Label {
    /// Emit under the canonical key
    #[default]
    Canonical,
    /// Emit under this key instead
    Rename(String),
    /// Do not emit the field at all
    Suppress,
}

impl Label {
    /// Builds a rename label. An empty name suppresses the field.
    pub fn rename(name: impl Into<String>) -> Self {
        let name = name.into();
        if name.is_empty() {
            Label::Suppress
        } else {
            Label::Rename(name)
        }
    }

    /// Returns true if the field is not emitted
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Label::Suppress)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Name(String),
    Flag(bool),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawLabel::deserialize(deserializer)? {
            RawLabel::Name(name) => Label::rename(name),
            RawLabel::Flag(false) => Label::Suppress,
            RawLabel::Flag(true) | RawLabel::Other(_) => Label::Canonical,
        })
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Label::Canonical => serializer.serialize_bool(true),
            Label::Rename(name) => serializer.serialize_str(name),
            Label::Suppress => serializer.serialize_bool(false),
        }
    }
}

/// Label scheme for a page result.
///
/// `meta`, when renamed, groups every metadata field under that key.
///
/// ```
/// use docpage::labels::CustomLabels;
/// use docpage::page::PageField;
///
/// let labels = CustomLabels::new()
///     .rename(PageField::Docs, "itemsList")
///     .rename(PageField::TotalDocs, "itemCount")
///     .suppress(PageField::NextPage);
///
/// assert_eq!(labels.output_key(PageField::Docs), Some("itemsList"));
/// assert_eq!(labels.output_key(PageField::Page), Some("page"));
/// assert_eq!(labels.output_key(PageField::NextPage), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomLabels {
    pub docs: Label,
    pub total_docs: Label,
    pub limit: Label,
    pub page: Label,
    pub total_pages: Label,
    pub paging_counter: Label,
    pub has_prev_page: Label,
    pub has_next_page: Label,
    pub prev_page: Label,
    pub next_page: Label,
    pub meta: Label,
}

impl CustomLabels {
    /// Identity labels: every field canonical, no meta grouping
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `field` under `name`
    pub fn rename(mut self, field: PageField, name: impl Into<String>) -> Self {
        *self.label_mut(field) = Label::rename(name);
        self
    }

    /// Drops `field` from the output
    pub fn suppress(mut self, field: PageField) -> Self {
        *self.label_mut(field) = Label::Suppress;
        self
    }

    /// Nests all metadata fields under `name`
    pub fn meta(mut self, name: impl Into<String>) -> Self {
        self.meta = Label::rename(name);
        self
    }

    /// Returns the label configured for a field
    pub fn label(&self, field: PageField) -> &Label {
        match field {
            PageField::Docs => &self.docs,
            PageField::TotalDocs => &self.total_docs,
            PageField::Limit => &self.limit,
            PageField::Page => &self.page,
            PageField::TotalPages => &self.total_pages,
            PageField::PagingCounter => &self.paging_counter,
            PageField::HasPrevPage => &self.has_prev_page,
            PageField::HasNextPage => &self.has_next_page,
            PageField::PrevPage => &self.prev_page,
            PageField::NextPage => &self.next_page,
        }
    }

    fn label_mut(&mut self, field: PageField) -> &mut Label {
        match field {
            PageField::Docs => &mut self.docs,
            PageField::TotalDocs => &mut self.total_docs,
            PageField::Limit => &mut self.limit,
            PageField::Page => &mut self.page,
            PageField::TotalPages => &mut self.total_pages,
            PageField::PagingCounter => &mut self.paging_counter,
            PageField::HasPrevPage => &mut self.has_prev_page,
            PageField::HasNextPage => &mut self.has_next_page,
            PageField::PrevPage => &mut self.prev_page,
            PageField::NextPage => &mut self.next_page,
        }
    }

    /// Key the field is emitted under, `None` when suppressed
    pub fn output_key(&self, field: PageField) -> Option<&str> {
        match self.label(field) {
            Label::Canonical => Some(field.as_str()),
            Label::Rename(name) => Some(name),
            Label::Suppress => None,
        }
    }

    /// Key of the meta grouping, `None` when metadata stays top-level
    pub fn meta_key(&self) -> Option<&str> {
        match &self.meta {
            Label::Rename(name) => Some(name),
            Label::Canonical | Label::Suppress => None,
        }
    }

    /// Returns true if applying these labels leaves the canonical shape
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_renames_and_suppressions() {
        let labels: CustomLabels = serde_json::from_value(json!({
            "totalDocs": "itemCount",
            "nextPage": false,
            "prevPage": "",
            "meta": "meta"
        }))
        .unwrap();

        assert_eq!(labels.output_key(PageField::TotalDocs), Some("itemCount"));
        assert_eq!(labels.output_key(PageField::NextPage), None);
        assert_eq!(labels.output_key(PageField::PrevPage), None);
        assert_eq!(labels.output_key(PageField::Limit), Some("limit"));
        assert_eq!(labels.meta_key(), Some("meta"));
    }

    #[test]
    fn test_unknown_keys_and_values_ignored() {
        let labels: CustomLabels = serde_json::from_value(json!({
            "nonexistent": "whatever",
            "page": 42,
            "limit": null,
            "docs": true
        }))
        .unwrap();

        assert!(labels.is_identity());
    }

    #[test]
    fn test_empty_meta_means_no_grouping() {
        let labels: CustomLabels = serde_json::from_value(json!({"meta": ""})).unwrap();
        assert_eq!(labels.meta_key(), None);

        let labels: CustomLabels = serde_json::from_value(json!({"meta": false})).unwrap();
        assert_eq!(labels.meta_key(), None);
    }

    #[test]
    fn test_builder_empty_rename_suppresses() {
        let labels = CustomLabels::new().rename(PageField::HasNextPage, "");
        assert!(labels.label(PageField::HasNextPage).is_suppressed());
    }

    #[test]
    fn test_serialize_round_trip() {
        let labels = CustomLabels::new()
            .rename(PageField::Docs, "items")
            .suppress(PageField::PrevPage)
            .meta("paging");

        let json = serde_json::to_value(&labels).unwrap();
        assert_eq!(json["docs"], "items");
        assert_eq!(json["prevPage"], false);
        assert_eq!(json["page"], true);

        let back: CustomLabels = serde_json::from_value(json).unwrap();
        assert_eq!(back, labels);
    }
}
