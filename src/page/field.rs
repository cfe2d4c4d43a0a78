//! Canonical page result fields
//!
//! Every page carries the same ten fields. Their canonical names are the
//! keys emitted when no custom labels are configured.

use std::fmt;

/// A field of the canonical page result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageField {
    /// The documents on this page
    Docs,
    /// Count of every document matching the filter
    TotalDocs,
    /// Page size
    Limit,
    /// 1-indexed page number
    Page,
    /// Number of pages, absent when the limit is zero
    TotalPages,
    /// 1-based ordinal of the first document on this page
    PagingCounter,
    HasPrevPage,
    HasNextPage,
    PrevPage,
    NextPage,
}

impl PageField {
    /// All fields in canonical output order
    pub const ALL: [PageField; 10] = [
        PageField::Docs,
        PageField::TotalDocs,
        PageField::Limit,
        PageField::Page,
        PageField::TotalPages,
        PageField::PagingCounter,
        PageField::HasPrevPage,
        PageField::HasNextPage,
        PageField::PrevPage,
        PageField::NextPage,
    ];

    /// Returns the canonical output key
    pub fn as_str(&self) -> &'static str {
        match self {
            PageField::Docs => "docs",
            PageField::TotalDocs => "totalDocs",
            PageField::Limit => "limit",
            PageField::Page => "page",
            PageField::TotalPages => "totalPages",
            PageField::PagingCounter => "pagingCounter",
            PageField::HasPrevPage => "hasPrevPage",
            PageField::HasNextPage => "hasNextPage",
            PageField::PrevPage => "prevPage",
            PageField::NextPage => "nextPage",
        }
    }

    /// Looks up a field by its canonical key
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    /// Returns true for navigation metadata, i.e. everything but `docs`.
    ///
    /// These are the fields nested under the meta label when one is set.
    pub fn is_meta(&self) -> bool {
        !matches!(self, PageField::Docs)
    }
}

impl fmt::Display for PageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
