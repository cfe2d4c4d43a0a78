//! Page result and metadata calculation
//!
//! The canonical page result is a fixed record: documents plus navigation
//! metadata computed from `(total_docs, limit, page)`. Renaming of its fields
//! happens later, in the labels module.

mod field;
mod metadata;
mod result;

pub use field::PageField;
pub use metadata::PageMetadata;
pub use result::PageResult;
