//! Custom labels for page results
//!
//! Callers choose the output name of every page field, suppress fields, or
//! group the navigation metadata under a single key. The output shape is
//! caller-configured, so the labelled page is an ordered JSON object.

mod custom_labels;
mod labeled_page;
mod mapper;

pub use custom_labels::{CustomLabels, Label};
pub use labeled_page::LabeledPage;
pub use mapper::LabelMapper;
