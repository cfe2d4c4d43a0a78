//! Paginate calls
//!
//! [`Paginator`] is the configurable entry point. The [`Paginate`] trait
//! attaches a default-configured `paginate` to every executor.

mod dispatcher;
mod extension;
#[allow(clippy::module_inception)]
mod paginator;

pub use dispatcher::QueryDispatcher;
pub use extension::Paginate;
pub use paginator::Paginator;
