//! The reservation page: list loading, product enrichment and actions.

pub mod error;
pub mod reconcile;
pub mod service;
pub mod view;

pub use error::*;
pub use service::PageService;
pub use view::PageView;
