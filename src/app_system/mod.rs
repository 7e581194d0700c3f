//! System wiring, configuration, startup and shutdown.

pub mod config;
pub mod error;
pub mod page_system;
pub mod tracing;

pub use config::*;
pub use error::*;
pub use page_system::*;
pub use self::tracing::*;
