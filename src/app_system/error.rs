use thiserror::Error;

use crate::clients::ApiError;
use crate::notifications::TranslationError;
use crate::page_actor::PageError;

/// Failures while starting or stopping the page system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Translation(#[from] TranslationError),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error("Page task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
