use thiserror::Error;

/// Errors surfaced to callers of the page client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PageError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
