//! # Store Errors
//!
//! Errors surfaced by the document store to its clients. Entity hooks report their own error
//! type, which the actor boxes into [`StoreError::EntityError`].

/// Errors that can occur within the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("Invalid index: {0}")]
    InvalidIndex(String),
    #[error("Document encoding failed: {0}")]
    Encoding(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
