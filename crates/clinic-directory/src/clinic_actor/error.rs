//! Error types for the Clinic actor and its client.

use thiserror::Error;

/// Failures raised inside the store while building or changing a clinic document.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClinicEntityError {
    /// The slug handed to the store is not a valid slug.
    #[error("Invalid slug: {0:?}")]
    InvalidSlug(String),

    /// A clinic must be created on behalf of an owner.
    #[error("Clinic has no owner")]
    MissingOwner,
}

/// Errors surfaced by [`ClinicClient`](crate::clients::ClinicClient) write operations.
///
/// `Provider` carries a fixed message only; the underlying store error is logged where it
/// happens and not passed on.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClinicError {
    /// The requested clinic was not found.
    #[error("Clinic not found: {0}")]
    NotFound(String),

    /// The operation needs a signed-in user.
    #[error("{0}")]
    Unauthenticated(String),

    /// The clinic lacks fields required for publishing.
    #[error("Clinic is missing required fields: {}", .missing_fields.join(", "))]
    Incomplete { missing_fields: Vec<String> },

    /// The document store rejected or failed the operation.
    #[error("{0}")]
    Provider(&'static str),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ClinicError {
    fn from(msg: String) -> Self {
        ClinicError::ActorCommunicationError(msg)
    }
}
