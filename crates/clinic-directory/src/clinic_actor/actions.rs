//! Custom actions for the Clinic actor.
//!
//! Status changes are actions rather than updates: they touch nothing but the status and the
//! update time, and they skip the readiness check. See
//! [`ClinicClient::publish_validated`](crate::clients::ClinicClient::publish_validated) for the
//! checked variant.

/// Custom actions for Clinic documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClinicAction {
    /// Makes the clinic visible in public listings.
    Publish,
    /// Returns the clinic to draft.
    Unpublish,
}
