//! # Clinic Feed
//!
//! Observable state of the most recent clinic listing. The repository writes it when a fetch
//! starts and when it completes; any number of subscribers watch it. Concurrent fetches race
//! and the last one to complete wins.

use crate::model::Clinic;
use std::sync::Arc;
use tokio::sync::watch;

pub const PUBLISHED_LOAD_FAILED: &str = "Error loading clinics. Please try again.";
pub const OWNED_LOAD_FAILED: &str = "Error loading clinics";

/// One snapshot of the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ClinicListing {
    pub clinics: Vec<Clinic>,
    pub is_loading: bool,
    /// User-facing message of the last failed fetch.
    pub error: Option<String>,
    /// The store page was full before in-memory filters ran, so matches may be missing.
    pub truncated: bool,
}

impl Default for ClinicListing {
    /// Nothing fetched yet: empty and loading.
    fn default() -> Self {
        Self {
            clinics: Vec::new(),
            is_loading: true,
            error: None,
            truncated: false,
        }
    }
}

/// Shared handle to the listing state. Clones write to the same state.
#[derive(Clone)]
pub struct ClinicFeed {
    state: Arc<watch::Sender<ClinicListing>>,
}

impl Default for ClinicFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ClinicFeed {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ClinicListing::default());
        Self {
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ClinicListing> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ClinicListing {
        self.state.borrow().clone()
    }

    /// Marks a fetch as started. Current clinics stay visible; the error is cleared.
    pub(crate) fn start_loading(&self) {
        self.state.send_modify(|listing| {
            listing.is_loading = true;
            listing.error = None;
        });
    }

    pub(crate) fn finish(&self, clinics: Vec<Clinic>, truncated: bool) -> ClinicListing {
        self.publish(ClinicListing {
            clinics,
            is_loading: false,
            error: None,
            truncated,
        })
    }

    pub(crate) fn fail(&self, message: impl Into<String>) -> ClinicListing {
        self.publish(ClinicListing {
            clinics: Vec::new(),
            is_loading: false,
            error: Some(message.into()),
            truncated: false,
        })
    }

    fn publish(&self, listing: ClinicListing) -> ClinicListing {
        self.state.send_replace(listing.clone());
        listing
    }
}
