//! # Clinic Client
//!
//! The clinic repository: every read and write the directory performs against the `clinics`
//! collection. It wraps a `ResourceClient<Clinic>` and adds the orchestration around it
//! (owner checks, slug derivation, listing state, readiness checks).
//!
//! Write operations return `Result<_, ClinicError>`; store failures are logged here and
//! surfaced as a fixed [`ClinicError::Provider`] message. Listing fetches never fail: they
//! write their outcome, error message included, to the [`ClinicFeed`].

use crate::auth::AuthState;
use crate::clinic_actor::{ClinicAction, ClinicError};
use crate::config::DEFAULT_PAGE_LIMIT;
use crate::feed::{ClinicFeed, ClinicListing, OWNED_LOAD_FAILED, PUBLISHED_LOAD_FAILED};
use crate::filters::ClinicFilters;
use crate::model::{
    Clinic, ClinicCreate, ClinicDraft, ClinicId, ClinicStatus, ClinicUpdate, NewClinic, User,
};
use crate::slug::generate_unique_slug;
use crate::validation::{validate_clinic, Validation};
use async_trait::async_trait;
use resource_store::{ActorClient, Direction, Filter, Query, ResourceClient, StoreError};
use std::collections::HashSet;
use tracing::{debug, error, info, instrument, warn};

const LIST_REQUIRES_AUTH: &str = "User must be authenticated to view their clinics";
const CREATE_REQUIRES_AUTH: &str = "User must be authenticated to create a clinic";

/// Client for interacting with the Clinic actor.
#[derive(Clone)]
pub struct ClinicClient {
    inner: ResourceClient<Clinic>,
    auth: AuthState,
    feed: ClinicFeed,
    page_limit: usize,
}

impl ClinicClient {
    pub fn new(inner: ResourceClient<Clinic>, auth: AuthState, feed: ClinicFeed) -> Self {
        Self {
            inner,
            auth,
            feed,
            page_limit: DEFAULT_PAGE_LIMIT,
        }
    }

    /// Replaces the server-side cap of published listings.
    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = page_limit;
        self
    }

    // --- Listings ---

    /// Loads published clinics matching `filters` into the feed and returns the new listing.
    ///
    /// Status, countries and minimum rating are evaluated by the store, best rated first and
    /// capped at the page limit; the other filters run over that page. A full page with
    /// in-memory filters active is flagged `truncated`.
    #[instrument(skip(self))]
    pub async fn fetch_published_clinics(&self, filters: &ClinicFilters) -> ClinicListing {
        self.feed.start_loading();

        let page = match self.inner.query(filters.server_query(self.page_limit)).await {
            Ok(page) => page,
            Err(e) => {
                error!(error = %e, "Failed to fetch published clinics");
                return self.feed.fail(PUBLISHED_LOAD_FAILED);
            }
        };

        let fetched = page.len();
        let truncated = fetched >= self.page_limit && filters.has_secondary_filters();
        if truncated {
            warn!(
                fetched,
                limit = self.page_limit,
                "Page cap reached before in-memory filters, listing may be incomplete"
            );
        }

        let clinics = filters.apply_secondary(page);
        info!(fetched, kept = clinics.len(), "Published clinics loaded");
        self.feed.finish(clinics, truncated)
    }

    /// Loads the signed-in user's clinics, most recently updated first.
    #[instrument(skip(self))]
    pub async fn fetch_my_clinics(&self) -> ClinicListing {
        self.feed.start_loading();

        let Some(user) = self.auth.current_user() else {
            warn!("Owner listing requested while signed out");
            return self.feed.fail(LIST_REQUIRES_AUTH);
        };

        let query = Query::new()
            .filter(Filter::eq("userId", user.id.as_str()))
            .order_by("updatedAt", Direction::Descending);
        match self.inner.query(query).await {
            Ok(clinics) => {
                info!(user_id = %user.id, count = clinics.len(), "Owner clinics loaded");
                self.feed.finish(clinics, false)
            }
            Err(e) => {
                error!(user_id = %user.id, error = %e, "Failed to fetch owner clinics");
                self.feed.fail(OWNED_LOAD_FAILED)
            }
        }
    }

    /// The published clinic with `slug`. Drafts and failures both yield `None`.
    #[instrument(skip(self))]
    pub async fn get_clinic_by_slug(&self, slug: &str) -> Option<Clinic> {
        let query = Query::new()
            .filter(Filter::eq("slug", slug))
            .filter(Filter::eq("status", ClinicStatus::Published.as_str()))
            .limit(1);
        match self.inner.query(query).await {
            Ok(found) => found.into_iter().next(),
            Err(e) => {
                error!(error = %e, "Failed to fetch clinic by slug");
                None
            }
        }
    }

    // --- Writes ---

    /// Creates a draft clinic owned by the signed-in user and returns its id.
    ///
    /// The slug is derived from the name and is unique across the whole collection, drafts
    /// included.
    #[instrument(skip(self, clinic), fields(name = %clinic.name))]
    pub async fn add_clinic(&self, clinic: NewClinic) -> Result<ClinicId, ClinicError> {
        debug!(?clinic, "add_clinic called");
        let owner = self.require_user(CREATE_REQUIRES_AUTH)?;

        let existing = self
            .existing_slugs()
            .await
            .map_err(|e| provider_failure("Failed to create clinic", e))?;
        let slug = generate_unique_slug(&clinic.name, &existing);

        info!(%slug, "Sending create to actor");
        let id = self
            .inner
            .create(ClinicCreate {
                slug,
                user_id: owner.id,
                clinic,
            })
            .await
            .map_err(|e| provider_failure("Failed to create clinic", e))?;
        Ok(id)
    }

    /// Writes the fields present in `changes` and returns the updated clinic.
    ///
    /// A changed, non-empty name gets a fresh unique slug; otherwise the slug is kept.
    #[instrument(skip(self, changes))]
    pub async fn update_clinic(
        &self,
        id: ClinicId,
        changes: ClinicDraft,
    ) -> Result<Clinic, ClinicError> {
        debug!(?changes, "update_clinic called");
        let current = self
            .inner
            .get(id)
            .await
            .map_err(|e| provider_failure("Failed to update clinic", e))?
            .ok_or_else(|| ClinicError::NotFound(id.to_string()))?;

        let renamed = changes
            .name
            .as_deref()
            .filter(|name| !name.is_empty() && *name != current.name);
        let slug = match renamed {
            Some(name) => {
                let existing = self
                    .existing_slugs()
                    .await
                    .map_err(|e| provider_failure("Failed to update clinic", e))?;
                let slug = generate_unique_slug(name, &existing);
                info!(old = %current.slug, new = %slug, "Name changed, new slug");
                Some(slug)
            }
            None => None,
        };

        self.inner
            .update(id, ClinicUpdate { changes, slug })
            .await
            .map_err(|e| provider_failure("Failed to update clinic", e))
    }

    /// Publishes the clinic without checking it is complete.
    #[instrument(skip(self))]
    pub async fn publish_clinic(&self, id: ClinicId) -> Result<(), ClinicError> {
        info!("Sending publish to actor");
        self.inner
            .perform_action(id, ClinicAction::Publish)
            .await
            .map_err(|e| provider_failure("Failed to publish clinic", e))?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn unpublish_clinic(&self, id: ClinicId) -> Result<(), ClinicError> {
        info!("Sending unpublish to actor");
        self.inner
            .perform_action(id, ClinicAction::Unpublish)
            .await
            .map_err(|e| provider_failure("Failed to unpublish clinic", e))?;
        Ok(())
    }

    /// Publishes the clinic only if it passes [`validate_clinic`].
    #[instrument(skip(self))]
    pub async fn publish_validated(&self, id: ClinicId) -> Result<(), ClinicError> {
        let clinic = self
            .inner
            .get(id)
            .await
            .map_err(|e| provider_failure("Failed to publish clinic", e))?
            .ok_or_else(|| ClinicError::NotFound(id.to_string()))?;

        if let Validation::Invalid { missing_fields } = validate_clinic(&ClinicDraft::from(&clinic))
        {
            warn!(missing = missing_fields.len(), "Clinic not ready to publish");
            return Err(ClinicError::Incomplete { missing_fields });
        }
        self.publish_clinic(id).await
    }

    // --- Helpers ---

    fn require_user(&self, message: &str) -> Result<User, ClinicError> {
        self.auth.current_user().ok_or_else(|| {
            warn!("Write attempted while signed out");
            ClinicError::Unauthenticated(message.to_string())
        })
    }

    async fn existing_slugs(&self) -> Result<HashSet<String>, StoreError> {
        let clinics = self.inner.query(Query::new()).await?;
        Ok(clinics.into_iter().map(|clinic| clinic.slug).collect())
    }
}

/// Logs the store error and replaces it with a fixed message. Not-found stays visible.
fn provider_failure(message: &'static str, e: StoreError) -> ClinicError {
    match e {
        StoreError::NotFound(id) => {
            warn!(%id, "{message}: not found");
            ClinicError::NotFound(id)
        }
        e => {
            error!(error = %e, "{message}");
            ClinicError::Provider(message)
        }
    }
}

#[async_trait]
impl ActorClient<Clinic> for ClinicClient {
    type Error = ClinicError;

    fn inner(&self) -> &ResourceClient<Clinic> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        ClinicError::ActorCommunicationError(e.to_string())
    }
}
