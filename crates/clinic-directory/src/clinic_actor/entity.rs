//! Entity trait implementation for the Clinic document.
//!
//! This module contains the [`ActorEntity`] implementation that lets [`Clinic`] live in the
//! generic [`ResourceActor`](resource_store::ResourceActor). The store assigns the id and the
//! timestamps; slug and owner arrive already decided in the create payload.

use super::actions::ClinicAction;
use super::error::ClinicEntityError;
use crate::model::{Clinic, ClinicCreate, ClinicId, ClinicStatus, ClinicUpdate};
use crate::slug::is_valid_slug;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use resource_store::{ActorEntity, WriteKind};

#[async_trait]
impl ActorEntity for Clinic {
    const COLLECTION: &'static str = "clinics";
    type Id = ClinicId;
    type Create = ClinicCreate;
    type Update = ClinicUpdate;
    type Action = ClinicAction;
    type ActionResult = ClinicStatus;
    type Context = ();
    type Error = ClinicEntityError;

    /// Builds a draft clinic. Timestamps are placeholders until the store stamps the write.
    fn from_create_params(id: ClinicId, params: ClinicCreate) -> Result<Self, Self::Error> {
        if !is_valid_slug(&params.slug) {
            return Err(ClinicEntityError::InvalidSlug(params.slug));
        }
        if params.user_id.is_empty() {
            return Err(ClinicEntityError::MissingOwner);
        }

        let clinic = params.clinic;
        Ok(Self {
            id,
            name: clinic.name,
            slug: params.slug,
            description: clinic.description,
            status: ClinicStatus::Draft,
            address: clinic.address,
            services: clinic.services,
            price_range: clinic.price_range,
            contact: clinic.contact,
            social_media: clinic.social_media,
            operating_hours: clinic.operating_hours,
            images: clinic.images,
            doctors: clinic.doctors,
            rating: clinic.rating,
            review_count: clinic.review_count,
            user_id: params.user_id,
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        })
    }

    fn stamp(&mut self, kind: WriteKind, at: DateTime<Utc>) {
        if kind == WriteKind::Create {
            self.created_at = at;
        }
        self.updated_at = at;
    }

    /// Writes every field present in the update. Nested objects are replaced whole.
    async fn on_update(
        &mut self,
        update: ClinicUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(slug) = update.slug {
            if !is_valid_slug(&slug) {
                return Err(ClinicEntityError::InvalidSlug(slug));
            }
            self.slug = slug;
        }

        let changes = update.changes;
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(address) = changes.address {
            self.address = address;
        }
        if let Some(services) = changes.services {
            self.services = services;
        }
        if let Some(price_range) = changes.price_range {
            self.price_range = price_range;
        }
        if let Some(contact) = changes.contact {
            self.contact = contact;
        }
        if let Some(social_media) = changes.social_media {
            self.social_media = Some(social_media);
        }
        if let Some(operating_hours) = changes.operating_hours {
            self.operating_hours = operating_hours;
        }
        if let Some(images) = changes.images {
            self.images = images;
        }
        if let Some(doctors) = changes.doctors {
            self.doctors = doctors;
        }
        if let Some(rating) = changes.rating {
            self.rating = rating;
        }
        if let Some(review_count) = changes.review_count {
            self.review_count = review_count;
        }
        Ok(())
    }

    /// Sets the status unconditionally and returns it.
    async fn handle_action(
        &mut self,
        action: ClinicAction,
        _ctx: &Self::Context,
    ) -> Result<ClinicStatus, Self::Error> {
        self.status = match action {
            ClinicAction::Publish => ClinicStatus::Published,
            ClinicAction::Unpublish => ClinicStatus::Draft,
        };
        Ok(self.status)
    }
}
