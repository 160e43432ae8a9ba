//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every document type (a `Clinic`, or anything else a
//! collection holds) implements so that the generic `ResourceActor` can own it. It names the
//! collection, the id type, the create/update payloads and the custom actions, and it provides
//! the lifecycle hooks (`on_create`, `on_update`, `handle_action`) plus the `stamp` hook through
//! which the store assigns server-side timestamps.
//!
//! Entities must be `Serialize`: queries are evaluated against the serialized document, so filter
//! and order paths are the serialized field names (e.g. `address.country`, `updatedAt`).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// The kind of write the store is stamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// The document was just created.
    Create,
    /// The document was modified through an update payload.
    Update,
    /// The document was modified through a custom action.
    Action,
}

/// Trait that any document type must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// This trait is `#[async_trait]` so hooks may await other clients. The `Context` type is
/// injected into every hook when the actor starts (`run(context)`), not when it is built.
#[async_trait]
pub trait ActorEntity: Clone + Serialize + Send + Sync + 'static {
    /// Name of the collection holding this document type (e.g. `"clinics"`).
    const COLLECTION: &'static str;

    /// The unique identifier for this entity.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new document.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing document.
    type Update: Send + Sync + Debug;

    /// Enum representing document-specific operations (e.g. `Publish`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One error enum per entity, not one per message. Clients match on a single type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full document from the assigned id and the create payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Receives the store clock reading after every successful write.
    ///
    /// This is the equivalent of a server-assigned timestamp: documents never read the clock
    /// themselves. The default ignores it.
    fn stamp(&mut self, _kind: WriteKind, _at: DateTime<Utc>) {}

    // --- Lifecycle Hooks (Async) ---

    /// Called after the document is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    // --- Action Handler (Async) ---

    /// Handle a custom document-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
