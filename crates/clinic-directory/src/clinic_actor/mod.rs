//! # Clinic Actor
//!
//! The `clinics` collection: one [`ResourceActor`] owning every clinic document.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_store::ActorEntity) implementation for [`Clinic`]
//! - [`ClinicAction`] - publish / unpublish
//! - [`ClinicEntityError`], [`ClinicError`] - store-side and client-side errors
//! - [`new()`] - Factory function that creates the actor and its raw client
//!
//! ## Usage
//!
//! ```rust
//! use clinic_directory::clinic_actor;
//! use clinic_directory::model::{ClinicCreate, NewClinic};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, store) = clinic_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = store
//!         .create(ClinicCreate {
//!             slug: "smile-dental".to_string(),
//!             user_id: "owner-1".to_string(),
//!             clinic: NewClinic::default(),
//!         })
//!         .await
//!         .unwrap();
//!     assert_eq!(store.get(id).await.unwrap().unwrap().slug, "smile-dental");
//! }
//! ```
//!
//! Ids are random UUIDs; the store clock stamps `createdAt` and `updatedAt`.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::{Clinic, ClinicId};
use chrono::{DateTime, Utc};
use resource_store::{ResourceActor, ResourceClient};

/// Creates a new Clinic actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Clinic>, ResourceClient<Clinic>) {
    ResourceActor::new(buffer_size, ClinicId::new)
}

/// Like [`new`], with the clock used for server timestamps replaced.
pub fn with_clock(
    buffer_size: usize,
    clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
) -> (ResourceActor<Clinic>, ResourceClient<Clinic>) {
    let (actor, client) = new(buffer_size);
    (actor.with_clock(clock), client)
}
