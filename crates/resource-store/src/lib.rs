//! # Resource Store
//!
//! An in-process document store built on the **Actor Model**: every collection is a single
//! Tokio task that owns its documents, and the rest of the application talks to it through a
//! cheap, cloneable client.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the document type, its payloads and its rules
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing, queries, index bookkeeping
//! 3. **Interface Layer** ([`ResourceClient`]) - type-safe requests with oneshot replies
//!
//! Documents are written once in the entity trait; the actor handles ids, server timestamps,
//! ordering of concurrent writes and query evaluation.
//!
//! ## Documents and Queries
//!
//! Each document serializes (via `serde`) to a JSON object. A [`Query`] filters on dotted paths
//! of that object (`address.country`), orders on one path and truncates to a limit:
//!
//! ```rust
//! use resource_store::{ActorEntity, Direction, Filter, Query, ResourceActor};
//! use async_trait::async_trait;
//! use serde::Serialize;
//!
//! #[derive(Clone, Debug, Serialize)]
//! struct Venue {
//!     id: u32,
//!     city: String,
//!     rating: f64,
//! }
//!
//! #[derive(Debug)] struct VenueCreate { city: String, rating: f64 }
//! #[derive(Debug)] struct VenueUpdate;
//! #[derive(Debug)] enum VenueAction {}
//! #[derive(Debug, thiserror::Error)] #[error("venue error")] struct VenueError;
//!
//! #[async_trait]
//! impl ActorEntity for Venue {
//!     const COLLECTION: &'static str = "venues";
//!     type Id = u32;
//!     type Create = VenueCreate;
//!     type Update = VenueUpdate;
//!     type Action = VenueAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = VenueError;
//!
//!     fn from_create_params(id: u32, p: VenueCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, city: p.city, rating: p.rating })
//!     }
//!     async fn on_update(&mut self, _: VenueUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, action: VenueAction, _: &()) -> Result<(), Self::Error> {
//!         match action {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let next = std::sync::atomic::AtomicU32::new(1);
//!     let (actor, client) = ResourceActor::<Venue>::new(10, move || {
//!         next.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
//!     });
//!     tokio::spawn(actor.run(()));
//!
//!     for (city, rating) in [("Berlin", 4.0), ("Berlin", 4.8), ("Lyon", 5.0)] {
//!         client.create(VenueCreate { city: city.into(), rating }).await.unwrap();
//!     }
//!
//!     let best = client
//!         .query(
//!             Query::new()
//!                 .filter(Filter::eq("city", "Berlin"))
//!                 .order_by("rating", Direction::Descending)
//!                 .limit(1),
//!         )
//!         .await
//!         .unwrap();
//!     assert_eq!(best[0].rating, 4.8);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are injected when the actor starts (`run(context)`), not when it is built, so
//! collections that reference each other can be constructed in any order.
//!
//! ## Concurrency Model
//!
//! - Each collection runs in its own Tokio task
//! - Requests are processed **sequentially** within a collection (no locks needed)
//! - Concurrent writes to one document resolve last-write-wins in arrival order
//! - Separate collections run in parallel
//!
//! ## Testing
//!
//! The [`mock`] module hands out a real [`ResourceClient`] backed by scripted expectations, so
//! code built on top of a client can be unit tested without a running collection.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod index;
pub mod message;
pub mod mock;
pub mod query;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::{ActorEntity, WriteKind};
pub use error::StoreError;
pub use index::{IndexDefinition, IndexField, IndexMode};
pub use message::{ResourceRequest, Response};
pub use query::{Direction, Filter, FilterOp, OrderBy, Query, MAX_IN_VALUES};
