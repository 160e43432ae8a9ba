//! # Generic Messages
//!
//! The request type sent from a `ResourceClient` to its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::StoreError;
use crate::index::IndexDefinition;
use crate::query::Query;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants cover the document lifecycle a collection needs (create, read by id, update),
/// a custom `Action` for document-specific logic, collection queries, and index declarations.
/// The enum is generic over `T: ActorEntity`, so a clinic payload can never reach another
/// collection's actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Query {
        query: Query,
        respond_to: Response<Vec<T>>,
    },
    CreateIndex {
        index: IndexDefinition,
        respond_to: Response<bool>,
    },
    ListIndexes {
        respond_to: Response<Vec<IndexDefinition>>,
    },
}
