//! # Generic Client
//!
//! The handle through which the rest of the application talks to a collection.

use crate::entity::ActorEntity;
use crate::error::StoreError;
use crate::index::IndexDefinition;
use crate::message::ResourceRequest;
use crate::query::Query;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Holds only the channel sender, so it is cheap to clone and share across tasks. Every method
/// sends one request and awaits its oneshot reply; a closed actor surfaces as
/// [`StoreError::ActorClosed`] and a dropped reply as [`StoreError::ActorDropped`].
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> ResourceRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, StoreError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, StoreError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Runs a collection query and returns the matching documents.
    pub async fn query(&self, query: Query) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| ResourceRequest::Query { query, respond_to })
            .await
    }

    /// Declares a composite index. Returns `false` when it already existed.
    pub async fn create_index(&self, index: IndexDefinition) -> Result<bool, StoreError> {
        self.request(|respond_to| ResourceRequest::CreateIndex { index, respond_to })
            .await
    }

    pub async fn list_indexes(&self) -> Result<Vec<IndexDefinition>, StoreError> {
        self.request(|respond_to| ResourceRequest::ListIndexes { respond_to })
            .await
    }
}
