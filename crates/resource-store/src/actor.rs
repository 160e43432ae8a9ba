//! # Generic Collection Actor
//!
//! This module defines the `ResourceActor`, the task that owns one collection of documents. It
//! processes requests sequentially, so the collection needs no lock and concurrent writes to
//! the same document resolve last-write-wins in arrival order.

use crate::client::ResourceClient;
use crate::entity::{ActorEntity, WriteKind};
use crate::error::StoreError;
use crate::index::IndexDefinition;
use crate::message::ResourceRequest;
use crate::query::{lookup, sort_order, Direction, Query};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

type IdFn<T> = Box<dyn Fn() -> <T as ActorEntity>::Id + Send + Sync>;
type ClockFn = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// The generic actor that owns a collection of documents.
///
/// This is the "server" half: it holds the documents, the declared indexes and the receiving
/// end of the channel. The matching [`ResourceClient`] is the "client" half.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2.  **Wire**: pass dependencies into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use resource_store::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
/// use serde::Serialize;
///
/// #[derive(Clone, Debug, Serialize)] struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate(String);
/// #[derive(Debug)] struct NoteUpdate;
/// #[derive(Debug)] enum NoteAction {}
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     const COLLECTION: &'static str = "notes";
///     type Id = u32;
///     type Create = NoteCreate;
///     type Update = NoteUpdate;
///     type Action = NoteAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = NoteError;
///
///     fn from_create_params(id: u32, params: NoteCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, text: params.0 })
///     }
///     async fn on_update(&mut self, _: NoteUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, action: NoteAction, _: &()) -> Result<(), Self::Error> {
///         match action {}
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let counter = std::sync::atomic::AtomicU32::new(1);
///     let (actor, client) = ResourceActor::<Note>::new(10, move || {
///         counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
///     });
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(NoteCreate("hello".into())).await.unwrap();
///     assert_eq!(client.get(id).await.unwrap().unwrap().text, "hello");
/// }
/// ```
///
/// # Operations
///
/// * **Create**: next id from the id function, `from_create_params`, `on_create`, stamp, insert.
/// * **Get**: clone of the stored document, or `None`.
/// * **Update**: `on_update` on the stored document, stamp, return the new state.
/// * **Action**: `handle_action` on the stored document, stamp, return the action result.
/// * **Query**: filter, order, limit over the serialized documents.
/// * **CreateIndex / ListIndexes**: declare and inspect composite indexes.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    indexes: Vec<IndexDefinition>,
    next_id_fn: IdFn<T>,
    clock: ClockFn,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// * `buffer_size` - capacity of the request channel; clients wait when it is full.
    /// * `next_id_fn` - produces the id of each created document.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            indexes: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
            clock: Box::new(Utc::now),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Replaces the wall clock used for server-side timestamps.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = T::COLLECTION;
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = (self.next_id_fn)();

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                                continue;
                            }
                            item.stamp(WriteKind::Create, (self.clock)());
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(StoreError::EntityError(Box::new(e))));
                            continue;
                        }
                        item.stamp(WriteKind::Update, (self.clock)());
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| StoreError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => {
                                item.stamp(WriteKind::Action, (self.clock)());
                                info!(entity_type, %id, "Action ok");
                            }
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Query { query, respond_to } => {
                    debug!(entity_type, ?query, "Query");
                    let result = self.run_query(&query);
                    match &result {
                        Ok(items) => debug!(entity_type, matched = items.len(), "Query ok"),
                        Err(e) => warn!(entity_type, error = %e, "Query failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::CreateIndex { index, respond_to } => {
                    debug!(entity_type, %index, "CreateIndex");
                    let _ = respond_to.send(self.declare_index(index));
                }
                ResourceRequest::ListIndexes { respond_to } => {
                    let _ = respond_to.send(Ok(self.indexes.clone()));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    fn run_query(&self, query: &Query) -> Result<Vec<T>, StoreError> {
        query.validate()?;

        let mut hits: Vec<(Option<Value>, String, &T)> = Vec::new();
        for (id, item) in &self.store {
            let document =
                serde_json::to_value(item).map_err(|e| StoreError::Encoding(e.to_string()))?;
            if !query.matches(&document) {
                continue;
            }
            let sort_key = match query.ordering() {
                Some(order) => match lookup(&document, &order.path) {
                    Some(value) => Some(value.clone()),
                    // Ordered queries only return documents that carry the order field.
                    None => continue,
                },
                None => None,
            };
            hits.push((sort_key, id.to_string(), item));
        }

        let direction = query.ordering().map(|order| order.direction);
        hits.sort_by(|(left_key, left_id, _), (right_key, right_id, _)| {
            let by_key = match (left_key, right_key) {
                (Some(l), Some(r)) => sort_order(l, r),
                _ => Ordering::Equal,
            };
            let by_key = match direction {
                Some(Direction::Descending) => by_key.reverse(),
                _ => by_key,
            };
            by_key.then_with(|| left_id.cmp(right_id))
        });

        let limit = query.max_results().unwrap_or(hits.len());
        Ok(hits
            .into_iter()
            .take(limit)
            .map(|(_, _, item)| item.clone())
            .collect())
    }

    fn declare_index(&mut self, index: IndexDefinition) -> Result<bool, StoreError> {
        if index.collection_id != T::COLLECTION {
            return Err(StoreError::InvalidIndex(format!(
                "index targets collection {}, actor owns {}",
                index.collection_id,
                T::COLLECTION
            )));
        }
        if index.fields.is_empty() {
            return Err(StoreError::InvalidIndex(format!("{index} has no fields")));
        }
        if self.indexes.contains(&index) {
            debug!(entity_type = T::COLLECTION, %index, "Index already present");
            return Ok(false);
        }
        info!(entity_type = T::COLLECTION, %index, "Index created");
        self.indexes.push(index);
        Ok(true)
    }
}
