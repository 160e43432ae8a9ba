//! # Mock Store & Testing Guide
//!
//! `MockClient<T>` hands out a real `ResourceClient<T>` whose requests are answered from a queue
//! of expectations instead of a running collection. Use it to unit test the logic *around* a
//! client (slug derivation, error mapping, listing state) deterministically.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None, answers are scripted | Real documents and indexes |
//! | **Error Injection** | `return_err` | Needs a specific store state |
//! | **Use Case** | Client orchestration logic | The collection itself, end-to-end flows |
//!
//! ```rust
//! use resource_store::mock::MockClient;
//! use resource_store::{ActorEntity, StoreError};
//! use async_trait::async_trait;
//! use serde::Serialize;
//!
//! #[derive(Clone, Debug, Serialize)] struct Note { id: u32 }
//! #[derive(Debug)] struct NoteCreate;
//! #[derive(Debug)] struct NoteUpdate;
//! #[derive(Debug)] enum NoteAction {}
//! #[derive(Debug, thiserror::Error)] #[error("Err")] struct NoteError;
//!
//! #[async_trait]
//! impl ActorEntity for Note {
//!     const COLLECTION: &'static str = "notes";
//!     type Id = u32; type Create = NoteCreate; type Update = NoteUpdate;
//!     type Action = NoteAction; type ActionResult = (); type Context = (); type Error = NoteError;
//!     fn from_create_params(id: u32, _: NoteCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: NoteUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, action: NoteAction, _: &()) -> Result<(), Self::Error> {
//!         match action {}
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Note>::new();
//!     let client = mock.client();
//!
//!     // Simulate a downstream failure
//!     mock.expect_get(1).return_err(StoreError::ActorClosed);
//!
//!     let result = client.get(1).await;
//!     assert!(matches!(result, Err(StoreError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For step-by-step control (inspecting the exact payload a client sent), use
//! [`create_mock_client`] with the `expect_*` helper functions.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::StoreError;
use crate::index::IndexDefinition;
use crate::message::ResourceRequest;
use crate::query::Query;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted answer for the next request of a given kind.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    Create {
        response: Result<T::Id, StoreError>,
    },
    Update {
        id: T::Id,
        response: Result<T, StoreError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, StoreError>,
    },
    Query {
        response: Result<Vec<T>, StoreError>,
    },
    CreateIndex {
        response: Result<bool, StoreError>,
    },
}

type ExpectationQueue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request that does not match the next expectation
/// (wrong kind or wrong id) makes the mock task panic, which the caller observes as
/// [`StoreError::ActorDropped`]; `verify` then reports the leftover expectations.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: ExpectationQueue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: ExpectationQueue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: expected, response })) => {
                        assert_eq!(id, expected, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "update called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: expected, response }),
                    ) => {
                        assert_eq!(id, expected, "action called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Query { respond_to, .. }, Some(Expectation::Query { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::CreateIndex { respond_to, .. },
                        Some(Expectation::CreateIndex { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> CreateExpectationBuilder<T> {
        CreateExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, id: T::Id) -> UpdateExpectationBuilder<T> {
        UpdateExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `query` operation.
    pub fn expect_query(&mut self) -> QueryExpectationBuilder<T> {
        QueryExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `create_index` operation.
    pub fn expect_create_index(&mut self) -> CreateIndexExpectationBuilder<T> {
        CreateIndexExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Generates a builder whose `return_ok` / `return_err` push one expectation.
macro_rules! expectation_builder {
    ($builder:ident, $variant:ident, $ok:ty $(, $id:ident)?) => {
        pub struct $builder<T: ActorEntity> {
            $($id: T::Id,)?
            expectations: ExpectationQueue<T>,
        }

        impl<T: ActorEntity> $builder<T> {
            /// Sets the expectation to return a successful result.
            pub fn return_ok(self, value: $ok) {
                self.push(Ok(value));
            }

            /// Sets the expectation to return an error.
            pub fn return_err(self, error: StoreError) {
                self.push(Err(error));
            }

            fn push(self, response: Result<$ok, StoreError>) {
                self.expectations.lock().unwrap().push_back(Expectation::$variant {
                    $($id: self.$id,)?
                    response,
                });
            }
        }
    };
}

expectation_builder!(GetExpectationBuilder, Get, Option<T>, id);
expectation_builder!(CreateExpectationBuilder, Create, T::Id);
expectation_builder!(UpdateExpectationBuilder, Update, T, id);
expectation_builder!(ActionExpectationBuilder, Action, T::ActionResult, id);
expectation_builder!(QueryExpectationBuilder, Query, Vec<T>);
expectation_builder!(CreateIndexExpectationBuilder, CreateIndex, bool);

// =============================================================================
// STEP-BY-STEP HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test drives the conversation: call the client in a spawned task, pull the request off
/// the receiver with one of the `expect_*` helpers, assert on its payload, then answer through
/// the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, StoreError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, StoreError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, StoreError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Query request
pub async fn expect_query<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Query, oneshot::Sender<Result<Vec<T>, StoreError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Query { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a CreateIndex request
pub async fn expect_create_index<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(IndexDefinition, oneshot::Sender<Result<bool, StoreError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::CreateIndex { index, respond_to }) => Some((index, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Filter;
    use async_trait::async_trait;
    use serde::Serialize;

    #[derive(Clone, Debug, PartialEq, Serialize)]
    struct Listing {
        id: u32,
        title: String,
    }

    #[derive(Debug)]
    struct ListingCreate {
        title: String,
    }

    #[derive(Debug)]
    struct ListingUpdate;

    #[derive(Debug)]
    enum ListingAction {
        Archive,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Listing error")]
    struct ListingError;

    #[async_trait]
    impl ActorEntity for Listing {
        const COLLECTION: &'static str = "listings";
        type Id = u32;
        type Create = ListingCreate;
        type Update = ListingUpdate;
        type Action = ListingAction;
        type ActionResult = bool;
        type Context = ();
        type Error = ListingError;

        fn from_create_params(id: u32, params: ListingCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                title: params.title,
            })
        }

        async fn on_update(
            &mut self,
            _update: ListingUpdate,
            _ctx: &Self::Context,
        ) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(
            &mut self,
            _action: ListingAction,
            _ctx: &Self::Context,
        ) -> Result<bool, Self::Error> {
            Ok(true)
        }
    }

    fn listing(id: u32, title: &str) -> Listing {
        Listing {
            id,
            title: title.to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Listing>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(ListingCreate {
                    title: "Test".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.title, "Test");
        responder.send(Ok(1)).unwrap();

        let result = create_task.await.unwrap();
        assert!(matches!(result, Ok(1)));
    }

    #[tokio::test]
    async fn test_step_by_step_query_exposes_filters() {
        let (client, mut receiver) = create_mock_client::<Listing>(10);

        let query_task = tokio::spawn(async move {
            client
                .query(Query::new().filter(Filter::eq("title", "Clinic")))
                .await
        });

        let (query, responder) = expect_query(&mut receiver)
            .await
            .expect("Expected Query request");
        assert_eq!(query.filters(), &[Filter::eq("title", "Clinic")]);
        responder.send(Ok(vec![listing(3, "Clinic")])).unwrap();

        let found = query_task.await.unwrap().unwrap();
        assert_eq!(found, vec![listing(3, "Clinic")]);
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Listing>::new();

        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(listing(1, "Test")));
        mock.expect_action(1).return_ok(true);
        mock.expect_query().return_ok(vec![listing(1, "Test")]);

        let client = mock.client();

        let id = client
            .create(ListingCreate {
                title: "Test".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);

        let fetched = client.get(1).await.unwrap();
        assert_eq!(fetched.map(|l| l.title), Some("Test".to_string()));

        assert!(client.perform_action(1, ListingAction::Archive).await.unwrap());
        assert_eq!(client.query(Query::new()).await.unwrap().len(), 1);

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_error_injection() {
        let mut mock = MockClient::<Listing>::new();
        mock.expect_update(7)
            .return_err(StoreError::NotFound("7".to_string()));

        let result = mock.client().update(7, ListingUpdate).await;
        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == "7"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_request_drops_reply() {
        let mut mock = MockClient::<Listing>::new();
        mock.expect_create_index().return_ok(true);

        let result = mock.client().get(1).await;
        assert!(matches!(result, Err(StoreError::ActorDropped)));
    }
}
