use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use resource_store::{
    ActorEntity, Direction, Filter, IndexDefinition, IndexMode, Query, ResourceActor,
    ResourceClient, StoreError, WriteKind,
};
use serde::Serialize;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct Listing {
    id: u32,
    title: String,
    rating: Option<f64>,
    tags: Vec<String>,
    published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct ListingCreate {
    title: String,
    rating: Option<f64>,
    tags: Vec<String>,
}

#[derive(Debug)]
struct ListingUpdate {
    title: Option<String>,
}

#[derive(Debug)]
enum ListingAction {
    Publish,
    Reject,
}

#[derive(Debug, thiserror::Error)]
enum ListingError {
    #[error("Title must not be empty")]
    EmptyTitle,
    #[error("Listing was rejected")]
    Rejected,
}

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
        if params.title.is_empty() {
            return Err(ListingError::EmptyTitle);
        }
        Ok(Self {
            id,
            title: params.title,
            rating: params.rating,
            tags: params.tags,
            published: false,
            created_at: None,
            updated_at: None,
        })
    }

    fn stamp(&mut self, kind: WriteKind, at: DateTime<Utc>) {
        if kind == WriteKind::Create {
            self.created_at = Some(at);
        }
        self.updated_at = Some(at);
    }

    async fn on_update(
        &mut self,
        update: ListingUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(title) = update.title {
            self.title = title;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ListingAction,
        _ctx: &Self::Context,
    ) -> Result<bool, Self::Error> {
        match action {
            ListingAction::Publish => {
                let changed = !self.published;
                self.published = true;
                Ok(changed)
            }
            ListingAction::Reject => Err(ListingError::Rejected),
        }
    }
}

fn start() -> ResourceClient<Listing> {
    let counter = AtomicU32::new(1);
    let (actor, client) =
        ResourceActor::<Listing>::new(10, move || counter.fetch_add(1, Ordering::SeqCst));
    tokio::spawn(actor.run(()));
    client
}

fn create(title: &str, rating: Option<f64>, tags: &[&str]) -> ListingCreate {
    ListingCreate {
        title: title.to_string(),
        rating,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

// --- Tests ---

#[tokio::test]
async fn test_store_full_lifecycle() {
    let client = start();

    // 1. Create
    let id = client.create(create("Alpha", Some(4.0), &[])).await.unwrap();
    assert_eq!(id, 1);

    // 2. Action
    assert!(client.perform_action(id, ListingAction::Publish).await.unwrap());
    assert!(!client.perform_action(id, ListingAction::Publish).await.unwrap());

    // 3. Update
    let updated = client
        .update(
            id,
            ListingUpdate {
                title: Some("Beta".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Beta");
    assert!(updated.published);

    // 4. Get reflects every write
    let stored = client.get(id).await.unwrap().unwrap();
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn test_missing_documents() {
    let client = start();

    assert!(client.get(99).await.unwrap().is_none());

    let result = client.update(99, ListingUpdate { title: None }).await;
    assert!(matches!(result, Err(StoreError::NotFound(id)) if id == "99"));

    let result = client.perform_action(99, ListingAction::Publish).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn test_entity_errors_are_boxed() {
    let client = start();

    let result = client.create(create("", None, &[])).await;
    assert!(matches!(result, Err(StoreError::EntityError(_))));

    let id = client.create(create("Alpha", None, &[])).await.unwrap();
    let result = client.perform_action(id, ListingAction::Reject).await;
    match result {
        Err(StoreError::EntityError(e)) => assert_eq!(e.to_string(), "Listing was rejected"),
        other => panic!("expected entity error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_timestamps_come_from_store_clock() {
    let ticks = Arc::new(AtomicU32::new(0));
    let clock_ticks = ticks.clone();
    let counter = AtomicU32::new(1);
    let (actor, client) =
        ResourceActor::<Listing>::new(10, move || counter.fetch_add(1, Ordering::SeqCst));
    let actor = actor.with_clock(move || {
        let tick = clock_ticks.fetch_add(1, Ordering::SeqCst);
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, tick).unwrap()
    });
    tokio::spawn(actor.run(()));

    let id = client.create(create("Alpha", None, &[])).await.unwrap();
    let created = client.get(id).await.unwrap().unwrap();
    let first = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(created.created_at, Some(first));
    assert_eq!(created.updated_at, Some(first));

    let updated = client
        .update(id, ListingUpdate { title: None })
        .await
        .unwrap();
    assert_eq!(updated.created_at, Some(first));
    assert_eq!(
        updated.updated_at,
        Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 1).unwrap())
    );

    // A failed action does not touch the document.
    let _ = client.perform_action(id, ListingAction::Reject).await;
    let after = client.get(id).await.unwrap().unwrap();
    assert_eq!(after.updated_at, updated.updated_at);
    assert_eq!(ticks.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_query_filters_order_and_limit() {
    let client = start();
    for (title, rating) in [
        ("a", Some(10.0)),
        ("b", Some(8.0)),
        ("c", Some(6.0)),
        ("d", Some(4.0)),
        ("e", Some(2.0)),
        ("f", None),
    ] {
        client.create(create(title, rating, &[])).await.unwrap();
    }

    let ratings = |items: Vec<Listing>| -> Vec<f64> {
        items.into_iter().filter_map(|l| l.rating).collect()
    };

    let descending = client
        .query(Query::new().order_by("rating", Direction::Descending))
        .await
        .unwrap();
    assert_eq!(ratings(descending), vec![10.0, 8.0, 6.0, 4.0, 2.0]);

    let top_two = client
        .query(
            Query::new()
                .filter(Filter::gte("rating", 4))
                .order_by("rating", Direction::Ascending)
                .limit(2),
        )
        .await
        .unwrap();
    assert_eq!(ratings(top_two), vec![4.0, 6.0]);

    // Unordered queries keep documents without the field when no filter needs it.
    let everything = client.query(Query::new()).await.unwrap();
    assert_eq!(everything.len(), 6);
}

#[tokio::test]
async fn test_query_array_contains_and_in() {
    let client = start();
    client
        .create(create("a", None, &["xray", "dental"]))
        .await
        .unwrap();
    client.create(create("b", None, &["dental"])).await.unwrap();
    client.create(create("c", None, &[])).await.unwrap();

    let xray = client
        .query(Query::new().filter(Filter::array_contains("tags", "xray")))
        .await
        .unwrap();
    assert_eq!(xray.len(), 1);
    assert_eq!(xray[0].title, "a");

    let picked = client
        .query(Query::new().filter(Filter::is_in("title", ["a", "c"])))
        .await
        .unwrap();
    let titles: Vec<_> = picked.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "c"]);
}

#[tokio::test]
async fn test_invalid_query_is_rejected() {
    let client = start();
    let empty: Vec<&str> = Vec::new();
    let result = client
        .query(Query::new().filter(Filter::is_in("title", empty)))
        .await;
    assert!(matches!(result, Err(StoreError::InvalidQuery(_))));
}

#[tokio::test]
async fn test_index_declarations() {
    let client = start();
    let index = IndexDefinition::new("listings")
        .field("published", IndexMode::Ascending)
        .field("rating", IndexMode::Descending);

    assert!(client.create_index(index.clone()).await.unwrap());
    assert!(!client.create_index(index.clone()).await.unwrap());
    assert_eq!(client.list_indexes().await.unwrap(), vec![index]);

    let foreign = IndexDefinition::new("clinics").field("rating", IndexMode::Descending);
    assert!(matches!(
        client.create_index(foreign).await,
        Err(StoreError::InvalidIndex(_))
    ));

    let empty = IndexDefinition::new("listings");
    assert!(matches!(
        client.create_index(empty).await,
        Err(StoreError::InvalidIndex(_))
    ));
}

#[tokio::test]
async fn test_closed_store() {
    let counter = AtomicU32::new(1);
    let (actor, client) =
        ResourceActor::<Listing>::new(10, move || counter.fetch_add(1, Ordering::SeqCst));
    drop(actor);

    let result = client.get(1).await;
    assert!(matches!(result, Err(StoreError::ActorClosed)));
}
