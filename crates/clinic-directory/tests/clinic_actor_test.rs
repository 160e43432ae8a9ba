use chrono::{TimeZone, Utc};
use clinic_directory::clinic_actor::{self, ClinicAction, ClinicEntityError};
use clinic_directory::model::{ClinicCreate, ClinicDraft, ClinicStatus, ClinicUpdate, NewClinic};
use resource_store::StoreError;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

fn create(slug: &str, user_id: &str) -> ClinicCreate {
    ClinicCreate {
        slug: slug.to_string(),
        user_id: user_id.to_string(),
        clinic: NewClinic {
            name: "Smile Dental".to_string(),
            ..NewClinic::default()
        },
    }
}

fn entity_error(err: StoreError) -> ClinicEntityError {
    match err {
        StoreError::EntityError(e) => e
            .downcast_ref::<ClinicEntityError>()
            .cloned()
            .expect("clinic entity error"),
        other => panic!("expected an entity error, got {other:?}"),
    }
}

/// Real Clinic actor: the store assigns the draft status and both timestamps.
#[tokio::test]
async fn test_create_stamps_and_drafts() {
    let ticks = Arc::new(AtomicI64::new(0));
    let clock = {
        let ticks = ticks.clone();
        move || Utc.timestamp_opt(1_700_000_000 + ticks.fetch_add(10, Ordering::SeqCst), 0).unwrap()
    };
    let (actor, store) = clinic_actor::with_clock(8, clock);
    let handle = tokio::spawn(actor.run(()));

    let id = store.create(create("smile-dental", "owner-1")).await.unwrap();
    let clinic = store.get(id).await.unwrap().unwrap();
    assert_eq!(clinic.id, id);
    assert_eq!(clinic.status, ClinicStatus::Draft);
    assert_eq!(clinic.user_id, "owner-1");
    assert_eq!(clinic.created_at, Utc.timestamp_opt(1_700_000_000, 0).unwrap());
    assert_eq!(clinic.updated_at, clinic.created_at);

    let updated = store
        .update(
            id,
            ClinicUpdate {
                changes: ClinicDraft {
                    description: Some("Family dentistry".to_string()),
                    ..ClinicDraft::default()
                },
                slug: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.description, "Family dentistry");
    assert_eq!(updated.name, "Smile Dental");
    assert_eq!(updated.created_at, clinic.created_at);
    assert_eq!(updated.updated_at, Utc.timestamp_opt(1_700_000_010, 0).unwrap());

    drop(store);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_create_rejects_bad_payloads() {
    let (actor, store) = clinic_actor::new(8);
    tokio::spawn(actor.run(()));

    let err = store.create(create("Smile Dental", "owner-1")).await.unwrap_err();
    assert_eq!(
        entity_error(err),
        ClinicEntityError::InvalidSlug("Smile Dental".to_string())
    );

    let err = store.create(create("smile-dental", "")).await.unwrap_err();
    assert_eq!(entity_error(err), ClinicEntityError::MissingOwner);

    // Nothing was stored.
    assert!(store.query(Default::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_rejects_bad_slug() {
    let (actor, store) = clinic_actor::new(8);
    tokio::spawn(actor.run(()));
    let id = store.create(create("smile-dental", "owner-1")).await.unwrap();

    let err = store
        .update(
            id,
            ClinicUpdate {
                changes: ClinicDraft {
                    name: Some("Bright".to_string()),
                    ..ClinicDraft::default()
                },
                slug: Some("-bright".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        entity_error(err),
        ClinicEntityError::InvalidSlug("-bright".to_string())
    );

    let clinic = store.get(id).await.unwrap().unwrap();
    assert_eq!(clinic.slug, "smile-dental");
    assert_eq!(clinic.name, "Smile Dental");
}

#[tokio::test]
async fn test_publish_actions() {
    let (actor, store) = clinic_actor::new(8);
    tokio::spawn(actor.run(()));
    let id = store.create(create("smile-dental", "owner-1")).await.unwrap();

    let status = store.perform_action(id, ClinicAction::Publish).await.unwrap();
    assert_eq!(status, ClinicStatus::Published);
    // Publishing twice is harmless.
    let status = store.perform_action(id, ClinicAction::Publish).await.unwrap();
    assert_eq!(status, ClinicStatus::Published);

    let status = store.perform_action(id, ClinicAction::Unpublish).await.unwrap();
    assert_eq!(status, ClinicStatus::Draft);
    assert_eq!(
        store.get(id).await.unwrap().unwrap().status,
        ClinicStatus::Draft
    );

    let missing = clinic_directory::model::ClinicId::new();
    let err = store
        .perform_action(missing, ClinicAction::Publish)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound(id) if id == missing.to_string()));
}
