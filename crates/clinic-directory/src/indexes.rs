//! Composite indexes the clinic listings rely on.

use crate::model::Clinic;
use resource_store::{ActorEntity, IndexDefinition, IndexMode, ResourceClient, StoreError};
use tracing::info;

/// Country listing, city listing and service listing, each best rated first.
pub fn clinic_indexes() -> Vec<IndexDefinition> {
    vec![
        IndexDefinition::new(Clinic::COLLECTION)
            .field("address.country", IndexMode::Ascending)
            .field("rating", IndexMode::Descending),
        IndexDefinition::new(Clinic::COLLECTION)
            .field("address.city", IndexMode::Ascending)
            .field("rating", IndexMode::Descending),
        IndexDefinition::new(Clinic::COLLECTION)
            .field("services", IndexMode::ArrayContains)
            .field("rating", IndexMode::Descending),
    ]
}

/// Declares every clinic index, stopping at the first failure.
///
/// Returns how many were new; existing ones are left as they are.
pub async fn provision(store: &ResourceClient<Clinic>) -> Result<usize, StoreError> {
    let mut created = 0;
    for index in clinic_indexes() {
        if store.create_index(index.clone()).await? {
            info!(%index, "Created index");
            created += 1;
        } else {
            info!(%index, "Index already exists");
        }
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clinic_actor;

    #[tokio::test]
    async fn test_provision_is_idempotent() {
        let (actor, store) = clinic_actor::new(8);
        tokio::spawn(actor.run(()));

        assert_eq!(provision(&store).await.unwrap(), 3);
        assert_eq!(provision(&store).await.unwrap(), 0);
        assert_eq!(store.list_indexes().await.unwrap(), clinic_indexes());
    }

    #[test]
    fn test_index_shapes() {
        let rendered: Vec<String> = clinic_indexes().iter().map(|i| i.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "clinics(address.country ASC, rating DESC)",
                "clinics(address.city ASC, rating DESC)",
                "clinics(services ARRAY_CONTAINS, rating DESC)",
            ]
        );
    }
}
