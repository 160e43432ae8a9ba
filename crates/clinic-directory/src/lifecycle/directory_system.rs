use crate::auth::{AuthState, LocalIdentityProvider};
use crate::clients::ClinicClient;
use crate::clinic_actor;
use crate::config::{ConfigError, DirectoryConfig};
use crate::countries::CountryTable;
use crate::feed::ClinicFeed;
use crate::indexes;
use chrono::{DateTime, Utc};
use resource_store::StoreError;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to provision indexes: {0}")]
    Indexes(#[from] StoreError),

    #[error("Background task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// The runtime orchestrator of the clinic directory.
///
/// `DirectorySystem` is responsible for:
/// - **Reference data**: loading the country table once
/// - **Indexes**: declaring the composite indexes on the clinic store before it serves queries
/// - **Lifecycle Management**: starting and stopping the clinic store and the auth holder
/// - **Dependency Wiring**: handing the auth state and the listing feed to the clinic client
///
/// # Example
///
/// ```ignore
/// let system = DirectorySystem::new(&DirectoryConfig::from_env()?).await?;
///
/// system.identity.sign_in("uid-1", "owner@example.com");
/// system.auth.wait_for_user().await;
/// let id = system.clinic_client.add_clinic(NewClinic::default()).await?;
///
/// system.shutdown().await?;
/// ```
pub struct DirectorySystem {
    /// Repository over the `clinics` collection
    pub clinic_client: ClinicClient,

    /// The in-process identity provider; sign in and out through it
    pub identity: LocalIdentityProvider,

    /// Observable signed-in user
    pub auth: AuthState,

    /// Observable state of the latest listing fetch
    pub feed: ClinicFeed,

    /// Country and region reference data
    pub countries: Arc<CountryTable>,

    handles: Vec<JoinHandle<()>>,
}

impl DirectorySystem {
    /// Loads reference data, starts every background task and provisions the clinic indexes.
    pub async fn new(config: &DirectoryConfig) -> Result<Self, SystemError> {
        Self::with_clock(config, Utc::now).await
    }

    /// Like [`new`](Self::new), with the store clock replaced.
    pub async fn with_clock(
        config: &DirectoryConfig,
        clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Result<Self, SystemError> {
        let countries = CountryTable::load_or_embedded(config.countries_path.as_deref())?;

        // 1. Create the store and the identity provider
        let (clinic_actor, store) = clinic_actor::with_clock(config.store_buffer, clock);
        let identity = LocalIdentityProvider::new();

        // 2. Start them
        let store_handle = tokio::spawn(clinic_actor.run(()));
        let (auth, auth_handle) = AuthState::spawn(identity.subscribe());

        // 3. Declare the indexes the listings rely on
        let created = match indexes::provision(&store).await {
            Ok(created) => created,
            Err(e) => {
                error!(error = %e, "Index provisioning failed");
                return Err(e.into());
            }
        };

        // 4. Wire the repository
        let feed = ClinicFeed::new();
        let clinic_client = ClinicClient::new(store, auth.clone(), feed.clone())
            .with_page_limit(config.page_limit);

        info!(
            countries = countries.all_countries().len(),
            page_limit = config.page_limit,
            indexes = created,
            "Directory started"
        );

        Ok(Self {
            clinic_client,
            identity,
            auth,
            feed,
            countries: Arc::new(countries),
            handles: vec![store_handle, auth_handle],
        })
    }

    /// Gracefully shuts down the directory.
    ///
    /// Dropping the clinic client closes the store channel and dropping the identity provider
    /// ends the auth holder; both tasks are then awaited. Clones of the clinic client held
    /// elsewhere keep the store alive, so drop them first.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down directory...");

        drop(self.clinic_client);
        drop(self.identity);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Task failed during shutdown");
                return Err(e.into());
            }
        }

        info!("Directory shutdown complete.");
        Ok(())
    }
}
