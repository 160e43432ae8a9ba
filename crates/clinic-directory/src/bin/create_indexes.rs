//! Checks the composite indexes of the `clinics` collection.
//!
//! Every [`DirectorySystem`](clinic_directory::lifecycle::DirectorySystem) declares these
//! indexes on its own store at startup. This tool declares them on a scratch store, so a bad
//! definition fails here with a non-zero exit before any directory starts.
//!
//! Needs `CLINIC_PROJECT_ID`, `CLINIC_CLIENT_EMAIL` and `CLINIC_PRIVATE_KEY`. Exits non-zero on
//! any failure.

use clinic_directory::clinic_actor;
use clinic_directory::config::{AdminCredentials, DEFAULT_STORE_BUFFER};
use clinic_directory::indexes::provision;
use resource_store::tracing::setup_tracing;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();

    let credentials = match AdminCredentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!(error = %e, "Error creating indexes");
            return ExitCode::FAILURE;
        }
    };
    info!(
        project_id = %credentials.project_id,
        client_email = %credentials.client_email,
        "Provisioning indexes"
    );

    let (actor, store) = clinic_actor::new(DEFAULT_STORE_BUFFER);
    let handle = tokio::spawn(actor.run(()));

    let result = provision(&store).await;
    drop(store);
    if let Err(e) = handle.await {
        error!(error = %e, "Store task failed");
        return ExitCode::FAILURE;
    }

    match result {
        Ok(created) => {
            info!(created, "All indexes created successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Error creating indexes");
            ExitCode::FAILURE
        }
    }
}
