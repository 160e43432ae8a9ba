//! # Clinic Directory
//!
//! Runs one owner's session against an in-process directory:
//! 1.  Loading the configuration and starting the [`DirectorySystem`].
//! 2.  Signing in and creating a draft clinic.
//! 3.  Completing it, publishing it and finding it in the public listing.
//!
//! Requires `CLINIC_API_KEY` and `CLINIC_AUTH_DOMAIN` (a `.env` file works). Set `RUST_LOG=info`
//! to see the flow.

use clinic_directory::config::DirectoryConfig;
use clinic_directory::filters::ClinicFilters;
use clinic_directory::lifecycle::DirectorySystem;
use clinic_directory::model::{
    clinic_url, draft_clinic_name, Address, ClinicDraft, Contact, DayHours, Doctor, NewClinic,
    PriceRange,
};
use resource_store::tracing::setup_tracing;
use std::error::Error;
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = DirectoryConfig::from_env()?;
    info!(auth_domain = %config.auth_domain, "Starting clinic directory");

    let system = DirectorySystem::new(&config).await?;

    system.identity.sign_in("owner-1", "owner@example.com");
    let owner = system
        .auth
        .wait_for_user()
        .await
        .ok_or("identity provider closed before sign-in")?;
    info!(user_id = %owner.id, "Owner signed in");

    // Create a draft
    let span = tracing::info_span!("clinic_creation");
    let clinic_id = async {
        info!("Creating draft clinic");
        system
            .clinic_client
            .add_clinic(NewClinic {
                name: draft_clinic_name(),
                ..NewClinic::default()
            })
            .await
    }
    .instrument(span)
    .await?;

    // Complete it
    let mut operating_hours = NewClinic::default().operating_hours;
    for hours in operating_hours.values_mut() {
        *hours = DayHours::new("08:00", "18:00");
    }
    let changes = ClinicDraft {
        name: Some("Smile Dental Berlin".to_string()),
        description: Some("Family and cosmetic dentistry in Mitte.".to_string()),
        address: Some(Address {
            street: "Torstraße 1".to_string(),
            city: "Berlin".to_string(),
            country: "DE".to_string(),
            region: Some("BE".to_string()),
            postal_code: "10119".to_string(),
        }),
        services: Some(vec!["dental".to_string(), "xray".to_string()]),
        price_range: Some(PriceRange {
            min: 40.0,
            max: 900.0,
            currency: "€".to_string(),
        }),
        contact: Some(Contact {
            phone: "+49 30 000000".to_string(),
            email: "hello@smile.example".to_string(),
            website: None,
        }),
        operating_hours: Some(operating_hours),
        doctors: Some(vec![Doctor {
            id: "doc-1".to_string(),
            name: "Dr. Lena Vogel".to_string(),
            specialization: "Orthodontics".to_string(),
            experience: 11,
            image: None,
            qualifications: vec!["DDS".to_string()],
        }]),
        rating: Some(4.7),
        ..ClinicDraft::default()
    };

    let span = tracing::info_span!("clinic_publishing");
    let published = async {
        let clinic = system
            .clinic_client
            .update_clinic(clinic_id, changes)
            .await?;
        info!(slug = %clinic.slug, "Clinic completed");
        system.clinic_client.publish_validated(clinic_id).await?;
        Ok::<_, clinic_directory::clinic_actor::ClinicError>(clinic)
    }
    .instrument(span)
    .await;

    match published {
        Ok(clinic) => info!(url = %clinic_url(&clinic, &system.countries), "Clinic published"),
        Err(e) => error!(error = %e, "Publishing failed"),
    }

    // Browse
    let listing = system
        .clinic_client
        .fetch_published_clinics(&ClinicFilters {
            countries: vec!["DE".to_string()],
            services: vec!["xray".to_string()],
            ..ClinicFilters::default()
        })
        .await;
    if listing.truncated {
        warn!("Listing was truncated");
    }
    for clinic in &listing.clinics {
        info!(
            name = %clinic.name,
            country = system.countries.country_name(&clinic.address.country),
            rating = clinic.rating,
            "Listed"
        );
    }

    let mine = system.clinic_client.fetch_my_clinics().await;
    info!(count = mine.clinics.len(), "Owner clinics");

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
