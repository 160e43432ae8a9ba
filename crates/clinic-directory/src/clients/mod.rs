//! Domain clients wrapping the generic store clients.

pub mod clinic_client;

pub use clinic_client::ClinicClient;
