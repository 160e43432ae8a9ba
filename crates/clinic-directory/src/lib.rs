//! # Clinic Directory Library
//!
//! Owners create, edit and publish clinic pages; visitors browse the published ones by
//! country, city, region, service, rating and price.
//!
//! - [`model`] - clinic, doctor and user types
//! - [`clinic_actor`] - the `clinics` collection on top of [`resource_store`]
//! - [`clients`] - [`ClinicClient`](clients::ClinicClient), the repository every operation goes through
//! - [`auth`], [`feed`] - observable signed-in user and listing state
//! - [`slug`], [`validation`], [`filters`], [`countries`] - pure helpers and reference data
//! - [`lifecycle`] - starts and stops the whole thing

pub mod auth;
pub mod clients;
pub mod clinic_actor;
pub mod config;
pub mod countries;
pub mod feed;
pub mod filters;
pub mod indexes;
pub mod lifecycle;
pub mod model;
pub mod slug;
pub mod validation;
