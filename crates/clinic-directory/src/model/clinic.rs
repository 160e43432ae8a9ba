use super::Doctor;
use crate::countries::CountryTable;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Weekdays every published clinic must list opening hours for.
pub const WEEKDAYS: [&str; 5] = ["monday", "tuesday", "wednesday", "thursday", "friday"];

/// Currency a fresh clinic is priced in.
pub const DEFAULT_CURRENCY: &str = "€";

/// Store-assigned identifier of a clinic document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClinicId(pub Uuid);

impl ClinicId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClinicId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClinicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Whether a clinic is visible in public listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClinicStatus {
    #[default]
    Draft,
    Published,
}

impl ClinicStatus {
    /// The serialized form, as used in store queries.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClinicStatus::Draft => "draft",
            ClinicStatus::Published => "published",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    /// Country code, e.g. `DE`.
    pub country: String,
    /// Region code within the country, e.g. `BY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub postal_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub currency: String,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 0.0,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMedia {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

/// Opening and closing time of one day, as free-form strings (`"09:00"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: String,
    pub close: String,
}

impl DayHours {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

/// Weekday name (`"monday"`) to hours.
pub type OperatingHours = BTreeMap<String, DayHours>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Images {
    pub main: String,
    #[serde(default)]
    pub gallery: Vec<String>,
}

/// A clinic document as stored in the `clinics` collection.
///
/// # Store
/// This struct implements [`ActorEntity`](resource_store::ActorEntity) in
/// [`clinic_actor::entity`](crate::clinic_actor::entity). Its serialized field names are the
/// query paths: `status`, `slug`, `rating`, `userId`, `updatedAt`, `address.country`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clinic {
    pub id: ClinicId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub status: ClinicStatus,
    pub address: Address,
    pub services: Vec<String>,
    pub price_range: PriceRange,
    pub contact: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,
    pub operating_hours: OperatingHours,
    pub images: Images,
    pub doctors: Vec<Doctor>,
    pub rating: f64,
    pub review_count: u32,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The owner-editable part of a clinic: everything except identity, slug, status, owner and
/// timestamps, which the repository and the store assign.
///
/// `NewClinic::default()` is the empty template an owner starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClinic {
    pub name: String,
    pub description: String,
    pub address: Address,
    pub services: Vec<String>,
    pub price_range: PriceRange,
    pub contact: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,
    pub operating_hours: OperatingHours,
    pub images: Images,
    pub doctors: Vec<Doctor>,
    pub rating: f64,
    pub review_count: u32,
}

impl Default for NewClinic {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            address: Address::default(),
            services: Vec::new(),
            price_range: PriceRange::default(),
            contact: Contact::default(),
            social_media: Some(SocialMedia::default()),
            operating_hours: WEEKDAYS
                .iter()
                .map(|day| (day.to_string(), DayHours::default()))
                .collect(),
            images: Images::default(),
            doctors: Vec::new(),
            rating: 0.0,
            review_count: 0,
        }
    }
}

/// Create payload sent to the store: the owner's data plus the assigned slug and owner id.
#[derive(Debug, Clone)]
pub struct ClinicCreate {
    pub slug: String,
    pub user_id: String,
    pub clinic: NewClinic,
}

/// A partial clinic record. Every field is optional.
///
/// Serves as the update payload (only present fields are written) and as the input of
/// [`validate_clinic`](crate::validation::validate_clinic).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClinicDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<Address>,
    pub services: Option<Vec<String>>,
    pub price_range: Option<PriceRange>,
    pub contact: Option<Contact>,
    pub social_media: Option<SocialMedia>,
    pub operating_hours: Option<OperatingHours>,
    pub images: Option<Images>,
    pub doctors: Option<Vec<Doctor>>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
}

impl From<NewClinic> for ClinicDraft {
    fn from(clinic: NewClinic) -> Self {
        Self {
            name: Some(clinic.name),
            description: Some(clinic.description),
            address: Some(clinic.address),
            services: Some(clinic.services),
            price_range: Some(clinic.price_range),
            contact: Some(clinic.contact),
            social_media: clinic.social_media,
            operating_hours: Some(clinic.operating_hours),
            images: Some(clinic.images),
            doctors: Some(clinic.doctors),
            rating: Some(clinic.rating),
            review_count: Some(clinic.review_count),
        }
    }
}

impl From<&Clinic> for ClinicDraft {
    fn from(clinic: &Clinic) -> Self {
        Self {
            name: Some(clinic.name.clone()),
            description: Some(clinic.description.clone()),
            address: Some(clinic.address.clone()),
            services: Some(clinic.services.clone()),
            price_range: Some(clinic.price_range.clone()),
            contact: Some(clinic.contact.clone()),
            social_media: clinic.social_media.clone(),
            operating_hours: Some(clinic.operating_hours.clone()),
            images: Some(clinic.images.clone()),
            doctors: Some(clinic.doctors.clone()),
            rating: Some(clinic.rating),
            review_count: Some(clinic.review_count),
        }
    }
}

/// Update payload sent to the store. `slug` is set by the repository when a rename needs a
/// fresh one.
#[derive(Debug, Clone, Default)]
pub struct ClinicUpdate {
    pub changes: ClinicDraft,
    pub slug: Option<String>,
}

/// Public path of a clinic page: `/clinics/<country-slug>/<clinic-slug>`.
pub fn clinic_url(clinic: &Clinic, countries: &CountryTable) -> String {
    format!(
        "/clinics/{}/{}",
        countries.country_slug(&clinic.address.country),
        clinic.slug
    )
}

/// A placeholder name for a clinic an owner has not named yet, e.g. `Draft Clinic 4821`.
pub fn draft_clinic_name() -> String {
    draft_clinic_name_with(&mut rand::thread_rng())
}

pub fn draft_clinic_name_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("Draft Clinic {}", rng.gen_range(0..10_000))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    #[test]
    fn test_empty_template() {
        let clinic = NewClinic::default();
        assert_eq!(clinic.price_range.currency, "€");
        assert_eq!(clinic.operating_hours.len(), 5);
        assert!(WEEKDAYS
            .iter()
            .all(|day| clinic.operating_hours[*day] == DayHours::default()));
        assert!(clinic.services.is_empty());
        assert_eq!(clinic.review_count, 0);
    }

    #[test]
    fn test_draft_names_are_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let name = draft_clinic_name_with(&mut rng);
            let number: u32 = name
                .strip_prefix("Draft Clinic ")
                .and_then(|n| n.parse().ok())
                .unwrap();
            assert!(number < 10_000);
        }
        assert!(draft_clinic_name().starts_with("Draft Clinic "));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ClinicStatus::Published).unwrap(), json!("published"));
        assert_eq!(ClinicStatus::Draft.as_str(), "draft");
    }

    #[test]
    fn test_draft_deserializes_partial_json() {
        let draft: ClinicDraft = serde_json::from_value(json!({
            "name": "Smile Dental",
            "priceRange": { "min": 20.0, "max": 90.0, "currency": "€" }
        }))
        .unwrap();

        assert_eq!(draft.name.as_deref(), Some("Smile Dental"));
        assert_eq!(draft.price_range.map(|p| p.max), Some(90.0));
        assert!(draft.address.is_none());
    }
}
