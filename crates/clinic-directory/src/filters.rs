//! # Listing Filters
//!
//! A [`ClinicFilters`] value is split in two. The store evaluates the part it can index
//! (status, countries, minimum rating) together with the rating order and the page cap; the
//! rest (services, city, region, price bounds) is applied in memory to the page that comes
//! back.
//!
//! Because the cap is applied before the in-memory filters, a full page combined with
//! secondary filters may hide matches that ranked below the cap. Callers detect this with
//! [`ClinicFilters::has_secondary_filters`].

use crate::model::{Clinic, ClinicStatus};
use resource_store::{Direction, Filter, Query};

/// Filters of the public clinic listing. Empty lists and `None` mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClinicFilters {
    /// Country codes; a clinic matches any of them.
    pub countries: Vec<String>,
    /// Exact region code.
    pub region: Option<String>,
    /// Case-insensitive substring of the city.
    pub city: Option<String>,
    /// A clinic must offer every listed service.
    pub services: Vec<String>,
    /// Inclusive lower bound on the rating. Zero and NaN mean no constraint.
    pub min_rating: Option<f64>,
    /// Inclusive lower bound on the cheapest price.
    pub min_price: Option<f64>,
    /// Inclusive upper bound on the most expensive price.
    pub max_price: Option<f64>,
}

impl ClinicFilters {
    /// The store-side query: published clinics, best rated first, at most `cap` of them.
    pub fn server_query(&self, cap: usize) -> Query {
        let mut query =
            Query::new().filter(Filter::eq("status", ClinicStatus::Published.as_str()));

        if !self.countries.is_empty() {
            query = query.filter(Filter::is_in("address.country", self.countries.clone()));
        }
        let min_rating = self
            .min_rating
            .filter(|rating| !rating.is_nan() && *rating != 0.0);
        if let Some(min_rating) = min_rating {
            query = query.filter(Filter::gte("rating", min_rating));
        }

        query.order_by("rating", Direction::Descending).limit(cap)
    }

    /// Whether any filter is evaluated in memory after the capped fetch.
    pub fn has_secondary_filters(&self) -> bool {
        !self.services.is_empty()
            || self.city_needle().is_some()
            || self.region_filter().is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
    }

    /// Applies the in-memory filters, keeping the store's order.
    pub fn apply_secondary(&self, clinics: Vec<Clinic>) -> Vec<Clinic> {
        let needle = self.city_needle();
        clinics
            .into_iter()
            .filter(|clinic| self.matches_secondary(clinic, needle.as_deref()))
            .collect()
    }

    fn matches_secondary(&self, clinic: &Clinic, city_needle: Option<&str>) -> bool {
        let offers_services = self
            .services
            .iter()
            .all(|service| clinic.services.contains(service));
        let in_city = city_needle
            .map_or(true, |needle| clinic.address.city.to_lowercase().contains(needle));
        let in_region = self
            .region_filter()
            .map_or(true, |region| clinic.address.region.as_deref() == Some(region));
        let above_min = self
            .min_price
            .map_or(true, |min| clinic.price_range.min >= min);
        let below_max = self
            .max_price
            .map_or(true, |max| clinic.price_range.max <= max);

        offers_services && in_city && in_region && above_min && below_max
    }

    fn city_needle(&self) -> Option<String> {
        self.city
            .as_deref()
            .filter(|city| !city.is_empty())
            .map(str::to_lowercase)
    }

    fn region_filter(&self) -> Option<&str> {
        self.region.as_deref().filter(|region| !region.is_empty())
    }
}
