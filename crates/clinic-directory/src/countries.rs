//! # Country & Region Table
//!
//! Static reference data mapping country codes to display names and URL slugs, with optional
//! regions per country. The table is parsed once at startup, from the copy embedded in the
//! binary or from a file named in the configuration, and is read-only afterwards.
//!
//! ```rust
//! use clinic_directory::countries::CountryTable;
//!
//! let table = CountryTable::embedded().unwrap();
//! assert_eq!(table.country_name("DE"), "Germany");
//! assert_eq!(table.country_code_by_slug("germany"), Some("DE"));
//! assert_eq!(table.region_name("DE", "BY"), Some("Bavaria"));
//! ```

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::info;

const EMBEDDED_COUNTRIES: &str = include_str!("../data/countries.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
    pub slug: String,
    /// Region code to region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<BTreeMap<String, Region>>,
}

/// A region resolved from its slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMatch<'a> {
    pub code: &'a str,
    pub name: &'a str,
}

#[derive(Deserialize)]
struct CountryFile {
    countries: Vec<Country>,
}

/// Lookup table over the country list.
#[derive(Debug, Clone)]
pub struct CountryTable {
    countries: Vec<Country>,
    by_code: HashMap<String, usize>,
    code_by_slug: HashMap<String, String>,
    region_code_by_slug: HashMap<String, HashMap<String, String>>,
}

impl CountryTable {
    /// The table shipped with the binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(EMBEDDED_COUNTRIES)
    }

    /// Reads the table from a JSON file of the form `{ "countries": [...] }`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::ReadReferenceData {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let table = Self::from_json(&raw)?;
        info!(path = %path.display(), countries = table.countries.len(), "Loaded country table");
        Ok(table)
    }

    /// The embedded table, or the file at `path` when one is given.
    pub fn load_or_embedded(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Self::embedded(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let file: CountryFile = serde_json::from_str(raw)?;
        Ok(Self::new(file.countries))
    }

    pub fn new(countries: Vec<Country>) -> Self {
        let by_code = countries
            .iter()
            .enumerate()
            .map(|(position, country)| (country.code.clone(), position))
            .collect();
        let code_by_slug = countries
            .iter()
            .map(|country| (country.slug.clone(), country.code.clone()))
            .collect();
        let region_code_by_slug = countries
            .iter()
            .filter_map(|country| {
                let regions = country.regions.as_ref()?;
                let slugs = regions
                    .iter()
                    .map(|(code, region)| (region.slug.clone(), code.clone()))
                    .collect();
                Some((country.code.clone(), slugs))
            })
            .collect();

        Self {
            countries,
            by_code,
            code_by_slug,
            region_code_by_slug,
        }
    }

    pub fn country(&self, code: &str) -> Option<&Country> {
        self.by_code
            .get(code)
            .and_then(|position| self.countries.get(*position))
    }

    /// Display name, or the code itself when unknown.
    pub fn country_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.country(code).map_or(code, |country| country.name.as_str())
    }

    /// URL slug, or the lower-cased code when unknown.
    pub fn country_slug(&self, code: &str) -> String {
        self.country(code)
            .map_or_else(|| code.to_lowercase(), |country| country.slug.clone())
    }

    pub fn country_by_slug(&self, slug: &str) -> Option<&Country> {
        self.country_code_by_slug(slug)
            .and_then(|code| self.country(code))
    }

    pub fn country_code_by_slug(&self, slug: &str) -> Option<&str> {
        self.code_by_slug.get(slug).map(String::as_str)
    }

    pub fn is_valid_country_code(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    pub fn regions(&self, country_code: &str) -> Option<&BTreeMap<String, Region>> {
        self.country(country_code)?.regions.as_ref()
    }

    pub fn region_name(&self, country_code: &str, region_code: &str) -> Option<&str> {
        self.region(country_code, region_code)
            .map(|region| region.name.as_str())
    }

    pub fn region_slug(&self, country_code: &str, region_code: &str) -> Option<&str> {
        self.region(country_code, region_code)
            .map(|region| region.slug.as_str())
    }

    pub fn region_by_slug(&self, country_code: &str, slug: &str) -> Option<RegionMatch<'_>> {
        let code = self.region_code_by_slug.get(country_code)?.get(slug)?;
        let (code, region) = self.regions(country_code)?.get_key_value(code.as_str())?;
        Some(RegionMatch {
            code: code.as_str(),
            name: region.name.as_str(),
        })
    }

    pub fn has_regions(&self, country_code: &str) -> bool {
        self.regions(country_code).is_some()
    }

    pub fn all_countries(&self) -> &[Country] {
        &self.countries
    }

    /// Country code to display name.
    pub fn country_names(&self) -> BTreeMap<&str, &str> {
        self.countries
            .iter()
            .map(|country| (country.code.as_str(), country.name.as_str()))
            .collect()
    }

    /// Country code to (region code to region name), for countries that have regions.
    pub fn region_names(&self) -> BTreeMap<&str, BTreeMap<&str, &str>> {
        self.countries
            .iter()
            .filter_map(|country| {
                let regions = country.regions.as_ref()?;
                let names = regions
                    .iter()
                    .map(|(code, region)| (code.as_str(), region.name.as_str()))
                    .collect();
                Some((country.code.as_str(), names))
            })
            .collect()
    }

    fn region(&self, country_code: &str, region_code: &str) -> Option<&Region> {
        self.regions(country_code)?.get(region_code)
    }
}

/// Flag image for a country code.
pub fn country_flag_url(code: &str) -> String {
    format!("https://flagcdn.com/{}.svg", code.to_lowercase())
}
