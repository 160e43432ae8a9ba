//! # Publish Readiness
//!
//! Checks a partial clinic record against the fields a clinic needs before it can be
//! published. The check is pure and total: it never fails, it only reports.
//!
//! A field counts as missing when it is absent or blank: an empty string, a zero number or an
//! empty list. A missing parent object (`address`) flags each of its required children.

use crate::model::{ClinicDraft, Doctor, WEEKDAYS};

/// Outcome of a readiness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// Dotted paths of the missing fields, in check order.
    Invalid { missing_fields: Vec<String> },
}

impl Validation {
    fn from_missing(missing_fields: Vec<String>) -> Self {
        if missing_fields.is_empty() {
            Validation::Valid
        } else {
            Validation::Invalid { missing_fields }
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn missing_fields(&self) -> &[String] {
        match self {
            Validation::Valid => &[],
            Validation::Invalid { missing_fields } => missing_fields,
        }
    }
}

struct RequiredField<T> {
    path: &'static str,
    present: fn(&T) -> bool,
}

const CLINIC_FIELDS: [RequiredField<ClinicDraft>; 13] = [
    RequiredField {
        path: "name",
        present: |c| filled(c.name.as_deref()),
    },
    RequiredField {
        path: "description",
        present: |c| filled(c.description.as_deref()),
    },
    RequiredField {
        path: "address.street",
        present: |c| filled(c.address.as_ref().map(|a| a.street.as_str())),
    },
    RequiredField {
        path: "address.city",
        present: |c| filled(c.address.as_ref().map(|a| a.city.as_str())),
    },
    RequiredField {
        path: "address.country",
        present: |c| filled(c.address.as_ref().map(|a| a.country.as_str())),
    },
    RequiredField {
        path: "address.postalCode",
        present: |c| filled(c.address.as_ref().map(|a| a.postal_code.as_str())),
    },
    RequiredField {
        path: "contact.phone",
        present: |c| filled(c.contact.as_ref().map(|c| c.phone.as_str())),
    },
    RequiredField {
        path: "contact.email",
        present: |c| filled(c.contact.as_ref().map(|c| c.email.as_str())),
    },
    RequiredField {
        path: "services",
        present: |c| c.services.as_ref().is_some_and(|s| !s.is_empty()),
    },
    RequiredField {
        path: "priceRange.min",
        present: |c| c.price_range.as_ref().is_some_and(|p| p.min != 0.0),
    },
    RequiredField {
        path: "priceRange.max",
        present: |c| c.price_range.as_ref().is_some_and(|p| p.max != 0.0),
    },
    RequiredField {
        path: "priceRange.currency",
        present: |c| filled(c.price_range.as_ref().map(|p| p.currency.as_str())),
    },
    RequiredField {
        path: "operatingHours",
        present: |c| c.operating_hours.is_some(),
    },
];

const DOCTOR_FIELDS: [RequiredField<Doctor>; 4] = [
    RequiredField {
        path: "name",
        present: |d| !d.name.is_empty(),
    },
    RequiredField {
        path: "specialization",
        present: |d| !d.specialization.is_empty(),
    },
    RequiredField {
        path: "experience",
        present: |d| d.experience != 0,
    },
    RequiredField {
        path: "qualifications",
        present: |d| !d.qualifications.is_empty(),
    },
];

fn filled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

fn missing<T>(fields: &[RequiredField<T>], record: &T) -> Vec<String> {
    fields
        .iter()
        .filter(|field| !(field.present)(record))
        .map(|field| field.path.to_string())
        .collect()
}

/// Paths every published clinic must fill, in check order.
pub fn required_clinic_fields() -> impl Iterator<Item = &'static str> {
    CLINIC_FIELDS.iter().map(|field| field.path)
}

/// Checks one embedded doctor.
pub fn validate_doctor(doctor: &Doctor) -> Validation {
    Validation::from_missing(missing(&DOCTOR_FIELDS, doctor))
}

/// Checks whether `clinic` is complete enough to publish.
///
/// Reports, in order: the required top-level paths, `operatingHours.<day>` for each weekday
/// (monday to friday) without both an opening and a closing time, and
/// `doctors[<index>].<field>` for each incomplete doctor.
///
/// ```rust
/// use clinic_directory::model::ClinicDraft;
/// use clinic_directory::validation::validate_clinic;
///
/// let result = validate_clinic(&ClinicDraft::default());
/// assert!(result.missing_fields().contains(&"operatingHours.friday".to_string()));
/// ```
pub fn validate_clinic(clinic: &ClinicDraft) -> Validation {
    let mut missing_fields = missing(&CLINIC_FIELDS, clinic);

    for day in WEEKDAYS {
        let open = clinic
            .operating_hours
            .as_ref()
            .and_then(|hours| hours.get(day))
            .is_some_and(|hours| !hours.open.is_empty() && !hours.close.is_empty());
        if !open {
            missing_fields.push(format!("operatingHours.{day}"));
        }
    }

    for (index, doctor) in clinic.doctors.iter().flatten().enumerate() {
        missing_fields.extend(
            validate_doctor(doctor)
                .missing_fields()
                .iter()
                .map(|field| format!("doctors[{index}].{field}")),
        );
    }

    Validation::from_missing(missing_fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, Contact, DayHours, NewClinic, PriceRange};

    fn doctor() -> Doctor {
        Doctor {
            id: "d1".to_string(),
            name: "Dr. Anna Weber".to_string(),
            specialization: "Orthodontics".to_string(),
            experience: 12,
            image: None,
            qualifications: vec!["DDS".to_string()],
        }
    }

    fn complete_clinic() -> ClinicDraft {
        let mut clinic = NewClinic {
            name: "Smile Dental".to_string(),
            description: "Family dentistry".to_string(),
            address: Address {
                street: "Hauptstr. 1".to_string(),
                city: "Berlin".to_string(),
                country: "DE".to_string(),
                region: Some("BE".to_string()),
                postal_code: "10115".to_string(),
            },
            services: vec!["dental".to_string()],
            price_range: PriceRange {
                min: 40.0,
                max: 300.0,
                currency: "€".to_string(),
            },
            contact: Contact {
                phone: "+49 30 1234".to_string(),
                email: "info@smile.example".to_string(),
                website: None,
            },
            doctors: vec![doctor()],
            ..NewClinic::default()
        };
        for hours in clinic.operating_hours.values_mut() {
            *hours = DayHours::new("09:00", "17:00");
        }
        clinic.into()
    }

    #[test]
    fn test_complete_clinic_is_valid() {
        assert_eq!(validate_clinic(&complete_clinic()), Validation::Valid);
    }

    #[test]
    fn test_empty_record_flags_everything() {
        let result = validate_clinic(&ClinicDraft::default());

        let mut expected: Vec<String> = required_clinic_fields().map(String::from).collect();
        expected.extend(WEEKDAYS.iter().map(|day| format!("operatingHours.{day}")));
        assert_eq!(result.missing_fields(), expected.as_slice());
        assert!(!result.is_valid());
    }

    #[test]
    fn test_services_reported_once() {
        let mut clinic = complete_clinic();
        clinic.services = Some(Vec::new());

        let result = validate_clinic(&clinic);
        assert_eq!(result.missing_fields(), ["services".to_string()]);
    }

    #[test]
    fn test_zero_price_counts_as_missing() {
        let mut clinic = complete_clinic();
        clinic.price_range = Some(PriceRange {
            min: 0.0,
            ..PriceRange::default()
        });

        let result = validate_clinic(&clinic);
        assert_eq!(
            result.missing_fields(),
            ["priceRange.min".to_string(), "priceRange.max".to_string()]
        );
    }

    #[test]
    fn test_partial_weekday_hours() {
        let mut clinic = complete_clinic();
        let hours = clinic.operating_hours.as_mut().unwrap();
        hours.insert("tuesday".to_string(), DayHours::new("09:00", ""));
        hours.remove("friday");
        hours.insert("saturday".to_string(), DayHours::default());

        let result = validate_clinic(&clinic);
        assert_eq!(
            result.missing_fields(),
            [
                "operatingHours.tuesday".to_string(),
                "operatingHours.friday".to_string()
            ]
        );
    }

    #[test]
    fn test_empty_template_flags_weekdays_but_not_currency() {
        let result = validate_clinic(&NewClinic::default().into());
        let missing = result.missing_fields();

        assert!(!missing.contains(&"priceRange.currency".to_string()));
        assert!(!missing.contains(&"operatingHours".to_string()));
        assert!(missing.contains(&"operatingHours.monday".to_string()));
    }

    #[test]
    fn test_doctor_without_qualifications() {
        let mut incomplete = doctor();
        incomplete.qualifications.clear();

        let result = validate_doctor(&incomplete);
        assert_eq!(result.missing_fields(), ["qualifications".to_string()]);
    }

    #[test]
    fn test_doctor_fields_are_indexed() {
        let mut clinic = complete_clinic();
        let mut second = doctor();
        second.name.clear();
        second.experience = 0;
        clinic.doctors = Some(vec![doctor(), second]);

        let result = validate_clinic(&clinic);
        assert_eq!(
            result.missing_fields(),
            [
                "doctors[1].name".to_string(),
                "doctors[1].experience".to_string()
            ]
        );
    }
}
