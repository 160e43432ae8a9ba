use serde::{Deserialize, Serialize};

/// A practitioner listed on a clinic page.
///
/// Doctors are embedded in their [`Clinic`](super::Clinic) and have no lifecycle of their own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialization: String,
    /// Years of experience.
    pub experience: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
}
