use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access level of a signed-in user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// The signed-in user as seen by the directory.
///
/// Built from the identity provider's notification; the role is not read back from stored
/// profile data, so every user starts as [`Role::User`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a user with the default role.
    ///
    /// # Arguments
    /// * `id` - Opaque provider id
    /// * `email` - Email reported by the provider
    /// * `created_at` - When the identity was observed
    pub fn new(id: impl Into<String>, email: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            role: Role::default(),
            created_at,
        }
    }
}
