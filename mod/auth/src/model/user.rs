use serde::{Deserialize, Serialize};

/// The role a user holds. Drives the AccessPolicy lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Usuario,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Usuario => "usuario",
        }
    }
}

/// A stored user record. The email is the unique key (case-sensitive, exact
/// match) across the collection.
///
/// Serialized field names match the persisted `crm_users` layout, so an
/// existing store written by an earlier deployment loads unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier within the user collection.
    pub email: String,

    /// Plaintext password, compared exactly at login.
    pub password: String,

    /// Role, consulted by the AccessPolicy.
    pub role: Role,

    /// Display name.
    pub name: String,

    /// RFC 3339 creation timestamp, stamped by the service.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Input for creating a new user. `created_at` is stamped on insert.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub name: String,
}

/// Partial update for a user. Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub name: Option<String>,
}
