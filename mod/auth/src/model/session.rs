use serde::{Deserialize, Serialize};

use crate::model::Role;

/// The single active session: a projection of a User taken at login time.
/// The password is never copied into the session.
///
/// Serialized field names match the persisted `crm_session` layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Email of the authenticated user.
    pub email: String,

    /// Display name, copied from the user record.
    pub name: String,

    /// Role at login time. A later role change on the user record does not
    /// update an existing session.
    pub role: Role,

    /// RFC 3339 timestamp of the login.
    #[serde(rename = "loginAt")]
    pub login_at: String,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_wire_field_names() {
        let session = Session {
            email: "a@b.c".into(),
            name: "A".into(),
            role: Role::Admin,
            login_at: "2024-01-01T00:00:00+00:00".into(),
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["loginAt"], "2024-01-01T00:00:00+00:00");
        assert_eq!(json["role"], "admin");
        assert!(json.get("login_at").is_none());
    }
}
