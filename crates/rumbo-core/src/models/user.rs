use std::fmt;

use serde::Serialize;

/// A signed-in user. Built from the decoded token subject, the normalized
/// email, and the bearer token itself; replaced wholesale on every session
/// change, never mutated in place.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// Token subject claim.
    pub id: String,
    /// Trimmed, lowercased email.
    pub email: String,
    /// The opaque bearer token. The secure store owns the persisted copy;
    /// this one lives only as long as the in-memory session.
    pub token: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Account-creation payload for `POST /clientes/registrar`.
#[derive(Clone, Serialize)]
pub struct RegisterData {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for RegisterData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterData")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_debug_redacts_token() {
        let user = User {
            id: "42".to_string(),
            email: "ana@mail.com".to_string(),
            token: "abc.def.ghi".to_string(),
        };
        let debug = format!("{:?}", user);
        assert!(debug.contains("ana@mail.com"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("abc.def.ghi"));
    }

    #[test]
    fn test_register_data_debug_redacts_password() {
        let data = RegisterData {
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
            email: "ana@mail.com".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{:?}", data);
        assert!(debug.contains("Ana"));
        assert!(!debug.contains("hunter2"));
    }
}
