//! Input checks applied before any network call.
//!
//! These mirror what the login and registration screens enforce: all
//! fields present, a structurally plausible email, and a minimum password
//! length. The server performs the real credential checks; these exist to
//! fail fast on input that cannot possibly succeed.

/// Minimum password length the screens accept.
/// The service itself allows very short passwords; this only rejects
/// obviously truncated input.
pub const MIN_PASSWORD_LENGTH: usize = 2;

/// Canonical form of an email: trimmed and lowercased. Applied before
/// validation, before the login request, and before persisting.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Structural email check: exactly one `@`, a non-empty local part, and a
/// domain with a dot that is neither its first nor last character. No
/// whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let parts = email.split('@').collect::<Vec<_>>();
    if parts.len() != 2 {
        return false;
    }
    let (local, domain) = (parts[0], parts[1]);
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ana@Mail.COM "), "ana@mail.com");
        assert_eq!(normalize_email("a@b.com"), "a@b.com");
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("ana.silva@mail.example.org"));
        assert!(is_valid_email("a+tag@sub.domain.io"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@mail.com"));
        assert!(!is_valid_email("ana@"));
        assert!(!is_valid_email("ana@mail"));
        assert!(!is_valid_email("ana@.com"));
        assert!(!is_valid_email("ana@mail.com."));
        assert!(!is_valid_email("ana@mail@mail.com"));
        assert!(!is_valid_email("ana silva@mail.com"));
        assert!(!is_valid_email(" ana@mail.com"));
    }

    #[test]
    fn test_password_length() {
        assert!(!is_valid_password(""));
        assert!(!is_valid_password("x"));
        assert!(is_valid_password("xy"));
        assert!(is_valid_password("ñé"));
    }
}
