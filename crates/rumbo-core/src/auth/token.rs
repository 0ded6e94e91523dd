//! Claims-only JWT decoding.
//!
//! The client holds no verification key, so the signature is not checked;
//! the server remains the authority on token authenticity. Decoding here
//! answers two questions: who is the subject, and is the token still
//! within its validity window. Expiry is enforced locally so that a stale
//! persisted token never restores a session that the server would reject.

use jsonwebtoken::{decode, decode_header, errors::ErrorKind, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The registered claims the service issues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, mapped to the user id.
    pub sub: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

#[derive(Error, Debug)]
pub enum TokenError {
    /// Structurally valid but past its expiry claim. Treated the same as a
    /// malformed token by the session layer (cleanup), surfaced separately
    /// for logging.
    #[error("Token has expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),
}

/// Decode the claims of a bearer token without verifying its signature.
///
/// The algorithm is taken from the token's own header. `sub` and `exp` are
/// required and `exp` is validated against the current time.
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let header = decode_header(token).map_err(|e| TokenError::Malformed(e.to_string()))?;

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.set_required_spec_claims(&["sub", "exp"]);

    // The key is ignored once signature validation is off.
    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation).map_err(
        |e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed(e.to_string()),
        },
    )?;

    Ok(data.claims)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

    fn now() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
    }

    /// Sign a token the way the service would; the signing key is
    /// irrelevant because decoding ignores the signature.
    fn make_token(sub: &str, exp: i64) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            iat: now(),
            exp,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"not-the-real-key"),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_valid_token() {
        let token = make_token("user-17", now() + 3600);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "user-17");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Well past the default decode leeway
        let token = make_token("user-17", now() - 3600);
        assert!(matches!(decode_claims(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_garbage_is_malformed() {
        assert!(matches!(
            decode_claims("not-a-token"),
            Err(TokenError::Malformed(_))
        ));
        assert!(matches!(decode_claims(""), Err(TokenError::Malformed(_))));
        assert!(matches!(
            decode_claims("a.b"),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_subject_is_malformed() {
        #[derive(Serialize)]
        struct NoSub {
            iat: i64,
            exp: i64,
        }
        let token = encode(
            &Header::new(Algorithm::HS256),
            &NoSub {
                iat: now(),
                exp: now() + 3600,
            },
            &EncodingKey::from_secret(b"k"),
        )
        .unwrap();
        assert!(matches!(
            decode_claims(&token),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_tampered_payload_is_malformed() {
        let token = make_token("user-17", now() + 3600);
        let mut parts: Vec<&str> = token.split('.').collect();
        parts[1] = "AAAA";
        let tampered = parts.join(".");
        assert!(matches!(
            decode_claims(&tampered),
            Err(TokenError::Malformed(_))
        ));
    }
}
