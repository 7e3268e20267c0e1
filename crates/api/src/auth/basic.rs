//! HTTP Basic credential parsing and constant-time verification.
//!
//! Credentials are compared via SHA-256 digests so the comparison takes
//! the same time whether the mismatch is in the first byte or the last.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};

/// Credentials the API accepts, loaded from the environment.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl AuthConfig {
    /// Load credentials from environment variables.
    ///
    /// | Env Var        | Required | Default |
    /// |----------------|----------|---------|
    /// | `API_USERNAME` | no       | `admin` |
    /// | `API_PASSWORD` | **yes**  | --      |
    ///
    /// # Panics
    ///
    /// Panics if `API_PASSWORD` is not set or is empty.
    pub fn from_env() -> Self {
        let username = std::env::var("API_USERNAME").unwrap_or_else(|_| "admin".into());

        let password =
            std::env::var("API_PASSWORD").expect("API_PASSWORD must be set in the environment");
        assert!(!password.is_empty(), "API_PASSWORD must not be empty");

        Self { username, password }
    }
}

/// Decode an `Authorization: Basic <payload>` header value into
/// `(username, password)`.
///
/// Returns `None` for a non-Basic scheme, invalid base64, a non-UTF-8
/// payload, or a payload without a `:` separator. The password may
/// itself contain `:` -- only the first separator splits.
pub fn decode_basic(header: &str) -> Option<(String, String)> {
    let payload = header.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(payload.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Whether the supplied credentials match the configured ones.
///
/// Both fields are always compared so a username mismatch does not
/// short-circuit the password comparison.
pub fn verify_credentials(config: &AuthConfig, username: &str, password: &str) -> bool {
    let username_ok = digest_eq(username, &config.username);
    let password_ok = digest_eq(password, &config.password);
    username_ok && password_ok
}

/// Constant-time string comparison via SHA-256 digest equality.
fn digest_eq(candidate: &str, expected: &str) -> bool {
    Sha256::digest(candidate.as_bytes()) == Sha256::digest(expected.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            username: "admin".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_decode_basic_roundtrip() {
        // base64("admin:secret")
        let decoded = decode_basic("Basic YWRtaW46c2VjcmV0").unwrap();
        assert_eq!(decoded, ("admin".to_string(), "secret".to_string()));
    }

    #[test]
    fn test_decode_basic_password_may_contain_colon() {
        let payload = BASE64.encode("admin:se:cret");
        let decoded = decode_basic(&format!("Basic {payload}")).unwrap();
        assert_eq!(decoded.1, "se:cret");
    }

    #[test]
    fn test_decode_basic_rejects_other_schemes() {
        assert!(decode_basic("Bearer YWRtaW46c2VjcmV0").is_none());
        assert!(decode_basic("Basic not-base64!!!").is_none());
        // Valid base64, but no separator.
        let payload = BASE64.encode("adminsecret");
        assert!(decode_basic(&format!("Basic {payload}")).is_none());
    }

    #[test]
    fn test_verify_credentials() {
        let config = config();
        assert!(verify_credentials(&config, "admin", "secret"));
        assert!(!verify_credentials(&config, "admin", "wrong"));
        assert!(!verify_credentials(&config, "wrong", "secret"));
        assert!(!verify_credentials(&config, "", ""));
    }
}
