//! Search API credentials.
//!
//! The client never reads process state on its own; it is handed a
//! [`CredentialSource`] and asks it for credentials on every call. The
//! environment-backed source therefore picks up rotated secrets without a
//! restart, and tests can inject fixed values.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

pub const APP_ID_VAR: &str = "ADZUNA_APP_ID";
pub const APP_KEY_VAR: &str = "ADZUNA_APP_KEY";

/// Resolved app id / app key pair.
#[derive(Clone)]
pub struct Credentials {
    pub app_id: String,
    pub app_key: SecretString,
}

impl Credentials {
    /// Both values are trimmed; pasted secrets often carry a newline.
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into().trim().to_string(),
            app_key: SecretString::from(app_key.into().trim().to_string()),
        }
    }

    /// Both halves present and non-blank.
    pub fn is_complete(&self) -> bool {
        !self.app_id.trim().is_empty() && !self.app_key.expose_secret().trim().is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_key", &"[REDACTED]")
            .finish()
    }
}

/// Anything that can hand out credentials at call time.
pub trait CredentialSource: Send + Sync {
    /// `None` when either credential is missing or blank.
    fn resolve(&self) -> Option<Credentials>;
}

impl CredentialSource for Credentials {
    fn resolve(&self) -> Option<Credentials> {
        self.is_complete().then(|| self.clone())
    }
}

/// Reads the two credential variables from the process environment each time
/// it is asked.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    id_var: String,
    key_var: String,
}

impl EnvCredentials {
    pub fn new() -> Self {
        Self::with_vars(APP_ID_VAR, APP_KEY_VAR)
    }

    pub fn with_vars(id_var: impl Into<String>, key_var: impl Into<String>) -> Self {
        Self {
            id_var: id_var.into(),
            key_var: key_var.into(),
        }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialSource for EnvCredentials {
    fn resolve(&self) -> Option<Credentials> {
        let app_id = std::env::var(&self.id_var).ok()?;
        let app_key = std::env::var(&self.key_var).ok()?;
        Credentials::new(app_id, app_key).resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_credentials_resolve() {
        let creds = Credentials::new("id-123", "key-456");
        let resolved = creds.resolve().expect("complete credentials resolve");
        assert_eq!(resolved.app_id, "id-123");
        assert_eq!(resolved.app_key.expose_secret(), "key-456");
    }

    #[test]
    fn test_blank_key_does_not_resolve() {
        assert!(Credentials::new("id-123", "  ").resolve().is_none());
        assert!(Credentials::new("", "key").resolve().is_none());
    }

    #[test]
    fn test_values_are_trimmed() {
        let creds = Credentials::new("  id-123\n", "\tkey-456 ").resolve().unwrap();
        assert_eq!(creds.app_id, "id-123");
        assert_eq!(creds.app_key.expose_secret(), "key-456");
    }

    #[test]
    fn test_debug_redacts_key() {
        let creds = Credentials::new("id-123", "super-secret-key");
        let debug = format!("{creds:?}");
        assert!(debug.contains("id-123"));
        assert!(!debug.contains("super-secret-key"));
    }

    #[test]
    fn test_env_credentials_read_at_call_time() {
        let source = EnvCredentials::with_vars("APPLIFY_TEST_ID", "APPLIFY_TEST_KEY");

        temp_env::with_vars(
            [
                ("APPLIFY_TEST_ID", Some("first-id")),
                ("APPLIFY_TEST_KEY", Some("first-key")),
            ],
            || {
                let creds = source.resolve().expect("env credentials resolve");
                assert_eq!(creds.app_id, "first-id");
            },
        );

        temp_env::with_vars(
            [
                ("APPLIFY_TEST_ID", Some("rotated-id")),
                ("APPLIFY_TEST_KEY", Some("rotated-key")),
            ],
            || {
                let creds = source.resolve().expect("rotated credentials resolve");
                assert_eq!(creds.app_id, "rotated-id");
                assert_eq!(creds.app_key.expose_secret(), "rotated-key");
            },
        );
    }

    #[test]
    fn test_env_credentials_missing_key() {
        let source = EnvCredentials::with_vars("APPLIFY_TEST_ID_2", "APPLIFY_TEST_KEY_2");
        temp_env::with_vars(
            [
                ("APPLIFY_TEST_ID_2", Some("only-id")),
                ("APPLIFY_TEST_KEY_2", None::<&str>),
            ],
            || {
                assert!(source.resolve().is_none());
            },
        );
    }
}
