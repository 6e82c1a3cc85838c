//! Session token handling and sign-in error mapping

use argentbank_client::ClientError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Canned sign-in failure messages shown to the user
pub const MSG_USER_NOT_FOUND: &str = "No account found for this email address.";
pub const MSG_BAD_PASSWORD: &str = "Incorrect password. Please try again.";
pub const MSG_SIGN_IN_FAILED: &str = "We could not sign you in. Please try again later.";

/// An authenticated session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session expiring `ttl_minutes` from now
    pub fn new(token: String, ttl_minutes: i64) -> Self {
        Self {
            token,
            expires_at: Utc::now() + Duration::minutes(ttl_minutes),
        }
    }

    /// True once the token is past its expiry; there is no refresh, an
    /// expired session means signing in again
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Map a sign-in failure to one of three canned user-facing messages.
///
/// The backend is matched on message substrings, which couples us to its
/// wording. Kept as-is so the displayed messages match the existing product
/// copy; a structured error code from the backend would remove the coupling.
pub fn login_error_message(error: &ClientError) -> String {
    match error {
        ClientError::Validation { message } => message.clone(),
        ClientError::Http { message, .. } => {
            let lower = message.to_lowercase();
            if lower.contains("user not found") || lower.contains("no user") {
                MSG_USER_NOT_FOUND.to_string()
            } else if lower.contains("password") {
                MSG_BAD_PASSWORD.to_string()
            } else {
                MSG_SIGN_IN_FAILED.to_string()
            }
        }
        ClientError::Schema { .. } | ClientError::Network(_) => MSG_SIGN_IN_FAILED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(message: &str) -> ClientError {
        ClientError::Http {
            status: 400,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_session_expiry() {
        let session = Session::new("tok".to_string(), 60);
        assert!(!session.is_expired());

        let session = Session::new("tok".to_string(), -1);
        assert!(session.is_expired());
    }

    #[test]
    fn test_login_message_mapping() {
        assert_eq!(
            login_error_message(&http("Error: User not found!")),
            MSG_USER_NOT_FOUND
        );
        assert_eq!(
            login_error_message(&http("Error: Password is invalid")),
            MSG_BAD_PASSWORD
        );
        assert_eq!(
            login_error_message(&http("Internal server error")),
            MSG_SIGN_IN_FAILED
        );
    }

    #[test]
    fn test_validation_message_passes_through() {
        let error = ClientError::Validation {
            message: "Please enter a valid email address".to_string(),
        };
        assert_eq!(
            login_error_message(&error),
            "Please enter a valid email address"
        );
    }

    #[test]
    fn test_schema_error_is_generic() {
        let error = ClientError::Schema {
            detail: "missing field `token`".to_string(),
        };
        assert_eq!(login_error_message(&error), MSG_SIGN_IN_FAILED);
    }
}
