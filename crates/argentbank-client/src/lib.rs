//! HTTP client for the ArgentBank backend REST API
//!
//! All backend access goes through the [`BankApi`] trait so the core crate
//! can be exercised against a stub backend in tests. [`RestBankClient`] is
//! the reqwest-backed implementation used in production.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub mod compat;
pub mod error;
pub mod schema;

pub use error::ClientError;
pub use schema::{
    AccountWire, Envelope, ErrorEnvelope, LoginBody, PaginationWire, ProfileBody, ProfileUpdate,
    SearchBody, TransactionWire,
};

// ==================== Credential Validation ====================

/// Minimum password length accepted before a login request is sent
pub const MIN_PASSWORD_LEN: usize = 8;

/// Validate credentials before any network call.
///
/// The email check is shape-only (local part, one `@`, dotted domain); the
/// backend remains the authority on whether the address exists.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), ClientError> {
    if !is_plausible_email(email) {
        return Err(ClientError::Validation {
            message: "Please enter a valid email address".to_string(),
        });
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ClientError::Validation {
            message: format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LEN
            ),
        });
    }
    Ok(())
}

fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() {
        return false;
    }
    if email.contains(char::is_whitespace) {
        return false;
    }
    // Domain needs an interior dot
    let dot = match domain.find('.') {
        Some(i) => i,
        None => return false,
    };
    dot > 0 && dot < domain.len() - 1
}

// ==================== Client Trait ====================

/// Client reference type
pub type ClientRef = Arc<dyn BankApi>;

/// Trait over the backend banking API
#[async_trait]
pub trait BankApi: Send + Sync {
    /// Authenticate and return a bearer token
    async fn login(&self, email: &str, password: &str) -> Result<String, ClientError>;

    /// Fetch the authenticated user's profile
    async fn fetch_profile(&self, token: &str) -> Result<ProfileBody, ClientError>;

    /// Update the authenticated user's display name
    async fn update_profile(
        &self,
        token: &str,
        user_name: &str,
    ) -> Result<ProfileBody, ClientError>;

    /// List the user's accounts
    async fn fetch_accounts(&self, token: &str) -> Result<Vec<AccountWire>, ClientError>;

    /// List the user's transactions, unfiltered
    async fn fetch_transactions(&self, token: &str) -> Result<Vec<TransactionWire>, ClientError>;

    /// Run a transaction search; `query` is the pre-encoded query string
    async fn search_transactions(
        &self,
        token: &str,
        query: &str,
    ) -> Result<SearchBody, ClientError>;
}

// ==================== REST Implementation ====================

/// reqwest-backed [`BankApi`] implementation
#[derive(Clone)]
pub struct RestBankClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestBankClient {
    /// Build a client against the given base URL with a request timeout
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a response: non-2xx becomes an Http error carrying the server
    /// message, a 2xx body that does not match the envelope becomes a Schema
    /// error. Shape mismatches fail loudly rather than degrading silently.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|e| e.message)
                .unwrap_or_else(|_| text.clone());
            log::debug!(
                target: "argentbank::client",
                "backend rejected request: {} {}", status, message
            );
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str::<Envelope<T>>(&text)
            .map(|envelope| envelope.body)
            .map_err(|e| ClientError::Schema {
                detail: e.to_string(),
            })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, ClientError> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl BankApi for RestBankClient {
    async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        validate_credentials(email, password)?;

        let response = self
            .client
            .post(self.url("/user/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let body: LoginBody = Self::decode(response).await?;
        Ok(body.token)
    }

    async fn fetch_profile(&self, token: &str) -> Result<ProfileBody, ClientError> {
        let mut profile: ProfileBody = self.get_json("/user/profile", token).await?;
        compat::backfill_profile(&mut profile);
        Ok(profile)
    }

    async fn update_profile(
        &self,
        token: &str,
        user_name: &str,
    ) -> Result<ProfileBody, ClientError> {
        let response = self
            .client
            .put(self.url("/user/profile"))
            .bearer_auth(token)
            .json(&ProfileUpdate {
                user_name: user_name.to_string(),
            })
            .send()
            .await?;

        let mut profile: ProfileBody = Self::decode(response).await?;
        compat::backfill_profile(&mut profile);
        Ok(profile)
    }

    async fn fetch_accounts(&self, token: &str) -> Result<Vec<AccountWire>, ClientError> {
        self.get_json("/api/accounts", token).await
    }

    async fn fetch_transactions(&self, token: &str) -> Result<Vec<TransactionWire>, ClientError> {
        self.get_json("/api/transactions", token).await
    }

    async fn search_transactions(
        &self,
        token: &str,
        query: &str,
    ) -> Result<SearchBody, ClientError> {
        let path = format!("/api/transactions/search?{}", query);
        self.get_json(&path, token).await
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_validation() {
        assert!(validate_credentials("tony@stark.com", "password123").is_ok());
        assert!(matches!(
            validate_credentials("not-an-email", "password123"),
            Err(ClientError::Validation { .. })
        ));
        assert!(matches!(
            validate_credentials("tony@stark", "password123"),
            Err(ClientError::Validation { .. })
        ));
        assert!(matches!(
            validate_credentials("tony@stark.com", "short"),
            Err(ClientError::Validation { .. })
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = RestBankClient::new("http://localhost:3001/api/v1/", 30).unwrap();
        assert_eq!(client.url("/user/login"), "http://localhost:3001/api/v1/user/login");
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/user/login")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":200,"message":"ok","body":{"token":"jwt-token"}}"#)
            .create_async()
            .await;

        let client = RestBankClient::new(&server.url(), 5).unwrap();
        let token = client.login("tony@stark.com", "password123").await.unwrap();
        assert_eq!(token, "jwt-token");
    }

    #[tokio::test]
    async fn test_login_rejection_carries_server_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/user/login")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":400,"message":"Error: User not found!"}"#)
            .create_async()
            .await;

        let client = RestBankClient::new(&server.url(), 5).unwrap();
        let result = client.login("tony@stark.com", "password123").await;
        match result {
            Err(ClientError::Http { status, message }) => {
                assert_eq!(status, 400);
                assert!(message.contains("User not found"));
            }
            other => panic!("expected Http error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_invalid_credentials_skip_network() {
        // No server: validation must reject before any request is sent
        let client = RestBankClient::new("http://127.0.0.1:1", 1).unwrap();
        let result = client.login("bad-email", "password123").await;
        assert!(matches!(result, Err(ClientError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_fetch_accounts() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/accounts")
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"status":200,"message":"ok","body":[
                    {"id":"acc-1","accountNumber":"x8349","balance":"2082.79","type":"Checking"}
                ]}"#,
            )
            .create_async()
            .await;

        let client = RestBankClient::new(&server.url(), 5).unwrap();
        let accounts = client.fetch_accounts("tok").await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].balance, "2082.79");
    }

    #[tokio::test]
    async fn test_malformed_body_is_schema_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/accounts")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"unexpected":"shape"}"#)
            .create_async()
            .await;

        let client = RestBankClient::new(&server.url(), 5).unwrap();
        let result = client.fetch_accounts("tok").await;
        assert!(matches!(result, Err(ClientError::Schema { .. })));
    }

    #[tokio::test]
    async fn test_search_builds_query_path() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/transactions/search?accountId=acc-1&page=2&limit=10")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"status":200,"message":"ok","body":{
                    "transactions":[],
                    "pagination":{"total":0,"page":2,"limit":10,"pages":0}
                }}"#,
            )
            .create_async()
            .await;

        let client = RestBankClient::new(&server.url(), 5).unwrap();
        let body = client
            .search_transactions("tok", "accountId=acc-1&page=2&limit=10")
            .await
            .unwrap();
        assert!(body.transactions.is_empty());
        assert_eq!(body.pagination.page, 2);
    }

    #[tokio::test]
    async fn test_profile_backfilled_when_accounts_missing() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/user/profile")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"status":200,"message":"ok","body":{
                    "id":"user-1","email":"tony@stark.com","userName":"Iron",
                    "firstName":"Tony","lastName":"Stark"
                }}"#,
            )
            .create_async()
            .await;

        let client = RestBankClient::new(&server.url(), 5).unwrap();
        let profile = client.fetch_profile("tok").await.unwrap();
        let accounts = profile.accounts.unwrap();
        assert_eq!(accounts.len(), 3);
        assert!(profile.created_at.is_some());
    }
}
