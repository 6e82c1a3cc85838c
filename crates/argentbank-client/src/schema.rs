//! Wire-level response types for the backend REST API
//!
//! The backend wraps every success payload in an envelope with a `body`
//! field and sends monetary values as strings. These types mirror the wire
//! exactly; conversion to domain types (with strict numeric parsing) happens
//! in the core crate.

use serde::{Deserialize, Serialize};

/// Success envelope wrapping every backend response body
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    pub body: T,
}

/// Error envelope for non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub status: Option<u16>,
    pub message: String,
}

/// Body of a successful login response
#[derive(Debug, Clone, Deserialize)]
pub struct LoginBody {
    pub token: String,
}

/// User profile as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
    pub id: String,
    pub email: String,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Older backend versions omit embedded accounts; see compat::backfill_profile
    #[serde(default)]
    pub accounts: Option<Vec<AccountWire>>,
}

/// Account record on the wire; `balance` arrives as a string
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountWire {
    pub id: String,
    pub account_number: String,
    pub balance: String,
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Transaction record on the wire; `amount` arrives as a string
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionWire {
    pub id: String,
    pub amount: String,
    pub description: String,
    pub date: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "type")]
    pub direction: String,
    pub account_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Pagination block of a search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationWire {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
}

/// Body of a search response
#[derive(Debug, Clone, Deserialize)]
pub struct SearchBody {
    pub transactions: Vec<TransactionWire>,
    pub pagination: PaginationWire,
}

/// Request body for a profile update
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub user_name: String,
}
