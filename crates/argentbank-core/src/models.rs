//! Domain models converted from wire-level types
//!
//! Monetary values arrive from the backend as strings; conversion here is
//! strict. A string that does not parse to a finite number is an
//! `InvalidFormat` error, never a silent NaN.

use crate::error::{CoreError, CoreResult};
use crate::types::Direction;
use argentbank_client::schema::{AccountWire, ProfileBody, TransactionWire};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Parse a backend amount string into a finite f64
pub fn parse_amount(field: &str, raw: &str) -> CoreResult<f64> {
    let value: f64 = raw.trim().parse().map_err(|_| CoreError::InvalidFormat {
        message: format!("{} '{}' is not numeric", field, raw),
    })?;
    if !value.is_finite() {
        return Err(CoreError::InvalidFormat {
            message: format!("{} '{}' is not a finite number", field, raw),
        });
    }
    Ok(value)
}

/// Bank account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub account_number: String,
    pub balance: f64,
    pub account_type: String,
    pub owner_id: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Account {
    /// Convert a wire account, parsing the balance strictly
    pub fn from_wire(wire: AccountWire) -> CoreResult<Self> {
        let balance = parse_amount("balance", &wire.balance)?;
        Ok(Self {
            id: wire.id,
            account_number: wire.account_number,
            balance,
            account_type: wire.account_type,
            owner_id: wire.owner_id,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        })
    }
}

/// Bank transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub description: String,
    pub date: String,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub direction: Direction,
    pub account_id: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Transaction {
    /// Convert a wire transaction, parsing amount and direction strictly
    pub fn from_wire(wire: TransactionWire) -> CoreResult<Self> {
        let amount = parse_amount("amount", &wire.amount)?;
        let direction =
            Direction::from_str(&wire.direction).map_err(|message| CoreError::InvalidFormat {
                message,
            })?;
        Ok(Self {
            id: wire.id,
            amount,
            description: wire.description,
            date: wire.date,
            category: wire.category,
            notes: wire.notes,
            direction,
            account_id: wire.account_id,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        })
    }
}

/// Authenticated user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub accounts: Vec<Account>,
}

impl UserProfile {
    /// Convert a wire profile; embedded accounts go through the same strict
    /// balance parsing as the accounts endpoint
    pub fn from_wire(wire: ProfileBody) -> CoreResult<Self> {
        let accounts = wire
            .accounts
            .unwrap_or_default()
            .into_iter()
            .map(Account::from_wire)
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(Self {
            id: wire.id,
            email: wire.email,
            user_name: wire.user_name,
            first_name: wire.first_name,
            last_name: wire.last_name,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
            accounts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_account(balance: &str) -> AccountWire {
        AccountWire {
            id: "acc-1".to_string(),
            account_number: "x8349".to_string(),
            balance: balance.to_string(),
            account_type: "Checking".to_string(),
            owner_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_balance_parses_to_finite_f64() {
        let account = Account::from_wire(wire_account("2082.79")).unwrap();
        assert_eq!(account.balance, 2082.79);
        assert!(account.balance.is_finite());
    }

    #[test]
    fn test_malformed_balance_is_loud_error() {
        let result = Account::from_wire(wire_account("2,082.79"));
        match result {
            Err(CoreError::InvalidFormat { message }) => {
                assert!(message.contains("2,082.79"));
            }
            other => panic!("expected InvalidFormat, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_non_finite_balance_rejected() {
        assert!(Account::from_wire(wire_account("NaN")).is_err());
        assert!(Account::from_wire(wire_account("inf")).is_err());
    }

    #[test]
    fn test_transaction_direction_parsed() {
        let wire = TransactionWire {
            id: "txn-1".to_string(),
            amount: "-42.50".to_string(),
            description: "Golden Sun Bakery".to_string(),
            date: "2024-06-20".to_string(),
            category: Some("Food".to_string()),
            notes: None,
            direction: "debit".to_string(),
            account_id: "acc-1".to_string(),
            created_at: None,
            updated_at: None,
        };
        let txn = Transaction::from_wire(wire).unwrap();
        assert_eq!(txn.direction, Direction::Debit);
        assert_eq!(txn.amount, -42.50);
    }

    #[test]
    fn test_profile_converts_embedded_accounts() {
        let wire = ProfileBody {
            id: "user-1".to_string(),
            email: "tony@stark.com".to_string(),
            user_name: "Iron".to_string(),
            first_name: "Tony".to_string(),
            last_name: "Stark".to_string(),
            created_at: None,
            updated_at: None,
            accounts: Some(vec![wire_account("2082.79")]),
        };
        let profile = UserProfile::from_wire(wire).unwrap();
        assert_eq!(profile.accounts.len(), 1);
        assert_eq!(profile.accounts[0].balance, 2082.79);
    }
}
