//! Basic types for the core store module

use serde::{Deserialize, Serialize};

/// Load status of an async resource
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    /// No request issued yet
    Idle,
    /// Request in flight
    Loading,
    /// Last request completed successfully
    Succeeded,
    /// Last request failed
    Failed,
}

impl Default for LoadStatus {
    fn default() -> Self {
        LoadStatus::Idle
    }
}

impl std::str::FromStr for LoadStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(LoadStatus::Idle),
            "loading" => Ok(LoadStatus::Loading),
            "succeeded" => Ok(LoadStatus::Succeeded),
            "failed" => Ok(LoadStatus::Failed),
            _ => Err(format!("Invalid load status: {}", s)),
        }
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadStatus::Idle => write!(f, "idle"),
            LoadStatus::Loading => write!(f, "loading"),
            LoadStatus::Succeeded => write!(f, "succeeded"),
            LoadStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Money flowing into the account
    Credit,
    /// Money flowing out of the account
    Debit,
}

impl std::str::FromStr for Direction {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "CREDIT" => Ok(Direction::Credit),
            "DEBIT" => Ok(Direction::Debit),
            _ => Err(format!("Invalid transaction direction: {}", s)),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Credit => write!(f, "CREDIT"),
            Direction::Debit => write!(f, "DEBIT"),
        }
    }
}

/// Sortable transaction field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Date,
    Amount,
    Description,
}

impl Default for SortField {
    fn default() -> Self {
        SortField::Date
    }
}

impl std::str::FromStr for SortField {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(SortField::Date),
            "amount" => Ok(SortField::Amount),
            "description" => Ok(SortField::Description),
            _ => Err(format!("Invalid sort field: {}", s)),
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortField::Date => write!(f, "date"),
            SortField::Amount => write!(f, "amount"),
            SortField::Description => write!(f, "description"),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Desc
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Invalid sort direction: {}", s)),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_direction_round_trip() {
        assert_eq!(Direction::from_str("credit").unwrap(), Direction::Credit);
        assert_eq!(Direction::from_str("DEBIT").unwrap(), Direction::Debit);
        assert_eq!(Direction::Credit.to_string(), "CREDIT");
        assert!(Direction::from_str("transfer").is_err());
    }

    #[test]
    fn test_sort_defaults() {
        assert_eq!(SortField::default(), SortField::Date);
        assert_eq!(SortDirection::default(), SortDirection::Desc);
    }

    #[test]
    fn test_load_status_display() {
        assert_eq!(LoadStatus::Idle.to_string(), "idle");
        assert_eq!(LoadStatus::Failed.to_string(), "failed");
        assert_eq!(LoadStatus::from_str("succeeded").unwrap(), LoadStatus::Succeeded);
    }
}
