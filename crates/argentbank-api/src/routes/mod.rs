//! Route modules for the API server
//!
//! All routes are organized into modules:
//! - session: Sign-in, sign-out, profile fetch and update
//! - accounts: Account list and selection
//! - transactions: Transaction list, search, pagination window
//!
//! Each handler returns a JSON string on success; failures go through
//! ApiError, which carries the HTTP status.

pub mod accounts;
pub mod session;
pub mod transactions;
