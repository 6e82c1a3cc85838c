//! Transaction endpoints - list, search, pagination window

use crate::error::ApiError;
use crate::AppState;
use argentbank_core::{page_window, Direction, SortDirection, SortField};
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTermRequest {
    pub search_term: Option<String>,
}

/// GET /api/transactions
pub async fn api_transactions(state: State<AppState>) -> Result<String, ApiError> {
    state.store.load_transactions().await?;

    let body = serde_json::json!({
        "transactions": state.store.transactions(),
        "status": state.store.transactions_state(),
    });
    Ok(serde_json::to_string(&body).unwrap_or_default())
}

/// GET /api/transactions/search
///
/// Applies every recognized query parameter to the stored search parameters
/// (filters first, page last, since any filter change resets the page), then
/// runs the search.
pub async fn api_search(
    state: State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<String, ApiError> {
    let store = &state.store;

    if let Some(account_id) = params.get("accountId") {
        let id = Some(account_id.clone()).filter(|v| !v.is_empty());
        store.apply_account_selection(id);
    }
    if let Some(term) = params.get("searchTerm") {
        store.set_search_term(Some(term.clone()));
    }
    if let Some(category) = params.get("category") {
        store.set_category(Some(category.clone()));
    }
    if params.contains_key("fromDate") || params.contains_key("toDate") {
        store.set_date_range(params.get("fromDate").cloned(), params.get("toDate").cloned());
    }
    if params.contains_key("minAmount") || params.contains_key("maxAmount") {
        let min = parse_amount_param(params.get("minAmount"), "minAmount")?;
        let max = parse_amount_param(params.get("maxAmount"), "maxAmount")?;
        store.set_amount_range(min, max);
    }
    if let Some(kind) = params.get("type") {
        let direction = if kind.is_empty() {
            None
        } else {
            Some(Direction::from_str(kind).map_err(|message| ApiError::BadRequest { message })?)
        };
        store.set_direction(direction);
    }
    if params.contains_key("sortBy") || params.contains_key("sortOrder") {
        let current = store.params();
        let sort_by = match params.get("sortBy") {
            Some(s) => SortField::from_str(s).map_err(|message| ApiError::BadRequest { message })?,
            None => current.sort_by,
        };
        let sort_order = match params.get("sortOrder") {
            Some(s) => {
                SortDirection::from_str(s).map_err(|message| ApiError::BadRequest { message })?
            }
            None => current.sort_order,
        };
        store.set_sort(sort_by, sort_order);
    }
    if let Some(page) = params.get("page") {
        let page: u32 = page.parse().map_err(|_| ApiError::BadRequest {
            message: format!("Invalid page: {}", page),
        })?;
        store.set_page(page);
    }

    store.run_search().await?;

    let body = serde_json::json!({
        "transactions": store.search_results(),
        "pagination": store.pagination(),
        "pageWindow": store.page_window(),
        "status": store.search_state(),
        "url": store.params().url_projection(),
    });
    Ok(serde_json::to_string(&body).unwrap_or_default())
}

/// POST /api/transactions/search/term
///
/// Debounced free-text input. `applied` is false when a newer input
/// superseded this one within the debounce interval.
pub async fn api_search_term(
    state: State<AppState>,
    Json(request): Json<SearchTermRequest>,
) -> Result<String, ApiError> {
    let applied = state
        .store
        .set_search_term_debounced(request.search_term)
        .await?;

    let body = serde_json::json!({
        "applied": applied,
        "transactions": state.store.search_results(),
        "pagination": state.store.pagination(),
        "pageWindow": state.store.page_window(),
    });
    Ok(serde_json::to_string(&body).unwrap_or_default())
}

/// POST /api/transactions/search/clear
pub async fn api_clear_search(state: State<AppState>) -> String {
    state.store.clear_search();

    let body = serde_json::json!({
        "transactions": state.store.search_results(),
        "pagination": state.store.pagination(),
        "status": state.store.search_state(),
    });
    serde_json::to_string(&body).unwrap_or_default()
}

/// GET /api/transactions/page-window
///
/// With `page` and `pages` parameters, computes the button row for that
/// layout; without them, reflects the current pagination.
pub async fn api_page_window(
    state: State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<String, ApiError> {
    let window = match (params.get("page"), params.get("pages")) {
        (Some(page), Some(pages)) => {
            let page: u32 = page.parse().map_err(|_| ApiError::BadRequest {
                message: format!("Invalid page: {}", page),
            })?;
            let pages: u32 = pages.parse().map_err(|_| ApiError::BadRequest {
                message: format!("Invalid pages: {}", pages),
            })?;
            page_window(page, pages)
        }
        _ => state.store.page_window(),
    };

    Ok(serde_json::to_string(&window).unwrap_or_default())
}

fn parse_amount_param(raw: Option<&String>, name: &str) -> Result<Option<f64>, ApiError> {
    match raw {
        None => Ok(None),
        Some(value) if value.is_empty() => Ok(None),
        Some(value) => {
            let parsed: f64 = value.parse().map_err(|_| ApiError::BadRequest {
                message: format!("Invalid {}: {}", name, value),
            })?;
            if !parsed.is_finite() {
                return Err(ApiError::BadRequest {
                    message: format!("Invalid {}: {}", name, value),
                });
            }
            Ok(Some(parsed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_param_parsing() {
        assert_eq!(parse_amount_param(None, "minAmount").unwrap(), None);
        assert_eq!(
            parse_amount_param(Some(&"".to_string()), "minAmount").unwrap(),
            None
        );
        assert_eq!(
            parse_amount_param(Some(&"12.5".to_string()), "minAmount").unwrap(),
            Some(12.5)
        );
        assert!(parse_amount_param(Some(&"abc".to_string()), "minAmount").is_err());
        assert!(parse_amount_param(Some(&"NaN".to_string()), "minAmount").is_err());
    }

    #[test]
    fn test_search_term_request_allows_null() {
        let request: SearchTermRequest = serde_json::from_str(r#"{"searchTerm":null}"#).unwrap();
        assert!(request.search_term.is_none());

        let request: SearchTermRequest =
            serde_json::from_str(r#"{"searchTerm":"bakery"}"#).unwrap();
        assert_eq!(request.search_term.as_deref(), Some("bakery"));
    }
}
