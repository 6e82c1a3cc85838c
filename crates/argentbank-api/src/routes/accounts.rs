//! Account endpoints - list and selection

use crate::error::ApiError;
use crate::AppState;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectAccountRequest {
    /// `null` selects all accounts
    pub account_id: Option<String>,
}

/// GET /api/accounts
pub async fn api_accounts(state: State<AppState>) -> Result<String, ApiError> {
    state.store.load_accounts().await?;

    let body = serde_json::json!({
        "accounts": state.store.accounts(),
        "status": state.store.accounts_state(),
    });
    Ok(serde_json::to_string(&body).unwrap_or_default())
}

/// POST /api/accounts/select
///
/// Re-selecting the current account is a no-op: no search fires and
/// `changed` is false in the response.
pub async fn api_select_account(
    state: State<AppState>,
    Json(request): Json<SelectAccountRequest>,
) -> Result<String, ApiError> {
    let changed = state.store.select_account(request.account_id).await?;

    let body = serde_json::json!({
        "changed": changed,
        "selectedAccountId": state.store.selected_account_id(),
        "url": state.store.params().url_projection(),
    });
    Ok(serde_json::to_string(&body).unwrap_or_default())
}
