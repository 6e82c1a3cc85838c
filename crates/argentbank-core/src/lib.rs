//! Core store and business logic
//!
//! The [`Store`] owns all session, entity and search state behind a lock,
//! the way a client-side state container would. Synchronous transition
//! methods mutate state atomically and never hold the lock across an await;
//! async controller methods drive the [`BankApi`] client and feed results
//! back through the transitions.
//!
//! Every fetchable resource carries a request generation. A response whose
//! generation is older than the latest issued request is discarded, so the
//! visible state always reflects the most recently issued request no matter
//! the arrival order.

pub mod error;
pub mod models;
pub mod search;
pub mod session;
pub mod types;

use argentbank_client::{BankApi, ClientError};
use argentbank_config::Config;
use serde::Serialize;
use std::sync::{Arc, RwLock};

pub use error::{CoreError, CoreResult, ErrorCode, ErrorSeverity};
pub use models::{Account, Transaction, UserProfile};
pub use search::{page_window, PageItem, Pagination, SearchParams};
pub use session::Session;
pub use types::{Direction, LoadStatus, SortDirection, SortField};

/// Client reference type
pub type ClientRef = Arc<dyn BankApi>;

// ==================== Store State ====================

/// Status and last error of one fetchable resource
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceState {
    pub status: LoadStatus,
    pub error: Option<String>,
}

impl ResourceState {
    fn loading() -> Self {
        Self {
            status: LoadStatus::Loading,
            error: None,
        }
    }

    fn succeeded() -> Self {
        Self {
            status: LoadStatus::Succeeded,
            error: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            status: LoadStatus::Failed,
            error: Some(message),
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    session: Option<Session>,
    current_user: Option<UserProfile>,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    search_results: Vec<Transaction>,
    pagination: Pagination,
    selected_account_id: Option<String>,
    params: SearchParams,
    accounts_state: ResourceState,
    transactions_state: ResourceState,
    search_state: ResourceState,
    accounts_gen: u64,
    transactions_gen: u64,
    search_gen: u64,
    input_gen: u64,
}

// ==================== Store ====================

/// Main state container
pub struct Store {
    config: Config,
    client: ClientRef,
    state: RwLock<StoreState>,
}

impl Store {
    /// Create a store backed by the given client
    pub fn new(config: Config, client: ClientRef) -> Self {
        let mut state = StoreState::default();
        state.params = SearchParams::new(config.search.page_size.max(1));

        Self {
            config,
            client,
            state: RwLock::new(state),
        }
    }

    // ==================== Accessors ====================

    pub fn is_authenticated(&self) -> bool {
        self.state.read().unwrap().session.is_some()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.state.read().unwrap().current_user.clone()
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.state.read().unwrap().accounts.clone()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.read().unwrap().transactions.clone()
    }

    pub fn search_results(&self) -> Vec<Transaction> {
        self.state.read().unwrap().search_results.clone()
    }

    pub fn pagination(&self) -> Pagination {
        self.state.read().unwrap().pagination
    }

    pub fn selected_account_id(&self) -> Option<String> {
        self.state.read().unwrap().selected_account_id.clone()
    }

    pub fn params(&self) -> SearchParams {
        self.state.read().unwrap().params.clone()
    }

    pub fn accounts_state(&self) -> ResourceState {
        self.state.read().unwrap().accounts_state.clone()
    }

    pub fn transactions_state(&self) -> ResourceState {
        self.state.read().unwrap().transactions_state.clone()
    }

    pub fn search_state(&self) -> ResourceState {
        self.state.read().unwrap().search_state.clone()
    }

    /// Windowed page-button row for the current pagination
    pub fn page_window(&self) -> Vec<PageItem> {
        let pagination = self.pagination();
        page_window(pagination.page, pagination.pages)
    }

    /// Status summary for the summary endpoint
    pub fn summary(&self) -> serde_json::Value {
        let state = self.state.read().unwrap();
        serde_json::json!({
            "authenticated": state.session.is_some(),
            "accounts": {
                "count": state.accounts.len(),
                "status": state.accounts_state,
            },
            "transactions": {
                "count": state.transactions.len(),
                "status": state.transactions_state,
            },
            "search": {
                "count": state.search_results.len(),
                "status": state.search_state,
                "pagination": state.pagination,
            },
            "selected_account_id": state.selected_account_id,
        })
    }

    // ==================== Sync Transitions ====================

    /// Mark the accounts fetch as in flight; returns its request generation
    pub fn begin_accounts_fetch(&self) -> u64 {
        let mut state = self.state.write().unwrap();
        state.accounts_gen += 1;
        state.accounts_state = ResourceState::loading();
        state.accounts_gen
    }

    pub fn begin_transactions_fetch(&self) -> u64 {
        let mut state = self.state.write().unwrap();
        state.transactions_gen += 1;
        state.transactions_state = ResourceState::loading();
        state.transactions_gen
    }

    pub fn begin_search(&self) -> u64 {
        let mut state = self.state.write().unwrap();
        state.search_gen += 1;
        state.search_state = ResourceState::loading();
        state.search_gen
    }

    /// Replace the account list. Returns false when a newer fetch has been
    /// issued since this one began; the stale result is discarded.
    pub fn accounts_loaded(&self, generation: u64, accounts: Vec<Account>) -> bool {
        let mut state = self.state.write().unwrap();
        if generation != state.accounts_gen {
            return false;
        }
        state.accounts = accounts;
        state.accounts_state = ResourceState::succeeded();
        true
    }

    pub fn accounts_failed(&self, generation: u64, message: String) -> bool {
        let mut state = self.state.write().unwrap();
        if generation != state.accounts_gen {
            return false;
        }
        state.accounts_state = ResourceState::failed(message);
        true
    }

    pub fn transactions_loaded(&self, generation: u64, transactions: Vec<Transaction>) -> bool {
        let mut state = self.state.write().unwrap();
        if generation != state.transactions_gen {
            return false;
        }
        state.transactions = transactions;
        state.transactions_state = ResourceState::succeeded();
        true
    }

    pub fn transactions_failed(&self, generation: u64, message: String) -> bool {
        let mut state = self.state.write().unwrap();
        if generation != state.transactions_gen {
            return false;
        }
        state.transactions_state = ResourceState::failed(message);
        true
    }

    /// Replace search results and pagination together, atomically
    pub fn search_loaded(
        &self,
        generation: u64,
        results: Vec<Transaction>,
        pagination: Pagination,
    ) -> bool {
        let mut state = self.state.write().unwrap();
        if generation != state.search_gen {
            return false;
        }
        state.search_results = results;
        state.pagination = pagination;
        state.search_state = ResourceState::succeeded();
        true
    }

    pub fn search_failed(&self, generation: u64, message: String) -> bool {
        let mut state = self.state.write().unwrap();
        if generation != state.search_gen {
            return false;
        }
        state.search_state = ResourceState::failed(message);
        true
    }

    /// Apply an account selection. Re-selecting the current id is a no-op
    /// and returns false so no redundant search fires; `None` selects all
    /// accounts.
    pub fn apply_account_selection(&self, account_id: Option<String>) -> bool {
        let mut state = self.state.write().unwrap();
        if state.selected_account_id == account_id {
            return false;
        }
        state.selected_account_id = account_id.clone();
        state.params.set_account_id(account_id);
        true
    }

    pub fn set_search_term(&self, term: Option<String>) {
        self.state.write().unwrap().params.set_search_term(term);
    }

    pub fn set_category(&self, category: Option<String>) {
        self.state.write().unwrap().params.set_category(category);
    }

    pub fn set_date_range(&self, from: Option<String>, to: Option<String>) {
        self.state.write().unwrap().params.set_date_range(from, to);
    }

    pub fn set_amount_range(&self, min: Option<f64>, max: Option<f64>) {
        self.state.write().unwrap().params.set_amount_range(min, max);
    }

    pub fn set_direction(&self, direction: Option<Direction>) {
        self.state.write().unwrap().params.set_direction(direction);
    }

    pub fn set_sort(&self, sort_by: SortField, sort_order: SortDirection) {
        self.state.write().unwrap().params.set_sort(sort_by, sort_order);
    }

    pub fn set_page(&self, page: u32) {
        self.state.write().unwrap().params.set_page(page);
    }

    /// Reset search status, results and pagination; filters stay in place
    pub fn clear_search(&self) {
        let mut state = self.state.write().unwrap();
        state.search_results = Vec::new();
        state.pagination = Pagination::default();
        state.search_state = ResourceState::default();
    }

    /// Drop the session and every piece of per-user state in one transition
    pub fn logout(&self) {
        let mut state = self.state.write().unwrap();
        state.session = None;
        state.current_user = None;
        state.accounts = Vec::new();
        state.transactions = Vec::new();
        state.search_results = Vec::new();
        state.pagination = Pagination::default();
        state.selected_account_id = None;
        state.params = SearchParams::new(self.config.search.page_size.max(1));
        state.accounts_state = ResourceState::default();
        state.transactions_state = ResourceState::default();
        state.search_state = ResourceState::default();
        log::debug!(target: "argentbank::core", "session cleared");
    }

    /// Token for an authenticated call. An expired session is cleared and
    /// reported as such; a missing one as not signed in.
    fn require_token(&self) -> CoreResult<String> {
        let session = self.state.read().unwrap().session.clone();
        match session {
            None => Err(CoreError::NotAuthenticated),
            Some(session) if session.is_expired() => {
                self.logout();
                Err(CoreError::SessionExpired)
            }
            Some(session) => Ok(session.token),
        }
    }

    // ==================== Async Controller ====================

    /// Sign in, store the session, and fetch the profile
    pub async fn login(&self, email: &str, password: &str) -> CoreResult<UserProfile> {
        let token = self.client.login(email, password).await.map_err(|e| match e {
            ClientError::Validation { message } => CoreError::ValidationError { message },
            other => CoreError::Unauthorized {
                message: session::login_error_message(&other),
            },
        })?;

        {
            let mut state = self.state.write().unwrap();
            state.session = Some(Session::new(token, self.config.session.token_ttl_minutes));
        }
        log::info!(target: "argentbank::core", "user signed in");

        self.refresh_profile().await
    }

    /// Fetch and store the current user's profile
    pub async fn refresh_profile(&self) -> CoreResult<UserProfile> {
        let token = self.require_token()?;
        let wire = self.client.fetch_profile(&token).await.map_err(backend_error)?;
        let profile = UserProfile::from_wire(wire)?;
        self.state.write().unwrap().current_user = Some(profile.clone());
        Ok(profile)
    }

    /// Change the user's display name and store the updated profile
    pub async fn update_username(&self, user_name: &str) -> CoreResult<UserProfile> {
        if user_name.trim().is_empty() {
            return Err(CoreError::ValidationError {
                message: "User name must not be empty".to_string(),
            });
        }
        let token = self.require_token()?;
        let wire = self
            .client
            .update_profile(&token, user_name)
            .await
            .map_err(backend_error)?;
        let profile = UserProfile::from_wire(wire)?;
        self.state.write().unwrap().current_user = Some(profile.clone());
        Ok(profile)
    }

    /// Fetch the account list into the store
    pub async fn load_accounts(&self) -> CoreResult<()> {
        let token = self.require_token()?;
        let generation = self.begin_accounts_fetch();

        match self.client.fetch_accounts(&token).await {
            Ok(wires) => {
                let converted = wires
                    .into_iter()
                    .map(Account::from_wire)
                    .collect::<CoreResult<Vec<_>>>();
                match converted {
                    Ok(accounts) => {
                        self.accounts_loaded(generation, accounts);
                        Ok(())
                    }
                    Err(e) => {
                        self.accounts_failed(generation, e.to_string());
                        Err(e)
                    }
                }
            }
            Err(e) => {
                let message = e.to_string();
                self.accounts_failed(generation, message.clone());
                Err(CoreError::BackendError { message })
            }
        }
    }

    /// Fetch the unfiltered transaction list into the store
    pub async fn load_transactions(&self) -> CoreResult<()> {
        let token = self.require_token()?;
        let generation = self.begin_transactions_fetch();

        match self.client.fetch_transactions(&token).await {
            Ok(wires) => {
                let converted = wires
                    .into_iter()
                    .map(Transaction::from_wire)
                    .collect::<CoreResult<Vec<_>>>();
                match converted {
                    Ok(transactions) => {
                        self.transactions_loaded(generation, transactions);
                        Ok(())
                    }
                    Err(e) => {
                        self.transactions_failed(generation, e.to_string());
                        Err(e)
                    }
                }
            }
            Err(e) => {
                let message = e.to_string();
                self.transactions_failed(generation, message.clone());
                Err(CoreError::BackendError { message })
            }
        }
    }

    /// Run a search with the current parameter set
    pub async fn run_search(&self) -> CoreResult<()> {
        let token = self.require_token()?;
        let (generation, query) = {
            let mut state = self.state.write().unwrap();
            state.search_gen += 1;
            state.search_state = ResourceState::loading();
            (state.search_gen, state.params.to_query())
        };
        log::debug!(target: "argentbank::core", "search issued: {}", query);

        match self.client.search_transactions(&token, &query).await {
            Ok(body) => {
                let pagination = Pagination::from_wire(body.pagination);
                let converted = body
                    .transactions
                    .into_iter()
                    .map(Transaction::from_wire)
                    .collect::<CoreResult<Vec<_>>>();
                match converted {
                    Ok(results) => {
                        self.search_loaded(generation, results, pagination);
                        Ok(())
                    }
                    Err(e) => {
                        self.search_failed(generation, e.to_string());
                        Err(e)
                    }
                }
            }
            Err(e) => {
                let message = e.to_string();
                self.search_failed(generation, message.clone());
                Err(CoreError::BackendError { message })
            }
        }
    }

    /// Select an account and search with the new filter. Returns false
    /// without searching when the selection did not change.
    pub async fn select_account(&self, account_id: Option<String>) -> CoreResult<bool> {
        if !self.apply_account_selection(account_id) {
            return Ok(false);
        }
        self.run_search().await?;
        Ok(true)
    }

    /// Debounced free-text input. The term is applied and searched only if
    /// no newer input arrives within the debounce interval; superseded calls
    /// return false without touching the parameters.
    pub async fn set_search_term_debounced(&self, term: Option<String>) -> CoreResult<bool> {
        let ticket = {
            let mut state = self.state.write().unwrap();
            state.input_gen += 1;
            state.input_gen
        };

        let interval = std::time::Duration::from_millis(self.config.search.debounce_ms);
        tokio::time::sleep(interval).await;

        if self.state.read().unwrap().input_gen != ticket {
            return Ok(false);
        }

        self.set_search_term(term);
        self.run_search().await?;
        Ok(true)
    }

    /// Navigate to a page and search; other parameters are untouched
    pub async fn goto_page(&self, page: u32) -> CoreResult<()> {
        self.state.write().unwrap().params.set_page(page);
        self.run_search().await
    }
}

fn backend_error(error: ClientError) -> CoreError {
    CoreError::BackendError {
        message: error.to_string(),
    }
}

// ==================== Tests ====================
