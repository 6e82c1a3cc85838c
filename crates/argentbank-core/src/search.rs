//! Search parameters, pagination and page windowing

use crate::types::{Direction, SortDirection, SortField};
use argentbank_client::schema::PaginationWire;
use serde::{Deserialize, Serialize, Serializer};

// ==================== Search Parameters ====================

/// Full parameter set for a transaction search.
///
/// Every setter except `set_page` resets the page to 1, so a changed filter
/// never points past the end of the new result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub account_id: Option<String>,
    pub search_term: Option<String>,
    pub category: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub direction: Option<Direction>,
    pub page: u32,
    pub limit: u32,
    pub sort_by: SortField,
    pub sort_order: SortDirection,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::new(10)
    }
}

impl SearchParams {
    /// Create parameters with the given page size
    pub fn new(limit: u32) -> Self {
        Self {
            account_id: None,
            search_term: None,
            category: None,
            from_date: None,
            to_date: None,
            min_amount: None,
            max_amount: None,
            direction: None,
            page: 1,
            limit,
            sort_by: SortField::default(),
            sort_order: SortDirection::default(),
        }
    }

    pub fn set_account_id(&mut self, account_id: Option<String>) {
        self.account_id = account_id;
        self.page = 1;
    }

    pub fn set_search_term(&mut self, term: Option<String>) {
        self.search_term = term.filter(|t| !t.is_empty());
        self.page = 1;
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category.filter(|c| !c.is_empty());
        self.page = 1;
    }

    pub fn set_date_range(&mut self, from: Option<String>, to: Option<String>) {
        self.from_date = from.filter(|d| !d.is_empty());
        self.to_date = to.filter(|d| !d.is_empty());
        self.page = 1;
    }

    pub fn set_amount_range(&mut self, min: Option<f64>, max: Option<f64>) {
        self.min_amount = min;
        self.max_amount = max;
        self.page = 1;
    }

    pub fn set_direction(&mut self, direction: Option<Direction>) {
        self.direction = direction;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort_by: SortField, sort_order: SortDirection) {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self.page = 1;
    }

    /// Page navigation is the one change that keeps every other parameter
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Build the backend query string (everything the search endpoint takes)
    pub fn to_query(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(ref account_id) = self.account_id {
            parts.push(format!("accountId={}", urlencoding::encode(account_id)));
        }
        if let Some(ref term) = self.search_term {
            parts.push(format!("searchTerm={}", urlencoding::encode(term)));
        }
        if let Some(ref category) = self.category {
            parts.push(format!("category={}", urlencoding::encode(category)));
        }
        if let Some(ref from) = self.from_date {
            parts.push(format!("fromDate={}", urlencoding::encode(from)));
        }
        if let Some(ref to) = self.to_date {
            parts.push(format!("toDate={}", urlencoding::encode(to)));
        }
        if let Some(min) = self.min_amount {
            parts.push(format!("minAmount={}", min));
        }
        if let Some(max) = self.max_amount {
            parts.push(format!("maxAmount={}", max));
        }
        if let Some(direction) = self.direction {
            parts.push(format!("type={}", direction));
        }
        parts.push(format!("page={}", self.page));
        parts.push(format!("limit={}", self.limit));
        parts.push(format!("sortBy={}", self.sort_by));
        parts.push(format!("sortOrder={}", self.sort_order));

        parts.join("&")
    }

    /// One-way projection for the browser address bar: only the account
    /// filter, the search term, and the page (when past the first).
    pub fn url_projection(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(ref account_id) = self.account_id {
            parts.push(format!("accountId={}", urlencoding::encode(account_id)));
        }
        if let Some(ref term) = self.search_term {
            parts.push(format!("searchTerm={}", urlencoding::encode(term)));
        }
        if self.page > 1 {
            parts.push(format!("page={}", self.page));
        }

        parts.join("&")
    }
}

// ==================== Pagination ====================

/// Pagination derived from the last search response
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub pages: u32,
}

impl Pagination {
    pub fn from_wire(wire: PaginationWire) -> Self {
        Self {
            total: wire.total,
            page: wire.page,
            limit: wire.limit,
            pages: wire.pages,
        }
    }
}

// ==================== Page Window ====================

/// One element of the windowed page-button row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl Serialize for PageItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageItem::Page(n) => serializer.serialize_u32(*n),
            PageItem::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Compute the windowed page-button row.
///
/// Seven or fewer pages render in full. Beyond that: the first page, an
/// ellipsis once the current page is past 3, a three-page window centered on
/// the current page (clamped to [2, pages-1]), an ellipsis while more than
/// two pages remain after the window, and the last page.
pub fn page_window(page: u32, pages: u32) -> Vec<PageItem> {
    if pages == 0 {
        return Vec::new();
    }
    if pages <= 7 {
        return (1..=pages).map(PageItem::Page).collect();
    }

    let page = page.clamp(1, pages);
    let mut items = vec![PageItem::Page(1)];

    let start = page.saturating_sub(1).max(2);
    let mut end = (page + 1).min(pages - 1);

    if page > 3 {
        items.push(PageItem::Ellipsis);
    }

    // More than two pages between the window and the last page: collapse them
    // into an ellipsis. Two or fewer: render them instead.
    let trailing_ellipsis = page + 1 < pages && pages - (page + 1) > 2;
    if !trailing_ellipsis {
        end = pages - 1;
    }

    for n in start..=end {
        items.push(PageItem::Page(n));
    }

    if trailing_ellipsis {
        items.push(PageItem::Ellipsis);
    }

    items.push(PageItem::Page(pages));
    items
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn pages_of(items: &[PageItem]) -> Vec<i64> {
        items
            .iter()
            .map(|item| match item {
                PageItem::Page(n) => *n as i64,
                PageItem::Ellipsis => -1,
            })
            .collect()
    }

    #[test]
    fn test_every_filter_change_resets_page() {
        let mut params = SearchParams::new(10);
        params.set_page(4);
        assert_eq!(params.page, 4);

        params.set_search_term(Some("bakery".to_string()));
        assert_eq!(params.page, 1);

        params.set_page(4);
        params.set_category(Some("Food".to_string()));
        assert_eq!(params.page, 1);

        params.set_page(4);
        params.set_date_range(Some("2024-01-01".to_string()), None);
        assert_eq!(params.page, 1);

        params.set_page(4);
        params.set_amount_range(Some(10.0), Some(100.0));
        assert_eq!(params.page, 1);

        params.set_page(4);
        params.set_direction(Some(Direction::Debit));
        assert_eq!(params.page, 1);

        params.set_page(4);
        params.set_sort(SortField::Amount, SortDirection::Asc);
        assert_eq!(params.page, 1);

        params.set_page(4);
        params.set_account_id(Some("acc-1".to_string()));
        assert_eq!(params.page, 1);
    }

    #[test]
    fn test_query_contains_all_set_params() {
        let mut params = SearchParams::new(10);
        params.set_account_id(Some("acc-1".to_string()));
        params.set_search_term(Some("golden sun".to_string()));
        params.set_direction(Some(Direction::Debit));
        params.set_page(3);

        let query = params.to_query();
        assert!(query.contains("accountId=acc-1"));
        assert!(query.contains("searchTerm=golden%20sun"));
        assert!(query.contains("type=DEBIT"));
        assert!(query.contains("page=3"));
        assert!(query.contains("limit=10"));
        assert!(query.contains("sortBy=date"));
        assert!(query.contains("sortOrder=desc"));
    }

    #[test]
    fn test_empty_term_clears_filter() {
        let mut params = SearchParams::new(10);
        params.set_search_term(Some("".to_string()));
        assert!(params.search_term.is_none());
        assert!(!params.to_query().contains("searchTerm"));
    }

    #[test]
    fn test_url_projection_is_minimal() {
        let mut params = SearchParams::new(10);
        params.set_account_id(Some("acc-1".to_string()));
        params.set_category(Some("Food".to_string()));
        assert_eq!(params.url_projection(), "accountId=acc-1");

        params.set_page(2);
        assert_eq!(params.url_projection(), "accountId=acc-1&page=2");

        params.set_page(1);
        assert!(!params.url_projection().contains("page"));
    }

    #[test]
    fn test_window_middle_of_ten_pages() {
        let items = page_window(5, 10);
        assert_eq!(pages_of(&items), vec![1, -1, 4, 5, 6, -1, 10]);
    }

    #[test]
    fn test_window_small_page_counts_render_fully() {
        for page in 1..=5 {
            let items = page_window(page, 5);
            assert_eq!(pages_of(&items), vec![1, 2, 3, 4, 5]);
        }
        assert_eq!(pages_of(&page_window(4, 7)), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_window_near_start() {
        // No leading ellipsis while the window still touches page 2
        assert_eq!(pages_of(&page_window(1, 10)), vec![1, 2, -1, 10]);
        assert_eq!(pages_of(&page_window(2, 10)), vec![1, 2, 3, -1, 10]);
        assert_eq!(pages_of(&page_window(3, 10)), vec![1, 2, 3, 4, -1, 10]);
        assert_eq!(pages_of(&page_window(4, 10)), vec![1, -1, 3, 4, 5, -1, 10]);
    }

    #[test]
    fn test_window_near_end() {
        // No trailing ellipsis once two or fewer pages remain after the window
        assert_eq!(pages_of(&page_window(7, 10)), vec![1, -1, 6, 7, 8, 9, 10]);
        assert_eq!(pages_of(&page_window(8, 10)), vec![1, -1, 7, 8, 9, 10]);
        assert_eq!(pages_of(&page_window(10, 10)), vec![1, -1, 9, 10]);
    }

    #[test]
    fn test_window_zero_pages() {
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn test_page_item_serialization() {
        let items = vec![PageItem::Page(1), PageItem::Ellipsis, PageItem::Page(10)];
        let json = serde_json::to_string(&items).unwrap();
        assert_eq!(json, r#"[1,"...",10]"#);
    }
}
