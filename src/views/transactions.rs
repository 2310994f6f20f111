//! Payment transactions screen.
//!
//! Paging, sorting and search are all server-side. Every parameter change
//! re-fetches, and a response is only applied while its parameters are still
//! the current ones.

use super::{ViewError, ViewResult};
use crate::client::{ApiClient, ClientResult, PaymentQuery, SortModel};
use crate::models::{Payment, PaymentPage};
use crate::session::Session;

pub const PAGE_SIZE_OPTIONS: [u32; 3] = [20, 50, 100];

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRow {
    pub id: String,
    pub order_id: String,
    pub request_id: String,
    pub amount: String,
    pub status: String,
    pub created_at: String,
}

impl From<&Payment> for PaymentRow {
    fn from(p: &Payment) -> Self {
        Self {
            id: p.id.clone(),
            order_id: p.order_id.clone(),
            request_id: p.request_id.clone(),
            amount: p.amount_display(),
            status: p.status.to_string(),
            created_at: p.created_at_display(),
        }
    }
}

#[derive(Debug, Default)]
pub struct TransactionsView {
    params: PaymentQuery,
    search_input: String,
    page: Option<PaymentPage>,
    error: Option<String>,
}

impl TransactionsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn params(&self) -> &PaymentQuery {
        &self.params
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.page.is_none() && self.error.is_none()
    }

    /// Server-wide row count of the last applied page
    pub fn total(&self) -> u64 {
        self.page.as_ref().map(|p| p.total).unwrap_or(0)
    }

    pub fn rows(&self) -> Vec<PaymentRow> {
        self.page
            .as_ref()
            .map(|p| p.payments.iter().map(PaymentRow::from).collect())
            .unwrap_or_default()
    }

    pub fn set_page(&mut self, page: u32) {
        self.params.page = page;
    }

    /// Only the offered sizes are accepted; changing size returns to page 0
    pub fn set_page_size(&mut self, size: u32) -> ViewResult<()> {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            return Err(ViewError::Validation(format!(
                "Page size must be one of {PAGE_SIZE_OPTIONS:?}"
            )));
        }
        if self.params.page_size != size {
            self.params.page_size = size;
            self.params.page = 0;
        }
        Ok(())
    }

    pub fn set_sort(&mut self, sort: Option<SortModel>) {
        self.params.sort = sort;
    }

    /// Edit the search box without triggering a fetch
    pub fn set_search_input(&mut self, input: impl Into<String>) {
        self.search_input = input.into();
    }

    /// Apply the search box: the trimmed text becomes the server-side search
    /// and paging restarts at 0. An empty box clears the search.
    pub fn apply_search(&mut self) {
        let trimmed = self.search_input.trim();
        self.params.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self.params.page = 0;
    }

    /// Apply a result fetched for `params`. Returns false (and leaves the view
    /// untouched) when `params` are no longer current.
    pub fn apply(&mut self, params: &PaymentQuery, result: ClientResult<PaymentPage>) -> bool {
        if params != &self.params {
            tracing::debug!(page = params.page, "Dropping payments response for stale parameters");
            return false;
        }
        match result {
            Ok(page) => {
                self.page = Some(page);
                self.error = None;
            }
            Err(e) => {
                self.error = Some(format!("Failed to load transactions: {}", e.user_message()));
            }
        }
        true
    }

    /// Fetch with the current parameters and apply the result
    pub async fn refresh(&mut self, client: &ApiClient, session: &Session) -> ViewResult<()> {
        let params = self.params.clone();
        match fetch(client, session, params.clone()).await {
            Ok(page) => {
                self.apply(&params, Ok(page));
                Ok(())
            }
            Err(e) => {
                self.error = Some(format!("Failed to load transactions: {}", e.user_message()));
                Err(e.into())
            }
        }
    }
}

/// Fetch one page without touching any view, so callers can race requests
/// and hand results back through [`TransactionsView::apply`].
pub async fn fetch(
    client: &ApiClient,
    session: &Session,
    params: PaymentQuery,
) -> ClientResult<PaymentPage> {
    client.list_payments(session, &params).await
}
