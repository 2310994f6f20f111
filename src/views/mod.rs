//! Views
//!
//! Headless view models for each screen of the dashboard. A view owns its
//! form contents, its last fetched snapshot and its error banner; rendering is
//! left to the caller (the CLI prints tables).
//!
//! Views are driven through `&mut self`, so a single view instance handles one
//! action at a time. Every error stays scoped to the view that produced it.

mod charts;
mod chat;
mod customers;
mod dashboard;
mod editor;
mod login;
mod products;
mod transactions;

pub use charts::{ChartSeries, ChartTab, ChartsView};
pub use chat::{build_prompt, ChatView, GREETING};
pub use customers::{CustomerDraft, CustomersView};
pub use dashboard::{DashboardSummary, DashboardView};
pub use editor::{Editor, EditorState};
pub use login::{LoginView, LOGIN_TRANSPORT_ERROR};
pub use products::{MenuDraft, MenuFields, MenuUpdate, ProductsView};
pub use transactions::{fetch as fetch_payments, PaymentRow, TransactionsView, PAGE_SIZE_OPTIONS};

use crate::client::ClientError;
use crate::session::SessionError;
use thiserror::Error;

/// Errors surfaced by view actions
#[derive(Error, Debug)]
pub enum ViewError {
    /// Caught before any network call
    #[error("{0}")]
    Validation(String),

    /// Backend call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Token persistence failed
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Action not valid in the view's current state
    #[error("{0}")]
    InvalidState(String),
}

/// Result type for view actions
pub type ViewResult<T> = Result<T, ViewError>;

/// Trimmed non-empty check used by form validation
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
