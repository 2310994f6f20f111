//! # Pizza Admin
//!
//! Administration client for a pizza restaurant backend: menu and customer
//! management, payment transactions, sales statistics and an AI assistant.
//!
//! ## Modules
//!
//! - [`session`]: Session state (token, user id, display mode), token
//!   persistence and the route guard
//! - [`client`]: REST client with a tag-invalidated query cache
//! - [`models`]: Wire types for the backend resources
//! - [`views`]: Headless view models for each screen
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pizza_admin::{ApiClient, Config, LoginView, ProductsView, SessionStore, TokenStorage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = ApiClient::new(&config.api)?;
//!     let mut store = SessionStore::restore(TokenStorage::new(config.session.state_path()));
//!
//!     let mut login = LoginView::new("admin@example.com", "secret");
//!     login.submit(&client, &mut store).await?;
//!
//!     let mut products = ProductsView::new();
//!     products.refresh(&client, store.session()).await?;
//!     println!("{} menu items", products.items().len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod models;
pub mod session;
pub mod views;

pub use client::{
    ApiClient, ClientError, ClientResult, Operation, PaymentQuery, QueryCache, ResourceTag,
    SortDirection, SortModel, StatsQuery, StatsResource,
};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, SessionConfig};

pub use models::{
    ChatMessage, Customer, CustomerPayload, MenuCategory, MenuItem, MenuItemPayload, Payment,
    PaymentPage, PaymentStatus, PaymentSummary, Role, Sender,
};

pub use session::{BearerToken, Mode, Route, Session, SessionError, SessionStore, TokenStorage};

pub use views::{
    ChartSeries, ChartTab, ChartsView, ChatView, CustomerDraft, CustomersView, DashboardSummary,
    DashboardView, LoginView, MenuFields, ProductsView, TransactionsView, ViewError, ViewResult,
};
