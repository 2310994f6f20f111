//! Backend REST API Client
//!
//! One method per declared [`Operation`]. Every call takes the session
//! explicitly so the bearer token is read at call time, never from an ambient
//! global.

use super::cache::{CacheKey, QueryCache};
use super::error::{api_error, ClientError, ClientResult, GENERIC_ERROR};
use super::params::{with_query, PaymentQuery, StatsQuery};
use super::tags::{Operation, ResourceTag, StatsResource};
use crate::config::ApiConfig;
use crate::models::{
    AverageOrderValue, Customer, CustomerPayload, LoginRequest, LoginResponse, MenuCategory,
    MenuItem, MenuItemPayload, OrderCountByStatus, PaymentPage, RevenueByDay, TopActiveUsers,
    TopSellingProducts, TotalRevenue,
};
use crate::session::Session;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::sync::RwLock;

/// Reply text used when the assistant answers with something other than a string
pub const NO_REPLY: &str = "No reply";

/// Login failure text when the server gives no reason
pub const LOGIN_FAILED: &str = "Login failed";

/// REST client for the restaurant backend
pub struct ApiClient {
    client: Client,
    base_url: String,
    cache: RwLock<QueryCache>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    prompt: &'a str,
}

/// Login body may carry the error instead of a token on a 2xx
#[derive(Deserialize)]
struct LoginBody {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<crate::models::LoginUser>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiClient {
    /// Create a new client with the given configuration
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache: RwLock::new(QueryCache::new()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Mark cached responses under the given tags stale
    pub async fn invalidate(&self, tags: &[ResourceTag]) {
        let count = self.cache.write().await.invalidate(tags);
        tracing::debug!(?tags, entries = count, "Invalidated cached responses");
    }

    /// Issue one HTTP request and return the raw body of a 2xx response
    async fn send(
        &self,
        session: Option<&Session>,
        operation: Operation,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> ClientResult<String> {
        let url = format!("{}{}", self.base_url, path);
        let request_id = uuid::Uuid::new_v4();

        tracing::debug!(
            request_id = %request_id,
            operation = %operation,
            method = %operation.method(),
            path = %path,
            "Sending request"
        );

        let mut req = self
            .client
            .request(operation.method(), &url)
            .header(CONTENT_TYPE, "application/json");
        if operation.requires_auth() {
            if let Some(token) = session.and_then(|s| s.token()) {
                req = req.header(AUTHORIZATION, token.header_value());
            }
        }
        if let Some(body) = body {
            req = req.body(body);
        }

        let response = req.send().await.map_err(|e| {
            tracing::warn!(request_id = %request_id, error = %e, "Request failed");
            ClientError::Transport(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(text)
        } else {
            let fallback = if operation == Operation::Login {
                LOGIN_FAILED
            } else {
                GENERIC_ERROR
            };
            let err = api_error(status.as_u16(), &text, fallback);
            tracing::warn!(
                request_id = %request_id,
                operation = %operation,
                status = status.as_u16(),
                error = %err,
                "API error"
            );
            Err(err)
        }
    }

    /// Cached read. A fresh entry is returned without a network call.
    async fn query<T: DeserializeOwned>(
        &self,
        session: &Session,
        operation: Operation,
        path: String,
    ) -> ClientResult<T> {
        let tag = operation
            .provides()
            .ok_or_else(|| ClientError::Decode(format!("{} is not a query", operation)))?;
        let key = CacheKey::new(operation, path.clone());

        let ticket = {
            let mut cache = self.cache.write().await;
            if let Some(value) = cache.fresh(&key) {
                tracing::debug!(operation = %operation, path = %path, "Cache hit");
                return Ok(serde_json::from_value(value.clone())?);
            }
            cache.begin(key, tag)
        };

        let text = self.send(Some(session), operation, &path, None).await?;
        let value: Value = serde_json::from_str(&text)?;

        let value = self.cache.write().await.resolve(ticket, value).into_value();
        Ok(serde_json::from_value(value)?)
    }

    /// Mutation. On success every tag the operation declares is marked stale.
    async fn mutate<B: Serialize>(
        &self,
        session: &Session,
        operation: Operation,
        id: Option<&str>,
        body: Option<&B>,
    ) -> ClientResult<Value> {
        let path = operation.path(id);
        let body = body.map(serde_json::to_vec).transpose()?;
        let text = self.send(Some(session), operation, &path, body).await?;

        self.invalidate(operation.invalidates()).await;

        Ok(parse_lenient(&text))
    }

    // ============================================
    // Authentication
    // ============================================

    /// Exchange credentials for a bearer token. Sent without `Authorization`.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let body = serde_json::to_vec(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let operation = Operation::Login;
        let text = self.send(None, operation, &operation.path(None), Some(body)).await?;

        let parsed: LoginBody = serde_json::from_str(&text).map_err(|_| ClientError::Api {
            status: 200,
            message: LOGIN_FAILED.to_string(),
        })?;
        match (parsed.token.filter(|t| !t.is_empty()), parsed.user) {
            (Some(token), Some(user)) => Ok(LoginResponse { token, user }),
            _ => Err(ClientError::Api {
                status: 200,
                message: parsed.error.unwrap_or_else(|| LOGIN_FAILED.to_string()),
            }),
        }
    }

    // ============================================
    // Customers
    // ============================================

    pub async fn get_user(&self, session: &Session, id: &str) -> ClientResult<Customer> {
        let op = Operation::GetUser;
        self.query(session, op, op.path(Some(id))).await
    }

    pub async fn list_customers(&self, session: &Session) -> ClientResult<Vec<Customer>> {
        let op = Operation::GetCustomers;
        self.query(session, op, op.path(None)).await
    }

    pub async fn create_customer(
        &self,
        session: &Session,
        payload: &CustomerPayload,
    ) -> ClientResult<Value> {
        self.mutate(session, Operation::CreateUser, None, Some(payload))
            .await
    }

    pub async fn update_customer(
        &self,
        session: &Session,
        id: &str,
        payload: &CustomerPayload,
    ) -> ClientResult<Value> {
        self.mutate(session, Operation::UpdateUser, Some(id), Some(payload))
            .await
    }

    pub async fn delete_customer(&self, session: &Session, id: &str) -> ClientResult<Value> {
        self.mutate::<()>(session, Operation::DeleteUser, Some(id), None)
            .await
    }

    // ============================================
    // Menu
    // ============================================

    /// List one category; items come back stamped with that category
    pub async fn list_menu(
        &self,
        session: &Session,
        category: MenuCategory,
    ) -> ClientResult<Vec<MenuItem>> {
        let op = Operation::ListMenu(category);
        let items: Vec<MenuItem> = self.query(session, op, op.path(None)).await?;
        Ok(items
            .into_iter()
            .map(|item| item.with_category(category))
            .collect())
    }

    pub async fn create_menu_item(
        &self,
        session: &Session,
        category: MenuCategory,
        payload: &MenuItemPayload,
    ) -> ClientResult<Value> {
        self.mutate(session, Operation::CreateMenuItem(category), None, Some(payload))
            .await
    }

    pub async fn update_menu_item(
        &self,
        session: &Session,
        category: MenuCategory,
        id: &str,
        payload: &MenuItemPayload,
    ) -> ClientResult<Value> {
        self.mutate(
            session,
            Operation::UpdateMenuItem(category),
            Some(id),
            Some(payload),
        )
        .await
    }

    pub async fn delete_menu_item(
        &self,
        session: &Session,
        category: MenuCategory,
        id: &str,
    ) -> ClientResult<Value> {
        self.mutate::<()>(session, Operation::DeleteMenuItem(category), Some(id), None)
            .await
    }

    // ============================================
    // Payments
    // ============================================

    /// One server-side page. Filtering and sorting are the server's job.
    pub async fn list_payments(
        &self,
        session: &Session,
        query: &PaymentQuery,
    ) -> ClientResult<PaymentPage> {
        let op = Operation::GetPayments;
        let path = with_query(op.path(None), &query.to_pairs());
        self.query(session, op, path).await
    }

    // ============================================
    // Statistics
    // ============================================

    async fn stats<T: DeserializeOwned>(
        &self,
        session: &Session,
        resource: StatsResource,
        query: &StatsQuery,
    ) -> ClientResult<T> {
        let op = Operation::Stats(resource);
        let path = with_query(op.path(None), &query.to_pairs());
        self.query(session, op, path).await
    }

    pub async fn average_order_value(
        &self,
        session: &Session,
        query: &StatsQuery,
    ) -> ClientResult<AverageOrderValue> {
        self.stats(session, StatsResource::AverageOrderValue, query)
            .await
    }

    pub async fn order_count_by_status(
        &self,
        session: &Session,
        query: &StatsQuery,
    ) -> ClientResult<OrderCountByStatus> {
        self.stats(session, StatsResource::OrderCountByStatus, query)
            .await
    }

    pub async fn top_active_users(
        &self,
        session: &Session,
        query: &StatsQuery,
    ) -> ClientResult<TopActiveUsers> {
        self.stats(session, StatsResource::TopActiveUsers, query)
            .await
    }

    pub async fn revenue_by_day(
        &self,
        session: &Session,
        query: &StatsQuery,
    ) -> ClientResult<RevenueByDay> {
        self.stats(session, StatsResource::RevenueByDay, query).await
    }

    pub async fn total_revenue(
        &self,
        session: &Session,
        query: &StatsQuery,
    ) -> ClientResult<TotalRevenue> {
        self.stats(session, StatsResource::TotalRevenue, query).await
    }

    pub async fn top_selling_products(
        &self,
        session: &Session,
        query: &StatsQuery,
    ) -> ClientResult<TopSellingProducts> {
        self.stats(session, StatsResource::TopSellingProducts, query)
            .await
    }

    // ============================================
    // Assistant
    // ============================================

    /// Send an assembled prompt; the reply is plain text
    pub async fn send_chat(&self, session: &Session, prompt: &str) -> ClientResult<String> {
        let op = Operation::SendChatMessage;
        let body = serde_json::to_vec(&ChatRequest { prompt })?;
        let text = self.send(Some(session), op, &op.path(None), Some(body)).await?;
        self.invalidate(op.invalidates()).await;

        Ok(chat_reply(&text))
    }
}

/// JSON body; an empty body is `Null` and plain text is kept as a string
fn parse_lenient(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// A JSON string literal is unwrapped, other JSON yields [`NO_REPLY`], and a
/// non-JSON body is the reply itself.
fn chat_reply(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::String(reply)) => reply,
        Ok(_) => NO_REPLY.to_string(),
        Err(_) if text.trim().is_empty() => NO_REPLY.to_string(),
        Err(_) => text.to_string(),
    }
}
