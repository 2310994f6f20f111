//! In-process mock of the restaurant backend.
//!
//! Serves the REST surface the admin client talks to on an ephemeral port and
//! records every request it receives.

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, Request, State},
    http::{header::AUTHORIZATION, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use pizza_admin::config::ApiConfig;
use pizza_admin::{ApiClient, BearerToken, Session};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub const TOKEN: &str = "test-token";
pub const ADMIN_EMAIL: &str = "admin@pizza.io";
pub const ADMIN_PASSWORD: &str = "secret";
pub const ADMIN_ID: &str = "u-admin";

const CATEGORIES: [(&str, &str); 4] = [
    ("pizza", "Pizza"),
    ("drink", "Drink"),
    ("side", "Side"),
    ("salad", "Salad"),
];

/// One request as the backend saw it
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct MockState {
    pub hits: Mutex<Vec<Hit>>,
    pub users: Mutex<Vec<Value>>,
    pub menu: Mutex<HashMap<String, Vec<Value>>>,
    pub payments: Mutex<Vec<Value>>,
    /// Menu slugs whose list endpoint answers 500
    pub failing_menus: Mutex<HashSet<String>>,
    next_id: AtomicU64,
}

impl MockState {
    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockBackend {
    /// Start a backend seeded with ten payments: two pending, seven
    /// successful and one failed.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        {
            let mut payments = state.payments.lock().unwrap();
            for i in 0..10u32 {
                let status = match i {
                    0 | 5 => "pending",
                    9 => "failed",
                    _ => "success",
                };
                payments.push(json!({
                    "_id": format!("pay-{i}"),
                    "orderId": format!("ord-{i}"),
                    "requestId": format!("req-{i}"),
                    "amount": 10.0 + f64::from(i),
                    "status": status,
                    "createdAt": format!("2025-03-{:02}T07:30:00.000Z", i + 1),
                }));
            }
        }

        let router = build_router(Arc::clone(&state));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn client(&self) -> ApiClient {
        let config = ApiConfig {
            base_url: self.base_url.clone(),
            request_timeout_secs: 5,
        };
        ApiClient::new(&config).unwrap()
    }

    pub fn session(&self) -> Session {
        Session::with_token(BearerToken::new(TOKEN))
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.state.hits.lock().unwrap().clone()
    }

    /// Requests matching a method and an exact path
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.hits()
            .iter()
            .filter(|h| h.method == method && h.path == path)
            .count()
    }

    /// Requests whose path starts with the prefix
    pub fn count_prefix(&self, method: &str, prefix: &str) -> usize {
        self.hits()
            .iter()
            .filter(|h| h.method == method && h.path.starts_with(prefix))
            .count()
    }

    pub fn last_hit(&self, path: &str) -> Option<Hit> {
        self.hits().into_iter().rev().find(|h| h.path == path)
    }

    pub fn add_menu_item(&self, slug: &str, name: &str) -> String {
        let id = self.state.next_id(slug);
        self.state
            .menu
            .lock()
            .unwrap()
            .entry(slug.to_string())
            .or_default()
            .push(json!({
                "_id": id,
                "name": name,
                "description": format!("{name} description"),
                "base_price": 9.5,
                "image_url": null,
            }));
        id
    }

    pub fn fail_menu(&self, slug: &str) {
        self.state.failing_menus.lock().unwrap().insert(slug.to_string());
    }

    pub fn add_user(&self, username: &str, email: &str) -> String {
        let id = self.state.next_id("user");
        self.state.users.lock().unwrap().push(json!({
            "_id": id,
            "username": username,
            "email": email,
            "phone": "5551234567",
            "role": "user",
        }));
        id
    }
}

fn build_router(state: Arc<MockState>) -> Router {
    let mut router = Router::new()
        .route("/api/user/login", post(login))
        .route("/api/user/getAllUser", get(list_users))
        .route("/api/user/getUser/:id", get(get_user))
        .route("/api/user/createUser", post(create_user))
        .route("/api/user/updateUser/:id", put(update_user))
        .route("/api/user/deleteUser/:id", delete(delete_user))
        .route("/api/payment/getAllPayments", get(list_payments))
        .route("/api/stats/:name", get(stats))
        .route("/chat", post(chat));

    for (slug, name) in CATEGORIES {
        router = router
            .route(&format!("/api/{slug}/getAll{name}"), get(list_menu))
            .route(&format!("/api/{slug}/create{name}"), post(create_menu))
            .route(&format!("/api/{slug}/update{name}/:id"), put(update_menu))
            .route(&format!("/api/{slug}/delete{name}/:id"), delete(delete_menu));
    }

    router
        .layer(middleware::from_fn_with_state(Arc::clone(&state), record))
        .with_state(state)
}

/// Record the request, then reject anything but login without the token
async fn record(State(state): State<Arc<MockState>>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    let authorization = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.hits.lock().unwrap().push(Hit {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        authorization: authorization.clone(),
        body: serde_json::from_slice(&bytes).ok(),
    });

    let expected = format!("Bearer {TOKEN}");
    if parts.uri.path() != "/api/user/login" && authorization.as_deref() != Some(expected.as_str()) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    next.run(Request::from_parts(parts, axum::body::Body::from(bytes)))
        .await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn category(uri: &Uri) -> String {
    uri.path().split('/').nth(2).unwrap_or_default().to_string()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == ADMIN_EMAIL && body["password"] == ADMIN_PASSWORD {
        Json(json!({ "token": TOKEN, "user": { "_id": ADMIN_ID, "email": ADMIN_EMAIL } }))
            .into_response()
    } else {
        error(StatusCode::UNAUTHORIZED, "Invalid email or password")
    }
}

async fn list_users(State(state): State<Arc<MockState>>) -> Json<Value> {
    Json(Value::Array(state.users.lock().unwrap().clone()))
}

async fn get_user(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Response {
    let users = state.users.lock().unwrap();
    match users.iter().find(|u| u["_id"] == id.as_str()) {
        Some(user) => Json(user.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn create_user(State(state): State<Arc<MockState>>, Json(mut body): Json<Value>) -> Response {
    let mut users = state.users.lock().unwrap();
    if users.iter().any(|u| u["email"] == body["email"]) {
        return error(StatusCode::BAD_REQUEST, "Email already exists");
    }
    body["_id"] = json!(state.next_id("user"));
    users.push(body);
    (StatusCode::CREATED, Json(json!({ "message": "User created" }))).into_response()
}

async fn update_user(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut users = state.users.lock().unwrap();
    match users.iter_mut().find(|u| u["_id"] == id.as_str()) {
        Some(user) => {
            merge(user, body);
            Json(user.clone()).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "User not found"),
    }
}

async fn delete_user(State(state): State<Arc<MockState>>, Path(id): Path<String>) -> Response {
    let mut users = state.users.lock().unwrap();
    let before = users.len();
    users.retain(|u| u["_id"] != id.as_str());
    if users.len() == before {
        return error(StatusCode::NOT_FOUND, "User not found");
    }
    Json(json!({ "message": "User deleted" })).into_response()
}

async fn list_menu(State(state): State<Arc<MockState>>, uri: Uri) -> Response {
    let slug = category(&uri);
    if state.failing_menus.lock().unwrap().contains(&slug) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Menu unavailable");
    }
    let menu = state.menu.lock().unwrap();
    Json(Value::Array(menu.get(&slug).cloned().unwrap_or_default())).into_response()
}

async fn create_menu(
    State(state): State<Arc<MockState>>,
    uri: Uri,
    Json(mut body): Json<Value>,
) -> Response {
    let slug = category(&uri);
    body["_id"] = json!(state.next_id(&slug));
    state
        .menu
        .lock()
        .unwrap()
        .entry(slug)
        .or_default()
        .push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_menu(
    State(state): State<Arc<MockState>>,
    uri: Uri,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut menu = state.menu.lock().unwrap();
    let item = menu
        .get_mut(&category(&uri))
        .and_then(|items| items.iter_mut().find(|i| i["_id"] == id.as_str()));
    match item {
        Some(item) => {
            merge(item, body);
            Json(item.clone()).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Item not found"),
    }
}

async fn delete_menu(
    State(state): State<Arc<MockState>>,
    uri: Uri,
    Path(id): Path<String>,
) -> Response {
    let mut menu = state.menu.lock().unwrap();
    let Some(items) = menu.get_mut(&category(&uri)) else {
        return error(StatusCode::NOT_FOUND, "Item not found");
    };
    let before = items.len();
    items.retain(|i| i["_id"] != id.as_str());
    if items.len() == before {
        return error(StatusCode::NOT_FOUND, "Item not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_payments(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let size: usize = params
        .get("pageSize")
        .and_then(|p| p.parse().ok())
        .unwrap_or(20);

    let mut payments: Vec<Value> = state.payments.lock().unwrap().clone();
    if let Some(search) = params.get("search") {
        payments.retain(|p| {
            p["orderId"]
                .as_str()
                .map(|o| o.contains(search.as_str()))
                .unwrap_or(false)
        });
    }
    if let Some(sort) = params.get("sort").and_then(|s| serde_json::from_str::<Value>(s).ok()) {
        if sort["field"] == "amount" {
            payments.sort_by(|a, b| {
                let (a, b) = (a["amount"].as_f64().unwrap_or(0.0), b["amount"].as_f64().unwrap_or(0.0));
                a.total_cmp(&b)
            });
            if sort["sort"] == "desc" {
                payments.reverse();
            }
        }
    }

    let total = payments.len();
    let rows: Vec<Value> = payments.into_iter().skip(page * size).take(size).collect();
    Json(json!({ "payments": rows, "total": total }))
}

async fn stats(Path(name): Path<String>) -> Response {
    let body = match name.as_str() {
        "average-order-value" => json!({ "averageOrderValue": 14.5, "totalOrders": 10 }),
        "order-count-by-status" => json!({ "orderCountByStatus": [
            { "status": "pending", "count": 2 },
            { "status": "success", "count": 7 },
            { "status": "failed", "count": 1 },
        ]}),
        "top-active-users" => json!({ "topUsers": [
            { "username": "ann", "orderCount": 4, "totalSpent": 58.0 },
            { "username": "bob", "orderCount": 2 },
        ]}),
        "revenue-by-day" => json!({ "dailyRevenue": [
            { "date": "2025-03-01", "totalRevenue": 40.0 },
            { "date": "2025-03-02", "totalRevenue": 105.0 },
        ]}),
        "total-revenue" => json!({ "totalRevenue": 145.0 }),
        "top-selling-products" => json!({ "topProducts": [
            { "productName": "Margherita", "totalQuantity": 12 },
        ]}),
        _ => return error(StatusCode::NOT_FOUND, "Unknown statistic"),
    };
    Json(body).into_response()
}

async fn chat(Json(body): Json<Value>) -> Response {
    match body["prompt"].as_str() {
        Some(prompt) if !prompt.is_empty() => {
            "Sales look steady. Follow up on the pending payments.".into_response()
        }
        _ => error(StatusCode::BAD_REQUEST, "Prompt is required"),
    }
}

fn merge(target: &mut Value, patch: Value) {
    if let (Some(target), Value::Object(patch)) = (target.as_object_mut(), patch) {
        for (k, v) in patch {
            target.insert(k, v);
        }
    }
}
