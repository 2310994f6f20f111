mod common;

use common::{MockBackend, ADMIN_EMAIL, ADMIN_ID, ADMIN_PASSWORD, TOKEN};
use pizza_admin::config::ApiConfig;
use pizza_admin::{
    ApiClient, ClientError, MenuCategory, MenuItemPayload, PaymentQuery, Session, SortDirection,
    SortModel, StatsQuery,
};
use std::collections::HashSet;

fn payload(name: &str) -> MenuItemPayload {
    MenuItemPayload {
        name: name.to_string(),
        description: "Fresh".to_string(),
        base_price: 11.0,
        size: None,
        crust_type: None,
    }
}

#[tokio::test]
async fn test_login_returns_token_and_user() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let response = client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    assert_eq!(response.token, TOKEN);
    assert_eq!(response.user.id, ADMIN_ID);

    let hit = backend.last_hit("/api/user/login").unwrap();
    assert_eq!(hit.method, "POST");
    assert!(hit.authorization.is_none());
    assert_eq!(hit.body.unwrap()["email"], ADMIN_EMAIL);
}

#[tokio::test]
async fn test_login_failure_carries_server_message() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let err = client.login(ADMIN_EMAIL, "wrong").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.user_message(), "Invalid email or password");
}

#[tokio::test]
async fn test_requests_carry_bearer_token() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    client.list_customers(&backend.session()).await.unwrap();

    let hit = backend.last_hit("/api/user/getAllUser").unwrap();
    assert_eq!(hit.authorization.as_deref(), Some("Bearer test-token"));
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let err = client.list_customers(&Session::new()).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 401, .. }));
    assert!(backend.last_hit("/api/user/getAllUser").unwrap().authorization.is_none());
}

#[tokio::test]
async fn test_fresh_query_served_from_cache() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    let session = backend.session();
    backend.add_menu_item("pizza", "Margherita");

    let first = client.list_menu(&session, MenuCategory::Pizza).await.unwrap();
    let second = client.list_menu(&session, MenuCategory::Pizza).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].category, MenuCategory::Pizza);
    assert_eq!(backend.count("GET", "/api/pizza/getAllPizza"), 1);
}

#[tokio::test]
async fn test_create_then_list_shows_item_once() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    let session = backend.session();

    assert!(client.list_menu(&session, MenuCategory::Pizza).await.unwrap().is_empty());

    client
        .create_menu_item(&session, MenuCategory::Pizza, &payload("Diavola"))
        .await
        .unwrap();
    let items = client.list_menu(&session, MenuCategory::Pizza).await.unwrap();

    assert_eq!(items.iter().filter(|i| i.name == "Diavola").count(), 1);
    assert_eq!(backend.count("GET", "/api/pizza/getAllPizza"), 2);
}

#[tokio::test]
async fn test_delete_then_list_omits_item() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    let session = backend.session();
    let id = backend.add_menu_item("side", "Garlic Bread");

    assert_eq!(client.list_menu(&session, MenuCategory::Side).await.unwrap().len(), 1);

    let body = client
        .delete_menu_item(&session, MenuCategory::Side, &id)
        .await
        .unwrap();
    assert!(body.is_null());

    let items = client.list_menu(&session, MenuCategory::Side).await.unwrap();
    assert!(items.iter().all(|i| i.id != id));
}

#[tokio::test]
async fn test_invalidation_only_touches_declared_tags() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    let session = backend.session();

    client.list_menu(&session, MenuCategory::Pizza).await.unwrap();
    client.list_menu(&session, MenuCategory::Drink).await.unwrap();

    client
        .create_menu_item(&session, MenuCategory::Drink, &payload("Lemonade"))
        .await
        .unwrap();

    client.list_menu(&session, MenuCategory::Pizza).await.unwrap();
    client.list_menu(&session, MenuCategory::Drink).await.unwrap();

    assert_eq!(backend.count("GET", "/api/pizza/getAllPizza"), 1);
    assert_eq!(backend.count("GET", "/api/drink/getAllDrink"), 2);
}

#[tokio::test]
async fn test_pizza_delete_hits_only_pizza_endpoint() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    let id = backend.add_menu_item("pizza", "Hawaiian");

    client
        .delete_menu_item(&backend.session(), MenuCategory::Pizza, &id)
        .await
        .unwrap();

    assert_eq!(backend.count("DELETE", &format!("/api/pizza/deletePizza/{id}")), 1);
    assert_eq!(backend.count_prefix("DELETE", "/api/"), 1);
}

#[tokio::test]
async fn test_payment_pages_are_disjoint() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    let session = backend.session();

    let mut seen = HashSet::new();
    for page in 0..3 {
        let result = client
            .list_payments(&session, &PaymentQuery::page(page, 4))
            .await
            .unwrap();
        assert_eq!(result.total, 10);
        for payment in result.payments {
            assert!(seen.insert(payment.id), "payment listed on two pages");
        }
    }
    assert_eq!(seen.len(), 10);
}

#[tokio::test]
async fn test_payment_sort_and_search_are_sent() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let query = PaymentQuery {
        sort: Some(SortModel::new("amount", SortDirection::Desc)),
        search: Some("ord-".to_string()),
        ..PaymentQuery::page(0, 3)
    };
    let page = client.list_payments(&backend.session(), &query).await.unwrap();

    let amounts: Vec<f64> = page.payments.iter().map(|p| p.amount).collect();
    assert_eq!(amounts, vec![19.0, 18.0, 17.0]);

    let hit = backend.last_hit("/api/payment/getAllPayments").unwrap();
    assert_eq!(
        hit.query.as_deref(),
        Some("page=0&pageSize=3&sort=%7B%22field%22%3A%22amount%22%2C%22sort%22%3A%22desc%22%7D&search=ord-")
    );
}

#[tokio::test]
async fn test_stats_parameters() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    let session = backend.session();

    let users = client
        .top_active_users(&session, &StatsQuery::default().with_metric("orderCount"))
        .await
        .unwrap();
    assert_eq!(users.top_users.len(), 2);

    let products = client
        .top_selling_products(&session, &StatsQuery::default().with_limit(10))
        .await
        .unwrap();
    assert_eq!(products.top_products[0].product_name, "Margherita");

    let users_hit = backend.last_hit("/api/stats/top-active-users").unwrap();
    assert_eq!(users_hit.query.as_deref(), Some("metric=orderCount"));
    let products_hit = backend.last_hit("/api/stats/top-selling-products").unwrap();
    assert_eq!(products_hit.query.as_deref(), Some("limit=10"));
}

#[tokio::test]
async fn test_server_error_message_surfaces() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let err = client
        .delete_customer(&backend.session(), "missing")
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "User not found");
}

#[tokio::test]
async fn test_get_user_by_id() {
    let backend = MockBackend::start().await;
    let client = backend.client();
    let id = backend.add_user("mario", "mario@pizza.io");

    let user = client.get_user(&backend.session(), &id).await.unwrap();
    assert_eq!(user.id, id);
    assert_eq!(user.username, "mario");
    assert_eq!(backend.count("GET", &format!("/api/user/getUser/{id}")), 1);
}

#[tokio::test]
async fn test_record_id_is_path_encoded() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let _ = client.delete_customer(&backend.session(), "a b/c").await;

    assert_eq!(backend.count("DELETE", "/api/user/deleteUser/a%20b%2Fc"), 1);
}

#[tokio::test]
async fn test_chat_reply_is_plain_text() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let reply = client
        .send_chat(&backend.session(), "How are sales?")
        .await
        .unwrap();
    assert_eq!(reply, "Sales look steady. Follow up on the pending payments.");

    let hit = backend.last_hit("/chat").unwrap();
    assert_eq!(hit.body.unwrap()["prompt"], "How are sales?");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let config = ApiConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        request_timeout_secs: 2,
    };
    let client = ApiClient::new(&config).unwrap();

    let err = client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(err.user_message(), "Failed to get a response from the server");
}
