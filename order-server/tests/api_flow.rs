//! End-to-end HTTP tests against an in-memory database

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use order_server::{Config, ServerState, build_app};

struct TestApp {
    state: ServerState,
    app: Router,
}

impl TestApp {
    async fn new() -> Self {
        let mut config = Config::from_env();
        config.cache_enabled = true;
        config.timezone = chrono_tz::Tz::UTC;
        config.public_base_url = "http://pos.test/".to_string();
        let state = ServerState::in_memory(config).await.unwrap();
        let app = build_app(&state).with_state(state.clone());
        Self { state, app }
    }

    fn token(&self, role: &str) -> String {
        self.state
            .jwt_service
            .generate_token(&format!("{role}-1"), role, role, &[])
            .unwrap()
    }

    async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn seed_table(&self, number: &str) -> i64 {
        let admin = self.token("admin");
        let (status, table) = self
            .call(
                Method::POST,
                "/api/tables",
                Some(&admin),
                Some(json!({ "table_number": number })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{table}");
        table["id"].as_i64().unwrap()
    }

    async fn seed_item(&self, name: &str, price: f64, cost: f64) -> i64 {
        let admin = self.token("admin");
        let (status, item) = self
            .call(
                Method::POST,
                "/api/menu-items",
                Some(&admin),
                Some(json!({
                    "name": name,
                    "price": price,
                    "cost": cost,
                    "stock_quantity": 20,
                    "category": "Mains"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{item}");
        item["id"].as_i64().unwrap()
    }
}

fn cart(a: i64, b: i64) -> Value {
    json!([
        { "menu_item_id": a, "quantity": 2, "unit_price": 10.0, "subtotal": 20.0, "notes": null },
        { "menu_item_id": b, "quantity": 1, "unit_price": 5.0, "subtotal": 5.0, "notes": null }
    ])
}

#[tokio::test]
async fn health_is_public() {
    let t = TestApp::new().await;
    let (status, body) = t.call(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn api_requires_token() {
    let t = TestApp::new().await;
    let (status, body) = t.call(Method::GET, "/api/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, _) = t
        .call(Method::GET, "/api/orders", Some("not-a-jwt"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn waiter_cannot_view_reports_or_capture() {
    let t = TestApp::new().await;
    let waiter = t.token("waiter");

    let (status, body) = t
        .call(Method::GET, "/api/reports/summary", Some(&waiter), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2001);

    let (status, _) = t
        .call(
            Method::POST,
            "/api/payments",
            Some(&waiter),
            Some(json!({ "order_id": 1, "payment_method": "cash", "transaction_reference": null })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn order_payment_frees_table() {
    let t = TestApp::new().await;
    let table_id = t.seed_table("T1").await;
    let burger = t.seed_item("Burger", 10.0, 4.0).await;
    let fries = t.seed_item("Fries", 5.0, 1.0).await;
    let waiter = t.token("waiter");
    let cashier = t.token("cashier");

    let (status, order) = t
        .call(
            Method::POST,
            "/api/orders",
            Some(&waiter),
            Some(json!({ "table_id": table_id, "items": cart(burger, fries), "notes": null })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{order}");
    assert_eq!(order["total_amount"], 25.0);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["waiter_id"], "waiter-1");
    let order_id = order["id"].as_i64().unwrap();

    let (_, table) = t
        .call(Method::GET, &format!("/api/tables/{table_id}"), Some(&waiter), None)
        .await;
    assert_eq!(table["status"], "occupied");

    let (_, unpaid) = t
        .call(Method::GET, "/api/payments/unpaid", Some(&cashier), None)
        .await;
    assert_eq!(unpaid.as_array().unwrap().len(), 1);

    let (status, payment) = t
        .call(
            Method::POST,
            "/api/payments",
            Some(&cashier),
            Some(json!({ "order_id": order_id, "payment_method": "cash", "transaction_reference": null })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{payment}");
    assert_eq!(payment["amount"], 25.0);
    assert_eq!(payment["cashier_id"], "cashier-1");

    let (_, detail) = t
        .call(Method::GET, &format!("/api/orders/{order_id}"), Some(&waiter), None)
        .await;
    assert_eq!(detail["status"], "completed");
    assert!(detail["completed_at"].is_i64());
    assert_eq!(detail["items"].as_array().unwrap().len(), 2);
    assert_eq!(detail["payments"].as_array().unwrap().len(), 1);

    let (_, table) = t
        .call(Method::GET, &format!("/api/tables/{table_id}"), Some(&waiter), None)
        .await;
    assert_eq!(table["status"], "available");

    let (_, unpaid) = t
        .call(Method::GET, "/api/payments/unpaid", Some(&cashier), None)
        .await;
    assert!(unpaid.as_array().unwrap().is_empty());

    let manager = t.token("manager");
    let (status, summary) = t
        .call(Method::GET, "/api/reports/summary?period=today", Some(&manager), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["revenue"], 25.0);
    assert_eq!(summary["cost"], 9.0);
    assert_eq!(summary["profit"], 16.0);
    assert_eq!(summary["profit_margin"], 64.0);
    assert_eq!(summary["completed_orders"], 1);

    let (_, invoice) = t
        .call(Method::GET, &format!("/api/orders/{order_id}/invoice"), Some(&waiter), None)
        .await;
    assert_eq!(invoice["table"], "T1");
    assert_eq!(invoice["payment_method"], "Cash");
}

#[tokio::test]
async fn validation_errors_write_nothing() {
    let t = TestApp::new().await;
    let waiter = t.token("waiter");

    let (status, body) = t
        .call(
            Method::POST,
            "/api/orders",
            Some(&waiter),
            Some(json!({ "table_id": null, "items": [], "notes": null })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4007);

    let burger = t.seed_item("Burger", 10.0, 4.0).await;
    let (status, body) = t
        .call(
            Method::POST,
            "/api/orders",
            Some(&waiter),
            Some(json!({ "order_type": "dine_in", "table_id": null, "items": cart(burger, burger), "notes": null })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4008);

    let (_, orders) = t.call(Method::GET, "/api/orders", Some(&waiter), None).await;
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn empty_reports_are_zero() {
    let t = TestApp::new().await;
    let admin = t.token("admin");

    for period in ["today", "week", "month", "year"] {
        let (status, summary) = t
            .call(
                Method::GET,
                &format!("/api/reports/summary?period={period}"),
                Some(&admin),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(summary["revenue"], 0.0);
        assert_eq!(summary["profit_margin"], 0.0);
        assert_eq!(summary["completed_orders"], 0);
    }

    let (status, body) = t
        .call(Method::GET, "/api/reports/summary?period=decade", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4009);

    let (status, rows) = t
        .call(
            Method::GET,
            "/api/reports/export/daily?start_date=2025-01-01&end_date=2025-01-07",
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows.as_array().unwrap().len(), 7);

    let (status, body) = t
        .call(
            Method::GET,
            "/api/reports/export/daily?start_date=1900-01-01&end_date=9999-12-31",
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn customer_self_order() {
    let t = TestApp::new().await;
    let table_id = t.seed_table("T7").await;
    let burger = t.seed_item("Burger", 10.0, 4.0).await;
    let fries = t.seed_item("Fries", 5.0, 1.0).await;

    let (status, table) = t
        .call(Method::GET, &format!("/api/customer/tables/{table_id}"), None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(table["table_number"], "T7");

    let (status, menu) = t
        .call(Method::GET, "/api/customer/menu?search=burg", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(menu.as_array().unwrap().len(), 1);

    let (status, order) = t
        .call(
            Method::POST,
            "/api/customer/orders",
            None,
            Some(json!({ "table_number": "T7", "items": cart(burger, fries), "notes": "window seat" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{order}");
    assert_eq!(order["total_amount"], 25.0);
    assert!(order["waiter_id"].is_null());

    // The table is now occupied, so a second order is refused
    let (status, body) = t
        .call(
            Method::POST,
            "/api/customer/orders",
            None,
            Some(json!({ "table_number": "T7", "items": cart(burger, fries), "notes": null })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 7002);
}

#[tokio::test]
async fn table_qr_and_duplicate_number() {
    let t = TestApp::new().await;
    let table_id = t.seed_table("A1").await;
    let admin = t.token("admin");

    let (status, qr) = t
        .call(Method::GET, &format!("/api/tables/{table_id}/qr"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        qr["url"],
        format!("http://pos.test/customer-menu/{table_id}")
    );

    let (status, body) = t
        .call(
            Method::POST,
            "/api/tables",
            Some(&admin),
            Some(json!({ "table_number": "A1" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 7103);
}

#[tokio::test]
async fn cache_reset_requires_admin() {
    let t = TestApp::new().await;
    let manager = t.token("manager");
    let admin = t.token("admin");

    let (status, _) = t
        .call(Method::POST, "/api/cache/invalidate", Some(&manager), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = t
        .call(
            Method::POST,
            "/api/cache/invalidate",
            Some(&admin),
            Some(json!({ "keys": ["orders", "tables"] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["invalidated"], json!(["orders", "tables"]));
}
