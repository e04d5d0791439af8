use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use inventory_server::{adapters::MemoryOrderRepository, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use storefront::ServiceConfig;
use tower::ServiceExt;

struct TestApp {
    router: Router,
}

impl TestApp {
    fn spawn() -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let state = AppState::new(Arc::new(MemoryOrderRepository::new()));
        let router = inventory_server::app(state, &ServiceConfig::default());
        Self { router }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_order(&self, body: Value) -> Value {
        let (status, order) = self
            .send(Method::POST, "/api/v1/inventory/orders", Some(body))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{order}");
        order
    }
}

fn item_names(order: &Value) -> Vec<String> {
    order["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn added_item_is_visible_on_read() {
    let app = TestApp::spawn();
    let order = app
        .create_order(json!({ "name": "O1", "customer_email": "a@b.com" }))
        .await;
    let id = order["id"].as_i64().unwrap();

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/v1/inventory/orders/{id}/add"),
            Some(json!({ "name": "Item1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, read) = app
        .send(Method::GET, &format!("/api/v1/inventory/orders/{id}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item_names(&read), vec!["Item1"]);
    assert_eq!(read["items"][0]["quantity"], 1);
}

#[tokio::test]
async fn create_without_email_is_rejected() {
    let app = TestApp::spawn();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/inventory/orders",
            Some(json!({ "name": "O1" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "NOT_CREATED");
    assert_eq!(body["message"], "NULL_FIELDS");

    let (_, all) = app.send(Method::GET, "/api/v1/inventory/orders", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn orders_are_listed_per_customer() {
    let app = TestApp::spawn();
    app.create_order(json!({ "name": "O1", "customer_email": "a@b.com" }))
        .await;
    app.create_order(json!({ "name": "O2", "customer_email": "c@d.com" }))
        .await;

    let (status, mine) = app
        .send(Method::GET, "/api/v1/inventory/orders/email/a@b.com", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);
    assert_eq!(mine[0]["name"], "O1");
}

#[tokio::test]
async fn update_replaces_order_and_keeps_item_ids() {
    let app = TestApp::spawn();
    let order = app
        .create_order(json!({
            "name": "O1",
            "customer_email": "a@b.com",
            "items": [{ "name": "Pen" }, { "name": "Ink" }]
        }))
        .await;
    let pen_id = order["items"][0]["id"].as_i64().unwrap();

    let (status, updated) = app
        .send(
            Method::PUT,
            "/api/v1/inventory/orders",
            Some(json!({
                "id": order["id"],
                "name": "O1-revised",
                "customer_email": "a@b.com",
                "items": [{ "id": pen_id, "name": "Pen", "quantity": 4 }]
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "O1-revised");
    assert_eq!(updated["items"][0]["id"], pen_id);
    assert_eq!(updated["items"][0]["quantity"], 4);
    assert_eq!(item_names(&updated), vec!["Pen"]);
}

#[tokio::test]
async fn update_cannot_claim_item_of_another_order() {
    let app = TestApp::spawn();
    let first = app
        .create_order(json!({
            "name": "O1",
            "customer_email": "a@b.com",
            "items": [{ "name": "Pen" }]
        }))
        .await;
    let second = app
        .create_order(json!({
            "name": "O2",
            "customer_email": "a@b.com",
            "items": [{ "name": "Ink" }]
        }))
        .await;
    let pen_id = first["items"][0]["id"].as_i64().unwrap();

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/v1/inventory/orders",
            Some(json!({
                "id": second["id"],
                "name": "O2",
                "customer_email": "a@b.com",
                "items": [{ "id": pen_id, "name": "Pen", "quantity": 9 }]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "NOT_UPDATED");

    let (_, unchanged) = app
        .send(
            Method::GET,
            &format!("/api/v1/inventory/orders/{}", second["id"]),
            None,
        )
        .await;
    assert_eq!(item_names(&unchanged), vec!["Ink"]);
}

#[tokio::test]
async fn removing_missing_item_is_not_found() {
    let app = TestApp::spawn();
    let order = app
        .create_order(json!({
            "name": "O1",
            "customer_email": "a@b.com",
            "items": [{ "name": "Pen" }]
        }))
        .await;
    let uri = format!("/api/v1/inventory/orders/{}/remove", order["id"]);

    let (status, body) = app
        .send(Method::PUT, &uri, Some(json!({ "name": "Ink" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_DELETED");

    let (status, updated) = app
        .send(Method::PUT, &uri, Some(json!({ "name": "Pen" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["items"], json!([]));
}

#[tokio::test]
async fn missing_order_outcomes() {
    let app = TestApp::spawn();

    let (status, body) = app
        .send(Method::GET, "/api/v1/inventory/orders/9", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/v1/inventory/orders",
            Some(json!({ "id": 9, "name": "Ghost", "customer_email": "a@b.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_UPDATED");
    assert_eq!(body["message"], "NOT_FOUND");

    let (status, body) = app
        .send(Method::DELETE, "/api/v1/inventory/orders/9", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_DELETED");
}

#[tokio::test]
async fn delete_then_read_is_not_found() {
    let app = TestApp::spawn();
    let order = app
        .create_order(json!({ "name": "O1", "customer_email": "a@b.com" }))
        .await;
    let uri = format!("/api/v1/inventory/orders/{}", order["id"]);

    let (status, _) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_service_name() {
    let app = TestApp::spawn();
    let (status, body) = app.send(Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "inventory");
}
