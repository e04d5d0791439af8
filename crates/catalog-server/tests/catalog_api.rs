use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use catalog_server::{adapters::MemoryCatalog, AppState};
use serde_json::{json, Value};
use storefront::ServiceConfig;
use tower::ServiceExt;

struct TestApp {
    router: Router,
}

impl TestApp {
    fn spawn() -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let catalog = MemoryCatalog::new();
        let router = catalog_server::app(AppState::in_memory(&catalog), &ServiceConfig::default());
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

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    async fn put(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, None).await
    }

    async fn create_offer(&self, body: Value) -> Value {
        let (status, offer) = self
            .send(Method::POST, "/api/v1/catalog/offers", Some(body))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{offer}");
        offer
    }

    async fn create_tag(&self, label: &str) -> i64 {
        let (status, tag) = self
            .send(
                Method::POST,
                "/api/v1/catalog/tags",
                Some(json!({ "label": label })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        tag["id"].as_i64().unwrap()
    }
}

fn names(offers: &Value) -> Vec<String> {
    offers
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_reports_service_name() {
    let app = TestApp::spawn();
    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "catalog");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::spawn();
    let (status, doc) = app.get("/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/v1/catalog/offers/{id}"].is_object());
}

#[tokio::test]
async fn availability_can_be_switched_on() {
    let app = TestApp::spawn();
    let pen = app
        .create_offer(json!({ "name": "Pen", "available": false }))
        .await;
    let id = pen["id"].as_i64().unwrap();

    let (status, _) = app
        .put(&format!("/api/v1/catalog/offers/{id}?availability=true"))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, read) = app.get(&format!("/api/v1/catalog/offers/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(read["available"], true);
    assert_eq!(read["name"], "Pen");

    let (_, available) = app
        .get("/api/v1/catalog/offers/availability?availability=true")
        .await;
    assert_eq!(names(&available), vec!["Pen"]);
}

#[tokio::test]
async fn malformed_parameters_get_json_error_body() {
    let app = TestApp::spawn();
    let pen = app.create_offer(json!({ "name": "Pen" })).await;
    let id = pen["id"].as_i64().unwrap();

    let (status, body) = app
        .put(&format!("/api/v1/catalog/offers/{id}?availability=maybe"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_REQUEST");
    assert!(body["detail"].is_string());

    let (status, body) = app.get("/api/v1/catalog/offers/pricefilters?min=cheap&max=10").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_REQUEST");

    let (status, body) = app.get("/api/v1/catalog/tags/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_REQUEST");
}

#[tokio::test]
async fn create_without_name_is_rejected() {
    let app = TestApp::spawn();
    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/catalog/offers",
            Some(json!({ "description": "nameless" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "NOT_CREATED");
    assert_eq!(body["message"], "NULL_FIELDS");

    let (_, all) = app.get("/api/v1/catalog/offers").await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn price_filter_bounds_are_inclusive() {
    let app = TestApp::spawn();
    for (name, amount) in [
        ("a", 4.99),
        ("b", 5.0),
        ("c", 7.25),
        ("d", 10.0),
        ("e", 10.01),
    ] {
        app.create_offer(json!({ "name": name, "prices": [{ "amount": amount }] }))
            .await;
    }
    app.create_offer(json!({ "name": "unpriced" })).await;

    let (status, offers) = app.get("/api/v1/catalog/offers/pricefilters?min=5&max=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&offers), vec!["b", "c", "d"]);

    let (status, body) = app.get("/api/v1/catalog/offers/pricefilters?min=10&max=5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "NOT_FOUND");

    let (status, body) = app.get("/api/v1/catalog/offers/pricefilters?min=NaN&max=10").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn filtered_offers_intersect_supplied_filters() {
    let app = TestApp::spawn();
    let sale = app.create_tag("sale").await;

    app.create_offer(json!({ "name": "cheap-sale", "prices": [{ "amount": 12.0 }], "tag_ids": [sale] }))
        .await;
    app.create_offer(json!({ "name": "pricey-sale", "prices": [{ "amount": 25.0 }], "tag_ids": [sale] }))
        .await;
    app.create_offer(json!({ "name": "cheap-plain", "prices": [{ "amount": 15.0 }] }))
        .await;

    let uri = "/api/v1/catalog/offers/categories/offers/filteredOffers";

    let (status, everything) = app.send(Method::POST, uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, all) = app.get("/api/v1/catalog/offers").await;
    assert_eq!(everything, all);

    let (status, matched) = app
        .send(
            Method::POST,
            uri,
            Some(json!({ "minPrice": "10", "maxPrice": "20", "tags": "sale" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&matched), vec!["cheap-sale"]);

    let (status, _) = app
        .send(Method::POST, uri, Some(json!({ "colour": "red" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_by_tags_honours_match_mode() {
    let app = TestApp::spawn();
    let sale = app.create_tag("sale").await;
    let new = app.create_tag("new").await;

    app.create_offer(json!({ "name": "both", "tag_ids": [sale, new] }))
        .await;
    app.create_offer(json!({ "name": "sale-only", "tag_ids": [sale] }))
        .await;

    let (_, all) = app
        .get("/api/v1/catalog/offers/searchbytags?tagList=sale,new")
        .await;
    assert_eq!(names(&all), vec!["both"]);

    let (_, any) = app
        .get("/api/v1/catalog/offers/searchbytags?tagList=sale,new&match=any")
        .await;
    assert_eq!(names(&any), vec!["both", "sale-only"]);

    let (status, body) = app.get("/api/v1/catalog/offers/searchbytags?tagList=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "NULL_FIELDS");
}

#[tokio::test]
async fn update_and_delete_of_missing_offer() {
    let app = TestApp::spawn();

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/v1/catalog/offers",
            Some(json!({ "id": 404, "name": "Ghost" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_UPDATED");
    assert_eq!(body["message"], "NOT_FOUND");

    let (status, body) = app
        .send(Method::DELETE, "/api/v1/catalog/offers/404", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_DELETED");
}

#[tokio::test]
async fn delete_then_read_is_not_found() {
    let app = TestApp::spawn();
    let pen = app.create_offer(json!({ "name": "Pen" })).await;
    let uri = format!("/api/v1/catalog/offers/{}", pen["id"]);

    let (status, _) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get(&uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn prices_can_be_added_and_changed() {
    let app = TestApp::spawn();
    let pen = app
        .create_offer(json!({ "name": "Pen", "prices": [{ "amount": 3.0 }] }))
        .await;
    let id = pen["id"].as_i64().unwrap();

    let (status, offer) = app
        .send(
            Method::PUT,
            &format!("/api/v1/catalog/offers/{id}/prices"),
            Some(json!({ "amount": 2.0 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(offer["lowest_price"], 2.0);

    let (status, offer) = app
        .put(&format!("/api/v1/catalog/offers/{id}/changeprices?price=4.5"))
        .await;
    assert_eq!(status, StatusCode::OK);
    let amounts: Vec<f64> = offer["prices"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["amount"].as_f64().unwrap())
        .collect();
    assert_eq!(amounts, vec![3.0, 4.5]);

    let (status, _) = app
        .put(&format!("/api/v1/catalog/offers/{id}/changeprices?price=-1"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tags_and_categories_attach_and_detach() {
    let app = TestApp::spawn();
    let sale = app.create_tag("sale").await;
    let (status, books) = app
        .send(
            Method::POST,
            "/api/v1/catalog/categories",
            Some(json!({ "name": "books" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let books = books["id"].as_i64().unwrap();

    let novel = app.create_offer(json!({ "name": "Novel" })).await;
    let id = novel["id"].as_i64().unwrap();

    let (status, offer) = app
        .put(&format!("/api/v1/catalog/offers/{id}/tags?tagId={sale}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(offer["tags"][0]["label"], "sale");

    let (status, offer) = app
        .put(&format!("/api/v1/catalog/offers/{id}/categories?categoryId={books}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(offer["category"]["name"], "books");

    let (_, in_books) = app
        .get(&format!("/api/v1/catalog/categories/{books}/offers"))
        .await;
    assert_eq!(names(&in_books), vec!["Novel"]);

    let (status, offer) = app
        .put(&format!("/api/v1/catalog/offers/{id}/removetags?tagId={sale}"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(offer["tags"], json!([]));

    let (status, body) = app
        .put(&format!("/api/v1/catalog/offers/{id}/removetags?tagId={sale}"))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_DELETED");

    let (status, offer) = app
        .put(&format!("/api/v1/catalog/offers/{id}/removecategories"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(offer["category"], Value::Null);
}

#[tokio::test]
async fn duplicate_tag_label_conflicts() {
    let app = TestApp::spawn();
    app.create_tag("sale").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/catalog/tags",
            Some(json!({ "label": "sale" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "NOT_CREATED");
}
