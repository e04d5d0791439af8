//! Order Routes
//!
//! HTTP handlers that delegate to OrderService.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use storefront::{ApiError, ApiJson, ApiPath, ErrorBody, Order};

use crate::models::{CreateOrderRequest, OrderItemRequest, OrderResponse, UpdateOrderRequest};
use crate::AppState;

fn respond(orders: Vec<Order>) -> Json<Vec<OrderResponse>> {
    Json(orders.into_iter().map(OrderResponse::from).collect())
}

/// Create new Order
#[utoipa::path(
    post,
    path = "/api/v1/inventory/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Missing field or invalid quantity", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Order"
)]
pub async fn create_order(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let order = state.order_service.create_order(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

/// List all Orders
#[utoipa::path(
    get,
    path = "/api/v1/inventory/orders",
    responses(
        (status = 200, description = "List of all Orders", body = Vec<OrderResponse>),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Order"
)]
pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    Ok(respond(state.order_service.find_all().await?))
}

/// List a customer's Orders
#[utoipa::path(
    get,
    path = "/api/v1/inventory/orders/email/{email}",
    params(("email" = String, Path, description = "Customer email")),
    responses(
        (status = 200, description = "Orders of the customer", body = Vec<OrderResponse>),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Order"
)]
pub async fn customer_orders(
    State(state): State<AppState>,
    ApiPath(email): ApiPath<String>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    Ok(respond(
        state.order_service.find_customer_orders(&email).await?,
    ))
}

/// Get Order by ID
#[utoipa::path(
    get,
    path = "/api/v1/inventory/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Order"
)]
pub async fn get_order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<OrderResponse>, ApiError> {
    Ok(Json(state.order_service.find_order_by_id(id).await?.into()))
}

/// Replace an Order
#[utoipa::path(
    put,
    path = "/api/v1/inventory/orders",
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Missing field or invalid quantity", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Order"
)]
pub async fn update_order(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateOrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.order_service.update_order(payload.into()).await?;
    Ok(Json(order.into()))
}

/// Add an item to an Order
#[utoipa::path(
    put,
    path = "/api/v1/inventory/orders/{id}/add",
    params(("id" = i64, Path, description = "Order ID")),
    request_body = OrderItemRequest,
    responses(
        (status = 200, description = "Item added", body = OrderResponse),
        (status = 400, description = "Missing name or invalid quantity", body = ErrorBody),
        (status = 404, description = "Order not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Order"
)]
pub async fn add_order_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<OrderItemRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state
        .order_service
        .add_order_item(id, payload.into())
        .await?;
    Ok(Json(order.into()))
}

/// Remove an item from an Order
#[utoipa::path(
    put,
    path = "/api/v1/inventory/orders/{id}/remove",
    params(("id" = i64, Path, description = "Order ID")),
    request_body = OrderItemRequest,
    responses(
        (status = 200, description = "Item removed", body = OrderResponse),
        (status = 404, description = "Order or item not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Order"
)]
pub async fn remove_order_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<OrderItemRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state
        .order_service
        .remove_order_item(id, payload.into())
        .await?;
    Ok(Json(order.into()))
}

/// Delete Order
#[utoipa::path(
    delete,
    path = "/api/v1/inventory/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order deleted"),
        (status = 404, description = "Order not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tag = "Order"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.order_service.delete_order(id).await?;

    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": "Order deleted"
    })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/inventory/orders",
            get(list_orders).post(create_order).put(update_order),
        )
        .route(
            "/api/v1/inventory/orders/email/:email",
            get(customer_orders),
        )
        .route(
            "/api/v1/inventory/orders/:id",
            get(get_order).delete(delete_order),
        )
        .route("/api/v1/inventory/orders/:id/add", put(add_order_item))
        .route("/api/v1/inventory/orders/:id/remove", put(remove_order_item))
}
