//! OpenAPI Documentation

use storefront::{ErrorBody, ErrorMessage, HealthCheck};
use utoipa::OpenApi;

use crate::models::{
    CreateOrderRequest, OrderItemRequest, OrderItemResponse, OrderResponse, UpdateOrderRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::health_check,
        super::order::create_order,
        super::order::list_orders,
        super::order::customer_orders,
        super::order::get_order,
        super::order::update_order,
        super::order::add_order_item,
        super::order::remove_order_item,
        super::order::delete_order,
    ),
    info(
        title = "Inventory API",
        version = "0.1.0",
        description = "Customer orders and their items",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Order", description = "Order management"),
    ),
    components(
        schemas(
            HealthCheck,
            ErrorBody,
            ErrorMessage,
            CreateOrderRequest,
            UpdateOrderRequest,
            OrderItemRequest,
            OrderItemResponse,
            OrderResponse,
        )
    ),
)]
pub struct ApiDoc;
