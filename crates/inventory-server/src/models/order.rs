//! Order DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront::{Order, OrderItem};
use utoipa::ToSchema;

fn default_quantity() -> i32 {
    1
}

/// Order item as sent by clients; `id` is omitted for new items
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

/// Create Order request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub customer_email: String,
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

/// Update Order request (full replacement)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub customer_email: String,
    pub description: Option<String>,
    /// Items to keep (with id) or add (without id); others are dropped
    #[serde(default)]
    pub items: Vec<OrderItemRequest>,
}

/// Order item response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
}

/// Order response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i64,
    pub name: String,
    pub customer_email: String,
    pub description: Option<String>,
    pub items: Vec<OrderItemResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderItemRequest> for OrderItem {
    fn from(req: OrderItemRequest) -> Self {
        Self {
            id: req.id.unwrap_or(0),
            name: req.name,
            description: req.description,
            quantity: req.quantity,
        }
    }
}

impl From<CreateOrderRequest> for Order {
    fn from(req: CreateOrderRequest) -> Self {
        Order {
            items: req.items.into_iter().map(Into::into).collect(),
            ..Order::new(req.name, req.customer_email, req.description)
        }
    }
}

impl From<UpdateOrderRequest> for Order {
    fn from(req: UpdateOrderRequest) -> Self {
        Order {
            id: req.id,
            items: req.items.into_iter().map(Into::into).collect(),
            ..Order::new(req.name, req.customer_email, req.description)
        }
    }
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            quantity: item.quantity,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            name: order.name,
            customer_email: order.customer_email,
            description: order.description,
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_quantity_defaults_to_one() {
        let req: OrderItemRequest = serde_json::from_str(r#"{"name":"Item1"}"#).unwrap();
        let item = OrderItem::from(req);

        assert_eq!(item.id, 0);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_missing_fields_become_blank() {
        let req: CreateOrderRequest = serde_json::from_str(r#"{"name":"O1"}"#).unwrap();
        let order = Order::from(req);

        assert_eq!(order.customer_email, "");
        assert!(order.items.is_empty());
    }
}
