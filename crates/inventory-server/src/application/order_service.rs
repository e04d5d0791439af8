//! Order Application Service (Use Case)
//!
//! Item changes are a read-modify-write of the whole order followed by one
//! update.

use std::sync::Arc;

use storefront::{DomainError, ErrorMessage, Order, OrderItem, OrderRepository, ServiceError};

/// Application service for Order operations
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    /// Create a new Order with its items
    pub async fn create_order(&self, order: Order) -> Result<Order, ServiceError> {
        if has_blank_fields(&order) {
            return Err(ServiceError::not_created(ErrorMessage::NullFields));
        }

        let wrap = ServiceError::wrap(ServiceError::not_created, ErrorMessage::NotAdded);
        validate_quantities(&order.items).map_err(&wrap)?;

        let created = self.repo.create(&order).await.map_err(&wrap)?;
        tracing::info!(
            "Created Order: {} ({}) for {}",
            created.name,
            created.id,
            created.customer_email
        );

        Ok(created)
    }

    /// Get all Orders
    pub async fn find_all(&self) -> Result<Vec<Order>, ServiceError> {
        self.repo
            .find_all()
            .await
            .map_err(ServiceError::wrap(ServiceError::not_found, ErrorMessage::NotFound))
    }

    /// Get all Orders of one customer
    pub async fn find_customer_orders(&self, email: &str) -> Result<Vec<Order>, ServiceError> {
        if email.trim().is_empty() {
            return Err(ServiceError::not_found(ErrorMessage::NullFields));
        }

        self.repo
            .find_by_customer_email(email.trim())
            .await
            .map_err(ServiceError::wrap(ServiceError::not_found, ErrorMessage::NotFound))
    }

    /// Get an Order by ID
    pub async fn find_order_by_id(&self, id: i64) -> Result<Order, ServiceError> {
        let wrap = ServiceError::wrap(ServiceError::not_found, ErrorMessage::NotFound);
        self.repo
            .read(id)
            .await
            .map_err(&wrap)?
            .ok_or_else(|| wrap(DomainError::not_found("Order", id)))
    }

    /// Replace an existing Order (full-object update)
    pub async fn update_order(&self, order: Order) -> Result<Order, ServiceError> {
        if has_blank_fields(&order) {
            return Err(ServiceError::not_updated(ErrorMessage::NullFields));
        }

        let wrap = ServiceError::wrap(ServiceError::not_updated, ErrorMessage::NotUpdated);
        validate_quantities(&order.items).map_err(&wrap)?;

        if !self.repo.exists(order.id).await.map_err(&wrap)? {
            return Err(wrap(DomainError::not_found("Order", order.id)));
        }

        let updated = self
            .repo
            .update(&order)
            .await
            .map_err(&wrap)?
            .ok_or_else(|| wrap(DomainError::not_found("Order", order.id)))?;

        tracing::info!("Updated Order: {} ({})", updated.name, updated.id);
        Ok(updated)
    }

    /// Delete an Order and its items; deleting a missing id is an error
    pub async fn delete_order(&self, id: i64) -> Result<(), ServiceError> {
        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(ServiceError::wrap(ServiceError::not_deleted, ErrorMessage::NotDeleted))?;

        if !deleted {
            return Err(ServiceError::not_deleted(ErrorMessage::NotDeleted)
                .because(DomainError::not_found("Order", id)));
        }

        tracing::info!("Deleted Order: {}", id);
        Ok(())
    }

    /// Append an item to an Order
    pub async fn add_order_item(&self, id: i64, item: OrderItem) -> Result<Order, ServiceError> {
        if item.name.trim().is_empty() {
            return Err(ServiceError::not_updated(ErrorMessage::NullFields));
        }
        validate_quantities(std::slice::from_ref(&item))
            .map_err(ServiceError::wrap(ServiceError::not_updated, ErrorMessage::NotAdded))?;

        let updated = self
            .modify(id, ServiceError::not_updated, ErrorMessage::NotAdded, |order| {
                order.items.push(OrderItem { id: 0, ..item });
                Ok(())
            })
            .await?;

        tracing::info!("Added item to Order {}", id);
        Ok(updated)
    }

    /// Remove an item from an Order, matched by id when given, else by name
    pub async fn remove_order_item(&self, id: i64, item: OrderItem) -> Result<Order, ServiceError> {
        if item.id <= 0 && item.name.trim().is_empty() {
            return Err(ServiceError::not_deleted(ErrorMessage::NullFields));
        }

        let updated = self
            .modify(id, ServiceError::not_deleted, ErrorMessage::NotDeleted, |order| {
                let Some(position) = order.position_of(&item) else {
                    let key = if item.id > 0 {
                        item.id.to_string()
                    } else {
                        item.name.clone()
                    };
                    return Err(ServiceError::not_deleted(ErrorMessage::NotFound)
                        .because(DomainError::not_found_str("OrderItem", &key)));
                };
                order.items.remove(position);
                Ok(())
            })
            .await?;

        tracing::info!("Removed item from Order {}", id);
        Ok(updated)
    }

    /// Read-modify-write of one order
    async fn modify<F>(
        &self,
        id: i64,
        kind: fn(ErrorMessage) -> ServiceError,
        fallback: ErrorMessage,
        change: F,
    ) -> Result<Order, ServiceError>
    where
        F: FnOnce(&mut Order) -> Result<(), ServiceError> + Send,
    {
        let wrap = ServiceError::wrap(kind, fallback);

        let mut order = self
            .repo
            .read(id)
            .await
            .map_err(&wrap)?
            .ok_or_else(|| wrap(DomainError::not_found("Order", id)))?;

        change(&mut order)?;

        self.repo
            .update(&order)
            .await
            .map_err(&wrap)?
            .ok_or_else(|| wrap(DomainError::not_found("Order", id)))
    }
}

fn has_blank_fields(order: &Order) -> bool {
    order.name.trim().is_empty()
        || order.customer_email.trim().is_empty()
        || order.items.iter().any(|i| i.name.trim().is_empty())
}

fn validate_quantities(items: &[OrderItem]) -> Result<(), DomainError> {
    match items.iter().find(|i| i.quantity < 1) {
        Some(bad) => Err(DomainError::Validation(format!(
            "quantity of '{}' must be at least 1, got {}",
            bad.name, bad.quantity
        ))),
        None => Ok(()),
    }
}
