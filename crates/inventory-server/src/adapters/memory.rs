//! In-memory order store
//!
//! Orders and items live in separate id-indexed tables; items point at their
//! order and are removed with it. Quantities below one are rejected like the
//! Postgres check constraint rejects them.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use storefront::{DomainError, Order, OrderItem, OrderRepository, Repository};

#[derive(Debug, Clone)]
struct OrderRecord {
    name: String,
    customer_email: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct ItemRecord {
    order_id: i64,
    name: String,
    description: Option<String>,
    quantity: i32,
}

#[derive(Debug, Default)]
struct OrderTables {
    order_seq: i64,
    item_seq: i64,
    orders: BTreeMap<i64, OrderRecord>,
    items: BTreeMap<i64, ItemRecord>,
}

impl OrderTables {
    fn load(&self, id: i64, record: &OrderRecord) -> Order {
        Order {
            id,
            name: record.name.clone(),
            customer_email: record.customer_email.clone(),
            description: record.description.clone(),
            items: self
                .items
                .iter()
                .filter(|(_, item)| item.order_id == id)
                .map(|(item_id, item)| OrderItem {
                    id: *item_id,
                    name: item.name.clone(),
                    description: item.description.clone(),
                    quantity: item.quantity,
                })
                .collect(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn check_items(items: &[OrderItem]) -> Result<(), DomainError> {
        match items.iter().find(|i| i.quantity < 1) {
            Some(bad) => Err(DomainError::Store(format!(
                "check violation: quantity {} of item '{}' is below 1",
                bad.quantity, bad.name
            ))),
            None => Ok(()),
        }
    }

    /// Items sent with an id must already belong to the order
    fn check_item_owner(&self, order_id: i64, items: &[OrderItem]) -> Result<(), DomainError> {
        let foreign = items.iter().find(|i| {
            i.id > 0 && self.items.get(&i.id).map(|r| r.order_id) != Some(order_id)
        });
        match foreign {
            Some(item) => Err(DomainError::Validation(format!(
                "item {} does not belong to order {}",
                item.id, order_id
            ))),
            None => Ok(()),
        }
    }

    fn write_items(&mut self, order_id: i64, items: &[OrderItem]) {
        self.items
            .retain(|id, item| item.order_id != order_id || items.iter().any(|i| i.id == *id));

        for item in items {
            if item.id > 0 {
                if let Some(record) = self
                    .items
                    .get_mut(&item.id)
                    .filter(|record| record.order_id == order_id)
                {
                    record.name = item.name.clone();
                    record.description = item.description.clone();
                    record.quantity = item.quantity;
                }
                continue;
            }

            self.item_seq += 1;
            let id = self.item_seq;
            self.items.insert(
                id,
                ItemRecord {
                    order_id,
                    name: item.name.clone(),
                    description: item.description.clone(),
                    quantity: item.quantity,
                },
            );
        }
    }
}

/// In-memory implementation of OrderRepository
#[derive(Clone, Default)]
pub struct MemoryOrderRepository {
    tables: Arc<RwLock<OrderTables>>,
}

impl MemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Order> for MemoryOrderRepository {
    async fn create(&self, order: &Order) -> Result<Order, DomainError> {
        let mut tables = self.tables.write().await;
        OrderTables::check_items(&order.items)?;

        tables.order_seq += 1;
        let id = tables.order_seq;
        let record = OrderRecord {
            name: order.name.clone(),
            customer_email: order.customer_email.clone(),
            description: order.description.clone(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        };
        tables.orders.insert(id, record.clone());

        let fresh: Vec<OrderItem> = order
            .items
            .iter()
            .map(|i| OrderItem { id: 0, ..i.clone() })
            .collect();
        tables.write_items(id, &fresh);

        Ok(tables.load(id, &record))
    }

    async fn read(&self, id: i64) -> Result<Option<Order>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.orders.get(&id).map(|r| tables.load(id, r)))
    }

    async fn update(&self, order: &Order) -> Result<Option<Order>, DomainError> {
        let mut tables = self.tables.write().await;
        let created_at = match tables.orders.get(&order.id) {
            Some(existing) => existing.created_at,
            None => return Ok(None),
        };
        OrderTables::check_items(&order.items)?;
        tables.check_item_owner(order.id, &order.items)?;

        let record = OrderRecord {
            name: order.name.clone(),
            customer_email: order.customer_email.clone(),
            description: order.description.clone(),
            created_at,
            updated_at: Utc::now(),
        };
        tables.orders.insert(order.id, record.clone());
        tables.write_items(order.id, &order.items);

        Ok(Some(tables.load(order.id, &record)))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        if tables.orders.remove(&id).is_none() {
            return Ok(false);
        }
        tables.items.retain(|_, item| item.order_id != id);
        Ok(true)
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .iter()
            .map(|(id, r)| tables.load(*id, r))
            .collect())
    }

    async fn find_by_customer_email(&self, email: &str) -> Result<Vec<Order>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .iter()
            .filter(|(_, r)| r.customer_email == email)
            .map(|(id, r)| tables.load(*id, r))
            .collect())
    }
}
