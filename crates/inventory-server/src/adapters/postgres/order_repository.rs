//! PostgreSQL implementation of OrderRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use storefront::{DomainError, Order, OrderItem, OrderRepository, Repository};

use super::map_db_error;

const ORDER_SELECT: &str = r#"
    SELECT id, name, customer_email, description, created_at, updated_at
    FROM orders
"#;

/// PostgreSQL implementation of OrderRepository
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load the items of a batch of order rows
    async fn hydrate(&self, rows: Vec<OrderRow>) -> Result<Vec<Order>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT id, order_id, name, description, quantity
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut items: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for row in item_rows {
            items.entry(row.order_id).or_default().push(row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                let mut order = Order::from(row);
                order.items = items.remove(&id).unwrap_or_default();
                order
            })
            .collect())
    }

    /// Rewrite the items of an order: keep those with an id, add the rest
    async fn write_items(
        tx: &mut Transaction<'_, Postgres>,
        order_id: i64,
        items: &[OrderItem],
    ) -> Result<(), DomainError> {
        let kept: Vec<i64> = items.iter().map(|i| i.id).filter(|id| *id > 0).collect();

        sqlx::query("DELETE FROM order_items WHERE order_id = $1 AND NOT (id = ANY($2))")
            .bind(order_id)
            .bind(&kept)
            .execute(&mut **tx)
            .await
            .map_err(map_db_error)?;

        for item in items {
            if item.id > 0 {
                let updated = sqlx::query(
                    r#"
                    UPDATE order_items
                    SET name = $3, description = $4, quantity = $5
                    WHERE id = $1 AND order_id = $2
                    "#,
                )
                .bind(item.id)
                .bind(order_id)
                .bind(&item.name)
                .bind(&item.description)
                .bind(item.quantity)
                .execute(&mut **tx)
                .await
                .map_err(map_db_error)?;
                if updated.rows_affected() == 0 {
                    return Err(DomainError::Validation(format!(
                        "item {} does not belong to order {}",
                        item.id, order_id
                    )));
                }
            } else {
                sqlx::query(
                    r#"
                    INSERT INTO order_items (order_id, name, description, quantity)
                    VALUES ($1, $2, $3, $4)
                    "#,
                )
                .bind(order_id)
                .bind(&item.name)
                .bind(&item.description)
                .bind(item.quantity)
                .execute(&mut **tx)
                .await
                .map_err(map_db_error)?;
            }
        }

        Ok(())
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    name: String,
    customer_email: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            customer_email: row.customer_email,
            description: row.description,
            items: Vec::new(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    name: String,
    description: Option<String>,
    quantity: i32,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            quantity: row.quantity,
        }
    }
}

#[async_trait]
impl Repository<Order> for PgOrderRepository {
    async fn create(&self, order: &Order) -> Result<Order, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO orders (name, customer_email, description, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&order.name)
        .bind(&order.customer_email)
        .bind(&order.description)
        .bind(order.created_at)
        .bind(order.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        let fresh: Vec<OrderItem> = order
            .items
            .iter()
            .map(|i| OrderItem { id: 0, ..i.clone() })
            .collect();
        Self::write_items(&mut tx, id, &fresh).await?;

        tx.commit().await.map_err(map_db_error)?;

        self.read(id)
            .await?
            .ok_or_else(|| DomainError::store(format!("order {} vanished after insert", id)))
    }

    async fn read(&self, id: i64) -> Result<Option<Order>, DomainError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!("{} WHERE id = $1", ORDER_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn update(&self, order: &Order) -> Result<Option<Order>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET name = $2, customer_email = $3, description = $4, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(order.id)
        .bind(&order.name)
        .bind(&order.customer_email)
        .bind(&order.description)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(None);
        }

        Self::write_items(&mut tx, order.id, &order.items).await?;
        tx.commit().await.map_err(map_db_error)?;

        self.read(order.id).await
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM orders WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn find_all(&self) -> Result<Vec<Order>, DomainError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!("{} ORDER BY id", ORDER_SELECT))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        self.hydrate(rows).await
    }

    async fn find_by_customer_email(&self, email: &str) -> Result<Vec<Order>, DomainError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "{} WHERE customer_email = $1 ORDER BY id",
            ORDER_SELECT
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.hydrate(rows).await
    }
}
