//! PostgreSQL implementation of OfferRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

use storefront::{
    Category, DomainError, Offer, OfferFilter, OfferRepository, Price, Repository, Tag,
    TagMatchMode,
};

use super::map_db_error;

const OFFER_SELECT: &str = r#"
    SELECT o.id, o.name, o.description, o.available, o.category_id,
           c.name AS category_name
    FROM offers o
    LEFT JOIN categories c ON c.id = o.category_id
"#;

/// PostgreSQL implementation of OfferRepository
pub struct PgOfferRepository {
    pool: PgPool,
}

impl PgOfferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load prices and tags for a batch of offer rows
    async fn hydrate(&self, rows: Vec<OfferRow>) -> Result<Vec<Offer>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

        let price_rows = sqlx::query_as::<_, PriceRow>(
            "SELECT id, offer_id, amount FROM prices WHERE offer_id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let tag_rows = sqlx::query_as::<_, OfferTagRow>(
            r#"
            SELECT ot.offer_id, t.id, t.label
            FROM offer_tags ot
            INNER JOIN tags t ON t.id = ot.tag_id
            WHERE ot.offer_id = ANY($1)
            ORDER BY t.id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut prices: HashMap<i64, Vec<Price>> = HashMap::new();
        for row in price_rows {
            prices.entry(row.offer_id).or_default().push(Price {
                id: row.id,
                amount: row.amount,
            });
        }

        let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in tag_rows {
            tags.entry(row.offer_id).or_default().push(Tag {
                id: row.id,
                label: row.label,
            });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                let mut offer = Offer::from(row);
                offer.prices = prices.remove(&id).unwrap_or_default();
                offer.tags = tags.remove(&id).unwrap_or_default();
                offer
            })
            .collect())
    }

    /// Rewrite prices and tag links of an offer inside a transaction
    async fn write_children(
        tx: &mut Transaction<'_, Postgres>,
        offer_id: i64,
        offer: &Offer,
    ) -> Result<(), DomainError> {
        let kept: Vec<i64> = offer
            .prices
            .iter()
            .map(|p| p.id)
            .filter(|id| *id > 0)
            .collect();

        sqlx::query("DELETE FROM prices WHERE offer_id = $1 AND NOT (id = ANY($2))")
            .bind(offer_id)
            .bind(&kept)
            .execute(&mut **tx)
            .await
            .map_err(map_db_error)?;

        for price in &offer.prices {
            if price.id > 0 {
                let updated =
                    sqlx::query("UPDATE prices SET amount = $3 WHERE id = $1 AND offer_id = $2")
                        .bind(price.id)
                        .bind(offer_id)
                        .bind(price.amount)
                        .execute(&mut **tx)
                        .await
                        .map_err(map_db_error)?;
                if updated.rows_affected() == 0 {
                    return Err(DomainError::Validation(format!(
                        "price {} does not belong to offer {}",
                        price.id, offer_id
                    )));
                }
            } else {
                sqlx::query("INSERT INTO prices (offer_id, amount) VALUES ($1, $2)")
                    .bind(offer_id)
                    .bind(price.amount)
                    .execute(&mut **tx)
                    .await
                    .map_err(map_db_error)?;
            }
        }

        sqlx::query("DELETE FROM offer_tags WHERE offer_id = $1")
            .bind(offer_id)
            .execute(&mut **tx)
            .await
            .map_err(map_db_error)?;

        for tag_id in offer.tag_ids() {
            sqlx::query(
                r#"
                INSERT INTO offer_tags (offer_id, tag_id)
                VALUES ($1, $2)
                ON CONFLICT (offer_id, tag_id) DO NOTHING
                "#,
            )
            .bind(offer_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await
            .map_err(map_db_error)?;
        }

        Ok(())
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct OfferRow {
    id: i64,
    name: String,
    description: Option<String>,
    available: bool,
    category_id: Option<i64>,
    category_name: Option<String>,
}

impl From<OfferRow> for Offer {
    fn from(row: OfferRow) -> Self {
        let category = match (row.category_id, row.category_name) {
            (Some(id), Some(name)) => Some(Category { id, name }),
            _ => None,
        };

        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            available: row.available,
            prices: Vec::new(),
            tags: Vec::new(),
            category,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PriceRow {
    id: i64,
    offer_id: i64,
    amount: f64,
}

#[derive(sqlx::FromRow)]
struct OfferTagRow {
    offer_id: i64,
    id: i64,
    label: String,
}

#[async_trait]
impl Repository<Offer> for PgOfferRepository {
    async fn create(&self, offer: &Offer) -> Result<Offer, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO offers (name, description, available, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&offer.name)
        .bind(&offer.description)
        .bind(offer.available)
        .bind(offer.category_id())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        // A fresh offer owns no prices yet, so every price is inserted
        let fresh = Offer {
            prices: offer.prices.iter().map(|p| Price::new(p.amount)).collect(),
            ..offer.clone()
        };
        Self::write_children(&mut tx, id, &fresh).await?;

        tx.commit().await.map_err(map_db_error)?;

        self.read(id)
            .await?
            .ok_or_else(|| DomainError::Store(format!("offer {} missing after insert", id)))
    }

    async fn read(&self, id: i64) -> Result<Option<Offer>, DomainError> {
        let row = sqlx::query_as::<_, OfferRow>(&format!("{} WHERE o.id = $1", OFFER_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn update(&self, offer: &Offer) -> Result<Option<Offer>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r#"
            UPDATE offers
            SET name = $2, description = $3, available = $4, category_id = $5
            WHERE id = $1
            "#,
        )
        .bind(offer.id)
        .bind(&offer.name)
        .bind(&offer.description)
        .bind(offer.available)
        .bind(offer.category_id())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(map_db_error)?;
            return Ok(None);
        }

        Self::write_children(&mut tx, offer.id, offer).await?;
        tx.commit().await.map_err(map_db_error)?;

        self.read(offer.id).await
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM offers WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

#[async_trait]
impl OfferRepository for PgOfferRepository {
    async fn find_filtered(&self, filter: &OfferFilter) -> Result<Vec<Offer>, DomainError> {
        let mut qb = QueryBuilder::<Postgres>::new(OFFER_SELECT);
        qb.push(" WHERE TRUE");

        if let Some(name) = &filter.name {
            qb.push(" AND o.name = ").push_bind(name.clone());
        }

        if let Some(min) = filter.min_price {
            qb.push(" AND (SELECT MIN(p.amount) FROM prices p WHERE p.offer_id = o.id) >= ")
                .push_bind(min);
        }

        if let Some(max) = filter.max_price {
            qb.push(" AND (SELECT MIN(p.amount) FROM prices p WHERE p.offer_id = o.id) <= ")
                .push_bind(max);
        }

        if let Some(category) = &filter.category {
            qb.push(" AND c.name = ").push_bind(category.clone());
        }

        if !filter.tags.is_empty() {
            match filter.tags_match_mode {
                TagMatchMode::All => {
                    qb.push(
                        " AND (SELECT COUNT(DISTINCT t.label) FROM offer_tags ot \
                         INNER JOIN tags t ON t.id = ot.tag_id \
                         WHERE ot.offer_id = o.id AND t.label = ANY(",
                    )
                    .push_bind(filter.tags.clone())
                    .push(")) = ")
                    .push_bind(filter.tags.len() as i64);
                }
                TagMatchMode::Any => {
                    qb.push(
                        " AND EXISTS (SELECT 1 FROM offer_tags ot \
                         INNER JOIN tags t ON t.id = ot.tag_id \
                         WHERE ot.offer_id = o.id AND t.label = ANY(",
                    )
                    .push_bind(filter.tags.clone())
                    .push("))");
                }
            }
        }

        if let Some(available) = filter.available {
            qb.push(" AND o.available = ").push_bind(available);
        }

        qb.push(" ORDER BY o.id");

        let rows = qb
            .build_query_as::<OfferRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        self.hydrate(rows).await
    }

    async fn find_by_category(&self, category_id: i64) -> Result<Vec<Offer>, DomainError> {
        let rows = sqlx::query_as::<_, OfferRow>(&format!(
            "{} WHERE o.category_id = $1 ORDER BY o.id",
            OFFER_SELECT
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.hydrate(rows).await
    }
}
