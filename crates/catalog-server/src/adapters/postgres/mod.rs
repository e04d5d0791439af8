//! PostgreSQL Repository Implementations

mod category_repository;
mod offer_repository;
mod tag_repository;

pub use category_repository::PgCategoryRepository;
pub use offer_repository::PgOfferRepository;
pub use tag_repository::PgTagRepository;

use storefront::DomainError;

/// Unique violations become conflicts; everything else is a store failure
fn map_db_error(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            DomainError::Conflict(db.message().to_string())
        }
        _ => DomainError::store(err),
    }
}
