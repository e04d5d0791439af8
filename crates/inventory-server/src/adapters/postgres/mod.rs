//! PostgreSQL Repository Implementations

mod order_repository;

pub use order_repository::PgOrderRepository;

use storefront::DomainError;

fn map_db_error(err: sqlx::Error) -> DomainError {
    DomainError::store(err)
}
