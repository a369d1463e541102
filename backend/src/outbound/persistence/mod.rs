//! Diesel-backed persistence adapters and the shared connection pool.

mod diesel_course_repository;
mod diesel_profile_repository;
mod diesel_progress_repository;
mod diesel_purchase_repository;
mod diesel_rating_repository;
mod error_mapping;
mod models;
mod pool;
pub mod schema;

use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_progress_repository::DieselProgressRepository;
pub use diesel_purchase_repository::DieselPurchaseRepository;
pub use diesel_rating_repository::DieselRatingRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying embedded migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("failed to connect for migrations: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("failed to apply migrations: {0}")]
    Apply(String),
}

/// Apply any pending embedded migrations over a short-lived blocking
/// connection. Call before the async pool starts serving traffic.
pub fn run_migrations(database_url: &str) -> Result<(), MigrationError> {
    let mut conn = PgConnection::establish(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply(err.to_string()))?;
    for version in &applied {
        info!(migration = %version, "applied migration");
    }
    Ok(())
}
