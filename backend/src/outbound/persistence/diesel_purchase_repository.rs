//! PostgreSQL-backed `PurchaseRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{PurchaseRepository, PurchaseRepositoryError};
use crate::domain::{Purchase, UserId};

use super::error_mapping::{categorise_diesel_error, categorise_pool_error, StoreError};
use super::models::PurchaseRow;
use super::pool::{DbPool, PoolError};
use super::schema::purchases;

#[derive(Clone)]
pub struct DieselPurchaseRepository {
    pool: DbPool,
}

impl DieselPurchaseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_port_error(error: StoreError) -> PurchaseRepositoryError {
    match error {
        StoreError::Connection(message) => PurchaseRepositoryError::connection(message),
        StoreError::Query(message) => PurchaseRepositoryError::query(message),
    }
}

fn map_pool_error(error: PoolError) -> PurchaseRepositoryError {
    into_port_error(categorise_pool_error(error))
}

fn map_diesel_error(error: diesel::result::Error) -> PurchaseRepositoryError {
    into_port_error(categorise_diesel_error(error))
}

#[async_trait]
impl PurchaseRepository for DieselPurchaseRepository {
    async fn find(
        &self,
        user_id: &UserId,
        course_id: Uuid,
    ) -> Result<Option<Purchase>, PurchaseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PurchaseRow> = purchases::table
            .filter(purchases::user_id.eq(user_id.as_uuid()))
            .filter(purchases::course_id.eq(course_id))
            .select(PurchaseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Purchase::from))
    }
}
