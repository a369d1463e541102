//! Shared categorisation of pool and Diesel failures.
//!
//! Every repository port distinguishes only connection failures from query
//! failures; adapters categorise here once and convert into their own port
//! error at the call site.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Transport-neutral store failure, converted into per-port errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreError {
    Connection(String),
    Query(String),
}

pub(crate) fn categorise_pool_error(error: PoolError) -> StoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StoreError::Connection(message)
        }
    }
}

pub(crate) fn categorise_diesel_error(error: DieselError) -> StoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreError::Connection("database connection closed".to_owned())
        }
        DieselError::NotFound => StoreError::Query("record not found".to_owned()),
        _ => StoreError::Query("database error".to_owned()),
    }
}
