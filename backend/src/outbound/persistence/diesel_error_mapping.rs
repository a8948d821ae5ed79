//! Diesel and pool error mapping into [`StoreError`].

use tracing::debug;

use crate::domain::ports::StoreError;

use super::pool::PoolError;

/// Pool failures mean the store could not be reached.
pub(crate) fn map_pool_error(error: PoolError) -> StoreError {
    StoreError::connection(error.message())
}

/// Map Diesel failures, treating closed connections as connectivity loss.
pub(crate) fn map_diesel_error(error: diesel::result::Error, operation: &str) -> StoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(error = %error, %operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreError::connection(format!("{operation}: database connection error"))
        }
        DieselError::NotFound => StoreError::query(format!("{operation}: record not found")),
        DieselError::DatabaseError(_, info) => {
            StoreError::query(format!("{operation}: {}", info.message()))
        }
        other => StoreError::query(format!("{operation}: {other}")),
    }
}
