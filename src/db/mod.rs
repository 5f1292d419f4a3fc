//! Embedded SQLite backend for capacity records, exposed to the form through
//! the [`CapacityApi`] trait.

mod capacity;
mod connection;

use rusqlite::{Connection, Error as SqlError, ErrorCode};
use tracing::{debug, warn};

use crate::api::{ApiError, ApiResponse, CapacityApi, STATUS_BAD_REQUEST, STATUS_NOT_FOUND};
use crate::models::{CapacityPayload, CapacityRecord};

pub use capacity::{
    fetch_capacity, fetch_capacity_record, insert_capacity, update_capacity,
};
pub use connection::{ensure_schema, open_in_memory};

/// Owns the SQLite connection and answers capacity requests with HTTP-style
/// statuses.
pub struct CapacityStore {
    conn: Connection,
}

impl CapacityStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

/// Constraint violations are the caller's fault and become a `400`, every other
/// database failure is a transport-level error.
fn is_constraint_violation(err: &SqlError) -> bool {
    matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    )
}

/// A busy or locked database is a temporary condition, anything else is a
/// storage failure.
fn storage_error(err: SqlError) -> ApiError {
    match err.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy) => ApiError::Unavailable("database is busy".to_string()),
        Some(ErrorCode::DatabaseLocked) => ApiError::Unavailable("database is locked".to_string()),
        _ => ApiError::Storage(err),
    }
}

impl CapacityApi for CapacityStore {
    fn list_capacity(&self, facility_id: i64) -> Result<ApiResponse<Vec<CapacityRecord>>, ApiError> {
        let records = fetch_capacity(&self.conn, facility_id).map_err(storage_error)?;
        debug!(facility_id, count = records.len(), "listed capacity records");
        Ok(ApiResponse::ok(records))
    }

    fn get_capacity(
        &self,
        facility_id: i64,
        record_id: i64,
    ) -> Result<ApiResponse<CapacityRecord>, ApiError> {
        match fetch_capacity_record(&self.conn, facility_id, record_id).map_err(storage_error)? {
            Some(record) => Ok(ApiResponse::ok(record)),
            None => Ok(ApiResponse::empty(STATUS_NOT_FOUND)),
        }
    }

    fn create_capacity(
        &self,
        facility_id: i64,
        record_id: Option<i64>,
        payload: CapacityPayload,
    ) -> Result<ApiResponse<CapacityRecord>, ApiError> {
        let Some(id) = record_id else {
            return match insert_capacity(&self.conn, facility_id, &payload) {
                Ok(record) => Ok(ApiResponse::created(record)),
                Err(err) if is_constraint_violation(&err) => {
                    warn!(
                        facility_id,
                        category_id = payload.category_id,
                        "rejected duplicate capacity category"
                    );
                    Ok(ApiResponse::empty(STATUS_BAD_REQUEST))
                }
                Err(err) => Err(storage_error(err)),
            };
        };

        match update_capacity(&self.conn, facility_id, id, &payload).map_err(storage_error)? {
            Some(record) => Ok(ApiResponse::created(record)),
            None => Ok(ApiResponse::empty(STATUS_NOT_FOUND)),
        }
    }
}
