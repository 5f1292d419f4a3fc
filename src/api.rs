//! Contract between the form and the capacity backend. Responses carry an
//! HTTP-style status plus optional data so callers can tell "answered but
//! unsuccessful" apart from transport failures, which surface as [`ApiError`].

use thiserror::Error;

use crate::models::{CapacityPayload, CapacityRecord};

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: STATUS_OK,
            data: Some(data),
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: STATUS_CREATED,
            data: Some(data),
        }
    }

    /// A response with a status but no body.
    pub fn empty(status: u16) -> Self {
        Self { status, data: None }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("backend storage error: {0}")]
    Storage(rusqlite::Error),
    /// The backend could not take the request right now, e.g. another process
    /// holds the database lock. Retrying later may succeed.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Capacity operations scoped to a single facility.
pub trait CapacityApi {
    fn list_capacity(&self, facility_id: i64) -> Result<ApiResponse<Vec<CapacityRecord>>, ApiError>;

    fn get_capacity(
        &self,
        facility_id: i64,
        record_id: i64,
    ) -> Result<ApiResponse<CapacityRecord>, ApiError>;

    /// Create a record when `record_id` is `None`, otherwise update it. Both
    /// paths answer `201` on success.
    fn create_capacity(
        &self,
        facility_id: i64,
        record_id: Option<i64>,
        payload: CapacityPayload,
    ) -> Result<ApiResponse<CapacityRecord>, ApiError>;
}
