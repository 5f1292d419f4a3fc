//! Typed navigation targets. The form never navigates by itself: it emits a
//! [`Route`] and the application shell decides what to show next.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/facility/{id}`
    FacilityOverview { facility_id: i64 },
    /// `/facility/{id}/doctor`, the step that follows bed capacity.
    DoctorAssignment { facility_id: i64 },
    /// `/facility/{id}/bed` (create) or `/facility/{id}/bed/{record}` (edit).
    BedCapacity {
        facility_id: i64,
        record_id: Option<i64>,
    },
}

impl Route {
    pub fn facility_id(&self) -> i64 {
        match *self {
            Route::FacilityOverview { facility_id }
            | Route::DoctorAssignment { facility_id }
            | Route::BedCapacity { facility_id, .. } => facility_id,
        }
    }

    /// Absolute client-side path for this route.
    pub fn path(&self) -> String {
        match *self {
            Route::FacilityOverview { facility_id } => format!("/facility/{facility_id}"),
            Route::DoctorAssignment { facility_id } => format!("/facility/{facility_id}/doctor"),
            Route::BedCapacity {
                facility_id,
                record_id: None,
            } => format!("/facility/{facility_id}/bed"),
            Route::BedCapacity {
                facility_id,
                record_id: Some(record_id),
            } => format!("/facility/{facility_id}/bed/{record_id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("unknown route: {0}")]
    Unknown(String),
    #[error("invalid id `{0}` in route")]
    InvalidId(String),
}

fn parse_id(raw: &str) -> Result<i64, RouteError> {
    raw.parse::<i64>()
        .map_err(|_| RouteError::InvalidId(raw.to_string()))
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        match segments.as_slice() {
            ["facility", id] => Ok(Route::FacilityOverview {
                facility_id: parse_id(id)?,
            }),
            ["facility", id, "doctor"] => Ok(Route::DoctorAssignment {
                facility_id: parse_id(id)?,
            }),
            ["facility", id, "bed"] => Ok(Route::BedCapacity {
                facility_id: parse_id(id)?,
                record_id: None,
            }),
            ["facility", id, "bed", record] => Ok(Route::BedCapacity {
                facility_id: parse_id(id)?,
                record_id: Some(parse_id(record)?),
            }),
            _ => Err(RouteError::Unknown(path.to_string())),
        }
    }
}
