use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::{CapacityPayload, CapacityRecord};

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<CapacityRecord> {
    Ok(CapacityRecord {
        id: row.get(0)?,
        facility_id: row.get(1)?,
        category_id: row.get(2)?,
        total_capacity: row.get(3)?,
        current_occupancy: row.get(4)?,
    })
}

/// Every record of one facility, ordered by category so listings stay stable.
pub fn fetch_capacity(conn: &Connection, facility_id: i64) -> rusqlite::Result<Vec<CapacityRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, facility_id, category_id, total_capacity, current_occupancy
         FROM capacity
         WHERE facility_id = ?1
         ORDER BY category_id",
    )?;

    let records = stmt
        .query_map([facility_id], record_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

/// Load a single record. Records belonging to another facility are reported as
/// missing.
pub fn fetch_capacity_record(
    conn: &Connection,
    facility_id: i64,
    id: i64,
) -> rusqlite::Result<Option<CapacityRecord>> {
    conn.query_row(
        "SELECT id, facility_id, category_id, total_capacity, current_occupancy
         FROM capacity
         WHERE facility_id = ?1 AND id = ?2",
        params![facility_id, id],
        record_from_row,
    )
    .optional()
}

/// Insert a new record, returning the hydrated struct. A second record for the
/// same facility and category violates the table's unique constraint.
pub fn insert_capacity(
    conn: &Connection,
    facility_id: i64,
    payload: &CapacityPayload,
) -> rusqlite::Result<CapacityRecord> {
    conn.execute(
        "INSERT INTO capacity (facility_id, category_id, total_capacity, current_occupancy)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            facility_id,
            payload.category_id,
            payload.total_capacity,
            payload.current_occupancy
        ],
    )?;

    Ok(CapacityRecord {
        id: conn.last_insert_rowid(),
        facility_id,
        category_id: payload.category_id,
        total_capacity: payload.total_capacity,
        current_occupancy: payload.current_occupancy,
    })
}

/// Update the counts of an existing record. The category of a record is fixed
/// once created, so only the two counts are written. Returns `None` when no row
/// matched.
pub fn update_capacity(
    conn: &Connection,
    facility_id: i64,
    id: i64,
    payload: &CapacityPayload,
) -> rusqlite::Result<Option<CapacityRecord>> {
    let updated = conn.execute(
        "UPDATE capacity SET total_capacity = ?1, current_occupancy = ?2
         WHERE facility_id = ?3 AND id = ?4",
        params![
            payload.total_capacity,
            payload.current_occupancy,
            facility_id,
            id
        ],
    )?;

    if updated == 0 {
        Ok(None)
    } else {
        fetch_capacity_record(conn, facility_id, id)
    }
}
