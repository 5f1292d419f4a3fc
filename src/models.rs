//! Domain models shared between the SQLite backend, the form logic and the
//! TUI. These stay plain data holders so the other layers can focus on
//! persistence and presentation.

use std::fmt;

/// One entry of the fixed bed category enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BedType {
    pub id: i64,
    pub text: &'static str,
}

/// Every category a facility can carry a capacity record for. Identifiers are
/// unique and never `0`, which is reserved for the "Select" placeholder.
pub const BED_TYPES: &[BedType] = &[
    BedType {
        id: 1,
        text: "General Bed",
    },
    BedType {
        id: 2,
        text: "Hostel",
    },
    BedType {
        id: 3,
        text: "Single Room with Attached Bathroom",
    },
    BedType {
        id: 10,
        text: "ICU",
    },
    BedType {
        id: 20,
        text: "Ventilator",
    },
];

/// Identifier of the synthetic "unselected" option shown first in the selector.
pub const PLACEHOLDER_CATEGORY_ID: i64 = 0;

/// Look up the display label for a category id.
pub fn bed_type_label(id: i64) -> Option<&'static str> {
    BED_TYPES.iter().find(|bed| bed.id == id).map(|bed| bed.text)
}

/// A selectable category as rendered by the form. `disabled` is derived from
/// the facility's existing records, see [`crate::form::annotate_categories`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub id: i64,
    pub label: String,
    pub disabled: bool,
}

impl CategoryOption {
    pub fn placeholder() -> Self {
        Self {
            id: PLACEHOLDER_CATEGORY_ID,
            label: "Select".to_string(),
            disabled: false,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id == PLACEHOLDER_CATEGORY_ID
    }
}

impl From<&BedType> for CategoryOption {
    fn from(bed: &BedType) -> Self {
        Self {
            id: bed.id,
            label: bed.text.to_string(),
            disabled: false,
        }
    }
}

impl fmt::Display for CategoryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// A facility's total/occupied bed count for one category, as stored by the
/// backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityRecord {
    /// Primary key from the backend store.
    pub id: i64,
    pub facility_id: i64,
    pub category_id: i64,
    pub total_capacity: i64,
    pub current_occupancy: i64,
}

impl CapacityRecord {
    /// Category label, falling back to the raw id for categories outside the
    /// known enumeration.
    pub fn category_label(&self) -> String {
        bed_type_label(self.category_id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Category {}", self.category_id))
    }
}

/// Body sent to the backend when creating or updating a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityPayload {
    pub category_id: i64,
    pub total_capacity: i64,
    pub current_occupancy: i64,
}
