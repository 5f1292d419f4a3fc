use super::state::{FieldErrors, FormField, FormValues};

pub const REQUIRED: &str = "Field is required";
pub const OCCUPANCY_EXCEEDS_TOTAL: &str = "Occupied must be less than or equal to total capacity";

/// Result of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub errors: FieldErrors,
    pub is_valid: bool,
}

/// Numeric reading of a field. Blank text reads as zero; anything unparsable
/// yields `None` and never wins a comparison.
fn numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Some(0.0)
    } else {
        trimmed.parse::<f64>().ok()
    }
}

fn occupancy_exceeds_total(values: &FormValues) -> bool {
    match (
        numeric(&values.current_occupancy),
        numeric(&values.total_capacity),
    ) {
        (Some(occupied), Some(total)) => occupied > total,
        _ => false,
    }
}

/// Check every field and collect all failures, not just the first one.
pub fn validate(values: &FormValues) -> Validation {
    let mut errors = FieldErrors::default();

    for field in FormField::ALL {
        if values.get(field).is_empty() {
            errors.set(field, REQUIRED);
        } else if field == FormField::CurrentOccupancy && occupancy_exceeds_total(values) {
            errors.set(field, OCCUPANCY_EXCEEDS_TOTAL);
        }
    }

    let is_valid = errors.is_empty();
    Validation { errors, is_valid }
}
