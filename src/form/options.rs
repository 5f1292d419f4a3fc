//! Derivation of the category selector from the fixed enumeration and the
//! facility's existing records.

use crate::models::{BedType, CapacityRecord, CategoryOption, BED_TYPES};

/// Placeholder followed by every known category, nothing disabled.
pub fn category_options() -> Vec<CategoryOption> {
    annotate_categories(BED_TYPES, &[])
}

/// Placeholder followed by `bed_types`, each disabled iff `existing` already
/// holds a record for it.
pub fn annotate_categories(
    bed_types: &[BedType],
    existing: &[CapacityRecord],
) -> Vec<CategoryOption> {
    let mut options = Vec::with_capacity(bed_types.len() + 1);
    options.push(CategoryOption::placeholder());
    options.extend(bed_types.iter().map(|bed| CategoryOption {
        disabled: existing.iter().any(|record| record.category_id == bed.id),
        ..CategoryOption::from(bed)
    }));
    options
}

/// Copy of `options` with `category_id` disabled.
pub fn mark_category_used(options: &[CategoryOption], category_id: i64) -> Vec<CategoryOption> {
    options
        .iter()
        .map(|option| CategoryOption {
            disabled: option.disabled || option.id == category_id,
            ..option.clone()
        })
        .collect()
}

/// Real categories that can still be chosen.
pub fn remaining_categories(options: &[CategoryOption]) -> usize {
    options
        .iter()
        .filter(|option| !option.is_placeholder() && !option.disabled)
        .count()
}

pub fn all_categories_used(options: &[CategoryOption]) -> bool {
    remaining_categories(options) == 0
}
