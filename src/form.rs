//! The bed capacity form without any terminal concerns: state container,
//! validation, category derivation and the load/submit workflow. The `ui`
//! module only renders what lives here and forwards key presses.

mod controller;
mod options;
mod state;
mod validate;

pub use controller::{AppMessage, BedCapacityForm, FormProps, MessageKind, SubmitOutcome};
pub use options::{
    all_categories_used, annotate_categories, category_options, mark_category_used,
    remaining_categories,
};
pub use state::{FieldErrors, FormAction, FormField, FormState, FormValues};
pub use validate::{validate, Validation, OCCUPANCY_EXCEEDS_TOTAL, REQUIRED};
