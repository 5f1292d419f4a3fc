use std::num::ParseIntError;

use crate::models::{CapacityPayload, CapacityRecord};

/// Fields of the form in focus order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FormField {
    Category,
    TotalCapacity,
    CurrentOccupancy,
}

impl FormField {
    pub const ALL: [FormField; 3] = [
        FormField::Category,
        FormField::TotalCapacity,
        FormField::CurrentOccupancy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Category => "Bed Type*",
            FormField::TotalCapacity => "Total Capacity*",
            FormField::CurrentOccupancy => "Currently Occupied*",
        }
    }
}

/// Raw text of every field. Values stay strings until submission so an empty
/// field can be told apart from `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    /// Category id as text, empty while nothing is selected.
    pub category: String,
    pub total_capacity: String,
    pub current_occupancy: String,
}

impl FormValues {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Category => &self.category,
            FormField::TotalCapacity => &self.total_capacity,
            FormField::CurrentOccupancy => &self.current_occupancy,
        }
    }

    /// Copy of these values with one field replaced.
    pub fn with(&self, field: FormField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let value = value.into();
        match field {
            FormField::Category => next.category = value,
            FormField::TotalCapacity => next.total_capacity = value,
            FormField::CurrentOccupancy => next.current_occupancy = value,
        }
        next
    }

    pub fn from_record(record: &CapacityRecord) -> Self {
        Self {
            category: record.category_id.to_string(),
            total_capacity: record.total_capacity.to_string(),
            current_occupancy: record.current_occupancy.to_string(),
        }
    }

    /// Coerce the three fields into the request body.
    pub fn to_payload(&self) -> Result<CapacityPayload, ParseIntError> {
        Ok(CapacityPayload {
            category_id: self.category.trim().parse()?,
            total_capacity: self.total_capacity.trim().parse()?,
            current_occupancy: self.current_occupancy.trim().parse()?,
        })
    }
}

/// Per-field messages; an empty string means the field is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub category: String,
    pub total_capacity: String,
    pub current_occupancy: String,
}

impl FieldErrors {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Category => &self.category,
            FormField::TotalCapacity => &self.total_capacity,
            FormField::CurrentOccupancy => &self.current_occupancy,
        }
    }

    pub(crate) fn set(&mut self, field: FormField, message: &str) {
        let slot = match field {
            FormField::Category => &mut self.category,
            FormField::TotalCapacity => &mut self.total_capacity,
            FormField::CurrentOccupancy => &mut self.current_occupancy,
        };
        *slot = message.to_string();
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}

/// The only two ways to change form state. Both replace their record whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    ReplaceForm(FormValues),
    ReplaceErrors(FieldErrors),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub form: FormValues,
    pub errors: FieldErrors,
}

impl FormState {
    pub fn reduce(self, action: FormAction) -> Self {
        match action {
            FormAction::ReplaceForm(form) => Self { form, ..self },
            FormAction::ReplaceErrors(errors) => Self { errors, ..self },
        }
    }
}
