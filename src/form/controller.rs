use tracing::{debug, info, warn};

use crate::api::{CapacityApi, STATUS_CREATED};
use crate::models::{CapacityPayload, CategoryOption, BED_TYPES};
use crate::routes::Route;

use super::options::{
    all_categories_used, annotate_categories, category_options, mark_category_used,
    remaining_categories,
};
use super::state::{FieldErrors, FormAction, FormField, FormState, FormValues};
use super::validate::{validate, REQUIRED};

const SUBMIT_FAILED: &str = "Something went wrong..!";
const ADDED: &str = "Bed capacity added successfully";
const UPDATED: &str = "Bed capacity updated successfully";

/// Inputs the form is opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormProps {
    pub facility_id: i64,
    /// Present in edit-mode.
    pub record_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

/// Dismissible banner shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl AppMessage {
    fn success(text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: MessageKind::Success,
        }
    }

    fn error(text: &str) -> Self {
        Self {
            text: text.to_string(),
            kind: MessageKind::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the backend was not contacted.
    Invalid,
    /// The backend call failed or answered unsuccessfully.
    Failed,
    Created,
    Updated,
}

/// Backend call queued behind the loading state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Load,
    Save(CapacityPayload),
}

/// Create/edit workflow for one facility's bed capacity.
#[derive(Debug, Clone)]
pub struct BedCapacityForm {
    props: FormProps,
    state: FormState,
    categories: Vec<CategoryOption>,
    loading: bool,
    message: Option<AppMessage>,
    navigation: Option<Route>,
    pending: Option<Pending>,
}

impl BedCapacityForm {
    pub fn new(props: FormProps) -> Self {
        Self {
            props,
            state: FormState::default(),
            categories: category_options(),
            loading: false,
            message: None,
            navigation: None,
            pending: None,
        }
    }

    pub fn props(&self) -> FormProps {
        self.props
    }

    pub fn is_edit(&self) -> bool {
        self.props.record_id.is_some()
    }

    pub fn values(&self) -> &FormValues {
        &self.state.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.state.errors
    }

    pub fn categories(&self) -> &[CategoryOption] {
        &self.categories
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn message(&self) -> Option<&AppMessage> {
        self.message.as_ref()
    }

    pub fn dismiss_message(&mut self) {
        self.message = None;
    }

    /// Route requested by the last action, if any.
    pub fn navigation(&self) -> Option<Route> {
        self.navigation
    }

    pub fn take_navigation(&mut self) -> Option<Route> {
        self.navigation.take()
    }

    pub fn header_text(&self) -> &'static str {
        if self.is_edit() {
            "Edit Bed Capacity"
        } else {
            "Add Bed Capacity"
        }
    }

    /// Whether the category about to be saved is the last one still free.
    pub fn is_last_category(&self) -> bool {
        remaining_categories(&self.categories) == 1
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_edit() {
            "Update"
        } else if self.is_last_category() {
            "Save"
        } else {
            "Save & Add More"
        }
    }

    pub fn dispatch(&mut self, action: FormAction) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
    }

    pub fn set_form(&mut self, values: FormValues) {
        self.dispatch(FormAction::ReplaceForm(values));
    }

    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.dispatch(FormAction::ReplaceErrors(errors));
    }

    /// Replace one field's text. The category is fixed in edit-mode, and in
    /// create-mode a category that already has a record is refused.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        if field == FormField::Category && (self.is_edit() || self.is_used_category(&value)) {
            return;
        }
        let values = self.state.form.with(field, value);
        self.set_form(values);
    }

    /// Whether `raw` names a category this facility already configured.
    fn is_used_category(&self, raw: &str) -> bool {
        self.categories
            .iter()
            .any(|option| option.disabled && option.id.to_string() == raw.trim())
    }

    /// Index into [`categories`](Self::categories) of the current selection,
    /// `0` (the placeholder) when nothing matches.
    pub fn selected_category_index(&self) -> usize {
        self.categories
            .iter()
            .position(|option| {
                !option.is_placeholder() && option.id.to_string() == self.state.form.category
            })
            .unwrap_or(0)
    }

    /// Move the selector by `step`, skipping disabled categories. Landing on the
    /// placeholder clears the field.
    pub fn cycle_category(&mut self, step: isize) {
        if self.is_edit() || self.categories.is_empty() {
            return;
        }

        let len = self.categories.len() as isize;
        let mut index = self.selected_category_index() as isize;
        for _ in 0..len {
            index = (index + step).rem_euclid(len);
            let option = &self.categories[index as usize];
            if option.disabled {
                continue;
            }
            let value = if option.is_placeholder() {
                String::new()
            } else {
                option.id.to_string()
            };
            self.set_field(FormField::Category, value);
            return;
        }
    }

    /// Mark the form as loading its data. The fetch itself runs on the next
    /// [`resolve`](Self::resolve), so a frame can be drawn in between.
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.pending = Some(Pending::Load);
    }

    /// Fetch what the form needs for its mode in one go.
    pub fn load<A: CapacityApi>(&mut self, api: &A) {
        self.begin_load();
        self.resolve(api);
    }

    /// Validate and, when the values pass, queue the save for the next
    /// [`resolve`](Self::resolve). Returns the outcome right away when the
    /// backend does not need to be contacted.
    pub fn request_submit(&mut self) -> Option<SubmitOutcome> {
        let mut validation = validate(&self.state.form);
        if !self.is_edit() && self.is_used_category(&self.state.form.category) {
            // Same as nothing selected.
            validation.errors.set(FormField::Category, REQUIRED);
            validation.is_valid = false;
        }
        self.set_errors(validation.errors);
        if !validation.is_valid {
            return Some(SubmitOutcome::Invalid);
        }

        match self.state.form.to_payload() {
            Ok(payload) => {
                self.loading = true;
                self.pending = Some(Pending::Save(payload));
                None
            }
            Err(err) => {
                warn!(
                    facility_id = self.props.facility_id,
                    error = %err,
                    "form values are not integers"
                );
                self.message = Some(AppMessage::error(SUBMIT_FAILED));
                Some(SubmitOutcome::Failed)
            }
        }
    }

    /// Validate, send, and apply the outcome.
    pub fn submit<A: CapacityApi>(&mut self, api: &A) -> SubmitOutcome {
        if let Some(outcome) = self.request_submit() {
            return outcome;
        }
        self.resolve(api).unwrap_or(SubmitOutcome::Failed)
    }

    /// Run the queued backend call, if any, and leave the loading state. A
    /// finished save reports its outcome; a finished load reports `None`.
    pub fn resolve<A: CapacityApi>(&mut self, api: &A) -> Option<SubmitOutcome> {
        let outcome = match self.pending.take()? {
            Pending::Load => {
                self.fetch(api);
                None
            }
            Pending::Save(payload) => Some(self.save(api, payload)),
        };
        self.loading = false;
        outcome
    }

    /// Failures leave the defaults in place without a message.
    fn fetch<A: CapacityApi>(&mut self, api: &A) {
        let FormProps {
            facility_id,
            record_id,
        } = self.props;

        match record_id {
            None => match api.list_capacity(facility_id) {
                Ok(response) => {
                    if let Some(existing) = response.data {
                        if existing.len() == BED_TYPES.len() {
                            info!(facility_id, "every bed type configured, leaving form");
                            self.navigation = Some(Route::FacilityOverview { facility_id });
                        } else {
                            self.categories = annotate_categories(BED_TYPES, &existing);
                            debug!(
                                facility_id,
                                remaining = remaining_categories(&self.categories),
                                "loaded bed types for create"
                            );
                        }
                    } else {
                        debug!(facility_id, status = response.status, "no capacity list");
                    }
                }
                Err(err) => warn!(facility_id, error = %err, "failed to list capacity"),
            },
            Some(id) => match api.get_capacity(facility_id, id) {
                Ok(response) => {
                    if let Some(record) = response.data {
                        self.set_form(FormValues::from_record(&record));
                        debug!(facility_id, record_id = id, "loaded capacity record");
                    } else {
                        debug!(facility_id, record_id = id, status = response.status, "no record");
                    }
                }
                Err(err) => warn!(facility_id, record_id = id, error = %err, "failed to load record"),
            },
        }
    }

    fn save<A: CapacityApi>(&mut self, api: &A, payload: CapacityPayload) -> SubmitOutcome {
        let FormProps {
            facility_id,
            record_id,
        } = self.props;

        let record = match api.create_capacity(facility_id, record_id, payload) {
            Ok(response) if response.status == STATUS_CREATED => response.data,
            Ok(response) => {
                warn!(facility_id, status = response.status, "capacity save rejected");
                None
            }
            Err(err) => {
                warn!(facility_id, error = %err, "capacity save failed");
                None
            }
        };

        let Some(record) = record else {
            self.message = Some(AppMessage::error(SUBMIT_FAILED));
            return SubmitOutcome::Failed;
        };

        self.categories = mark_category_used(&self.categories, record.category_id);
        self.set_form(FormValues::default());

        if record_id.is_none() {
            info!(facility_id, category_id = record.category_id, "bed capacity added");
            self.message = Some(AppMessage::success(ADDED));
            if all_categories_used(&self.categories) {
                self.navigation = Some(Route::DoctorAssignment { facility_id });
            }
            SubmitOutcome::Created
        } else {
            info!(facility_id, record_id = record.id, "bed capacity updated");
            self.message = Some(AppMessage::success(UPDATED));
            self.navigation = Some(Route::FacilityOverview { facility_id });
            SubmitOutcome::Updated
        }
    }

    /// Leave without saving.
    pub fn cancel(&mut self) {
        self.navigation = Some(Route::FacilityOverview {
            facility_id: self.props.facility_id,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::api::{ApiError, ApiResponse, STATUS_NOT_FOUND};
    use crate::form::{OCCUPANCY_EXCEEDS_TOTAL, REQUIRED};
    use crate::models::{CapacityPayload, CapacityRecord};

    /// Scripted backend that records every write.
    #[derive(Default)]
    struct FakeApi {
        existing: Vec<CapacityRecord>,
        record: Option<CapacityRecord>,
        save_status: Option<u16>,
        unavailable: bool,
        saved: RefCell<Vec<(i64, Option<i64>, CapacityPayload)>>,
    }

    impl CapacityApi for FakeApi {
        fn list_capacity(
            &self,
            _facility_id: i64,
        ) -> Result<ApiResponse<Vec<CapacityRecord>>, ApiError> {
            if self.unavailable {
                return Err(ApiError::Unavailable("offline".to_string()));
            }
            Ok(ApiResponse::ok(self.existing.clone()))
        }

        fn get_capacity(
            &self,
            _facility_id: i64,
            _record_id: i64,
        ) -> Result<ApiResponse<CapacityRecord>, ApiError> {
            Ok(match &self.record {
                Some(record) => ApiResponse::ok(record.clone()),
                None => ApiResponse::empty(STATUS_NOT_FOUND),
            })
        }

        fn create_capacity(
            &self,
            facility_id: i64,
            record_id: Option<i64>,
            payload: CapacityPayload,
        ) -> Result<ApiResponse<CapacityRecord>, ApiError> {
            if self.unavailable {
                return Err(ApiError::Unavailable("offline".to_string()));
            }
            self.saved.borrow_mut().push((facility_id, record_id, payload));
            let status = self.save_status.unwrap_or(STATUS_CREATED);
            if status != STATUS_CREATED {
                return Ok(ApiResponse::empty(status));
            }
            Ok(ApiResponse::created(CapacityRecord {
                id: record_id.unwrap_or(1),
                facility_id,
                category_id: payload.category_id,
                total_capacity: payload.total_capacity,
                current_occupancy: payload.current_occupancy,
            }))
        }
    }

    fn record(id: i64, category_id: i64) -> CapacityRecord {
        CapacityRecord {
            id,
            facility_id: 5,
            category_id,
            total_capacity: 20,
            current_occupancy: 4,
        }
    }

    fn create_form() -> BedCapacityForm {
        BedCapacityForm::new(FormProps {
            facility_id: 5,
            record_id: None,
        })
    }

    fn fill(form: &mut BedCapacityForm, category: &str, total: &str, occupied: &str) {
        form.set_field(FormField::Category, category);
        form.set_field(FormField::TotalCapacity, total);
        form.set_field(FormField::CurrentOccupancy, occupied);
    }

    #[test]
    fn create_submission_builds_integer_payload() {
        let api = FakeApi::default();
        let mut form = create_form();
        form.load(&api);
        fill(&mut form, "2", "10", "5");

        assert_eq!(form.submit(&api), SubmitOutcome::Created);
        let saved = api.saved.borrow();
        assert_eq!(
            saved.as_slice(),
            &[(
                5,
                None,
                CapacityPayload {
                    category_id: 2,
                    total_capacity: 10,
                    current_occupancy: 5,
                }
            )]
        );
        assert_eq!(form.values(), &FormValues::default());
        assert_eq!(form.message().map(|m| m.text.as_str()), Some(ADDED));
        assert!(form.categories().iter().any(|c| c.id == 2 && c.disabled));
        assert_eq!(form.navigation(), None);
    }

    #[test]
    fn invalid_form_never_reaches_backend() {
        let api = FakeApi::default();
        let mut form = create_form();
        fill(&mut form, "1", "3", "4");

        assert_eq!(form.submit(&api), SubmitOutcome::Invalid);
        assert!(api.saved.borrow().is_empty());
        assert_eq!(form.errors().current_occupancy, OCCUPANCY_EXCEEDS_TOTAL);
        assert_eq!(form.values().total_capacity, "3");
        assert!(form.message().is_none());
    }

    #[test]
    fn passing_validation_clears_previous_errors() {
        let api = FakeApi::default();
        let mut form = create_form();
        assert_eq!(form.submit(&api), SubmitOutcome::Invalid);
        assert_eq!(form.errors().category, REQUIRED);

        fill(&mut form, "10", "4", "4");
        assert_eq!(form.submit(&api), SubmitOutcome::Created);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn server_error_preserves_form_and_errors() {
        let api = FakeApi {
            save_status: Some(500),
            ..FakeApi::default()
        };
        let mut form = create_form();
        fill(&mut form, "3", "8", "2");
        let values_before = form.values().clone();
        let errors_before = form.errors().clone();

        assert_eq!(form.submit(&api), SubmitOutcome::Failed);
        assert_eq!(form.values(), &values_before);
        assert_eq!(form.errors(), &errors_before);
        let message = form.message().unwrap();
        assert_eq!(message.text, "Something went wrong..!");
        assert_eq!(message.kind, MessageKind::Error);
        assert_eq!(form.navigation(), None);
    }

    #[test]
    fn transport_error_is_a_submission_error() {
        let api = FakeApi {
            unavailable: true,
            ..FakeApi::default()
        };
        let mut form = create_form();
        fill(&mut form, "3", "8", "2");
        assert_eq!(form.submit(&api), SubmitOutcome::Failed);
        assert_eq!(form.values().category, "3");
        assert!(!form.is_loading());
    }

    #[test]
    fn full_facility_redirects_on_load() {
        let api = FakeApi {
            existing: BED_TYPES
                .iter()
                .enumerate()
                .map(|(idx, bed)| record(idx as i64 + 1, bed.id))
                .collect(),
            ..FakeApi::default()
        };
        let mut form = create_form();
        form.load(&api);
        assert_eq!(
            form.take_navigation(),
            Some(Route::FacilityOverview { facility_id: 5 })
        );
        assert!(!form.is_loading());
    }

    #[test]
    fn saving_the_last_category_moves_to_doctor_step() {
        let api = FakeApi {
            existing: BED_TYPES[..4]
                .iter()
                .enumerate()
                .map(|(idx, bed)| record(idx as i64 + 1, bed.id))
                .collect(),
            ..FakeApi::default()
        };
        let mut form = create_form();
        form.load(&api);
        assert!(form.is_last_category());
        assert_eq!(form.submit_label(), "Save");

        form.cycle_category(1);
        assert_eq!(form.values().category, BED_TYPES[4].id.to_string());
        form.set_field(FormField::TotalCapacity, "6");
        form.set_field(FormField::CurrentOccupancy, "6");

        assert_eq!(form.submit(&api), SubmitOutcome::Created);
        assert_eq!(
            form.navigation(),
            Some(Route::DoctorAssignment { facility_id: 5 })
        );
    }

    #[test]
    fn edit_load_populates_and_locks_category() {
        let api = FakeApi {
            record: Some(CapacityRecord {
                id: 7,
                facility_id: 5,
                category_id: 10,
                total_capacity: 30,
                current_occupancy: 12,
            }),
            ..FakeApi::default()
        };
        let mut form = BedCapacityForm::new(FormProps {
            facility_id: 5,
            record_id: Some(7),
        });
        form.load(&api);

        assert_eq!(
            form.values(),
            &FormValues {
                category: "10".to_string(),
                total_capacity: "30".to_string(),
                current_occupancy: "12".to_string(),
            }
        );
        assert_eq!(form.header_text(), "Edit Bed Capacity");
        assert_eq!(form.submit_label(), "Update");

        form.cycle_category(1);
        form.set_field(FormField::Category, "1");
        assert_eq!(form.values().category, "10");
    }

    #[test]
    fn update_returns_to_overview() {
        let api = FakeApi {
            record: Some(record(7, 1)),
            ..FakeApi::default()
        };
        let mut form = BedCapacityForm::new(FormProps {
            facility_id: 5,
            record_id: Some(7),
        });
        form.load(&api);
        form.set_field(FormField::CurrentOccupancy, "9");

        assert_eq!(form.submit(&api), SubmitOutcome::Updated);
        assert_eq!(api.saved.borrow()[0].1, Some(7));
        assert_eq!(form.message().map(|m| m.text.as_str()), Some(UPDATED));
        assert_eq!(
            form.navigation(),
            Some(Route::FacilityOverview { facility_id: 5 })
        );
    }

    #[test]
    fn missing_record_leaves_defaults_silently() {
        let api = FakeApi::default();
        let mut form = BedCapacityForm::new(FormProps {
            facility_id: 5,
            record_id: Some(99),
        });
        form.load(&api);
        assert_eq!(form.values(), &FormValues::default());
        assert!(form.message().is_none());
        assert_eq!(form.navigation(), None);
    }

    #[test]
    fn list_failure_keeps_every_category_available() {
        let api = FakeApi {
            unavailable: true,
            ..FakeApi::default()
        };
        let mut form = create_form();
        form.load(&api);
        assert_eq!(remaining_categories(form.categories()), BED_TYPES.len());
        assert!(form.message().is_none());
        assert_eq!(form.submit_label(), "Save & Add More");
    }

    #[test]
    fn selector_skips_used_categories_and_wraps_to_placeholder() {
        let api = FakeApi {
            existing: vec![record(1, 1), record(2, 2)],
            ..FakeApi::default()
        };
        let mut form = create_form();
        form.load(&api);

        form.cycle_category(1);
        assert_eq!(form.values().category, "3");
        form.cycle_category(-1);
        assert_eq!(form.values().category, "");
        assert_eq!(form.selected_category_index(), 0);
        form.cycle_category(-1);
        assert_eq!(form.values().category, "20");
    }

    #[test]
    fn used_category_is_refused_before_the_backend() {
        let api = FakeApi {
            existing: vec![record(1, 2)],
            ..FakeApi::default()
        };
        let mut form = create_form();
        form.load(&api);

        fill(&mut form, "2", "5", "1");
        assert_eq!(form.values().category, "");

        form.set_form(FormValues {
            category: "2".to_string(),
            total_capacity: "5".to_string(),
            current_occupancy: "1".to_string(),
        });
        assert_eq!(form.submit(&api), SubmitOutcome::Invalid);
        assert!(api.saved.borrow().is_empty());
        assert_eq!(form.errors().category, REQUIRED);
        assert_eq!(form.values().category, "2");
    }

    #[test]
    fn loading_lasts_until_resolved() {
        let api = FakeApi::default();
        let mut form = create_form();
        form.begin_load();
        assert!(form.is_loading());
        assert_eq!(form.resolve(&api), None);
        assert!(!form.is_loading());

        fill(&mut form, "1", "4", "2");
        assert_eq!(form.request_submit(), None);
        assert!(form.is_loading());
        assert!(api.saved.borrow().is_empty());

        assert_eq!(form.resolve(&api), Some(SubmitOutcome::Created));
        assert!(!form.is_loading());
        assert_eq!(api.saved.borrow().len(), 1);
        assert_eq!(form.resolve(&api), None);
    }

    #[test]
    fn cancel_targets_overview() {
        let mut form = create_form();
        form.cancel();
        assert_eq!(
            form.take_navigation().map(|route| route.path()),
            Some("/facility/5".to_string())
        );
        assert_eq!(form.navigation(), None);
    }
}
