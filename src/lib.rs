//! Core library surface for the Bed Capacity Manager TUI.
//!
//! The form logic in [`form`] does not depend on the terminal, so it can be
//! driven by any [`CapacityApi`] implementation and exercised in tests without
//! a screen.
pub mod api;
pub mod config;
pub mod db;
pub mod form;
pub mod logging;
pub mod models;
pub mod routes;
pub mod ui;

pub use api::{ApiError, ApiResponse, CapacityApi};
pub use config::AppConfig;
pub use db::{ensure_schema, open_in_memory, CapacityStore};
pub use form::{BedCapacityForm, FormProps};
pub use models::{CapacityPayload, CapacityRecord, BED_TYPES};
pub use routes::Route;
pub use ui::{run_app, App};
