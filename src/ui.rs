//! Ratatui front-end: a facility overview listing capacity records and the
//! bed capacity form itself.

mod app;
mod form_view;
mod helpers;
mod overview;
mod terminal;

pub use app::App;
pub use terminal::run_app;
