//! UI Components
//!
//! Leptos components for the splash, auth and dashboard screens.

mod auth_view;
mod dashboard;
mod delete_confirm_dialog;
mod loader;
mod stat_card;
mod student_modal;
mod student_row;

pub use auth_view::AuthView;
pub use dashboard::Dashboard;
pub use delete_confirm_dialog::DeleteConfirmDialog;
pub use loader::Loader;
pub use stat_card::StatCard;
pub use student_modal::StudentModal;
pub use student_row::StudentRow;
