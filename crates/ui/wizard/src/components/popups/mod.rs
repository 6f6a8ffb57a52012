/// Editor and message popups for the form.
///
/// This module only aggregates the concrete popup types and re-exports the
/// shared drawing helpers from `components/popup.rs`.
pub mod alert;
pub mod input;
pub mod single_choice;

pub use crate::components::popup::{centered_rect_fixed, draw_popup_frame};
