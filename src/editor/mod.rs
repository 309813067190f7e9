//! Editing session: the live diagram, its undo history, and view state.

pub mod history;
pub mod surface;
pub mod view;

pub use history::{History, MAX_HISTORY};
pub use surface::{DeleteRequest, DiagramSurface};
pub use view::{DELETE_CONFIRM_WINDOW, LabelDraft, ViewState};
