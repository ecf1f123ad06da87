//! Contact list and editor state, independent of any widget toolkit.

pub mod date;
pub mod editor;
pub mod list;
#[cfg(test)]
pub(crate) mod testing;

pub use date::format_date;
pub use editor::{EditorForm, EditorMode, EditorOutcome, Field, FieldError, FieldErrors, SubmitStatus};
pub use list::{DeleteStatus, ListPhase, ListView};
