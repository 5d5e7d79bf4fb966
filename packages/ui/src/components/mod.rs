//! Reusable widgets shared by every page.

mod button;
mod expandable;
mod file_upload;
mod form_answer;
mod form_fields_editor;
mod input;
mod load_more;
mod modal_overlay;
mod not_found;
mod paper;

pub use button::{Button, ButtonVariant};
pub use expandable::Expandable;
pub use file_upload::FileUpload;
pub use form_answer::FormAnswer;
pub use form_fields_editor::{validate_fields, FieldsEdit, FormFieldsEditor};
pub use input::{Input, Label, Textarea};
pub use load_more::LoadMore;
pub use modal_overlay::ModalOverlay;
pub use not_found::NotFoundIndicator;
pub use paper::Paper;
