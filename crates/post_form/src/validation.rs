//! Required-field checks run when a strict form is submitted.

use shared::{
    domain::{Draft, DraftField},
    error::FieldErrors,
};

pub const TITLE_REQUIRED: &str = "Title is required";
pub const CONTENT_REQUIRED: &str = "Content is required";
pub const CATEGORY_REQUIRED: &str = "Category is required";
pub const TAGS_REQUIRED: &str = "At least one tag is required";

/// Every rule is evaluated so all missing fields are reported at once.
pub fn validate_draft(draft: &Draft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.title.trim().is_empty() {
        errors.insert(DraftField::Title, TITLE_REQUIRED);
    }
    if draft.content.trim().is_empty() {
        errors.insert(DraftField::Content, CONTENT_REQUIRED);
    }
    if draft.category.trim().is_empty() {
        errors.insert(DraftField::Category, CATEGORY_REQUIRED);
    }
    if draft.tags.is_empty() {
        errors.insert(DraftField::Tags, TAGS_REQUIRED);
    }

    errors
}
