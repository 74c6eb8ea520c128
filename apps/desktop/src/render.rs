//! Plain-text rendering of the form state.

use std::fmt::Write as _;

use post_form::{PostDraftController, SubmissionSink};
use shared::domain::{Category, DraftField};

pub const SUCCESS_BANNER: &str = "Post created successfully";

pub fn render_form<S: SubmissionSink>(form: &PostDraftController<S>) -> String {
    let draft = form.draft();
    let errors = form.errors();
    let mut out = String::new();

    if form.success_visible() {
        let _ = writeln!(out, "*** {SUCCESS_BANNER} ***");
    }
    let _ = writeln!(out, "== Create Post ==");

    let mut field = |label: &str, value: &str, name: DraftField| {
        let _ = writeln!(out, "{label}: {value}");
        if let Some(message) = errors.get(name) {
            let _ = writeln!(out, "  ! {message}");
        }
    };
    field("Title", &draft.title, DraftField::Title);
    field("Content", &draft.content, DraftField::Content);

    let category = if draft.category.is_empty() {
        "(select a category)"
    } else {
        draft.category.as_str()
    };
    field("Category", category, DraftField::Category);

    let tags = draft
        .tags
        .iter()
        .enumerate()
        .map(|(i, tag)| format!("[{i}] #{tag}"))
        .collect::<Vec<_>>()
        .join("  ");
    field("Tags", &tags, DraftField::Tags);

    let published = match draft.published {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    };
    let _ = writeln!(out, "Publish ?: {published}");

    if !form.pending_tag().is_empty() {
        let _ = writeln!(out, "(pending tag: {})", form.pending_tag());
    }

    out
}

pub fn category_choices() -> String {
    Category::ALL
        .iter()
        .map(|category| category.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
