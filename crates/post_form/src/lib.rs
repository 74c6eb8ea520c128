use shared::{
    domain::{Draft, DraftField, InputKind, MAX_TAGS},
    error::{FieldErrors, FormError},
    protocol::{FormCommand, FormEvent, TagRejection},
};
use tokio::sync::broadcast;
use tracing::{debug, info};

pub mod config;
mod notice;
pub mod validation;

pub use config::{load_settings, FormSettings};
pub use validation::validate_draft;

use notice::SuccessNotice;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Receives each draft the form hands off.
pub trait SubmissionSink {
    fn submit(&mut self, draft: Draft);
}

impl<F> SubmissionSink for F
where
    F: FnMut(Draft),
{
    fn submit(&mut self, draft: Draft) {
        self(draft)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddTagOutcome {
    Added,
    Rejected(TagRejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Invalid,
}

/// What a dispatched [`FormCommand`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    FieldUpdated,
    TagBufferUpdated,
    Tag(AddTagOutcome),
    TagDeleted(Option<String>),
    Submit(SubmitOutcome),
}

/// Local state of the "create post" form: the draft, the pending tag text,
/// the last validation result and the success acknowledgment.
pub struct PostDraftController<S: SubmissionSink> {
    settings: FormSettings,
    sink: S,
    draft: Draft,
    pending_tag: String,
    errors: FieldErrors,
    notice: SuccessNotice,
    events: broadcast::Sender<FormEvent>,
}

impl<S: SubmissionSink> PostDraftController<S> {
    pub fn new(settings: FormSettings, sink: S) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let draft = Draft::with_image(settings.placeholder_image.clone());
        Self {
            settings,
            sink,
            draft,
            pending_tag: String::new(),
            errors: FieldErrors::new(),
            notice: SuccessNotice::new(),
            events,
        }
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn pending_tag(&self) -> &str {
        &self.pending_tag
    }

    /// Errors from the most recent submit attempt.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn success_visible(&self) -> bool {
        self.notice.is_visible()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FormEvent> {
        self.events.subscribe()
    }

    /// Stores a raw input value. `published` is coerced to the tri-state;
    /// every other editable field keeps the raw text. Nothing is validated
    /// here.
    pub fn update_field(
        &mut self,
        field: DraftField,
        raw_value: &str,
        input: InputKind,
    ) -> Result<(), FormError> {
        match field {
            DraftField::Title => self.draft.title = raw_value.to_string(),
            DraftField::Content => self.draft.content = raw_value.to_string(),
            DraftField::Category => self.draft.category = raw_value.to_string(),
            DraftField::Published => self.draft.published = coerce_published(raw_value, input),
            other => return Err(FormError::ReadOnlyField(other)),
        }

        debug!(%field, ?input, "draft field updated");
        self.emit(FormEvent::DraftUpdated {
            draft: self.draft.clone(),
        });
        Ok(())
    }

    pub fn update_tag_buffer(&mut self, text: impl Into<String>) {
        self.pending_tag = text.into();
    }

    /// Appends the trimmed pending tag. Blank, duplicate and over-capacity
    /// tags leave the draft and the buffer untouched.
    pub fn add_tag(&mut self) -> AddTagOutcome {
        let tag = self.pending_tag.trim();

        let rejection = if tag.is_empty() {
            Some(TagRejection::Blank)
        } else if self.draft.tags.iter().any(|existing| existing == tag) {
            Some(TagRejection::Duplicate)
        } else if self.draft.tags.len() >= MAX_TAGS {
            Some(TagRejection::AtCapacity)
        } else {
            None
        };

        if let Some(reason) = rejection {
            debug!(tag, ?reason, "tag not added");
            let tag = tag.to_string();
            self.emit(FormEvent::TagRejected { tag, reason });
            return AddTagOutcome::Rejected(reason);
        }

        let tag = tag.to_string();
        self.draft.tags.push(tag);
        self.pending_tag.clear();
        self.emit(FormEvent::DraftUpdated {
            draft: self.draft.clone(),
        });
        AddTagOutcome::Added
    }

    /// Removes the tag at `index`. Out-of-range indices are ignored.
    pub fn delete_tag(&mut self, index: usize) -> Option<String> {
        if index >= self.draft.tags.len() {
            debug!(index, len = self.draft.tags.len(), "ignoring out-of-range tag index");
            return None;
        }

        let removed = self.draft.tags.remove(index);
        self.emit(FormEvent::DraftUpdated {
            draft: self.draft.clone(),
        });
        Some(removed)
    }

    pub fn validate(&self) -> FieldErrors {
        validate_draft(&self.draft)
    }

    /// Hands the draft to the sink and resets the form. When validation is
    /// enforced an invalid draft is kept and its errors are recorded instead.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.settings.enforce_validation {
            self.errors = self.validate();
            if !self.errors.is_valid() {
                info!(invalid_fields = self.errors.len(), "form is invalid");
                self.emit(FormEvent::ValidationFailed {
                    errors: self.errors.clone(),
                });
                return SubmitOutcome::Invalid;
            }
        }

        let fresh = Draft::with_image(self.settings.placeholder_image.clone());
        let draft = std::mem::replace(&mut self.draft, fresh);
        info!(title = %draft.title, tags = draft.tags.len(), "submitting post draft");

        self.emit(FormEvent::Submitted {
            draft: draft.clone(),
        });
        self.sink.submit(draft);

        if self.settings.enforce_validation {
            self.notice
                .show(self.settings.success_notice(), self.events.clone());
        }
        SubmitOutcome::Submitted
    }

    pub fn dismiss_success(&mut self) {
        self.notice.dismiss();
    }

    /// Cancels the pending success-notice clear. Dropping the controller does
    /// the same.
    pub fn teardown(&mut self) {
        self.notice.cancel();
    }

    pub fn handle(&mut self, command: FormCommand) -> Result<CommandOutcome, FormError> {
        let outcome = match command {
            FormCommand::UpdateField {
                field,
                value,
                input,
            } => {
                self.update_field(field, &value, input)?;
                CommandOutcome::FieldUpdated
            }
            FormCommand::UpdateTagBuffer { text } => {
                self.update_tag_buffer(text);
                CommandOutcome::TagBufferUpdated
            }
            FormCommand::AddTag => CommandOutcome::Tag(self.add_tag()),
            FormCommand::DeleteTag { index } => CommandOutcome::TagDeleted(self.delete_tag(index)),
            FormCommand::Submit => CommandOutcome::Submit(self.submit()),
        };
        Ok(outcome)
    }

    fn emit(&self, event: FormEvent) {
        // No subscribers is the common case for headless use.
        let _ = self.events.send(event);
    }
}

fn coerce_published(raw_value: &str, input: InputKind) -> Option<bool> {
    match input {
        InputKind::Radio => Some(raw_value == "true"),
        _ => match raw_value {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
