use serde::{Deserialize, Serialize};

use crate::{
    domain::{Draft, DraftField, InputKind},
    error::FieldErrors,
};

/// Why a tag was not added. Front-ends may show it or ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagRejection {
    Blank,
    Duplicate,
    AtCapacity,
}

/// Input events a rendering layer forwards to the form controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum FormCommand {
    UpdateField {
        field: DraftField,
        value: String,
        #[serde(default)]
        input: InputKind,
    },
    UpdateTagBuffer {
        text: String,
    },
    AddTag,
    DeleteTag {
        index: usize,
    },
    Submit,
}

/// State changes the controller announces so a front-end knows to redraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum FormEvent {
    DraftUpdated {
        draft: Draft,
    },
    TagRejected {
        tag: String,
        reason: TagRejection,
    },
    ValidationFailed {
        errors: FieldErrors,
    },
    Submitted {
        draft: Draft,
    },
    SuccessCleared,
}
