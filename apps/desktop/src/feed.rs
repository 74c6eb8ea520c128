//! The surrounding application's list of created posts.

use chrono::{DateTime, Utc};
use post_form::SubmissionSink;
use serde::Serialize;
use shared::domain::{Draft, PostId};
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct FeedEntry {
    #[serde(flatten)]
    pub post: Draft,
    pub received_at: DateTime<Utc>,
}

/// Receives submitted drafts and numbers them in arrival order.
#[derive(Debug, Default)]
pub struct PostFeed {
    entries: Vec<FeedEntry>,
}

impl PostFeed {
    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    fn next_id(&self) -> PostId {
        PostId(self.entries.len() as i64 + 1)
    }
}

impl SubmissionSink for PostFeed {
    fn submit(&mut self, mut draft: Draft) {
        let id = self.next_id();
        draft.id = Some(id);
        info!(post_id = id.0, title = %draft.title, "post added to feed");
        self.entries.push(FeedEntry {
            post: draft,
            received_at: Utc::now(),
        });
    }
}
