//! Timed "post created" acknowledgment.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use shared::protocol::FormEvent;
use tokio::{runtime::Handle, sync::broadcast, task::JoinHandle};
use tracing::{debug, warn};

/// Flag that is raised on a successful submit and lowered by a scheduled
/// task. The task is aborted when the notice is re-shown, dismissed or
/// dropped, so nothing fires after the owning controller is gone.
pub(crate) struct SuccessNotice {
    visible: Arc<AtomicBool>,
    clear_task: Option<JoinHandle<()>>,
}

impl SuccessNotice {
    pub(crate) fn new() -> Self {
        Self {
            visible: Arc::new(AtomicBool::new(false)),
            clear_task: None,
        }
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire)
    }

    pub(crate) fn show(&mut self, clear_after: Duration, events: broadcast::Sender<FormEvent>) {
        self.cancel();
        self.visible.store(true, Ordering::Release);

        let Ok(runtime) = Handle::try_current() else {
            warn!("no async runtime available; success notice stays up until dismissed");
            return;
        };

        let visible = Arc::clone(&self.visible);
        self.clear_task = Some(runtime.spawn(async move {
            tokio::time::sleep(clear_after).await;
            visible.store(false, Ordering::Release);
            debug!("success notice cleared");
            let _ = events.send(FormEvent::SuccessCleared);
        }));
    }

    pub(crate) fn dismiss(&mut self) {
        self.cancel();
        self.visible.store(false, Ordering::Release);
    }

    /// Aborts a pending clear without touching the flag.
    pub(crate) fn cancel(&mut self) {
        if let Some(task) = self.clear_task.take() {
            task.abort();
        }
    }
}

impl Drop for SuccessNotice {
    fn drop(&mut self) {
        self.cancel();
    }
}
