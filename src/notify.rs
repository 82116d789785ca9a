//! Ephemeral user-facing notifications. Producers push a message and get back
//! an id; the queue displays it for a fixed duration and then drops it, unless
//! something dismisses it first. Renderers poll `active` for the current list.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// How long a notification stays visible before expiring on its own.
pub const DISPLAY_DURATION: Duration = Duration::from_millis(3000);

/// Visual severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// A single live notification. Owned by the queue; producers keep only the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub severity: Severity,
}

/// Ordered queue of ephemeral notifications with automatic expiry.
///
/// Cheap to clone; clones share the same underlying queue, so the failure
/// classifier, the expiry timers, and the rendering side all see one list.
#[derive(Clone, Default)]
pub struct NotificationQueue {
    inner: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a notification and arms its expiry timer.
    ///
    /// Display order is insertion order. Every push gets a fresh id, so two
    /// identical messages pushed back to back are distinct entries with
    /// independent lifetimes. The timer needs a running Tokio runtime.
    pub fn push(&self, message: impl Into<String>, severity: Severity) -> Uuid {
        let id = Uuid::new_v4();
        let notification = Notification {
            id,
            message: message.into(),
            severity,
        };
        self.inner.lock().unwrap().push(notification);

        let queue = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(DISPLAY_DURATION).await;
            queue.dismiss(id);
        });

        id
    }

    /// Removes a notification immediately.
    ///
    /// Dismissing an id that is no longer present is a silent no-op, which is
    /// what makes the expiry timer safe: firing after a manual dismissal
    /// finds nothing to remove and touches nothing else.
    pub fn dismiss(&self, id: Uuid) {
        self.inner.lock().unwrap().retain(|n| n.id != id);
    }

    /// Snapshot of the live notifications in display order.
    pub fn active(&self) -> Vec<Notification> {
        self.inner.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().is_empty()
    }
}
