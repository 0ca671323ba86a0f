//! User-facing outcome notifications.
//!
//! Mutations report their outcome ("Client created") through a sink so
//! the transport layer decides how messages surface: the server logs
//! them, tests capture them in memory.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use stafftrack_core::Timestamp;

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A delivered outcome message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: Timestamp,
}

impl Notification {
    #[must_use]
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Timestamp::now(),
        }
    }
}

/// Sink for outcome messages. Delivery is fire-and-forget; a sink must
/// never fail a mutation.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, kind: NotificationKind);
}

/// Shared handle to a notification sink.
pub type DynNotifier = Arc<dyn NotificationSink>;

/// Sink that forwards messages to the tracing pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Success => tracing::info!(kind = %kind, "{message}"),
            NotificationKind::Error => tracing::warn!(kind = %kind, "{message}"),
        }
    }
}

/// Sink that retains messages in memory, for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Notification>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured notifications, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Returns just the captured message strings, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.snapshot().into_iter().map(|n| n.message).collect()
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, message: &str, kind: NotificationKind) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(Notification::new(message, kind));
        }
    }
}
