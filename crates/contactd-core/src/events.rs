//! Directory events and the observer hook the directory reports them to.
//!
//! Observers are instrumentation only. The directory calls
//! [`DirectoryObserver::on_event`] after every successful mutation and its
//! behaviour does not depend on whether any observer is installed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::logging;

/// A successful mutation of the directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DirectoryEvent {
    ContactCreated {
        contact_id: u64,
        email: String,
    },
    ContactPatched {
        contact_id: u64,
        email_changed: bool,
        fields_touched: usize,
    },
    TagAssigned {
        contact_id: u64,
        tag_id: u64,
        /// The contact already carried the tag; nothing changed.
        already_present: bool,
    },
    Reset {
        contacts_cleared: usize,
    },
}

impl DirectoryEvent {
    /// Stable machine-readable event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ContactCreated { .. } => "contact_created",
            Self::ContactPatched { .. } => "contact_patched",
            Self::TagAssigned { .. } => "tag_assigned",
            Self::Reset { .. } => "reset",
        }
    }

    /// Contact the event concerns, if any.
    pub fn contact_id(&self) -> Option<u64> {
        match self {
            Self::ContactCreated { contact_id, .. }
            | Self::ContactPatched { contact_id, .. }
            | Self::TagAssigned { contact_id, .. } => Some(*contact_id),
            Self::Reset { .. } => None,
        }
    }
}

/// Event plus the time it was emitted.
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub occurred_at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: DirectoryEvent,
}

impl EventRecord {
    pub fn now(event: DirectoryEvent) -> Self {
        Self {
            occurred_at: Utc::now(),
            event,
        }
    }
}

/// Receives every successful directory mutation.
///
/// Called while the directory lock is held, so implementations must not call
/// back into the directory.
pub trait DirectoryObserver: Send + Sync {
    fn on_event(&self, record: &EventRecord);
}

/// Observer that emits each event as a structured `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl DirectoryObserver for TracingObserver {
    fn on_event(&self, record: &EventRecord) {
        let payload = serde_json::to_string(&record.event).unwrap_or_default();
        tracing::info!(
            subsystem = logging::SUBSYSTEM_DIRECTORY,
            event_type = record.event.event_type(),
            contact_id = record.event.contact_id(),
            occurred_at = %record.occurred_at.to_rfc3339(),
            payload = %payload,
            "Directory event"
        );
    }
}
