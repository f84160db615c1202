//! Recorded chat-notification payloads.

use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value as JsonValue;

/// Append-only log of every payload posted to the chat endpoint, kept so
/// tests can assert on what the application under test sent.
#[derive(Debug, Clone, Default)]
pub struct ChatOutbox {
    payloads: Arc<Mutex<Vec<JsonValue>>>,
}

impl ChatOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<JsonValue>> {
        self.payloads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store a payload and return its position in the outbox.
    pub fn record(&self, payload: JsonValue) -> usize {
        let mut payloads = self.lock();
        payloads.push(payload);
        let position = payloads.len() - 1;
        tracing::debug!(position, "Chat payload recorded");
        position
    }

    /// Snapshot of all payloads in arrival order.
    pub fn payloads(&self) -> Vec<JsonValue> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}
