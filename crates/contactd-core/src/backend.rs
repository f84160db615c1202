//! Everything the mock server holds in memory, bundled for injection.

use std::sync::Arc;

use crate::directory::ContactDirectory;
use crate::events::DirectoryObserver;
use crate::fault::FaultSwitch;
use crate::outbox::ChatOutbox;

/// The full in-memory state of one mock server instance.
///
/// Cloning is cheap and every clone shares the same state.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    pub directory: ContactDirectory,
    pub outbox: ChatOutbox,
    pub fault: FaultSwitch,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(observer: Arc<dyn DirectoryObserver>) -> Self {
        Self {
            directory: ContactDirectory::new().with_observer(observer),
            ..Self::default()
        }
    }

    /// Return to the freshly-started state: no contacts, id counter at zero,
    /// no chat payloads, fault switch off.
    pub fn reset(&self) {
        self.directory.reset();
        self.outbox.clear();
        self.fault.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewContact;
    use serde_json::json;

    #[test]
    fn test_reset_clears_everything() {
        let backend = MockBackend::new();
        backend
            .directory
            .create_contact(NewContact::new("a@example.com"))
            .unwrap();
        backend.outbox.record(json!({"text": "hi"}));
        backend.fault.trip();

        backend.reset();

        assert!(backend.directory.is_empty());
        assert!(backend.outbox.is_empty());
        assert!(!backend.fault.is_tripped());
        let next = backend
            .directory
            .create_contact(NewContact::new("b@example.com"))
            .unwrap();
        assert_eq!(next.id, 1);
    }
}
