//! # contactd-core
//!
//! In-memory state behind the contactd mock server: the contact directory
//! with its fixed tag catalog, the chat outbox, and the fault switch.

pub mod backend;
pub mod directory;
pub mod error;
pub mod events;
pub mod fault;
pub mod logging;
pub mod models;
pub mod outbox;

// Re-export commonly used types at crate root
pub use backend::MockBackend;
pub use directory::ContactDirectory;
pub use error::{Error, Result, ValidationError};
pub use events::{DirectoryEvent, DirectoryObserver, EventRecord, TracingObserver};
pub use fault::FaultSwitch;
pub use models::{
    parse_fields, parse_tag_id, Contact, ContactPatch, Field, NewContact, Tag, TagRef,
};
pub use outbox::ChatOutbox;
