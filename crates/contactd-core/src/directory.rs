//! In-memory contact directory.
//!
//! One [`ContactDirectory`] owns every contact, the id counter and the tag
//! catalog. Each public operation takes the inner lock exactly once, so
//! operations are atomic with respect to each other and id assignment cannot
//! race.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Error, Result, ValidationError};
use crate::events::{DirectoryEvent, DirectoryObserver, EventRecord};
use crate::models::{parse_fields, Contact, ContactPatch, NewContact, Tag, TagRef};

struct DirectoryState {
    /// Keyed by id; ids are assigned monotonically so iteration order is
    /// creation order.
    contacts: BTreeMap<u64, Contact>,
    last_id: u64,
    catalog: Vec<Tag>,
}

/// Injectable store for contacts and the tag catalog.
#[derive(Clone)]
pub struct ContactDirectory {
    state: Arc<Mutex<DirectoryState>>,
    observer: Option<Arc<dyn DirectoryObserver>>,
}

impl Default for ContactDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ContactDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("ContactDirectory")
            .field("contacts", &state.contacts.len())
            .field("last_id", &state.last_id)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl ContactDirectory {
    /// Empty directory with the seeded tag catalog and no observer.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(DirectoryState {
                contacts: BTreeMap::new(),
                last_id: 0,
                catalog: Tag::seeded_catalog(),
            })),
            observer: None,
        }
    }

    /// Install an observer that is told about every successful mutation.
    pub fn with_observer(mut self, observer: Arc<dyn DirectoryObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    // A panic while holding the lock cannot leave a contact half-written
    // (every mutation is a single assignment or push), so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, DirectoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn notify(&self, event: DirectoryEvent) {
        if let Some(observer) = &self.observer {
            observer.on_event(&EventRecord::now(event));
        }
    }

    /// Create a contact.
    ///
    /// Checks run in this order: email present, email unused, fields shape.
    pub fn create_contact(&self, new: NewContact) -> Result<Contact> {
        let email = new.email().ok_or(ValidationError::EmailMissing)?.to_string();

        let mut state = self.lock();
        if state.contacts.values().any(|c| c.email == email) {
            return Err(Error::Conflict(email));
        }

        let fields = match &new.fields {
            Some(raw) => parse_fields(raw)?,
            None => Vec::new(),
        };

        state.last_id += 1;
        let mut contact = Contact {
            id: state.last_id,
            email,
            tags: Vec::new(),
            fields: Vec::with_capacity(fields.len()),
        };
        for field in fields {
            contact.upsert_field(field);
        }
        state.contacts.insert(contact.id, contact.clone());

        self.notify(DirectoryEvent::ContactCreated {
            contact_id: contact.id,
            email: contact.email.clone(),
        });
        tracing::debug!(contact_id = contact.id, "Contact created");
        Ok(contact)
    }

    /// Apply a merge-patch to a contact.
    ///
    /// The email is overwritten without a uniqueness check. Patch fields are
    /// validated before anything is modified.
    pub fn patch_contact(&self, id: u64, patch: ContactPatch) -> Result<Contact> {
        let mut state = self.lock();
        let contact = state
            .contacts
            .get_mut(&id)
            .ok_or(Error::ContactNotFound(id))?;

        let fields = match &patch.fields {
            Some(raw) => parse_fields(raw)?,
            None => Vec::new(),
        };
        let fields_touched = fields.len();

        let email_changed = match patch.email {
            Some(email) => {
                let changed = contact.email != email;
                contact.email = email;
                changed
            }
            None => false,
        };
        for field in fields {
            contact.upsert_field(field);
        }
        let updated = contact.clone();

        self.notify(DirectoryEvent::ContactPatched {
            contact_id: id,
            email_changed,
            fields_touched,
        });
        Ok(updated)
    }

    /// Attach a catalog tag to a contact. Assigning a tag the contact already
    /// has succeeds without changing anything.
    ///
    /// The contact is looked up first, so an unknown contact wins over an
    /// unknown tag.
    pub fn assign_tag(&self, contact_id: u64, tag: TagRef) -> Result<Contact> {
        if tag == TagRef::Id(0) {
            return Err(ValidationError::TagIdMissing.into());
        }

        let mut state = self.lock();
        let DirectoryState {
            contacts, catalog, ..
        } = &mut *state;
        let contact = contacts
            .get_mut(&contact_id)
            .ok_or(Error::ContactNotFound(contact_id))?;

        let tag_id = match tag.id() {
            Some(tag_id) => tag_id,
            None => return Err(Error::TagNotFound(tag)),
        };
        let already_present = contact.has_tag(tag_id);
        if already_present {
            tracing::debug!(contact_id, tag_id, "Tag already assigned");
        } else {
            let found = catalog
                .iter()
                .find(|t| t.id == tag_id)
                .ok_or(Error::TagNotFound(tag))?;
            contact.tags.push(found.clone());
        }
        let updated = contact.clone();

        self.notify(DirectoryEvent::TagAssigned {
            contact_id,
            tag_id,
            already_present,
        });
        Ok(updated)
    }

    /// All contacts in creation order, or the exact email match.
    ///
    /// An empty filter is treated as no filter.
    pub fn list_contacts(&self, email: Option<&str>) -> Vec<Contact> {
        let state = self.lock();
        match email.filter(|e| !e.is_empty()) {
            Some(email) => state
                .contacts
                .values()
                .filter(|c| c.email == email)
                .cloned()
                .collect(),
            None => state.contacts.values().cloned().collect(),
        }
    }

    /// The tag catalog, or the tags whose name matches exactly.
    pub fn list_tags(&self, name: Option<&str>) -> Vec<Tag> {
        let state = self.lock();
        match name.filter(|n| !n.is_empty()) {
            Some(name) => state
                .catalog
                .iter()
                .filter(|t| t.name == name)
                .cloned()
                .collect(),
            None => state.catalog.clone(),
        }
    }

    pub fn get_contact(&self, id: u64) -> Result<Contact> {
        self.lock()
            .contacts
            .get(&id)
            .cloned()
            .ok_or(Error::ContactNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.lock().contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every contact and restart id assignment at 1.
    pub fn reset(&self) {
        let mut state = self.lock();
        let contacts_cleared = state.contacts.len();
        state.contacts.clear();
        state.last_id = 0;

        self.notify(DirectoryEvent::Reset { contacts_cleared });
    }
}
