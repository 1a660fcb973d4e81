// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::warn;

use crate::forms::{BUSINESS_NAME_REQUIRED, ContactDraft};
use crate::notify::Notifier;
use crate::repo::ContactRepository;
use crate::{CategoryId, Contact, ContactId};

pub const CONTACT_ADDED: &str = "Contact added";
pub const CONTACT_ADD_FAILED: &str = "Failed to add contact";
pub const CONTACT_UPDATED: &str = "Contact updated";
pub const CONTACT_UPDATE_FAILED: &str = "Failed to update contact";
pub const CONTACT_DELETED: &str = "Contact deleted";
pub const CONTACT_DELETE_FAILED: &str = "Failed to delete contact";
pub const EDIT_IN_PROGRESS: &str = "Finish or cancel the current edit first";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Validation failed; no request was made.
    Rejected,
    /// Stored and prepended; the caller should leave adding mode.
    Added(ContactId),
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    NotEditing,
    Rejected,
    Saved,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EditSession {
    contact_id: ContactId,
    seed: ContactDraft,
    draft: ContactDraft,
}

impl EditSession {
    fn is_dirty(&self) -> bool {
        self.seed != self.draft
    }
}

/// Contact table for one category: cached rows, the shared add draft, and at
/// most one row in edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactManager {
    category_id: CategoryId,
    contacts: Vec<Contact>,
    loading: bool,
    pub new_contact: ContactDraft,
    editing: Option<EditSession>,
}

impl ContactManager {
    pub fn new(category_id: CategoryId) -> Self {
        Self {
            category_id,
            contacts: Vec::new(),
            loading: true,
            new_contact: ContactDraft::default(),
            editing: None,
        }
    }

    pub const fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn editing_id(&self) -> Option<&ContactId> {
        self.editing.as_ref().map(|session| &session.contact_id)
    }

    pub fn edit_draft(&self) -> Option<&ContactDraft> {
        self.editing.as_ref().map(|session| &session.draft)
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut ContactDraft> {
        self.editing.as_mut().map(|session| &mut session.draft)
    }

    /// Points the manager at a category, possibly the same one again. Cached
    /// rows, any edit and the add draft are dropped before the fetch so nothing
    /// from the previous visit survives.
    pub fn scope_to<R: ContactRepository + ?Sized>(
        &mut self,
        repo: &mut R,
        category_id: CategoryId,
    ) -> bool {
        self.new_contact = ContactDraft::default();
        self.category_id = category_id;
        self.contacts.clear();
        self.editing = None;
        self.load_contacts(repo)
    }

    pub fn load_contacts<R: ContactRepository + ?Sized>(&mut self, repo: &mut R) -> bool {
        self.loading = true;
        let loaded = match repo.list_contacts(&self.category_id) {
            Ok(contacts) => {
                self.contacts = contacts
                    .into_iter()
                    .filter(|contact| contact.category_id == self.category_id)
                    .collect();
                true
            }
            Err(error) => {
                warn!(
                    category = %self.category_id,
                    error = format!("{error:#}"),
                    "load contacts failed"
                );
                false
            }
        };
        self.loading = false;
        loaded
    }

    pub fn add_contact<R, N>(&mut self, repo: &mut R, notifier: &mut N) -> AddOutcome
    where
        R: ContactRepository + ?Sized,
        N: Notifier + ?Sized,
    {
        let Ok(new_contact) = self.new_contact.to_new_contact(&self.category_id) else {
            notifier.error(BUSINESS_NAME_REQUIRED);
            return AddOutcome::Rejected;
        };
        match repo.insert_contact(&new_contact) {
            Ok(contact) => {
                let id = contact.id.clone();
                self.contacts.insert(0, contact);
                self.new_contact = ContactDraft::default();
                notifier.success(CONTACT_ADDED);
                AddOutcome::Added(id)
            }
            Err(error) => {
                warn!(
                    category = %self.category_id,
                    error = format!("{error:#}"),
                    "add contact failed"
                );
                notifier.error(CONTACT_ADD_FAILED);
                AddOutcome::Failed
            }
        }
    }

    /// Puts one row into edit mode. Switching rows is refused while the
    /// current draft has unsaved changes.
    pub fn begin_edit<N: Notifier + ?Sized>(&mut self, id: &ContactId, notifier: &mut N) -> bool {
        if let Some(session) = &self.editing {
            if &session.contact_id == id {
                return true;
            }
            if session.is_dirty() {
                notifier.error(EDIT_IN_PROGRESS);
                return false;
            }
        }
        let Some(contact) = self.contacts.iter().find(|contact| &contact.id == id) else {
            return false;
        };
        let seed = ContactDraft::from_contact(contact);
        self.editing = Some(EditSession {
            contact_id: contact.id.clone(),
            draft: seed.clone(),
            seed,
        });
        true
    }

    pub fn save_edit<R, N>(&mut self, repo: &mut R, notifier: &mut N) -> SaveOutcome
    where
        R: ContactRepository + ?Sized,
        N: Notifier + ?Sized,
    {
        let Some(session) = &self.editing else {
            return SaveOutcome::NotEditing;
        };
        let Ok(update) = session.draft.to_update() else {
            notifier.error(BUSINESS_NAME_REQUIRED);
            return SaveOutcome::Rejected;
        };
        let id = session.contact_id.clone();
        if let Err(error) = repo.update_contact(&id, &update) {
            warn!(contact = %id, error = format!("{error:#}"), "update contact failed");
            notifier.error(CONTACT_UPDATE_FAILED);
            return SaveOutcome::Failed;
        }
        if let Some(contact) = self.contacts.iter_mut().find(|contact| contact.id == id) {
            contact.apply(&update);
        }
        self.editing = None;
        notifier.success(CONTACT_UPDATED);
        SaveOutcome::Saved
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn delete_contact<R, N>(&mut self, repo: &mut R, notifier: &mut N, id: &ContactId) -> bool
    where
        R: ContactRepository + ?Sized,
        N: Notifier + ?Sized,
    {
        if let Err(error) = repo.delete_contact(id) {
            warn!(contact = %id, error = format!("{error:#}"), "delete contact failed");
            notifier.error(CONTACT_DELETE_FAILED);
            return false;
        }
        self.contacts.retain(|contact| &contact.id != id);
        if self.editing_id() == Some(id) {
            self.editing = None;
        }
        notifier.success(CONTACT_DELETED);
        true
    }
}
