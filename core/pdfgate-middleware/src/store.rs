//! Form and entry lookups.

use pdfgate_types::{Entry, EntryId, Form, FormId};
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("form {0} not found")]
    FormNotFound(FormId),

    #[error("entry {0} not found")]
    EntryNotFound(EntryId),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid fixture: {0}")]
    Fixture(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Source of forms and their PDF configurations.
pub trait FormStore: Send + Sync {
    fn form(&self, id: FormId) -> StoreResult<Form>;
}

/// Source of form entries.
pub trait EntryStore: Send + Sync {
    fn entry(&self, id: EntryId) -> StoreResult<Entry>;
}

/// Forms and entries held in memory, for tests and the CLI.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    forms: BTreeMap<FormId, Form>,
    entries: BTreeMap<EntryId, Entry>,
}

#[derive(Deserialize)]
struct Fixture {
    #[serde(default)]
    forms: Vec<Form>,
    #[serde(default)]
    entries: Vec<Entry>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `{"forms": [...], "entries": [...]}`. Other keys are ignored.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let fixture: Fixture = serde_json::from_str(json)?;
        let mut store = Self::new();
        for form in fixture.forms {
            store.insert_form(form);
        }
        for entry in fixture.entries {
            store.insert_entry(entry);
        }
        Ok(store)
    }

    pub fn insert_form(&mut self, form: Form) {
        self.forms.insert(form.id, form);
    }

    pub fn insert_entry(&mut self, entry: Entry) {
        self.entries.insert(entry.id, entry);
    }

    #[must_use]
    pub fn with_form(mut self, form: Form) -> Self {
        self.insert_form(form);
        self
    }

    #[must_use]
    pub fn with_entry(mut self, entry: Entry) -> Self {
        self.insert_entry(entry);
        self
    }
}

impl FormStore for InMemoryStore {
    fn form(&self, id: FormId) -> StoreResult<Form> {
        self.forms.get(&id).cloned().ok_or(StoreError::FormNotFound(id))
    }
}

impl EntryStore for InMemoryStore {
    fn entry(&self, id: EntryId) -> StoreResult<Entry> {
        self.entries
            .get(&id)
            .cloned()
            .ok_or(StoreError::EntryNotFound(id))
    }
}
