//! Single owner of the in-memory [`Document`] and its persistence slot.

use uuid::Uuid;

use crate::{
    errors::{LedgerError, Result},
    ledger::{Document, Record, RecordId},
    storage::KeyValueStore,
};

const MAX_ID_ATTEMPTS: usize = 32;

/// Callback fired after every successful [`Store::persist`].
pub type ChangeListener = Box<dyn FnMut(&Document)>;

/// Produces candidate record ids. The store re-draws on collision.
pub trait IdSource {
    fn next_id(&mut self) -> RecordId;
}

/// Random UUID v4 ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> RecordId {
        RecordId::new(Uuid::new_v4().to_string())
    }
}

/// Counter-based ids (`<prefix>-1`, `<prefix>-2`, ...), handy for reproducible output.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> RecordId {
        let id = RecordId::new(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

/// Facade that owns the document, its slot, id generation and change listeners.
pub struct Store {
    document: Document,
    backend: Box<dyn KeyValueStore>,
    key: String,
    ids: Box<dyn IdSource>,
    listeners: Vec<ChangeListener>,
}

impl Store {
    /// Reads the document from `key`, falling back to an empty document when the
    /// slot is missing, unreadable or corrupt.
    pub fn load(backend: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let document = match backend.read(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Document>(&raw) {
                Ok(document) => {
                    tracing::info!(
                        slot = %key,
                        pledges = document.pledges.len(),
                        transactions = document.transactions.len(),
                        expenses = document.expenses.len(),
                        "document loaded"
                    );
                    document
                }
                Err(err) => {
                    tracing::error!(slot = %key, error = %err, "load failed, starting empty");
                    Document::default()
                }
            },
            Ok(None) => {
                tracing::info!(slot = %key, "no saved document, starting empty");
                Document::default()
            }
            Err(err) => {
                tracing::warn!(slot = %key, error = %err, "storage read failed, starting empty");
                Document::default()
            }
        };
        Self {
            document,
            backend,
            key,
            ids: Box::new(UuidIds),
            listeners: Vec::new(),
        }
    }

    pub fn with_id_source(mut self, source: impl IdSource + 'static) -> Self {
        self.ids = Box::new(source);
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Registers a listener notified after each successful persist.
    pub fn subscribe(&mut self, listener: impl FnMut(&Document) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Swaps in a whole new document. Validation is the caller's job.
    pub fn replace(&mut self, document: Document) {
        tracing::info!(records = document.record_count(), "document replaced");
        self.document = document;
    }

    /// Adds a record to its collection, assigning a fresh id when the record has none.
    pub fn append(&mut self, record: impl Into<Record>) -> Result<RecordId> {
        let mut record = record.into();
        let collection = record.collection();
        if record.id().is_blank() {
            let id = self.fresh_id(collection)?;
            record.set_id(id);
        } else if self.document.contains_id(collection, record.id()) {
            return Err(LedgerError::InvalidInput(format!(
                "duplicate id `{}` in {}",
                record.id(),
                collection.as_str()
            )));
        }
        let id = record.id().clone();
        tracing::debug!(collection = collection.as_str(), id = %id, "record appended");
        self.document.push(record);
        Ok(id)
    }

    /// Serializes the document into the slot, then notifies listeners.
    pub fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.document)?;
        self.backend.write(&self.key, &json).map_err(|err| match err {
            LedgerError::StorageUnavailable(_) => err,
            other => LedgerError::StorageUnavailable(other.to_string()),
        })?;
        for listener in self.listeners.iter_mut() {
            listener(&self.document);
        }
        Ok(())
    }

    /// Erases the slot and empties the in-memory document.
    pub fn clear(&mut self) -> Result<()> {
        self.backend.remove(&self.key).map_err(|err| match err {
            LedgerError::StorageUnavailable(_) => err,
            other => LedgerError::StorageUnavailable(other.to_string()),
        })?;
        self.document = Document::default();
        tracing::warn!(slot = %self.key, "all data erased");
        Ok(())
    }

    fn fresh_id(&mut self, collection: crate::ledger::Collection) -> Result<RecordId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            if !candidate.is_blank() && !self.document.contains_id(collection, &candidate) {
                return Ok(candidate);
            }
        }
        Err(LedgerError::InvalidInput(format!(
            "could not generate a unique id for {}",
            collection.as_str()
        )))
    }
}
