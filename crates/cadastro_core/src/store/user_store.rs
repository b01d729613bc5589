//! In-memory user sequence mirrored to the durable slot.
//!
//! # Responsibility
//! - Provide add/update/remove over the ordered sequence.
//! - Serialize the full sequence to the `usuarios` slot on every mutation.
//! - Hydrate the sequence from the slot at startup.
//!
//! # Invariants
//! - Records are validated before any mutation is accepted.
//! - An empty sequence clears the slot instead of writing an empty array, so
//!   "never had data" and "emptied" are indistinguishable at rest.
//! - Persistence failures never roll back the in-memory mutation; they are
//!   logged and the sequence stays authoritative for the session.

use crate::model::user::{RecordValidationError, UserRecord};
use crate::repo::slot_repo::{RepoError, SlotRepository};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Slot key shared with previously persisted data; changing it orphans
/// existing sequences.
pub const USERS_SLOT_KEY: &str = "usuarios";

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for sequence mutations and slot persistence.
#[derive(Debug)]
pub enum StoreError {
    Validation(RecordValidationError),
    IndexOutOfRange { index: usize, len: usize },
    Repo(RepoError),
    Codec(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for sequence of length {len}")
            }
            Self::Repo(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "invalid slot payload: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::IndexOutOfRange { .. } => None,
            Self::Repo(err) => Some(err),
            Self::Codec(err) => Some(err),
        }
    }
}

impl From<RecordValidationError> for StoreError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

/// Ordered user sequence backed by one durable slot.
pub struct UserStore<R: SlotRepository> {
    repo: R,
    records: Vec<UserRecord>,
}

impl<R: SlotRepository> UserStore<R> {
    /// Creates an empty store over the given slot repository.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            records: Vec::new(),
        }
    }

    /// Loads the persisted sequence from the slot. Returns the loaded count.
    ///
    /// An absent slot yields an empty sequence. A present but unparseable
    /// payload, or a transport failure, also yields an empty sequence; both
    /// are logged and never surfaced to the user.
    pub fn hydrate(&mut self) -> usize {
        self.records = match self.repo.read_slot(USERS_SLOT_KEY) {
            Ok(None) => Vec::new(),
            Ok(Some(payload)) => match serde_json::from_str::<Vec<UserRecord>>(&payload) {
                Ok(records) => records,
                Err(err) => {
                    warn!(
                        "event=store_hydrate module=store status=corrupt slot={USERS_SLOT_KEY} error={err}"
                    );
                    Vec::new()
                }
            },
            Err(err) => {
                error!(
                    "event=store_hydrate module=store status=error slot={USERS_SLOT_KEY} error={err}"
                );
                Vec::new()
            }
        };

        info!(
            "event=store_hydrate module=store status=ok slot={USERS_SLOT_KEY} count={}",
            self.records.len()
        );
        self.records.len()
    }

    /// Full sequence in insertion order.
    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    /// One record by sequence position.
    pub fn get(&self, index: usize) -> Option<&UserRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validates and appends one record, then mirrors the sequence.
    pub fn add(&mut self, record: UserRecord) -> StoreResult<()> {
        record.validate()?;
        self.records.push(record);
        self.persist_after_mutation("store_add");
        Ok(())
    }

    /// Validates and replaces the record at `index`, then mirrors the
    /// sequence. Only that position changes; the length is unchanged.
    pub fn update(&mut self, index: usize, record: UserRecord) -> StoreResult<()> {
        record.validate()?;
        let len = self.records.len();
        let slot = self
            .records
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        *slot = record;
        self.persist_after_mutation("store_update");
        Ok(())
    }

    /// Removes and returns the record at `index`, shifting later records down
    /// by one, then mirrors the sequence.
    pub fn remove(&mut self, index: usize) -> StoreResult<UserRecord> {
        if index >= self.records.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        let removed = self.records.remove(index);
        self.persist_after_mutation("store_remove");
        Ok(removed)
    }

    /// Serializes the full sequence into the slot.
    ///
    /// An empty sequence clears the slot instead of writing `[]`.
    pub fn persist(&self) -> StoreResult<()> {
        if self.records.is_empty() {
            self.repo.clear_slot(USERS_SLOT_KEY)?;
            return Ok(());
        }

        let payload = serde_json::to_string(&self.records)?;
        self.repo.write_slot(USERS_SLOT_KEY, &payload)?;
        Ok(())
    }

    fn persist_after_mutation(&self, event: &str) {
        match self.persist() {
            Ok(()) => info!(
                "event={event} module=store status=ok slot={USERS_SLOT_KEY} count={}",
                self.records.len()
            ),
            Err(err) => error!(
                "event={event} module=store status=persist_error slot={USERS_SLOT_KEY} count={} error={err}",
                self.records.len()
            ),
        }
    }
}
