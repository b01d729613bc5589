//! Registration form use-cases.
//!
//! # Responsibility
//! - Parse raw form input into validated records (trim + numeric coercion).
//! - Route submit to append or in-place update depending on the edit marker.
//!
//! # Invariants
//! - At most one form error is reported per submit; the missing-fields check
//!   runs before any numeric coercion.
//! - Names are trimmed before the record is constructed.

use crate::model::user::UserRecord;
use crate::repo::slot_repo::SlotRepository;
use crate::store::user_store::{StoreError, StoreResult, UserStore};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub age: String,
    pub order_count: String,
}

/// Numeric form fields, used to report which input failed coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Age,
    OrderCount,
}

/// Form-level rejection. At most one is reported per submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    /// Some required field is empty.
    MissingFields,
    /// A numeric field does not parse to an integer within its bound
    /// (age must be positive, order count non-negative).
    InvalidNumber(NumericField),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields => write!(f, "all fields must be filled"),
            Self::InvalidNumber(NumericField::Age) => write!(f, "age is not a valid number"),
            Self::InvalidNumber(NumericField::OrderCount) => {
                write!(f, "order count is not a valid number")
            }
        }
    }
}

impl Error for FormError {}

/// Submit failure: a form rejection or a store-level failure.
#[derive(Debug)]
pub enum SubmitError {
    Form(FormError),
    Store(StoreError),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Form(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Form(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<FormError> for SubmitError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

impl From<StoreError> for SubmitError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// What a successful submit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added,
    Updated { position: usize },
}

/// Parses raw form input into a record.
///
/// Check order mirrors the form contract: any empty required field first,
/// then age, then order count.
pub fn parse_form(form: &RegistrationForm) -> Result<UserRecord, FormError> {
    if form.first_name.trim().is_empty()
        || form.last_name.trim().is_empty()
        || form.age.trim().is_empty()
        || form.order_count.trim().is_empty()
    {
        return Err(FormError::MissingFields);
    }

    let age = parse_bounded(&form.age, NumericField::Age, 1)?;
    let order_count = parse_bounded(&form.order_count, NumericField::OrderCount, 0)?;

    Ok(UserRecord {
        first_name: form.first_name.trim().to_string(),
        last_name: form.last_name.trim().to_string(),
        age,
        order_count: Some(order_count),
    })
}

fn parse_bounded(raw: &str, field: NumericField, min: u32) -> Result<u32, FormError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|value| *value >= min)
        .ok_or(FormError::InvalidNumber(field))
}

/// Use-case facade over the user store.
pub struct RegistrationService<R: SlotRepository> {
    store: UserStore<R>,
}

impl<R: SlotRepository> RegistrationService<R> {
    /// Creates a service owning the given store.
    pub fn new(store: UserStore<R>) -> Self {
        Self { store }
    }

    /// Loads the persisted sequence. Returns the loaded count.
    pub fn hydrate(&mut self) -> usize {
        self.store.hydrate()
    }

    /// Full sequence in insertion order.
    pub fn records(&self) -> &[UserRecord] {
        self.store.records()
    }

    /// One record by sequence position.
    pub fn get(&self, position: usize) -> Option<&UserRecord> {
        self.store.get(position)
    }

    /// Validates the form, then appends or replaces depending on the marker.
    pub fn submit(
        &mut self,
        form: &RegistrationForm,
        edit_position: Option<usize>,
    ) -> Result<SubmitOutcome, SubmitError> {
        let record = parse_form(form)?;
        match edit_position {
            Some(position) => {
                self.store.update(position, record)?;
                Ok(SubmitOutcome::Updated { position })
            }
            None => {
                self.store.add(record)?;
                Ok(SubmitOutcome::Added)
            }
        }
    }

    /// Removes the record at `position`, closing the gap.
    pub fn remove(&mut self, position: usize) -> StoreResult<UserRecord> {
        self.store.remove(position)
    }
}
