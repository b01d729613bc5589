//! User record domain model.
//!
//! # Responsibility
//! - Define the registration record stored in the durable slot.
//! - Enforce at-rest invariants before persistence.
//! - Classify ages into presentation bands.
//!
//! # Invariants
//! - `first_name`/`last_name` are non-blank after trimming.
//! - `age` is a positive integer.
//! - `order_count` may be absent for records persisted by older builds.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One registered user.
///
/// Wire field names match the JSON already persisted by earlier builds
/// (`nome`, `sobrenome`, `idade`, `pedidos`), so stored sequences hydrate
/// without migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Given name, stored trimmed.
    #[serde(rename = "nome")]
    pub first_name: String,
    /// Family name, stored trimmed.
    #[serde(rename = "sobrenome")]
    pub last_name: String,
    /// Age in whole years. Always positive.
    #[serde(rename = "idade")]
    pub age: u32,
    /// Lifetime order count. `None` for records persisted before the field
    /// existed; omitted from JSON so those readers keep parsing the array.
    #[serde(rename = "pedidos", default, skip_serializing_if = "Option::is_none")]
    pub order_count: Option<u32>,
}

impl UserRecord {
    /// Creates a record without an order count.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, age: u32) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            order_count: None,
        }
    }

    /// Creates a record carrying an order count.
    pub fn with_orders(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: u32,
        order_count: u32,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            age,
            order_count: Some(order_count),
        }
    }

    /// Checks the at-rest invariants.
    ///
    /// Write paths must call this before the record reaches the slot.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.first_name.trim().is_empty() {
            return Err(RecordValidationError::BlankField("nome"));
        }
        if self.last_name.trim().is_empty() {
            return Err(RecordValidationError::BlankField("sobrenome"));
        }
        if self.age == 0 {
            return Err(RecordValidationError::ZeroAge);
        }
        Ok(())
    }

    /// Age band used for row presentation.
    pub fn age_band(&self) -> AgeBand {
        AgeBand::of(self.age)
    }
}

/// Invariant violation detected before persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordValidationError {
    /// A name field is empty or whitespace-only. Carries the wire field name.
    BlankField(&'static str),
    /// Age must be positive.
    ZeroAge,
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "field `{field}` must not be blank"),
            Self::ZeroAge => write!(f, "age must be greater than zero"),
        }
    }
}

impl Error for RecordValidationError {}

/// Presentation band derived from age.
///
/// Pure classification; rendering (colors, labels) stays in the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBand {
    /// Under 18.
    Minor,
    /// 18 through 40, inclusive.
    Adult,
    /// Over 40.
    Senior,
}

impl AgeBand {
    /// Classifies an age into its band.
    pub fn of(age: u32) -> Self {
        if age < 18 {
            Self::Minor
        } else if age <= 40 {
            Self::Adult
        } else {
            Self::Senior
        }
    }
}
