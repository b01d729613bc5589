//! Core domain logic for Cadastro, a single-user registration book.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::user::{AgeBand, RecordValidationError, UserRecord};
pub use repo::slot_repo::{RepoError, RepoResult, SlotRepository, SqliteSlotRepository};
pub use search::filter::{filter_by_first_name, NameMatch};
pub use service::registration::{
    parse_form, FormError, NumericField, RegistrationForm, RegistrationService, SubmitError,
    SubmitOutcome,
};
pub use store::user_store::{StoreError, StoreResult, UserStore, USERS_SLOT_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
