//! Domain model for the registration book.
//!
//! # Responsibility
//! - Define the canonical record persisted to the durable slot.
//! - Keep at-rest invariants enforceable before any write.
//!
//! # Invariants
//! - Records are identified by their position in the stored sequence; there
//!   is no stable per-record ID and duplicates are permitted.

pub mod user;
