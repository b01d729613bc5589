//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable-slot data access contract.
//! - Isolate SQLite query details from store/service orchestration.
//!
//! # Invariants
//! - Repository implementations refuse connections whose schema is missing
//!   or stale instead of failing lazily mid-operation.

pub mod slot_repo;
