//! Record store: the in-memory user sequence and its durable mirror.
//!
//! # Responsibility
//! - Own the ordered sequence of registered users.
//! - Mirror the full sequence to the durable slot after every mutation.
//!
//! # Invariants
//! - Mutations preserve insertion order; removal closes the gap it leaves.
//! - The slot payload is always the JSON encoding of the full sequence.

pub mod user_store;
