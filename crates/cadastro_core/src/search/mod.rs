//! Search entry points over the in-memory sequence.
//!
//! # Responsibility
//! - Recompute the visible subset of records for the current search text.
//! - Keep result shaping inside core.

pub mod filter;
