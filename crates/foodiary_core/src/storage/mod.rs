//! Flat JSON persistence for the food diary.
//!
//! # Responsibility
//! - Map restaurants to and from a flat serde representation.
//! - Read and write the whole diary as one JSON document.
//!
//! # Invariants
//! - Loading is all-or-nothing: one bad entry rejects the whole file.
//! - Saving replaces the target file atomically.

pub mod json_restaurant;
pub mod json_storage;
