//! Food diary domain model.
//!
//! # Responsibility
//! - Define validated field value objects and the restaurant record.
//! - Provide filter predicates used to build the displayed view.
//!
//! # Invariants
//! - Domain values are constructed through parse-or-fail constructors only.
//! - Restaurants are identified by name plus phone-or-email, not by a
//!   generated id.

pub mod field;
pub mod filter;
pub mod restaurant;
pub mod sample;
