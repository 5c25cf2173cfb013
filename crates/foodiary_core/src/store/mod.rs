//! In-memory restaurant store and change notification.
//!
//! # Responsibility
//! - Hold the authoritative ordered restaurant collection.
//! - Enforce identity uniqueness on every mutation.
//! - Notify subscribed observers once per successful mutation.
//!
//! # Invariants
//! - No two stored restaurants satisfy `Restaurant::is_same_restaurant`.
//! - A failed mutation leaves contents unchanged and emits no notification.
//! - Views handed out by `FoodDiary::list` never observe later mutations.

pub mod error;
pub mod food_diary;
pub mod notifier;
pub mod versioned;
