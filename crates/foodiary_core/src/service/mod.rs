//! Core use-case services.
//!
//! # Responsibility
//! - Combine the versioned store, the display filter and the selection into
//!   the single model that commands operate on.
//! - Keep UI/CLI layers decoupled from store internals.

pub mod model_manager;
