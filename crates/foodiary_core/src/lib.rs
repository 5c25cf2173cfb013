//! Core domain logic for the food diary.
//! This crate owns restaurant validation, the store, persistence and commands.

pub mod command;
pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod store;

pub use command::{Command, CommandError, CommandHistory, CommandOutcome, CommandResult, Index};
pub use config::{load_config, save_config, AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::field::{
    Address, Cuisine, Email, FieldFormatError, Name, Phone, Rating, Tag, Weblink,
};
pub use model::filter::RestaurantFilter;
pub use model::restaurant::{Restaurant, RestaurantBuilder};
pub use service::model_manager::ModelManager;
pub use storage::json_storage::{
    load_or_fallback, FoodDiaryStorage, JsonFoodDiaryStorage, StorageError, StorageResult,
};
pub use store::error::{StoreError, StoreResult};
pub use store::food_diary::{FoodDiary, RestaurantListView};
pub use store::notifier::{ChangeEvent, ChangeListener, ChangeNotifier, ListenerId};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
