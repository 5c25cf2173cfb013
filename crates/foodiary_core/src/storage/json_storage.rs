//! Whole-diary JSON file storage.
//!
//! # Responsibility
//! - Read the diary document from disk into a validated `FoodDiary`.
//! - Write the diary document atomically (temp file + rename).
//! - Provide the startup fallback policy for missing or corrupt files.
//!
//! # Invariants
//! - A missing file is not an error; it reads as `None`.
//! - Any decode error or duplicate identity rejects the whole file.
//! - Logging stays metadata-only: paths, sizes, durations, error kinds.

use crate::model::sample::sample_food_diary;
use crate::storage::json_restaurant::{CodecError, JsonAdaptedRestaurant};
use crate::store::error::StoreError;
use crate::store::food_diary::FoodDiary;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer error.
#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    Json(serde_json::Error),
    Codec(CodecError),
    Store(StoreError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "malformed food diary file: {err}"),
            Self::Codec(err) => write!(f, "illegal value in food diary file: {err}"),
            Self::Store(err) => write!(f, "illegal value in food diary file: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<CodecError> for StorageError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

impl From<StoreError> for StorageError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<tempfile::PersistError> for StorageError {
    fn from(value: tempfile::PersistError) -> Self {
        Self::Io(value.error)
    }
}

/// Top-level document shape: `{ "restaurants": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonSerializableFoodDiary {
    #[serde(default)]
    pub restaurants: Vec<JsonAdaptedRestaurant>,
}

impl JsonSerializableFoodDiary {
    pub fn from_model(diary: &FoodDiary) -> Self {
        Self {
            restaurants: diary
                .list()
                .iter()
                .map(JsonAdaptedRestaurant::from_model)
                .collect(),
        }
    }

    /// Decodes every entry, then builds the diary.
    ///
    /// # Errors
    /// - `Codec` for the first entry that fails to decode.
    /// - `Store(Duplicate)` when two decoded entries share an identity.
    pub fn to_model(&self) -> StorageResult<FoodDiary> {
        let restaurants = self
            .restaurants
            .iter()
            .map(JsonAdaptedRestaurant::to_model)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FoodDiary::from_restaurants(restaurants)?)
    }
}

/// Persistence contract for the food diary.
pub trait FoodDiaryStorage {
    /// Location of the backing document.
    fn path(&self) -> &Path;
    /// Reads the diary; `Ok(None)` when nothing has been saved yet.
    fn read_food_diary(&self) -> StorageResult<Option<FoodDiary>>;
    /// Writes the full diary, replacing previous contents.
    fn save_food_diary(&self, diary: &FoodDiary) -> StorageResult<()>;
}

/// JSON-file-backed storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFoodDiaryStorage {
    path: PathBuf,
}

impl JsonFoodDiaryStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FoodDiaryStorage for JsonFoodDiaryStorage {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read_food_diary(&self) -> StorageResult<Option<FoodDiary>> {
        let started_at = Instant::now();
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(
                    "event=storage_read module=storage status=missing path={}",
                    self.path.display()
                );
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let document: JsonSerializableFoodDiary = serde_json::from_slice(&bytes)?;
        let diary = document.to_model()?;
        info!(
            "event=storage_read module=storage status=ok path={} restaurants={} duration_ms={}",
            self.path.display(),
            diary.len(),
            started_at.elapsed().as_millis()
        );
        Ok(Some(diary))
    }

    fn save_food_diary(&self, diary: &FoodDiary) -> StorageResult<()> {
        let started_at = Instant::now();
        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let payload = serde_json::to_vec_pretty(&JsonSerializableFoodDiary::from_model(diary))?;
        let mut staged = NamedTempFile::new_in(parent)?;
        staged.write_all(&payload)?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path)?;

        info!(
            "event=storage_save module=storage status=ok path={} restaurants={} bytes={} duration_ms={}",
            self.path.display(),
            diary.len(),
            payload.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

/// Startup load policy.
///
/// - Missing file: sample diary.
/// - Unreadable or invalid file: empty diary.
pub fn load_or_fallback(storage: &impl FoodDiaryStorage) -> FoodDiary {
    match storage.read_food_diary() {
        Ok(Some(diary)) => diary,
        Ok(None) => {
            info!(
                "event=storage_fallback module=storage status=ok reason=missing_file source=sample path={}",
                storage.path().display()
            );
            sample_food_diary()
        }
        Err(StorageError::Io(err)) => {
            error!(
                "event=storage_fallback module=storage status=error reason=io source=empty path={} error={}",
                storage.path().display(),
                err
            );
            FoodDiary::new()
        }
        Err(err) => {
            warn!(
                "event=storage_fallback module=storage status=error reason=invalid_data source=empty path={} error={}",
                storage.path().display(),
                err
            );
            FoodDiary::new()
        }
    }
}
