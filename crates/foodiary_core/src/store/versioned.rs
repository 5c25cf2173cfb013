//! Undo/redo history over a [`FoodDiary`].
//!
//! # Invariants
//! - `states[current]` always equals the diary contents after a commit,
//!   undo or redo.
//! - Committing after an undo discards the redoable states.
//! - Undo and redo apply through `FoodDiary::reset_all`, so observers see a
//!   single `Reset` notification per step.

use crate::store::error::StoreError;
use crate::store::food_diary::{FoodDiary, RestaurantListView};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Undo/redo failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    NothingToUndo,
    NothingToRedo,
    Store(StoreError),
}

impl Display for VersionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NothingToUndo => write!(f, "No more commands to undo!"),
            Self::NothingToRedo => write!(f, "No more commands to redo!"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for VersionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for VersionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// A food diary with committed snapshots.
#[derive(Debug)]
pub struct VersionedFoodDiary {
    diary: FoodDiary,
    states: Vec<RestaurantListView>,
    current: usize,
}

impl VersionedFoodDiary {
    /// Wraps `diary`, treating its current contents as the initial state.
    pub fn new(diary: FoodDiary) -> Self {
        let initial = diary.list();
        Self {
            diary,
            states: vec![initial],
            current: 0,
        }
    }

    pub fn diary(&self) -> &FoodDiary {
        &self.diary
    }

    pub fn diary_mut(&mut self) -> &mut FoodDiary {
        &mut self.diary
    }

    /// Records the current contents as a new undoable state.
    pub fn commit(&mut self) {
        self.states.truncate(self.current + 1);
        self.states.push(self.diary.list());
        self.current += 1;
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.states.len()
    }

    /// Restores the previous committed state.
    pub fn undo(&mut self) -> Result<(), VersionError> {
        if !self.can_undo() {
            return Err(VersionError::NothingToUndo);
        }
        self.current -= 1;
        self.restore_current()
    }

    /// Re-applies the state undone most recently.
    pub fn redo(&mut self) -> Result<(), VersionError> {
        if !self.can_redo() {
            return Err(VersionError::NothingToRedo);
        }
        self.current += 1;
        self.restore_current()
    }

    fn restore_current(&mut self) -> Result<(), VersionError> {
        let snapshot = self.states[self.current].to_vec();
        self.diary.reset_all(Some(snapshot))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{VersionError, VersionedFoodDiary};
    use crate::model::restaurant::{Restaurant, RestaurantBuilder};
    use crate::store::food_diary::FoodDiary;

    fn restaurant(name: &str, phone: &str) -> Restaurant {
        RestaurantBuilder::new(name, phone, format!("{phone}@example.com"), "Somewhere")
            .build()
            .expect("valid restaurant")
    }

    #[test]
    fn undo_and_redo_walk_committed_states() {
        let mut versioned = VersionedFoodDiary::new(FoodDiary::new());
        assert!(!versioned.can_undo());

        versioned.diary_mut().add(restaurant("Alpha", "111")).unwrap();
        versioned.commit();
        versioned.diary_mut().add(restaurant("Beta", "222")).unwrap();
        versioned.commit();

        versioned.undo().unwrap();
        assert_eq!(versioned.diary().len(), 1);
        versioned.undo().unwrap();
        assert!(versioned.diary().is_empty());
        assert_eq!(versioned.undo(), Err(VersionError::NothingToUndo));

        versioned.redo().unwrap();
        versioned.redo().unwrap();
        assert_eq!(versioned.diary().len(), 2);
        assert_eq!(versioned.redo(), Err(VersionError::NothingToRedo));
    }

    #[test]
    fn commit_after_undo_discards_redo_states() {
        let mut versioned = VersionedFoodDiary::new(FoodDiary::new());
        versioned.diary_mut().add(restaurant("Alpha", "111")).unwrap();
        versioned.commit();
        versioned.undo().unwrap();

        versioned.diary_mut().add(restaurant("Gamma", "333")).unwrap();
        versioned.commit();
        assert!(!versioned.can_redo());
        assert_eq!(
            versioned.diary().list().get(0).map(|r| r.name().as_str()),
            Some("Gamma")
        );
    }
}
