//! Command-facing model over the food diary.
//!
//! # Responsibility
//! - Expose restaurant CRUD to commands through the versioned store.
//! - Maintain the filtered view that display indices resolve against.
//! - Track the selected restaurant across edits, deletes and resets.
//!
//! # Invariants
//! - The selection, when set, is a restaurant currently stored.
//! - Adding a restaurant resets the filter so the new entry is visible.
//! - Filtered views preserve store order.

use crate::model::filter::RestaurantFilter;
use crate::model::restaurant::Restaurant;
use crate::store::error::{StoreError, StoreResult};
use crate::store::food_diary::{FoodDiary, RestaurantListView};
use crate::store::notifier::ChangeNotifier;
use crate::store::versioned::{VersionError, VersionedFoodDiary};
use log::debug;

/// Model shared by all commands.
#[derive(Debug)]
pub struct ModelManager {
    versioned: VersionedFoodDiary,
    filter: RestaurantFilter,
    selected: Option<Restaurant>,
}

impl ModelManager {
    pub fn new(diary: FoodDiary) -> Self {
        Self {
            versioned: VersionedFoodDiary::new(diary),
            filter: RestaurantFilter::All,
            selected: None,
        }
    }

    pub fn food_diary(&self) -> &FoodDiary {
        self.versioned.diary()
    }

    /// Notifier that fires on every successful diary mutation.
    pub fn notifier(&self) -> &ChangeNotifier {
        self.versioned.diary().notifier()
    }

    pub fn has_restaurant(&self, restaurant: &Restaurant) -> bool {
        self.food_diary().contains(restaurant)
    }

    pub fn add_restaurant(&mut self, restaurant: Restaurant) -> StoreResult<()> {
        self.versioned.diary_mut().add(restaurant)?;
        self.filter = RestaurantFilter::All;
        Ok(())
    }

    pub fn delete_restaurant(&mut self, target: &Restaurant) -> StoreResult<Restaurant> {
        let removed = self.versioned.diary_mut().remove(target)?;
        if self
            .selected
            .as_ref()
            .is_some_and(|selected| selected.is_same_restaurant(&removed))
        {
            self.selected = None;
        }
        Ok(removed)
    }

    pub fn set_restaurant(&mut self, target: &Restaurant, edited: Restaurant) -> StoreResult<()> {
        self.versioned
            .diary_mut()
            .replace(target, edited.clone())?;
        if self
            .selected
            .as_ref()
            .is_some_and(|selected| selected.is_same_restaurant(target))
        {
            self.selected = Some(edited);
        }
        Ok(())
    }

    /// Replaces the whole diary.
    pub fn reset_data(&mut self, restaurants: Vec<Restaurant>) -> StoreResult<()> {
        self.versioned.diary_mut().reset_all(Some(restaurants))?;
        self.drop_stale_selection();
        Ok(())
    }

    /// Restaurants matching the active filter, in store order.
    pub fn filtered_restaurant_list(&self) -> RestaurantListView {
        self.food_diary()
            .list()
            .iter()
            .filter(|restaurant| self.filter.matches(restaurant))
            .cloned()
            .collect::<Vec<_>>()
            .into()
    }

    pub fn active_filter(&self) -> &RestaurantFilter {
        &self.filter
    }

    pub fn update_filtered_restaurant_list(&mut self, filter: RestaurantFilter) {
        debug!("event=filter_update module=service filter={filter:?}");
        self.filter = filter;
    }

    pub fn selected_restaurant(&self) -> Option<&Restaurant> {
        self.selected.as_ref()
    }

    /// Selects a restaurant from the filtered view, or clears the selection.
    ///
    /// # Errors
    /// - `NotFound` when `restaurant` is not in the filtered view.
    pub fn set_selected_restaurant(&mut self, restaurant: Option<Restaurant>) -> StoreResult<()> {
        if let Some(candidate) = restaurant.as_ref() {
            let visible = self
                .filtered_restaurant_list()
                .iter()
                .any(|shown| shown == candidate);
            if !visible {
                return Err(StoreError::NotFound);
            }
        }
        self.selected = restaurant;
        Ok(())
    }

    /// Records the current diary as an undoable state.
    pub fn commit_food_diary(&mut self) {
        self.versioned.commit();
    }

    pub fn can_undo_food_diary(&self) -> bool {
        self.versioned.can_undo()
    }

    pub fn can_redo_food_diary(&self) -> bool {
        self.versioned.can_redo()
    }

    pub fn undo_food_diary(&mut self) -> Result<(), VersionError> {
        self.versioned.undo()?;
        self.drop_stale_selection();
        Ok(())
    }

    pub fn redo_food_diary(&mut self) -> Result<(), VersionError> {
        self.versioned.redo()?;
        self.drop_stale_selection();
        Ok(())
    }

    fn drop_stale_selection(&mut self) {
        let still_stored = self.selected.as_ref().is_some_and(|selected| {
            self.food_diary()
                .list()
                .iter()
                .any(|stored| stored == selected)
        });
        if !still_stored {
            self.selected = None;
        }
    }
}
