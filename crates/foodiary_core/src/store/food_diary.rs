//! Identity-unique restaurant collection.
//!
//! # Responsibility
//! - Own the ordered restaurant list and guard its uniqueness invariant.
//! - Emit exactly one change notification per successful mutation.
//! - Hand out read-only snapshot views for display and persistence.
//!
//! # Invariants
//! - Insertion order is preserved; `replace` keeps the replaced position.
//! - `reset_all` is all-or-nothing.
//! - Contents are copy-on-write, so a view taken before a mutation keeps
//!   the pre-mutation state.

use crate::model::restaurant::Restaurant;
use crate::store::error::{StoreError, StoreResult};
use crate::store::notifier::{ChangeEvent, ChangeListener, ChangeNotifier, ListenerId};
use log::debug;
use std::fmt::{Debug, Formatter};
use std::slice::Iter;
use std::sync::Arc;

/// Read-only ordered snapshot of restaurants.
///
/// List-style mutators are present so callers written against a list API get
/// an explicit `UnsupportedOperation` error instead of silently editing a copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantListView {
    items: Arc<Vec<Restaurant>>,
}

impl RestaurantListView {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Restaurant> {
        self.items.get(index)
    }

    pub fn iter(&self) -> Iter<'_, Restaurant> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Restaurant] {
        self.items.as_slice()
    }

    pub fn to_vec(&self) -> Vec<Restaurant> {
        self.items.as_ref().clone()
    }

    pub fn push(&mut self, _restaurant: Restaurant) -> StoreResult<()> {
        Err(StoreError::UnsupportedOperation("push"))
    }

    pub fn remove(&mut self, _index: usize) -> StoreResult<Restaurant> {
        Err(StoreError::UnsupportedOperation("remove"))
    }

    pub fn clear(&mut self) -> StoreResult<()> {
        Err(StoreError::UnsupportedOperation("clear"))
    }
}

impl From<Vec<Restaurant>> for RestaurantListView {
    fn from(value: Vec<Restaurant>) -> Self {
        Self {
            items: Arc::new(value),
        }
    }
}

impl<'a> IntoIterator for &'a RestaurantListView {
    type Item = &'a Restaurant;
    type IntoIter = Iter<'a, Restaurant>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The food diary: ordered restaurants plus their change notifier.
#[derive(Default)]
pub struct FoodDiary {
    restaurants: Arc<Vec<Restaurant>>,
    notifier: ChangeNotifier,
}

impl FoodDiary {
    /// Creates an empty diary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a diary from a persisted snapshot without notifying anyone.
    ///
    /// # Errors
    /// - `Duplicate` when two inputs share an identity.
    pub fn from_restaurants(restaurants: Vec<Restaurant>) -> StoreResult<Self> {
        if has_identity_duplicates(&restaurants) {
            return Err(StoreError::Duplicate);
        }
        Ok(Self {
            restaurants: Arc::new(restaurants),
            notifier: ChangeNotifier::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    /// Returns whether an identity-equal restaurant is stored.
    pub fn contains(&self, restaurant: &Restaurant) -> bool {
        self.position_of(restaurant).is_some()
    }

    /// Returns the stored restaurant sharing `identity`, if any.
    pub fn find(&self, identity: &Restaurant) -> Option<Restaurant> {
        self.position_of(identity)
            .map(|index| self.restaurants[index].clone())
    }

    /// Appends a restaurant.
    ///
    /// # Errors
    /// - `Duplicate` when an identity-equal restaurant already exists.
    pub fn add(&mut self, restaurant: Restaurant) -> StoreResult<()> {
        if self.contains(&restaurant) {
            return Err(StoreError::Duplicate);
        }
        Arc::make_mut(&mut self.restaurants).push(restaurant);
        self.changed(ChangeEvent::Added);
        Ok(())
    }

    /// Removes the restaurant sharing `identity` and returns it.
    ///
    /// # Errors
    /// - `NotFound` when nothing matches.
    pub fn remove(&mut self, identity: &Restaurant) -> StoreResult<Restaurant> {
        let index = self.position_of(identity).ok_or(StoreError::NotFound)?;
        let removed = Arc::make_mut(&mut self.restaurants).remove(index);
        self.changed(ChangeEvent::Removed);
        Ok(removed)
    }

    /// Swaps `target` for `edited`, in place.
    ///
    /// # Errors
    /// - `NotFound` when no stored restaurant equals `target` in every field.
    /// - `Duplicate` when `edited` shares an identity with a different entry.
    pub fn replace(&mut self, target: &Restaurant, edited: Restaurant) -> StoreResult<()> {
        let index = self
            .restaurants
            .iter()
            .position(|existing| existing == target)
            .ok_or(StoreError::NotFound)?;
        let collides = self
            .restaurants
            .iter()
            .enumerate()
            .any(|(other, existing)| other != index && existing.is_same_restaurant(&edited));
        if collides {
            return Err(StoreError::Duplicate);
        }

        Arc::make_mut(&mut self.restaurants)[index] = edited;
        self.changed(ChangeEvent::Replaced);
        Ok(())
    }

    /// Returns a snapshot view of the current contents.
    pub fn list(&self) -> RestaurantListView {
        RestaurantListView {
            items: Arc::clone(&self.restaurants),
        }
    }

    /// Replaces all contents at once and notifies a single time.
    ///
    /// # Errors
    /// - `NullInput` when `restaurants` is `None`.
    /// - `Duplicate` when two inputs share an identity; contents stay unchanged.
    pub fn reset_all(&mut self, restaurants: Option<Vec<Restaurant>>) -> StoreResult<()> {
        let restaurants = restaurants.ok_or(StoreError::NullInput("restaurants"))?;
        if has_identity_duplicates(&restaurants) {
            return Err(StoreError::Duplicate);
        }
        self.restaurants = Arc::new(restaurants);
        self.changed(ChangeEvent::Reset);
        Ok(())
    }

    /// Replaces all contents with those of `other`.
    pub fn reset_data(&mut self, other: &FoodDiary) -> StoreResult<()> {
        self.reset_all(Some(other.list().to_vec()))
    }

    /// Returns the notifier handle for this diary.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    pub fn add_listener(&self, listener: Arc<dyn ChangeListener>) -> ListenerId {
        self.notifier.subscribe(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    fn position_of(&self, identity: &Restaurant) -> Option<usize> {
        self.restaurants
            .iter()
            .position(|existing| existing.is_same_restaurant(identity))
    }

    fn changed(&self, event: ChangeEvent) {
        let delivered = self.notifier.notify_all(event);
        debug!(
            "event=store_changed module=store kind={} size={} listeners={}",
            event.as_str(),
            self.restaurants.len(),
            delivered
        );
    }
}

impl PartialEq for FoodDiary {
    fn eq(&self, other: &Self) -> bool {
        self.restaurants == other.restaurants
    }
}

impl Eq for FoodDiary {}

impl Debug for FoodDiary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoodDiary")
            .field("restaurants", &self.restaurants)
            .field("notifier", &self.notifier)
            .finish()
    }
}

fn has_identity_duplicates(restaurants: &[Restaurant]) -> bool {
    restaurants.iter().enumerate().any(|(index, restaurant)| {
        restaurants[index + 1..]
            .iter()
            .any(|other| restaurant.is_same_restaurant(other))
    })
}
