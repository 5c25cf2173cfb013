//! Commands that add, edit, delete or clear restaurants.

use crate::command::{
    resolve_displayed, Command, CommandError, CommandHistory, CommandOutcome, CommandResult, Index,
};
use crate::model::field::{Address, Cuisine, Email, Name, Phone, Rating, Tag, Weblink};
use crate::model::restaurant::Restaurant;
use crate::service::model_manager::ModelManager;
use std::collections::BTreeSet;

/// Adds one restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommand {
    restaurant: Restaurant,
}

impl AddCommand {
    pub const WORD: &'static str = "add";

    pub fn new(restaurant: Restaurant) -> Self {
        Self { restaurant }
    }
}

impl Command for AddCommand {
    fn word(&self) -> &'static str {
        Self::WORD
    }

    fn execute(
        &self,
        model: &mut ModelManager,
        _history: &CommandHistory,
    ) -> CommandResult<CommandOutcome> {
        model.add_restaurant(self.restaurant.clone())?;
        model.commit_food_diary();
        Ok(CommandOutcome::message(format!(
            "New restaurant added: {}",
            self.restaurant
        )))
    }
}

/// Field replacements for [`EditCommand`]. `None` keeps the current value.
///
/// The optional restaurant fields use a nested `Option`: `Some(None)` clears
/// the value, `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditRestaurantDescriptor {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub address: Option<Address>,
    pub tags: Option<BTreeSet<Tag>>,
    pub cuisine: Option<Option<Cuisine>>,
    pub rating: Option<Option<Rating>>,
    pub weblink: Option<Option<Weblink>>,
}

impl EditRestaurantDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.address.is_some()
            || self.tags.is_some()
            || self.cuisine.is_some()
            || self.rating.is_some()
            || self.weblink.is_some()
    }

    /// Builds the edited copy of `source`.
    pub fn apply(&self, source: &Restaurant) -> Restaurant {
        let edited = Restaurant::new(
            self.name.clone().unwrap_or_else(|| source.name().clone()),
            self.phone.clone().unwrap_or_else(|| source.phone().clone()),
            self.email.clone().unwrap_or_else(|| source.email().clone()),
            self.address
                .clone()
                .unwrap_or_else(|| source.address().clone()),
            self.tags.clone().unwrap_or_else(|| source.tags().clone()),
        );
        edited
            .with_cuisine(pick(&self.cuisine, source.cuisine()))
            .with_rating(pick(&self.rating, source.rating()))
            .with_weblink(pick(&self.weblink, source.weblink()))
    }
}

fn pick<T: Clone>(edit: &Option<Option<T>>, current: Option<&T>) -> Option<T> {
    match edit {
        Some(replacement) => replacement.clone(),
        None => current.cloned(),
    }
}

/// Edits the restaurant at a displayed index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommand {
    index: Index,
    descriptor: EditRestaurantDescriptor,
}

impl EditCommand {
    pub const WORD: &'static str = "edit";

    pub fn new(index: Index, descriptor: EditRestaurantDescriptor) -> Self {
        Self { index, descriptor }
    }
}

impl Command for EditCommand {
    fn word(&self) -> &'static str {
        Self::WORD
    }

    fn execute(
        &self,
        model: &mut ModelManager,
        _history: &CommandHistory,
    ) -> CommandResult<CommandOutcome> {
        if !self.descriptor.is_any_field_edited() {
            return Err(CommandError::NotEdited);
        }
        let target = resolve_displayed(model, self.index)?;
        let edited = self.descriptor.apply(&target);
        model.set_restaurant(&target, edited.clone())?;
        model.commit_food_diary();
        Ok(CommandOutcome::message(format!(
            "Edited Restaurant: {edited}"
        )))
    }
}

/// Deletes the restaurant at a displayed index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCommand {
    index: Index,
}

impl DeleteCommand {
    pub const WORD: &'static str = "delete";

    pub fn new(index: Index) -> Self {
        Self { index }
    }
}

impl Command for DeleteCommand {
    fn word(&self) -> &'static str {
        Self::WORD
    }

    fn execute(
        &self,
        model: &mut ModelManager,
        _history: &CommandHistory,
    ) -> CommandResult<CommandOutcome> {
        let target = resolve_displayed(model, self.index)?;
        let removed = model.delete_restaurant(&target)?;
        model.commit_food_diary();
        Ok(CommandOutcome::message(format!(
            "Deleted Restaurant: {removed}"
        )))
    }
}

/// Removes every restaurant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearCommand;

impl ClearCommand {
    pub const WORD: &'static str = "clear";
}

impl Command for ClearCommand {
    fn word(&self) -> &'static str {
        Self::WORD
    }

    fn execute(
        &self,
        model: &mut ModelManager,
        _history: &CommandHistory,
    ) -> CommandResult<CommandOutcome> {
        model.reset_data(Vec::new())?;
        model.commit_food_diary();
        Ok(CommandOutcome::message("Food diary has been cleared!"))
    }
}

#[cfg(test)]
mod tests {
    use super::{AddCommand, ClearCommand, DeleteCommand, EditCommand, EditRestaurantDescriptor};
    use crate::command::test_support::{restaurant, typical_model};
    use crate::command::{Command, CommandError, CommandHistory, Index};
    use crate::model::field::{Address, Rating};
    use crate::model::filter::RestaurantFilter;

    #[test]
    fn add_rejects_identity_duplicate_and_keeps_size() {
        let mut model = typical_model();
        let history = CommandHistory::new();
        let clash = restaurant("Alpha", "111").with_tags(Default::default());

        let err = AddCommand::new(clash)
            .execute(&mut model, &history)
            .expect_err("Alpha already exists");
        assert_eq!(err, CommandError::DuplicateRestaurant);
        assert_eq!(model.food_diary().len(), 3);
        assert!(!model.can_undo_food_diary());
    }

    #[test]
    fn add_commits_undo_state() {
        let mut model = typical_model();
        let outcome = AddCommand::new(restaurant("Delta", "444"))
            .execute(&mut model, &CommandHistory::new())
            .expect("add should succeed");
        assert!(outcome.feedback.starts_with("New restaurant added: Delta"));
        assert!(model.can_undo_food_diary());
    }

    #[test]
    fn edit_replaces_in_place() {
        let mut model = typical_model();
        let descriptor = EditRestaurantDescriptor {
            address: Some(Address::parse("New Address").unwrap()),
            rating: Some(Some(Rating::parse("4").unwrap())),
            ..Default::default()
        };
        EditCommand::new(Index::from_zero_based(1), descriptor)
            .execute(&mut model, &CommandHistory::new())
            .expect("edit should succeed");

        let view = model.food_diary().list();
        let edited = view.get(1).expect("position kept");
        assert_eq!(edited.name().as_str(), "Beta");
        assert_eq!(edited.address().as_str(), "New Address");
        assert_eq!(edited.rating().map(|r| r.as_str()), Some("4"));
    }

    #[test]
    fn edit_requires_some_field_and_valid_index() {
        let mut model = typical_model();
        let history = CommandHistory::new();
        let err = EditCommand::new(Index::from_zero_based(0), Default::default())
            .execute(&mut model, &history)
            .expect_err("empty descriptor");
        assert_eq!(err, CommandError::NotEdited);

        let descriptor = EditRestaurantDescriptor {
            address: Some(Address::parse("X").unwrap()),
            ..Default::default()
        };
        let err = EditCommand::new(Index::from_zero_based(3), descriptor)
            .execute(&mut model, &history)
            .expect_err("out of range");
        assert!(matches!(err, CommandError::IndexOutOfRange(_)));
    }

    #[test]
    fn edit_into_other_identity_is_duplicate() {
        let mut model = typical_model();
        let descriptor = EditRestaurantDescriptor {
            name: Some("Alpha".parse().unwrap()),
            phone: Some("111".parse().unwrap()),
            ..Default::default()
        };
        let err = EditCommand::new(Index::from_zero_based(1), descriptor)
            .execute(&mut model, &CommandHistory::new())
            .expect_err("collides with Alpha");
        assert_eq!(err, CommandError::DuplicateRestaurant);
    }

    #[test]
    fn delete_resolves_against_filtered_view() {
        let mut model = typical_model();
        model.update_filtered_restaurant_list(RestaurantFilter::NameKeywords(vec![
            "gamma".to_string(),
        ]));
        let outcome = DeleteCommand::new(Index::from_zero_based(0))
            .execute(&mut model, &CommandHistory::new())
            .expect("delete should succeed");
        assert!(outcome.feedback.contains("Gamma"));
        assert_eq!(model.food_diary().len(), 2);

        let err = DeleteCommand::new(Index::from_zero_based(0))
            .execute(&mut model, &CommandHistory::new())
            .expect_err("filtered view is now empty");
        assert!(matches!(err, CommandError::IndexOutOfRange(_)));
    }

    #[test]
    fn clear_empties_diary() {
        let mut model = typical_model();
        ClearCommand
            .execute(&mut model, &CommandHistory::new())
            .expect("clear should succeed");
        assert!(model.food_diary().is_empty());
    }
}
