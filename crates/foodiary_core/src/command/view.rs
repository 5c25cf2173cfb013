//! Commands that change what is displayed or selected.

use crate::command::{
    resolve_displayed, Command, CommandHistory, CommandOutcome, CommandResult, Index,
};
use crate::model::field::{Rating, Tag};
use crate::model::filter::RestaurantFilter;
use crate::service::model_manager::ModelManager;
use std::collections::BTreeSet;

/// Shows every restaurant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCommand;

impl ListCommand {
    pub const WORD: &'static str = "list";
}

impl Command for ListCommand {
    fn word(&self) -> &'static str {
        Self::WORD
    }

    fn execute(
        &self,
        model: &mut ModelManager,
        _history: &CommandHistory,
    ) -> CommandResult<CommandOutcome> {
        model.update_filtered_restaurant_list(RestaurantFilter::All);
        Ok(CommandOutcome::message("Listed all restaurants"))
    }
}

/// Narrows the displayed list with a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindCommand {
    filter: RestaurantFilter,
}

impl FindCommand {
    pub const WORD: &'static str = "find";

    pub fn new(filter: RestaurantFilter) -> Self {
        Self { filter }
    }

    pub fn by_name_keywords(keywords: Vec<String>) -> Self {
        Self::new(RestaurantFilter::NameKeywords(keywords))
    }

    pub fn by_tags(tags: BTreeSet<Tag>) -> Self {
        Self::new(RestaurantFilter::Tags(tags))
    }

    pub fn by_min_rating(rating: Rating) -> Self {
        Self::new(RestaurantFilter::MinRating(rating))
    }
}

impl Command for FindCommand {
    fn word(&self) -> &'static str {
        Self::WORD
    }

    fn execute(
        &self,
        model: &mut ModelManager,
        _history: &CommandHistory,
    ) -> CommandResult<CommandOutcome> {
        model.update_filtered_restaurant_list(self.filter.clone());
        let shown = model.filtered_restaurant_list().len();
        Ok(CommandOutcome::message(format!(
            "{shown} restaurants listed!"
        )))
    }
}

/// Selects the restaurant at a displayed index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectCommand {
    index: Index,
}

impl SelectCommand {
    pub const WORD: &'static str = "select";

    pub fn new(index: Index) -> Self {
        Self { index }
    }
}

impl Command for SelectCommand {
    fn word(&self) -> &'static str {
        Self::WORD
    }

    fn execute(
        &self,
        model: &mut ModelManager,
        _history: &CommandHistory,
    ) -> CommandResult<CommandOutcome> {
        let target = resolve_displayed(model, self.index)?;
        model.set_selected_restaurant(Some(target))?;
        Ok(CommandOutcome::message(format!(
            "Selected Restaurant: {}",
            self.index
        )))
    }
}
