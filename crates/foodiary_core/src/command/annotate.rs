//! Commands that rate or tag a displayed restaurant.

use crate::command::{
    resolve_displayed, Command, CommandHistory, CommandOutcome, CommandResult, Index,
};
use crate::model::field::{Rating, Tag};
use crate::service::model_manager::ModelManager;
use std::collections::BTreeSet;

/// Sets the rating of the restaurant at a displayed index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateCommand {
    index: Index,
    rating: Rating,
}

impl RateCommand {
    pub const WORD: &'static str = "rate";

    pub fn new(index: Index, rating: Rating) -> Self {
        Self { index, rating }
    }
}

impl Command for RateCommand {
    fn word(&self) -> &'static str {
        Self::WORD
    }

    fn execute(
        &self,
        model: &mut ModelManager,
        _history: &CommandHistory,
    ) -> CommandResult<CommandOutcome> {
        let target = resolve_displayed(model, self.index)?;
        let rated = target.clone().with_rating(Some(self.rating.clone()));
        model.set_restaurant(&target, rated)?;
        model.commit_food_diary();
        Ok(CommandOutcome::message(format!(
            "Rated Restaurant: {} {}/5",
            target.name(),
            self.rating
        )))
    }
}

/// Adds tags to the restaurant at a displayed index. Existing tags are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCommand {
    index: Index,
    tags: BTreeSet<Tag>,
}

impl TagCommand {
    pub const WORD: &'static str = "tag";

    pub fn new(index: Index, tags: BTreeSet<Tag>) -> Self {
        Self { index, tags }
    }
}

impl Command for TagCommand {
    fn word(&self) -> &'static str {
        Self::WORD
    }

    fn execute(
        &self,
        model: &mut ModelManager,
        _history: &CommandHistory,
    ) -> CommandResult<CommandOutcome> {
        let target = resolve_displayed(model, self.index)?;
        let mut tags = target.tags().clone();
        tags.extend(self.tags.iter().cloned());
        let tagged = target.clone().with_tags(tags);
        model.set_restaurant(&target, tagged.clone())?;
        model.commit_food_diary();
        Ok(CommandOutcome::message(format!(
            "Tagged Restaurant: {tagged}"
        )))
    }
}
