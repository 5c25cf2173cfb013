//! `visitWeb`: shows a restaurant's website.

use crate::command::{
    resolve_displayed, Command, CommandHistory, CommandOutcome, CommandResult, Index, UiAction,
};
use crate::model::field::Weblink;
use crate::service::model_manager::ModelManager;
use log::info;

/// What `visitWeb` was pointed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitWebTarget {
    /// A restaurant in the displayed list.
    Index(Index),
    /// A link typed directly by the user.
    Weblink(Weblink),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitWebCommand {
    target: VisitWebTarget,
}

impl VisitWebCommand {
    pub const WORD: &'static str = "visitWeb";

    pub fn new(target: VisitWebTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &VisitWebTarget {
        &self.target
    }
}

impl Command for VisitWebCommand {
    fn word(&self) -> &'static str {
        Self::WORD
    }

    fn execute(
        &self,
        model: &mut ModelManager,
        _history: &CommandHistory,
    ) -> CommandResult<CommandOutcome> {
        match &self.target {
            VisitWebTarget::Index(index) => {
                let target = resolve_displayed(model, *index)?;
                model.set_selected_restaurant(Some(target))?;
                Ok(CommandOutcome::message(format!(
                    "Displaying Website of Restaurant: {index}"
                )))
            }
            VisitWebTarget::Weblink(link) => {
                info!("event=visit_web module=command link={link}");
                Ok(CommandOutcome::with_action(
                    format!("Displaying website : {link}"),
                    UiAction::OpenWeblink(link.clone()),
                ))
            }
        }
    }
}
