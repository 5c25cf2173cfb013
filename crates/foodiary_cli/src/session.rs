//! One CLI session: the loaded model, its storage and the entered history.
//!
//! # Invariants
//! - The diary file is written only after a command that changed the store.

use foodiary_core::command::{UiAction, VisitWebCommand};
use foodiary_core::{
    load_or_fallback, ChangeEvent, Command, CommandHistory, CommandOutcome, CommandResult,
    FoodDiaryStorage, ListenerId, ModelManager, StorageResult,
};
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct Session<S: FoodDiaryStorage> {
    model: ModelManager,
    storage: S,
    history: CommandHistory,
    dirty: Arc<AtomicBool>,
    listener: ListenerId,
}

impl<S: FoodDiaryStorage> Session<S> {
    /// Loads the diary from `storage`, falling back to sample or empty data.
    pub fn open(storage: S) -> Self {
        let model = ModelManager::new(load_or_fallback(&storage));
        let dirty = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&dirty);
        let listener = model
            .notifier()
            .subscribe(Arc::new(move |_event: ChangeEvent| {
                flag.store(true, Ordering::SeqCst);
            }));
        Self {
            model,
            storage,
            history: CommandHistory::new(),
            dirty,
            listener,
        }
    }

    pub fn history_mut(&mut self) -> &mut CommandHistory {
        &mut self.history
    }

    pub fn execute(&mut self, command: &dyn Command) -> CommandResult<CommandOutcome> {
        command.execute(&mut self.model, &self.history)
    }

    /// Saves the diary when a change notification fired since the last save.
    ///
    /// Returns whether a write happened.
    pub fn save_if_changed(&mut self) -> StorageResult<bool> {
        if !self.dirty.swap(false, Ordering::SeqCst) {
            return Ok(false);
        }
        if let Err(err) = self.storage.save_food_diary(self.model.food_diary()) {
            self.dirty.store(true, Ordering::SeqCst);
            return Err(err);
        }
        info!(
            "event=session_save module=cli status=ok size={}",
            self.model.food_diary().len()
        );
        Ok(true)
    }

    /// Text printed for a successful `command`.
    ///
    /// `visitWeb INDEX` only selects a restaurant, so its link is looked up
    /// from the selection here.
    pub fn describe(&self, command: &dyn Command, outcome: &CommandOutcome) -> String {
        let text = render(outcome);
        if command.word() != VisitWebCommand::WORD || outcome.ui_action.is_some() {
            return text;
        }
        match self.model.selected_restaurant().and_then(|r| r.weblink()) {
            Some(link) => format!("{text}\nOpen in browser: {}", link.to_url()),
            None => format!("{text}\nNo weblink recorded for this restaurant."),
        }
    }
}

/// Text printed for a successful command, including any requested UI action.
pub fn render(outcome: &CommandOutcome) -> String {
    match &outcome.ui_action {
        Some(UiAction::OpenWeblink(link)) => {
            format!("{}\nOpen in browser: {}", outcome.feedback, link.to_url())
        }
        None => outcome.feedback.clone(),
    }
}

impl<S: FoodDiaryStorage> Drop for Session<S> {
    fn drop(&mut self) {
        self.model.notifier().unsubscribe(self.listener);
    }
}

#[cfg(test)]
mod tests {
    use super::{render, Session};
    use foodiary_core::command::{AddCommand, ListCommand, SelectCommand};
    use foodiary_core::command::{UiAction, VisitWebCommand, VisitWebTarget};
    use foodiary_core::{
        CommandOutcome, FoodDiaryStorage, Index, JsonFoodDiaryStorage, RestaurantBuilder, Weblink,
    };

    fn storage_in(dir: &tempfile::TempDir) -> JsonFoodDiaryStorage {
        JsonFoodDiaryStorage::new(dir.path().join("diary.json"))
    }

    #[test]
    fn read_only_commands_do_not_write() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut session = Session::open(storage_in(&dir));

        session.execute(&ListCommand).expect("list");
        session
            .execute(&SelectCommand::new(Index::from_zero_based(0)))
            .expect("select sample entry");
        assert!(!session.save_if_changed().expect("no save"));
        assert!(!dir.path().join("diary.json").exists());
    }

    #[test]
    fn mutating_command_writes_once() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut session = Session::open(storage_in(&dir));
        let restaurant = RestaurantBuilder::new("Soup Spoon", "62221234", "hi@soup.sg", "Raffles")
            .build()
            .expect("valid restaurant");

        session
            .execute(&AddCommand::new(restaurant.clone()))
            .expect("add");
        assert!(session.save_if_changed().expect("save"));
        assert!(!session.save_if_changed().expect("already saved"));

        let stored = storage_in(&dir)
            .read_food_diary()
            .expect("readable")
            .expect("file exists");
        assert!(stored.contains(&restaurant));
    }

    #[test]
    fn render_appends_browser_url_for_weblink() {
        let link = Weblink::parse("kfc.com.sg").expect("valid link");
        let outcome = CommandOutcome::with_action(
            "Displaying website : kfc.com.sg",
            UiAction::OpenWeblink(link.clone()),
        );
        assert_eq!(
            render(&outcome),
            format!(
                "Displaying website : kfc.com.sg\nOpen in browser: {}",
                link.to_url()
            )
        );

    }

    #[test]
    fn visit_web_by_index_shows_selected_link() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut session = Session::open(storage_in(&dir));

        let kfc = VisitWebCommand::new(VisitWebTarget::Index(Index::from_zero_based(0)));
        let shown = session.execute(&kfc).expect("sample entry exists");
        assert_eq!(
            session.describe(&kfc, &shown),
            "Displaying Website of Restaurant: 1\nOpen in browser: https://www.kfc.com.sg"
        );

        let zam_zam = VisitWebCommand::new(VisitWebTarget::Index(Index::from_zero_based(2)));
        let shown = session.execute(&zam_zam).expect("sample entry exists");
        assert!(session
            .describe(&zam_zam, &shown)
            .ends_with("No weblink recorded for this restaurant."));
    }

    #[test]
    fn other_commands_describe_as_rendered() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut session = Session::open(storage_in(&dir));
        let select = SelectCommand::new(Index::from_zero_based(0));
        let shown = session.execute(&select).expect("select sample entry");
        assert_eq!(session.describe(&select, &shown), render(&shown));
    }
}
