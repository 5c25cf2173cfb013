//! Command pattern over the food diary model.
//!
//! # Responsibility
//! - Define the `Command` contract and its result/error envelopes.
//! - Resolve one-based display indices against the filtered view.
//! - Turn store and validation failures into user-facing messages.
//!
//! # Invariants
//! - Commands only touch the diary through `ModelManager`.
//! - Every successful mutating command commits exactly one undo state.
//! - No command error is fatal; each one carries a displayable message.

use crate::model::field::{FieldFormatError, Weblink};
use crate::model::restaurant::Restaurant;
use crate::service::model_manager::ModelManager;
use crate::store::error::StoreError;
use crate::store::versioned::VersionError;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::num::NonZeroUsize;
use std::str::FromStr;

pub mod annotate;
pub mod edit;
pub mod history;
pub mod view;
pub mod visit_web;

pub use annotate::{RateCommand, TagCommand};
pub use edit::{AddCommand, ClearCommand, DeleteCommand, EditCommand, EditRestaurantDescriptor};
pub use history::{CommandHistory, HistoryCommand, RedoCommand, UndoCommand};
pub use view::{FindCommand, ListCommand, SelectCommand};
pub use visit_web::{VisitWebCommand, VisitWebTarget};

/// Message for an index beyond the filtered view.
pub const MESSAGE_INVALID_RESTAURANT_DISPLAYED_INDEX: &str =
    "The restaurant index provided is invalid";
/// Message for an add/edit that collides with an existing identity.
pub const MESSAGE_DUPLICATE_RESTAURANT: &str = "This restaurant already exists in the food diary";

pub type CommandResult<T> = Result<T, CommandError>;

/// Zero-based position in the displayed list, entered one-based by users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Index(usize);

impl Index {
    pub fn from_zero_based(index: usize) -> Self {
        Self(index)
    }

    pub fn from_one_based(index: NonZeroUsize) -> Self {
        Self(index.get() - 1)
    }

    pub fn zero_based(self) -> usize {
        self.0
    }

    pub fn one_based(self) -> usize {
        self.0 + 1
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.one_based())
    }
}

/// A user-entered index was not a positive integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexParseError(pub String);

impl Display for IndexParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Index is not a non-zero unsigned integer: `{}`", self.0)
    }
}

impl Error for IndexParseError {}

impl FromStr for Index {
    type Err = IndexParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.trim()
            .parse::<NonZeroUsize>()
            .map(Self::from_one_based)
            .map_err(|_| IndexParseError(raw.to_string()))
    }
}

/// Side effect the presentation layer should perform after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    OpenWeblink(Weblink),
}

/// Successful command result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Message shown to the user.
    pub feedback: String,
    pub ui_action: Option<UiAction>,
}

impl CommandOutcome {
    pub fn message(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            ui_action: None,
        }
    }

    pub fn with_action(feedback: impl Into<String>, action: UiAction) -> Self {
        Self {
            feedback: feedback.into(),
            ui_action: Some(action),
        }
    }

    /// Whether a companion UI action is requested.
    pub fn has_ui_action(&self) -> bool {
        self.ui_action.is_some()
    }
}

/// Command failure with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    IndexOutOfRange(Index),
    DuplicateRestaurant,
    NotEdited,
    FieldFormat(FieldFormatError),
    Store(StoreError),
    Version(VersionError),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange(_) => write!(f, "{MESSAGE_INVALID_RESTAURANT_DISPLAYED_INDEX}"),
            Self::DuplicateRestaurant => write!(f, "{MESSAGE_DUPLICATE_RESTAURANT}"),
            Self::NotEdited => write!(f, "At least one field to edit must be provided."),
            Self::FieldFormat(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Version(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::FieldFormat(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Version(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for CommandError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Duplicate => Self::DuplicateRestaurant,
            other => Self::Store(other),
        }
    }
}

impl From<FieldFormatError> for CommandError {
    fn from(value: FieldFormatError) -> Self {
        Self::FieldFormat(value)
    }
}

impl From<VersionError> for CommandError {
    fn from(value: VersionError) -> Self {
        Self::Version(value)
    }
}

/// One executable user command.
pub trait Command: Debug {
    /// Keyword users type to invoke the command.
    fn word(&self) -> &'static str;

    fn execute(
        &self,
        model: &mut ModelManager,
        history: &CommandHistory,
    ) -> CommandResult<CommandOutcome>;
}

/// Looks up `index` in the filtered view.
///
/// # Errors
/// - `IndexOutOfRange` when `index` is not below the view size.
pub fn resolve_displayed(model: &ModelManager, index: Index) -> CommandResult<Restaurant> {
    model
        .filtered_restaurant_list()
        .get(index.zero_based())
        .cloned()
        .ok_or(CommandError::IndexOutOfRange(index))
}
