//! Store error type.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by restaurant store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The operation would leave two identity-equal restaurants in the store.
    Duplicate,
    /// No stored restaurant matches the requested identity.
    NotFound,
    /// A required argument was absent.
    NullInput(&'static str),
    /// A mutation was attempted on a read-only view.
    UnsupportedOperation(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate => write!(f, "Operation would result in duplicate restaurants"),
            Self::NotFound => write!(f, "Restaurant not found in the food diary"),
            Self::NullInput(argument) => write!(f, "required argument `{argument}` is missing"),
            Self::UnsupportedOperation(operation) => {
                write!(f, "read-only restaurant view does not support `{operation}`")
            }
        }
    }
}

impl Error for StoreError {}
