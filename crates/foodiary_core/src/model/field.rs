//! Validated field value objects for restaurant entries.
//!
//! # Responsibility
//! - Provide one parse-or-fail constructor per restaurant field kind.
//! - Keep every field pattern and user-facing constraint message in one place.
//!
//! # Invariants
//! - A value object can only exist if its raw text matched the field pattern.
//! - Value objects are immutable and compare by their raw text.
//! - Validators are pure: no I/O, no logging, no shared mutable state.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Constraint message for [`Name`].
pub const NAME_CONSTRAINTS: &str =
    "Names should only contain alphanumeric characters and spaces, and it should not be blank";
/// Constraint message for [`Phone`].
pub const PHONE_CONSTRAINTS: &str =
    "Phone numbers should only contain numbers, and it should be at least 3 digits long";
/// Constraint message for [`Email`].
pub const EMAIL_CONSTRAINTS: &str = "Emails should be of the format local-part@domain \
and adhere to the following constraints:\n\
1. The local-part should only contain alphanumeric characters and these special characters, \
excluding the parentheses, (!#$%&'*+/=?`{|}~^.-).\n\
2. This is followed by a '@' and then a domain name. The domain name must:\n    \
- be at least 2 characters long\n    \
- start and end with alphanumeric characters\n    \
- consist of alphanumeric characters, a period or a hyphen for the characters in between, if any.";
/// Constraint message for [`Address`].
pub const ADDRESS_CONSTRAINTS: &str = "Addresses can take any values, and it should not be blank";
/// Constraint message for [`Tag`].
pub const TAG_CONSTRAINTS: &str = "Tags names should be alphanumeric";
/// Constraint message for [`Cuisine`].
pub const CUISINE_CONSTRAINTS: &str =
    "Cuisines should only contain alphabetic characters and spaces, and it should not be blank";
/// Constraint message for [`Rating`].
pub const RATING_CONSTRAINTS: &str =
    "Ratings should only contain digits or 1 decimal place numbers within the range 0-5, inclusive.";
/// Constraint message for [`Weblink`].
pub const WEBLINK_CONSTRAINTS: &str = "Weblinks should be a domain name, optionally prefixed \
by http:// or https:// and followed by a path, e.g. www.example.com/menu";

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[[:alnum:]][[:alnum:] ]*$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_!#$%&'*+/=?`{|}~^.-]+@[[:alnum:]][a-zA-Z0-9.-]*[[:alnum:]]$")
        .expect("valid email regex")
});
static ADDRESS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S.*$").expect("valid address regex"));
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[[:alnum:]]+$").expect("valid tag regex"));
static CUISINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z ]*$").expect("valid cuisine regex"));
static RATING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-4](?:\.[0-9])?|5(?:\.0)?)$").expect("valid rating regex")
});
static WEBLINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://)?[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+(?:/\S*)?$")
        .expect("valid weblink regex")
});

/// A raw field value failed its validation pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFormatError {
    /// Lowercase field name, e.g. `phone`.
    pub field: &'static str,
    /// User-facing constraint message for the field.
    pub message: &'static str,
}

impl Display for FieldFormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for FieldFormatError {}

fn check(
    field: &'static str,
    pattern: &Regex,
    message: &'static str,
    raw: &str,
) -> Result<(), FieldFormatError> {
    if pattern.is_match(raw) {
        Ok(())
    } else {
        Err(FieldFormatError { field, message })
    }
}

/// Restaurant display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    pub fn parse(raw: impl Into<String>) -> Result<Self, FieldFormatError> {
        let raw = raw.into();
        check("name", &NAME_RE, NAME_CONSTRAINTS, &raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Contact phone number, digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    pub fn parse(raw: impl Into<String>) -> Result<Self, FieldFormatError> {
        let raw = raw.into();
        check("phone", &PHONE_RE, PHONE_CONSTRAINTS, &raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Contact email in `local-part@domain` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: impl Into<String>) -> Result<Self, FieldFormatError> {
        let raw = raw.into();
        check("email", &EMAIL_RE, EMAIL_CONSTRAINTS, &raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-form street address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn parse(raw: impl Into<String>) -> Result<Self, FieldFormatError> {
        let raw = raw.into();
        check("address", &ADDRESS_RE, ADDRESS_CONSTRAINTS, &raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Alphanumeric label attached to a restaurant.
///
/// Ordered so tag sets encode deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    pub fn parse(raw: impl Into<String>) -> Result<Self, FieldFormatError> {
        let raw = raw.into();
        check("tag", &TAG_RE, TAG_CONSTRAINTS, &raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Cuisine category, e.g. `Japanese`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cuisine(String);

impl Cuisine {
    pub fn parse(raw: impl Into<String>) -> Result<Self, FieldFormatError> {
        let raw = raw.into();
        check("cuisine", &CUISINE_RE, CUISINE_CONSTRAINTS, &raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rating between 0 and 5 inclusive with at most one decimal place.
///
/// The raw text is kept as entered, so `"5"` and `"5.0"` are distinct values
/// that both represent the maximum score.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rating(String);

impl Rating {
    pub fn parse(raw: impl Into<String>) -> Result<Self, FieldFormatError> {
        let raw = raw.into();
        check("rating", &RATING_RE, RATING_CONSTRAINTS, &raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric score. Infallible because the pattern only admits decimals.
    pub fn to_f32(&self) -> f32 {
        self.0.parse().unwrap_or_default()
    }
}

/// Restaurant website link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Weblink(String);

impl Weblink {
    pub fn parse(raw: impl Into<String>) -> Result<Self, FieldFormatError> {
        let raw = raw.into();
        check("weblink", &WEBLINK_RE, WEBLINK_CONSTRAINTS, &raw)?;
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Link with an explicit scheme, suitable for handing to a browser.
    pub fn to_url(&self) -> String {
        if self.0.starts_with("http://") || self.0.starts_with("https://") {
            self.0.clone()
        } else {
            format!("https://{}", self.0)
        }
    }
}

macro_rules! display_as_raw {
    ($($ty:ty),+) => {
        $(impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        })+
    };
}

display_as_raw!(Name, Phone, Email, Address, Tag, Cuisine, Rating, Weblink);

macro_rules! parse_from_str {
    ($($ty:ty),+) => {
        $(impl FromStr for $ty {
            type Err = FieldFormatError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                Self::parse(raw)
            }
        })+
    };
}

parse_from_str!(Name, Phone, Email, Address, Tag, Cuisine, Rating, Weblink);

/// Returns whether `raw` is a valid restaurant name.
pub fn is_valid_name(raw: &str) -> bool {
    NAME_RE.is_match(raw)
}

/// Returns whether `raw` is a valid phone number.
pub fn is_valid_phone(raw: &str) -> bool {
    PHONE_RE.is_match(raw)
}

/// Returns whether `raw` is a valid email.
pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_RE.is_match(raw)
}

/// Returns whether `raw` is a valid address.
pub fn is_valid_address(raw: &str) -> bool {
    ADDRESS_RE.is_match(raw)
}

/// Returns whether `raw` is a valid tag name.
pub fn is_valid_tag(raw: &str) -> bool {
    TAG_RE.is_match(raw)
}

/// Returns whether `raw` is a valid cuisine.
pub fn is_valid_cuisine(raw: &str) -> bool {
    CUISINE_RE.is_match(raw)
}

/// Returns whether `raw` is a valid rating.
pub fn is_valid_rating(raw: &str) -> bool {
    RATING_RE.is_match(raw)
}

/// Returns whether `raw` is a valid weblink.
pub fn is_valid_weblink(raw: &str) -> bool {
    WEBLINK_RE.is_match(raw)
}
