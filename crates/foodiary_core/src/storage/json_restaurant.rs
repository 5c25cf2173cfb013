//! Serde-friendly flat form of [`Restaurant`].
//!
//! # Invariants
//! - Encoding never fails for a constructed `Restaurant`.
//! - Decoding checks presence of `name`, `phone`, `email`, `address` in that
//!   order before validating any value.
//! - Absent optional keys decode to `None`; unknown keys are ignored.

use crate::model::field::{
    Address, Cuisine, Email, FieldFormatError, Name, Phone, Rating, Tag, Weblink,
};
use crate::model::restaurant::Restaurant;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Decode failure for one flat restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A required key was absent. Holds the lowercase field name.
    MissingField(&'static str),
    FieldFormat(FieldFormatError),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Restaurant's {field} field is missing!"),
            Self::FieldFormat(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::FieldFormat(err) => Some(err),
            Self::MissingField(_) => None,
        }
    }
}

impl From<FieldFormatError> for CodecError {
    fn from(value: FieldFormatError) -> Self {
        Self::FieldFormat(value)
    }
}

/// Flat form of [`Tag`], serialized as `{ "tagName": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonAdaptedTag {
    #[serde(rename = "tagName")]
    pub tag_name: String,
}

impl JsonAdaptedTag {
    pub fn from_model(tag: &Tag) -> Self {
        Self {
            tag_name: tag.as_str().to_string(),
        }
    }

    pub fn to_model(&self) -> Result<Tag, FieldFormatError> {
        Tag::parse(self.tag_name.as_str())
    }
}

/// Flat form of [`Restaurant`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonAdaptedRestaurant {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub tagged: Vec<JsonAdaptedTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weblink: Option<String>,
}

impl JsonAdaptedRestaurant {
    /// Encodes a restaurant.
    pub fn from_model(source: &Restaurant) -> Self {
        Self {
            name: Some(source.name().to_string()),
            phone: Some(source.phone().to_string()),
            email: Some(source.email().to_string()),
            address: Some(source.address().to_string()),
            tagged: source.tags().iter().map(JsonAdaptedTag::from_model).collect(),
            cuisine: source.cuisine().map(ToString::to_string),
            rating: source.rating().map(ToString::to_string),
            weblink: source.weblink().map(ToString::to_string),
        }
    }

    /// Decodes into a validated restaurant.
    ///
    /// # Errors
    /// - `MissingField` naming the first absent required key.
    /// - `FieldFormat` for the first present value that fails validation.
    pub fn to_model(&self) -> Result<Restaurant, CodecError> {
        let name = required(&self.name, "name")?;
        let phone = required(&self.phone, "phone")?;
        let email = required(&self.email, "email")?;
        let address = required(&self.address, "address")?;

        let name = Name::parse(name)?;
        let phone = Phone::parse(phone)?;
        let email = Email::parse(email)?;
        let address = Address::parse(address)?;
        let tags = self
            .tagged
            .iter()
            .map(JsonAdaptedTag::to_model)
            .collect::<Result<BTreeSet<_>, _>>()?;
        let cuisine = self.cuisine.as_deref().map(Cuisine::parse).transpose()?;
        let rating = self.rating.as_deref().map(Rating::parse).transpose()?;
        let weblink = self.weblink.as_deref().map(Weblink::parse).transpose()?;

        Ok(Restaurant::new(name, phone, email, address, tags)
            .with_cuisine(cuisine)
            .with_rating(rating)
            .with_weblink(weblink))
    }
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, CodecError> {
    value.as_deref().ok_or(CodecError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::{CodecError, JsonAdaptedRestaurant};
    use crate::model::field::{PHONE_CONSTRAINTS, RATING_CONSTRAINTS};
    use crate::model::restaurant::RestaurantBuilder;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> Result<crate::Restaurant, CodecError> {
        serde_json::from_value::<JsonAdaptedRestaurant>(value)
            .expect("flat restaurant should deserialize")
            .to_model()
    }

    #[test]
    fn decode_round_trips_every_field() {
        let original = RestaurantBuilder::new(
            "Benson Meier",
            "98765432",
            "johnd@example.com",
            "311, Clementi Ave 2, #02-25",
        )
        .tags(["owesMoney", "friends"])
        .cuisine(Some("Western".to_string()))
        .rating(Some("4.5".to_string()))
        .weblink(Some("www.benson.com".to_string()))
        .build()
        .expect("valid restaurant");

        let encoded = JsonAdaptedRestaurant::from_model(&original);
        assert_eq!(encoded.to_model().expect("decode"), original);
    }

    #[test]
    fn missing_phone_is_reported_before_other_fields() {
        let err = decode(json!({
            "name": "Alice",
            "email": "not an email",
            "tagged": [{ "tagName": "bad tag" }],
        }))
        .expect_err("phone is missing");
        assert_eq!(err, CodecError::MissingField("phone"));
        assert_eq!(err.to_string(), "Restaurant's phone field is missing!");
    }

    #[test]
    fn missing_fields_are_checked_in_declared_order() {
        let err = decode(json!({ "phone": "123" })).expect_err("name is missing");
        assert_eq!(err, CodecError::MissingField("name"));

        let err = decode(json!({ "name": "A", "phone": "123", "email": "a@b.com" }))
            .expect_err("address is missing");
        assert_eq!(err, CodecError::MissingField("address"));
    }

    #[test]
    fn invalid_present_field_reports_its_constraint() {
        let err = decode(json!({
            "name": "Alice",
            "phone": "+651234",
            "email": "alice@example.com",
            "address": "Somewhere",
        }))
        .expect_err("phone is invalid");
        match err {
            CodecError::FieldFormat(inner) => {
                assert_eq!(inner.field, "phone");
                assert_eq!(inner.message, PHONE_CONSTRAINTS);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn optional_fields_default_to_absent() {
        let restaurant = decode(json!({
            "name": "Alice",
            "phone": "91234567",
            "email": "alice@example.com",
            "address": "Somewhere",
            "unknownKey": 42,
        }))
        .expect("valid restaurant");
        assert!(restaurant.tags().is_empty());
        assert!(restaurant.cuisine().is_none());
        assert!(restaurant.rating().is_none());
        assert!(restaurant.weblink().is_none());
    }

    #[test]
    fn invalid_optional_rating_is_rejected() {
        let err = decode(json!({
            "name": "Alice",
            "phone": "91234567",
            "email": "alice@example.com",
            "address": "Somewhere",
            "rating": "5.1",
        }))
        .expect_err("rating out of range");
        assert_eq!(err.to_string(), RATING_CONSTRAINTS);
    }

    #[test]
    fn encoding_omits_absent_optionals_and_names_tags() {
        let restaurant = RestaurantBuilder::new("Alice", "91234567", "a@example.com", "X")
            .tags(["friends"])
            .build()
            .expect("valid restaurant");
        let value = serde_json::to_value(JsonAdaptedRestaurant::from_model(&restaurant))
            .expect("serialize");
        assert_eq!(value["tagged"][0]["tagName"], "friends");
        assert!(value.get("cuisine").is_none());
        assert!(value.get("rating").is_none());
    }
}
