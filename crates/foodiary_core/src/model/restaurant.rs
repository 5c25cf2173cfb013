//! Restaurant domain model.
//!
//! # Responsibility
//! - Define the canonical restaurant entry stored in the food diary.
//! - Separate identity equality (duplicate detection) from full equality.
//!
//! # Invariants
//! - Every field of a `Restaurant` has passed its validator.
//! - A `Restaurant` is immutable; edits build a replacement value.
//! - Two restaurants share an identity when names match and either phones or
//!   emails match.

use crate::model::field::{
    Address, Cuisine, Email, FieldFormatError, Name, Phone, Rating, Tag, Weblink,
};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// One food diary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restaurant {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    tags: BTreeSet<Tag>,
    cuisine: Option<Cuisine>,
    rating: Option<Rating>,
    weblink: Option<Weblink>,
}

impl Restaurant {
    /// Creates a restaurant from already-validated fields.
    pub fn new(
        name: Name,
        phone: Phone,
        email: Email,
        address: Address,
        tags: BTreeSet<Tag>,
    ) -> Self {
        Self {
            name,
            phone,
            email,
            address,
            tags,
            cuisine: None,
            rating: None,
            weblink: None,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn cuisine(&self) -> Option<&Cuisine> {
        self.cuisine.as_ref()
    }

    pub fn rating(&self) -> Option<&Rating> {
        self.rating.as_ref()
    }

    pub fn weblink(&self) -> Option<&Weblink> {
        self.weblink.as_ref()
    }

    /// Returns a copy with the cuisine replaced.
    pub fn with_cuisine(mut self, cuisine: Option<Cuisine>) -> Self {
        self.cuisine = cuisine;
        self
    }

    /// Returns a copy with the rating replaced.
    pub fn with_rating(mut self, rating: Option<Rating>) -> Self {
        self.rating = rating;
        self
    }

    /// Returns a copy with the weblink replaced.
    pub fn with_weblink(mut self, weblink: Option<Weblink>) -> Self {
        self.weblink = weblink;
        self
    }

    /// Returns a copy with the tag set replaced.
    pub fn with_tags(mut self, tags: BTreeSet<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Identity check used for duplicate rejection.
    ///
    /// Weaker than `==`: address, tags and optional fields are ignored.
    pub fn is_same_restaurant(&self, other: &Restaurant) -> bool {
        self.name == other.name && (self.phone == other.phone || self.email == other.email)
    }
}

impl Display for Restaurant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} Phone: {} Email: {} Address: {}",
            self.name, self.phone, self.email, self.address
        )?;
        if let Some(cuisine) = &self.cuisine {
            write!(f, " Cuisine: {cuisine}")?;
        }
        if let Some(rating) = &self.rating {
            write!(f, " Rating: {rating}")?;
        }
        if let Some(weblink) = &self.weblink {
            write!(f, " Weblink: {weblink}")?;
        }
        if !self.tags.is_empty() {
            f.write_str(" Tags: ")?;
            for tag in &self.tags {
                write!(f, "[{tag}]")?;
            }
        }
        Ok(())
    }
}

/// Builder that validates raw field text in a fixed order.
///
/// `build` fails on the first invalid field: name, phone, email, address,
/// tags, cuisine, rating, weblink.
#[derive(Debug, Clone, Default)]
pub struct RestaurantBuilder {
    name: String,
    phone: String,
    email: String,
    address: String,
    tags: Vec<String>,
    cuisine: Option<String>,
    rating: Option<String>,
    weblink: Option<String>,
}

impl RestaurantBuilder {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
            ..Self::default()
        }
    }

    /// Seeds a builder with every field of an existing restaurant.
    pub fn from_restaurant(source: &Restaurant) -> Self {
        Self {
            name: source.name.to_string(),
            phone: source.phone.to_string(),
            email: source.email.to_string(),
            address: source.address.to_string(),
            tags: source.tags.iter().map(ToString::to_string).collect(),
            cuisine: source.cuisine.as_ref().map(ToString::to_string),
            rating: source.rating.as_ref().map(ToString::to_string),
            weblink: source.weblink.as_ref().map(ToString::to_string),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Replaces the whole tag list.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn cuisine(mut self, cuisine: Option<String>) -> Self {
        self.cuisine = cuisine;
        self
    }

    pub fn rating(mut self, rating: Option<String>) -> Self {
        self.rating = rating;
        self
    }

    pub fn weblink(mut self, weblink: Option<String>) -> Self {
        self.weblink = weblink;
        self
    }

    pub fn build(self) -> Result<Restaurant, FieldFormatError> {
        let name = Name::parse(self.name)?;
        let phone = Phone::parse(self.phone)?;
        let email = Email::parse(self.email)?;
        let address = Address::parse(self.address)?;
        let tags = self
            .tags
            .into_iter()
            .map(Tag::parse)
            .collect::<Result<BTreeSet<_>, _>>()?;
        let cuisine = self.cuisine.map(Cuisine::parse).transpose()?;
        let rating = self.rating.map(Rating::parse).transpose()?;
        let weblink = self.weblink.map(Weblink::parse).transpose()?;

        Ok(Restaurant::new(name, phone, email, address, tags)
            .with_cuisine(cuisine)
            .with_rating(rating)
            .with_weblink(weblink))
    }
}

#[cfg(test)]
mod tests {
    use super::RestaurantBuilder;

    fn alice() -> RestaurantBuilder {
        RestaurantBuilder::new(
            "Alice",
            "91234567",
            "alice@example.com",
            "123, Jurong West Ave 6, #08-111",
        )
        .tags(["friends"])
    }

    #[test]
    fn builder_fails_fast_on_first_invalid_field() {
        let err = alice()
            .phone("12")
            .email("not-an-email")
            .build()
            .expect_err("phone is checked before email");
        assert_eq!(err.field, "phone");
    }

    #[test]
    fn builder_rejects_non_ascii_digits_in_phone() {
        let err = alice()
            .phone("٩١٢")
            .build()
            .expect_err("arabic-indic digits are not phone digits");
        assert_eq!(err.field, "phone");
    }

    #[test]
    fn same_identity_ignores_address_and_tags() {
        let original = alice().build().expect("valid alice");
        let moved = alice()
            .address("Blk 30 Geylang Street 29")
            .tags(["husband"])
            .build()
            .expect("valid edited alice");
        assert!(original.is_same_restaurant(&moved));
        assert_ne!(original, moved);
    }

    #[test]
    fn same_identity_requires_phone_or_email_match() {
        let original = alice().build().expect("valid alice");
        let other_phone = alice().phone("99999999").build().expect("valid");
        assert!(original.is_same_restaurant(&other_phone));

        let other_contact = alice()
            .phone("99999999")
            .email("other@example.com")
            .build()
            .expect("valid");
        assert!(!original.is_same_restaurant(&other_contact));

        let other_name = alice().name("Alicia").build().expect("valid");
        assert!(!original.is_same_restaurant(&other_name));
    }

    #[test]
    fn from_restaurant_round_trips_all_fields() {
        let original = alice()
            .cuisine(Some("Japanese".to_string()))
            .rating(Some("4.5".to_string()))
            .weblink(Some("www.alice.com".to_string()))
            .build()
            .expect("valid alice");
        let rebuilt = RestaurantBuilder::from_restaurant(&original)
            .build()
            .expect("rebuild");
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn display_lists_optional_fields_only_when_present() {
        let plain = alice().tags(Vec::<String>::new()).build().expect("valid");
        let text = plain.to_string();
        assert!(text.starts_with("Alice Phone: 91234567"));
        assert!(!text.contains("Rating"));
        assert!(!text.contains("Tags"));

        let rated = alice().rating(Some("4".to_string())).build().expect("valid");
        assert!(rated.to_string().contains("Rating: 4"));
        assert!(rated.to_string().contains("[friends]"));
    }
}
