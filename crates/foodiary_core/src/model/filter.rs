//! Predicates that select the displayed subset of restaurants.

use crate::model::field::{Rating, Tag};
use crate::model::restaurant::Restaurant;
use std::collections::BTreeSet;

/// Active filter for the displayed restaurant view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RestaurantFilter {
    /// Every restaurant is shown.
    #[default]
    All,
    /// Name contains any keyword as a whole word, ignoring case.
    NameKeywords(Vec<String>),
    /// Restaurant carries at least one of the tags.
    Tags(BTreeSet<Tag>),
    /// Restaurant is rated at or above the threshold. Unrated entries are hidden.
    MinRating(Rating),
}

impl RestaurantFilter {
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        match self {
            Self::All => true,
            Self::NameKeywords(keywords) => keywords
                .iter()
                .any(|keyword| contains_word_ignore_case(restaurant.name().as_str(), keyword)),
            Self::Tags(tags) => !restaurant.tags().is_disjoint(tags),
            Self::MinRating(threshold) => restaurant
                .rating()
                .is_some_and(|rating| rating.to_f32() >= threshold.to_f32()),
        }
    }
}

/// Whole-word, case-insensitive match. Blank or multi-word keywords never match.
fn contains_word_ignore_case(sentence: &str, word: &str) -> bool {
    let word = word.trim();
    if word.is_empty() || word.contains(char::is_whitespace) {
        return false;
    }
    sentence
        .split_whitespace()
        .any(|candidate| candidate.eq_ignore_ascii_case(word))
}

#[cfg(test)]
mod tests {
    use super::RestaurantFilter;
    use crate::model::field::{Rating, Tag};
    use crate::model::restaurant::{Restaurant, RestaurantBuilder};

    fn ramen() -> Restaurant {
        RestaurantBuilder::new("Ippudo Ramen Bar", "66010778", "a@ippudo.sg", "Orchard")
            .tags(["ramen", "noodles"])
            .rating(Some("4.5".to_string()))
            .build()
            .expect("valid restaurant")
    }

    #[test]
    fn name_keywords_match_whole_words_ignoring_case() {
        let filter = RestaurantFilter::NameKeywords(vec!["RAMEN".to_string()]);
        assert!(filter.matches(&ramen()));

        let partial = RestaurantFilter::NameKeywords(vec!["Ram".to_string()]);
        assert!(!partial.matches(&ramen()));

        let multi = RestaurantFilter::NameKeywords(vec!["Ramen Bar".to_string()]);
        assert!(!multi.matches(&ramen()));
    }

    #[test]
    fn tag_filter_matches_any_shared_tag() {
        let tags = [Tag::parse("noodles").unwrap(), Tag::parse("halal").unwrap()]
            .into_iter()
            .collect();
        assert!(RestaurantFilter::Tags(tags).matches(&ramen()));

        let none = [Tag::parse("halal").unwrap()].into_iter().collect();
        assert!(!RestaurantFilter::Tags(none).matches(&ramen()));
    }

    #[test]
    fn min_rating_hides_lower_and_unrated_entries() {
        let four = RestaurantFilter::MinRating(Rating::parse("4").unwrap());
        assert!(four.matches(&ramen()));

        let five = RestaurantFilter::MinRating(Rating::parse("5").unwrap());
        assert!(!five.matches(&ramen()));

        let unrated = RestaurantBuilder::new("Plain", "123", "p@x.com", "Somewhere")
            .build()
            .unwrap();
        assert!(!four.matches(&unrated));
    }
}
