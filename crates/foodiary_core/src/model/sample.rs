//! Built-in sample entries for first launch.

use crate::model::field::FieldFormatError;
use crate::model::restaurant::{Restaurant, RestaurantBuilder};
use crate::store::food_diary::FoodDiary;
use log::error;

/// Returns the fixed sample restaurants.
///
/// # Errors
/// - The first sample entry that fails field validation.
pub fn sample_restaurants() -> Result<Vec<Restaurant>, FieldFormatError> {
    let specs = [
        RestaurantBuilder::new(
            "Kentucky Fried Chicken",
            "67891234",
            "feedback@kfc.com.sg",
            "Blk 30 Geylang Street 29, #06-40",
        )
        .tags(["fastfood", "chicken"])
        .cuisine(Some("American".to_string()))
        .rating(Some("3.5".to_string()))
        .weblink(Some("www.kfc.com.sg".to_string())),
        RestaurantBuilder::new(
            "Ippudo Ramen",
            "66010778",
            "hello@ippudo.com.sg",
            "333A Orchard Road, #04-02",
        )
        .tags(["ramen"])
        .cuisine(Some("Japanese".to_string()))
        .rating(Some("4.5".to_string())),
        RestaurantBuilder::new(
            "Zam Zam",
            "62986320",
            "contact@zamzam.sg",
            "697 North Bridge Road",
        )
        .tags(["halal", "supper"])
        .cuisine(Some("Indian".to_string())),
    ];

    specs.into_iter().map(RestaurantBuilder::build).collect()
}

/// Returns a diary pre-populated with [`sample_restaurants`].
///
/// Falls back to an empty diary, logged at error level, if the samples are
/// rejected.
pub fn sample_food_diary() -> FoodDiary {
    let diary = sample_restaurants()
        .map_err(|err| err.to_string())
        .and_then(|restaurants| {
            FoodDiary::from_restaurants(restaurants).map_err(|err| err.to_string())
        });
    match diary {
        Ok(diary) => diary,
        Err(err) => {
            error!("event=sample_load module=model status=error error={err}");
            FoodDiary::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{sample_food_diary, sample_restaurants};
    use crate::store::food_diary::FoodDiary;

    #[test]
    fn every_sample_entry_is_valid() {
        let restaurants = sample_restaurants().expect("samples are valid");
        assert_eq!(restaurants.len(), 3);

        let expected = FoodDiary::from_restaurants(restaurants).expect("samples are distinct");
        assert_eq!(sample_food_diary(), expected);
    }
}
