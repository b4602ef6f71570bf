//! Deterministic fixtures shared by unit and behaviour tests.

use std::collections::HashMap;

use geo::Coord;

use crate::{AllergyProfile, Allergen, Dish, DishScorer, Restaurant, VibeTag, VoteTally};

/// Test `DishScorer` returning preset scores keyed by dish identifier.
///
/// Dishes without an entry score `default`.
#[derive(Debug, Clone, Default)]
pub struct TableScorer {
    scores: HashMap<String, f64>,
    default: f64,
}

impl TableScorer {
    /// Create a scorer with a fallback score for unknown dishes.
    pub fn new(default: f64) -> Self {
        Self {
            scores: HashMap::new(),
            default,
        }
    }

    /// Preset the score for `dish_id`.
    pub fn with_score(mut self, dish_id: &str, score: f64) -> Self {
        self.scores.insert(dish_id.to_owned(), score);
        self
    }
}

impl DishScorer for TableScorer {
    fn score_dish(
        &self,
        _restaurant: &Restaurant,
        dish: &Dish,
        _profile: &AllergyProfile,
        _votes: &VoteTally,
    ) -> f64 {
        Self::sanitise(self.scores.get(&dish.id).copied().unwrap_or(self.default))
    }
}

/// A Thai restaurant sharing a fryer, as used across the behaviour suites.
pub fn thai_palace() -> Restaurant {
    Restaurant::new(
        "thai_1",
        "Thai Palace",
        "College Park",
        Coord {
            x: -76.936,
            y: 38.989,
        },
    )
    .with_cuisine("thai")
    .with_cross_contact("shared_fryer")
    .with_vibe(VibeTag::Casual)
    .with_vibe(VibeTag::DateNight)
    .with_verified_score(0.5)
}

/// An Italian restaurant with no cross-contact flags.
pub fn nonna_kitchen() -> Restaurant {
    Restaurant::new(
        "ital_1",
        "Nonna's Kitchen",
        "Silver Spring",
        Coord {
            x: -77.026,
            y: 38.994,
        },
    )
    .with_cuisine("italian")
    .with_vibe(VibeTag::Family)
    .with_verified_score(0.7)
}

/// Dishes served at [`thai_palace`].
pub fn thai_dishes() -> Vec<Dish> {
    vec![
        Dish::new("thai_1", "thai_1_pad", "Pad Thai")
            .with_description("Rice noodles with peanut and fish sauce")
            .with_allergen(Allergen::Peanut)
            .with_allergen(Allergen::Fish)
            .with_confidence(0.9),
        Dish::new("thai_1", "thai_1_rice", "Jasmine Rice")
            .with_description("Steamed rice")
            .with_confidence(0.8),
        Dish::new("thai_1", "thai_1_curry", "Green Curry")
            .with_description("Coconut curry with shrimp paste")
            .with_allergen(Allergen::Shellfish)
            .with_confidence(0.6),
    ]
}
