//! Static risk tables shared by dataset generation and live scoring.
//!
//! Three lookups are provided:
//! - hidden ingredients: keywords such as `pesto` that imply allergens not
//!   obvious from a dish name;
//! - cuisine priors: allergens commonly present in a cuisine;
//! - cross-contact weights: penalty weights for venue-level risk flags.
//!
//! Unknown keys resolve to "no allergens" or a zero weight.

use std::collections::BTreeSet;

use crate::Allergen::{
    self, Dairy, Egg, Fish, Gluten, Mustard, Peanut, Sesame, Shellfish, Soy, TreeNut,
};

/// Hidden-ingredient keywords and the allergens each implies.
pub const HIDDEN_INGREDIENTS: [(&str, &[Allergen]); 15] = [
    ("pesto", &[TreeNut, Dairy]),
    ("aioli", &[Egg]),
    ("mayo", &[Egg]),
    ("butter", &[Dairy]),
    ("ghee", &[Dairy]),
    ("paneer", &[Dairy]),
    ("whey", &[Dairy]),
    ("tahini", &[Sesame]),
    ("satay", &[Peanut]),
    ("tempura", &[Gluten, Egg]),
    ("ponzu", &[Soy, Fish]),
    ("katsu", &[Gluten, Egg]),
    ("teriyaki", &[Soy]),
    ("pad_thai", &[Peanut, Egg, Soy]),
    ("green_curry", &[Fish, Shellfish]),
];

/// Cuisine tags and the allergens commonly present in each.
pub const CUISINE_PRIORS: [(&str, &[Allergen]); 6] = [
    ("thai", &[Peanut, Fish, Shellfish, Soy]),
    ("indian", &[Dairy, TreeNut, Mustard, Gluten]),
    ("japanese", &[Soy, Fish, Sesame, Gluten]),
    ("italian", &[Gluten, Dairy, Egg, TreeNut]),
    ("mexican", &[Dairy, Gluten]),
    ("mediterranean", &[Sesame, TreeNut, Dairy]),
];

/// Cross-contact flags and their penalty weights in `0.0..=1.0`.
pub const CROSS_CONTACT_WEIGHTS: [(&str, f64); 9] = [
    ("shared_fryer", 0.25),
    ("bakery", 0.35),
    ("ice_cream_shop", 0.30),
    ("buffet", 0.40),
    ("open_kitchen_nuts", 0.40),
    ("tempura_station", 0.25),
    ("tahini_bar", 0.20),
    ("cheese_station", 0.20),
    ("soy_station", 0.15),
];

/// Allergens implied by a hidden-ingredient keyword.
///
/// # Examples
/// ```
/// use allernav_core::{Allergen, risk};
///
/// assert_eq!(risk::hidden_allergens("tahini"), &[Allergen::Sesame]);
/// assert!(risk::hidden_allergens("rice").is_empty());
/// ```
pub fn hidden_allergens(keyword: &str) -> &'static [Allergen] {
    let key = keyword.trim().to_lowercase();
    lookup(&HIDDEN_INGREDIENTS, &key).unwrap_or(&[])
}

/// Allergens commonly present in a cuisine.
pub fn cuisine_allergens(cuisine: &str) -> &'static [Allergen] {
    let key = cuisine.trim().to_lowercase();
    lookup(&CUISINE_PRIORS, &key).unwrap_or(&[])
}

/// Union of the cuisine priors for every tag in `cuisines`.
pub fn cuisine_prior_set<'a, I>(cuisines: I) -> BTreeSet<Allergen>
where
    I: IntoIterator<Item = &'a String>,
{
    cuisines
        .into_iter()
        .flat_map(|cuisine| cuisine_allergens(cuisine).iter().copied())
        .collect()
}

/// Penalty weight for a single cross-contact flag; unknown flags weigh zero.
pub fn cross_contact_weight(flag: &str) -> f64 {
    let key = flag.trim().to_lowercase();
    lookup(&CROSS_CONTACT_WEIGHTS, &key).unwrap_or(0.0)
}

/// Scan free text for hidden-ingredient keywords.
///
/// Keywords match whole words; underscores in a keyword also match a space
/// (`pad_thai` matches "pad thai"). Returns the union of the implied
/// allergens. The result is informational and never feeds the live score.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use allernav_core::{Allergen, risk};
///
/// let found = risk::hidden_allergens_in("Basil pesto, garlic aioli");
/// assert_eq!(found, BTreeSet::from([Allergen::TreeNut, Allergen::Dairy, Allergen::Egg]));
/// ```
pub fn hidden_allergens_in(text: &str) -> BTreeSet<Allergen> {
    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect();
    HIDDEN_INGREDIENTS
        .iter()
        .filter(|(keyword, _)| contains_phrase(&words, keyword))
        .flat_map(|(_, allergens)| allergens.iter().copied())
        .collect()
}

fn contains_phrase(words: &[String], keyword: &str) -> bool {
    let parts: Vec<&str> = keyword.split('_').collect();
    words
        .windows(parts.len())
        .any(|window| window.iter().zip(&parts).all(|(word, part)| word == part))
}

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}
