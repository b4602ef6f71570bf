use std::collections::BTreeSet;

use crate::{Allergen, scorer::sanitise};

/// A menu item belonging to a [`Restaurant`](crate::Restaurant).
///
/// `inferred_allergens` holds the allergens an upstream extraction step
/// believes the dish contains, and `confidence` how well-attested that
/// extraction is.
///
/// # Examples
/// ```
/// use allernav_core::{Allergen, Dish};
///
/// let dish = Dish::new("thai_1", "thai_1_pad", "Pad Thai")
///     .with_allergen(Allergen::Peanut)
///     .with_confidence(0.9);
/// assert!(dish.contains_any(&[Allergen::Peanut].into()));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dish {
    /// Parent restaurant identifier.
    pub restaurant_id: String,
    /// Identifier, unique within the restaurant.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text ingredient description.
    pub description: String,
    /// Allergens the dish is believed to contain.
    pub inferred_allergens: BTreeSet<Allergen>,
    /// Why the allergens were inferred.
    pub inference_reason: String,
    confidence: f64,
}

impl Dish {
    /// Construct a dish with no allergens and zero confidence.
    pub fn new(
        restaurant_id: impl Into<String>,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            id: id.into(),
            name: name.into(),
            description: String::new(),
            inferred_allergens: BTreeSet::new(),
            inference_reason: String::new(),
            confidence: 0.0,
        }
    }

    /// Extraction confidence within `0.0..=1.0`.
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Set the extraction confidence, clamping into `0.0..=1.0`.
    pub fn set_confidence(&mut self, confidence: f64) {
        self.confidence = sanitise(confidence);
    }

    /// Set the extraction confidence while returning `self` for chaining.
    #[must_use]
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.set_confidence(confidence);
        self
    }

    /// Add an inferred allergen.
    #[must_use]
    pub fn with_allergen(mut self, allergen: Allergen) -> Self {
        self.inferred_allergens.insert(allergen);
        self
    }

    /// Set the ingredient description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the inference rationale.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.inference_reason = reason.into();
        self
    }

    /// Report whether any inferred allergen is in `allergens`.
    pub fn contains_any(&self, allergens: &BTreeSet<Allergen>) -> bool {
        !self.inferred_allergens.is_disjoint(allergens)
    }
}
