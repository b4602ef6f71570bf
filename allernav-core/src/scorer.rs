//! Score dishes for an allergy profile.
//!
//! The `DishScorer` trait assigns a safety score to a [`Dish`] served at a
//! [`Restaurant`] given a diner's [`AllergyProfile`] and the community
//! [`VoteTally`] for the dish.

use crate::{AllergyProfile, Dish, Restaurant, VoteTally};

/// Calculate a safety score for a dish.
///
/// Higher scores indicate a safer dish for the profile. Implementations must
/// be thread-safe (`Send` + `Sync`) and deterministic: the same inputs always
/// yield the same score. The method is infallible.
///
/// Implementations must:
/// - Produce finite (`f64::is_finite`) scores.
/// - Normalise results to the range `0.0..=1.0`.
///
/// Use [`DishScorer::sanitise`] to apply these guards.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use allernav_core::{AllergyProfile, Dish, DishScorer, Restaurant, VoteTally};
///
/// struct Cautious;
///
/// impl DishScorer for Cautious {
///     fn score_dish(
///         &self,
///         _restaurant: &Restaurant,
///         dish: &Dish,
///         profile: &AllergyProfile,
///         _votes: &VoteTally,
///     ) -> f64 {
///         if dish.contains_any(profile.allergens()) { 0.0 } else { 0.5 }
///     }
/// }
///
/// let restaurant = Restaurant::new("r", "R", "City", Coord { x: 0.0, y: 0.0 });
/// let dish = Dish::new("r", "d", "Soup");
/// let (profile, votes) = (AllergyProfile::new(), VoteTally::default());
/// let score = Cautious.score_dish(&restaurant, &dish, &profile, &votes);
/// assert_eq!(score, 0.5);
/// ```
pub trait DishScorer: Send + Sync {
    /// Return a score for `dish` according to `profile` and `votes`.
    fn score_dish(
        &self,
        restaurant: &Restaurant,
        dish: &Dish,
        profile: &AllergyProfile,
        votes: &VoteTally,
    ) -> f64;

    /// Clamp and validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and clamps to `0.0..=1.0`.
    fn sanitise(score: f64) -> f64
    where
        Self: Sized,
    {
        sanitise(score)
    }
}

/// Clamp a value into `0.0..=1.0`, mapping non-finite values to `0.0`.
///
/// # Examples
/// ```
/// use allernav_core::sanitise;
///
/// assert_eq!(sanitise(1.3), 1.0);
/// assert_eq!(sanitise(f64::NAN), 0.0);
/// ```
pub fn sanitise(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// Round a score to two decimal places, halves away from zero.
///
/// # Examples
/// ```
/// use allernav_core::round_score;
///
/// assert_eq!(round_score(0.633_333), 0.63);
/// ```
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(f64::NAN, 0.0)]
    #[case(f64::INFINITY, 0.0)]
    #[case(f64::NEG_INFINITY, 0.0)]
    #[case(-0.1, 0.0)]
    #[case(1.2, 1.0)]
    #[case(0.4, 0.4)]
    fn sanitise_clamps_and_filters(#[case] input: f64, #[case] expected: f64) {
        let result = sanitise(input);
        assert!((0.0..=1.0).contains(&result), "result must be within [0, 1]");
        assert!((result - expected).abs() <= 1e-12);
    }

    #[rstest]
    #[case(0.666_666_7, 0.67)]
    #[case(0.53, 0.53)]
    #[case(0.004_9, 0.0)]
    #[case(0.999_9, 1.0)]
    fn rounds_to_hundredths(#[case] input: f64, #[case] expected: f64) {
        assert!((round_score(input) - expected).abs() <= 1e-12);
    }
}
