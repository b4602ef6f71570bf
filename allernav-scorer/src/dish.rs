//! Heuristic dish scoring.
//!
//! A dish score is the sum of five terms:
//!
//! 1. an ingredient base of `1.0`, or `0.0` when the dish's inferred
//!    allergens intersect the profile;
//! 2. minus the venue's cross-contact penalty;
//! 3. minus a flat cuisine penalty when a cuisine prior intersects the
//!    profile;
//! 4. plus an extraction confidence bonus;
//! 5. plus a bounded community adjustment from the dish's vote tally.
//!
//! The sum is rounded to two decimals and clamped into `0.0..=1.0`.

use allernav_core::{
    AllergyProfile, Dish, DishScorer, Restaurant, VoteTally, risk, round_score, sanitise,
};

use crate::ScoringPolicy;

/// The individual terms of a dish score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DishScoreBreakdown {
    /// `1.0` when no inferred allergen matches the profile, else `0.0`.
    pub base: f64,
    /// Cross-contact penalty, subtracted.
    pub cross_contact: f64,
    /// Cuisine prior penalty, subtracted.
    pub cuisine: f64,
    /// Confidence bonus, added.
    pub confidence: f64,
    /// Community adjustment, added; may be negative.
    pub community: f64,
    /// Final rounded and clamped score.
    pub score: f64,
}

/// Summed cross-contact weight for a venue, capped at `cap`.
///
/// The penalty never decreases as flags are added.
///
/// # Examples
/// ```
/// use allernav_core::Restaurant;
/// use allernav_scorer::cross_contact_penalty;
/// # use geo::Coord;
///
/// let venue = Restaurant::new("r", "R", "City", Coord { x: 0.0, y: 0.0 })
///     .with_cross_contact("buffet")
///     .with_cross_contact("open_kitchen_nuts");
/// assert_eq!(cross_contact_penalty(&venue, 0.6), 0.6);
/// ```
#[must_use]
pub fn cross_contact_penalty(restaurant: &Restaurant, cap: f64) -> f64 {
    let total: f64 = restaurant
        .cross_contact
        .iter()
        .map(|flag| risk::cross_contact_weight(flag))
        .sum();
    total.min(cap)
}

/// Flat `penalty` when any cuisine prior of the venue intersects the profile.
#[must_use]
pub fn cuisine_penalty(restaurant: &Restaurant, profile: &AllergyProfile, penalty: f64) -> f64 {
    let priors = risk::cuisine_prior_set(&restaurant.cuisines);
    if priors.iter().any(|allergen| profile.avoids(*allergen)) {
        penalty
    } else {
        0.0
    }
}

/// Extraction confidence scaled by `weight`.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "confidence is scaled by a weight")]
pub fn confidence_bonus(dish: &Dish, weight: f64) -> f64 {
    dish.confidence() * weight
}

/// Net community sentiment for a dish, clamped to `-bound..=bound`.
///
/// Computed as `(safe - avoid) / (safe + avoid + 1)`; `mild` votes do not
/// contribute.
///
/// # Examples
/// ```
/// use allernav_core::{VoteChoice, VoteTally};
/// use allernav_scorer::community_adjustment;
///
/// let mut tally = VoteTally::default();
/// tally.count(VoteChoice::Avoid);
/// assert_eq!(community_adjustment(&tally, 0.3), -0.3);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "community sentiment is a bounded ratio"
)]
pub fn community_adjustment(votes: &VoteTally, bound: f64) -> f64 {
    let safe = f64::from(votes.safe);
    let avoid = f64::from(votes.avoid);
    ((safe - avoid) / (safe + avoid + 1.0)).clamp(-bound, bound)
}

/// [`DishScorer`] implementing the published heuristic.
///
/// # Examples
/// ```
/// use allernav_core::{Allergen, AllergyProfile, Dish, DishScorer, Restaurant, VoteTally};
/// use allernav_scorer::HeuristicScorer;
/// # use geo::Coord;
///
/// let venue = Restaurant::new("r", "R", "City", Coord { x: 0.0, y: 0.0 });
/// let dish = Dish::new("r", "d", "Satay").with_allergen(Allergen::Peanut);
/// let profile = AllergyProfile::new().with_allergen(Allergen::Peanut);
///
/// let votes = VoteTally::default();
/// let score = HeuristicScorer::default().score_dish(&venue, &dish, &profile, &votes);
/// assert_eq!(score, 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeuristicScorer {
    policy: ScoringPolicy,
}

impl HeuristicScorer {
    /// Build a scorer using `policy`.
    #[must_use]
    pub const fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    /// Policy in effect.
    #[must_use]
    pub const fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Compute every term of the dish score.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the dish score is a sum of weighted terms"
    )]
    pub fn breakdown(
        &self,
        restaurant: &Restaurant,
        dish: &Dish,
        profile: &AllergyProfile,
        votes: &VoteTally,
    ) -> DishScoreBreakdown {
        let base = if dish.contains_any(profile.allergens()) {
            0.0
        } else {
            1.0
        };
        let cross_contact = cross_contact_penalty(restaurant, self.policy.cross_contact_cap);
        let cuisine = cuisine_penalty(restaurant, profile, self.policy.cuisine_penalty);
        let confidence = confidence_bonus(dish, self.policy.confidence_weight);
        let community = community_adjustment(votes, self.policy.community_bound);
        let total = base - cross_contact - cuisine + confidence + community;
        DishScoreBreakdown {
            base,
            cross_contact,
            cuisine,
            confidence,
            community,
            score: sanitise(round_score(total)),
        }
    }
}

impl DishScorer for HeuristicScorer {
    fn score_dish(
        &self,
        restaurant: &Restaurant,
        dish: &Dish,
        profile: &AllergyProfile,
        votes: &VoteTally,
    ) -> f64 {
        self.breakdown(restaurant, dish, profile, votes).score
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::float_arithmetic, reason = "tests compare floats with a tolerance")]

    use super::*;
    use allernav_core::{Allergen, VoteChoice, test_support::thai_palace};
    use geo::Coord;
    use rstest::{fixture, rstest};

    const TOLERANCE: f64 = 1e-9;

    fn tally(safe: u32, mild: u32, avoid: u32) -> VoteTally {
        VoteTally {
            safe,
            mild,
            avoid,
            comments: Vec::new(),
        }
    }

    #[fixture]
    fn plain_venue() -> Restaurant {
        Restaurant::new("r", "Plain", "City", Coord { x: 0.0, y: 0.0 })
    }

    #[rstest]
    #[case(&[], 0.0)]
    #[case(&["shared_fryer"], 0.25)]
    #[case(&["shared_fryer", "bakery"], 0.6)]
    #[case(&["buffet", "open_kitchen_nuts", "bakery"], 0.6)]
    #[case(&["unknown_flag"], 0.0)]
    fn cross_contact_is_additive_and_capped(
        plain_venue: Restaurant,
        #[case] flags: &[&str],
        #[case] expected: f64,
    ) {
        let venue = flags
            .iter()
            .fold(plain_venue, |venue, flag| venue.with_cross_contact(flag));
        assert!((cross_contact_penalty(&venue, 0.6) - expected).abs() <= TOLERANCE);
    }

    #[rstest]
    #[case(tally(0, 0, 0), 0.0)]
    #[case(tally(1, 0, 0), 0.3)]
    #[case(tally(1, 5, 1), 0.0)]
    #[case(tally(2, 0, 1), 0.25)]
    fn community_adjustment_is_bounded(#[case] votes: VoteTally, #[case] expected: f64) {
        assert!((community_adjustment(&votes, 0.3) - expected).abs() <= TOLERANCE);
    }

    // (0 - 1) / (0 + 1 + 1) = -0.5 clamps to the bound, not half of it.
    #[rstest]
    fn single_avoid_vote_clamps_to_full_bound_not_half() {
        let adjustment = community_adjustment(&tally(0, 0, 1), 0.3);
        assert!((adjustment + 0.3).abs() <= TOLERANCE);
        assert!((adjustment + 0.15).abs() > TOLERANCE);
    }

    #[rstest]
    fn cuisine_penalty_applies_on_prior_overlap() {
        let profile = AllergyProfile::new().with_allergen(Allergen::Shellfish);
        assert!((cuisine_penalty(&thai_palace(), &profile, 0.15) - 0.15).abs() <= TOLERANCE);
        let other = AllergyProfile::new().with_allergen(Allergen::Mustard);
        assert!(cuisine_penalty(&thai_palace(), &other, 0.15).abs() <= TOLERANCE);
    }

    #[rstest]
    fn breakdown_sums_every_term() {
        let dish = Dish::new("thai_1", "rice", "Jasmine Rice").with_confidence(0.8);
        let profile = AllergyProfile::new().with_allergen(Allergen::Peanut);
        let mut votes = VoteTally::default();
        votes.count(VoteChoice::Safe);

        let parts = HeuristicScorer::default().breakdown(&thai_palace(), &dish, &profile, &votes);

        assert!((parts.base - 1.0).abs() <= TOLERANCE);
        assert!((parts.cross_contact - 0.25).abs() <= TOLERANCE);
        assert!((parts.cuisine - 0.15).abs() <= TOLERANCE);
        assert!((parts.confidence - 0.16).abs() <= TOLERANCE);
        assert!((parts.community - 0.3).abs() <= TOLERANCE);
        // 1.0 - 0.25 - 0.15 + 0.16 + 0.3 = 1.06, clamped.
        assert!((parts.score - 1.0).abs() <= TOLERANCE);
    }

    #[rstest]
    fn allergen_hit_pins_base_to_zero(plain_venue: Restaurant) {
        let dish = Dish::new("r", "satay", "Chicken Satay")
            .with_allergen(Allergen::Peanut)
            .with_confidence(1.0);
        let profile = AllergyProfile::new().with_allergen(Allergen::Peanut);
        let parts =
            HeuristicScorer::default().breakdown(&plain_venue, &dish, &profile, &tally(50, 0, 0));
        assert!(parts.base.abs() <= TOLERANCE);
        // 0.0 + 0.2 confidence + 0.3 community.
        assert!((parts.score - 0.5).abs() <= TOLERANCE);
    }

    #[rstest]
    fn heavy_penalties_clamp_at_zero() {
        let venue = thai_palace()
            .with_cross_contact("buffet")
            .with_cross_contact("bakery");
        let dish = Dish::new("thai_1", "pad", "Pad Thai").with_allergen(Allergen::Peanut);
        let profile = AllergyProfile::new().with_allergen(Allergen::Peanut);
        let score =
            HeuristicScorer::default().score_dish(&venue, &dish, &profile, &tally(0, 0, 4));
        assert!(score.abs() <= TOLERANCE);
    }
}
