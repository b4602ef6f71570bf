//! Request-time assessment of dishes and restaurants against the vote ledger.

use std::collections::{BTreeSet, HashMap};

use allernav_core::{
    Allergen, AllergyProfile, Dish, DishScorer, Restaurant, VoteLedger, VoteTally, risk,
    round_score, sanitise,
};
use log::debug;

use crate::{
    DishScoreBreakdown, HeuristicScorer, SafetyBand, ScoringPolicy, TrustEstimate,
    aggregate_restaurant, estimate_trust,
};

/// Scored view of one dish.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DishAssessment {
    /// Dish identifier.
    pub dish_id: String,
    /// Display name.
    pub name: String,
    /// Dish score in `0.0..=1.0`.
    pub score: f64,
    /// Badge for the score.
    pub band: SafetyBand,
    /// Community votes for the dish.
    pub votes: VoteTally,
    /// Allergens implied by hidden-ingredient keywords in the description.
    pub hidden_allergens: BTreeSet<Allergen>,
}

/// Scored view of one restaurant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RestaurantAssessment {
    /// Restaurant identifier.
    pub restaurant_id: String,
    /// Display name.
    pub name: String,
    /// City the restaurant is listed in.
    pub city: String,
    /// Aggregate score before the profile's sensitivity is applied.
    pub raw_score: f64,
    /// Aggregate score scaled by the profile's sensitivity.
    pub adjusted_score: f64,
    /// Band of the adjusted score.
    pub band: SafetyBand,
    /// Trust estimate, reported separately from safety.
    pub trust: TrustEstimate,
}

/// Scores dishes and restaurants, reading community votes from a ledger.
///
/// Scoring itself is total; the only failures are ledger read errors, which
/// surface as `L::Error`.
///
/// # Examples
/// ```
/// use allernav_core::{Allergen, AllergyProfile, MemoryVoteLedger, ProfileKind, VoteLedger};
/// use allernav_core::test_support::{thai_dishes, thai_palace};
/// use allernav_scorer::SafetyAssessor;
///
/// # fn main() -> Result<(), allernav_core::ValidationError> {
/// let ledger = MemoryVoteLedger::default();
/// ledger.record("thai_1", "thai_1_rice", None, "safe", None)?;
///
/// let assessor = SafetyAssessor::new(&ledger);
/// let profile = AllergyProfile::new()
///     .with_allergen(Allergen::Peanut)
///     .with_kind(ProfileKind::HighlySensitive);
/// let ranked = assessor.rank([&thai_palace()], &thai_dishes(), &profile)?;
/// assert_eq!(ranked.len(), 1);
/// assert!(ranked[0].adjusted_score <= ranked[0].raw_score);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SafetyAssessor<L, S = HeuristicScorer> {
    ledger: L,
    scorer: S,
    policy: ScoringPolicy,
}

impl<L: VoteLedger> SafetyAssessor<L> {
    /// Assess with the default heuristic and policy.
    pub fn new(ledger: L) -> Self {
        Self::with_policy(ledger, ScoringPolicy::default())
    }

    /// Assess with the heuristic scorer configured by `policy`.
    pub const fn with_policy(ledger: L, policy: ScoringPolicy) -> Self {
        Self {
            ledger,
            scorer: HeuristicScorer::new(policy),
            policy,
        }
    }

    /// Compute every term of a dish score for explanation.
    ///
    /// # Errors
    /// Returns the ledger error when the dish tally cannot be read.
    pub fn explain_dish(
        &self,
        restaurant: &Restaurant,
        dish: &Dish,
        profile: &AllergyProfile,
    ) -> Result<DishScoreBreakdown, L::Error> {
        let votes = self.ledger.tally(&restaurant.id, Some(&dish.id))?;
        Ok(self.scorer.breakdown(restaurant, dish, profile, &votes))
    }
}

impl<L: VoteLedger, S: DishScorer> SafetyAssessor<L, S> {
    /// Assess with a custom dish scorer. `policy` still drives aggregation
    /// and trust.
    pub const fn with_scorer(ledger: L, scorer: S, policy: ScoringPolicy) -> Self {
        Self {
            ledger,
            scorer,
            policy,
        }
    }

    /// Ledger the assessor reads from.
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Policy in effect for aggregation and trust.
    pub const fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Score one dish using its current vote tally.
    ///
    /// # Errors
    /// Returns the ledger error when the dish tally cannot be read.
    pub fn score_dish(
        &self,
        restaurant: &Restaurant,
        dish: &Dish,
        profile: &AllergyProfile,
    ) -> Result<f64, L::Error> {
        let votes = self.ledger.tally(&restaurant.id, Some(&dish.id))?;
        Ok(self.scorer.score_dish(restaurant, dish, profile, &votes))
    }

    /// Score one dish and attach its band, votes and hidden-ingredient hints.
    ///
    /// # Errors
    /// Returns the ledger error when the dish tally cannot be read.
    pub fn assess_dish(
        &self,
        restaurant: &Restaurant,
        dish: &Dish,
        profile: &AllergyProfile,
    ) -> Result<DishAssessment, L::Error> {
        let votes = self.ledger.tally(&restaurant.id, Some(&dish.id))?;
        let score = self.scorer.score_dish(restaurant, dish, profile, &votes);
        Ok(DishAssessment {
            dish_id: dish.id.clone(),
            name: dish.name.clone(),
            score,
            band: SafetyBand::for_score(score),
            votes,
            hidden_allergens: risk::hidden_allergens_in(&dish.description),
        })
    }

    /// Aggregate a restaurant's dish scores into its raw safety score.
    ///
    /// # Errors
    /// Returns the ledger error when any dish tally cannot be read.
    pub fn score_restaurant<'d, I>(
        &self,
        restaurant: &Restaurant,
        dishes: I,
        profile: &AllergyProfile,
    ) -> Result<f64, L::Error>
    where
        I: IntoIterator<Item = &'d Dish>,
    {
        let scores = dishes
            .into_iter()
            .map(|dish| self.score_dish(restaurant, dish, profile))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(aggregate_restaurant(restaurant, scores, &self.policy))
    }

    /// Estimate trust from every vote recorded for the restaurant.
    ///
    /// # Errors
    /// Returns the ledger error when the restaurant tally cannot be read.
    pub fn estimate_trust(&self, restaurant: &Restaurant) -> Result<TrustEstimate, L::Error> {
        let votes = self.ledger.tally(&restaurant.id, None)?;
        Ok(estimate_trust(restaurant, &votes, &self.policy))
    }

    /// Score a restaurant, scale it by the profile's sensitivity and attach
    /// its band and trust.
    ///
    /// # Errors
    /// Returns the ledger error when any tally cannot be read.
    pub fn assess_restaurant<'d, I>(
        &self,
        restaurant: &Restaurant,
        dishes: I,
        profile: &AllergyProfile,
    ) -> Result<RestaurantAssessment, L::Error>
    where
        I: IntoIterator<Item = &'d Dish>,
    {
        let raw_score = self.score_restaurant(restaurant, dishes, profile)?;
        let adjusted_score = adjust_for_sensitivity(raw_score, profile);
        Ok(RestaurantAssessment {
            restaurant_id: restaurant.id.clone(),
            name: restaurant.name.clone(),
            city: restaurant.city.clone(),
            raw_score,
            adjusted_score,
            band: SafetyBand::for_score(adjusted_score),
            trust: self.estimate_trust(restaurant)?,
        })
    }

    /// Assess every restaurant and sort by adjusted score, best first.
    ///
    /// Each restaurant is paired with the entries of `dishes` carrying its
    /// id. Ties are broken by restaurant id so the order is deterministic.
    ///
    /// # Errors
    /// Returns the first ledger error encountered.
    pub fn rank<'r, I>(
        &self,
        restaurants: I,
        dishes: &[Dish],
        profile: &AllergyProfile,
    ) -> Result<Vec<RestaurantAssessment>, L::Error>
    where
        I: IntoIterator<Item = &'r Restaurant>,
    {
        let mut menus: HashMap<&str, Vec<&Dish>> = HashMap::new();
        for dish in dishes {
            menus.entry(dish.restaurant_id.as_str()).or_default().push(dish);
        }

        let mut ranked = restaurants
            .into_iter()
            .map(|restaurant| {
                let menu = menus
                    .get(restaurant.id.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                self.assess_restaurant(restaurant, menu.iter().copied(), profile)
            })
            .collect::<Result<Vec<_>, _>>()?;
        ranked.sort_by(|left, right| {
            right
                .adjusted_score
                .total_cmp(&left.adjusted_score)
                .then_with(|| left.restaurant_id.cmp(&right.restaurant_id))
        });
        debug!(
            "Ranked {} restaurants for a {} profile",
            ranked.len(),
            profile.kind()
        );
        Ok(ranked)
    }
}

/// Scale a restaurant score by the profile's sensitivity multiplier.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "sensitivity is a multiplicative factor"
)]
pub fn adjust_for_sensitivity(score: f64, profile: &AllergyProfile) -> f64 {
    sanitise(round_score(score * profile.sensitivity()))
}
