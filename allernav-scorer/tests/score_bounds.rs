//! Property tests for the bounds of every scoring term.
#![expect(clippy::float_arithmetic, reason = "properties compare floats")]

use allernav_core::{
    Allergen, AllergyProfile, Dish, DishScorer, Restaurant, VoteTally, risk::CROSS_CONTACT_WEIGHTS,
};
use allernav_scorer::{
    HeuristicScorer, ScoringPolicy, aggregate_restaurant, community_adjustment,
    cross_contact_penalty, estimate_trust,
};
use geo::Coord;
use proptest::prelude::*;
use proptest::sample::subsequence;

const TOLERANCE: f64 = 1e-12;

fn venue(flags: &[&str], cuisines: &[&str], verified: f64) -> Restaurant {
    let base = Restaurant::new("r", "R", "City", Coord { x: 0.0, y: 0.0 })
        .with_verified_score(verified);
    let flagged = flags
        .iter()
        .fold(base, |venue, flag| venue.with_cross_contact(flag));
    cuisines
        .iter()
        .fold(flagged, |venue, cuisine| venue.with_cuisine(cuisine))
}

fn flag_names() -> Vec<&'static str> {
    CROSS_CONTACT_WEIGHTS.iter().map(|(name, _)| *name).collect()
}

fn allergen_set() -> impl Strategy<Value = Vec<Allergen>> {
    subsequence(Allergen::ALL.to_vec(), 0..=Allergen::ALL.len())
}

fn tally() -> impl Strategy<Value = VoteTally> {
    (0_u32..200, 0_u32..200, 0_u32..200).prop_map(|(safe, mild, avoid)| VoteTally {
        safe,
        mild,
        avoid,
        comments: Vec::new(),
    })
}

proptest! {
    #[test]
    fn dish_scores_stay_in_unit_interval(
        flags in subsequence(flag_names(), 0..=9),
        cuisines in subsequence(
            vec!["thai", "indian", "japanese", "italian", "mexican", "mediterranean", "fusion"],
            0..=3,
        ),
        inferred in allergen_set(),
        avoided in allergen_set(),
        confidence in -1.0_f64..2.0,
        votes in tally(),
    ) {
        let restaurant = venue(&flags, &cuisines, 0.5);
        let dish = inferred
            .iter()
            .fold(Dish::new("r", "d", "Dish"), |dish, allergen| dish.with_allergen(*allergen))
            .with_confidence(confidence);
        let profile = avoided
            .iter()
            .fold(AllergyProfile::new(), |profile, allergen| profile.with_allergen(*allergen));

        let score = HeuristicScorer::default().score_dish(&restaurant, &dish, &profile, &votes);
        prop_assert!((0.0..=1.0).contains(&score));
        let again = HeuristicScorer::default().score_dish(&restaurant, &dish, &profile, &votes);
        prop_assert!((score - again).abs() <= TOLERANCE);
    }

    #[test]
    fn cross_contact_penalty_is_monotone_and_capped(
        flags in subsequence(flag_names(), 0..=9),
        extra in proptest::sample::select(flag_names()),
    ) {
        let without = cross_contact_penalty(&venue(&flags, &[], 0.0), 0.6);
        let mut more = flags.clone();
        more.push(extra);
        let with = cross_contact_penalty(&venue(&more, &[], 0.0), 0.6);
        prop_assert!(without <= with + TOLERANCE);
        prop_assert!(with <= 0.6);
    }

    #[test]
    fn community_adjustment_is_bounded(votes in tally()) {
        prop_assert!(community_adjustment(&votes, 0.3).abs() <= 0.3);
    }

    #[test]
    fn restaurant_and_trust_stay_in_unit_interval(
        dish_scores in proptest::collection::vec(-0.5_f64..1.5, 0..12),
        verified in 0.0_f64..=1.0,
        votes in tally(),
    ) {
        let restaurant = venue(&[], &[], verified);
        let policy = ScoringPolicy::default();
        let score = aggregate_restaurant(&restaurant, dish_scores, &policy);
        prop_assert!((0.0..=1.0).contains(&score));
        let trust = estimate_trust(&restaurant, &votes, &policy);
        prop_assert!((0.0..=1.0).contains(&trust.trust));
    }
}
