//! Behaviour tests for restaurant aggregation, trust and ranking.
#![expect(clippy::expect_used, reason = "behaviour tests fail fast on setup errors")]
#![expect(clippy::float_arithmetic, reason = "assertions compare floats with a tolerance")]

use allernav_core::{
    AllergyProfile, Dish, MemoryVoteLedger, ProfileKind, Restaurant, VoteLedger,
    test_support::TableScorer,
};
use allernav_scorer::{RestaurantAssessment, SafetyAssessor, ScoringPolicy, TrustEstimate};
use geo::Coord;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::{Cell, RefCell};

const TOLERANCE: f64 = 1e-9;

/// Shared state for a scenario.
#[derive(Default)]
struct ScoringWorld {
    restaurant: RefCell<Option<Restaurant>>,
    scorer: RefCell<TableScorer>,
    dishes: RefCell<Vec<Dish>>,
    ledger: MemoryVoteLedger,
    profile: RefCell<AllergyProfile>,
    score: Cell<f64>,
    trust: Cell<Option<TrustEstimate>>,
    ranked: RefCell<Vec<RestaurantAssessment>>,
}

impl ScoringWorld {
    fn restaurant(&self) -> Restaurant {
        self.restaurant
            .borrow()
            .clone()
            .expect("restaurant initialised")
    }

    fn assessor(&self) -> SafetyAssessor<&MemoryVoteLedger, TableScorer> {
        SafetyAssessor::with_scorer(
            &self.ledger,
            self.scorer.borrow().clone(),
            ScoringPolicy::default(),
        )
    }
}

#[fixture]
fn world() -> ScoringWorld {
    ScoringWorld::default()
}

#[given("a restaurant with verified score {verified}")]
fn restaurant_with_verified(world: &ScoringWorld, verified: f64) {
    let venue = Restaurant::new("r1", "Test Kitchen", "Springfield", Coord { x: 0.0, y: 0.0 })
        .with_verified_score(verified);
    world.restaurant.replace(Some(venue));
}

#[given("dishes scoring {first}, {second}, {third} and {fourth}")]
fn dishes_scoring(world: &ScoringWorld, first: f64, second: f64, third: f64, fourth: f64) {
    let mut scorer = TableScorer::new(0.0);
    let mut dishes = Vec::new();
    for (index, score) in [first, second, third, fourth].into_iter().enumerate() {
        let id = format!("dish_{index}");
        scorer = scorer.with_score(&id, score);
        dishes.push(Dish::new("r1", id.as_str(), id.as_str()));
    }
    world.scorer.replace(scorer);
    world.dishes.replace(dishes);
}

#[given("{safe} safe votes and {avoid} avoid vote")]
fn votes(world: &ScoringWorld, safe: u32, avoid: u32) {
    let plan = std::iter::repeat_n("safe", usize::try_from(safe).expect("count fits"))
        .chain(std::iter::repeat_n("avoid", usize::try_from(avoid).expect("count fits")));
    for (index, choice) in plan.enumerate() {
        let dish = format!("dish_{index}");
        world
            .ledger
            .record("r1", &dish, None, choice, None)
            .expect("record vote");
    }
}

#[given("a highly sensitive profile")]
fn highly_sensitive(world: &ScoringWorld) {
    world
        .profile
        .replace(AllergyProfile::new().with_kind(ProfileKind::HighlySensitive));
}

#[when("I score the restaurant")]
fn score_restaurant(world: &ScoringWorld) {
    let venue = world.restaurant();
    let dishes = world.dishes.borrow();
    let score = world
        .assessor()
        .score_restaurant(&venue, dishes.iter(), &world.profile.borrow())
        .expect("score restaurant");
    world.score.set(score);
}

#[when("I estimate trust")]
fn estimate_trust(world: &ScoringWorld) {
    let venue = world.restaurant();
    let trust = world.assessor().estimate_trust(&venue).expect("estimate trust");
    world.trust.set(Some(trust));
}

#[when("I rank the restaurant")]
fn rank_restaurant(world: &ScoringWorld) {
    let venue = world.restaurant();
    let ranked = world
        .assessor()
        .rank([&venue], &world.dishes.borrow(), &world.profile.borrow())
        .expect("rank");
    world.ranked.replace(ranked);
}

#[then("the restaurant score is {expected}")]
fn restaurant_score_is(world: &ScoringWorld, expected: f64) {
    assert!((world.score.get() - expected).abs() <= TOLERANCE);
}

#[then("the trust is {expected} from {votes} votes")]
fn trust_is(world: &ScoringWorld, expected: f64, votes: u32) {
    let trust = world.trust.get().expect("trust estimated");
    assert!((trust.trust - expected).abs() <= TOLERANCE);
    assert_eq!(trust.total_votes, votes);
}

#[then("the adjusted score is {expected}")]
fn adjusted_score_is(world: &ScoringWorld, expected: f64) {
    let ranked = world.ranked.borrow();
    let entry = ranked.first().expect("one ranked restaurant");
    assert!((entry.adjusted_score - expected).abs() <= TOLERANCE);
}

#[then("the band is {label}")]
fn band_is(world: &ScoringWorld, label: String) {
    let ranked = world.ranked.borrow();
    let entry = ranked.first().expect("one ranked restaurant");
    assert_eq!(entry.band.label(), label.trim_matches('"'));
}

#[scenario(path = "tests/features/restaurant_scoring.feature", index = 0)]
fn no_dishes_keeps_verified(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/restaurant_scoring.feature", index = 1)]
fn blends_top_three(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/restaurant_scoring.feature", index = 2)]
fn neutral_trust(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/restaurant_scoring.feature", index = 3)]
fn sentiment_trust(world: ScoringWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/restaurant_scoring.feature", index = 4)]
fn sensitive_ranking(world: ScoringWorld) {
    let _ = world;
}
