//! Behaviour-driven step definitions driving the CLI scenarios.

use super::helpers::CatalogueDir;
use super::*;
use crate::rank::{RankConfig, RankReport, execute_rank};
use crate::vote::{VoteConfig, execute_vote};
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use tempfile::TempDir;

/// Aggregates CLI scenario state so each step only needs a single world
/// argument.
#[derive(Default)]
struct CliWorld {
    catalogue: RefCell<Option<CatalogueDir>>,
    empty_dir: RefCell<Option<TempDir>>,
    result: RefCell<Option<Result<RankReport, CliError>>>,
}

impl CliWorld {
    fn data_dir(&self) -> Utf8PathBuf {
        if let Some(catalogue) = self.catalogue.borrow().as_ref() {
            return catalogue.root().to_path_buf();
        }
        let empty = self.empty_dir.borrow();
        let dir = empty.as_ref().expect("a data directory was prepared");
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace")
    }

    fn report(&self) -> RankReport {
        match self.result.take() {
            Some(Ok(report)) => report,
            Some(Err(err)) => panic!("rank failed: {err}"),
            None => panic!("rank was not run"),
        }
    }
}

#[fixture]
fn world() -> CliWorld {
    CliWorld::default()
}

fn unquote(raw: &str) -> String {
    raw.trim_matches('"').to_owned()
}

#[given("a restaurant catalogue on disk")]
fn catalogue_on_disk(#[from(world)] world: &CliWorld) {
    world.catalogue.replace(Some(CatalogueDir::new()));
}

#[given("an empty data directory")]
fn empty_data_dir(#[from(world)] world: &CliWorld) {
    world
        .empty_dir
        .replace(Some(TempDir::new().expect("tempdir")));
}

#[when("a diner votes {choice} for dish {dish} at {restaurant}")]
fn diner_votes(#[from(world)] world: &CliWorld, choice: String, dish: String, restaurant: String) {
    let args = VoteArgs {
        restaurant: Some(unquote(&restaurant)),
        dish: Some(unquote(&dish)),
        choice: Some(unquote(&choice)),
        data_dir: Some(world.data_dir()),
        ..VoteArgs::default()
    };
    execute_vote(&VoteConfig::try_from(args).expect("config")).expect("vote recorded");
}

#[when("I rank restaurants in {city}")]
fn rank_city(#[from(world)] world: &CliWorld, city: String) {
    let args = RankArgs {
        city: Some(unquote(&city)),
        data_dir: Some(world.data_dir()),
        ..RankArgs::default()
    };
    let config = RankConfig::try_from(args).expect("config");
    world.result.replace(Some(execute_rank(&config)));
}

#[then("the ranking lists {count} restaurants")]
fn ranking_lists(#[from(world)] world: &CliWorld, count: usize) {
    let report = world.report();
    assert_eq!(report.restaurants.len(), count);
    world.result.replace(Some(Ok(report)));
}

#[then("restaurant {id} reports {votes} community vote")]
fn reports_votes(#[from(world)] world: &CliWorld, id: String, votes: u32) {
    let report = world.report();
    let id = unquote(&id);
    let entry = report
        .restaurants
        .iter()
        .find(|entry| entry.restaurant_id == id)
        .expect("restaurant ranked");
    assert_eq!(entry.trust.total_votes, votes);
}

#[then("the command fails because a catalogue table is missing")]
fn fails_missing_table(#[from(world)] world: &CliWorld) {
    match world.result.take() {
        Some(Err(CliError::MissingSourceFile { field, .. })) => assert_eq!(field, ARG_DATA_DIR),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[scenario(path = "tests/features/cli.feature", index = 0)]
fn vote_then_rank(world: CliWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/cli.feature", index = 1)]
fn rank_without_catalogue(world: CliWorld) {
    let _ = world;
}
