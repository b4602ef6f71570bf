//! Rank command implementation for the AllerNav CLI.

use std::collections::BTreeSet;
use std::io::Write;

use allernav_core::{Allergen, AllergyProfile, ProfileKind, VibeTag};
use allernav_scorer::{RestaurantAssessment, SafetyAssessor};
use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::inputs::{allergy_profile, load_catalogue, vibe_filter};
use crate::ledger::{LedgerBackend, LedgerConfig};
use crate::output::write_json;
use crate::{
    ARG_ALLERGENS, ARG_CITY, ARG_DATA_DIR, ARG_LEDGER, ARG_LEDGER_PATH, ARG_PROFILE, ARG_VIBES,
    CliError, DEFAULT_DATA_DIR,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score every restaurant in a city for an allergy profile and \
                 list them safest first. Scores already include the profile's \
                 sensitivity multiplier.",
    about = "Rank restaurants for an allergy profile"
)]
#[ortho_config(prefix = "ALLERNAV")]
pub(crate) struct RankArgs {
    /// Directory holding `restaurants.csv` and `dishes.csv`.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Only rank restaurants in this city.
    #[arg(long = ARG_CITY, value_name = "name")]
    #[serde(default)]
    pub(crate) city: Option<String>,
    /// Comma-separated vibe tags; restaurants matching any are kept.
    #[arg(long = ARG_VIBES, value_name = "tags")]
    #[serde(default)]
    pub(crate) vibes: Option<String>,
    /// Comma-separated allergens to avoid (e.g. "peanut,shellfish").
    #[arg(long = ARG_ALLERGENS, value_name = "tags")]
    #[serde(default)]
    pub(crate) allergens: Option<String>,
    /// Profile kind: standard, highly-sensitive or family.
    #[arg(long = ARG_PROFILE, value_name = "kind")]
    #[serde(default)]
    pub(crate) profile: Option<String>,
    /// Vote ledger backend used for community signals.
    #[arg(long = ARG_LEDGER, value_enum)]
    #[serde(default)]
    pub(crate) ledger: Option<LedgerBackend>,
    /// Ledger file location (defaults to a file inside the data directory).
    #[arg(long = ARG_LEDGER_PATH, value_name = "path")]
    #[serde(default)]
    pub(crate) ledger_path: Option<Utf8PathBuf>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) city: Option<String>,
    pub(crate) vibes: BTreeSet<VibeTag>,
    pub(crate) profile: AllergyProfile,
    pub(crate) ledger: LedgerConfig,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let data_dir = args
            .data_dir
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATA_DIR));
        let city = args
            .city
            .map(|city| city.trim().to_owned())
            .filter(|city| !city.is_empty());
        let vibes = vibe_filter(args.vibes.as_deref())?;
        let profile = allergy_profile(args.allergens.as_deref(), args.profile.as_deref())?;
        let ledger = LedgerConfig::resolve(args.ledger, args.ledger_path, &data_dir);
        Ok(Self {
            data_dir,
            city,
            vibes,
            profile,
            ledger,
        })
    }
}

/// JSON report printed by `rank`.
#[derive(Debug, Serialize)]
pub(crate) struct RankReport {
    pub(crate) city: Option<String>,
    pub(crate) profile: ProfileKind,
    pub(crate) allergens: BTreeSet<Allergen>,
    pub(crate) restaurants: Vec<RestaurantAssessment>,
}

pub(super) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, &mut stdout)
}

pub(super) fn run_rank_with(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_rank(&config)?;
    write_json(writer, &report)
}

pub(crate) fn execute_rank(config: &RankConfig) -> Result<RankReport, CliError> {
    let dataset = load_catalogue(&config.data_dir)?;
    let assessor = SafetyAssessor::new(config.ledger.open()?);
    let selection = dataset.select(config.city.as_deref(), &config.vibes);
    let restaurants = assessor.rank(selection, dataset.dishes(), &config.profile)?;
    info!(
        "Ranked {} restaurants from {}",
        restaurants.len(),
        config.data_dir
    );
    Ok(RankReport {
        city: config.city.clone(),
        profile: config.profile.kind(),
        allergens: config.profile.allergens().clone(),
        restaurants,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
