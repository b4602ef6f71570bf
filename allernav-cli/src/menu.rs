//! Menu command implementation for the AllerNav CLI.

use std::io::Write;

use allernav_core::{Allergen, AllergyProfile, ProfileKind};
use allernav_scorer::{DishAssessment, DishScoreBreakdown, RestaurantAssessment, SafetyAssessor};
use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::inputs::{allergy_profile, load_catalogue};
use crate::ledger::{LedgerBackend, LedgerConfig};
use crate::output::write_json;
use crate::{
    ARG_ALLERGENS, ARG_DATA_DIR, ARG_LEDGER, ARG_LEDGER_PATH, ARG_PROFILE, ARG_RESTAURANT,
    CliError, DEFAULT_DATA_DIR, ENV_MENU_RESTAURANT,
};

/// CLI arguments for the `menu` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score every dish of one restaurant for an allergy profile, \
                 with safety bands, community vote tallies, the terms behind \
                 each score and hidden-ingredient hints from the description.",
    about = "Explain dish scores for one restaurant"
)]
#[ortho_config(prefix = "ALLERNAV")]
pub(crate) struct MenuArgs {
    /// Restaurant identifier (e.g. "thai_1").
    #[arg(value_name = "id")]
    #[serde(default)]
    pub(crate) restaurant: Option<String>,
    /// Directory holding `restaurants.csv` and `dishes.csv`.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Comma-separated allergens to avoid.
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

impl MenuArgs {
    pub(crate) fn into_config(self) -> Result<MenuConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        MenuConfig::try_from(merged)
    }
}

/// Resolved `menu` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MenuConfig {
    pub(crate) restaurant: String,
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) profile: AllergyProfile,
    pub(crate) ledger: LedgerConfig,
}

impl TryFrom<MenuArgs> for MenuConfig {
    type Error = CliError;

    fn try_from(args: MenuArgs) -> Result<Self, Self::Error> {
        let restaurant = args
            .restaurant
            .map(|id| id.trim().to_owned())
            .filter(|id| !id.is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_RESTAURANT,
                env: ENV_MENU_RESTAURANT,
            })?;
        let data_dir = args
            .data_dir
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATA_DIR));
        let profile = allergy_profile(args.allergens.as_deref(), args.profile.as_deref())?;
        let ledger = LedgerConfig::resolve(args.ledger, args.ledger_path, &data_dir);
        Ok(Self {
            restaurant,
            data_dir,
            profile,
            ledger,
        })
    }
}

/// One dish of the `menu` report.
#[derive(Debug, Serialize)]
pub(crate) struct MenuEntry {
    #[serde(flatten)]
    pub(crate) assessment: DishAssessment,
    pub(crate) breakdown: DishScoreBreakdown,
}

/// JSON report printed by `menu`.
#[derive(Debug, Serialize)]
pub(crate) struct MenuReport {
    pub(crate) profile: ProfileKind,
    pub(crate) allergens: BTreeSet<Allergen>,
    pub(crate) restaurant: RestaurantAssessment,
    pub(crate) dishes: Vec<MenuEntry>,
}

pub(super) fn run_menu(args: MenuArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_menu_with(args, &mut stdout)
}

pub(super) fn run_menu_with(args: MenuArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_menu(&config)?;
    write_json(writer, &report)
}

pub(crate) fn execute_menu(config: &MenuConfig) -> Result<MenuReport, CliError> {
    let dataset = load_catalogue(&config.data_dir)?;
    let restaurant =
        dataset
            .restaurant(&config.restaurant)
            .ok_or_else(|| CliError::UnknownRestaurant {
                id: config.restaurant.clone(),
            })?;
    let assessor = SafetyAssessor::new(config.ledger.open()?);
    let profile = &config.profile;

    let dishes = dataset
        .dishes_for(&restaurant.id)
        .map(|dish| {
            Ok(MenuEntry {
                assessment: assessor.assess_dish(restaurant, dish, profile)?,
                breakdown: assessor.explain_dish(restaurant, dish, profile)?,
            })
        })
        .collect::<Result<Vec<_>, CliError>>()?;
    let summary =
        assessor.assess_restaurant(restaurant, dataset.dishes_for(&restaurant.id), profile)?;

    Ok(MenuReport {
        profile: profile.kind(),
        allergens: profile.allergens().clone(),
        restaurant: summary,
        dishes,
    })
}
