//! Vote command implementation for the AllerNav CLI.

use std::io::Write;

use allernav_core::{VoteChoice, VoteLedger, VoteTally};
use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::inputs::load_catalogue;
use crate::ledger::{LedgerBackend, LedgerConfig};
use crate::output::write_json;
use crate::{
    ARG_CHOICE, ARG_COMMENT, ARG_DATA_DIR, ARG_DISH, ARG_EMAIL, ARG_LEDGER, ARG_LEDGER_PATH,
    ARG_RESTAURANT, CliError, DEFAULT_DATA_DIR, ENV_VOTE_CHOICE, ENV_VOTE_DISH,
    ENV_VOTE_RESTAURANT,
};

/// CLI arguments for the `vote` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Record whether a dish was safe, caused a mild reaction or \
                 should be avoided. Votes are appended to the ledger and feed \
                 future dish scores and restaurant trust.",
    about = "Record a community vote for a dish"
)]
#[ortho_config(prefix = "ALLERNAV")]
pub(crate) struct VoteArgs {
    /// Restaurant identifier.
    #[arg(long = ARG_RESTAURANT, value_name = "id")]
    #[serde(default)]
    pub(crate) restaurant: Option<String>,
    /// Dish identifier.
    #[arg(long = ARG_DISH, value_name = "id")]
    #[serde(default)]
    pub(crate) dish: Option<String>,
    /// One of safe, mild or avoid.
    #[arg(long = ARG_CHOICE, value_name = "choice")]
    #[serde(default)]
    pub(crate) choice: Option<String>,
    /// Optional voter e-mail.
    #[arg(long = ARG_EMAIL, value_name = "address")]
    #[serde(default)]
    pub(crate) email: Option<String>,
    /// Optional free-text comment.
    #[arg(long = ARG_COMMENT, value_name = "text")]
    #[serde(default)]
    pub(crate) comment: Option<String>,
    /// Directory holding the catalogue and the default ledger.
    #[arg(long = ARG_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// Vote ledger backend to append to.
    #[arg(long = ARG_LEDGER, value_enum)]
    #[serde(default)]
    pub(crate) ledger: Option<LedgerBackend>,
    /// Ledger file location (defaults to a file inside the data directory).
    #[arg(long = ARG_LEDGER_PATH, value_name = "path")]
    #[serde(default)]
    pub(crate) ledger_path: Option<Utf8PathBuf>,
}

impl VoteArgs {
    pub(crate) fn into_config(self) -> Result<VoteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        VoteConfig::try_from(merged)
    }
}

/// Resolved `vote` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VoteConfig {
    pub(crate) restaurant: String,
    pub(crate) dish: String,
    pub(crate) choice: String,
    pub(crate) email: Option<String>,
    pub(crate) comment: Option<String>,
    pub(crate) data_dir: Utf8PathBuf,
    pub(crate) ledger: LedgerConfig,
}

fn required(
    value: Option<String>,
    field: &'static str,
    env: &'static str,
) -> Result<String, CliError> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|raw| !raw.is_empty())
        .ok_or(CliError::MissingArgument { field, env })
}

impl TryFrom<VoteArgs> for VoteConfig {
    type Error = CliError;

    fn try_from(args: VoteArgs) -> Result<Self, Self::Error> {
        let restaurant = required(args.restaurant, ARG_RESTAURANT, ENV_VOTE_RESTAURANT)?;
        let dish = required(args.dish, ARG_DISH, ENV_VOTE_DISH)?;
        let choice = required(args.choice, ARG_CHOICE, ENV_VOTE_CHOICE)?;
        let data_dir = args
            .data_dir
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATA_DIR));
        let ledger = LedgerConfig::resolve(args.ledger, args.ledger_path, &data_dir);
        Ok(Self {
            restaurant,
            dish,
            choice,
            email: args.email,
            comment: args.comment,
            data_dir,
            ledger,
        })
    }
}

/// JSON report printed by `vote`.
#[derive(Debug, Serialize)]
pub(crate) struct VoteReport {
    pub(crate) restaurant_id: String,
    pub(crate) dish_id: String,
    pub(crate) choice: VoteChoice,
    /// Dish tally including the new vote.
    pub(crate) tally: VoteTally,
}

pub(super) fn run_vote(args: VoteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_vote_with(args, &mut stdout)
}

pub(super) fn run_vote_with(args: VoteArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    let report = execute_vote(&config)?;
    write_json(writer, &report)
}

pub(crate) fn execute_vote(config: &VoteConfig) -> Result<VoteReport, CliError> {
    let dataset = load_catalogue(&config.data_dir)?;
    let restaurant =
        dataset
            .restaurant(&config.restaurant)
            .ok_or_else(|| CliError::UnknownRestaurant {
                id: config.restaurant.clone(),
            })?;
    if !dataset
        .dishes_for(&restaurant.id)
        .any(|dish| dish.id == config.dish)
    {
        return Err(CliError::UnknownDish {
            restaurant: restaurant.id.clone(),
            dish: config.dish.clone(),
        });
    }

    let ledger = config.ledger.open()?;
    let vote = ledger.record(
        &restaurant.id,
        &config.dish,
        config.email.as_deref(),
        &config.choice,
        config.comment.as_deref(),
    )?;
    info!(
        "Recorded {} vote for {}/{} in {}",
        vote.choice, vote.restaurant_id, vote.dish_id, config.ledger.path
    );
    let tally = ledger.tally(&vote.restaurant_id, Some(&vote.dish_id))?;
    Ok(VoteReport {
        restaurant_id: vote.restaurant_id,
        dish_id: vote.dish_id,
        choice: vote.choice,
        tally,
    })
}
