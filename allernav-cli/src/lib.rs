//! Command-line interface for querying and feeding the AllerNav engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod inputs;
mod ledger;
mod menu;
mod output;
mod rank;
mod vote;

pub use error::CliError;

use menu::MenuArgs;
use rank::RankArgs;
use vote::VoteArgs;

pub(crate) const ARG_DATA_DIR: &str = "data-dir";
pub(crate) const ARG_CITY: &str = "city";
pub(crate) const ARG_VIBES: &str = "vibes";
pub(crate) const ARG_ALLERGENS: &str = "allergens";
pub(crate) const ARG_PROFILE: &str = "profile";
pub(crate) const ARG_LEDGER: &str = "ledger";
pub(crate) const ARG_LEDGER_PATH: &str = "ledger-path";
pub(crate) const ARG_RESTAURANT: &str = "restaurant";
pub(crate) const ARG_DISH: &str = "dish";
pub(crate) const ARG_CHOICE: &str = "choice";
pub(crate) const ARG_EMAIL: &str = "email";
pub(crate) const ARG_COMMENT: &str = "comment";
pub(crate) const ENV_MENU_RESTAURANT: &str = "ALLERNAV_CMDS_MENU_RESTAURANT";
pub(crate) const ENV_VOTE_RESTAURANT: &str = "ALLERNAV_CMDS_VOTE_RESTAURANT";
pub(crate) const ENV_VOTE_DISH: &str = "ALLERNAV_CMDS_VOTE_DISH";
pub(crate) const ENV_VOTE_CHOICE: &str = "ALLERNAV_CMDS_VOTE_CHOICE";

/// Directory searched for `restaurants.csv` and `dishes.csv` when
/// `--data-dir` is not given.
pub(crate) const DEFAULT_DATA_DIR: &str = "data";

/// Run the AllerNav CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Rank(args) => rank::run_rank(args),
        Command::Menu(args) => menu::run_menu(args),
        Command::Vote(args) => vote::run_vote(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "allernav",
    about = "Allergy-aware restaurant and dish safety scores",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank restaurants for an allergy profile.
    Rank(RankArgs),
    /// Score every dish of one restaurant.
    Menu(MenuArgs),
    /// Record a community vote for a dish.
    Vote(VoteArgs),
}

#[cfg(test)]
mod tests;
