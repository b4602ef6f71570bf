//! Vote ledger selection shared by every subcommand.

use allernav_core::{Vote, VoteLedger, VoteTally};
#[cfg(feature = "store-sqlite")]
use allernav_core::SqliteVoteLedger;
use allernav_data::{CsvVoteLedger, LEDGER_FILE};
use camino::{Utf8Path, Utf8PathBuf};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::CliError;

/// File name of the SQLite ledger inside a data directory.
pub(crate) const SQLITE_LEDGER_FILE: &str = "votes.db";

/// Storage used for community votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LedgerBackend {
    /// Append-only `feedback.csv`.
    #[default]
    Csv,
    /// Transactional `votes.db`.
    Sqlite,
}

impl LedgerBackend {
    /// Ledger location used when no explicit path is configured.
    pub(crate) fn default_path(self, data_dir: &Utf8Path) -> Utf8PathBuf {
        match self {
            Self::Csv => data_dir.join(LEDGER_FILE),
            Self::Sqlite => data_dir.join(SQLITE_LEDGER_FILE),
        }
    }
}

/// Resolved ledger settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LedgerConfig {
    pub(crate) backend: LedgerBackend,
    pub(crate) path: Utf8PathBuf,
}

impl LedgerConfig {
    pub(crate) fn resolve(
        backend: Option<LedgerBackend>,
        path: Option<Utf8PathBuf>,
        data_dir: &Utf8Path,
    ) -> Self {
        let backend = backend.unwrap_or_default();
        let path = path.unwrap_or_else(|| backend.default_path(data_dir));
        Self { backend, path }
    }

    /// Open the configured ledger.
    pub(crate) fn open(&self) -> Result<Ledger, CliError> {
        match self.backend {
            LedgerBackend::Csv => Ok(Ledger::Csv(CsvVoteLedger::new(&self.path))),
            #[cfg(feature = "store-sqlite")]
            LedgerBackend::Sqlite => {
                allernav_fs::ensure_parent_dir(&self.path).map_err(|source| {
                    CliError::InspectSourcePath {
                        field: crate::ARG_LEDGER_PATH,
                        path: self.path.clone(),
                        source,
                    }
                })?;
                Ok(Ledger::Sqlite(SqliteVoteLedger::open(self.path.as_std_path())?))
            }
            #[cfg(not(feature = "store-sqlite"))]
            LedgerBackend::Sqlite => Err(CliError::MissingFeature {
                feature: "store-sqlite",
                action: "the SQLite vote ledger",
            }),
        }
    }
}

/// Either ledger backend behind one [`VoteLedger`] implementation.
#[derive(Debug)]
pub(crate) enum Ledger {
    Csv(CsvVoteLedger),
    #[cfg(feature = "store-sqlite")]
    Sqlite(SqliteVoteLedger),
}

impl VoteLedger for Ledger {
    type Error = CliError;

    fn append(&self, vote: &Vote) -> Result<(), Self::Error> {
        match self {
            Self::Csv(ledger) => ledger.append(vote).map_err(CliError::from),
            #[cfg(feature = "store-sqlite")]
            Self::Sqlite(ledger) => ledger.append(vote).map_err(CliError::from),
        }
    }

    fn tally(&self, restaurant_id: &str, dish_id: Option<&str>) -> Result<VoteTally, Self::Error> {
        match self {
            Self::Csv(ledger) => ledger.tally(restaurant_id, dish_id).map_err(CliError::from),
            #[cfg(feature = "store-sqlite")]
            Self::Sqlite(ledger) => ledger.tally(restaurant_id, dish_id).map_err(CliError::from),
        }
    }
}
