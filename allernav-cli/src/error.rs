//! Error types emitted by the AllerNav CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the ledger adapter uses it as its error type.

use std::sync::Arc;

use allernav_core::ValidationError;
#[cfg(feature = "store-sqlite")]
use allernav_core::SqliteLedgerError;
use allernav_data::{CsvLedgerError, DatasetError};
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the AllerNav CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// An option held a value outside its vocabulary.
    #[error("invalid --{field}: {source}")]
    InvalidOption {
        field: &'static str,
        #[source]
        source: ValidationError,
    },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        feature: &'static str,
        action: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Loading the restaurant catalogue failed.
    #[error("failed to load restaurant catalogue: {0}")]
    LoadDataset(#[from] DatasetError),
    /// No restaurant carries the requested id.
    #[error("no restaurant with id {id:?}")]
    UnknownRestaurant { id: String },
    /// The restaurant does not serve the requested dish.
    #[error("restaurant {restaurant:?} has no dish with id {dish:?}")]
    UnknownDish { restaurant: String, dish: String },
    /// The submitted vote failed validation.
    #[error("invalid vote: {0}")]
    InvalidVote(#[from] ValidationError),
    /// The CSV vote ledger failed.
    #[error(transparent)]
    CsvLedger(#[from] CsvLedgerError),
    /// The SQLite vote ledger failed.
    #[cfg(feature = "store-sqlite")]
    #[error(transparent)]
    SqliteLedger(#[from] SqliteLedgerError),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
