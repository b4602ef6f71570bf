//! Tabular data access for the AllerNav engine.
//!
//! Responsibilities:
//! - Load the restaurant and dish catalogue from CSV into typed records.
//! - Persist community votes in an append-only CSV ledger.
//!
//! Boundaries:
//! - Do not encode scoring rules (live in `allernav-scorer`).
//! - Parse rows once at the loading boundary; downstream code never sees raw
//!   text.
//!
//! Invariants:
//! - Malformed cells are replaced by defaults and logged, never propagated.
//! - Ledger appends are serialised and written as whole records.

mod dataset;
mod ledger;
mod records;

pub use dataset::{DISHES_FILE, Dataset, DatasetError, RESTAURANTS_FILE};
pub use ledger::{CsvLedgerError, CsvVoteLedger, LEDGER_FILE, LEDGER_HEADER};
