//! Shared test harness modules for the AllerNav CLI.

use super::*;

mod helpers;
mod steps;
