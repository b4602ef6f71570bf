//! Parsing and validation of the inputs shared by several subcommands.

use std::collections::BTreeSet;

use allernav_core::{AllergyProfile, ProfileKind, VibeTag};
use allernav_data::{DISHES_FILE, Dataset, RESTAURANTS_FILE};
use camino::Utf8Path;

use crate::{ARG_DATA_DIR, ARG_PROFILE, ARG_VIBES, CliError};

/// Split a comma-separated option into trimmed, non-empty items.
pub(crate) fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// Build an allergy profile from `--allergens` and `--profile`.
///
/// Unknown allergen tags are dropped with a warning; an unknown profile kind
/// is an error.
pub(crate) fn allergy_profile(
    allergens: Option<&str>,
    kind: Option<&str>,
) -> Result<AllergyProfile, CliError> {
    let kind = kind
        .map(str::parse::<ProfileKind>)
        .transpose()
        .map_err(|source| CliError::InvalidOption {
            field: ARG_PROFILE,
            source,
        })?
        .unwrap_or_default();
    Ok(AllergyProfile::from_tags(split_list(allergens), kind))
}

/// Parse `--vibes` into a filter set. An empty set matches every restaurant.
pub(crate) fn vibe_filter(raw: Option<&str>) -> Result<BTreeSet<VibeTag>, CliError> {
    split_list(raw)
        .map(|tag| {
            tag.parse::<VibeTag>()
                .map_err(|source| CliError::InvalidOption {
                    field: ARG_VIBES,
                    source,
                })
        })
        .collect()
}

/// Check that `data_dir` holds both catalogue tables.
pub(crate) fn require_catalogue(data_dir: &Utf8Path) -> Result<(), CliError> {
    for table in [RESTAURANTS_FILE, DISHES_FILE] {
        require_existing(&data_dir.join(table), ARG_DATA_DIR)?;
    }
    Ok(())
}

pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match allernav_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) if path.as_std_path().exists() => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load the catalogue after checking both tables exist.
pub(crate) fn load_catalogue(data_dir: &Utf8Path) -> Result<Dataset, CliError> {
    require_catalogue(data_dir)?;
    Ok(Dataset::load(data_dir)?)
}
