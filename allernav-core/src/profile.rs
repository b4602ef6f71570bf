//! Allergy profiles: the allergens a diner avoids and how cautious to be.
//!
//! Profiles live only for the duration of a scoring request. Unknown allergen
//! tags supplied by a caller are skipped rather than rejected, so a stale or
//! misspelt tag never matches anything.

use std::collections::BTreeSet;

use log::warn;

use crate::{Allergen, ValidationError};

/// Diner category controlling how conservatively restaurant scores are
/// displayed.
///
/// # Examples
/// ```
/// use allernav_core::ProfileKind;
///
/// let kind: ProfileKind = "highly-sensitive".parse().unwrap();
/// assert_eq!(kind.sensitivity(), 0.75);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ProfileKind {
    /// A typical diner.
    #[default]
    Standard,
    /// A diner reacting to trace amounts.
    HighlySensitive,
    /// A parent planning a meal for the family.
    Family,
}

impl ProfileKind {
    /// Multiplier in `(0.0, 1.0]` applied to displayed restaurant scores.
    pub const fn sensitivity(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::HighlySensitive => 0.75,
            Self::Family => 0.85,
        }
    }

    /// Return the kind as a kebab-case tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::HighlySensitive => "highly-sensitive",
            Self::Family => "family",
        }
    }
}

impl std::fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProfileKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "highly-sensitive" | "highly_sensitive" | "sensitive" => Ok(Self::HighlySensitive),
            "family" => Ok(Self::Family),
            _ => Err(ValidationError::UnknownProfileKind { raw: s.to_owned() }),
        }
    }
}

/// The allergens a diner avoids, plus their profile kind.
///
/// # Examples
/// ```
/// use allernav_core::{Allergen, AllergyProfile, ProfileKind};
///
/// let profile = AllergyProfile::new()
///     .with_allergen(Allergen::Peanut)
///     .with_allergen(Allergen::Dairy)
///     .with_kind(ProfileKind::Family);
/// assert!(profile.avoids(Allergen::Dairy));
/// assert_eq!(profile.sensitivity(), 0.85);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllergyProfile {
    allergens: BTreeSet<Allergen>,
    kind: ProfileKind,
}

impl AllergyProfile {
    /// Construct an empty standard profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a profile from raw allergen tags, skipping unknown ones.
    ///
    /// # Examples
    /// ```
    /// use allernav_core::{Allergen, AllergyProfile, ProfileKind};
    ///
    /// let profile = AllergyProfile::from_tags(["peanut", "lupin"], ProfileKind::Standard);
    /// assert_eq!(profile.allergens().len(), 1);
    /// assert!(profile.avoids(Allergen::Peanut));
    /// ```
    pub fn from_tags<'a, I>(tags: I, kind: ProfileKind) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let allergens = tags
            .into_iter()
            .filter(|tag| !tag.trim().is_empty())
            .filter_map(|tag| match tag.parse::<Allergen>() {
                Ok(allergen) => Some(allergen),
                Err(err) => {
                    warn!("Ignoring allergy profile tag: {err}");
                    None
                }
            })
            .collect();
        Self { allergens, kind }
    }

    /// Allergens the diner avoids.
    pub const fn allergens(&self) -> &BTreeSet<Allergen> {
        &self.allergens
    }

    /// Report whether the diner avoids `allergen`.
    pub fn avoids(&self, allergen: Allergen) -> bool {
        self.allergens.contains(&allergen)
    }

    /// The diner's profile kind.
    pub const fn kind(&self) -> ProfileKind {
        self.kind
    }

    /// Multiplier applied to displayed restaurant scores.
    pub const fn sensitivity(&self) -> f64 {
        self.kind.sensitivity()
    }

    /// Add an allergen.
    pub fn insert(&mut self, allergen: Allergen) {
        self.allergens.insert(allergen);
    }

    /// Add an allergen while returning `self` for chaining.
    #[must_use]
    pub fn with_allergen(mut self, allergen: Allergen) -> Self {
        self.insert(allergen);
        self
    }

    /// Replace the profile kind while returning `self` for chaining.
    #[must_use]
    pub const fn with_kind(mut self, kind: ProfileKind) -> Self {
        self.kind = kind;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("standard", ProfileKind::Standard)]
    #[case("Highly-Sensitive", ProfileKind::HighlySensitive)]
    #[case("highly_sensitive", ProfileKind::HighlySensitive)]
    #[case("family", ProfileKind::Family)]
    fn parses_profile_kinds(#[case] raw: &str, #[case] expected: ProfileKind) {
        assert_eq!(ProfileKind::from_str(raw), Ok(expected));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(matches!(
            ProfileKind::from_str("toddler"),
            Err(ValidationError::UnknownProfileKind { .. })
        ));
    }

    #[rstest]
    #[case(ProfileKind::Standard)]
    #[case(ProfileKind::HighlySensitive)]
    #[case(ProfileKind::Family)]
    fn sensitivity_is_a_positive_fraction(#[case] kind: ProfileKind) {
        let factor = kind.sensitivity();
        assert!(factor > 0.0 && factor <= 1.0);
    }

    #[test]
    fn from_tags_skips_blank_and_unknown_tags() {
        let profile =
            AllergyProfile::from_tags(["egg", "", "kiwi", "EGG", "soy"], ProfileKind::Family);
        assert_eq!(
            profile.allergens(),
            &BTreeSet::from([Allergen::Egg, Allergen::Soy])
        );
        assert_eq!(profile.kind(), ProfileKind::Family);
    }

    #[test]
    fn empty_profile_avoids_nothing() {
        let profile = AllergyProfile::new();
        assert!(Allergen::ALL.iter().all(|allergen| !profile.avoids(*allergen)));
        assert_eq!(profile.kind(), ProfileKind::Standard);
    }
}
