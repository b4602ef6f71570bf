//! The fixed allergen vocabulary.
//!
//! Every allergen tag used by the engine (dish annotations, diner profiles,
//! cuisine priors) is one of these variants. Parsing is the only place an
//! unknown tag can appear; callers decide whether to reject it or skip it.
//!
//! # Examples
//! ```
//! use allernav_core::Allergen;
//!
//! assert_eq!(Allergen::TreeNut.as_str(), "tree_nut");
//! assert_eq!("sesame".parse::<Allergen>(), Ok(Allergen::Sesame));
//! ```

use crate::ValidationError;

/// A single allergen from the fixed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Allergen {
    /// Peanuts and groundnut derivatives.
    Peanut,
    /// Almonds, cashews, walnuts and other tree nuts.
    TreeNut,
    /// Milk and milk products.
    Dairy,
    /// Eggs.
    Egg,
    /// Wheat, barley, rye.
    Gluten,
    /// Soybeans.
    Soy,
    /// Finfish.
    Fish,
    /// Crustaceans and molluscs.
    Shellfish,
    /// Sesame seeds and oil.
    Sesame,
    /// Mustard seed.
    Mustard,
}

impl Allergen {
    /// Every allergen, in vocabulary order.
    pub const ALL: [Self; 10] = [
        Self::Peanut,
        Self::TreeNut,
        Self::Dairy,
        Self::Egg,
        Self::Gluten,
        Self::Soy,
        Self::Fish,
        Self::Shellfish,
        Self::Sesame,
        Self::Mustard,
    ];

    /// Return the allergen as its canonical tag.
    ///
    /// # Examples
    /// ```
    /// use allernav_core::Allergen;
    ///
    /// assert_eq!(Allergen::Shellfish.as_str(), "shellfish");
    /// ```
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Peanut => "peanut",
            Self::TreeNut => "tree_nut",
            Self::Dairy => "dairy",
            Self::Egg => "egg",
            Self::Gluten => "gluten",
            Self::Soy => "soy",
            Self::Fish => "fish",
            Self::Shellfish => "shellfish",
            Self::Sesame => "sesame",
            Self::Mustard => "mustard",
        }
    }
}

impl std::fmt::Display for Allergen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Allergen {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|allergen| allergen.as_str() == tag)
            .ok_or_else(|| ValidationError::UnknownAllergen {
                raw: s.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[test]
    fn display_matches_as_str() {
        assert_eq!(Allergen::TreeNut.to_string(), Allergen::TreeNut.as_str());
    }

    #[rstest]
    #[case("peanut", Allergen::Peanut)]
    #[case(" Dairy ", Allergen::Dairy)]
    #[case("TREE_NUT", Allergen::TreeNut)]
    fn parses_known_tags(#[case] raw: &str, #[case] expected: Allergen) {
        assert_eq!(Allergen::from_str(raw), Ok(expected));
    }

    #[rstest]
    #[case("tree nut")]
    #[case("lupin")]
    #[case("")]
    fn rejects_unknown_tags(#[case] raw: &str) {
        let err = Allergen::from_str(raw).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownAllergen { .. }));
    }
}
