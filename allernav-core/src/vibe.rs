//! Venue atmosphere tags used to filter restaurant listings.
//!
//! # Examples
//! ```
//! use allernav_core::VibeTag;
//!
//! assert_eq!(VibeTag::DateNight.as_str(), "date night");
//! assert_eq!("late-night".parse::<VibeTag>(), Ok(VibeTag::LateNight));
//! ```

use crate::ValidationError;

/// A single vibe tag from the fixed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VibeTag {
    /// Quiet and intimate.
    #[cfg_attr(feature = "serde", serde(rename = "date night"))]
    DateNight,
    /// Relaxed, walk-in friendly.
    #[cfg_attr(feature = "serde", serde(rename = "casual"))]
    Casual,
    /// Seating and wifi suited to working.
    #[cfg_attr(feature = "serde", serde(rename = "study spot"))]
    StudySpot,
    /// Suitable for children.
    #[cfg_attr(feature = "serde", serde(rename = "family"))]
    Family,
    /// Serves halal options.
    #[cfg_attr(feature = "serde", serde(rename = "halal-friendly"))]
    HalalFriendly,
    /// Serves vegan options.
    #[cfg_attr(feature = "serde", serde(rename = "vegan-friendly"))]
    VeganFriendly,
    /// Open late.
    #[cfg_attr(feature = "serde", serde(rename = "late-night"))]
    LateNight,
}

impl VibeTag {
    /// Every vibe tag, in vocabulary order.
    pub const ALL: [Self; 7] = [
        Self::DateNight,
        Self::Casual,
        Self::StudySpot,
        Self::Family,
        Self::HalalFriendly,
        Self::VeganFriendly,
        Self::LateNight,
    ];

    /// Return the tag as displayed to diners.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DateNight => "date night",
            Self::Casual => "casual",
            Self::StudySpot => "study spot",
            Self::Family => "family",
            Self::HalalFriendly => "halal-friendly",
            Self::VeganFriendly => "vegan-friendly",
            Self::LateNight => "late-night",
        }
    }
}

impl std::fmt::Display for VibeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VibeTag {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|vibe| vibe.as_str() == tag)
            .ok_or_else(|| ValidationError::UnknownVibe { raw: s.to_owned() })
    }
}
