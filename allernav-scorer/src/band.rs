//! Safety bands used for dish badges and map colours.

/// Scores at or above this value are [`SafetyBand::Safe`].
pub const SAFE_THRESHOLD: f64 = 0.75;
/// Scores at or above this value, and below [`SAFE_THRESHOLD`], are
/// [`SafetyBand::AskStaff`].
pub const CAUTION_THRESHOLD: f64 = 0.45;

/// Coarse classification of a score for display.
///
/// # Examples
/// ```
/// use allernav_scorer::SafetyBand;
///
/// assert_eq!(SafetyBand::for_score(0.75), SafetyBand::Safe);
/// assert_eq!(SafetyBand::for_score(0.5).colour(), "orange");
/// assert_eq!(SafetyBand::for_score(0.1).label(), "Avoid");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SafetyBand {
    /// Likely safe for the profile.
    Safe,
    /// Check with staff before ordering.
    AskStaff,
    /// Avoid.
    Avoid,
}

impl SafetyBand {
    /// Classify a score. Non-finite scores classify as [`SafetyBand::Avoid`].
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score >= SAFE_THRESHOLD {
            Self::Safe
        } else if score >= CAUTION_THRESHOLD {
            Self::AskStaff
        } else {
            Self::Avoid
        }
    }

    /// Badge text shown beside a dish.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::AskStaff => "Ask staff",
            Self::Avoid => "Avoid",
        }
    }

    /// Marker colour used on the map.
    #[must_use]
    pub const fn colour(self) -> &'static str {
        match self {
            Self::Safe => "green",
            Self::AskStaff => "orange",
            Self::Avoid => "red",
        }
    }
}

impl std::fmt::Display for SafetyBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
