//! Tunable constants for dish, restaurant and trust scoring.

use thiserror::Error;

/// Errors raised when a [`ScoringPolicy`] holds unusable values.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PolicyError {
    /// A weight or bound was not finite or fell outside `0.0..=1.0`.
    #[error("{field} must be a finite value in 0.0..=1.0, got {value}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// The restaurant aggregate must average at least one dish.
    #[error("top_k must be at least 1")]
    ZeroTopK,
}

/// Numeric constants used by [`HeuristicScorer`](crate::HeuristicScorer),
/// the restaurant aggregate and the trust estimate.
///
/// The [`Default`] reproduces the published scoring rules. Build custom
/// policies with struct update syntax and call [`ScoringPolicy::validate`].
///
/// # Examples
/// ```
/// use allernav_scorer::ScoringPolicy;
///
/// let policy = ScoringPolicy { top_k: 5, ..ScoringPolicy::default() }
///     .validate()
///     .expect("valid policy");
/// assert_eq!(policy.top_k, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoringPolicy {
    /// Upper bound of the summed cross-contact penalty.
    pub cross_contact_cap: f64,
    /// Flat penalty when a cuisine prior intersects the profile.
    pub cuisine_penalty: f64,
    /// Multiplier applied to extraction confidence.
    pub confidence_weight: f64,
    /// Magnitude bound of the community adjustment.
    pub community_bound: f64,
    /// Number of best dishes averaged per restaurant.
    pub top_k: usize,
    /// Weight of the top-K dish average in the restaurant score.
    pub dish_weight: f64,
    /// Weight of the verified score in the restaurant score.
    pub verified_weight: f64,
    /// Weight of the verified score in the trust estimate.
    pub trust_verified_weight: f64,
    /// Weight of community sentiment in the trust estimate.
    pub trust_sentiment_weight: f64,
    /// Sentiment assumed when a restaurant has no votes.
    pub neutral_sentiment: f64,
    /// Share of a `mild` vote counted as positive sentiment.
    pub mild_weight: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            cross_contact_cap: 0.6,
            cuisine_penalty: 0.15,
            confidence_weight: 0.2,
            community_bound: 0.3,
            top_k: 3,
            dish_weight: 0.8,
            verified_weight: 0.2,
            trust_verified_weight: 0.6,
            trust_sentiment_weight: 0.4,
            neutral_sentiment: 0.5,
            mild_weight: 0.5,
        }
    }
}

impl ScoringPolicy {
    /// Validate the policy and return a copy.
    ///
    /// # Errors
    /// Returns [`PolicyError::OutOfRange`] for any weight that is not finite
    /// or lies outside `0.0..=1.0`, and [`PolicyError::ZeroTopK`] when
    /// `top_k` is zero.
    pub fn validate(self) -> Result<Self, PolicyError> {
        let fields = [
            ("cross_contact_cap", self.cross_contact_cap),
            ("cuisine_penalty", self.cuisine_penalty),
            ("confidence_weight", self.confidence_weight),
            ("community_bound", self.community_bound),
            ("dish_weight", self.dish_weight),
            ("verified_weight", self.verified_weight),
            ("trust_verified_weight", self.trust_verified_weight),
            ("trust_sentiment_weight", self.trust_sentiment_weight),
            ("neutral_sentiment", self.neutral_sentiment),
            ("mild_weight", self.mild_weight),
        ];
        if let Some((field, value)) = fields
            .into_iter()
            .find(|(_, value)| !is_unit_interval(*value))
        {
            return Err(PolicyError::OutOfRange { field, value });
        }
        if self.top_k == 0 {
            return Err(PolicyError::ZeroTopK);
        }
        Ok(self)
    }
}

fn is_unit_interval(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}
