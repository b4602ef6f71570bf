//! Restaurant-level aggregation and trust estimation.

use allernav_core::{Restaurant, VoteTally, round_score, sanitise};

use crate::ScoringPolicy;

/// Community trust in a restaurant, reported beside its safety score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrustEstimate {
    /// Blend of the verified score and community sentiment.
    pub trust: f64,
    /// Number of votes across every dish of the restaurant.
    pub total_votes: u32,
}

/// Aggregate dish scores into a restaurant score.
///
/// With no dishes the verified score is returned unblended. Otherwise the
/// best `policy.top_k` dish scores are averaged and blended with the verified
/// score, then rounded to two decimals.
///
/// # Examples
/// ```
/// use allernav_core::Restaurant;
/// use allernav_scorer::{ScoringPolicy, aggregate_restaurant};
/// # use geo::Coord;
///
/// let venue = Restaurant::new("r", "R", "City", Coord { x: 0.0, y: 0.0 })
///     .with_verified_score(0.5);
/// let policy = ScoringPolicy::default();
/// assert_eq!(aggregate_restaurant(&venue, [0.9, 0.8, 0.3, 0.1], &policy), 0.63);
/// assert_eq!(aggregate_restaurant(&venue, [], &policy), 0.5);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "the top-K mean divides a small dish count"
)]
pub fn aggregate_restaurant<I>(
    restaurant: &Restaurant,
    dish_scores: I,
    policy: &ScoringPolicy,
) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut scores: Vec<f64> = dish_scores.into_iter().map(sanitise).collect();
    if scores.is_empty() {
        return restaurant.verified_score();
    }
    scores.sort_by(|left, right| right.total_cmp(left));
    let best: Vec<f64> = scores.into_iter().take(policy.top_k.max(1)).collect();
    let mean = best.iter().sum::<f64>() / best.len() as f64;
    let blended = policy.dish_weight * mean + policy.verified_weight * restaurant.verified_score();
    sanitise(round_score(blended))
}

/// Estimate trust from the verified score and the restaurant's vote tally.
///
/// Sentiment is `(safe + mild_weight * mild) / total`, or
/// `policy.neutral_sentiment` without votes.
///
/// # Examples
/// ```
/// use allernav_core::{Restaurant, VoteTally};
/// use allernav_scorer::{ScoringPolicy, estimate_trust};
/// # use geo::Coord;
///
/// let venue = Restaurant::new("r", "R", "City", Coord { x: 0.0, y: 0.0 })
///     .with_verified_score(0.55);
/// let estimate = estimate_trust(&venue, &VoteTally::default(), &ScoringPolicy::default());
/// assert_eq!((estimate.trust, estimate.total_votes), (0.53, 0));
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "trust is a weighted blend of two ratios"
)]
pub fn estimate_trust(
    restaurant: &Restaurant,
    votes: &VoteTally,
    policy: &ScoringPolicy,
) -> TrustEstimate {
    let total_votes = votes.total();
    let sentiment = if total_votes == 0 {
        policy.neutral_sentiment
    } else {
        (f64::from(votes.safe) + policy.mild_weight * f64::from(votes.mild))
            / f64::from(total_votes)
    };
    let trust = policy.trust_verified_weight * restaurant.verified_score()
        + policy.trust_sentiment_weight * sentiment;
    TrustEstimate {
        trust: sanitise(round_score(trust)),
        total_votes,
    }
}
