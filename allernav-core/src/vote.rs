//! Community votes and their per-key aggregates.

use crate::ValidationError;

/// How a diner rated a dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VoteChoice {
    /// No reaction.
    Safe,
    /// A mild reaction or uncertainty.
    Mild,
    /// A reaction; others should avoid the dish.
    Avoid,
}

impl VoteChoice {
    /// Return the choice as its ledger tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Mild => "mild",
            Self::Avoid => "avoid",
        }
    }
}

impl std::fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VoteChoice {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "safe" => Ok(Self::Safe),
            "mild" => Ok(Self::Mild),
            "avoid" => Ok(Self::Avoid),
            _ => Err(ValidationError::InvalidChoice { raw: s.to_owned() }),
        }
    }
}

/// A single community report about a dish.
///
/// Identity and comment are trimmed on construction; blank values are stored
/// as `None`.
///
/// # Examples
/// ```
/// use allernav_core::{Vote, VoteChoice};
///
/// # fn main() -> Result<(), allernav_core::ValidationError> {
/// let vote = Vote::parse("thai_1", "thai_1_pad", Some(" a@b.c "), "avoid", Some("   "))?;
/// assert_eq!(vote.choice, VoteChoice::Avoid);
/// assert_eq!(vote.identity.as_deref(), Some("a@b.c"));
/// assert!(vote.comment.is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    /// Restaurant the dish belongs to.
    pub restaurant_id: String,
    /// Dish being rated.
    pub dish_id: String,
    /// Optional voter identity, reserved for trust weighting.
    pub identity: Option<String>,
    /// The rating.
    pub choice: VoteChoice,
    /// Optional free-text comment.
    pub comment: Option<String>,
}

impl Vote {
    /// Construct a vote from a typed choice.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingVoteKey`] when either identifier is
    /// blank.
    pub fn new(
        restaurant_id: &str,
        dish_id: &str,
        identity: Option<&str>,
        choice: VoteChoice,
        comment: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let restaurant_id = restaurant_id.trim();
        let dish_id = dish_id.trim();
        if restaurant_id.is_empty() || dish_id.is_empty() {
            return Err(ValidationError::MissingVoteKey);
        }
        Ok(Self {
            restaurant_id: restaurant_id.to_owned(),
            dish_id: dish_id.to_owned(),
            identity: non_blank(identity),
            choice,
            comment: non_blank(comment),
        })
    }

    /// Construct a vote from a raw choice string.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidChoice`] when `choice` is not
    /// `safe`, `mild` or `avoid`, and [`ValidationError::MissingVoteKey`]
    /// when either identifier is blank.
    pub fn parse(
        restaurant_id: &str,
        dish_id: &str,
        identity: Option<&str>,
        choice: &str,
        comment: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let parsed = choice.parse::<VoteChoice>()?;
        Self::new(restaurant_id, dish_id, identity, parsed, comment)
    }

    /// Report whether the vote belongs to the given key.
    ///
    /// A `None` dish matches every dish of the restaurant.
    pub fn matches(&self, restaurant_id: &str, dish_id: Option<&str>) -> bool {
        self.restaurant_id == restaurant_id && dish_id.is_none_or(|dish| self.dish_id == dish)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
}

/// Aggregate of every vote recorded for a key.
///
/// Counts are order-independent; comments keep append order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VoteTally {
    /// Number of `safe` votes.
    pub safe: u32,
    /// Number of `mild` votes.
    pub mild: u32,
    /// Number of `avoid` votes.
    pub avoid: u32,
    /// Non-empty comments, oldest first.
    pub comments: Vec<String>,
}

impl VoteTally {
    /// Fold a vote into the tally.
    pub fn add(&mut self, vote: &Vote) {
        self.count(vote.choice);
        if let Some(comment) = &vote.comment {
            self.comments.push(comment.clone());
        }
    }

    /// Count a choice without a comment.
    pub fn count(&mut self, choice: VoteChoice) {
        let counter = match choice {
            VoteChoice::Safe => &mut self.safe,
            VoteChoice::Mild => &mut self.mild,
            VoteChoice::Avoid => &mut self.avoid,
        };
        *counter = counter.saturating_add(1);
    }

    /// Total number of votes.
    pub const fn total(&self) -> u32 {
        self.safe.saturating_add(self.mild).saturating_add(self.avoid)
    }

    /// Report whether no votes were recorded.
    pub const fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl<'a> FromIterator<&'a Vote> for VoteTally {
    fn from_iter<I: IntoIterator<Item = &'a Vote>>(iter: I) -> Self {
        let mut tally = Self::default();
        for vote in iter {
            tally.add(vote);
        }
        tally
    }
}
