use std::collections::BTreeSet;

use geo::Coord;

use crate::{VibeTag, scorer::sanitise};

/// A venue whose dishes can be scored.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. Cuisine
/// tags and cross-contact flags are stored trimmed and lowercased so the risk
/// table lookups never depend on source formatting.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use allernav_core::Restaurant;
///
/// let location = Coord { x: -76.9, y: 38.9 };
/// let restaurant = Restaurant::new("thai_1", "Thai Palace", "College Park", location)
///     .with_cuisine("Thai")
///     .with_cross_contact("shared_fryer")
///     .with_verified_score(1.4);
///
/// assert!(restaurant.cuisines.contains("thai"));
/// assert_eq!(restaurant.verified_score(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// City used to group listings.
    pub city: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Cuisine tags such as `thai` or `italian`.
    pub cuisines: BTreeSet<String>,
    /// Venue-level cross-contact flags such as `shared_fryer`.
    pub cross_contact: BTreeSet<String>,
    /// Atmosphere tags.
    pub vibes: BTreeSet<VibeTag>,
    verified_score: f64,
}

impl Restaurant {
    /// Construct a restaurant with no tags and a verified score of zero.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        city: impl Into<String>,
        location: Coord<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            city: city.into(),
            location,
            cuisines: BTreeSet::new(),
            cross_contact: BTreeSet::new(),
            vibes: BTreeSet::new(),
            verified_score: 0.0,
        }
    }

    /// Seed baseline safety rating, always within `0.0..=1.0`.
    pub const fn verified_score(&self) -> f64 {
        self.verified_score
    }

    /// Set the verified score, clamping into `0.0..=1.0`.
    ///
    /// Non-finite values are replaced with `0.0`.
    pub fn set_verified_score(&mut self, score: f64) {
        self.verified_score = sanitise(score);
    }

    /// Set the verified score while returning `self` for chaining.
    #[must_use]
    pub fn with_verified_score(mut self, score: f64) -> Self {
        self.set_verified_score(score);
        self
    }

    /// Add a cuisine tag.
    #[must_use]
    pub fn with_cuisine(mut self, cuisine: &str) -> Self {
        if let Some(tag) = normalise_tag(cuisine) {
            self.cuisines.insert(tag);
        }
        self
    }

    /// Add a cross-contact flag.
    #[must_use]
    pub fn with_cross_contact(mut self, flag: &str) -> Self {
        if let Some(tag) = normalise_tag(flag) {
            self.cross_contact.insert(tag);
        }
        self
    }

    /// Add a vibe tag.
    #[must_use]
    pub fn with_vibe(mut self, vibe: VibeTag) -> Self {
        self.vibes.insert(vibe);
        self
    }

    /// Report whether the restaurant carries any of `vibes`.
    ///
    /// An empty filter matches every restaurant.
    pub fn matches_any_vibe(&self, vibes: &BTreeSet<VibeTag>) -> bool {
        vibes.is_empty() || !self.vibes.is_disjoint(vibes)
    }
}

pub(crate) fn normalise_tag(raw: &str) -> Option<String> {
    let tag = raw.trim().to_lowercase();
    (!tag.is_empty()).then_some(tag)
}
