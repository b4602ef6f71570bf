//! Raw CSV rows and their conversion into typed domain records.
//!
//! Rows are decoded with every column as text so a malformed number never
//! aborts a load. Conversion substitutes defaults (zero scores, empty tag
//! sets) and logs each substitution.

use allernav_core::{Allergen, Dish, Restaurant, VibeTag};
use geo::Coord;
use log::warn;
use serde::Deserialize;

/// One row of `restaurants.csv`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RestaurantRow {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) city: String,
    pub(crate) lat: String,
    pub(crate) lon: String,
    pub(crate) cuisine: String,
    pub(crate) cross_contact: String,
    pub(crate) verified_score: String,
    pub(crate) vibe_tags: String,
}

/// One row of `dishes.csv`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct DishRow {
    pub(crate) rid: String,
    pub(crate) dish_id: String,
    pub(crate) name: String,
    pub(crate) desc: String,
    pub(crate) inferred_allergens: String,
    pub(crate) confidence: String,
    pub(crate) inference_reason: String,
}

impl RestaurantRow {
    pub(crate) fn into_restaurant(self) -> Restaurant {
        let lat = parse_number(&self.id, "lat", &self.lat);
        let lon = parse_number(&self.id, "lon", &self.lon);
        let verified = parse_number(&self.id, "verified_score", &self.verified_score);
        let mut restaurant = Restaurant::new(
            self.id.trim(),
            self.name.trim(),
            self.city.trim(),
            Coord { x: lon, y: lat },
        )
        .with_verified_score(verified);
        for cuisine in split_pipes(&self.cuisine) {
            restaurant = restaurant.with_cuisine(cuisine);
        }
        for flag in split_pipes(&self.cross_contact) {
            restaurant = restaurant.with_cross_contact(flag);
        }
        for vibe in parse_tags::<VibeTag, _>(&self.id, "vibe_tags", split_vibes(&self.vibe_tags)) {
            restaurant = restaurant.with_vibe(vibe);
        }
        restaurant
    }
}

impl DishRow {
    pub(crate) fn into_dish(self) -> Dish {
        let confidence = parse_number(&self.dish_id, "confidence", &self.confidence);
        let mut dish = Dish::new(self.rid.trim(), self.dish_id.trim(), self.name.trim())
            .with_description(self.desc)
            .with_reason(self.inference_reason)
            .with_confidence(confidence);
        for allergen in parse_tags::<Allergen, _>(
            &self.dish_id,
            "inferred_allergens",
            split_pipes(&self.inferred_allergens),
        ) {
            dish = dish.with_allergen(allergen);
        }
        dish
    }
}

/// Parse a numeric column, substituting `0.0` for blank or malformed text.
pub(crate) fn parse_number(record: &str, column: &str, raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            warn!("Record {record}: {column} '{trimmed}' is not a number; using 0");
            0.0
        }
    }
}

/// Split a pipe-delimited list, dropping blank entries.
pub(crate) fn split_pipes(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('|').map(str::trim).filter(|item| !item.is_empty())
}

/// Split a vibe list given either pipe-delimited or as a bracketed,
/// comma-separated list such as `['casual', 'family']`.
pub(crate) fn split_vibes(raw: &str) -> Vec<&str> {
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
    {
        Some(inner) => inner
            .split(',')
            .map(|item| item.trim().trim_matches(|c| c == '\'' || c == '"').trim())
            .filter(|item| !item.is_empty())
            .collect(),
        None => split_pipes(trimmed).collect(),
    }
}

fn parse_tags<'a, T, I>(record: &'a str, column: &'a str, tags: I) -> impl Iterator<Item = T> + 'a
where
    T: std::str::FromStr + 'a,
    T::Err: std::fmt::Display,
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: 'a,
{
    tags.into_iter().filter_map(move |tag| match tag.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!("Record {record}: dropping {column} entry: {err}");
            None
        }
    })
}
