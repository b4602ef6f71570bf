//! Restaurant and dish catalogue loaded from CSV.

use std::collections::BTreeSet;
use std::io::Read;

use allernav_core::{Dish, Restaurant, VibeTag};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8;
use log::warn;
use thiserror::Error;

use crate::records::{DishRow, RestaurantRow};

/// File name of the restaurant table inside a data directory.
pub const RESTAURANTS_FILE: &str = "restaurants.csv";
/// File name of the dish table inside a data directory.
pub const DISHES_FILE: &str = "dishes.csv";

/// Errors raised while loading a dataset.
///
/// Malformed cells never raise errors; they fall back to defaults.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A table could not be opened.
    #[error("failed to open dataset table at {path}")]
    Open {
        /// Path of the table.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// A table was not readable as CSV.
    #[error("failed to read CSV from {table}")]
    Read {
        /// Table being read: a path, or a caller-supplied label.
        table: String,
        /// Source error from `csv`.
        #[source]
        source: csv::Error,
    },
}

/// Every restaurant and dish of a catalogue.
///
/// # Examples
/// ```
/// use allernav_data::Dataset;
///
/// let restaurants = "id,name,city,lat,lon,cuisine,cross_contact,verified_score,vibe_tags\n\
///                    thai_1,Thai Palace,College Park,38.98,-76.93,thai,shared_fryer,0.5,casual\n";
/// let dishes = "rid,dish_id,name,desc,inferred_allergens,confidence,inference_reason\n\
///               thai_1,thai_1_pad,Pad Thai,noodles,peanut|egg,0.9,menu\n";
/// let dataset = Dataset::from_readers(restaurants.as_bytes(), dishes.as_bytes()).unwrap();
/// assert_eq!(dataset.cities(), vec!["College Park"]);
/// assert_eq!(dataset.dishes_for("thai_1").count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    restaurants: Vec<Restaurant>,
    dishes: Vec<Dish>,
}

impl Dataset {
    /// Build a dataset from already typed records.
    pub fn new(restaurants: Vec<Restaurant>, dishes: Vec<Dish>) -> Self {
        Self {
            restaurants,
            dishes,
        }
    }

    /// Load `restaurants.csv` and `dishes.csv` from `data_dir`.
    ///
    /// # Errors
    /// Returns [`DatasetError`] when either table cannot be opened or is not
    /// valid CSV.
    pub fn load(data_dir: &Utf8Path) -> Result<Self, DatasetError> {
        let restaurants_path = data_dir.join(RESTAURANTS_FILE);
        let dishes_path = data_dir.join(DISHES_FILE);
        let restaurants = read_table::<RestaurantRow, _>(
            open(&restaurants_path)?,
            restaurants_path.as_str(),
        )?;
        let dishes = read_table::<DishRow, _>(open(&dishes_path)?, dishes_path.as_str())?;
        Ok(Self::from_rows(restaurants, dishes))
    }

    /// Parse both tables from arbitrary readers.
    ///
    /// # Errors
    /// Returns [`DatasetError::Read`] when either input is not valid CSV.
    pub fn from_readers<R, D>(restaurants: R, dishes: D) -> Result<Self, DatasetError>
    where
        R: Read,
        D: Read,
    {
        let restaurants = read_table::<RestaurantRow, _>(restaurants, RESTAURANTS_FILE)?;
        let dishes = read_table::<DishRow, _>(dishes, DISHES_FILE)?;
        Ok(Self::from_rows(restaurants, dishes))
    }

    fn from_rows(restaurants: Vec<RestaurantRow>, dishes: Vec<DishRow>) -> Self {
        let restaurants: Vec<Restaurant> = restaurants
            .into_iter()
            .map(RestaurantRow::into_restaurant)
            .filter(|restaurant| {
                let keep = !restaurant.id.is_empty();
                if !keep {
                    warn!("Skipping restaurant row '{}' without an id", restaurant.name);
                }
                keep
            })
            .collect();
        let dishes: Vec<Dish> = dishes
            .into_iter()
            .map(DishRow::into_dish)
            .filter(|dish| {
                let keep = !dish.id.is_empty() && !dish.restaurant_id.is_empty();
                if !keep {
                    warn!("Skipping dish row '{}' without an id", dish.name);
                }
                keep
            })
            .collect();
        Self::new(restaurants, dishes)
    }

    /// Every restaurant, in file order.
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// Every dish, in file order.
    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    /// Look up a restaurant by id.
    pub fn restaurant(&self, id: &str) -> Option<&Restaurant> {
        self.restaurants.iter().find(|restaurant| restaurant.id == id)
    }

    /// Distinct non-empty cities, sorted.
    pub fn cities(&self) -> Vec<&str> {
        self.restaurants
            .iter()
            .map(|restaurant| restaurant.city.as_str())
            .filter(|city| !city.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Restaurants in `city` (or every city when `None`) carrying any of
    /// `vibes`. An empty vibe filter matches every restaurant.
    pub fn select<'a>(
        &'a self,
        city: Option<&'a str>,
        vibes: &'a BTreeSet<VibeTag>,
    ) -> impl Iterator<Item = &'a Restaurant> + 'a {
        self.restaurants.iter().filter(move |restaurant| {
            city.is_none_or(|wanted| restaurant.city == wanted)
                && restaurant.matches_any_vibe(vibes)
        })
    }

    /// Dishes served by restaurant `id`, in file order.
    pub fn dishes_for<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Dish> + 'a {
        self.dishes.iter().filter(move |dish| dish.restaurant_id == id)
    }
}

fn open(path: &Utf8Path) -> Result<fs_utf8::File, DatasetError> {
    allernav_fs::open_utf8_file(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn read_table<T, R>(reader: R, table: &str) -> Result<Vec<T>, DatasetError>
where
    T: serde::de::DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let mut rows = Vec::new();
    for (index, record) in csv_reader.deserialize::<T>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(err) if err.is_io_error() => {
                return Err(DatasetError::Read {
                    table: table.to_owned(),
                    source: err,
                });
            }
            Err(err) => warn!("Skipping row {} of {table}: {err}", index + 1),
        }
    }
    Ok(rows)
}
