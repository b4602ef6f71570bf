//! Test helpers writing a small restaurant catalogue to disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

const RESTAURANTS: &str = "\
id,name,city,lat,lon,cuisine,cross_contact,verified_score,vibe_tags
thai_1,Thai Palace,College Park,38.989,-76.936,thai,shared_fryer,0.5,casual|date night
ital_1,Nonna's Kitchen,College Park,38.994,-76.931,italian,,0.7,\"['family', 'casual']\"
sushi_1,Sakura Bar,Silver Spring,38.991,-77.026,japanese,tempura_station,0.6,late-night
";

const DISHES: &str = "\
rid,dish_id,name,desc,inferred_allergens,confidence,inference_reason
thai_1,thai_1_pad,Pad Thai,rice noodles with peanuts,peanut|egg|soy,0.9,menu lists peanuts
thai_1,thai_1_curry,Green Curry,green curry with coconut,fish|shellfish,0.6,curry paste
ital_1,ital_1_pesto,Pesto Pasta,linguine with basil pesto,gluten|tree_nut|dairy,0.85,pesto
ital_1,ital_1_salad,Caprese,tomato and mozzarella,dairy,0.9,cheese
sushi_1,sushi_1_roll,Tempura Roll,tempura shrimp,shellfish|gluten|egg,0.8,tempura batter
";

/// Temporary data directory holding `restaurants.csv` and `dishes.csv`.
pub(super) struct CatalogueDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl CatalogueDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        write_utf8(&root.join("restaurants.csv"), RESTAURANTS.as_bytes());
        write_utf8(&root.join("dishes.csv"), DISHES.as_bytes());
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path, contents).expect("write fixture file");
}
