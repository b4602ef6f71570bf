use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// Directory containing the CSV fixtures.
pub fn fixtures_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Copy the CSV fixtures into a fresh temporary data directory.
pub fn fixture_data_dir() -> (TempDir, Utf8PathBuf) {
    let dir = TempDir::new().unwrap_or_else(|err| panic!("failed to create tempdir: {err}"));
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .unwrap_or_else(|path| panic!("tempdir {path:?} is not UTF-8"));
    for name in ["restaurants.csv", "dishes.csv"] {
        copy(&fixtures_dir().join(name), &root.join(name));
    }
    (dir, root)
}

fn copy(from: &Utf8Path, to: &Utf8Path) {
    fs::copy(from, to).unwrap_or_else(|err| panic!("failed to copy {from} to {to}: {err}"));
}
