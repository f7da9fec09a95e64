//! Loading scraped section data into the store.

use crate::models::CourseSection;
use crate::store::{Store, StoreError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Reads a JSON array of section records and inserts them in a single
/// transaction. Record `courseNumber` values are ignored; the store assigns
/// its own.
pub fn import_sections<P: AsRef<Path>>(store: &Store, path: P) -> Result<usize, StoreError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let sections: Vec<CourseSection> = serde_json::from_reader(reader)?;
    let count = store.insert_sections(&sections)?;
    info!(path = %path.display(), count, "imported course sections");
    Ok(count)
}

/// Gives every instructor without a rating row an empty one.
pub fn seed_professor_ratings(store: &Store) -> Result<usize, StoreError> {
    let added = store.seed_professor_ratings()?;
    info!(added, "seeded professor ratings");
    Ok(added)
}
