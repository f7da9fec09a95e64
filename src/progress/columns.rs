// Translation between graph ids (CS_111) and completion-table columns (CSCI_111).
use crate::progress::catalog::{Catalog, CourseId};
use std::collections::{BTreeMap, BTreeSet};

const GRAPH_CS_PREFIX: &str = "CS_";
const COLUMN_CS_PREFIX: &str = "CSCI_";

pub fn to_db_column(id: CourseId) -> String {
    match id.as_str().strip_prefix(GRAPH_CS_PREFIX) {
        Some(number) => format!("{}{}", COLUMN_CS_PREFIX, number),
        None => id.as_str().to_string(),
    }
}

/// Maps a column name back to a catalog course; `None` for columns that are
/// not courses (e.g. `userId`) or unknown to the catalog.
pub fn from_db_column(catalog: &Catalog, column: &str) -> Option<CourseId> {
    match column.strip_prefix(COLUMN_CS_PREFIX) {
        Some(number) => catalog.lookup(&format!("{}{}", GRAPH_CS_PREFIX, number)),
        None => catalog.lookup(column),
    }
}

/// Column names of every course in the catalog, in declaration order.
pub fn completion_columns(catalog: &Catalog) -> Vec<String> {
    catalog.courses().map(|n| to_db_column(n.id)).collect()
}

/// Completed set from a stored row; only `true` course columns count.
pub fn completed_from_row(catalog: &Catalog, row: &BTreeMap<String, bool>) -> BTreeSet<CourseId> {
    row.iter()
        .filter(|(_, done)| **done)
        .filter_map(|(col, _)| from_db_column(catalog, col))
        .collect()
}

pub fn updates_to_columns(updates: &BTreeMap<CourseId, bool>) -> BTreeMap<String, bool> {
    updates.iter().map(|(id, v)| (to_db_column(*id), *v)).collect()
}
