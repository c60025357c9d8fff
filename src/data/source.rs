//! Filesystem-backed fetches of the raw inputs.
//!
//! Any I/O or parse failure maps to [`VizError::Fetch`] or [`VizError::Serde`]; callers
//! feed it to [`LoadTracker::fail`](crate::data::load::LoadTracker::fail).

use std::path::Path;

use crate::data::geo::BoundarySet;
use crate::data::table::Table;
use crate::foundation::error::{VizError, VizResult};

#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn read_table(path: impl AsRef<Path>) -> VizResult<Table> {
    let path = path.as_ref();
    let f = std::fs::File::open(path)
        .map_err(|e| VizError::fetch(format!("open table '{}': {e}", path.display())))?;
    Table::from_csv_reader(std::io::BufReader::new(f))
}

#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn read_boundaries(path: impl AsRef<Path>) -> VizResult<BoundarySet> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|e| VizError::fetch(format!("read boundaries '{}': {e}", path.display())))?;
    BoundarySet::from_geojson_str(&text)
}
