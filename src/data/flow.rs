use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::config::FlowMapConfig;
use crate::data::coerce::{NumericCoercion, lenient_sum};
use crate::data::table::Table;

/// People displaced from the origin to one destination in one year.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlowRecord {
    pub year: i32,
    pub origin_code: String,
    pub dest_code: String,
    pub dest_name: String,
    /// Always `> 0`.
    pub value: f64,
}

/// Cleaned single-origin flow records plus their year extent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowDataset {
    records: Vec<FlowRecord>,
    year_range: Option<(i32, i32)>,
}

impl FlowDataset {
    pub fn new(records: Vec<FlowRecord>) -> Self {
        let year_range = records
            .iter()
            .map(|r| r.year)
            .fold(None, |acc: Option<(i32, i32)>, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            });
        Self {
            records,
            year_range,
        }
    }

    pub fn records(&self) -> &[FlowRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Inclusive `(min_year, max_year)`; `None` when no record survived cleaning.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        self.year_range
    }

    /// Sum of every record of `year`, ignoring the frame-set threshold and cut.
    pub fn year_total(&self, year: i32) -> f64 {
        self.records
            .iter()
            .filter(|r| r.year == year)
            .map(|r| r.value)
            .sum()
    }

    /// The records drawn for `year`: value strictly above `min_value`, largest first,
    /// at most `top_n`.
    pub fn frame_set(&self, year: i32, min_value: f64, top_n: usize) -> Vec<&FlowRecord> {
        let mut out = self
            .records
            .iter()
            .filter(|r| r.year == year && r.value > min_value)
            .collect::<Vec<_>>();
        out.sort_by(|a, b| b.value.total_cmp(&a.value));
        out.truncate(top_n);
        out
    }
}

/// Normalize flow rows for the configured origin.
///
/// A row survives when its summed value is positive, its origin is the configured origin,
/// its destination differs from the origin, and its year is at least `min_year`. Surviving
/// rows for the same year and destination merge into one record: values add up and the
/// first row's name and position are kept, so a frame never holds two arcs to one place.
#[tracing::instrument(skip(table, cfg), fields(rows = table.len(), origin = %cfg.origin_code))]
pub fn normalize_flows(table: &Table, cfg: &FlowMapConfig) -> FlowDataset {
    let cols = &cfg.columns;
    let origin = cfg.origin_code.as_str();

    let rows = table
        .rows()
        .filter_map(|row| {
            let value = lenient_sum(cols.value_columns.iter().map(|c| row.get(c)));
            let origin_code = row.get(&cols.origin_code).unwrap_or_default();
            let dest_code = row.get(&cols.dest_code).unwrap_or_default();
            if !(value > 0.0) || origin_code != origin || dest_code == origin {
                return None;
            }
            let year = NumericCoercion::Strict.year(row.get(&cols.year))?;
            if year < cfg.min_year {
                return None;
            }
            Some(FlowRecord {
                year,
                origin_code: origin_code.to_owned(),
                dest_code: dest_code.to_owned(),
                dest_name: row.get(&cols.dest_name).unwrap_or_default().to_owned(),
                value,
            })
        })
        .collect::<Vec<_>>();
    let kept = rows.len();

    let mut records: Vec<FlowRecord> = Vec::with_capacity(kept);
    let mut slots: HashMap<(i32, String), usize> = HashMap::with_capacity(kept);
    for r in rows {
        match slots.entry((r.year, r.dest_code.clone())) {
            Entry::Occupied(slot) => records[*slot.get()].value += r.value,
            Entry::Vacant(slot) => {
                slot.insert(records.len());
                records.push(r);
            }
        }
    }

    tracing::debug!(
        kept,
        dropped = table.len() - kept,
        merged = kept - records.len(),
        "flow rows normalized"
    );
    FlowDataset::new(records)
}

#[cfg(test)]
#[path = "../../tests/unit/data/flow.rs"]
mod tests;
