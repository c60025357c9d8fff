use crate::config::IndicatorColumns;
use crate::data::coerce::NumericCoercion;
use crate::data::table::Table;

/// One yearly observation of the indicator.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeSeriesPoint {
    pub year: i32,
    pub value: f64,
}

/// Indicator observations sorted by ascending year, at most one per year.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimeSeries {
    points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    /// Sort by year and keep the first observation of each year.
    pub fn new(mut points: Vec<TimeSeriesPoint>) -> Self {
        points.sort_by_key(|p| p.year);
        let before = points.len();
        points.dedup_by_key(|p| p.year);
        if points.len() < before {
            tracing::debug!(
                dropped = before - points.len(),
                "duplicate indicator years dropped"
            );
        }
        Self { points }
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(min_year, max_year)`, or `None` for an empty series.
    pub fn year_extent(&self) -> Option<(i32, i32)> {
        Some((self.points.first()?.year, self.points.last()?.year))
    }

    /// Largest value, or `None` for an empty series.
    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }
}

/// Normalize indicator rows.
///
/// Uses [`NumericCoercion::Permissive`]: a non-numeric year or value becomes `0` instead of
/// dropping the row.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn normalize_indicator(table: &Table, columns: &IndicatorColumns) -> TimeSeries {
    normalize_indicator_with(table, columns, NumericCoercion::Permissive)
}

/// Normalize indicator rows under an explicit coercion policy.
///
/// Under [`NumericCoercion::Strict`] rows with an unparsable field are dropped.
pub fn normalize_indicator_with(
    table: &Table,
    columns: &IndicatorColumns,
    policy: NumericCoercion,
) -> TimeSeries {
    let points = table
        .rows()
        .filter_map(|row| {
            Some(TimeSeriesPoint {
                year: policy.year(row.get(&columns.year))?,
                value: policy.number(row.get(&columns.value))?,
            })
        })
        .collect::<Vec<_>>();

    if points.len() < table.len() {
        tracing::debug!(dropped = table.len() - points.len(), "indicator rows dropped");
    }
    TimeSeries::new(points)
}

#[cfg(test)]
#[path = "../../tests/unit/data/indicator.rs"]
mod tests;
