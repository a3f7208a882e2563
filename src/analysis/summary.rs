use serde::Serialize;

use crate::data::model::{NumericSeries, RegionValue};
use crate::error::EmptySeriesError;

/// Headline statistics for one metric in one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub max: RegionValue,
    pub min: RegionValue,
    pub mean: f64,
    /// Number of values the statistics were computed over.
    pub count: usize,
}

/// Max, min and arithmetic mean over the values present in `series`.
///
/// Ties on the extremes go to the earliest point in series order.
pub fn summarize(series: &NumericSeries) -> Result<Summary, EmptySeriesError> {
    let (first, rest) = series.points().split_first().ok_or(EmptySeriesError)?;

    let mut max = first;
    let mut min = first;
    let mut mean = first.value;
    for (seen, point) in rest.iter().enumerate() {
        if point.value > max.value {
            max = point;
        }
        if point.value < min.value {
            min = point;
        }
        mean += (point.value - mean) / (seen + 2) as f64;
    }

    // Rounding must not push the mean outside [min, max].
    let mean = mean.clamp(min.value, max.value);

    Ok(Summary {
        max: max.clone(),
        min: min.clone(),
        mean,
        count: series.len(),
    })
}
