use std::num::NonZeroUsize;

use crate::data::model::{NumericSeries, RankedSubset, RegionValue};

/// Sort direction for a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Largest first ("top N").
    Descending,
    /// Smallest first ("bottom N").
    Ascending,
}

/// All points of `series` ordered by value. Equal values keep series order.
pub fn sorted(series: &NumericSeries, direction: Direction) -> Vec<RegionValue> {
    let mut points = series.points().to_vec();
    match direction {
        Direction::Descending => points.sort_by(|a, b| b.value.total_cmp(&a.value)),
        Direction::Ascending => points.sort_by(|a, b| a.value.total_cmp(&b.value)),
    }
    points
}

/// The first `n` points of `series` in the given direction.
/// Returns the whole series when it has fewer than `n` points.
pub fn rank(series: &NumericSeries, n: NonZeroUsize, direction: Direction) -> RankedSubset {
    let mut points = sorted(series, direction);
    points.truncate(n.get());
    points
}
