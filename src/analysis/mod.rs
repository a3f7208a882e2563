//! Derivations over filtered data: headline statistics, rankings and the
//! long (region, year, value) table used by time-series and heatmap views.

pub mod melt;
pub mod rank;
pub mod summary;
