//! # grdp-dashboard
//!
//! The computation layer behind a regional economic dashboard: per-capita
//! GRDP, regional gross income and personal income by province and year.
//!
//! A wide table (one row per province and metric, one column per year) is
//! loaded once, its year columns are resolved, and every user selection is
//! turned into a [`ViewBundle`] of plain derived tables:
//!
//! - a headline [`Summary`] (highest, lowest and mean value),
//! - top-N and bottom-N rankings plus the full per-region series,
//! - a long (region, year, value) table for time-series and heatmap views.
//!
//! Rendering is left to the caller.
//!
//! ```no_run
//! use grdp_dashboard::{Dashboard, FilterSpec, LoadOptions};
//!
//! # fn main() -> Result<(), grdp_dashboard::LoadError> {
//! let dashboard = Dashboard::open("regional_income.csv".as_ref(), &LoadOptions::default())?;
//! for warning in dashboard.ambiguities() {
//!     eprintln!("{warning}");
//! }
//!
//! let spec = FilterSpec::new("1인당 지역내총생산").with_regions(["서울", "부산"]);
//! let bundle = dashboard.evaluate(&spec);
//! if let Some(summary) = &bundle.summary {
//!     println!("highest: {} {:.1}", summary.max.region, summary.max.value);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod view;

pub use analysis::summary::Summary;
pub use config::{LoadOptions, NumberFormat, DEFAULT_TOP_N, TOP_N_RANGE};
pub use data::model::{LongRow, LongTable, NumericSeries, RankedSubset, RegionValue};
pub use error::{EmptySeriesError, LoadError, SchemaAmbiguity};
pub use view::{Dashboard, Diagnostics, FilterSpec, ViewBundle, ViewStatus};
