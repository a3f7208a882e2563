use std::collections::BTreeSet;
use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::melt::melt;
use crate::analysis::rank::{rank, sorted, Direction};
use crate::analysis::summary::{summarize, Summary};
use crate::config::{LoadOptions, NumberFormat, DEFAULT_TOP_N};
use crate::data::coerce::coerce_column;
use crate::data::filter::filter;
use crate::data::loader::{load_file, LoadReport};
use crate::data::model::{ListColumn, LongTable, NumericSeries, RankedSubset, RegionalDataset};
use crate::error::{LoadError, SchemaAmbiguity};

// ---------------------------------------------------------------------------
// FilterSpec – one user configuration
// ---------------------------------------------------------------------------

/// What the user selected. Built per interaction and passed by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub category: String,
    /// `None` selects the latest year in the dataset.
    #[serde(default)]
    pub year: Option<i32>,
    /// Empty means all regions.
    #[serde(default)]
    pub regions: BTreeSet<String>,
    #[serde(default = "default_top_n")]
    pub top_n: NonZeroUsize,
}

fn default_top_n() -> NonZeroUsize {
    DEFAULT_TOP_N
}

impl FilterSpec {
    pub fn new(category: impl Into<String>) -> Self {
        FilterSpec {
            category: category.into(),
            year: None,
            regions: BTreeSet::new(),
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_top_n(mut self, top_n: NonZeroUsize) -> Self {
        self.top_n = top_n;
        self
    }
}

// ---------------------------------------------------------------------------
// ViewBundle – everything the presentation layer draws
// ---------------------------------------------------------------------------

/// How complete a [`ViewBundle`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewStatus {
    /// Every table is populated.
    Ready,
    /// Rows matched but none had a numeric value in the selected year;
    /// only the long table is populated.
    InsufficientData,
    /// The requested year is not a column of the dataset; only the long
    /// table is populated.
    UnknownYear { year: i32 },
    /// The dataset has no year columns; every table is empty.
    NoYearColumns,
    /// No row has the requested category (and regions); every table is empty.
    NoMatchingRows,
}

/// Row counts behind one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    /// Rows passing the category/region filter.
    pub matched_rows: usize,
    /// Matched rows dropped from the selected year's series.
    pub excluded_rows: usize,
    /// Cells dropped from the long table.
    pub excluded_cells: usize,
}

/// Named result tables for one [`FilterSpec`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewBundle {
    pub category: String,
    /// Year the numeric views refer to, when one could be resolved.
    pub year: Option<i32>,
    pub status: ViewStatus,
    pub summary: Option<Summary>,
    pub ranked_top: RankedSubset,
    pub ranked_bottom: RankedSubset,
    /// Every region's value, largest first.
    pub by_region: NumericSeries,
    pub long_table: LongTable,
    pub diagnostics: Diagnostics,
}

impl ViewBundle {
    fn empty(spec: &FilterSpec, year: Option<i32>, status: ViewStatus) -> Self {
        ViewBundle {
            category: spec.category.clone(),
            year,
            status,
            summary: None,
            ranked_top: RankedSubset::new(),
            ranked_bottom: RankedSubset::new(),
            by_region: NumericSeries::new(),
            long_table: LongTable::default(),
            diagnostics: Diagnostics::default(),
        }
    }

    /// Whether there is nothing at all to draw.
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.long_table.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Run the whole pipeline for `spec`: filter → coerce → summary, rankings,
/// per-region series and long table.
///
/// Never fails; conditions that leave views empty are reported through
/// [`ViewBundle::status`].
pub fn evaluate(dataset: &RegionalDataset, spec: &FilterSpec, format: &NumberFormat) -> ViewBundle {
    let years = dataset.years();
    let subset = filter(dataset, &spec.category, &spec.regions);

    if subset.is_empty() {
        log::debug!("no rows for category '{}'", spec.category);
        return ViewBundle::empty(spec, spec.year, ViewStatus::NoMatchingRows);
    }
    let Some(latest) = years.latest() else {
        let mut bundle = ViewBundle::empty(spec, spec.year, ViewStatus::NoYearColumns);
        bundle.diagnostics.matched_rows = subset.len();
        return bundle;
    };

    let long_table = melt(&subset, years, format);
    let column = match spec.year {
        Some(year) => years.get(year).ok_or(year),
        None => Ok(latest),
    };

    let mut bundle = ViewBundle {
        long_table,
        ..ViewBundle::empty(spec, column.ok().map(|c| c.year), ViewStatus::Ready)
    };
    bundle.diagnostics.matched_rows = subset.len();
    bundle.diagnostics.excluded_cells = bundle.long_table.excluded;

    let column = match column {
        Ok(column) => column,
        Err(year) => {
            bundle.year = Some(year);
            bundle.status = ViewStatus::UnknownYear { year };
            return bundle;
        }
    };

    let coerced = coerce_column(&subset, column, format);
    bundle.diagnostics.excluded_rows = coerced.excluded;

    match summarize(&coerced.series) {
        Ok(summary) => {
            bundle.summary = Some(summary);
            bundle.ranked_top = rank(&coerced.series, spec.top_n, Direction::Descending);
            bundle.ranked_bottom = rank(&coerced.series, spec.top_n, Direction::Ascending);
            bundle.by_region = sorted(&coerced.series, Direction::Descending)
                .into_iter()
                .map(|p| (p.region, p.value))
                .collect();
        }
        Err(err) => {
            log::debug!("'{}' {}: {err}", spec.category, column.label);
            bundle.status = ViewStatus::InsufficientData;
        }
    }

    log::debug!(
        "evaluated '{}' {}: {} rows, {} excluded rows, {} excluded cells",
        spec.category,
        column.label,
        bundle.diagnostics.matched_rows,
        bundle.diagnostics.excluded_rows,
        bundle.diagnostics.excluded_cells
    );
    bundle
}

// ---------------------------------------------------------------------------
// Dashboard – the presentation-facing API
// ---------------------------------------------------------------------------

/// A loaded dataset and the calls a presentation layer makes against it.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: RegionalDataset,
    number_format: NumberFormat,
    report: Option<LoadReport>,
}

impl Dashboard {
    /// Load `path` and resolve its schema. Missing mandatory columns are fatal.
    pub fn open(path: &Path, options: &LoadOptions) -> Result<Self, LoadError> {
        options.number_format.validate()?;
        let (dataset, report) = load_file(path, options)?;
        Ok(Dashboard {
            dataset,
            number_format: options.number_format.clone(),
            report: Some(report),
        })
    }

    /// Wrap an already resolved dataset.
    pub fn from_dataset(dataset: RegionalDataset, number_format: NumberFormat) -> Self {
        Dashboard {
            dataset,
            number_format,
            report: None,
        }
    }

    pub fn dataset(&self) -> &RegionalDataset {
        &self.dataset
    }

    /// How the file was read, when the dashboard was opened from disk.
    pub fn load_report(&self) -> Option<&LoadReport> {
        self.report.as_ref()
    }

    /// Duplicate-year conflicts the caller should show to the user.
    pub fn ambiguities(&self) -> &[SchemaAmbiguity] {
        self.dataset.ambiguities()
    }

    /// Available years, ascending. Empty when the file has no year columns.
    pub fn list_years(&self) -> Vec<i32> {
        self.dataset.years().years()
    }

    /// Metric names in first-seen order.
    pub fn list_categories(&self) -> Vec<String> {
        self.dataset
            .distinct_values(ListColumn::Category)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Metric names sorted, as offered by the metric selector.
    pub fn list_categories_sorted(&self) -> Vec<String> {
        let mut categories = self.list_categories();
        categories.sort();
        categories
    }

    /// Region names in first-seen order.
    pub fn list_regions(&self) -> Vec<String> {
        self.dataset
            .distinct_values(ListColumn::Region)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Initial selection: first metric in sorted order, latest year,
    /// all regions. `None` when the dataset has no categories.
    pub fn default_spec(&self) -> Option<FilterSpec> {
        let category = self.list_categories_sorted().into_iter().next()?;
        let mut spec = FilterSpec::new(category);
        spec.year = self.dataset.years().latest().map(|c| c.year);
        Some(spec)
    }

    pub fn evaluate(&self, spec: &FilterSpec) -> ViewBundle {
        evaluate(&self.dataset, spec, &self.number_format)
    }
}
