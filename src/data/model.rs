use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::schema::inspect_columns;
use crate::error::{ColumnRole, LoadError, SchemaAmbiguity};

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single source row. Cells are kept as raw text; numeric interpretation
/// happens per request in [`super::coerce`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    cells: Vec<String>,
}

impl Record {
    pub fn new(cells: Vec<String>) -> Self {
        Record { cells }
    }

    /// Raw text at `index`; cells past the end of a short row read as empty.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Year columns
// ---------------------------------------------------------------------------

/// A column whose label starts with a four-digit year, e.g. `"2021 p)"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearColumn {
    pub year: i32,
    /// Label as written in the header row.
    pub label: String,
    /// Position in the header row.
    #[serde(skip)]
    pub index: usize,
}

/// Year → column mapping, iterated in ascending year order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearColumnMap {
    columns: BTreeMap<i32, YearColumn>,
}

impl YearColumnMap {
    /// Register a column unless its year is already taken.
    /// Returns the column already holding that year on conflict.
    pub(crate) fn try_insert(&mut self, column: YearColumn) -> Result<(), &YearColumn> {
        use std::collections::btree_map::Entry;
        match self.columns.entry(column.year) {
            Entry::Vacant(slot) => {
                slot.insert(column);
                Ok(())
            }
            Entry::Occupied(slot) => Err(&*slot.into_mut()),
        }
    }

    pub fn get(&self, year: i32) -> Option<&YearColumn> {
        self.columns.get(&year)
    }

    pub fn iter(&self) -> impl Iterator<Item = &YearColumn> {
        self.columns.values()
    }

    pub fn years(&self) -> Vec<i32> {
        self.columns.keys().copied().collect()
    }

    pub fn latest(&self) -> Option<&YearColumn> {
        self.columns.values().next_back()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Derived tables
// ---------------------------------------------------------------------------

/// One region's value in a single year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionValue {
    pub region: String,
    pub value: f64,
}

/// Row-aligned (region, value) pairs from one year column.
/// Only finite values are ever stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NumericSeries {
    points: Vec<RegionValue>,
}

impl NumericSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a point; returns `false` (and stores nothing) for NaN or ±inf.
    pub fn push(&mut self, region: impl Into<String>, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.points.push(RegionValue {
            region: region.into(),
            value,
        });
        true
    }

    pub fn points(&self) -> &[RegionValue] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RegionValue> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<(String, f64)> for NumericSeries {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut series = NumericSeries::new();
        for (region, value) in iter {
            series.push(region, value);
        }
        series
    }
}

impl<'a> IntoIterator for &'a NumericSeries {
    type Item = &'a RegionValue;
    type IntoIter = std::slice::Iter<'a, RegionValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Ordered subset produced by the ranker; length never exceeds the requested n.
pub type RankedSubset = Vec<RegionValue>;

/// One cell of the long (melted) table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongRow {
    pub region: String,
    pub year: i32,
    pub value: f64,
}

/// Region-major, year-ascending triples. Cells that failed coercion are absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LongTable {
    pub rows: Vec<LongRow>,
    /// Cells dropped because they were not numeric.
    pub excluded: usize,
}

impl LongTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// RegionalDataset – the loaded table
// ---------------------------------------------------------------------------

/// Distinct-value lists the dataset can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListColumn {
    Category,
    Region,
}

/// The immutable, fully resolved dataset.
///
/// Mandatory columns and year columns are located once here; everything
/// downstream addresses cells through these resolved positions.
#[derive(Debug, Clone)]
pub struct RegionalDataset {
    headers: Vec<String>,
    category_index: usize,
    region_index: usize,
    years: YearColumnMap,
    ambiguities: Vec<SchemaAmbiguity>,
    records: Vec<Record>,
}

impl RegionalDataset {
    /// Resolve the schema of a freshly parsed table.
    ///
    /// Fails with [`LoadError::MissingColumn`] when the category or region
    /// column is absent. Labels are compared after trimming whitespace.
    pub fn from_records(
        headers: Vec<String>,
        records: Vec<Record>,
        category_column: &str,
        region_column: &str,
    ) -> Result<Self, LoadError> {
        let find = |name: &str, role: ColumnRole| {
            headers
                .iter()
                .position(|h| h.trim() == name.trim())
                .ok_or_else(|| LoadError::MissingColumn {
                    role,
                    name: name.to_string(),
                })
        };
        let category_index = find(category_column, ColumnRole::Category)?;
        let region_index = find(region_column, ColumnRole::Region)?;

        let schema = inspect_columns(&headers);
        for ambiguity in &schema.ambiguities {
            log::warn!("{ambiguity}");
        }
        if schema.years.is_empty() {
            log::warn!("no year columns found; time-series views are unavailable");
        }

        Ok(RegionalDataset {
            headers,
            category_index,
            region_index,
            years: schema.years,
            ambiguities: schema.ambiguities,
            records,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn years(&self) -> &YearColumnMap {
        &self.years
    }

    /// Duplicate-year conflicts found while resolving the schema.
    pub fn ambiguities(&self) -> &[SchemaAmbiguity] {
        &self.ambiguities
    }

    pub fn category_of<'a>(&self, record: &'a Record) -> &'a str {
        record.cell(self.category_index)
    }

    pub fn region_of<'a>(&self, record: &'a Record) -> &'a str {
        record.cell(self.region_index)
    }

    /// Distinct non-empty values of a column in first-seen order.
    pub fn distinct_values(&self, column: ListColumn) -> Vec<&str> {
        let index = match column {
            ListColumn::Category => self.category_index,
            ListColumn::Region => self.region_index,
        };
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.cell(index))
            .filter(|v| !v.trim().is_empty())
            .filter(|v| seen.insert(*v))
            .collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
