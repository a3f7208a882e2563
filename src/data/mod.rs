/// Data layer: core types, loading, schema resolution, filtering, coercion.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json  (cp949, UTF-8, ...)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decode + parse file → RegionalDataset
///   └──────────┘
///        │            schema: year-labelled columns → YearColumnMap
///        ▼
///   ┌─────────────────┐
///   │ RegionalDataset  │  Vec<Record>, resolved column positions
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  category + region set → RowSubset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  coerce   │  one year column → NumericSeries (+ excluded count)
///   └──────────┘
/// ```

pub mod coerce;
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
