use std::collections::BTreeSet;

use super::model::{Record, RegionalDataset};

// ---------------------------------------------------------------------------
// Row selection
// ---------------------------------------------------------------------------

/// Rows of a dataset that passed a filter, in original order.
#[derive(Debug, Clone)]
pub struct RowSubset<'a> {
    dataset: &'a RegionalDataset,
    indices: Vec<usize>,
}

impl<'a> RowSubset<'a> {
    pub fn dataset(&self) -> &'a RegionalDataset {
        self.dataset
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Matching records in original order.
    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return the rows whose category equals `category` exactly.
///
/// A row passes the region constraint when:
/// * `regions` is empty → passes (no constraint, all regions)
/// * the row's region is in `regions` → passes
///
/// A category that matches nothing yields an empty subset, not an error.
pub fn filter<'a>(
    dataset: &'a RegionalDataset,
    category: &str,
    regions: &BTreeSet<String>,
) -> RowSubset<'a> {
    let indices = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            if dataset.category_of(record) != category {
                return false;
            }
            regions.is_empty() || regions.contains(dataset.region_of(record))
        })
        .map(|(i, _)| i)
        .collect();

    RowSubset { dataset, indices }
}
