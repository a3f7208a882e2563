use crate::config::NumberFormat;
use crate::data::coerce::parse_number;
use crate::data::filter::RowSubset;
use crate::data::model::{LongRow, LongTable, YearColumnMap};

/// Flatten the year columns of `subset` into (region, year, value) rows.
///
/// Output is region-major in row order, then year ascending. Cells that are
/// not numeric are left out and counted in [`LongTable::excluded`].
pub fn melt(subset: &RowSubset<'_>, years: &YearColumnMap, format: &NumberFormat) -> LongTable {
    let dataset = subset.dataset();
    let mut table = LongTable {
        rows: Vec::with_capacity(subset.len() * years.len()),
        excluded: 0,
    };

    for record in subset.records() {
        let region = dataset.region_of(record);
        for column in years.iter() {
            match parse_number(record.cell(column.index), format) {
                Some(value) => table.rows.push(LongRow {
                    region: region.to_string(),
                    year: column.year,
                    value,
                }),
                None => table.excluded += 1,
            }
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::filter::filter;
    use crate::data::model::{Record, RegionalDataset};

    fn dataset() -> RegionalDataset {
        let headers = ["시도별", "항목", "2021", "2019", "2020 p)"]
            .map(String::from)
            .to_vec();
        let records = [
            ["서울", "m", "3", "1", "2"],
            ["부산", "m", "30", "-", "20"],
            ["서울", "other", "9", "9", "9"],
        ]
        .iter()
        .map(|r| Record::new(r.map(String::from).to_vec()))
        .collect();
        RegionalDataset::from_records(headers, records, "항목", "시도별").unwrap()
    }

    #[test]
    fn region_major_year_ascending() {
        let ds = dataset();
        let table = melt(
            &filter(&ds, "m", &BTreeSet::new()),
            ds.years(),
            &NumberFormat::default(),
        );
        let triples: Vec<(&str, i32, f64)> = table
            .rows
            .iter()
            .map(|r| (r.region.as_str(), r.year, r.value))
            .collect();
        assert_eq!(
            triples,
            vec![
                ("서울", 2019, 1.0),
                ("서울", 2020, 2.0),
                ("서울", 2021, 3.0),
                ("부산", 2020, 20.0),
                ("부산", 2021, 30.0),
            ]
        );
        assert_eq!(table.excluded, 1);
        assert_eq!(table.len() + table.excluded, 2 * ds.years().len());
    }

    #[test]
    fn no_years_gives_empty_table() {
        let ds = dataset();
        let table = melt(
            &filter(&ds, "m", &BTreeSet::new()),
            &YearColumnMap::default(),
            &NumberFormat::default(),
        );
        assert!(table.is_empty());
        assert_eq!(table.excluded, 0);
    }
}
