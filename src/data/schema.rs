use super::model::{YearColumn, YearColumnMap};
use crate::error::SchemaAmbiguity;

/// Year columns found in a header row, plus any duplicate-year conflicts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearSchema {
    pub years: YearColumnMap,
    pub ambiguities: Vec<SchemaAmbiguity>,
}

/// Year encoded in the leading four characters of a label, if they are all
/// ASCII digits. Surrounding whitespace is ignored.
pub fn year_of(label: &str) -> Option<i32> {
    let mut chars = label.trim().chars();
    let mut year = 0i32;
    for _ in 0..4 {
        let digit = chars.next()?.to_digit(10)?;
        year = year * 10 + digit as i32;
    }
    Some(year)
}

/// Scan `labels` left to right and build the year → column mapping.
///
/// When two labels yield the same year the first one is kept and the
/// conflict is recorded instead of being resolved silently.
pub fn inspect_columns<S: AsRef<str>>(labels: &[S]) -> YearSchema {
    let mut schema = YearSchema::default();
    for (index, label) in labels.iter().enumerate() {
        let label = label.as_ref();
        let Some(year) = year_of(label) else {
            continue;
        };
        let column = YearColumn {
            year,
            label: label.to_string(),
            index,
        };
        if let Err(kept) = schema.years.try_insert(column) {
            schema.ambiguities.push(SchemaAmbiguity {
                year,
                kept: kept.label.clone(),
                ignored: label.to_string(),
            });
        }
    }
    schema
}
