use super::filter::RowSubset;
use super::model::{NumericSeries, YearColumn};
use crate::config::NumberFormat;

/// A numeric series plus the number of rows that could not be parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coerced {
    pub series: NumericSeries,
    pub excluded: usize,
}

/// Parse one cell. Returns `None` for empty, non-numeric, or non-finite text.
///
/// With a thousands separator configured, grouped input such as `"1,234.5"`
/// is accepted, but only when every group after the first has three digits.
/// The decimal mark is taken from `format`; with a non-`.` decimal mark a
/// literal `.` is only valid as the thousands separator.
pub fn parse_number(raw: &str, format: &NumberFormat) -> Option<f64> {
    let text = raw.trim();
    if text.is_empty() || format.thousands_separator == Some(format.decimal_separator) {
        return None;
    }

    let (sign, unsigned) = match text.strip_prefix(|c: char| c == '-' || c == '+') {
        Some(rest) => (&text[..1], rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match unsigned.split_once(format.decimal_separator) {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut digits = String::from(sign);
    match format.thousands_separator {
        Some(sep) if int_part.contains(sep) => {
            let mut groups = int_part.split(sep);
            let head = groups.next()?;
            if head.is_empty() || head.len() > 3 || !head.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            digits.push_str(head);
            for group in groups {
                if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                digits.push_str(group);
            }
        }
        _ => {
            if format.decimal_separator != '.' && int_part.contains('.') {
                return None;
            }
            digits.push_str(int_part);
        }
    }
    if let Some(frac) = frac_part {
        if frac.contains('.') || format.thousands_separator.is_some_and(|sep| frac.contains(sep)) {
            return None;
        }
        digits.push('.');
        digits.push_str(frac);
    }

    let value = digits.parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Convert one year column of `subset` into a [`NumericSeries`].
///
/// Rows whose cell does not parse are dropped and counted, never zero-filled.
pub fn coerce_column(subset: &RowSubset<'_>, column: &YearColumn, format: &NumberFormat) -> Coerced {
    let dataset = subset.dataset();
    let mut coerced = Coerced::default();
    for record in subset.records() {
        match parse_number(record.cell(column.index), format) {
            Some(value) => {
                coerced.series.push(dataset.region_of(record), value);
            }
            None => coerced.excluded += 1,
        }
    }
    if coerced.excluded > 0 {
        log::debug!(
            "column '{}': {} of {} rows not numeric",
            column.label,
            coerced.excluded,
            subset.len()
        );
    }
    coerced
}
