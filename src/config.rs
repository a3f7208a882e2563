use std::num::NonZeroUsize;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Ranking bounds
// ---------------------------------------------------------------------------

/// Number of regions shown in each ranking when the caller does not choose.
pub const DEFAULT_TOP_N: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => panic!("default ranking size must be non-zero"),
};

/// Range offered by the ranking size selector. The ranker only needs n >= 1.
pub const TOP_N_RANGE: RangeInclusive<usize> = 3..=20;

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// How numeric cells are written in the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Digit-grouping character, e.g. `,` in `"1,234.5"`. `None` disables grouping.
    pub thousands_separator: Option<char>,
    /// Character between integer and fraction digits.
    pub decimal_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            thousands_separator: Some(','),
            decimal_separator: '.',
        }
    }
}

impl NumberFormat {
    /// Grouping and decimal marks must differ, and neither may be a digit or sign.
    pub fn validate(&self) -> Result<(), LoadError> {
        let usable = |c: char| !c.is_ascii_digit() && c != '-' && c != '+';
        if !usable(self.decimal_separator) {
            return Err(LoadError::Settings(format!(
                "'{}' cannot be a decimal separator",
                self.decimal_separator
            )));
        }
        match self.thousands_separator {
            Some(sep) if sep == self.decimal_separator => Err(LoadError::Settings(format!(
                "thousands and decimal separator are both '{sep}'"
            ))),
            Some(sep) if !usable(sep) => Err(LoadError::Settings(format!(
                "'{sep}' cannot be a thousands separator"
            ))),
            _ => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Load options
// ---------------------------------------------------------------------------

/// Everything needed to turn a file on disk into a dataset.
///
/// Deserializable so it can live in a settings document:
///
/// ```json
/// { "encoding": "cp949", "category_column": "항목", "region_column": "시도별" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// WHATWG encoding label. `None` sniffs a BOM, then tries UTF-8,
    /// then falls back to cp949.
    pub encoding: Option<String>,
    /// Field delimiter. `None` picks tab for `.tsv` and comma otherwise.
    pub delimiter: Option<u8>,
    /// Column holding the metric name.
    pub category_column: String,
    /// Column holding the province name.
    pub region_column: String,
    pub number_format: NumberFormat,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            encoding: None,
            delimiter: None,
            category_column: "항목".to_string(),
            region_column: "시도별".to_string(),
            number_format: NumberFormat::default(),
        }
    }
}

impl LoadOptions {
    /// Parse a JSON settings document; missing keys keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, LoadError> {
        let options: LoadOptions =
            serde_json::from_str(text).map_err(|e| LoadError::Settings(e.to_string()))?;
        options.number_format.validate()?;
        Ok(options)
    }

    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }

    pub fn with_columns(mut self, category: impl Into<String>, region: impl Into<String>) -> Self {
        self.category_column = category.into();
        self.region_column = region.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_dataset() {
        let opts = LoadOptions::default();
        assert_eq!(opts.category_column, "항목");
        assert_eq!(opts.region_column, "시도별");
        assert_eq!(opts.encoding, None);
        assert_eq!(opts.number_format.thousands_separator, Some(','));
        assert_eq!(opts.number_format.decimal_separator, '.');
        assert!(TOP_N_RANGE.contains(&DEFAULT_TOP_N.get()));
    }

    #[test]
    fn partial_settings_keep_defaults() {
        let opts = LoadOptions::from_json_str(r#"{ "encoding": "euc-kr" }"#).unwrap();
        assert_eq!(opts.encoding.as_deref(), Some("euc-kr"));
        assert_eq!(opts.region_column, "시도별");

        let opts = LoadOptions::from_json_str(
            r#"{ "number_format": { "thousands_separator": null }, "delimiter": 59 }"#,
        )
        .unwrap();
        assert_eq!(opts.number_format.thousands_separator, None);
        assert_eq!(opts.delimiter, Some(b';'));
    }

    #[test]
    fn european_number_format() {
        let opts = LoadOptions::from_json_str(
            r#"{ "number_format": { "thousands_separator": ".", "decimal_separator": "," } }"#,
        )
        .unwrap();
        assert_eq!(opts.number_format.thousands_separator, Some('.'));
        assert_eq!(opts.number_format.decimal_separator, ',');
    }

    #[test]
    fn clashing_separators_are_rejected() {
        let err = LoadOptions::from_json_str(r#"{ "number_format": { "thousands_separator": "." } }"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::Settings(_)));

        let digit = NumberFormat {
            decimal_separator: '5',
            ..NumberFormat::default()
        };
        assert!(digit.validate().is_err());
        assert!(NumberFormat::default().validate().is_ok());
    }

    #[test]
    fn bad_settings_are_reported() {
        let err = LoadOptions::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Settings(_)));
    }
}
