use std::path::Path;

use encoding_rs::{Encoding, EUC_KR, UTF_8};
use serde_json::Value as JsonValue;

use super::model::{Record, RegionalDataset};
use crate::config::LoadOptions;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// What happened while reading a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Canonical name of the encoding used to decode the bytes.
    pub encoding: &'static str,
    /// Whether undecodable bytes were replaced with U+FFFD.
    pub had_replacements: bool,
    pub rows: usize,
    pub columns: usize,
}

/// Load a regional dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – delimited text, comma by default
/// * `.tsv`          – tab-delimited text
/// * `.json`         – `[{ "시도별": "서울", "항목": "...", "2020": 1234 }, ...]`
pub fn load_file(path: &Path, options: &LoadOptions) -> Result<(RegionalDataset, LoadReport), LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let (dataset, report) = match ext.as_str() {
        "csv" | "txt" => load_delimited(&bytes, options.delimiter.unwrap_or(b','), options)?,
        "tsv" => load_delimited(&bytes, options.delimiter.unwrap_or(b'\t'), options)?,
        "json" => load_json(&bytes, options)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "loaded {} ({} rows, {} columns, {}, {} year columns)",
        path.display(),
        report.rows,
        report.columns,
        report.encoding,
        dataset.years().len()
    );
    Ok((dataset, report))
}

// ---------------------------------------------------------------------------
// Text decoding
// ---------------------------------------------------------------------------

/// Microsoft names for the Korean code page that WHATWG does not list.
const KOREAN_ALIASES: [&str; 3] = ["cp949", "ms949", "uhc"];

/// Look up an encoding by WHATWG label or by one of the Microsoft aliases
/// for cp949 (`"cp949"`, `"ms949"`, `"uhc"`), case-insensitively.
pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    let label = label.trim();
    if KOREAN_ALIASES.iter().any(|a| a.eq_ignore_ascii_case(label)) {
        return Some(EUC_KR);
    }
    Encoding::for_label(label.as_bytes())
}

/// Pick the encoding for `bytes`: the explicit label if given, otherwise a
/// BOM, otherwise UTF-8 when the bytes are valid UTF-8, otherwise cp949.
pub fn resolve_encoding(bytes: &[u8], label: Option<&str>) -> Result<&'static Encoding, LoadError> {
    if let Some(label) = label {
        return encoding_for_label(label).ok_or_else(|| LoadError::UnknownEncoding(label.to_string()));
    }
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return Ok(encoding);
    }
    if std::str::from_utf8(bytes).is_ok() {
        Ok(UTF_8)
    } else {
        Ok(EUC_KR)
    }
}

fn decode(bytes: &[u8], options: &LoadOptions) -> Result<(String, &'static Encoding, bool), LoadError> {
    let encoding = resolve_encoding(bytes, options.encoding.as_deref())?;
    // A BOM, if present, overrides the chosen encoding and is stripped.
    let (text, used, had_replacements) = encoding.decode(bytes);
    if had_replacements {
        log::warn!(
            "input is not valid {}; undecodable bytes were replaced",
            used.name()
        );
    }
    Ok((text.into_owned(), used, had_replacements))
}

// ---------------------------------------------------------------------------
// Delimited loader
// ---------------------------------------------------------------------------

/// Header row with column names, one record per line.
/// Short rows are accepted; their missing cells read as empty.
pub fn load_delimited(
    bytes: &[u8],
    delimiter: u8,
    options: &LoadOptions,
) -> Result<(RegionalDataset, LoadReport), LoadError> {
    let (text, encoding, had_replacements) = decode(bytes, options)?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(LoadError::Empty);
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        records.push(Record::new(row.iter().map(|c| c.to_string()).collect()));
    }

    let report = LoadReport {
        encoding: encoding.name(),
        had_replacements,
        rows: records.len(),
        columns: headers.len(),
    };
    let dataset = RegionalDataset::from_records(
        headers,
        records,
        &options.category_column,
        &options.region_column,
    )?;
    Ok((dataset, report))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (`df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "시도별": "서울", "항목": "1인당 GRDP", "2020": 44000, "2021 p)": "47,000" },
///   ...
/// ]
/// ```
///
/// The header is the union of keys in first-seen order. Numbers and strings
/// become cell text; `null` and missing keys become empty cells.
pub fn load_json(bytes: &[u8], options: &LoadOptions) -> Result<(RegionalDataset, LoadReport), LoadError> {
    let (text, encoding, had_replacements) = decode(bytes, options)?;
    let rows: Vec<serde_json::Map<String, JsonValue>> = serde_json::from_str(&text)?;

    let mut headers: Vec<String> = Vec::new();
    for row in &rows {
        for key in row.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    if headers.is_empty() {
        return Err(LoadError::Empty);
    }

    let records: Vec<Record> = rows
        .iter()
        .map(|row| {
            Record::new(
                headers
                    .iter()
                    .map(|h| row.get(h).map(json_to_cell).unwrap_or_default())
                    .collect(),
            )
        })
        .collect();

    let report = LoadReport {
        encoding: encoding.name(),
        had_replacements,
        rows: records.len(),
        columns: headers.len(),
    };
    let dataset = RegionalDataset::from_records(
        headers,
        records,
        &options.category_column,
        &options.region_column,
    )?;
    Ok((dataset, report))
}

fn json_to_cell(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}
