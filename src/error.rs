use std::fmt;

use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// LoadError – fatal, surfaced once at load time
// ---------------------------------------------------------------------------

/// Which mandatory column a [`LoadError::MissingColumn`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Category,
    Region,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnRole::Category => write!(f, "category"),
            ColumnRole::Region => write!(f, "region"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed delimited data: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("unknown text encoding label '{0}'")]
    UnknownEncoding(String),

    #[error("{role} column '{name}' not found in the dataset")]
    MissingColumn { role: ColumnRole, name: String },

    #[error("dataset has no header row")]
    Empty,

    #[error("invalid settings: {0}")]
    Settings(String),
}

// ---------------------------------------------------------------------------
// Recoverable conditions
// ---------------------------------------------------------------------------

/// Aggregation was attempted on a series with no values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot summarize an empty series")]
pub struct EmptySeriesError;

/// Two column labels resolved to the same year.
///
/// The first-seen column is kept; the other one is reported here and never
/// read by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaAmbiguity {
    pub year: i32,
    pub kept: String,
    pub ignored: String,
}

impl fmt::Display for SchemaAmbiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "columns '{}' and '{}' both map to year {}; using '{}'",
            self.kept, self.ignored, self.year, self.kept
        )
    }
}
