//! Loader-specific error and configuration types.

use thiserror::Error;

/// Errors that can occur while loading CTD data.
///
/// The mapping and record variants are all fatal: an incomplete vocabulary or
/// a source row that violates the release format undermines correctness for
/// every downstream record, so the run aborts instead of skipping. Resolution
/// misses against a loaded map are deliberately NOT errors; the graph builder
/// logs them and skips the record.
#[derive(Error, Debug)]
pub enum CtdError {
    /// I/O error reading an input file.
    #[error("IO error reading input file: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A terminology mapping row has the wrong column count.
    #[error("Mapping table line {line}: expected {expected} columns, found {found}")]
    MappingLoad {
        /// 1-based line number within the mapping file.
        line: usize,
        /// Number of columns the table layout requires.
        expected: usize,
        /// Number of columns actually present.
        found: usize,
    },

    /// A source record has neither 9 nor 10 tab-delimited fields.
    #[error("Source line {line}: abnormal record length {field_count}: {record}")]
    MalformedRecord {
        /// 1-based line number within the source file.
        line: usize,
        /// Number of fields actually present.
        field_count: usize,
        /// The offending record, tab-joined.
        record: String,
    },

    /// A source record references neither an OMIM nor a PubMed record.
    #[error("Source record {row} carries neither an OMIM nor a PubMed id")]
    NoIdentifier {
        /// 0-based ordinal of the record after the skipped header.
        row: usize,
    },
}

/// Result type for CTD loading operations.
pub type CtdResult<T> = Result<T, CtdError>;

/// Configuration for reading the source association dump.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Number of leading boilerplate lines to skip before record data.
    ///
    /// This offset is release-dependent; the default matches the December
    /// 2015 CTD release. A wrong offset does not misparse silently: the
    /// first mis-aligned line fails with [`CtdError::MalformedRecord`].
    pub header_lines: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { header_lines: 28 }
    }
}
