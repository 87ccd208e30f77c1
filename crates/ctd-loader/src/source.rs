//! Source dump reader.
//!
//! Reads `CTD_chemicals_diseases.tsv` into typed [`CtdRecord`]s. The dump
//! opens with a block of release-specific boilerplate lines that carries no
//! column header usable by a CSV reader, so the configured number of leading
//! lines is skipped before the tab-delimited records begin.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use ctd_types::CtdRecord;

use crate::mapping::truncate_at_blank_line;
use crate::types::{CtdError, CtdResult, SourceConfig};

/// Reads all association records from the source dump.
///
/// # Errors
/// Returns [`CtdError::FileNotFound`] if the path does not exist and
/// [`CtdError::MalformedRecord`] on a line with neither 9 nor 10 fields —
/// including the case where `config.header_lines` does not match the
/// release and record parsing starts inside the boilerplate.
pub fn read_source_records<P: AsRef<Path>>(
    path: P,
    config: &SourceConfig,
) -> CtdResult<Vec<CtdRecord>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CtdError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let bytes = fs::read(path)?;
    parse_source(&String::from_utf8_lossy(&bytes), config)
}

/// Reads association records from a reader.
pub fn source_records_from_reader<R: Read>(
    mut reader: R,
    config: &SourceConfig,
) -> CtdResult<Vec<CtdRecord>> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    parse_source(&buf, config)
}

fn parse_source(text: &str, config: &SourceConfig) -> CtdResult<Vec<CtdRecord>> {
    let body = skip_lines(text, config.header_lines);
    let body = truncate_at_blank_line(body);

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut records = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = config.header_lines + index + 1;
        records.push(record_from_fields(&record, line)?);
    }
    Ok(records)
}

/// Builds a [`CtdRecord`] from one tab-split row.
///
/// A 10-field row is taken as-is; a 9-field row gets an empty PubMed-ids
/// field appended (the dump omits the trailing field when it is empty).
/// Any other field count violates the release format and is fatal.
fn record_from_fields(record: &csv::StringRecord, line: usize) -> CtdResult<CtdRecord> {
    let field = |i: usize| record.get(i).unwrap_or("").to_string();

    match record.len() {
        n if n == CtdRecord::FIELD_COUNT || n == CtdRecord::FIELD_COUNT - 1 => Ok(CtdRecord {
            chemical_name: field(0),
            chemical_id: field(1),
            cas_rn: field(2),
            disease_name: field(3),
            disease_id: field(4),
            direct_evidence: field(5),
            inference_gene_symbol: field(6),
            inference_score: field(7),
            omim_ids: field(8),
            pubmed_ids: field(9),
        }),
        n => Err(CtdError::MalformedRecord {
            line,
            field_count: n,
            record: record.iter().collect::<Vec<_>>().join("\t"),
        }),
    }
}

/// Returns the remainder of `text` after its first `n` lines.
fn skip_lines(text: &str, n: usize) -> &str {
    let mut offset = 0;
    for (count, line) in text.split_inclusive('\n').enumerate() {
        if count == n {
            break;
        }
        offset += line.len();
    }
    &text[offset..]
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "# CTD_chemicals_diseases.tsv\n# release boilerplate\n";

    fn config(header_lines: usize) -> SourceConfig {
        SourceConfig { header_lines }
    }

    #[test]
    fn test_read_ten_field_record() {
        let data = format!(
            "{HEADER}Aspirin\tD001241\t50-78-2\tDiabetes Mellitus\tMESH:D003920\tmarker/mechanism\t\t\t\t12345678\n"
        );
        let records = source_records_from_reader(data.as_bytes(), &config(2)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].chemical_id, "D001241");
        assert_eq!(records[0].disease_id, "MESH:D003920");
        assert_eq!(records[0].pubmed_ids, "12345678");
    }

    #[test]
    fn test_nine_field_record_padded() {
        let data = format!(
            "{HEADER}Aspirin\tD001241\t50-78-2\tDiabetes Mellitus\tMESH:D003920\tmarker/mechanism\t\t\t100300\n"
        );
        let records = source_records_from_reader(data.as_bytes(), &config(2)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].omim_ids, "100300");
        assert_eq!(records[0].pubmed_ids, "");
    }

    #[test]
    fn test_abnormal_field_count_is_fatal() {
        let data = format!("{HEADER}Aspirin\tD001241\t50-78-2\n");
        let err = source_records_from_reader(data.as_bytes(), &config(2)).unwrap_err();
        match err {
            CtdError::MalformedRecord {
                line, field_count, ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(field_count, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_wrong_header_offset_fails_loudly() {
        // offset 1 leaves one boilerplate line in the record region
        let data = format!(
            "{HEADER}Aspirin\tD001241\t50-78-2\tDiabetes Mellitus\tMESH:D003920\tmarker/mechanism\t\t\t\t12345678\n"
        );
        let err = source_records_from_reader(data.as_bytes(), &config(1)).unwrap_err();
        assert!(matches!(err, CtdError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn test_stops_at_blank_line() {
        let data = format!(
            "{HEADER}Aspirin\tD001241\t50-78-2\tDiabetes Mellitus\tMESH:D003920\tmarker/mechanism\t\t\t\t12345678\n\ntrailing junk\n"
        );
        let records = source_records_from_reader(data.as_bytes(), &config(2)).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = read_source_records("/nonexistent/ctd.tsv", &SourceConfig::default())
            .unwrap_err();
        assert!(matches!(err, CtdError::FileNotFound { .. }));
    }
}
