//! CSV source loading: one `contracts` JSON blob per applicant row.
//!
//! The source table may carry any number of other columns; only the
//! `contracts` column reaches the core. Rows where it is absent or empty
//! are dropped here, and unreadable records are skipped with a warning so
//! a single bad line cannot abort the batch.

use std::fs::File;
use std::path::Path;

use tracing::{info, warn};

use crate::StoreError;

const CONTRACTS_COLUMN: &str = "contracts";

/// Read the source CSV and return the `contracts` blob of every row that
/// has one, in source order.
///
/// Errors on a missing file, unreadable headers, or when the header row
/// lacks a `contracts` column.
pub fn load_contract_blobs(path: &Path) -> Result<Vec<String>, StoreError> {
    if !path.exists() {
        return Err(StoreError::SourceNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let column = reader
        .headers()?
        .iter()
        .position(|name| name.trim() == CONTRACTS_COLUMN)
        .ok_or(StoreError::MissingColumn(CONTRACTS_COLUMN))?;

    let mut blobs = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                warn!(row, %err, "skipping unreadable csv record");
                continue;
            }
        };
        match record.get(column).map(str::trim) {
            Some(blob) if !blob.is_empty() => blobs.push(blob.to_string()),
            _ => {}
        }
    }

    info!(rows = blobs.len(), path = %path.display(), "source data loaded");
    Ok(blobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_blobs_in_source_order() {
        let file = write_csv("id,contracts\n1,\"[{\"\"claim_id\"\": 1}]\"\n2,\"{\"\"claim_id\"\": 2}\"\n");
        let blobs = load_contract_blobs(file.path()).unwrap();
        assert_eq!(blobs.len(), 2);
        assert_eq!(blobs[0], r#"[{"claim_id": 1}]"#);
        assert_eq!(blobs[1], r#"{"claim_id": 2}"#);
    }

    #[test]
    fn drops_rows_with_empty_contracts_field() {
        let file = write_csv("id,contracts\n1,\n2,\"[]\"\n3,   \n");
        let blobs = load_contract_blobs(file.path()).unwrap();
        assert_eq!(blobs, vec!["[]".to_string()]);
    }

    #[test]
    fn missing_contracts_column_errors() {
        let file = write_csv("id,amount\n1,100\n");
        let result = load_contract_blobs(file.path());
        assert!(matches!(result, Err(StoreError::MissingColumn("contracts"))));
    }

    #[test]
    fn missing_file_errors() {
        let result = load_contract_blobs(Path::new("/nonexistent/source.csv"));
        assert!(matches!(result, Err(StoreError::SourceNotFound(_))));
    }

    #[test]
    fn short_records_are_tolerated() {
        // flexible(true): a row with fewer fields than the header simply
        // has no contracts value and is dropped.
        let file = write_csv("id,contracts\n1\n2,\"[]\"\n");
        let blobs = load_contract_blobs(file.path()).unwrap();
        assert_eq!(blobs, vec!["[]".to_string()]);
    }
}
