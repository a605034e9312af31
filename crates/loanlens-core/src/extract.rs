//! Tolerant flattening of raw `contracts` JSON blobs into contract records.
//!
//! Source rows are external, uncontrolled JSON: one malformed row or one
//! malformed element must not abort the rest of the batch. Extraction
//! therefore never fails — problems are emitted as `tracing` warnings and
//! returned as [`ParseWarning`] values so callers (and tests) can inspect
//! them without a subscriber.

use serde_json::Value;
use tracing::warn;

use crate::contract::Contract;

/// A row- or element-level problem encountered during extraction.
///
/// `row` is the zero-based index of the source row the blob came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub row: usize,
    pub message: String,
}

/// Extraction output: the flattened contract set plus row-level warnings.
///
/// `contracts` preserves source order. Built once per run; the feature
/// calculations all operate on the same slice.
#[derive(Debug, Clone, Default)]
pub struct ParsedDataset {
    pub contracts: Vec<Contract>,
    pub warnings: Vec<ParseWarning>,
    pub rows_read: usize,
}

/// Flatten every row's `contracts` blob into zero or more [`Contract`]s.
///
/// Each blob is decoded as JSON and handled by shape:
/// - an array: every object element becomes one contract; other elements
///   are skipped with a warning,
/// - a single object: one contract,
/// - anything else (string, number, boolean, null) or malformed JSON:
///   the row is skipped with a warning.
pub fn extract_contracts<'a, I>(blobs: I) -> ParsedDataset
where
    I: IntoIterator<Item = &'a str>,
{
    let mut dataset = ParsedDataset::default();

    for (row, blob) in blobs.into_iter().enumerate() {
        dataset.rows_read += 1;

        match serde_json::from_str::<Value>(blob) {
            Ok(Value::Array(elements)) => {
                for (index, element) in elements.iter().enumerate() {
                    match element {
                        Value::Object(object) => {
                            dataset.contracts.push(Contract::from_object(object));
                        }
                        other => skip(
                            &mut dataset.warnings,
                            row,
                            format!("element {index} is not an object: {other}"),
                        ),
                    }
                }
            }
            Ok(Value::Object(object)) => {
                dataset.contracts.push(Contract::from_object(&object));
            }
            Ok(other) => skip(
                &mut dataset.warnings,
                row,
                format!("unexpected contracts shape: {other}"),
            ),
            Err(err) => skip(
                &mut dataset.warnings,
                row,
                format!("malformed contracts JSON: {err}"),
            ),
        }
    }

    dataset
}

fn skip(warnings: &mut Vec<ParseWarning>, row: usize, message: String) {
    warn!(row, %message, "skipping during contract extraction");
    warnings.push(ParseWarning { row, message });
}
