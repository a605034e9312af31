//! Feature output: exactly one CSV record with the three computed features.

use std::path::Path;

use loanlens_core::FeatureSet;
use tracing::info;

use crate::StoreError;

/// Persist the feature record as a one-row CSV with a header.
///
/// Column order follows the [`FeatureSet`] field order:
/// `tot_claim_cnt_l180d, disb_bank_loan_wo_tbc, day_sinlastloan`.
pub fn write_features(path: &Path, features: &FeatureSet) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.serialize(features)?;
    writer.flush()?;

    info!(path = %path.display(), "features saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_single_record() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("features.csv");

        let features = FeatureSet {
            tot_claim_cnt_l180d: 3,
            disb_bank_loan_wo_tbc: 200.0,
            day_sinlastloan: 13,
        };
        write_features(&path, &features).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("tot_claim_cnt_l180d,disb_bank_loan_wo_tbc,day_sinlastloan")
        );
        assert_eq!(lines.next(), Some("3,200.0,13"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn writes_sentinel_values_verbatim() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("features.csv");

        let features = FeatureSet {
            tot_claim_cnt_l180d: -3,
            disb_bank_loan_wo_tbc: -1.0,
            day_sinlastloan: -1,
        };
        write_features(&path, &features).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.lines().nth(1).unwrap().starts_with("-3,-1"));
    }

    #[test]
    fn unwritable_destination_errors() {
        let features = FeatureSet {
            tot_claim_cnt_l180d: 1,
            disb_bank_loan_wo_tbc: 1.0,
            day_sinlastloan: 1,
        };
        let result = write_features(Path::new("/nonexistent/dir/out.csv"), &features);
        assert!(matches!(result, Err(StoreError::Csv(_))));
    }
}
