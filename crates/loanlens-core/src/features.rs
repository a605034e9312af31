//! Risk feature calculations over the flattened contract set.
//!
//! Each feature is an independent pure function over `&[Contract]` plus,
//! where needed, the application date. None of them fails: when a feature
//! cannot be meaningfully computed it returns a sentinel instead.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::contract::Contract;

/// Sentinel: the filtering stage found zero candidate records.
pub const NO_ELIGIBLE_DATA: i64 = -1;

/// Sentinel: candidates existed but date math, decoding, or the aggregate
/// failed or produced a non-positive value.
///
/// A true zero claim count and a non-positive loan sum both collapse to
/// this code; downstream consumers rely on the exact encoding.
pub const NOT_COMPUTABLE: i64 = -3;

/// Lookback window length for the claim count feature, in days.
const CLAIM_WINDOW_DAYS: i64 = 180;

/// Issuer codes excluded from the disbursed-loan sum.
const EXCLUDED_BANKS: [&str; 4] = ["LIZ", "LOM", "MKO", "SUG"];

/// The three derived risk features for one applicant.
///
/// Field order matches the output record column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub tot_claim_cnt_l180d: i64,
    pub disb_bank_loan_wo_tbc: f64,
    pub day_sinlastloan: i64,
}

/// Compute all three features over one flattened dataset.
///
/// The functions are independent and read-only; the dataset is built once
/// and shared.
pub fn compute_features(dataset: &[Contract], application_date: NaiveDate) -> FeatureSet {
    FeatureSet {
        tot_claim_cnt_l180d: tot_claim_cnt_l180d(dataset),
        disb_bank_loan_wo_tbc: disb_bank_loan_wo_tbc(dataset),
        day_sinlastloan: day_sinlastloan(dataset, application_date),
    }
}

/// Number of claims in the 180 days ending at the most recent valid claim date.
///
/// The window is inclusive on both ends and anchored at the dataset's own
/// maximum `claim_date`, not the application date. Only contracts with a
/// present `claim_id` count. Returns [`NOT_COMPUTABLE`] when no contract
/// has a valid `claim_date` or when the count is zero.
pub fn tot_claim_cnt_l180d(dataset: &[Contract]) -> i64 {
    let Some(reference) = dataset.iter().filter_map(Contract::claim_date).max() else {
        info!("no valid claim dates found");
        return NOT_COMPUTABLE;
    };
    let start = reference - Duration::days(CLAIM_WINDOW_DAYS);

    let count = dataset
        .iter()
        .filter(|c| c.claim_id.is_some())
        .filter_map(Contract::claim_date)
        .filter(|d| *d >= start && *d <= reference)
        .count() as i64;

    if count > 0 { count } else { NOT_COMPUTABLE }
}

/// Sum of disbursed loan amounts from third-party issuers.
///
/// A contract is eligible when its `bank` is present and not one of the
/// excluded issuer codes, and its `contract_date` is present (raw
/// presence — parseability does not matter here). Uncoercible
/// `loan_summa` values drop out of the sum rather than counting as zero.
/// Returns [`NO_ELIGIBLE_DATA`] as a float when nothing survives the
/// filter, and [`NOT_COMPUTABLE`] when the eligible amounts sum to zero
/// or less.
pub fn disb_bank_loan_wo_tbc(dataset: &[Contract]) -> f64 {
    let eligible: Vec<&Contract> = dataset
        .iter()
        .filter(|c| is_eligible_issuer(c) && c.contract_date.is_some())
        .collect();

    if eligible.is_empty() {
        return NO_ELIGIBLE_DATA as f64;
    }

    let total: f64 = eligible.iter().filter_map(|c| c.loan_amount()).sum();
    if total > 0.0 { total } else { NOT_COMPUTABLE as f64 }
}

/// Whole days between the application date and the most recent loan.
///
/// A contract qualifies when its `summa` marker is present and its
/// `contract_date` parses as a valid date. Returns [`NO_ELIGIBLE_DATA`]
/// when no contract qualifies, and [`NOT_COMPUTABLE`] when the
/// application date precedes the last recorded loan.
pub fn day_sinlastloan(dataset: &[Contract], application_date: NaiveDate) -> i64 {
    let Some(last_loan) = dataset
        .iter()
        .filter(|c| c.summa.is_some())
        .filter_map(Contract::contract_date)
        .max()
    else {
        return NO_ELIGIBLE_DATA;
    };

    let days = (application_date - last_loan).num_days();
    if days >= 0 { days } else { NOT_COMPUTABLE }
}

/// Membership test against the excluded issuer set.
///
/// An absent `bank` is excluded just like the named codes. A present
/// non-string value is not in the excluded set and therefore eligible.
fn is_eligible_issuer(contract: &Contract) -> bool {
    match &contract.bank {
        None => false,
        Some(Value::String(code)) => !EXCLUDED_BANKS.contains(&code.as_str()),
        Some(_) => true,
    }
}
