//! Normalized contract records flattened from credit-bureau rows.
//!
//! A contract keeps its six fields as raw JSON values and coerces them to
//! typed dates/numbers lazily, per call. Absence (missing key or explicit
//! `null`) stays distinguishable from an unparsable value: the feature
//! formulas treat "no data" and "zero value" differently.

use chrono::NaiveDate;
use serde_json::{Map, Value};

/// Calendar date format used throughout the source data (`31.12.2024`).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// One normalized credit-bureau record (a claim or a disbursed loan).
///
/// Every field is optional; a contract is retained even when only some
/// keys are present in the source object. JSON `null` maps to `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contract {
    pub claim_id: Option<Value>,
    pub claim_date: Option<Value>,
    pub bank: Option<Value>,
    pub loan_summa: Option<Value>,
    pub contract_date: Option<Value>,
    pub summa: Option<Value>,
}

impl Contract {
    /// Build a contract from a decoded JSON object, taking each field by
    /// exact key name. No default substitution, no coercion at this stage.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            claim_id: field(object, "claim_id"),
            claim_date: field(object, "claim_date"),
            bank: field(object, "bank"),
            loan_summa: field(object, "loan_summa"),
            contract_date: field(object, "contract_date"),
            summa: field(object, "summa"),
        }
    }

    /// `claim_date` coerced to a calendar date.
    ///
    /// `None` when the field is absent, not a string, or not a valid
    /// `DD.MM.YYYY` date.
    pub fn claim_date(&self) -> Option<NaiveDate> {
        parse_date(self.claim_date.as_ref())
    }

    /// `contract_date` coerced to a calendar date; same rules as
    /// [`claim_date`](Self::claim_date).
    pub fn contract_date(&self) -> Option<NaiveDate> {
        parse_date(self.contract_date.as_ref())
    }

    /// `loan_summa` coerced to a number.
    ///
    /// Accepts finite JSON numbers and finite numeric strings; anything
    /// else is "no amount", not zero.
    pub fn loan_amount(&self) -> Option<f64> {
        match self.loan_summa.as_ref()? {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }
}

fn field(object: &Map<String, Value>, key: &str) -> Option<Value> {
    match object.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.clone()),
    }
}

fn parse_date(value: Option<&Value>) -> Option<NaiveDate> {
    let text = value?.as_str()?;
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}
