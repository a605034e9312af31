pub mod contract;
pub mod extract;
pub mod features;

pub use contract::{Contract, DATE_FORMAT};
pub use extract::{ParseWarning, ParsedDataset, extract_contracts};
pub use features::{FeatureSet, NO_ELIGIBLE_DATA, NOT_COMPUTABLE, compute_features};
