//! Storage layer: CSV source loading (the `contracts` column) and feature output.

mod error;
mod read;
mod write;

pub use error::StoreError;
pub use read::load_contract_blobs;
pub use write::write_features;
