use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use loanlens_core::{DATE_FORMAT, compute_features, extract_contracts};
use loanlens_store::{load_contract_blobs, write_features};
use tracing::info;

/// Flatten credit-bureau contract blobs and derive applicant risk features.
#[derive(Debug, Parser)]
#[command(name = "loanlens", version)]
struct Cli {
    /// Source CSV with a `contracts` column of JSON blobs.
    input: PathBuf,

    /// Application date in DD.MM.YYYY form.
    #[arg(long, value_name = "DATE")]
    application_date: String,

    /// Destination CSV for the single feature record.
    #[arg(long, default_value = "contract_features.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    // The whole run fails on a bad application date, before any loading.
    let application_date = NaiveDate::parse_from_str(&cli.application_date, DATE_FORMAT)
        .with_context(|| {
            format!(
                "invalid application date {:?}: expected DD.MM.YYYY",
                cli.application_date
            )
        })?;

    let blobs = load_contract_blobs(&cli.input)
        .with_context(|| format!("loading {}", cli.input.display()))?;

    let dataset = extract_contracts(blobs.iter().map(String::as_str));
    info!(
        rows = dataset.rows_read,
        contracts = dataset.contracts.len(),
        warnings = dataset.warnings.len(),
        "contracts flattened"
    );

    let features = compute_features(&dataset.contracts, application_date);
    info!(
        tot_claim_cnt_l180d = features.tot_claim_cnt_l180d,
        disb_bank_loan_wo_tbc = features.disb_bank_loan_wo_tbc,
        day_sinlastloan = features.day_sinlastloan,
        "features computed"
    );

    write_features(&cli.output, &features)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    Ok(())
}
