use anyhow::{Context, Result};
use chrono::Local;
use level_sniper::config::{CONTRACTS, DATA_PATH, contract_csv_filename};
use level_sniper::data::sample::generate_sample_points;
use level_sniper::data::save_price_csv;
use std::path::PathBuf;

/// Calendar days written per contract
const SAMPLE_DAYS: usize = 180;

fn main() -> Result<()> {
    build_sample_data()
}

fn build_sample_data() -> Result<()> {
    let end_date = Local::now().date_naive();
    let data_dir = PathBuf::from(DATA_PATH);

    for contract in CONTRACTS.default_contracts {
        let points = generate_sample_points(contract, SAMPLE_DAYS, end_date, &CONTRACTS.sample);
        let path = data_dir.join(contract_csv_filename(contract));
        save_price_csv(&path, &points)
            .with_context(|| format!("Failed to write sample data for {}", contract))?;

        println!("✅ {} bars for {} written to {:?}", points.len(), contract, path);
    }
    Ok(())
}
