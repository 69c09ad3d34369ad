use anyhow::{Result, bail};
use chrono::Local;
use clap::Parser;

use level_sniper::config::{AppConfig, CONTRACTS, analysis_json_filename, levels_csv_filename};
use level_sniper::data::{CsvSeriesSource, SampleSeriesSource, SeriesSource, load_with_fallback};
use level_sniper::report::{
    ComparisonTable, ContractReport, export_analysis_json, export_levels_csv,
};
use level_sniper::utils::time_utils::export_timestamp;
use level_sniper::{Cli, MultiContractAnalyzer, PriceSeries};

fn main() -> Result<()> {
    // A. Parse Args
    let args = Cli::parse();

    // B. Init Logging
    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
    #[cfg(debug_assertions)]
    log::debug!("Parsed arguments: {:?}", args);

    // C. Configuration: file, then command-line overrides
    let config = args.apply_to(AppConfig::load_or_default(&args.config)?);
    config.detection.validate()?;
    let params = config.detection.clone();

    let contracts = Cli::contract_codes(&config);
    if contracts.is_empty() {
        bail!("No contracts to analyse");
    }

    println!("{}", "=".repeat(70));
    println!("FUTURES SUPPORT & RESISTANCE ANALYZER");
    println!("{}", "=".repeat(70));
    for code in &contracts {
        println!("Contract: {}", code);
    }
    println!("Lookback period: {} days", params.lookback_days);
    println!("Minimum touches: {}", params.min_touches);
    println!("{}", "=".repeat(70));

    // D. Data Loading
    let sample_days = (params.lookback_days as usize).min(CONTRACTS.sample.max_days);
    let sample = SampleSeriesSource::new(sample_days, Local::now().date_naive());
    let sources: Vec<Box<dyn SeriesSource>> = if args.sample {
        vec![Box::new(sample)]
    } else {
        vec![Box::new(CsvSeriesSource::new(&config.data_dir)), Box::new(sample)]
    };

    let mut series: Vec<PriceSeries> = Vec::new();
    for code in &contracts {
        match load_with_fallback(&sources, code.name()) {
            Ok((s, signature)) => {
                if let (Some(first), Some(last)) = (s.first_date(), s.last_date()) {
                    log::info!(
                        "{}: {} bars ({} to {}) via {}",
                        code,
                        s.len(),
                        first,
                        last,
                        signature
                    );
                }
                series.push(s);
            }
            Err(e) => log::error!("Error loading {}: {:#}", code.name(), e),
        }
    }

    // E. Analysis
    let mut analyzer = MultiContractAnalyzer::new(params);
    analyzer.run(&series);

    for outcome in analyzer.outcomes() {
        match &outcome.result {
            Ok(analysis) => print!("\n{}", ContractReport(analysis)),
            Err(e) => println!("\nError analyzing {}: {}", outcome.contract, e),
        }
    }

    // F. Exports
    let successes = analyzer.successes();
    if args.export {
        let timestamp = export_timestamp();
        for analysis in &successes {
            let contract = analysis.contract();
            let csv_path = config
                .output_dir
                .join(levels_csv_filename(contract, &timestamp));
            let json_path = config
                .output_dir
                .join(analysis_json_filename(contract, &timestamp));
            if let Err(e) = export_levels_csv(&csv_path, analysis) {
                log::error!("⚠️  Failed to export levels for {}: {:#}", contract, e);
            }
            if let Err(e) = export_analysis_json(&json_path, analysis) {
                log::error!("⚠️  Failed to export analysis for {}: {:#}", contract, e);
            }
        }
        println!("\nOutput files saved to: {}", config.output_dir.display());
    }

    if args.compare && successes.len() > 1 {
        print!("\n{}", ComparisonTable(&successes));
    }

    if successes.is_empty() {
        bail!("No contract could be analysed");
    }
    println!("\nAnalysis complete!");
    Ok(())
}
