use anyhow::{Result, bail};
use chrono::{Days, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::CONTRACTS;
use crate::config::contract::SampleSeriesSettings;
use crate::domain::PricePoint;
use crate::models::PriceSeries;

use super::source::SeriesSource;

/// Synthetic daily bars for contracts with no data on disk.
///
/// The random walk is seeded from the contract name, so every contract always gets the same
/// series for a given `end_date` and length.
pub struct SampleSeriesSource {
    pub days: usize,
    pub end_date: NaiveDate,
}

impl SampleSeriesSource {
    pub fn new(days: usize, end_date: NaiveDate) -> Self {
        Self { days, end_date }
    }
}

impl SeriesSource for SampleSeriesSource {
    fn load(&self, contract: &str) -> Result<PriceSeries> {
        if self.days == 0 {
            bail!("Sample series length must be positive");
        }
        if self.days > CONTRACTS.sample.max_days {
            bail!(
                "Sample series length {} exceeds the limit of {} days",
                self.days,
                CONTRACTS.sample.max_days
            );
        }
        log::warn!("Generating {} days of sample data for {}", self.days, contract);
        let points = generate_sample_points(contract, self.days, self.end_date, &CONTRACTS.sample);
        Ok(PriceSeries::new(contract, points))
    }

    fn signature(&self) -> &'static str {
        "Sample Generator"
    }
}

/// FNV-1a over the contract name; stable across runs and platforms.
fn contract_seed(contract: &str) -> u64 {
    contract
        .bytes()
        .fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0000_0100_0000_01b3)
        })
}

/// Standard normal draw (Box-Muller)
fn standard_normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = 1.0 - rng.r#gen::<f64>();
    let u2: f64 = rng.r#gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Random walk around `base_price` with a linear drift, one bar per calendar day ending at
/// `end_date`. High/low bracket the close; the open sits inside the bar.
/// `days` is capped at `settings.max_days`.
pub fn generate_sample_points(
    contract: &str,
    days: usize,
    end_date: NaiveDate,
    settings: &SampleSeriesSettings,
) -> Vec<PricePoint> {
    let mut rng = StdRng::seed_from_u64(contract_seed(contract));
    let days = days.min(settings.max_days);
    let start = end_date
        .checked_sub_days(Days::new(days.saturating_sub(1) as u64))
        .unwrap_or(NaiveDate::MIN);

    let mut walk = settings.base_price;
    (0..days)
        .map(|i| {
            walk += standard_normal(&mut rng) * settings.daily_sigma;
            let drift = if days > 1 {
                settings.trend * i as f64 / (days - 1) as f64
            } else {
                0.0
            };
            let close = walk + drift;

            let daily_range = (standard_normal(&mut rng) * settings.range_sigma).abs();
            let high = close + daily_range * rng.gen_range(0.5..1.0);
            let low = close - daily_range * rng.gen_range(0.5..1.0);
            let open = low + (high - low) * rng.gen_range(0.3..0.7);
            let volume = rng.gen_range(settings.min_volume..settings.max_volume);

            PricePoint::new(
                start + Duration::days(i as i64),
                round4(open),
                round4(high),
                round4(low),
                round4(close),
                volume,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::validate_points;

    fn end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 31).unwrap()
    }

    #[test]
    fn same_contract_same_series() {
        let a = generate_sample_points("MAR26", 90, end(), &CONTRACTS.sample);
        let b = generate_sample_points("MAR26", 90, end(), &CONTRACTS.sample);
        assert_eq!(a, b);
    }

    #[test]
    fn different_contracts_differ() {
        let a = generate_sample_points("MAR26", 30, end(), &CONTRACTS.sample);
        let b = generate_sample_points("JUN26", 30, end(), &CONTRACTS.sample);
        assert_ne!(a, b);
    }

    #[test]
    fn generated_bars_are_valid_and_end_on_requested_date() {
        let points = generate_sample_points("SEP26", 120, end(), &CONTRACTS.sample);
        assert_eq!(points.len(), 120);
        assert_eq!(points.last().unwrap().date, end());
        validate_points(&points).unwrap();
        for p in &points {
            assert!(p.volume >= CONTRACTS.sample.min_volume);
            assert!(p.volume < CONTRACTS.sample.max_volume);
            assert!(p.close > 90.0 && p.close < 101.0);
        }
    }

    #[test]
    fn source_wraps_generator() {
        let source = SampleSeriesSource::new(45, end());
        let series = source.load("DEC26").unwrap();
        assert_eq!(series.contract, "DEC26");
        assert_eq!(series.len(), 45);
        assert!(SampleSeriesSource::new(0, end()).load("DEC26").is_err());
    }

    #[test]
    fn oversized_requests_are_bounded() {
        let too_long = CONTRACTS.sample.max_days + 1;
        assert!(SampleSeriesSource::new(too_long, end()).load("DEC26").is_err());

        let points = generate_sample_points("DEC26", usize::MAX, end(), &CONTRACTS.sample);
        assert_eq!(points.len(), CONTRACTS.sample.max_days);
        assert_eq!(points.last().unwrap().date, end());
    }
}
