use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim, Writer};

use crate::config::contract_csv_filename;
use crate::domain::PricePoint;
use crate::models::{PriceSeries, validate_points};

use super::source::SeriesSource;

/// Reads `<data_dir>/<CONTRACT>.csv` files with a `Date,Open,High,Low,Close,Volume` header.
pub struct CsvSeriesSource {
    pub data_dir: PathBuf,
}

impl CsvSeriesSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn path_for(&self, contract: &str) -> PathBuf {
        self.data_dir.join(contract_csv_filename(contract))
    }
}

impl SeriesSource for CsvSeriesSource {
    fn load(&self, contract: &str) -> Result<PriceSeries> {
        let path = self.path_for(contract);
        let points = read_price_csv(&path)?;
        log::info!(
            "Loaded {} bars for {} from {}",
            points.len(),
            contract,
            path.display()
        );
        Ok(PriceSeries::new(contract, points))
    }

    fn signature(&self) -> &'static str {
        "CSV File"
    }
}

/// Parses and validates one price file. Dates must be strictly increasing.
pub fn read_price_csv(path: &Path) -> Result<Vec<PricePoint>> {
    let file = File::open(path).context(format!("Failed to open price file: {:?}", path))?;
    parse_price_csv(file).context(format!("Invalid price file: {}", path.display()))
}

pub fn parse_price_csv<R: Read>(reader: R) -> Result<Vec<PricePoint>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    for (row, record) in rdr.deserialize::<PricePoint>().enumerate() {
        // +2: header line plus 1-based numbering
        let point = record.context(format!("Malformed row at line {}", row + 2))?;
        points.push(point);
    }
    validate_points(&points)?;
    Ok(points)
}

/// Writes bars in the same schema `parse_price_csv` reads.
pub fn write_price_csv<W: Write>(writer: W, points: &[PricePoint]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    for point in points {
        wtr.serialize(point)
            .context(format!("Failed to serialize bar for {}", point.date))?;
    }
    wtr.flush().context("Failed to flush CSV writer")?;
    Ok(())
}

pub fn save_price_csv(path: &Path, points: &[PricePoint]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create directory: {}", parent.display()))?;
    }
    let file = File::create(path).context(format!("Failed to create file: {}", path.display()))?;
    write_price_csv(file, points)
        .context(format!("Failed to write prices to: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = "Date,Open,High,Low,Close,Volume
2026-01-05,95.50,95.60,95.40,95.55,120000
2026-01-06, 95.55 ,95.70,95.50,95.65,98000
2026-01-07,95.65,95.75,95.45,95.48,143000
";

    #[test]
    fn parses_well_formed_file() {
        let points = parse_price_csv(GOOD.as_bytes()).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[1].open, 95.55);
        assert_eq!(points[2].volume, 143_000);
        assert_eq!(points[0].date.to_string(), "2026-01-05");
    }

    #[test]
    fn rejects_unordered_dates() {
        let data = "Date,Open,High,Low,Close,Volume
2026-01-06,95.5,95.6,95.4,95.5,1
2026-01-05,95.5,95.6,95.4,95.5,1
";
        let err = parse_price_csv(data.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("not strictly increasing"));
    }

    #[test]
    fn rejects_inverted_bar() {
        let data = "Date,Open,High,Low,Close,Volume
2026-01-05,95.5,95.4,95.6,95.5,1
";
        assert!(parse_price_csv(data.as_bytes()).is_err());
    }

    #[test]
    fn malformed_row_reports_line() {
        let data = "Date,Open,High,Low,Close,Volume
2026-01-05,95.5,95.6,95.4,95.5,1
2026-01-06,abc,95.6,95.4,95.5,1
";
        let err = parse_price_csv(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn written_file_uses_loader_schema() {
        let points = parse_price_csv(GOOD.as_bytes()).unwrap();
        let mut buf = Vec::new();
        write_price_csv(&mut buf, &points).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "Date,Open,High,Low,Close,Volume");
        assert_eq!(lines.next().unwrap(), "2026-01-05,95.5,95.6,95.4,95.55,120000");
        assert_eq!(parse_price_csv(text.as_bytes()).unwrap(), points);
    }

    #[test]
    fn loads_contract_file_from_directory() {
        let dir = std::env::temp_dir().join(format!("level_sniper_csv_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("JUN26.csv"), GOOD).unwrap();

        let source = CsvSeriesSource::new(&dir);
        let series = source.load("JUN26").unwrap();
        assert_eq!(series.contract, "JUN26");
        assert_eq!(series.len(), 3);
        assert!(source.load("SEP26").is_err());

        std::fs::remove_dir_all(&dir).ok();
    }
}
