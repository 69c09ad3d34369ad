// Price series loading: CSV files with a sample-data fallback
pub mod csv_loader;
pub mod sample;
pub mod source;

// Re-export commonly used types
pub use csv_loader::{CsvSeriesSource, save_price_csv};
pub use sample::SampleSeriesSource;
pub use source::{SeriesSource, load_with_fallback};
