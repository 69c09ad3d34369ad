//! File locations and export filenames

/// Directory holding one `<CONTRACT>.csv` per contract
pub const DATA_PATH: &str = "data";

/// Directory that receives CSV/JSON exports
pub const OUTPUT_PATH: &str = "output";

/// Default JSON configuration file (optional)
pub const CONFIG_PATH: &str = "level_sniper.json";

/// Timestamp format embedded in export filenames
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Example: "MAR26.csv"
pub fn contract_csv_filename(contract: &str) -> String {
    format!("{}.csv", contract)
}

/// Example: "MAR26_levels_20260317_101500.csv"
pub fn levels_csv_filename(contract: &str, timestamp: &str) -> String {
    format!("{}_levels_{}.csv", contract, timestamp)
}

/// Example: "MAR26_analysis_20260317_101500.json"
pub fn analysis_json_filename(contract: &str, timestamp: &str) -> String {
    format!("{}_analysis_{}.json", contract, timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_filenames_embed_contract_and_timestamp() {
        assert_eq!(contract_csv_filename("JUN26"), "JUN26.csv");
        assert_eq!(
            levels_csv_filename("JUN26", "20260101_000000"),
            "JUN26_levels_20260101_000000.csv"
        );
        assert_eq!(
            analysis_json_filename("JUN26", "20260101_000000"),
            "JUN26_analysis_20260101_000000.json"
        );
    }
}
