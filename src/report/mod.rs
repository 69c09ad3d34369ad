// Presentation and export of analysis results
pub mod csv_export;
pub mod json_export;
pub mod text;

pub use csv_export::export_levels_csv;
pub use json_export::export_analysis_json;
pub use text::{ComparisonTable, ContractReport};
