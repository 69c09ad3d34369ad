// Level detection: pivots -> clusters -> touch scoring -> classification
pub mod classifier;
pub mod clustering;
pub mod multi_contract;
pub mod pipeline;
pub mod pivots;
pub mod statistics;
pub mod touch_scoring;

// Re-export commonly used types
pub use multi_contract::{ContractOutcome, MultiContractAnalyzer};
pub use pipeline::{analyze_contract, detect_levels};
pub use statistics::compute_statistics;
