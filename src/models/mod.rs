// Domain models for level detection
// These modules contain pure data types independent of I/O and presentation

pub mod analysis;
pub mod level;
pub mod series;

// Re-export key types for convenience
pub use analysis::{ContractAnalysis, LevelAnalysis, LevelStatistics};
pub use level::{CandidateLevel, LevelSide, Pivot, PivotKind, ScoredLevel};
pub use series::{PriceSeries, price_bounds, validate_points};
