// Domain types and value objects
pub mod contract;
pub mod price_point;

// Re-export commonly used types
pub use contract::ContractCode;
pub use price_point::PricePoint;
