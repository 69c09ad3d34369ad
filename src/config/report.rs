//! Text report layout configuration

pub struct ReportConfig {
    /// Touch count at which a level is labelled STRONG
    pub strong_level_touches: usize,
    /// Width of the ruler lines
    pub line_width: usize,
    /// Decimal places for prices
    pub price_decimals: usize,
    pub date_format: &'static str,
    /// Bars in the average true range shown under the tables
    pub atr_period: usize,
}

pub const REPORT: ReportConfig = ReportConfig {
    strong_level_touches: 3,
    line_width: 70,
    price_decimals: 4,
    date_format: "%Y-%m-%d",
    atr_period: 14,
};
