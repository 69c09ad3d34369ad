use std::fmt;

use crate::config::REPORT;
use crate::models::{ContractAnalysis, LevelSide, ScoredLevel};

/// Status column of the level tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum LevelStatus {
    #[strum(to_string = "<- NEAREST")]
    Nearest,
    #[strum(to_string = "STRONG")]
    Strong,
    #[strum(to_string = "MODERATE")]
    Moderate,
}

/// Levels arrive nearest-first, so position 0 is the nearest on its side.
pub fn level_status(position: usize, level: &ScoredLevel) -> LevelStatus {
    if position == 0 {
        LevelStatus::Nearest
    } else if level.touch_count >= REPORT.strong_level_touches {
        LevelStatus::Strong
    } else {
        LevelStatus::Moderate
    }
}

fn rule(f: &mut fmt::Formatter, ch: char) -> fmt::Result {
    writeln!(f, "{}", ch.to_string().repeat(REPORT.line_width))
}

// Ends the line
fn write_move_value(f: &mut fmt::Formatter, value: Option<f64>) -> fmt::Result {
    match value {
        Some(v) => writeln!(f, " ${v:.2}/contract"),
        None => writeln!(f),
    }
}

/// Full text report for one contract. Render with `to_string()` or `{}`.
pub struct ContractReport<'a>(pub &'a ContractAnalysis);

impl ContractReport<'_> {
    fn write_side(&self, f: &mut fmt::Formatter, side: LevelSide) -> fmt::Result {
        let analysis = &self.0.levels;
        let dp = REPORT.price_decimals;

        writeln!(f)?;
        rule(f, '-')?;
        writeln!(f, "{} LEVELS", side.to_string().to_uppercase())?;
        rule(f, '-')?;

        let levels = analysis.levels(side);
        if levels.is_empty() {
            return writeln!(f, "No {} levels detected", side.to_string().to_lowercase());
        }

        writeln!(
            f,
            "{:<10} {:>9} {:>8} {:>7} {:>8}  {:<12} {}",
            "Price", "Distance", "Dist %", "Touches", "Strength", "Last Touch", "Status"
        )?;
        rule(f, '-')?;
        for (position, level) in levels.iter().enumerate() {
            writeln!(
                f,
                "{:<10.dp$} {:>9.dp$} {:>7.2}% {:>7} {:>8.3}  {:<12} {}",
                level.price,
                level.distance_abs(analysis.current_price),
                level.distance_pct.abs(),
                level.touch_count,
                level.strength,
                level.last_touch.format(REPORT.date_format).to_string(),
                level_status(position, level),
            )?;
        }
        Ok(())
    }

    fn write_statistics(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let stats = &self.0.statistics;
        let dp = REPORT.price_decimals;

        writeln!(f)?;
        rule(f, '-')?;
        writeln!(f, "STATISTICS")?;
        rule(f, '-')?;

        if let (Some(level), Some(d), Some(pct)) = (
            stats.nearest_support,
            stats.support_distance,
            stats.support_distance_pct,
        ) {
            write!(f, "Nearest Support:    {level:.dp$} (-{d:.dp$}, {pct:.2}%)")?;
            write_move_value(f, stats.support_move_value)?;
        }
        if let (Some(level), Some(d), Some(pct)) = (
            stats.nearest_resistance,
            stats.resistance_distance,
            stats.resistance_distance_pct,
        ) {
            write!(f, "Nearest Resistance: {level:.dp$} (+{d:.dp$}, {pct:.2}%)")?;
            write_move_value(f, stats.resistance_move_value)?;
        }
        if let (Some(range), Some(position)) = (stats.trading_range, stats.position_in_range) {
            writeln!(f, "Trading Range:      {range:.dp$}")?;
            writeln!(f, "Position in Range:  {:.1}%", position * 100.0)?;
        }
        writeln!(
            f,
            "Levels:             {} support, {} resistance",
            stats.total_support_levels, stats.total_resistance_levels
        )?;
        if let Some(atr) = stats.atr {
            writeln!(f, "ATR ({}):           {atr:.dp$}", REPORT.atr_period)?;
        }
        Ok(())
    }
}

impl fmt::Display for ContractReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let analysis = &self.0.levels;
        let dp = REPORT.price_decimals;

        rule(f, '=')?;
        writeln!(f, "LEVEL ANALYSIS REPORT - {}", analysis.contract)?;
        rule(f, '=')?;
        writeln!(
            f,
            "Date: {}",
            analysis.current_date.format(REPORT.date_format)
        )?;
        writeln!(f, "Current Price: {:.dp$}", analysis.current_price)?;
        if let Some(rate) = self.0.statistics.implied_rate {
            writeln!(f, "Implied Rate: {rate:.3}%")?;
        }
        writeln!(f, "Bars Analysed: {}", analysis.bars_analysed)?;

        self.write_side(f, LevelSide::Support)?;
        self.write_side(f, LevelSide::Resistance)?;
        self.write_statistics(f)?;
        rule(f, '=')
    }
}

/// One row per contract: price, rate and the nearest level on each side.
pub struct ComparisonTable<'a>(pub &'a [&'a ContractAnalysis]);

impl fmt::Display for ComparisonTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let dp = REPORT.price_decimals;
        let fmt_opt = |value: Option<f64>| match value {
            Some(v) => format!("{v:.dp$}"),
            None => "-".to_string(),
        };

        rule(f, '=')?;
        writeln!(f, "MULTI-CONTRACT COMPARISON")?;
        rule(f, '=')?;
        writeln!(
            f,
            "{:<8} {:>10} {:>7} {:>10} {:>10} {:>5} {:>5}",
            "Contract", "Price", "Rate %", "Support", "Resist.", "#Sup", "#Res"
        )?;
        rule(f, '-')?;
        for analysis in self.0 {
            let stats = &analysis.statistics;
            writeln!(
                f,
                "{:<8} {:>10.dp$} {:>7} {:>10} {:>10} {:>5} {:>5}",
                analysis.contract(),
                analysis.levels.current_price,
                stats
                    .implied_rate
                    .map(|r| format!("{r:.3}"))
                    .unwrap_or_else(|| "-".to_string()),
                fmt_opt(stats.nearest_support),
                fmt_opt(stats.nearest_resistance),
                stats.total_support_levels,
                stats.total_resistance_levels,
            )?;
        }
        rule(f, '=')
    }
}
