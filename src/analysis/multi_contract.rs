use rayon::prelude::*;

use crate::config::DetectionParams;
use crate::error::LevelResult;
use crate::models::{ContractAnalysis, PriceSeries};

use super::pipeline::analyze_contract;

/// Result of analysing one contract inside a batch
#[derive(Debug)]
pub struct ContractOutcome {
    pub contract: String,
    pub result: LevelResult<ContractAnalysis>,
}

/// Runs the level pipeline over many contracts in parallel.
/// Every contract gets the same immutable parameters; outcomes keep the input order.
pub struct MultiContractAnalyzer {
    params: DetectionParams,
    outcomes: Vec<ContractOutcome>,
}

impl MultiContractAnalyzer {
    pub fn new(params: DetectionParams) -> Self {
        Self {
            params,
            outcomes: Vec::new(),
        }
    }

    pub fn params(&self) -> &DetectionParams {
        &self.params
    }

    /// Analyse every series. Replaces the outcomes of any previous run.
    pub fn run(&mut self, series: &[PriceSeries]) -> &[ContractOutcome] {
        let params = &self.params;
        self.outcomes = series
            .par_iter()
            .map(|s| ContractOutcome {
                contract: s.contract.clone(),
                result: analyze_contract(s, params),
            })
            .collect();

        for outcome in &self.outcomes {
            if let Err(e) = &outcome.result {
                log::warn!("{}: analysis failed: {}", outcome.contract, e);
            }
        }
        &self.outcomes
    }

    pub fn outcomes(&self) -> &[ContractOutcome] {
        &self.outcomes
    }

    /// Successful analyses, in input order
    pub fn successes(&self) -> Vec<&ContractAnalysis> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .collect()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    pub fn get_analysis(&self, contract: &str) -> Option<&ContractAnalysis> {
        self.outcomes
            .iter()
            .find(|o| o.contract == contract)
            .and_then(|o| o.result.as_ref().ok())
    }

    pub fn contract_count(&self) -> usize {
        self.outcomes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PricePoint;
    use crate::error::{InputError, LevelError};
    use chrono::{Duration, NaiveDate};

    fn zigzag(contract: &str, bars: usize, offset: f64) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let points = (0..bars)
            .map(|i| {
                // Period-8 triangle wave between 95.0 and 95.4
                let phase = (i % 8) as f64;
                let tri = if phase <= 4.0 { phase } else { 8.0 - phase };
                let c = offset + 95.0 + tri * 0.1;
                PricePoint::new(start + Duration::days(i as i64), c, c + 0.02, c - 0.02, c, 100)
            })
            .collect();
        PriceSeries::new(contract, points)
    }

    fn params() -> DetectionParams {
        DetectionParams {
            window: 3,
            min_touches: 1,
            strength_threshold: 0.0,
            price_tolerance: 0.001,
            ..Default::default()
        }
    }

    #[test]
    fn keeps_input_order_and_isolates_failures() {
        let series = vec![
            zigzag("MAR26", 60, 0.0),
            PriceSeries::new("BROKEN", Vec::new()),
            zigzag("SEP26", 60, 0.5),
        ];
        let mut analyzer = MultiContractAnalyzer::new(params());
        let outcomes = analyzer.run(&series);

        let names: Vec<&str> = outcomes.iter().map(|o| o.contract.as_str()).collect();
        assert_eq!(names, vec!["MAR26", "BROKEN", "SEP26"]);
        assert!(matches!(
            outcomes[1].result,
            Err(LevelError::Input(InputError::EmptySeries { .. }))
        ));

        assert_eq!(analyzer.contract_count(), 3);
        assert_eq!(analyzer.failure_count(), 1);
        assert_eq!(analyzer.successes().len(), 2);
        assert!(analyzer.get_analysis("SEP26").is_some());
        assert!(analyzer.get_analysis("BROKEN").is_none());
    }

    #[test]
    fn parallel_results_match_single_runs() {
        let series = vec![zigzag("MAR26", 60, 0.0), zigzag("JUN26", 45, 0.2)];
        let mut analyzer = MultiContractAnalyzer::new(params());
        analyzer.run(&series);

        for s in &series {
            let single = analyze_contract(s, analyzer.params()).unwrap();
            assert_eq!(analyzer.get_analysis(&s.contract), Some(&single));
        }
    }

    #[test]
    fn invalid_parameters_fail_every_contract() {
        let bad = DetectionParams {
            max_levels: 0,
            ..params()
        };
        let mut analyzer = MultiContractAnalyzer::new(bad);
        analyzer.run(&[zigzag("MAR26", 30, 0.0), zigzag("JUN26", 30, 0.0)]);
        assert_eq!(analyzer.failure_count(), 2);
        assert!(
            analyzer
                .outcomes()
                .iter()
                .all(|o| matches!(o.result, Err(LevelError::Configuration(_))))
        );
    }
}
