//! Batch runs: simulate, score every curve, aggregate.

use crate::cancel::CancellationToken;
use crate::engine::SimulationEngine;
use crate::error::Result;
use crate::random::{self, RandomSource};
use eqsim_domain::{
    AggregateError, AggregateReport, EquityCurve, Metrics, ParameterSet, aggregate,
    compute_metrics,
};
use rand::Rng;
use rayon::prelude::*;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    pub curves: Vec<EquityCurve>,
    pub metrics: Vec<Metrics>,
    pub report: AggregateReport,
}

impl BatchResult {
    #[must_use]
    pub fn final_equities(&self) -> Vec<f64> {
        self.curves.iter().map(EquityCurve::final_equity).collect()
    }

    pub fn filter<F>(&self, mut keep: F) -> std::result::Result<Self, AggregateError>
    where
        F: FnMut(&EquityCurve) -> bool,
    {
        let curves: Vec<EquityCurve> = self.curves.iter().filter(|c| keep(c)).cloned().collect();
        let (metrics, report) = summarize(&curves)?;
        Ok(Self {
            curves,
            metrics,
            report,
        })
    }
}

pub fn summarize(
    curves: &[EquityCurve],
) -> std::result::Result<(Vec<Metrics>, AggregateReport), AggregateError> {
    let metrics: Vec<Metrics> = curves.iter().map(compute_metrics).collect();
    let finals: Vec<f64> = curves.iter().map(EquityCurve::final_equity).collect();
    let report = aggregate(&metrics, &finals)?;
    Ok((metrics, report))
}

pub fn run_batch(params: &ParameterSet, source: &mut dyn RandomSource) -> Result<BatchResult> {
    let curves = SimulationEngine::new(params).run(source)?;
    let (metrics, report) = summarize(&curves)?;
    Ok(BatchResult {
        curves,
        metrics,
        report,
    })
}

#[derive(Debug, Clone)]
pub struct MonteCarloRunner {
    pub params: ParameterSet,
    pub seed: Option<u64>,
    pub parallel: bool,
    pub cancellation: Option<CancellationToken>,
}

impl MonteCarloRunner {
    #[must_use]
    pub fn new(params: ParameterSet) -> Self {
        Self {
            params,
            seed: None,
            parallel: false,
            cancellation: None,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn run(&self) -> Result<(u64, BatchResult)> {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        info!(
            seed,
            simulations = self.params.num_simulations(),
            trades = self.params.num_trades(),
            parallel = self.parallel,
            "starting Monte Carlo run"
        );

        let mut engine = SimulationEngine::new(&self.params);
        if let Some(token) = &self.cancellation {
            engine = engine.with_cancellation(token.clone());
        }

        let result = if self.parallel {
            let curves = engine.run_parallel(seed)?;
            let metrics: Vec<Metrics> = curves.par_iter().map(compute_metrics).collect();
            let finals: Vec<f64> = curves.iter().map(EquityCurve::final_equity).collect();
            let report = aggregate(&metrics, &finals)?;
            BatchResult {
                curves,
                metrics,
                report,
            }
        } else {
            let curves = engine.run(&mut random::seeded(seed))?;
            let (metrics, report) = summarize(&curves)?;
            BatchResult {
                curves,
                metrics,
                report,
            }
        };

        info!(
            seed,
            mean_final_equity = result.report.final_equity.average,
            mean_total_return = result.report.total_return.average,
            "Monte Carlo run complete"
        );
        Ok((seed, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimulationError;
    use crate::random::seeded;
    use eqsim_domain::{RawParameters, RiskType};

    fn params(raw: RawParameters) -> ParameterSet {
        raw.into_parameters().unwrap()
    }

    #[test]
    fn test_run_batch_all_wins_scenario() {
        let p = params(
            RawParameters::default()
                .with_starting_equity(10_000.0)
                .with_num_trades(3)
                .with_num_simulations(1)
                .with_win_rate_pct(100.0)
                .with_reward_risk(2.0)
                .with_risk_type(RiskType::Fixed)
                .with_risk_size_pct(1.0),
        );
        let batch = run_batch(&p, &mut seeded(0)).unwrap();

        assert_eq!(batch.curves.len(), 1);
        assert_eq!(batch.metrics.len(), 1);
        assert!((batch.curves[0].final_equity() - 10_612.08).abs() < 1e-9);

        let metrics = batch.metrics[0];
        assert!((metrics.total_return - 6.1208).abs() < 1e-9);
        assert_eq!(metrics.max_drawdown, 0.0);
        assert_eq!(metrics.profit_factor, f64::INFINITY);
        assert!(metrics.sharpe_ratio.is_nan());

        assert_eq!(batch.report.simulations, 1);
        assert_eq!(
            batch.report.final_equity.minimum,
            batch.report.final_equity.maximum
        );
    }

    #[test]
    fn test_all_wins_sharpe_is_undefined_for_long_runs() {
        let p = params(
            RawParameters::default()
                .with_num_trades(100)
                .with_num_simulations(3)
                .with_win_rate_pct(100.0),
        );
        let batch = run_batch(&p, &mut seeded(9)).unwrap();

        assert!(batch.metrics.iter().all(|m| m.sharpe_ratio.is_nan()));
        assert!(batch.report.sharpe_ratio.average.is_nan());
    }

    #[test]
    fn test_run_batch_deterministic_with_seed() {
        let p = params(
            RawParameters::default()
                .with_num_trades(40)
                .with_num_simulations(6)
                .with_martingale(1.5, 3),
        );
        let a = run_batch(&p, &mut seeded(2024)).unwrap();
        let b = run_batch(&p, &mut seeded(2024)).unwrap();
        assert_eq!(a.curves, b.curves);
        assert_eq!(a.report.total_return, b.report.total_return);
    }

    #[test]
    fn test_batch_invariants() {
        let p = params(
            RawParameters::default()
                .with_num_trades(100)
                .with_num_simulations(25),
        );
        let batch = run_batch(&p, &mut seeded(8)).unwrap();

        for (curve, metrics) in batch.curves.iter().zip(&batch.metrics) {
            assert_eq!(curve.len(), 101);
            assert!(metrics.max_drawdown >= 0.0);
            let non_decreasing = curve.points().windows(2).all(|w| w[1] >= w[0]);
            assert_eq!(metrics.max_drawdown == 0.0, non_decreasing);
            assert_eq!(*metrics, compute_metrics(curve));
        }
        let report = &batch.report;
        assert!(report.final_equity.minimum <= report.final_equity.average);
        assert!(report.final_equity.average <= report.final_equity.maximum);
    }

    #[test]
    fn test_runner_seeded_sequential_matches_run_batch() {
        let p = params(RawParameters::default().with_num_simulations(4));
        let (seed, result) = MonteCarloRunner::new(p.clone()).with_seed(31).run().unwrap();
        assert_eq!(seed, 31);
        assert_eq!(result, run_batch(&p, &mut seeded(31)).unwrap());
    }

    #[test]
    fn test_runner_parallel_reproducible() {
        let p = params(RawParameters::default().with_num_simulations(16));
        let runner = MonteCarloRunner::new(p).with_seed(5).parallel(true);
        let (_, a) = runner.run().unwrap();
        let (_, b) = runner.run().unwrap();
        assert_eq!(a.curves.len(), 16);
        assert_eq!(a, b);
    }

    #[test]
    fn test_runner_reports_drawn_seed() {
        let p = params(RawParameters::default().with_num_simulations(2));
        let (seed, first) = MonteCarloRunner::new(p.clone()).run().unwrap();
        let (_, replay) = MonteCarloRunner::new(p).with_seed(seed).run().unwrap();
        assert_eq!(first.curves, replay.curves);
    }

    #[test]
    fn test_runner_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let p = params(RawParameters::default());
        let result = MonteCarloRunner::new(p).with_cancellation(token).run();
        assert!(matches!(result, Err(SimulationError::Cancelled { .. })));
    }

    #[test]
    fn test_filter_recomputes_report() {
        let p = params(
            RawParameters::default()
                .with_num_trades(30)
                .with_num_simulations(20),
        );
        let batch = run_batch(&p, &mut seeded(3)).unwrap();
        let start = p.starting_equity();

        match batch.filter(|c| c.final_equity() > start) {
            Ok(winners) => {
                assert!(winners.report.final_equity.minimum > start);
                assert_eq!(winners.curves.len(), winners.metrics.len());
            }
            Err(e) => assert_eq!(e, AggregateError::EmptyBatch),
        }
        assert_eq!(
            batch.filter(|_| false).unwrap_err(),
            AggregateError::EmptyBatch
        );
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]).unwrap_err(), AggregateError::EmptyBatch);
    }
}
