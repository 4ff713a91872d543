//! Batch simulation engine.
//!
//! Runs a [`PathGenerator`] once per simulation. Runs share nothing but the
//! read-only generator, so the parallel mode only has to give each run its
//! own random stream.

use crate::cancel::CancellationToken;
use crate::error::{Result, SimulationError};
use crate::random::{self, RandomSource};
use crate::trade_path::{PathGenerator, TradePathGenerator};
use eqsim_domain::{EquityCurve, ParameterSet};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Produces a batch of independent equity curves.
#[derive(Debug, Clone)]
pub struct SimulationEngine<G: PathGenerator = TradePathGenerator> {
    generator: G,
    simulations: usize,
    cancellation: Option<CancellationToken>,
}

impl SimulationEngine<TradePathGenerator> {
    /// Creates an engine for the given parameters.
    #[must_use]
    pub fn new(params: &ParameterSet) -> Self {
        Self::with_generator(
            TradePathGenerator::new(params.clone()),
            params.num_simulations(),
        )
    }
}

impl<G: PathGenerator> SimulationEngine<G> {
    /// Creates an engine around a custom generator.
    #[must_use]
    pub fn with_generator(generator: G, simulations: usize) -> Self {
        Self {
            generator,
            simulations,
            cancellation: None,
        }
    }

    /// Attaches a cancellation token checked before every simulation.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Number of curves produced per run.
    #[must_use]
    pub fn simulations(&self) -> usize {
        self.simulations
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Runs every simulation sequentially, drawing from a single source.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Cancelled`] if the token fires mid-batch.
    pub fn run(&self, source: &mut dyn RandomSource) -> Result<Vec<EquityCurve>> {
        let started = Instant::now();
        info!(simulations = self.simulations, "running simulation batch");

        let mut curves = Vec::new();
        for index in 0..self.simulations {
            if self.is_cancelled() {
                warn!(completed = index, "simulation batch cancelled");
                return Err(SimulationError::Cancelled {
                    completed: index,
                    requested: self.simulations,
                });
            }
            let curve = self.generator.generate(source);
            debug!(
                simulation = index + 1,
                final_equity = curve.final_equity(),
                "simulation complete"
            );
            curves.push(curve);
        }

        info!(
            simulations = curves.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "simulation batch complete"
        );
        Ok(curves)
    }
}

impl<G: PathGenerator + Sync> SimulationEngine<G> {
    /// Runs simulations across the rayon pool.
    ///
    /// Simulation `i` draws from its own generator seeded from `(seed, i)`,
    /// so the output depends only on `seed`, never on thread scheduling.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Cancelled`] if the token fires mid-batch.
    pub fn run_parallel(&self, seed: u64) -> Result<Vec<EquityCurve>> {
        let started = Instant::now();
        info!(
            simulations = self.simulations,
            seed,
            threads = rayon::current_num_threads(),
            "running parallel simulation batch"
        );

        let completed = AtomicUsize::new(0);
        let curves: Option<Vec<EquityCurve>> = (0..self.simulations)
            .into_par_iter()
            .map(|index| {
                if self.is_cancelled() {
                    return None;
                }
                let mut rng = random::seeded(random::stream_seed(seed, index));
                let curve = self.generator.generate(&mut rng);
                completed.fetch_add(1, Ordering::Relaxed);
                Some(curve)
            })
            .collect();

        match curves {
            Some(curves) => {
                info!(
                    simulations = curves.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "parallel simulation batch complete"
                );
                Ok(curves)
            }
            None => {
                let completed = completed.load(Ordering::Relaxed);
                warn!(completed, "parallel simulation batch cancelled");
                Err(SimulationError::Cancelled {
                    completed,
                    requested: self.simulations,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedSource, seeded};
    use crate::trade_path::DeterministicPath;
    use eqsim_domain::RawParameters;

    fn params(simulations: u64) -> ParameterSet {
        RawParameters::default()
            .with_num_trades(50)
            .with_num_simulations(simulations)
            .with_win_rate_pct(45.0)
            .into_parameters()
            .unwrap()
    }

    #[test]
    fn test_produces_requested_number_of_curves() {
        let engine = SimulationEngine::new(&params(12));
        let curves = engine.run(&mut seeded(5)).unwrap();

        assert_eq!(curves.len(), 12);
        for curve in &curves {
            assert_eq!(curve.len(), 51);
            assert_eq!(curve.starting_equity(), 10_000.0);
        }
    }

    #[test]
    fn test_same_seed_same_curves() {
        let engine = SimulationEngine::new(&params(8));
        let a = engine.run(&mut seeded(42)).unwrap();
        let b = engine.run(&mut seeded(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_curves_are_independent_draws() {
        let engine = SimulationEngine::new(&params(4));
        let curves = engine.run(&mut seeded(42)).unwrap();
        assert_ne!(curves[0], curves[1]);
    }

    #[test]
    fn test_parallel_is_reproducible() {
        let engine = SimulationEngine::new(&params(32));
        let a = engine.run_parallel(9).unwrap();
        let b = engine.run_parallel(9).unwrap();
        assert_eq!(a.len(), 32);
        assert_eq!(a, b);
        assert_ne!(a, engine.run_parallel(10).unwrap());
    }

    #[test]
    fn test_parallel_matches_per_stream_generation() {
        let p = params(3);
        let engine = SimulationEngine::new(&p);
        let curves = engine.run_parallel(77).unwrap();

        let generator = TradePathGenerator::new(p);
        let expected = generator.generate(&mut seeded(random::stream_seed(77, 2)));
        assert_eq!(curves[2], expected);
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let engine = SimulationEngine::new(&params(5)).with_cancellation(token.clone());

        assert_eq!(
            engine.run(&mut seeded(1)),
            Err(SimulationError::Cancelled {
                completed: 0,
                requested: 5
            })
        );
        assert!(matches!(
            engine.run_parallel(1),
            Err(SimulationError::Cancelled { requested: 5, .. })
        ));
    }

    /// Cancels the shared token from inside its `after`-th call.
    struct CancelAfter {
        after: usize,
        calls: AtomicUsize,
        token: CancellationToken,
        curve: EquityCurve,
    }

    impl CancelAfter {
        fn new(after: usize, token: CancellationToken) -> Self {
            Self {
                after,
                calls: AtomicUsize::new(0),
                token,
                curve: EquityCurve::new(vec![100.0, 101.0]).unwrap(),
            }
        }
    }

    impl PathGenerator for CancelAfter {
        fn generate(&self, _source: &mut dyn RandomSource) -> EquityCurve {
            if self.calls.fetch_add(1, Ordering::SeqCst) + 1 == self.after {
                self.token.cancel();
            }
            self.curve.clone()
        }
    }

    #[test]
    fn test_cancelled_mid_batch() {
        let token = CancellationToken::new();
        let engine = SimulationEngine::with_generator(CancelAfter::new(3, token.clone()), 10)
            .with_cancellation(token);

        assert_eq!(
            engine.run(&mut seeded(1)),
            Err(SimulationError::Cancelled {
                completed: 3,
                requested: 10
            })
        );
    }

    #[test]
    fn test_parallel_cancelled_mid_batch() {
        let token = CancellationToken::new();
        let engine =
            SimulationEngine::with_generator(CancelAfter::new(3, token.clone()), 10_000)
                .with_cancellation(token);

        match engine.run_parallel(1) {
            Err(SimulationError::Cancelled {
                completed,
                requested,
            }) => {
                assert_eq!(requested, 10_000);
                assert!(completed >= 3);
                assert!(completed < requested);
            }
            other => panic!("expected cancellation, got {other:?}"),
        }
    }

    #[test]
    fn test_uncancelled_token_runs_to_completion() {
        let engine =
            SimulationEngine::new(&params(3)).with_cancellation(CancellationToken::new());
        assert_eq!(engine.run(&mut seeded(1)).unwrap().len(), 3);
    }

    #[test]
    fn test_custom_generator() {
        let curve = EquityCurve::new(vec![100.0, 90.0, 120.0]).unwrap();
        let engine = SimulationEngine::with_generator(
            DeterministicPath {
                curve: curve.clone(),
            },
            2,
        );
        let curves = engine.run(&mut ScriptedSource::new(Vec::new())).unwrap();
        assert_eq!(curves, vec![curve.clone(), curve]);
    }
}
