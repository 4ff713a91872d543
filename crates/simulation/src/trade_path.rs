//! Stochastic equity path generation.
//!
//! Each trade is a Bernoulli draw against the win rate. Winners pay
//! `risk * reward_risk`, losers cost `risk`. After a win the risk is re-based
//! on the new equity; after losses it optionally grows by the martingale
//! multiplier every `martingale_reset` consecutive losses.

use crate::random::RandomSource;
use eqsim_domain::{EquityCurve, ParameterSet, RiskType};

pub trait PathGenerator {
    fn generate(&self, source: &mut dyn RandomSource) -> EquityCurve;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeOutcome {
    Win,
    Loss,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeRecord {
    pub trade: usize,
    pub outcome: TradeOutcome,
    pub risk: f64,
    pub reward: f64,
    pub equity: f64,
    pub consecutive_losses: usize,
}

#[derive(Debug, Clone)]
pub struct TradePathGenerator {
    params: ParameterSet,
}

impl TradePathGenerator {
    #[must_use]
    pub fn new(params: ParameterSet) -> Self {
        Self { params }
    }

    #[must_use]
    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn generate_trades(&self, source: &mut dyn RandomSource) -> Vec<TradeRecord> {
        let p = &self.params;
        let mut equity = p.starting_equity();
        let mut trades = Vec::new();

        let mut consecutive_losses = 0usize;
        let mut current_risk = match p.risk_type() {
            RiskType::Fixed => p.risk_size() * equity,
            RiskType::Compounding => p.starting_equity() * p.risk_size(),
        };

        for trade in 1..=p.num_trades() {
            let outcome = if source.next_uniform() < p.win_rate() {
                TradeOutcome::Win
            } else {
                TradeOutcome::Loss
            };
            let risk = current_risk;
            let reward = match outcome {
                TradeOutcome::Win => risk * p.reward_risk(),
                TradeOutcome::Loss => -risk,
            };
            equity += reward;

            match outcome {
                TradeOutcome::Win => {
                    consecutive_losses = 0;
                    // Both sizing modes re-base on post-trade equity after a win.
                    current_risk = p.risk_size() * equity;
                }
                TradeOutcome::Loss => {
                    consecutive_losses += 1;
                    if p.use_martingale() && consecutive_losses % p.martingale_reset() == 0 {
                        current_risk *= p.martingale_multiplier();
                    }
                }
            }

            trades.push(TradeRecord {
                trade,
                outcome,
                risk,
                reward,
                equity,
                consecutive_losses,
            });
        }

        trades
    }

    pub fn generate_with_trades(
        &self,
        source: &mut dyn RandomSource,
    ) -> (EquityCurve, Vec<TradeRecord>) {
        let trades = self.generate_trades(source);
        let curve = EquityCurve::from_trades(
            self.params.starting_equity(),
            trades.iter().map(|t| t.equity),
        );
        (curve, trades)
    }
}

impl PathGenerator for TradePathGenerator {
    fn generate(&self, source: &mut dyn RandomSource) -> EquityCurve {
        self.generate_with_trades(source).0
    }
}

#[derive(Debug, Clone)]
pub struct DeterministicPath {
    pub curve: EquityCurve,
}

impl PathGenerator for DeterministicPath {
    fn generate(&self, _source: &mut dyn RandomSource) -> EquityCurve {
        self.curve.clone()
    }
}
