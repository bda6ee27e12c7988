//! Decision interface: the single entry point that turns a board, a side to
//! move and a strategy into a column.

use super::config::EngineConfig;
use super::eval::WindowEvaluator;
use super::evaluator::Evaluator;
use super::greedy::pick_best_move;
use super::mcts::MctsSearch;
use super::minimax::MinimaxSearch;
use crate::core::{Board, Side};
use crate::error::{EngineError, Result};
use crate::logic::classify;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    Minimax,
    Mcts,
    Greedy,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Strategy::Minimax => write!(f, "Minimax"),
            Strategy::Mcts => write!(f, "MCTS"),
            Strategy::Greedy => write!(f, "Greedy"),
        }
    }
}

/// Outcome of one decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub column: usize,
    pub strategy: Strategy,
    /// Minimax value, greedy evaluation, or MCTS confidence in `[-1, 1]`.
    pub score: f64,
    /// Positions visited (minimax), iterations run (MCTS) or columns tried (greedy).
    pub work: u64,
}

/// Owns the configuration, the evaluator and the RNG used by every search it
/// runs. Searches work on copies; the caller's board is never touched.
pub struct DecisionEngine {
    config: EngineConfig,
    evaluator: WindowEvaluator,
    rng: ChaCha20Rng,
}

impl DecisionEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_rng(config, ChaCha20Rng::from_entropy())
    }

    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, ChaCha20Rng::seed_from_u64(seed))
    }

    fn with_rng(config: EngineConfig, rng: ChaCha20Rng) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            evaluator: WindowEvaluator::new(config.evaluation),
            config,
            rng,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Picks a column for `side`. Fails with `NoLegalMoves` when the game is
    /// already over.
    pub fn choose_move(&mut self, board: &Board, side: Side, strategy: Strategy) -> Result<Decision> {
        let result = classify(board);
        if result.is_terminal() {
            return Err(EngineError::NoLegalMoves { result });
        }

        let search = &self.config.search;
        let decision = match strategy {
            Strategy::Minimax => {
                let outcome = MinimaxSearch::new(&self.evaluator, side, search.terminal_bonus)
                    .run(board, search.minimax_depth);
                let column = outcome.column.ok_or(EngineError::NoLegalMoves { result })?;
                Decision {
                    column,
                    strategy,
                    score: outcome.score as f64,
                    work: outcome.nodes,
                }
            }
            Strategy::Mcts => {
                let outcome = MctsSearch::new(board, side, search.exploration_factor, &mut self.rng)
                    .run(search.mcts_iterations)
                    .ok_or(EngineError::NoLegalMoves { result })?;
                Decision {
                    column: outcome.column,
                    strategy,
                    score: outcome.confidence,
                    work: outcome.iterations as u64,
                }
            }
            Strategy::Greedy => {
                let (column, score) = pick_best_move(&self.evaluator, board, side)
                    .ok_or(EngineError::NoLegalMoves { result })?;
                Decision {
                    column,
                    strategy,
                    score: score as f64,
                    work: board.legal_columns().len() as u64,
                }
            }
        };

        debug_assert!(board.is_valid_column(decision.column));
        debug!(
            strategy = %strategy,
            evaluator = self.evaluator.name(),
            side = %side,
            column = decision.column,
            score = decision.score,
            work = decision.work,
            "decision made"
        );
        Ok(decision)
    }
}

/// Column for the AI side with the process-wide configuration.
pub fn choose_move(board: &Board, strategy: Strategy) -> Result<usize> {
    let mut engine = DecisionEngine::new(EngineConfig::get().clone())?;
    engine
        .choose_move(board, Side::Ai, strategy)
        .map(|decision| decision.column)
}
