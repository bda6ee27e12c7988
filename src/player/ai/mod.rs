pub mod config;
pub mod engine;
pub mod eval;
pub mod evaluator;
pub mod greedy;
pub mod mcts;
pub mod minimax;

pub use config::{EngineConfig, EvaluationConfig, SearchConfig};
pub use engine::{choose_move, Decision, DecisionEngine, Strategy};
pub use eval::{score_position, WindowEvaluator};
pub use evaluator::Evaluator;
pub use mcts::{MctsOutcome, MctsSearch};
pub use minimax::{MinimaxOutcome, MinimaxSearch};
