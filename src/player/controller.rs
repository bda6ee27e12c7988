use crate::core::{Board, Side};
use crate::display::DisplayState;
use crate::player::ai::{Decision, DecisionEngine, EngineConfig, Strategy};
use std::cell::RefCell;
use tracing::warn;

/// A column picked by a controller. Engine controllers attach the decision
/// that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub column: usize,
    pub decision: Option<Decision>,
}

impl Choice {
    pub fn column(column: usize) -> Self {
        Self {
            column,
            decision: None,
        }
    }
}

/// プレイヤー操作のtrait
pub trait PlayerController {
    /// `None` means the controller resigns.
    fn choose_move(&self, board: &Board, legal_columns: &[usize], view: &DisplayState) -> Option<Choice>;
    fn name(&self) -> &str;
    fn is_human(&self) -> bool;
}

/// Seat driven by the decision engine.
pub struct AiController {
    side: Side,
    name: String,
    strategy: Strategy,
    // 探索は &self から呼ばれるので RNG を持つエンジンは RefCell に入れる
    engine: RefCell<DecisionEngine>,
}

impl AiController {
    pub fn new(side: Side, name: &str, strategy: Strategy, engine: DecisionEngine) -> Self {
        Self {
            side,
            name: name.to_string(),
            strategy,
            engine: RefCell::new(engine),
        }
    }

    /// Engine seeded from entropy with the given configuration.
    pub fn with_config(
        side: Side,
        name: &str,
        strategy: Strategy,
        config: EngineConfig,
    ) -> crate::error::Result<Self> {
        Ok(Self::new(side, name, strategy, DecisionEngine::new(config)?))
    }
}

impl PlayerController for AiController {
    fn choose_move(&self, board: &Board, legal_columns: &[usize], _view: &DisplayState) -> Option<Choice> {
        if legal_columns.is_empty() {
            return None;
        }
        match self
            .engine
            .borrow_mut()
            .choose_move(board, self.side, self.strategy)
        {
            Ok(decision) => Some(Choice {
                column: decision.column,
                decision: Some(decision),
            }),
            Err(e) => {
                warn!(side = %self.side, strategy = %self.strategy, error = %e, "engine gave up");
                None
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_human(&self) -> bool {
        false
    }
}
