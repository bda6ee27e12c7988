use crate::error::EngineError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

pub const CONFIG_PATH: &str = "engine_config.json";

static CONFIG: Lazy<EngineConfig> = Lazy::new(EngineConfig::load_or_default);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub version: String,
    pub evaluation: EvaluationConfig,
    pub search: SearchConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Window weights of the static evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub four: i32,
    pub three_open: i32,
    pub two_open: i32,
    pub opponent_three_open: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub minimax_depth: u32,
    pub terminal_bonus: i32,
    pub mcts_iterations: u32,
    pub exploration_factor: f64,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl EngineConfig {
    /// Process-wide configuration, read from [`CONFIG_PATH`] on first access.
    pub fn get() -> &'static EngineConfig {
        &CONFIG
    }

    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        if !Path::new(CONFIG_PATH).exists() {
            return Self::default();
        }
        Self::load().unwrap_or_else(|e| {
            warn!(path = CONFIG_PATH, error = %e, "ignoring unreadable engine config");
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.search.minimax_depth == 0 {
            return Err(EngineError::InvalidConfig(
                "minimax_depth must be at least 1".to_string(),
            ));
        }
        if self.search.mcts_iterations == 0 {
            return Err(EngineError::InvalidConfig(
                "mcts_iterations must be at least 1".to_string(),
            ));
        }
        let c = self.search.exploration_factor;
        if !c.is_finite() || c < 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "exploration_factor must be finite and non-negative, got {}",
                c
            )));
        }
        Ok(())
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.search.minimax_depth = depth;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.search.mcts_iterations = iterations;
        self
    }

    pub fn with_exploration(mut self, factor: f64) -> Self {
        self.search.exploration_factor = factor;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            version: "1.0".to_string(),
            evaluation: EvaluationConfig::default(),
            search: SearchConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            four: 100,
            three_open: 5,
            two_open: 2,
            opponent_three_open: -4,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            minimax_depth: 5,
            terminal_bonus: 50,
            mcts_iterations: 1000,
            exploration_factor: 0.8,
        }
    }
}
