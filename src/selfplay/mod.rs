//! Self-play arena: two strategies play a batch of games against each other.
//!
//! Games run in parallel on the rayon pool. Every game builds its own pair of
//! engines, so a seeded arena gives the same games whatever the scheduling.

use crate::core::{GameResult, Side};
use crate::game::{Game, GameRecord, StepOutcome};
use crate::player::ai::{DecisionEngine, EngineConfig, Strategy};
use crate::player::AiController;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

pub const RECORD_DIR: &str = "selfplay_records";

#[derive(Debug, Clone)]
pub struct ArenaConfig {
    pub num_games: usize,
    pub player_strategy: Strategy,
    pub ai_strategy: Strategy,
    pub engine: EngineConfig,
    /// Odd-numbered games (0-based) let the AI seat move first.
    pub alternate_first: bool,
    pub seed: Option<u64>,
    pub record_dir: Option<PathBuf>,
}

impl ArenaConfig {
    pub fn new(player_strategy: Strategy, ai_strategy: Strategy, num_games: usize) -> Self {
        Self {
            num_games,
            player_strategy,
            ai_strategy,
            engine: EngineConfig::get().clone(),
            alternate_first: true,
            seed: None,
            record_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaGame {
    pub index: usize,
    pub first: Side,
    pub result: GameResult,
    pub resigned: Option<Side>,
    pub moves: usize,
    pub time_ms: u128,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaStats {
    pub total_games: usize,
    pub player_wins: usize,
    pub ai_wins: usize,
    pub draws: usize,
    pub avg_moves: f64,
    pub avg_time_ms: f64,
    pub player_strategy: String,
    pub ai_strategy: String,
    pub games: Vec<ArenaGame>,
}

impl ArenaStats {
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            player_strategy: config.player_strategy.to_string(),
            ai_strategy: config.ai_strategy.to_string(),
            ..Self::default()
        }
    }

    pub fn add_result(&mut self, game: ArenaGame) {
        self.total_games += 1;
        match game.result.winner() {
            Some(Side::Player) => self.player_wins += 1,
            Some(Side::Ai) => self.ai_wins += 1,
            None => self.draws += 1,
        }
        self.games.push(game);
        self.recalculate_averages();
    }

    fn recalculate_averages(&mut self) {
        if self.games.is_empty() {
            return;
        }
        let total_moves: usize = self.games.iter().map(|g| g.moves).sum();
        let total_time: u128 = self.games.iter().map(|g| g.time_ms).sum();
        self.avg_moves = total_moves as f64 / self.games.len() as f64;
        self.avg_time_ms = total_time as f64 / self.games.len() as f64;
    }

    fn percent(&self, count: usize) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            count as f64 / self.total_games as f64 * 100.0
        }
    }

    pub fn summary_lines(&self) -> Vec<String> {
        vec![
            format!(
                "{} (X) vs {} (O): {} games",
                self.player_strategy, self.ai_strategy, self.total_games
            ),
            format!(
                "{} wins: {} ({:.1}%)",
                self.player_strategy,
                self.player_wins,
                self.percent(self.player_wins)
            ),
            format!(
                "{} wins: {} ({:.1}%)",
                self.ai_strategy,
                self.ai_wins,
                self.percent(self.ai_wins)
            ),
            format!("Draws: {} ({:.1}%)", self.draws, self.percent(self.draws)),
            format!("Avg Moves: {:.1}", self.avg_moves),
            format!("Avg Time: {:.1}s", self.avg_time_ms / 1000.0),
        ]
    }
}

pub fn run_arena(config: &ArenaConfig) -> anyhow::Result<ArenaStats> {
    config.engine.validate()?;

    let played = (0..config.num_games)
        .into_par_iter()
        .map(|index| play_one(config, index))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut stats = ArenaStats::new(config);
    for (game, record) in played {
        info!(
            game = game.index + 1,
            total = config.num_games,
            first = %game.first,
            result = ?game.result,
            moves = game.moves,
            time_ms = game.time_ms as u64,
            "arena game finished"
        );
        if let Some(dir) = &config.record_dir {
            save_record(dir, game.index + 1, &record)?;
        }
        stats.add_result(game);
    }

    info!(
        player_wins = stats.player_wins,
        ai_wins = stats.ai_wins,
        draws = stats.draws,
        avg_moves = stats.avg_moves,
        "arena finished"
    );
    Ok(stats)
}

fn engine_for(config: &ArenaConfig, index: usize, seat: u64) -> crate::error::Result<DecisionEngine> {
    match config.seed {
        Some(seed) => DecisionEngine::with_seed(
            config.engine.clone(),
            seed.wrapping_add(2 * index as u64 + seat),
        ),
        None => DecisionEngine::new(config.engine.clone()),
    }
}

fn play_one(config: &ArenaConfig, index: usize) -> anyhow::Result<(ArenaGame, GameRecord)> {
    let start_time = Instant::now();
    let first = if config.alternate_first && index % 2 == 1 {
        Side::Ai
    } else {
        Side::Player
    };

    let player_name = format!("{} (X)", config.player_strategy);
    let ai_name = format!("{} (O)", config.ai_strategy);
    let player = AiController::new(
        Side::Player,
        &player_name,
        config.player_strategy,
        engine_for(config, index, 0)?,
    );
    let ai = AiController::new(
        Side::Ai,
        &ai_name,
        config.ai_strategy,
        engine_for(config, index, 1)?,
    );

    let mut game = Game::new(first);
    let outcome = game.run(&player, &ai)?;
    let resigned = match outcome {
        StepOutcome::Resigned(side) => Some(side),
        _ => None,
    };

    let arena_game = ArenaGame {
        index,
        first,
        result: game.result(),
        resigned,
        moves: game.history.len(),
        time_ms: start_time.elapsed().as_millis(),
    };
    Ok((arena_game, game.to_record(&player_name, &ai_name)))
}

/// Writes `record` as `game_NNNN_<timestamp>.json` under `dir`.
pub fn save_record(dir: &Path, game_num: usize, record: &GameRecord) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!(
        "game_{:04}_{}.json",
        game_num,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));
    record.save(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(player: Strategy, ai: Strategy, games: usize) -> ArenaConfig {
        ArenaConfig {
            num_games: games,
            player_strategy: player,
            ai_strategy: ai,
            engine: EngineConfig::default().with_depth(2).with_iterations(60),
            alternate_first: true,
            seed: Some(11),
            record_dir: None,
        }
    }

    #[test]
    fn test_greedy_arena_counts_every_game() {
        let stats = run_arena(&small_config(Strategy::Greedy, Strategy::Greedy, 2)).unwrap();
        assert_eq!(stats.total_games, 2);
        assert_eq!(stats.player_wins + stats.ai_wins + stats.draws, 2);
        assert_eq!(stats.games[0].first, Side::Player);
        assert_eq!(stats.games[1].first, Side::Ai);
        assert!(stats.games.iter().all(|g| g.result.is_terminal()));
        assert!(stats.avg_moves >= 7.0);
        assert_eq!(stats.summary_lines().len(), 6);
    }

    #[test]
    fn test_seeded_arena_is_repeatable() {
        let config = small_config(Strategy::Mcts, Strategy::Greedy, 2);
        let summary = |stats: ArenaStats| {
            stats
                .games
                .into_iter()
                .map(|g| (g.index, g.result, g.moves))
                .collect::<Vec<_>>()
        };
        let first = summary(run_arena(&config).unwrap());
        let second = summary(run_arena(&config).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn test_records_are_saved_and_replayable() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = small_config(Strategy::Minimax, Strategy::Greedy, 2);
        config.record_dir = Some(dir.path().to_path_buf());
        run_arena(&config).unwrap();

        let mut paths: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        paths.sort();
        assert_eq!(paths.len(), 2);
        for path in paths {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            assert!(name.starts_with("game_000"));
            let record = GameRecord::load(&path).unwrap();
            assert!(record.result.is_terminal());
            assert!(record.replay().is_ok());
        }
    }

    #[test]
    fn test_invalid_engine_config_is_rejected() {
        let mut config = small_config(Strategy::Greedy, Strategy::Greedy, 1);
        config.engine = config.engine.with_iterations(0);
        assert!(run_arena(&config).is_err());
    }
}
