use connect_four_ai::core::Side;
use connect_four_ai::game::Game;
use connect_four_ai::player::{AiController, TuiController};
use connect_four_ai::selfplay::{run_arena, ArenaConfig, RECORD_DIR};
use connect_four_ai::{EngineConfig, Strategy};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::{cursor, execute, terminal};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

const ARENA_GAMES: usize = 10;

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // 盤面描画は stdout なのでログは stderr に出す
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let config = EngineConfig::get();
    init_tracing(&config.log_level);
    info!(version = %config.version, depth = config.search.minimax_depth, iterations = config.search.mcts_iterations, "engine config loaded");

    // ターミナル初期化
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;

    let res = run(config);

    // ターミナル復帰
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    res
}

fn clear_screen() -> anyhow::Result<()> {
    execute!(
        io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;
    Ok(())
}

/// Waits for one of `keys`; `None` when the user presses `q`.
fn read_choice(keys: &[char]) -> anyhow::Result<Option<char>> {
    io::stdout().flush()?;
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => return Ok(None),
                    KeyCode::Char(c) if keys.contains(&c) => return Ok(Some(c)),
                    _ => {}
                }
            }
        }
    }
}

fn run(config: &EngineConfig) -> anyhow::Result<()> {
    loop {
        clear_screen()?;
        print!("=== Connect Four ===\r\n");
        print!("\r\nSelect mode:\r\n");
        print!("1. Play against Minimax AI (depth {})\r\n", config.search.minimax_depth);
        print!("2. Play against MCTS AI ({} iterations)\r\n", config.search.mcts_iterations);
        print!("3. Play against Greedy AI\r\n");
        print!("4. Arena: Minimax vs MCTS ({} games)\r\n", ARENA_GAMES);
        print!("q. Quit\r\n");

        let strategy = match read_choice(&['1', '2', '3', '4'])? {
            Some('1') => Strategy::Minimax,
            Some('2') => Strategy::Mcts,
            Some('3') => Strategy::Greedy,
            Some(_) => {
                run_arena_screen(config)?;
                continue;
            }
            None => return Ok(()),
        };

        print!("\r\nWho moves first?\r\n");
        print!("1. You (X)\r\n");
        print!("2. AI (O)\r\n");
        let first = match read_choice(&['1', '2'])? {
            Some('1') => Side::Player,
            Some(_) => Side::Ai,
            None => continue,
        };

        let human = TuiController::new(Side::Player, "You");
        let ai = AiController::with_config(
            Side::Ai,
            &format!("{} AI", strategy),
            strategy,
            config.clone(),
        )?;

        let mut game = Game::new(first);
        let outcome = game.play(&human, &ai)?;
        info!(strategy = %strategy, first = %first, outcome = ?outcome, moves = game.history.len(), "game over");
    }
}

fn run_arena_screen(config: &EngineConfig) -> anyhow::Result<()> {
    clear_screen()?;
    print!("=== Self-Play Arena ===\r\n\r\n");
    print!("Running {} games of Minimax (X) vs MCTS (O)...\r\n", ARENA_GAMES);
    io::stdout().flush()?;

    let mut arena = ArenaConfig::new(Strategy::Minimax, Strategy::Mcts, ARENA_GAMES);
    arena.engine = config.clone();
    arena.record_dir = Some(PathBuf::from(RECORD_DIR));
    let stats = run_arena(&arena)?;

    print!("\r\n--- Statistics ---\r\n");
    for line in stats.summary_lines() {
        print!("{}\r\n", line);
    }
    print!("\r\nRecords saved to {}/\r\n", RECORD_DIR);
    print!("Press any key to return.\r\n");
    io::stdout().flush()?;

    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}
