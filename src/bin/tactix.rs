use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use tactix::{
    adapters::{ConsoleInput, ConsoleRenderer, SystemClock, ThreadSleeper},
    GameSession, Player, SessionConfig, TimeControl, Variant,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FirstMover {
    Human,
    Computer,
}

impl From<FirstMover> for Player {
    fn from(first: FirstMover) -> Self {
        match first {
            FirstMover::Human => Player::Human,
            FirstMover::Computer => Player::Computer,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "tactix")]
#[command(about = "Play tic-tac-toe against an exhaustive-search computer opponent")]
struct Cli {
    /// Play the limited-memory variant: only each player's last three marks
    /// stay on the board
    #[arg(long)]
    limited: bool,

    /// Who moves first
    #[arg(long, value_enum, default_value = "human")]
    first: FirstMover,

    /// Per-player time budget in seconds; omit for an untimed game
    #[arg(long)]
    budget_secs: Option<u64>,

    /// Pause before each computer move, in milliseconds
    #[arg(long, default_value = "0")]
    think_delay_ms: u64,

    /// Write the finished game's move transcript as JSON to this path
    #[arg(long)]
    transcript: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = SessionConfig {
        variant: if cli.limited {
            Variant::LimitedMemory
        } else {
            Variant::Classic
        },
        first_to_move: cli.first.into(),
        time_control: cli.budget_secs.map(|secs| TimeControl {
            budget: Duration::from_secs(secs),
            think_delay: Duration::from_millis(cli.think_delay_ms),
        }),
        ..SessionConfig::default()
    };

    let mut renderer = ConsoleRenderer::new(std::io::stdout());
    renderer.print_instructions();
    let mut input = ConsoleInput::new(std::io::stdin().lock());
    let clock = SystemClock::new();
    let mut sleeper = ThreadSleeper;

    let mut session = GameSession::new(config);
    let reason = session
        .run(&mut renderer, &mut input, &clock, &mut sleeper)
        .context("game aborted")?;
    println!("{reason}");

    if let Some(path) = cli.transcript {
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, session.transcript())
            .context("failed to write transcript")?;
        writer.flush().context("failed to flush transcript")?;
    }

    Ok(())
}
