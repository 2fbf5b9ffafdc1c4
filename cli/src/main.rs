use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use labyrinth_core::*;

mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Blind labyrinth and minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    mode: Option<ModeArg>,
}

#[derive(Subcommand, Debug)]
enum ModeArg {
    /// Walk a hidden maze from the top-left to the bottom-right corner
    Maze {
        #[arg(long, default_value_t = DEFAULT_MAZE_SIZE)]
        size: Coord,
    },
    /// Classic minesweeper with a safe border
    Classic {
        /// easy, medium, hard (or 1-3)
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,
    },
    /// Minesweeper on a randomly grown irregular board
    Chaos {
        #[arg(long, default_value_t = ChaosConfig::default().cells())]
        cells: CellCount,
        #[arg(long, default_value_t = ChaosConfig::default().mines())]
        mines: CellCount,
    },
}

impl ModeArg {
    fn session_config(&self) -> Result<SessionConfig> {
        match *self {
            Self::Maze { size } => SessionConfig::maze(size),
            Self::Classic { difficulty } => Ok(SessionConfig::classic(difficulty)),
            Self::Chaos { cells, mines } => SessionConfig::chaos(cells, mines),
        }
    }

    fn title(&self) -> String {
        match self {
            Self::Maze { .. } => "LABYRINTH MODE".to_string(),
            Self::Classic { difficulty } => format!("CLASSIC MINESWEEPER ({:?})", difficulty).to_uppercase(),
            Self::Chaos { .. } => "CHAOS MODE (IRREGULAR GRID)".to_string(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let mode = args.mode.unwrap_or(ModeArg::Maze {
        size: DEFAULT_MAZE_SIZE,
    });
    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);

    let config = mode.session_config().context("invalid game settings")?;
    let mut session = GameSession::new(config, seed);
    let title = mode.title();
    let started = Instant::now();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    loop {
        let mut screen = String::new();
        render::render(&session, &title, &mut screen)?;
        write!(stdout, "{}", screen)?;

        if session.is_finished() {
            writeln!(stdout, "\nGame Over!")?;
            break;
        }

        writeln!(stdout, "{}", session.mode().usage())?;
        write!(stdout, "Input: ")?;
        stdout.flush()?;
        let Some(line) = lines.next() else {
            log::info!("Input closed, leaving");
            break;
        };
        let reply = session.respond(&line.context("failed to read input")?);
        if reply.terminal {
            let mut screen = String::new();
            render::render(&session, &title, &mut screen)?;
            writeln!(stdout, "{}\n{}", screen, reply.message)?;
            break;
        }
        if !reply.message.is_empty() {
            writeln!(stdout, "{}", reply.message)?;
        }
    }

    let elapsed = u32::try_from(started.elapsed().as_secs()).unwrap_or(u32::MAX);
    if let Some(score) = session.maze_score(elapsed) {
        writeln!(stdout, "Score: {}", score)?;
    }
    Ok(())
}
