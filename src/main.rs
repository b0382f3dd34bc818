use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::EnvFilter;

use tty_2048::config::GameConfig;
use tty_2048::console::{self, Command};
use tty_2048::game::{Game, TurnOutcome};
use tty_2048::save::{self, DEFAULT_SAVE_FILE};
use tty_2048::serialization::{self as ser, RecordFinish, Recorder};

#[derive(Debug, Parser)]
#[command(name = "tty-2048", about = "Play 2048 in the terminal")]
struct Args {
    /// Save file read at start and rewritten after every turn
    #[arg(long, default_value = DEFAULT_SAVE_FILE)]
    save: PathBuf,

    /// Resume the saved board without asking
    #[arg(long, conflicts_with = "new")]
    resume: bool,

    /// Deal a new board without asking
    #[arg(long)]
    new: bool,

    /// Seed the tile spawner for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Tile value that wins the game (default 2048)
    #[arg(long)]
    target: Option<u32>,

    /// Occupied cells on a new board (default 6)
    #[arg(long)]
    initial_tiles: Option<usize>,

    /// New tiles are 2^k with k in 1..=this (default 1)
    #[arg(long)]
    max_exponent: Option<u32>,

    /// Probability that a tile spawns after a move (default 0.5)
    #[arg(long)]
    spawn_chance: Option<f64>,

    /// Write a postcard record of the game to this path when it ends
    #[arg(long)]
    record: Option<PathBuf>,

    /// Do not clear the screen between turns
    #[arg(long)]
    no_clear: bool,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        let base = GameConfig::default();
        GameConfig {
            target: self.target.unwrap_or(base.target),
            initial_tiles: self.initial_tiles.unwrap_or(base.initial_tiles),
            max_exponent: self.max_exponent.unwrap_or(base.max_exponent),
            spawn_chance: self.spawn_chance.unwrap_or(base.spawn_chance),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let cfg = args.game_config();
    cfg.validate().context("invalid game parameters")?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    if !args.no_clear {
        console::clear_screen(&mut out)?;
    }
    console::say(&mut out, &format!("Game:2048\n\n{} {}\n", console::BANNER, cfg.target))?;

    let mut game = match setup_game(&args, cfg, &mut input, &mut out, &mut rng)? {
        Some(game) => game,
        None => return Ok(()),
    };
    save::save_to_path(&args.save, &game.snapshot())
        .with_context(|| format!("writing {}", args.save.display()))?;

    let mut recorder = Recorder::new(game.config().target);
    let finish = loop {
        let legal = game.legal_moves();
        console::draw(&mut out, &game, &legal, !args.no_clear)?;
        if !legal.any() {
            console::say(&mut out, "GAME OVER!\nThe board is full and there is no more valid move!")?;
            break RecordFinish::Lost;
        }

        let dir = match read_command(&mut input, &mut out)? {
            Some(Command::Slide(dir)) => dir,
            Some(Command::Quit) | None => {
                console::say(&mut out, "Thank you for playing!")?;
                break RecordFinish::Quit;
            }
        };

        let before = game.snapshot();
        let outcome = game.play(dir, &mut rng);
        if outcome != TurnOutcome::Ignored {
            recorder.record(before.board, dir, game.score() - before.score);
        }
        save::save_to_path(&args.save, &game.snapshot_after(before, outcome))
            .with_context(|| format!("writing {}", args.save.display()))?;

        match outcome {
            TurnOutcome::Won => {
                console::draw(&mut out, &game, &game.legal_moves(), !args.no_clear)?;
                console::say(&mut out, &format!("WELL DONE! You reached {}", game.config().target))?;
                break RecordFinish::Won;
            }
            TurnOutcome::Lost => {
                console::draw(&mut out, &game, &game.legal_moves(), !args.no_clear)?;
                console::say(&mut out, "GAME OVER!\nThe board is full and there is no more valid move!")?;
                break RecordFinish::Lost;
            }
            TurnOutcome::Continue | TurnOutcome::Ignored => {}
        }
    };

    tracing::info!(score = game.score(), steps = recorder.len(), ?finish, "game finished");
    if let Some(path) = &args.record {
        let record = recorder.finish(game.board(), game.score(), finish);
        ser::write_postcard_to_path(path, &record)
            .with_context(|| format!("writing record {}", path.display()))?;
    }
    Ok(())
}

/// Load the saved board or deal a new one; `None` when input ends first.
fn setup_game<B: BufRead, W: Write>(
    args: &Args,
    cfg: GameConfig,
    input: &mut B,
    out: &mut W,
    rng: &mut StdRng,
) -> anyhow::Result<Option<Game>> {
    let resume = if args.resume {
        true
    } else if args.new {
        false
    } else {
        loop {
            console::say(out, "Do you want to load your last board? (Y/N)")?;
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = read_line(input)? else { return Ok(None) };
            if let Some(answer) = console::parse_yes_no(&line) {
                break answer;
            }
        }
    };

    if resume {
        match save::load_from_path(&args.save, cfg.target) {
            Ok(snapshot) => return Ok(Some(Game::from_snapshot(snapshot, cfg))),
            Err(e) if e.is_not_found() => {
                tracing::warn!(path = %args.save.display(), "no saved board, dealing a new one");
                console::say(out, "There is no saved board. Getting you a new one.")?;
            }
            Err(e) => return Err(e).with_context(|| format!("reading {}", args.save.display())),
        }
    }
    let high_score = previous_high_score(&args.save, cfg.target);
    Ok(Some(Game::new(cfg, rng).with_high_score(high_score)))
}

fn previous_high_score(path: &Path, target: u32) -> u64 {
    save::load_from_path(path, target).map(|s| s.high_score).unwrap_or(0)
}

fn read_command<B: BufRead, W: Write>(input: &mut B, out: &mut W) -> anyhow::Result<Option<Command>> {
    console::say(out, console::MOVE_PROMPT)?;
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else { return Ok(None) };
        match console::parse_command(&line) {
            Some(cmd) => return Ok(Some(cmd)),
            None => console::say(out, console::MOVE_PROMPT)?,
        }
    }
}

fn read_line<B: BufRead>(input: &mut B) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
