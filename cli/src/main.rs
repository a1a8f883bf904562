//! Terminal minesweeper on top of `minefield-core`.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use minefield_core::{
    BestTimeStore, Coord2, DifficultyTier, GameError, GameStatus, RevealOutcome, Session,
    submit_time,
};
use web_time::Instant;

use command::{Command, HELP};
use render::render_board;
use store::JsonFileStore;

mod command;
mod render;
mod store;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board size and mine count preset
    #[arg(short, long, default_value_t = DifficultyTier::Beginner)]
    difficulty: DifficultyTier,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// File holding best times per difficulty
    #[arg(long, default_value = "minesweeper-best-times.json")]
    records: PathBuf,
}

struct Game {
    session: Session,
    tier: DifficultyTier,
    fixed_seed: Option<u64>,
    started_at: Option<Instant>,
}

impl Game {
    fn new(tier: DifficultyTier, fixed_seed: Option<u64>) -> Self {
        Self {
            session: Session::new(tier, fixed_seed.unwrap_or_else(rand::random)),
            tier,
            fixed_seed,
            started_at: None,
        }
    }

    fn restart(&mut self) {
        self.session.restart(self.fixed_seed.unwrap_or_else(rand::random));
        self.started_at = None;
    }

    /// Reveals a cell; the clock starts with the first reveal.
    fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome, GameError> {
        self.started_at.get_or_insert_with(Instant::now);
        self.session.reveal(coords)
    }

    fn toggle_flag(&mut self, coords: Coord2) -> Result<bool, GameError> {
        self.session.toggle_flag(coords)
    }

    fn elapsed_seconds(&self) -> u32 {
        self.started_at
            .map(|start| start.elapsed().as_secs().try_into().unwrap_or(u32::MAX))
            .unwrap_or(0)
    }
}

/// Announces the win and submits the time; a failing store is reported without ending the game.
fn report_win<S>(
    tier: DifficultyTier,
    seconds: u32,
    store: &mut S,
    out: &mut impl Write,
) -> io::Result<()>
where
    S: BestTimeStore + ?Sized,
    S::Error: Display,
{
    writeln!(out, "cleared in {seconds}s")?;
    match submit_time(store, tier, seconds) {
        Ok(true) => writeln!(out, "new best time for {tier}!")?,
        Ok(false) => {}
        Err(err) => {
            log::warn!("could not update best times: {err:#}");
            writeln!(out, "could not update best times: {err:#}")?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let mut store = JsonFileStore::new(args.records);
    let mut game = Game::new(args.difficulty, args.seed);
    log::info!("Starting {} game", game.tier);

    let mut out = io::stdout().lock();
    match store.load() {
        Ok(times) => match times.get(game.tier) {
            Some(best) => writeln!(out, "best time on {}: {best}s", game.tier)?,
            None => writeln!(out, "no best time on {} yet", game.tier)?,
        },
        Err(err) => log::warn!("{err:#}"),
    }
    writeln!(out, "{HELP}")?;
    writeln!(out, "{}", render_board(&game.session))?;

    for line in io::stdin().lock().lines() {
        let line = line.context("could not read command")?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };

        match command {
            Command::Reveal(coords) => {
                match game.reveal(coords) {
                    Ok(outcome) => {
                        log::debug!("reveal {:?}: {:?}", coords, outcome);
                        let won = game.session.status() == GameStatus::Won;
                        match outcome {
                            RevealOutcome::Revealed(_) if won => {
                                let seconds = game.elapsed_seconds();
                                report_win(game.tier, seconds, &mut store, &mut out)?;
                            }
                            RevealOutcome::HitMine => {
                                writeln!(out, "boom, press `n` for a new game")?;
                            }
                            _ => {}
                        }
                    }
                    Err(err) => writeln!(out, "{err}")?,
                }
            }
            Command::Flag(coords) => {
                if let Err(err) = game.toggle_flag(coords) {
                    writeln!(out, "{err}")?;
                }
            }
            Command::New => game.restart(),
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Quit => break,
        }

        writeln!(out, "{}", render_board(&game.session))?;
    }

    Ok(())
}
