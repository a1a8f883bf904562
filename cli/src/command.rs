use std::str::FromStr;

use anyhow::{Context, bail};
use minefield_core::Coord2;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    New,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  r ROW COL   reveal a cell
  f ROW COL   toggle a flag
  n           start a new game
  h           show this help
  q           quit";

fn parse_coords<'a>(mut parts: impl Iterator<Item = &'a str>) -> anyhow::Result<Coord2> {
    let row = parts.next().context("missing row")?;
    let col = parts.next().context("missing column")?;
    if parts.next().is_some() {
        bail!("too many arguments");
    }
    let row = row.parse().with_context(|| format!("invalid row {row:?}"))?;
    let col = col.parse().with_context(|| format!("invalid column {col:?}"))?;
    Ok((row, col))
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> anyhow::Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(verb) = parts.next() else {
            bail!("empty command, try `h`");
        };

        Ok(match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Command::Reveal(parse_coords(parts)?),
            "f" | "flag" => Command::Flag(parse_coords(parts)?),
            "n" | "new" => Command::New,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => bail!("unknown command {other:?}, try `h`"),
        })
    }
}
