// Shared proptest configuration and generators for the engine's integration tests.
//
// Env knobs:
// - PROPTEST_CASES: number of cases per property (default 64).

#![allow(dead_code)]

use minefield_core::*;
use proptest::prelude::*;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(64)
        .max(1);
    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}

pub fn tier() -> impl Strategy<Value = DifficultyTier> {
    prop_oneof![
        Just(DifficultyTier::Beginner),
        Just(DifficultyTier::Intermediate),
        Just(DifficultyTier::Expert),
    ]
}

/// Any valid field together with an in-bounds first click.
///
/// Mine counts are generated below the safe-zone ceiling by construction, no filtering.
pub fn field_with_click() -> impl Strategy<Value = (FieldConfig, Coord2)> {
    (4u8..=16, 4u8..=30)
        .prop_flat_map(|(rows, cols)| {
            let ceiling = mult(rows, cols) - 9;
            (Just(rows), Just(cols), 0..ceiling, 0..rows, 0..cols)
        })
        .prop_map(|(rows, cols, mines, row, col)| {
            (FieldConfig::new(rows, cols, mines), (row, col))
        })
}

/// Any cell of a `rows x cols` field.
pub fn coords_in(size: Coord2) -> impl Strategy<Value = Coord2> {
    (0..size.0, 0..size.1)
}

#[derive(Copy, Clone, Debug)]
pub enum Action {
    Reveal(Coord2),
    Flag(Coord2),
}

pub fn actions(size: Coord2, max_len: usize) -> impl Strategy<Value = Vec<Action>> {
    let action = prop_oneof![
        3 => coords_in(size).prop_map(Action::Reveal),
        1 => coords_in(size).prop_map(Action::Flag),
    ];
    proptest::collection::vec(action, 0..max_len)
}

/// Mines in the clipped Moore neighborhood, counted without the engine's neighbor iterator.
pub fn brute_force_adjacent(grid: &Grid, (row, col): Coord2) -> u8 {
    let (rows, cols) = grid.size();
    let mut count = 0;
    for r in row.saturating_sub(1)..=(row + 1).min(rows - 1) {
        for c in col.saturating_sub(1)..=(col + 1).min(cols - 1) {
            if (r, c) != (row, col) && grid[(r, c)].is_mine {
                count += 1;
            }
        }
    }
    count
}

pub fn is_won(grid: &Grid) -> bool {
    grid.iter_cells()
        .all(|(_, cell)| cell.is_mine != cell.is_revealed)
}

pub fn is_lost(grid: &Grid) -> bool {
    grid.iter_cells()
        .any(|(_, cell)| cell.is_mine && cell.is_revealed)
}

/// Checks every invariant that must hold between two operations; returns the broken one.
pub fn check_invariants(grid: &Grid, expected_mines: CellCount) -> std::result::Result<(), String> {
    let mines = grid.iter_cells().filter(|(_, cell)| cell.is_mine).count();
    if mines != usize::from(expected_mines) {
        return Err(format!("expected {expected_mines} mines, found {mines}"));
    }

    if let Some((coords, _)) = grid
        .iter_cells()
        .find(|(_, cell)| cell.is_revealed && cell.is_flagged)
    {
        return Err(format!("cell {coords:?} is both revealed and flagged"));
    }

    match grid.status() {
        GameStatus::Lost if !is_lost(grid) => Err("lost without a revealed mine".into()),
        GameStatus::Won if !is_won(grid) => Err("won with safe cells still hidden".into()),
        GameStatus::Playing if is_won(grid) || is_lost(grid) => {
            Err("playing although the grid is terminal".into())
        }
        status if is_won(grid) && is_lost(grid) => {
            Err(format!("grid is both won and lost ({status:?})"))
        }
        _ => Ok(()),
    }
}
