use alloc::collections::BTreeSet;
use alloc::vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    NotStarted,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    AlreadyRevealed,
    Flagged,
    GameEnded,
    HitMine,
    /// Cells that went from unrevealed to revealed during this call.
    Revealed(BTreeSet<Coord2>),
}

impl RevealOutcome {
    pub fn has_update(&self) -> bool {
        matches!(self, Self::HitMine | Self::Revealed(_))
    }

    pub fn revealed_cells(&self) -> Option<&BTreeSet<Coord2>> {
        match self {
            Self::Revealed(cells) => Some(cells),
            _ => None,
        }
    }
}

/// A populated minefield together with the player's progress on it.
///
/// The status is derived from the revealed-safe counter and the triggered mine, both of which
/// only change together with the cells they describe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridCells")]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_safe: CellCount,
    flagged_count: CellCount,
    triggered_mine: Option<Coord2>,
}

impl Grid {
    /// Builds a grid from a mine mask indexed by `[row, col]`, deriving every adjacency count.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidSize);
        }
        let size: Coord2 = (
            rows.try_into().map_err(|_| GameError::InvalidSize)?,
            cols.try_into().map_err(|_| GameError::InvalidSize)?,
        );

        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .map_err(|_| GameError::TooManyMines)?;

        let cells = Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
            let is_mine = mine_mask[(row, col)];
            let adjacent_mines = if is_mine {
                0
            } else {
                NeighborIter::new((row as Coord, col as Coord), size)
                    .filter(|pos| mine_mask[pos.to_nd_index()])
                    .count() as u8
            };
            Cell {
                is_mine,
                adjacent_mines,
                ..Cell::default()
            }
        });

        Ok(Self {
            cells,
            mine_count,
            revealed_safe: 0,
            flagged_count: 0,
            triggered_mine: None,
        })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(&mine_mask)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn config(&self) -> FieldConfig {
        let (rows, cols) = self.size();
        FieldConfig::new(rows, cols, self.mine_count)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        mult(self.size().0, self.size().1) - self.mine_count
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines minus flags; negative when the player has placed more flags than there are mines.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.mine_count) - i32::from(self.flagged_count)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn status(&self) -> GameStatus {
        if self.triggered_mine.is_some() {
            GameStatus::Lost
        } else if self.revealed_safe == self.safe_cell_count() {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status().is_finished()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        Ok(self[self.validate_coords(coords)?])
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Flips the flag on an unrevealed cell and returns the new flag state.
    ///
    /// Revealed cells and finished games are left untouched; the current state is returned.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        let cell = self[coords];

        if self.is_finished() || cell.is_revealed {
            return Ok(cell.is_flagged);
        }

        let flagged = !cell.is_flagged;
        self.cells[coords.to_nd_index()].is_flagged = flagged;
        if flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        log::trace!("Flag at {:?} set to {}", coords, flagged);
        Ok(flagged)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = self[coords];

        if self.is_finished() {
            return Ok(RevealOutcome::GameEnded);
        }
        if cell.is_revealed {
            return Ok(RevealOutcome::AlreadyRevealed);
        }
        if cell.is_flagged {
            return Ok(RevealOutcome::Flagged);
        }

        if cell.is_mine {
            self.cells[coords.to_nd_index()].is_revealed = true;
            self.triggered_mine = Some(coords);
            log::info!("Mine hit at {:?}", coords);
            return Ok(RevealOutcome::HitMine);
        }

        let revealed = self.flood_reveal(coords);
        log::debug!("Revealed {} cells from {:?}", revealed.len(), coords);

        if self.status() == GameStatus::Won {
            self.flag_remaining_mines();
            log::info!("All {} safe cells revealed", self.revealed_safe);
        }

        Ok(RevealOutcome::Revealed(revealed))
    }

    /// Reveals `start` and, through an explicit worklist, every cell reachable from it over
    /// empty cells. Each cell is marked revealed before it is pushed, so it is visited once.
    fn flood_reveal(&mut self, start: Coord2) -> BTreeSet<Coord2> {
        let mut revealed = BTreeSet::new();
        self.open_cell(start);
        revealed.insert(start);

        let mut to_visit = vec![start];
        while let Some(visit_coords) = to_visit.pop() {
            if !self[visit_coords].is_empty() {
                continue;
            }

            for pos in self.iter_neighbors(visit_coords) {
                let neighbor = self[pos];
                if neighbor.is_revealed || neighbor.is_flagged {
                    continue;
                }
                debug_assert!(!neighbor.is_mine, "empty cell next to a mine at {pos:?}");

                self.open_cell(pos);
                revealed.insert(pos);
                log::trace!("Flood opened {:?}, mine count: {}", pos, neighbor.adjacent_mines);
                to_visit.push(pos);
            }
        }

        revealed
    }

    fn open_cell(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.is_revealed = true;
        cell.is_flagged = false;
        self.revealed_safe += 1;
    }

    fn flag_remaining_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.is_mine && !cell.is_flagged {
                cell.is_flagged = true;
                self.flagged_count += 1;
            }
        }
    }
}

/// Serialized form read back into a [`Grid`]; only the cells are trusted.
#[derive(Deserialize)]
struct GridCells {
    cells: Array2<Cell>,
}

impl TryFrom<GridCells> for Grid {
    type Error = GameError;

    /// Rebuilds adjacency and every counter from the cells, rejecting states play cannot reach.
    fn try_from(GridCells { cells }: GridCells) -> Result<Self> {
        let mut grid = Self::from_mine_mask(&cells.map(|cell| cell.is_mine))?;

        for ((row, col), &cell) in cells.indexed_iter() {
            let coords = (row as Coord, col as Coord);
            let adjacent_mines = grid[coords].adjacent_mines;
            if !cell.is_mine && cell.adjacent_mines != adjacent_mines {
                return Err(GameError::InvalidMineLayout);
            }
            if cell.is_revealed && cell.is_flagged {
                return Err(GameError::InvalidMineLayout);
            }

            if cell.is_revealed && cell.is_mine {
                if grid.triggered_mine.is_some() {
                    return Err(GameError::InvalidMineLayout);
                }
                grid.triggered_mine = Some(coords);
            } else if cell.is_revealed {
                grid.revealed_safe += 1;
            }
            if cell.is_flagged {
                grid.flagged_count += 1;
            }

            grid.cells[(row, col)] = Cell {
                adjacent_mines,
                ..cell
            };
        }

        Ok(grid)
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(size: Coord2, mines: &[Coord2]) -> Grid {
        Grid::from_mine_coords(size, mines).unwrap()
    }

    #[test]
    fn adjacency_counts_clip_at_edges() {
        let grid = grid((3, 3), &[(0, 0), (2, 2)]);

        assert_eq!(grid[(1, 1)].adjacent_mines, 2);
        assert_eq!(grid[(0, 1)].adjacent_mines, 1);
        assert_eq!(grid[(0, 2)].adjacent_mines, 0);
        assert_eq!(grid[(2, 1)].adjacent_mines, 1);
        assert_eq!(grid.mine_count(), 2);
    }

    #[test]
    fn reveal_hits_mine_and_sets_triggered_cell() {
        let mut grid = grid((3, 3), &[(0, 0)]);

        assert!(grid.reveal((1, 1)).unwrap().has_update());
        let outcome = grid.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::HitMine);
        assert_eq!(grid.revealed_safe_count(), 1);
        assert_eq!(grid.status(), GameStatus::Lost);
        assert_eq!(grid.triggered_mine(), Some((0, 0)));
        assert!(grid[(0, 0)].is_revealed);
    }

    #[test]
    fn reveal_flood_fill_opens_zero_region() {
        let mut grid = grid((3, 3), &[(2, 2)]);

        let outcome = grid.reveal((0, 0)).unwrap();

        assert_eq!(outcome.revealed_cells().map(BTreeSet::len), Some(8));
        assert_eq!(grid.status(), GameStatus::Won);
        assert!(!grid[(2, 2)].is_revealed);
        assert!(grid[(2, 2)].is_flagged);
        assert_eq!(grid.mines_left(), 0);
    }

    #[test]
    fn reveal_numbered_cell_opens_only_itself() {
        let mut grid = grid((3, 3), &[(2, 2)]);

        let outcome = grid.reveal((1, 1)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed(BTreeSet::from([(1, 1)])));
        assert_eq!(grid.status(), GameStatus::Playing);
    }

    #[test]
    fn flood_fill_stops_at_flags() {
        let mut grid = grid((1, 5), &[(0, 4)]);

        assert!(grid.toggle_flag((0, 1)).unwrap());
        let outcome = grid.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed(BTreeSet::from([(0, 0)])));
        assert!(grid[(0, 1)].is_flagged);
        assert!(!grid[(0, 2)].is_revealed);
    }

    #[test]
    fn revealed_and_flagged_cells_are_no_ops() {
        let mut grid = grid((2, 3), &[(0, 2)]);

        grid.reveal((1, 0)).unwrap();
        let snapshot = grid.clone();
        assert_eq!(grid.reveal((1, 0)).unwrap(), RevealOutcome::AlreadyRevealed);
        assert_eq!(grid, snapshot);

        grid.toggle_flag((1, 2)).unwrap();
        assert_eq!(grid.reveal((1, 2)).unwrap(), RevealOutcome::Flagged);
    }

    #[test]
    fn toggle_flag_ignores_revealed_cells() {
        let mut grid = grid((2, 3), &[(0, 2)]);

        grid.reveal((0, 1)).unwrap();
        assert!(!grid.toggle_flag((0, 1)).unwrap());
        assert_eq!(grid.flagged_count(), 0);
    }

    #[test]
    fn mines_left_goes_negative_when_over_flagged() {
        let mut grid = grid((2, 3), &[(0, 2)]);

        grid.toggle_flag((0, 0)).unwrap();
        grid.toggle_flag((1, 0)).unwrap();
        assert_eq!(grid.mines_left(), -1);

        assert!(!grid.toggle_flag((1, 0)).unwrap());
        assert_eq!(grid.mines_left(), 0);
    }

    #[test]
    fn finished_game_rejects_further_moves() {
        let mut grid = grid((2, 3), &[(0, 2)]);

        grid.reveal((0, 2)).unwrap();
        let snapshot = grid.clone();

        assert_eq!(grid.reveal((1, 0)).unwrap(), RevealOutcome::GameEnded);
        assert!(!grid.toggle_flag((1, 0)).unwrap());
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn deserialized_grid_rebuilds_counters_from_cells() {
        let grid = grid((3, 3), &[(0, 0)]);
        let mut json = serde_json::to_value(&grid).unwrap();
        json["revealed_safe"] = 8.into();

        let restored: Grid = serde_json::from_value(json).unwrap();

        assert_eq!(restored.status(), GameStatus::Playing);
        assert_eq!(restored.revealed_safe_count(), 0);
        assert_eq!(restored, grid);
    }

    #[test]
    fn deserialized_lost_grid_keeps_triggered_mine() {
        let mut grid = grid((3, 3), &[(0, 0)]);
        grid.toggle_flag((2, 2)).unwrap();
        grid.reveal((1, 1)).unwrap();
        grid.reveal((0, 0)).unwrap();

        let json = serde_json::to_string(&grid).unwrap();
        let restored: Grid = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, grid);
        assert_eq!(restored.status(), GameStatus::Lost);
        assert_eq!(restored.triggered_mine(), Some((0, 0)));
        assert_eq!(restored.flagged_count(), 1);
    }

    #[test]
    fn deserialize_rejects_unreachable_cells() {
        let grid = grid((3, 3), &[(0, 0)]);

        let mut flagged_open = serde_json::to_value(&grid).unwrap();
        flagged_open["cells"]["data"][1]["is_revealed"] = true.into();
        flagged_open["cells"]["data"][1]["is_flagged"] = true.into();
        assert!(serde_json::from_value::<Grid>(flagged_open).is_err());

        let mut wrong_count = serde_json::to_value(&grid).unwrap();
        wrong_count["cells"]["data"][8]["adjacent_mines"] = 3.into();
        assert!(serde_json::from_value::<Grid>(wrong_count).is_err());
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let mut grid = grid((2, 3), &[(0, 2)]);

        assert_eq!(grid.reveal((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(grid.toggle_flag((0, 3)), Err(GameError::InvalidCoords));
    }
}
