use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

const SIDE: usize = BOARD_SIZE as usize;

/// Row-major value grid used to deal a board with known values.
pub type ValueGrid = [[CellValue; SIDE]; SIDE];

/// Fixed-size grid of cells.
///
/// The board only enforces per-cell lifecycle rules; sequencing between cells
/// (selection, resolution, cascades) is owned by [`GameSession`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    pub const fn center() -> Coord2 {
        (BOARD_SIZE / 2, BOARD_SIZE / 2)
    }

    /// Deals a board with the standard opening: void center, revealed ring,
    /// everything else covered. The center entry of `values` is ignored.
    pub fn from_values(values: &ValueGrid) -> Result<Self> {
        let center = Self::center();
        let size = (BOARD_SIZE, BOARD_SIZE);
        let mut cells = Array2::from_elem(size.to_nd_index(), Cell::void());

        for (row, row_values) in (0..BOARD_SIZE).zip(values.iter()) {
            for (col, &value) in (0..BOARD_SIZE).zip(row_values.iter()) {
                let coords = (row, col);
                if coords == center {
                    continue;
                }
                cells[coords.to_nd_index()] = Cell::with_value(value, CellState::Covered)?;
            }
        }
        for coords in Shape::Ring.cells(center, size) {
            cells[coords.to_nd_index()].transition(CellState::Revealed);
        }

        Ok(Self { cells })
    }

    /// Wraps an existing cell grid, checking the shape and the void invariant.
    pub fn from_cells(cells: Array2<Cell>) -> Result<Self> {
        if cells.dim() != (SIDE, SIDE) {
            return Err(GameError::InvalidBoardShape);
        }

        let center = Self::center().to_nd_index();
        let void_elsewhere = cells.indexed_iter().any(|((row, col), cell)| {
            let is_center = [row, col] == center;
            (cell.state() == CellState::Void) != is_center
        });
        if void_elsewhere {
            return Err(GameError::InvalidBoardShape);
        }

        Ok(Self { cells })
    }

    pub fn size(&self) -> Coord2 {
        (BOARD_SIZE, BOARD_SIZE)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn state_at(&self, coords: Coord2) -> CellState {
        self.cell_at(coords).state()
    }

    pub fn value_at(&self, coords: Coord2) -> Option<CellValue> {
        self.cell_at(coords).value()
    }

    /// Iterates all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    /// Iterates the values of all currently revealed cells.
    pub fn revealed_values(&self) -> impl Iterator<Item = CellValue> + '_ {
        self.cells
            .iter()
            .filter(|cell| cell.state() == CellState::Revealed)
            .filter_map(|cell| cell.value())
    }

    pub fn count_in_state(&self, state: CellState) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.state() == state)
            .count() as CellCount
    }

    pub fn total_cells(&self) -> CellCount {
        mult(BOARD_SIZE, BOARD_SIZE)
    }

    /// Cells that can ever hold a value, i.e. everything but the void.
    pub fn playable_cells(&self) -> CellCount {
        self.total_cells() - 1
    }

    /// Cells that are neither covered nor void.
    pub fn opened_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| cell.state().is_opened())
            .count() as CellCount
    }

    pub fn opened_percent(&self) -> u8 {
        let opened = u32::from(self.opened_count());
        let playable = u32::from(self.playable_cells());
        (opened * 100 / playable) as u8
    }

    pub(crate) fn transition(&mut self, coords: Coord2, next: CellState) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        let prev = cell.state();
        let changed = cell.transition(next);
        if changed {
            log::trace!("cell {:?}: {:?} -> {:?}", coords, prev, next);
        }
        changed
    }

    pub(crate) fn transition_all(
        &mut self,
        coords: impl IntoIterator<Item = Coord2>,
        next: CellState,
    ) -> CellCount {
        coords
            .into_iter()
            .filter(|&pos| self.transition(pos, next))
            .count() as CellCount
    }

    /// Returns every `selecting` cell to `revealed`.
    pub(crate) fn revert_selecting(&mut self) -> CellCount {
        let mut reverted = 0;
        for cell in self.cells.iter_mut() {
            if cell.state() == CellState::Selecting && cell.transition(CellState::Revealed) {
                reverted += 1;
            }
        }
        reverted
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.cells[(row as usize, col as usize)]
    }
}
