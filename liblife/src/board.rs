use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::pos::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Dead,

    /// Born on the most recent transition.
    Alive,

    /// Was already living before the most recent transition and survived it.
    Old,
}

impl CellState {
    pub fn is_living(self) -> bool {
        matches!(self, CellState::Alive | CellState::Old)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cell ({row}, {col}) is outside the {rows}x{cols} board")]
pub struct OutOfBounds {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

/// A fixed-size toroidal grid of cells, stored row-major.
///
/// Dimensions never change after construction. Neighbor arithmetic wraps
/// modulo the dimensions, so every cell has exactly 8 neighbor slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

const NEIGHBOR_RELATIVE_POSITIONS: &[[isize; 2]] = &[
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, -1],
    [0, 1],
    [1, -1],
    [1, 0],
    [1, 1],
];

impl Board {
    pub fn new_cleared(rows: usize, cols: usize) -> Self {
        let cells = vec![CellState::default(); rows * cols];
        Self::with_cells(rows, cols, cells)
    }

    /// Each cell is independently `Alive` with probability `alive_probability`.
    ///
    /// The RNG is caller-supplied so a seeded one can be passed for
    /// reproducible boards.
    pub fn new_random<R: Rng>(
        rows: usize,
        cols: usize,
        alive_probability: f64,
        rng: &mut R,
    ) -> Self {
        let cells = (0..rows * cols)
            .map(|_| {
                if rng.random_bool(alive_probability) {
                    CellState::Alive
                } else {
                    CellState::Dead
                }
            })
            .collect();

        Self::with_cells(rows, cols, cells)
    }

    pub fn with_cells(rows: usize, cols: usize, cells: Vec<CellState>) -> Self {
        assert!(rows > 0 && cols > 0, "board dimensions must be non-zero");
        assert_eq!(cells.len(), rows * cols, "cell count must match dimensions");

        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell<P>(&self, pos: P) -> Option<&CellState>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.cells.get(index)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> {
        (0..self.rows)
            .cartesian_product(0..self.cols)
            .map(|(row, col)| Position { row, col })
    }

    pub fn enumerate_cells(&self) -> impl Iterator<Item = (Position, &CellState)> {
        // positions() iterates row-major, matching the flat storage order.
        self.positions().zip(self.cells.iter())
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.cols)
    }

    /// Flip a cell between dead and living: `Dead` becomes `Alive`, while a
    /// living cell becomes `Dead` whether it is freshly born or `Old`.
    ///
    /// This is the only single-cell mutation the board exposes; transitions
    /// always go through [`Board::advance`].
    pub fn toggle<P>(&mut self, pos: P) -> Result<(), OutOfBounds>
    where
        P: Into<Position>,
    {
        let pos = pos.into();

        let Some(index) = self.pos_to_index(pos) else {
            return Err(OutOfBounds {
                row: pos.row,
                col: pos.col,
                rows: self.rows,
                cols: self.cols,
            });
        };

        let cell = &mut self.cells[index];
        *cell = match *cell {
            CellState::Dead => CellState::Alive,
            CellState::Alive | CellState::Old => CellState::Dead,
        };

        Ok(())
    }

    /// Count the living cells among the 8 toroidally-wrapped neighbor slots.
    ///
    /// On boards narrower than 3 cells, wrapped slots can land on the same
    /// cell more than once; every slot still counts.
    pub fn neighbor_living_count(&self, pos: Position) -> u8 {
        NEIGHBOR_RELATIVE_POSITIONS
            .iter()
            .filter(|[row_offset, col_offset]| {
                let neighbor = Position {
                    row: wrapped(pos.row, *row_offset, self.rows),
                    col: wrapped(pos.col, *col_offset, self.cols),
                };

                self.cell(neighbor).is_some_and(|cell| cell.is_living())
            })
            .count() as u8
    }

    /// The state this cell takes on the next generation, evaluated purely
    /// against the current board. `None` if the position is out of range.
    pub fn next_cell_state(&self, pos: Position) -> Option<CellState> {
        let current = *self.cell(pos)?;
        Some(transition(current, self.neighbor_living_count(pos)))
    }

    /// Compute the next generation into a fresh board.
    ///
    /// Every cell is evaluated against the pre-transition board, so neighbor
    /// counting never observes a half-updated grid.
    pub fn advance(&self) -> Board {
        let next_cells = self
            .enumerate_cells()
            .map(|(pos, cell)| transition(*cell, self.neighbor_living_count(pos)))
            .collect();

        Board::with_cells(self.rows, self.cols, next_cells)
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_living()).count()
    }

    fn pos_to_index<P>(&self, pos: P) -> Option<usize>
    where
        P: Into<Position>,
    {
        let Position { row, col } = pos.into();

        if row >= self.rows {
            return None;
        }

        if col >= self.cols {
            return None;
        }

        Some(col + (row * self.cols))
    }
}

/// Classic B3/S23, with survivors tagged `Old` instead of staying `Alive`.
fn transition(current: CellState, living_neighbors: u8) -> CellState {
    if current.is_living() {
        match living_neighbors {
            2 | 3 => CellState::Old,
            _ => CellState::Dead,
        }
    } else if living_neighbors == 3 {
        CellState::Alive
    } else {
        CellState::Dead
    }
}

fn wrapped(coord: usize, offset: isize, len: usize) -> usize {
    (coord as isize + offset).rem_euclid(len as isize) as usize
}
