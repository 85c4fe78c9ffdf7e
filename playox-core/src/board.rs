//! 3x3 board geometry with row-major indexing

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cells per row and per column
pub const BOARD_SIZE: usize = 3;

/// Total number of cells (positions 0-8)
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// The eight lines that win the game when one mover holds all three cells
pub const WINNING_TRIPLES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

// ============================================================================
// MOVERS AND CELLS
// ============================================================================

/// One of the two sides of a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mover {
    Human,
    Computer,
}

impl Mover {
    /// Symbol used on the wire and in the terminal (`X` moves first)
    pub fn symbol(self) -> &'static str {
        match self {
            Mover::Human => "X",
            Mover::Computer => "O",
        }
    }
}

impl fmt::Display for Mover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mover::Human => write!(f, "human ({})", self.symbol()),
            Mover::Computer => write!(f, "computer ({})", self.symbol()),
        }
    }
}

/// Contents of a single board position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Taken(Mover),
}

impl Cell {
    pub fn symbol(self) -> &'static str {
        match self {
            Cell::Empty => "",
            Cell::Taken(mover) => mover.symbol(),
        }
    }

    pub fn mover(self) -> Option<Mover> {
        match self {
            Cell::Empty => None,
            Cell::Taken(mover) => Some(mover),
        }
    }
}

// ============================================================================
// COORDINATES
// ============================================================================

/// Column/row coordinates, `x` is the column and `y` the row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    /// Build a coordinate pair, rejecting anything off the board
    pub fn new(x: i64, y: i64) -> Option<Self> {
        let range = 0..BOARD_SIZE as i64;
        if range.contains(&x) && range.contains(&y) {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    /// Coordinates of a flat position index
    pub fn from_index(index: usize) -> Option<Self> {
        (index < CELL_COUNT).then(|| Self::of_cell(index))
    }

    /// Caller guarantees `index < CELL_COUNT`
    pub(crate) fn of_cell(index: usize) -> Self {
        Self {
            x: (index % BOARD_SIZE) as u8,
            y: (index / BOARD_SIZE) as u8,
        }
    }

    /// Flat position index (`y * 3 + x`)
    pub fn index(&self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Nine cells in row-major order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell at a position, `None` when the index is off the board
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Caller guarantees `index < CELL_COUNT`
    pub(crate) fn place(&mut self, index: usize, mover: Mover) {
        self.cells[index] = Cell::Taken(mover);
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Cells grouped into rows, top to bottom
    pub fn rows(&self) -> [[Cell; BOARD_SIZE]; BOARD_SIZE] {
        let mut rows = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (index, cell) in self.cells.iter().enumerate() {
            rows[index / BOARD_SIZE][index % BOARD_SIZE] = *cell;
        }
        rows
    }

    /// Positions still open, in ascending order
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| *cell != Cell::Empty)
    }

    /// Mover holding a complete winning triple, if any
    pub fn winner(&self) -> Option<Mover> {
        WINNING_TRIPLES.iter().find_map(|&[a, b, c]| {
            let first = self.cells[a];
            if first != Cell::Empty && first == self.cells[b] && first == self.cells[c] {
                first.mover()
            } else {
                None
            }
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.rows().iter().enumerate() {
            let line: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(col, cell)| match cell {
                    Cell::Empty => (row_index * BOARD_SIZE + col).to_string(),
                    Cell::Taken(mover) => mover.symbol().to_string(),
                })
                .collect();
            write!(f, " {} ", line.join(" | "))?;
            if row_index + 1 < BOARD_SIZE {
                write!(f, "\n---+---+---\n")?;
            }
        }
        Ok(())
    }
}
