//! Value types of the sliding-tile puzzle.
//!
//! These are small `Copy` types with value semantics:
//!
//! - [`Position`] is a cell coordinate on the board,
//! - [`Piece`] is a rectangular piece,
//! - [`Direction`] and [`Move`] describe a single slide.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A cell coordinate `(row, col)`.
///
/// Coordinates are signed so that out-of-range positions (e.g. `(-1, 0)`)
/// can be expressed and rejected by the board instead of wrapping around.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Position {
    row: i32,
    col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub const fn row(self) -> i32 {
        self.row
    }
    pub const fn col(self) -> i32 {
        self.col
    }

    /// Returns the position shifted by `cells` in the given direction.
    pub fn offset(self, direction: Direction, cells: usize) -> Self {
        let (dr, dc) = direction.delta();
        let cells = cells as i32;
        Self::new(self.row + dr * cells, self.col + dc * cells)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// A rectangular piece.
///
/// The id is only a placement key on a [`Board`][crate::board::Board]:
/// equality and hashing consider the dimensions alone, so two pieces of the
/// same shape are interchangeable.
#[derive(Debug, Copy, Clone)]
pub struct Piece {
    id: usize,
    height: usize,
    width: usize,
}

impl Piece {
    pub const fn new(id: usize, height: usize, width: usize) -> Self {
        Self { id, height, width }
    }

    pub const fn id(self) -> usize {
        self.id
    }
    pub const fn height(self) -> usize {
        self.height
    }
    pub const fn width(self) -> usize {
        self.width
    }

    /// Dimensions as `(height, width)`.
    pub const fn shape(self) -> (usize, usize) {
        (self.height, self.width)
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }
}

impl Eq for Piece {}

impl Hash for Piece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.shape().hash(state);
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}-{}x{}", self.id, self.height, self.width)
    }
}

/// Direction of a slide.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in move enumeration order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit offset `(drow, dcol)`.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub const fn arrow(self) -> char {
        match self {
            Direction::Up => '\u{2191}',
            Direction::Down => '\u{2193}',
            Direction::Left => '\u{2190}',
            Direction::Right => '\u{2192}',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.arrow())
    }
}

/// Slide of piece `piece_id` by `cells` cells in `direction`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Move {
    piece_id: usize,
    direction: Direction,
    cells: usize,
}

impl Move {
    /// # Panics
    ///
    /// Panics if `cells == 0`.
    pub fn new(piece_id: usize, direction: Direction, cells: usize) -> Self {
        assert_ne!(cells, 0, "A move must slide at least one cell");
        Self {
            piece_id,
            direction,
            cells,
        }
    }

    pub const fn piece_id(self) -> usize {
        self.piece_id
    }
    pub const fn direction(self) -> Direction {
        self.direction
    }
    pub const fn cells(self) -> usize {
        self.cells
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}:{}{}", self.piece_id, self.direction, self.cells)
    }
}
