//! Standard board text format.
//!
//! A board in *standard format* is a grid of whitespace-separated cells, one
//! row per line. Each cell is either `.` (empty) or the non-negative id of the
//! piece covering it. Ids are dense over `0..=max`, and the cells of each id
//! form a filled rectangle.
//!
//! The initial configuration of the Quzzle, for example:
//!
//! ```text
//! 0 0 1 1
//! 0 0 2 3
//! . . 2 3
//! 4 5 5 6
//! 4 7 7 8
//! ```
//!
//! [`format`] is the inverse of [`parse`]: for input using single spaces and
//! a trailing newline, `format(&parse(text)?) == text`.

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::board::{Board, BoardError};
use crate::types::{Piece, Position};

/// Error returned when parsing malformed board text.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FormatError {
    /// The input contains no rows.
    Empty,
    /// A row has a different number of cells than the first one.
    RaggedRow { row: usize, expected: usize, found: usize },
    /// A cell is neither `.` nor a non-negative integer.
    InvalidCell { row: usize, col: usize, token: String },
    /// An id in `0..=max` does not appear on the grid.
    MissingPiece(usize),
    /// The cells of an id do not form a filled rectangle.
    NotRectangular(usize),
    /// The decoded piece could not be placed.
    Placement(BoardError),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::Empty => write!(f, "empty board"),
            FormatError::RaggedRow { row, expected, found } => {
                write!(f, "row {} has {} cells, expected {}", row, found, expected)
            }
            FormatError::InvalidCell { row, col, token } => {
                write!(f, "invalid cell '{}' at ({},{})", token, row, col)
            }
            FormatError::MissingPiece(id) => write!(f, "missing piece with id {}", id),
            FormatError::NotRectangular(id) => write!(f, "piece {} is not a filled rectangle", id),
            FormatError::Placement(e) => write!(f, "{}", e),
        }
    }
}

impl Error for FormatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FormatError::Placement(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BoardError> for FormatError {
    fn from(e: BoardError) -> Self {
        FormatError::Placement(e)
    }
}

/// Bounding box and cell count of one id.
#[derive(Debug, Clone, Copy)]
struct Extent {
    top: usize,
    left: usize,
    bottom: usize,
    right: usize,
    count: usize,
}

impl Extent {
    fn new(row: usize, col: usize) -> Self {
        Self {
            top: row,
            left: col,
            bottom: row,
            right: col,
            count: 1,
        }
    }

    fn add(&mut self, row: usize, col: usize) {
        self.top = self.top.min(row);
        self.left = self.left.min(col);
        self.bottom = self.bottom.max(row);
        self.right = self.right.max(col);
        self.count += 1;
    }

    fn height(&self) -> usize {
        self.bottom - self.top + 1
    }
    fn width(&self) -> usize {
        self.right - self.left + 1
    }
}

fn parse_grid(text: &str) -> Result<Vec<Vec<Option<usize>>>, FormatError> {
    let mut grid: Vec<Vec<Option<usize>>> = Vec::new();
    for (row, line) in text.lines().filter(|line| !line.trim().is_empty()).enumerate() {
        let cells = line
            .split_whitespace()
            .enumerate()
            .map(|(col, token)| match token {
                "." => Ok(None),
                _ => token.parse::<usize>().map(Some).map_err(|_| FormatError::InvalidCell {
                    row,
                    col,
                    token: token.to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(first) = grid.first() {
            if cells.len() != first.len() {
                return Err(FormatError::RaggedRow {
                    row,
                    expected: first.len(),
                    found: cells.len(),
                });
            }
        }
        grid.push(cells);
    }
    if grid.is_empty() {
        return Err(FormatError::Empty);
    }
    Ok(grid)
}

/// Parses a board in standard format.
///
/// The dimensions are taken from the input. Blank lines are skipped.
pub fn parse(text: &str) -> Result<Board, FormatError> {
    let grid = parse_grid(text)?;
    let rows = grid.len();
    let cols = grid[0].len();

    let mut ids: Vec<usize> = grid.iter().flatten().flatten().copied().collect();
    ids.sort_unstable();
    ids.dedup();
    // Ids must be dense: the i-th smallest distinct id is i.
    if let Some(missing) = ids.iter().enumerate().find_map(|(i, &id)| (i != id).then_some(i)) {
        return Err(FormatError::MissingPiece(missing));
    }
    let pieces_count = ids.len();

    let mut extents: Vec<Option<Extent>> = vec![None; pieces_count];
    for (i, row) in grid.iter().enumerate() {
        for (j, cell) in row.iter().enumerate() {
            if let Some(id) = *cell {
                if let Some(extent) = &mut extents[id] {
                    extent.add(i, j);
                } else {
                    extents[id] = Some(Extent::new(i, j));
                }
            }
        }
    }

    let mut board = Board::new(rows, cols, pieces_count);
    for (id, extent) in extents.into_iter().enumerate() {
        let extent = extent.ok_or(FormatError::MissingPiece(id))?;
        if extent.count != extent.height() * extent.width() {
            return Err(FormatError::NotRectangular(id));
        }
        let piece = Piece::new(id, extent.height(), extent.width());
        board.place(piece, Position::new(extent.top as i32, extent.left as i32))?;
    }
    Ok(board)
}

/// Formats a board in standard format.
pub fn format(board: &Board) -> String {
    board.to_string()
}

impl FromStr for Board {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
