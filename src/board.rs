//! Sliding-tile puzzle board.
//!
//! A [`Board`] is a `rows x cols` grid holding rectangular [`Piece`]s with
//! dense ids `0..N`. Every cell is either empty or covered by exactly one
//! piece, and the grid is kept consistent with the per-id `pieces` and
//! `positions` arrays.
//!
//! Pieces move by sliding in a straight line over free cells. A slide of
//! `k` cells is a single [`Move`], and a piece that can slide three cells to
//! the right produces three distinct moves (of 1, 2 and 3 cells).
//!
//! # Equality
//!
//! Boards offer three notions of equality:
//!
//! - full equality ([`PartialEq`]/[`Hash`]): same dimensions, and every piece
//!   id has the same shape at the same position;
//! - targeted equality ([`Board::equals_targeted`], [`Board::targeted_key`]):
//!   only one designated piece is compared, everything else is ignored;
//! - layout equality ([`Board::layout_key`]): the grid of piece shapes, so
//!   boards that only differ by swapping same-shaped pieces are equal.
//!
//! # Examples
//!
//! ```
//! use backtrack::board::Board;
//! use backtrack::types::{Direction, Move, Piece, Position};
//!
//! let mut board = Board::new(2, 3, 1);
//! board.place(Piece::new(0, 1, 1), Position::new(0, 0)).unwrap();
//!
//! // The piece can go one cell down, or one or two cells right.
//! assert_eq!(board.moves().len(), 3);
//!
//! board.apply(Move::new(0, Direction::Right, 2)).unwrap();
//! assert_eq!(board.to_string(), ". . 0\n. . .\n");
//! ```

use std::error::Error;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::types::{Direction, Move, Piece, Position};

/// Error returned by board operations on invalid input.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum BoardError {
    /// The piece id is out of range or already placed, the piece does not
    /// fit within the bounds, or it overlaps another piece.
    InvalidPlacement { piece: Piece, position: Position },
    /// The move is not one of the currently legal moves.
    InvalidMove(Move),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidPlacement { piece, position } => {
                write!(f, "invalid piece {} or position {}", piece, position)
            }
            BoardError::InvalidMove(m) => write!(f, "invalid move {}", m),
        }
    }
}

impl Error for BoardError {}

#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Row-major grid of piece ids.
    cells: Vec<Option<usize>>,
    pieces: Vec<Option<Piece>>,
    positions: Vec<Option<Position>>,
}

impl Board {
    /// Creates an empty board for `pieces_count` pieces with ids `0..pieces_count`.
    pub fn new(rows: usize, cols: usize, pieces_count: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
            pieces: vec![None; pieces_count],
            positions: vec![None; pieces_count],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    /// Number of declared piece ids (placed or not).
    pub fn pieces_count(&self) -> usize {
        self.pieces.len()
    }

    /// Iterates over the placed pieces in increasing id order.
    pub fn pieces(&self) -> impl Iterator<Item = (Piece, Position)> + '_ {
        self.pieces
            .iter()
            .zip(self.positions.iter())
            .filter_map(|(piece, position)| Some(((*piece)?, (*position)?)))
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// Whether `(row, col)` is in bounds and empty.
    fn is_free(&self, row: i32, col: i32) -> bool {
        matches!(self.index(row, col), Some(i) if self.cells[i].is_none())
    }

    /// Returns the piece covering `position`, or `None` if the cell is empty
    /// or out of range.
    pub fn piece_at(&self, position: Position) -> Option<Piece> {
        let i = self.index(position.row(), position.col())?;
        self.cells[i].and_then(|id| self.pieces[id])
    }

    /// Returns the top-left position of the piece with the given id.
    pub fn position_of(&self, piece_id: usize) -> Option<Position> {
        self.positions.get(piece_id).copied().flatten()
    }

    /// Returns the placed piece with the given id.
    pub fn piece(&self, piece_id: usize) -> Option<Piece> {
        self.pieces.get(piece_id).copied().flatten()
    }

    fn can_place(&self, piece: Piece, position: Position) -> bool {
        if piece.id() >= self.pieces.len() || self.pieces[piece.id()].is_some() {
            return false;
        }
        if piece.height() == 0 || piece.width() == 0 {
            return false;
        }
        let (h, w) = (piece.height() as i32, piece.width() as i32);
        let (r, c) = (position.row(), position.col());
        (r..r + h).all(|i| (c..c + w).all(|j| self.is_free(i, j)))
    }

    /// Writes the piece into the grid. The footprint must be free.
    fn fill(&mut self, piece: Piece, position: Position) {
        let (h, w) = (piece.height() as i32, piece.width() as i32);
        let (r, c) = (position.row(), position.col());
        for i in r..r + h {
            for j in c..c + w {
                if let Some(index) = self.index(i, j) {
                    self.cells[index] = Some(piece.id());
                }
            }
        }
        self.pieces[piece.id()] = Some(piece);
        self.positions[piece.id()] = Some(position);
    }

    fn remove(&mut self, piece_id: usize) -> Option<(Piece, Position)> {
        let piece = self.pieces[piece_id].take()?;
        let position = self.positions[piece_id].take()?;
        let (h, w) = (piece.height() as i32, piece.width() as i32);
        let (r, c) = (position.row(), position.col());
        for i in r..r + h {
            for j in c..c + w {
                if let Some(index) = self.index(i, j) {
                    self.cells[index] = None;
                }
            }
        }
        Some((piece, position))
    }

    /// Places `piece` with its top-left corner at `position`.
    ///
    /// Fails with [`BoardError::InvalidPlacement`] if the id is out of range
    /// or already placed, the piece has a zero dimension, does not fit on the
    /// board, or overlaps another piece.
    pub fn place(&mut self, piece: Piece, position: Position) -> Result<(), BoardError> {
        if !self.can_place(piece, position) {
            return Err(BoardError::InvalidPlacement { piece, position });
        }
        self.fill(piece, position);
        Ok(())
    }

    /// Whether every cell beyond the leading edge of `piece` (top-left at
    /// `at`) in `direction` is in bounds and free.
    fn edge_is_free(&self, piece: Piece, at: Position, direction: Direction) -> bool {
        let (h, w) = (piece.height() as i32, piece.width() as i32);
        let (r, c) = (at.row(), at.col());
        match direction {
            Direction::Up => (c..c + w).all(|j| self.is_free(r - 1, j)),
            Direction::Down => (c..c + w).all(|j| self.is_free(r + h, j)),
            Direction::Left => (r..r + h).all(|i| self.is_free(i, c - 1)),
            Direction::Right => (r..r + h).all(|i| self.is_free(i, c + w)),
        }
    }

    fn slides(&self, piece: Piece, position: Position, direction: Direction, moves: &mut Vec<Move>) {
        let mut cells = 0;
        while self.edge_is_free(piece, position.offset(direction, cells), direction) {
            cells += 1;
            moves.push(Move::new(piece.id(), direction, cells));
        }
    }

    /// Returns all legal moves.
    ///
    /// Moves are enumerated by increasing piece id, then direction (up, down,
    /// left, right), then increasing distance. Callers should only rely on
    /// the set of moves, not on the order.
    pub fn moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for (piece, position) in self.pieces() {
            for direction in Direction::ALL {
                self.slides(piece, position, direction, &mut moves);
            }
        }
        moves
    }

    /// Whether `m` is currently legal, i.e. `moves().contains(&m)`.
    pub fn is_legal(&self, m: Move) -> bool {
        let Some(piece) = self.piece(m.piece_id()) else {
            return false;
        };
        let Some(position) = self.position_of(m.piece_id()) else {
            return false;
        };
        (0..m.cells()).all(|k| self.edge_is_free(piece, position.offset(m.direction(), k), m.direction()))
    }

    /// Applies a legal move in place.
    ///
    /// Fails with [`BoardError::InvalidMove`] if `m` is not in [`moves()`][Board::moves].
    pub fn apply(&mut self, m: Move) -> Result<(), BoardError> {
        if !self.is_legal(m) {
            return Err(BoardError::InvalidMove(m));
        }
        self.slide(m);
        Ok(())
    }

    /// Returns a copy of this board with the move applied.
    pub fn applied(&self, m: Move) -> Result<Board, BoardError> {
        let mut board = self.clone();
        board.apply(m)?;
        Ok(board)
    }

    /// Moves the piece without checking legality.
    pub(crate) fn slide(&mut self, m: Move) {
        debug_assert!(self.is_legal(m), "illegal move {}", m);
        if let Some((piece, position)) = self.remove(m.piece_id()) {
            self.fill(piece, position.offset(m.direction(), m.cells()));
        }
    }

    /// Targeted equality: both boards have the same dimensions, and the piece
    /// `piece_id` is placed on both with the same shape and position. All
    /// other pieces are ignored.
    pub fn equals_targeted(&self, other: &Board, piece_id: usize) -> bool {
        let this = self.targeted_key(piece_id);
        this.piece.is_some() && this == other.targeted_key(piece_id)
    }

    /// Hashable key for targeted equality.
    pub fn targeted_key(&self, piece_id: usize) -> TargetedKey {
        TargetedKey {
            rows: self.rows,
            cols: self.cols,
            piece: self.piece(piece_id).zip(self.position_of(piece_id)),
        }
    }

    /// Hashable key for layout equality: the shape covering every cell.
    pub fn layout_key(&self) -> LayoutKey {
        LayoutKey {
            rows: self.rows,
            cols: self.cols,
            shapes: self
                .cells
                .iter()
                .map(|cell| cell.and_then(|id| self.pieces[id]).map(Piece::shape))
                .collect(),
        }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self.pieces == other.pieces
            && self.positions == other.positions
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rows.hash(state);
        self.cols.hash(state);
        self.pieces.hash(state);
        self.positions.hash(state);
    }
}

/// Renders the board in standard format: one line per row, cells separated
/// by a single space, `.` for empty cells.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)).take(self.rows) {
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                match cell {
                    Some(id) => write!(f, "{}", id)?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Key of [`Board::equals_targeted`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TargetedKey {
    rows: usize,
    cols: usize,
    piece: Option<(Piece, Position)>,
}

/// Key of [`Board::layout_key`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct LayoutKey {
    rows: usize,
    cols: usize,
    shapes: Vec<Option<(usize, usize)>>,
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use test_log::test;

    use super::*;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn test_place_valid() {
        let mut board = Board::new(4, 3, 1);
        let piece = Piece::new(0, 1, 2);
        let position = Position::new(2, 1);
        board.place(piece, position).unwrap();
        assert_eq!(board.piece_at(position), Some(piece));
        assert_eq!(board.piece_at(Position::new(2, 2)), Some(piece));
        assert_eq!(board.position_of(0), Some(position));
        assert_eq!(board.piece_at(Position::new(2, 0)), None);
    }

    #[test]
    fn test_place_id_out_of_range() {
        let mut board = Board::new(5, 4, 9);
        let res = board.place(Piece::new(9, 2, 2), Position::new(1, 1));
        assert!(matches!(res, Err(BoardError::InvalidPlacement { .. })));
    }

    #[test]
    fn test_place_duplicate_id() {
        let mut board = Board::new(5, 4, 9);
        board.place(Piece::new(0, 2, 2), Position::new(0, 0)).unwrap();
        let res = board.place(Piece::new(0, 2, 2), Position::new(2, 0));
        assert!(matches!(res, Err(BoardError::InvalidPlacement { .. })));
    }

    #[test]
    fn test_place_overlap() {
        let mut board = Board::new(5, 4, 9);
        board.place(Piece::new(0, 2, 2), Position::new(0, 0)).unwrap();
        let res = board.place(Piece::new(1, 2, 2), Position::new(1, 1));
        assert!(matches!(res, Err(BoardError::InvalidPlacement { .. })));
        // A failed placement leaves the board untouched.
        assert_eq!(board.piece(1), None);
        assert_eq!(board.piece_at(Position::new(2, 2)), None);
    }

    #[test]
    fn test_place_outside() {
        let mut board = Board::new(5, 4, 9);
        assert!(board.place(Piece::new(1, 2, 2), Position::new(-1, 4)).is_err());
        assert!(board.place(Piece::new(1, 2, 2), Position::new(4, 3)).is_err());
        assert!(board.place(Piece::new(1, 0, 2), Position::new(0, 0)).is_err());
    }

    #[test]
    fn test_lookup_out_of_range() {
        let board = Board::new(2, 2, 1);
        assert_eq!(board.piece_at(Position::new(-1, 0)), None);
        assert_eq!(board.piece_at(Position::new(5, 5)), None);
        assert_eq!(board.position_of(3), None);
    }

    #[test]
    fn test_placed_cells_disjoint() {
        let board = board("0 0 1 1\n0 0 2 3\n. . 2 3\n4 5 5 6\n4 7 7 8\n");
        let mut covered = HashSet::new();
        for (piece, position) in board.pieces() {
            assert_eq!(board.piece_at(position).map(Piece::id), Some(piece.id()));
            for i in 0..piece.height() as i32 {
                for j in 0..piece.width() as i32 {
                    assert!(covered.insert((position.row() + i, position.col() + j)));
                }
            }
        }
        assert_eq!(covered.len(), 18);
    }

    #[test]
    fn test_moves() {
        let board = board("0 . . 1\n3 . . .\n. 2 2 .\n4 2 2 6\n4 5 5 7\n");
        let expected: HashSet<Move> = [
            Move::new(0, Direction::Right, 1),
            Move::new(0, Direction::Right, 2),
            Move::new(1, Direction::Left, 1),
            Move::new(1, Direction::Left, 2),
            Move::new(1, Direction::Down, 1),
            Move::new(1, Direction::Down, 2),
            Move::new(2, Direction::Up, 1),
            Move::new(2, Direction::Up, 2),
            Move::new(3, Direction::Right, 1),
            Move::new(3, Direction::Right, 2),
            Move::new(3, Direction::Right, 3),
            Move::new(3, Direction::Down, 1),
            Move::new(4, Direction::Up, 1),
            Move::new(6, Direction::Up, 1),
            Move::new(6, Direction::Up, 2),
        ]
        .into_iter()
        .collect();
        let moves = board.moves();
        assert_eq!(moves.len(), expected.len());
        assert_eq!(moves.into_iter().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn test_moves_order() {
        let board = board("0 . .\n. . .\n");
        assert_eq!(
            board.moves(),
            vec![
                Move::new(0, Direction::Down, 1),
                Move::new(0, Direction::Right, 1),
                Move::new(0, Direction::Right, 2),
            ]
        );
    }

    #[test]
    fn test_moves_stay_consistent() {
        let start = board("0 . . 1\n3 . . .\n. 2 2 .\n4 2 2 6\n4 5 5 7\n");
        for m in start.moves() {
            assert!(start.is_legal(m));
            let next = start.applied(m).unwrap();
            for m2 in next.moves() {
                assert!(next.applied(m2).is_ok());
            }
        }
    }

    #[test]
    fn test_apply_one_cell() {
        let mut b1 = board("1 1 2 2\n1 1 3 4\n. 9 3 4\n5 6 6 7\n5 8 8 0\n");
        let b2 = board("1 1 2 2\n1 1 3 4\n5 9 3 4\n5 6 6 7\n. 8 8 0\n");
        b1.apply(Move::new(5, Direction::Up, 1)).unwrap();
        assert_eq!(b1, b2);
    }

    #[test]
    fn test_apply_partial_slide() {
        let mut b1 = board("1 1 2 2\n1 1 3 4\n5 9 3 4\n. 6 6 7\n. 8 8 0\n");
        let b2 = board("1 1 2 2\n1 1 3 4\n. 9 3 4\n5 6 6 7\n. 8 8 0\n");
        b1.apply(Move::new(5, Direction::Down, 1)).unwrap();
        assert_eq!(b1, b2);
    }

    #[test]
    fn test_apply_two_cells() {
        let mut b1 = board("1 1 2 2\n1 1 3 4\n5 9 3 4\n5 6 6 7\n. . 8 0\n");
        let b2 = board("1 1 2 2\n1 1 3 4\n5 9 3 4\n5 6 6 7\n8 . . 0\n");
        b1.apply(Move::new(8, Direction::Left, 2)).unwrap();
        assert_eq!(b1, b2);
    }

    #[test]
    fn test_apply_invalid() {
        let mut b = board("1 1 2 2\n1 1 3 4\n5 9 3 4\n5 6 6 7\n. . 8 0\n");
        let before = b.clone();
        let m = Move::new(8, Direction::Left, 3);
        assert_eq!(b.apply(m), Err(BoardError::InvalidMove(m)));
        assert_eq!(b.apply(Move::new(42, Direction::Up, 1)), Err(BoardError::InvalidMove(Move::new(42, Direction::Up, 1))));
        assert_eq!(b, before);
    }

    #[test]
    fn test_equals_same_ids() {
        let b1 = board("1 1 2 2\n1 1 3 4\n. . 3 4\n5 6 6 7\n5 8 8 0\n");
        let b2 = board("1 1 2 2\n1 1 3 4\n. . 3 4\n5 6 6 7\n5 8 8 0\n");
        assert_eq!(b1, b2);

        let hash = |b: &Board| {
            use std::collections::hash_map::DefaultHasher;
            let mut h = DefaultHasher::new();
            b.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash(&b1), hash(&b2));
    }

    #[test]
    fn test_equals_different_ids() {
        let b1 = board("1 1 2 2\n1 1 3 4\n. . 3 4\n5 6 6 7\n5 8 8 0\n");
        let b2 = board("0 0 2 2\n0 0 4 3\n. . 4 3\n5 8 8 7\n5 6 6 1\n");
        assert_ne!(b1, b2);
        // Same shapes everywhere, though.
        assert_eq!(b1.layout_key(), b2.layout_key());
    }

    #[test]
    fn test_equals_different_boards() {
        let b1 = board("1 1 2 2\n2 2 3 3\n. . 4 4\n5 5 6 6\n7 7 0 0\n");
        let b2 = board("1 2 2 3\n1 4 4 3\n. . 5 6\n9 7 5 6\n9 8 8 0\n");
        assert_ne!(b1, b2);
        assert_ne!(b1.layout_key(), b2.layout_key());
    }

    #[test]
    fn test_equals_targeted() {
        let b1 = board("1 1 2 2\n1 1 3 4\n. . 3 4\n5 6 6 7\n5 8 8 0\n");
        let b2 = board("1 1 . .\n1 1 . .\n. . . .\n0 2 2 3\n0 4 4 5\n");
        assert!(b1.equals_targeted(&b2, 1));
        assert!(!b1.equals_targeted(&b2, 0));
        assert!(!b1.equals_targeted(&b2, 7));
        assert_ne!(b1, b2);
    }

    #[test]
    fn test_equals_targeted_implied_by_full() {
        let b1 = board("0 0 1 1\n0 0 2 3\n. . 2 3\n4 5 5 6\n4 7 7 8\n");
        let b2 = b1.clone();
        assert_eq!(b1, b2);
        for id in 0..b1.pieces_count() {
            assert!(b1.equals_targeted(&b1, id));
            assert!(b1.equals_targeted(&b2, id));
            assert_eq!(b1.targeted_key(id), b2.targeted_key(id));
        }
    }

    #[test]
    fn test_equals_targeted_requires_same_dimensions() {
        let b1 = board("0 .\n. .\n");
        let b2 = board("0 . .\n. . .\n");
        assert!(!b1.equals_targeted(&b2, 0));
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(2, 3, 2);
        board.place(Piece::new(0, 1, 2), Position::new(0, 1)).unwrap();
        board.place(Piece::new(1, 1, 1), Position::new(1, 0)).unwrap();
        assert_eq!(board.to_string(), ". 0 0\n1 . .\n");
    }
}
