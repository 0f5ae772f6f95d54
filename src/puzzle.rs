//! Sliding-tile puzzle solver.
//!
//! Binds [`Board`] and [`Move`] to the search engine: a [`BoardTuple`] is a
//! board together with the [`Goal`] it is searched towards. A board is a
//! solution when the target piece sits where it sits on the target board
//! (see [`Board::equals_targeted`]); the rest of the target is ignored.
//!
//! [`PuzzleSolver`] is the front door: build a [`PuzzleConfig`], pick a
//! [`Strategy`] and get the moves.
//!
//! ```
//! use backtrack::puzzle::{PuzzleConfig, PuzzleSolver};
//!
//! let start = "0 0 .\n1 . .\n".parse().unwrap();
//! let target = ". 0 0\n. . .\n".parse().unwrap();
//! let mut solver = PuzzleSolver::new(PuzzleConfig::new(start, target, 0));
//! let moves = solver.solve().into_solution().unwrap();
//! assert_eq!(moves.len(), 1);
//! assert_eq!(moves[0].to_string(), "M0:\u{2192}1");
//! ```

use std::fmt;

use log::debug;

use crate::backtrack::{Backtracker, Outcome, SearchConfig, DEFAULT_MAX_VISITS};
use crate::board::{Board, BoardError, LayoutKey, TargetedKey};
use crate::frontier::{Fifo, Frontier, Lifo, Strategy};
use crate::graph::GraphSink;
use crate::state::{GraphLabel, NodeId, State};
use crate::types::Move;

/// Which boards the visited set treats as the same.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum DedupMode {
    /// Same pieces at the same places.
    #[default]
    Full,
    /// Same shapes at the same places, ids ignored: boards differing only by
    /// swapping equally-shaped pieces are merged.
    ///
    /// Only exact when no other piece has the shape of the target piece.
    /// Otherwise a board where the target piece is in place can be merged with
    /// one where a same-shaped piece sits there instead, and the solution may
    /// be missed.
    Layout,
    /// Same target piece at the same place, everything else ignored.
    ///
    /// This collapses most of the state space and is only useful when the
    /// other pieces never block the target.
    Targeted,
}

impl fmt::Display for DedupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DedupMode::Full => write!(f, "full"),
            DedupMode::Layout => write!(f, "layout"),
            DedupMode::Targeted => write!(f, "targeted"),
        }
    }
}

impl std::str::FromStr for DedupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(DedupMode::Full),
            "layout" => Ok(DedupMode::Layout),
            "targeted" => Ok(DedupMode::Targeted),
            _ => Err(format!(
                "unknown dedup mode '{}', expected 'full', 'layout' or 'targeted'",
                s
            )),
        }
    }
}

/// What a search is looking for.
#[derive(Debug, Clone)]
pub struct Goal {
    pub target: Board,
    pub piece_id: usize,
    pub dedup: DedupMode,
}

impl Goal {
    pub fn new(target: Board, piece_id: usize, dedup: DedupMode) -> Self {
        Self {
            target,
            piece_id,
            dedup,
        }
    }

    pub fn is_reached(&self, board: &Board) -> bool {
        board.equals_targeted(&self.target, self.piece_id)
    }

    /// Visited-set key of `board`.
    pub fn key(&self, board: &Board) -> BoardKey {
        match self.dedup {
            DedupMode::Full => BoardKey::Full(board.clone()),
            DedupMode::Layout => BoardKey::Layout(board.layout_key()),
            DedupMode::Targeted => BoardKey::Targeted(board.targeted_key(self.piece_id)),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum BoardKey {
    Full(Board),
    Layout(LayoutKey),
    Targeted(TargetedKey),
}

/// A board searched towards a goal.
#[derive(Debug, Clone)]
pub struct BoardTuple<'a> {
    board: Board,
    goal: &'a Goal,
}

impl<'a> BoardTuple<'a> {
    pub fn new(board: Board, goal: &'a Goal) -> Self {
        Self { board, goal }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn goal(&self) -> &'a Goal {
        self.goal
    }
}

impl State for BoardTuple<'_> {
    type Element = Move;
    type Key = BoardKey;

    fn is_solution(&self) -> bool {
        self.goal.is_reached(&self.board)
    }

    fn next_elements(&self) -> Vec<Move> {
        self.board.moves()
    }

    fn next(&self, m: &Move) -> Self {
        let mut board = self.board.clone();
        board.slide(*m);
        Self {
            board,
            goal: self.goal,
        }
    }

    fn key(&self) -> BoardKey {
        self.goal.key(&self.board)
    }
}

impl GraphLabel for BoardTuple<'_> {
    fn graph_label(&self) -> String {
        self.board.to_string()
    }

    fn graph_description(&self, visit: usize, size: usize) -> Option<String> {
        let moves: Vec<String> = self.board.moves().iter().map(ToString::to_string).collect();
        Some(format!("Visit #{}\nLength: {}\n[{}]", visit, size, moves.join(", ")))
    }
}

/// Configuration of a [`PuzzleSolver`].
#[derive(Debug, Clone)]
pub struct PuzzleConfig {
    pub start: Board,
    pub target: Board,
    /// Id of the piece that must reach its place on `target`.
    pub target_piece: usize,
    pub strategy: Strategy,
    pub max_visits: usize,
    pub dedup: DedupMode,
}

impl PuzzleConfig {
    /// BFS with full-board deduplication and the default visit limit.
    pub fn new(start: Board, target: Board, target_piece: usize) -> Self {
        Self {
            start,
            target,
            target_piece,
            strategy: Strategy::default(),
            max_visits: DEFAULT_MAX_VISITS,
            dedup: DedupMode::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_visits(mut self, max_visits: usize) -> Self {
        self.max_visits = max_visits;
        self
    }

    pub fn with_dedup(mut self, dedup: DedupMode) -> Self {
        self.dedup = dedup;
        self
    }
}

/// Solves one puzzle.
#[derive(Debug)]
pub struct PuzzleSolver {
    start: Board,
    goal: Goal,
    strategy: Strategy,
    search: SearchConfig,
    visits: usize,
}

impl PuzzleSolver {
    pub fn new(config: PuzzleConfig) -> Self {
        Self {
            start: config.start,
            goal: Goal::new(config.target, config.target_piece, config.dedup),
            strategy: config.strategy,
            search: SearchConfig::default().with_max_visits(config.max_visits),
            visits: 0,
        }
    }

    pub fn goal(&self) -> &Goal {
        &self.goal
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Number of boards visited by the last run.
    pub fn visits(&self) -> usize {
        self.visits
    }

    /// Returns the moves leading from the start board to the goal.
    pub fn solve(&mut self) -> Outcome<Move> {
        let (outcome, visits) = match self.strategy {
            Strategy::Bfs => self.run::<Fifo<NodeId>>(),
            Strategy::Dfs => self.run::<Lifo<NodeId>>(),
        };
        self.visits = visits;
        outcome
    }

    /// Like [`solve`][Self::solve], also describing the explored boards to `sink`.
    pub fn solve_with_sink<S: GraphSink>(&mut self, sink: &mut S) -> Result<Outcome<Move>, S::Error> {
        let (outcome, visits) = match self.strategy {
            Strategy::Bfs => self.run_with_sink::<Fifo<NodeId>, S>(sink)?,
            Strategy::Dfs => self.run_with_sink::<Lifo<NodeId>, S>(sink)?,
        };
        self.visits = visits;
        Ok(outcome)
    }

    fn run<F: Frontier<NodeId> + Default>(&self) -> (Outcome<Move>, usize) {
        debug!("{} search, {} dedup", self.strategy, self.goal.dedup);
        let mut bt = Backtracker::<BoardTuple, F>::new(self.search);
        let outcome = bt.solve(BoardTuple::new(self.start.clone(), &self.goal));
        (outcome, bt.visits())
    }

    fn run_with_sink<F: Frontier<NodeId> + Default, S: GraphSink>(
        &self,
        sink: &mut S,
    ) -> Result<(Outcome<Move>, usize), S::Error> {
        debug!("{} search, {} dedup", self.strategy, self.goal.dedup);
        let mut bt = Backtracker::<BoardTuple, F>::new(self.search);
        let outcome = bt.solve_with_sink(BoardTuple::new(self.start.clone(), &self.goal), sink)?;
        Ok((outcome, bt.visits()))
    }
}

/// Replays `moves` from `start`: the start board, then one board per move.
///
/// Fails on the first move that is not legal on the current board.
pub fn boards(start: &Board, moves: &[Move]) -> Result<Vec<Board>, BoardError> {
    let mut boards = Vec::with_capacity(moves.len() + 1);
    let mut board = start.clone();
    for &m in moves {
        let next = board.applied(m)?;
        boards.push(board);
        board = next;
    }
    boards.push(board);
    Ok(boards)
}
