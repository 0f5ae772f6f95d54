//! # backtrack-rs: generic backtracking search in Rust
//!
//! **`backtrack-rs`** finds a sequence of elements leading from a start state
//! to a solution state, by exploring the state graph breadth-first or
//! depth-first. It comes with a sliding-tile puzzle model (rectangular pieces
//! sliding on a grid) to drive it end-to-end.
//!
//! ## Key Features
//!
//! - **Pluggable order**: the [`Frontier`][crate::frontier::Frontier] decides between BFS ([`Fifo`][crate::frontier::Fifo]), which finds a shortest solution, and DFS ([`Lifo`][crate::frontier::Lifo]).
//! - **Value-based deduplication**: states are compared through a [`State::Key`][crate::state::State::Key], checked when a node is popped, so every distinct state is expanded at most once.
//! - **Arena storage**: search nodes live in a [`Tree`][crate::tree::Tree] and refer to their parents by [`NodeId`][crate::state::NodeId].
//! - **Bounded**: a visit limit stops searches in huge state spaces.
//! - **Inspectable**: the explored graph can be written as GraphML (yEd) or DOT (Graphviz).
//!
//! ## Basic Usage
//!
//! ```rust
//! use backtrack::frontier::Strategy;
//! use backtrack::puzzle::{boards, PuzzleConfig, PuzzleSolver};
//!
//! // Bring piece 0 to the top-right corner.
//! let start: backtrack::board::Board = "0 . .\n1 1 .\n".parse().unwrap();
//! let target = ". . 0\n. . .\n".parse().unwrap();
//!
//! let config = PuzzleConfig::new(start.clone(), target, 0).with_strategy(Strategy::Bfs);
//! let mut solver = PuzzleSolver::new(config);
//! let moves = solver.solve().into_solution().unwrap();
//! assert_eq!(moves.len(), 1);
//! assert_eq!(moves[0].to_string(), "M0:→2");
//!
//! // Replay the solution.
//! let replay = boards(&start, &moves).unwrap();
//! assert_eq!(replay[1].to_string(), ". . 0\n1 1 .\n");
//! ```
//!
//! ## Core Components
//!
//! - **[`backtrack`]**: the [`Backtracker`][crate::backtrack::Backtracker] engine.
//! - **[`state`]**: what a problem must provide to be searched.
//! - **[`board`]**, **[`types`]**, **[`format`]**: the sliding-tile puzzle model and its text format.
//! - **[`puzzle`]**: the puzzle solver.
//! - **[`graph`]**, **[`dot`]**: traversal graph output.

pub mod backtrack;
pub mod board;
pub mod dot;
pub mod format;
pub mod frontier;
pub mod graph;
pub mod puzzle;
pub mod state;
pub mod tree;
pub mod types;
