//! Frontier strategies.
//!
//! The frontier is the ordered set of nodes waiting to be expanded. Its
//! order is the only difference between breadth-first and depth-first
//! search:
//!
//! - [`Fifo`] pops the oldest node first (BFS), so the first solution found
//!   has minimum length;
//! - [`Lifo`] pops the newest node first (DFS), which keeps the frontier
//!   proportional to the current depth rather than the breadth.

use std::collections::VecDeque;
use std::fmt;

pub trait Frontier<T> {
    fn push(&mut self, item: T);
    fn pop(&mut self) -> Option<T>;
    fn len(&self) -> usize;
    fn clear(&mut self);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// First-in first-out frontier (breadth-first search).
#[derive(Debug, Clone)]
pub struct Fifo<T>(VecDeque<T>);

impl<T> Default for Fifo<T> {
    fn default() -> Self {
        Self(VecDeque::new())
    }
}

impl<T> Frontier<T> for Fifo<T> {
    fn push(&mut self, item: T) {
        self.0.push_back(item);
    }
    fn pop(&mut self) -> Option<T> {
        self.0.pop_front()
    }
    fn len(&self) -> usize {
        self.0.len()
    }
    fn clear(&mut self) {
        self.0.clear();
    }
}

/// Last-in first-out frontier (depth-first search).
#[derive(Debug, Clone)]
pub struct Lifo<T>(Vec<T>);

impl<T> Default for Lifo<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Frontier<T> for Lifo<T> {
    fn push(&mut self, item: T) {
        self.0.push(item);
    }
    fn pop(&mut self) -> Option<T> {
        self.0.pop()
    }
    fn len(&self) -> usize {
        self.0.len()
    }
    fn clear(&mut self) {
        self.0.clear();
    }
}

/// Traversal order, selecting a [`Frontier`] implementation.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Strategy {
    /// Breadth-first, see [`Fifo`].
    #[default]
    Bfs,
    /// Depth-first, see [`Lifo`].
    Dfs,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Bfs => write!(f, "BFS"),
            Strategy::Dfs => write!(f, "DFS"),
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Strategy::Bfs),
            "dfs" => Ok(Strategy::Dfs),
            _ => Err(format!("unknown strategy '{}', expected 'bfs' or 'dfs'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<F: Frontier<u32>>(mut frontier: F) -> Vec<u32> {
        for i in 1..=4 {
            frontier.push(i);
        }
        assert_eq!(frontier.len(), 4);
        let mut out = Vec::new();
        while let Some(i) = frontier.pop() {
            out.push(i);
        }
        assert!(frontier.is_empty());
        out
    }

    #[test]
    fn test_fifo() {
        assert_eq!(drain(Fifo::default()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_lifo() {
        assert_eq!(drain(Lifo::default()), vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_clear() {
        let mut frontier = Lifo::default();
        frontier.push(1);
        frontier.push(2);
        frontier.clear();
        assert!(frontier.is_empty());
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("bfs".parse::<Strategy>(), Ok(Strategy::Bfs));
        assert_eq!("DFS".parse::<Strategy>(), Ok(Strategy::Dfs));
        assert!("astar".parse::<Strategy>().is_err());
        assert_eq!(Strategy::default(), Strategy::Bfs);
    }
}
