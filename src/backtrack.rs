//! Generic backtracking search.
//!
//! The [`Backtracker`] explores the graph of candidate solutions of a
//! [`State`]: starting from a root, it repeatedly takes a node from the
//! frontier, and either accepts it as a solution or pushes one successor per
//! element returned by [`State::next_elements`]. The order in which the
//! frontier hands out nodes ([`Fifo`][crate::frontier::Fifo] or
//! [`Lifo`][crate::frontier::Lifo]) makes the search breadth-first or
//! depth-first.
//!
//! # Duplicates
//!
//! Distinct paths may reach equal states. Duplicates are recognized when a
//! node is *popped*, by looking its [`State::key`] up in the visited set:
//! the first node popped for a key is visited, later ones are discarded. The
//! frontier may therefore hold redundant entries for a while, but every
//! distinct state is expanded at most once. With a FIFO frontier this keeps
//! the usual breadth-first guarantee: the first solution accepted has
//! minimum length.
//!
//! # Bookkeeping
//!
//! Each visited node gets a 1-based visit index, in acceptance order. When a
//! solution is found, it and all its ancestors are flagged as part of the
//! solution, and the answer is the sequence of elements along that path. The
//! number of visits is bounded by [`SearchConfig::max_visits`].
//!
//! # Examples
//!
//! ```
//! use backtrack::backtrack::{Backtracker, SearchConfig};
//! use backtrack::frontier::Fifo;
//! use backtrack::state::{NodeId, State};
//!
//! /// Reach 10 from 1 using "+1" and "*2".
//! #[derive(Clone)]
//! struct Num(u32);
//!
//! impl State for Num {
//!     type Element = char;
//!     type Key = u32;
//!
//!     fn is_solution(&self) -> bool {
//!         self.0 == 10
//!     }
//!     fn next_elements(&self) -> Vec<char> {
//!         vec!['+', '*']
//!     }
//!     fn next(&self, op: &char) -> Self {
//!         match op {
//!             '+' => Num(self.0 + 1),
//!             _ => Num(self.0 * 2),
//!         }
//!     }
//!     fn key(&self) -> u32 {
//!         self.0
//!     }
//! }
//!
//! let mut bt = Backtracker::<Num, Fifo<NodeId>>::new(SearchConfig::default());
//! let outcome = bt.solve(Num(1));
//! assert_eq!(outcome.solution().map(|ops| ops.len()), Some(4));
//! ```

use std::collections::HashSet;
use std::fmt;

use log::{debug, info};

use crate::frontier::Frontier;
use crate::graph::{Color, GraphSink};
use crate::state::{GraphLabel, Node, NodeId, State};
use crate::tree::Tree;

/// Default bound on the number of visited nodes.
pub const DEFAULT_MAX_VISITS: usize = 100_000;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SearchConfig {
    /// Maximum number of nodes visited before giving up.
    pub max_visits: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_visits: DEFAULT_MAX_VISITS,
        }
    }
}

impl SearchConfig {
    pub fn with_max_visits(mut self, max_visits: usize) -> Self {
        self.max_visits = max_visits;
        self
    }
}

/// Why a search ended without a solution.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Exhaustion {
    /// Every reachable state was visited.
    FrontierEmpty,
    /// The visit limit was reached first.
    VisitLimit,
}

impl fmt::Display for Exhaustion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exhaustion::FrontierEmpty => write!(f, "no solution exists"),
            Exhaustion::VisitLimit => write!(f, "visit limit reached"),
        }
    }
}

/// Result of a search.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Outcome<E> {
    /// Elements leading from the start to the solution (empty if the start
    /// is itself a solution).
    Solved(Vec<E>),
    Exhausted(Exhaustion),
}

impl<E> Outcome<E> {
    pub fn is_solved(&self) -> bool {
        matches!(self, Outcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&[E]> {
        match self {
            Outcome::Solved(elements) => Some(elements),
            Outcome::Exhausted(_) => None,
        }
    }

    pub fn into_solution(self) -> Option<Vec<E>> {
        match self {
            Outcome::Solved(elements) => Some(elements),
            Outcome::Exhausted(_) => None,
        }
    }
}

/// Backtracking engine over states `T` with frontier `F`.
///
/// One engine runs one search at a time; all of its state (frontier, visited
/// set, node arena, counter) is reset at the start of [`solve`][Self::solve]
/// and kept afterwards for inspection.
pub struct Backtracker<T: State, F: Frontier<NodeId>> {
    config: SearchConfig,
    frontier: F,
    tree: Tree<T>,
    visited: HashSet<T::Key>,
    /// Visited nodes, in visit order.
    order: Vec<NodeId>,
    visits: usize,
    solution: Option<NodeId>,
}

impl<T: State, F: Frontier<NodeId> + Default> Backtracker<T, F> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_frontier(config, F::default())
    }
}

impl<T: State, F: Frontier<NodeId>> Backtracker<T, F> {
    pub fn with_frontier(config: SearchConfig, frontier: F) -> Self {
        Self {
            config,
            frontier,
            tree: Tree::new(),
            visited: HashSet::new(),
            order: Vec::new(),
            visits: 0,
            solution: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Number of nodes visited by the last search.
    pub fn visits(&self) -> usize {
        self.visits
    }

    /// Node arena of the last search.
    pub fn tree(&self) -> &Tree<T> {
        &self.tree
    }

    /// The accepted solution node of the last search, if any.
    pub fn solution_node(&self) -> Option<NodeId> {
        self.solution
    }

    /// Visited nodes of the last search, in visit order.
    pub fn visited_nodes(&self) -> impl Iterator<Item = (NodeId, &Node<T>)> + '_ {
        self.order.iter().map(|&id| (id, &self.tree[id]))
    }

    fn reset(&mut self) {
        self.frontier.clear();
        self.tree.clear();
        self.visited.clear();
        self.order.clear();
        self.visits = 0;
        self.solution = None;
    }

    /// Searches for a solution reachable from `start`.
    pub fn solve(&mut self, start: T) -> Outcome<T::Element> {
        self.reset();
        info!("solve(max_visits = {})", self.config.max_visits);

        let root = self.tree.add(Node::root(start));
        self.frontier.push(root);
        let outcome = self.run();

        match &outcome {
            Outcome::Solved(elements) => {
                info!("solved in {} visits, solution of length {}", self.visits, elements.len())
            }
            Outcome::Exhausted(reason) => info!("no solution after {} visits: {}", self.visits, reason),
        }
        outcome
    }

    fn run(&mut self) -> Outcome<T::Element> {
        loop {
            if self.visits >= self.config.max_visits {
                return Outcome::Exhausted(Exhaustion::VisitLimit);
            }
            let Some(id) = self.frontier.pop() else {
                return Outcome::Exhausted(Exhaustion::FrontierEmpty);
            };

            if !self.visited.insert(self.tree[id].state().key()) {
                debug!("discard {} (already visited)", id);
                self.tree.drop(id);
                continue;
            }

            self.visits += 1;
            let node = &mut self.tree[id];
            node.set_visit_index(self.visits);
            self.order.push(id);
            debug!(
                "visit #{} = {} (size = {}, frontier = {})",
                self.visits,
                id,
                node.size(),
                self.frontier.len()
            );

            if node.state().is_solution() {
                self.solution = Some(id);
                self.mark_solution_path(id);
                return Outcome::Solved(self.path(id));
            }

            if self.visits >= self.config.max_visits {
                debug!("visit limit {} reached", self.config.max_visits);
                return Outcome::Exhausted(Exhaustion::VisitLimit);
            }

            self.expand(id);
        }
    }

    /// Pushes one successor per next element, duplicates included.
    fn expand(&mut self, id: NodeId) {
        let node = &self.tree[id];
        let size = node.size();
        let children: Vec<Node<T>> = node
            .state()
            .next_elements()
            .into_iter()
            .map(|element| Node::child(node.state().next(&element), id, size, element))
            .collect();
        debug!("expand {}: {} successors", id, children.len());
        for child in children {
            let child = self.tree.add(child);
            self.frontier.push(child);
        }
    }

    fn mark_solution_path(&mut self, id: NodeId) {
        let path: Vec<NodeId> = self.tree.ancestors(id).collect();
        for node in path {
            self.tree[node].set_part_of_solution(true);
        }
    }

    /// Elements from the root (excluded) down to `id`.
    fn path(&self, id: NodeId) -> Vec<T::Element> {
        let mut elements: Vec<T::Element> = self
            .tree
            .ancestors(id)
            .filter_map(|node| self.tree[node].last_element().cloned())
            .collect();
        elements.reverse();
        elements
    }
}

impl<T, F> Backtracker<T, F>
where
    T: State + GraphLabel,
    T::Element: fmt::Display,
    F: Frontier<NodeId>,
{
    /// Runs [`solve`][Self::solve] and then describes the explored graph to `sink`.
    ///
    /// A sink error aborts the run and is returned as is.
    pub fn solve_with_sink<S: GraphSink>(&mut self, start: T, sink: &mut S) -> Result<Outcome<T::Element>, S::Error> {
        let outcome = self.solve(start);
        self.write_graph(sink)?;
        Ok(outcome)
    }

    /// Writes the visited nodes of the last search, in visit order, each
    /// followed by the edge from its parent.
    pub fn write_graph<S: GraphSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        let graph_id = |node: &Node<T>| format!("N{}", node.visit_index().unwrap_or_default());

        sink.open("G")?;
        for (_, node) in self.visited_nodes() {
            let id = graph_id(node);
            let color = if node.is_part_of_solution() {
                Color::SOLUTION
            } else {
                Color::NODE
            };
            let description = node
                .state()
                .graph_description(node.visit_index().unwrap_or_default(), node.size());
            sink.write_node(&id, &node.state().graph_label(), description.as_deref(), color)?;

            if let Some(parent) = node.previous() {
                let label = node.last_element().map(ToString::to_string);
                sink.write_edge(&graph_id(&self.tree[parent]), &id, label.as_deref())?;
            }
        }
        sink.close()
    }
}

impl<T: State, F: Frontier<NodeId>> fmt::Debug for Backtracker<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Backtracker")
            .field("config", &self.config)
            .field("visits", &self.visits)
            .field("frontier", &self.frontier.len())
            .field("nodes", &self.tree.real_size())
            .finish()
    }
}
