//! Search-node capability set.
//!
//! The engine sees a problem through two pieces:
//!
//! - [`State`], implemented by the domain: the solution test, the elements
//!   that extend a state, the (pure) construction of a successor, and the key
//!   used to recognize already-visited states;
//! - [`Node`], owned by the engine: a state together with its link to the
//!   node that created it, the element that produced it, and the engine's
//!   bookkeeping (visit index and solution-path flag).
//!
//! Nodes live in a [`Tree`][crate::tree::Tree] arena and refer to their
//! parent by [`NodeId`], so the ancestor chain never owns anything.

use std::fmt;
use std::hash::Hash;

/// Domain capabilities of a search state.
pub trait State: Sized {
    /// An element extending a partial solution (e.g. a move).
    type Element: Clone;

    /// Value identity of a state in the visited set.
    ///
    /// Two states with equal keys are treated as the same state: only the
    /// first one popped from the frontier is expanded.
    type Key: Eq + Hash;

    fn is_solution(&self) -> bool;

    /// Elements that can extend this state, in expansion order.
    fn next_elements(&self) -> Vec<Self::Element>;

    /// Builds the successor reached through `element`. Never mutates `self`.
    fn next(&self, element: &Self::Element) -> Self;

    fn key(&self) -> Self::Key;
}

/// Text attached to a state in a traversal graph.
pub trait GraphLabel {
    fn graph_label(&self) -> String;

    /// Longer free-form description. `visit` and `size` are the engine's
    /// bookkeeping for the node being written.
    fn graph_description(&self, visit: usize, size: usize) -> Option<String> {
        let _ = (visit, size);
        None
    }
}

/// Index of a node in the [`Tree`][crate::tree::Tree] arena.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// # Panics
    ///
    /// Panics if `index` does not fit in 32 bits.
    pub(crate) fn new(index: usize) -> Self {
        assert!(index <= u32::MAX as usize, "Node index {} is out of range", index);
        Self(index as u32)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// A state in the search tree.
#[derive(Debug, Clone)]
pub struct Node<T: State> {
    state: T,
    parent: Option<NodeId>,
    last: Option<T::Element>,
    size: usize,
    visit: Option<usize>,
    solution: bool,
}

impl<T: State> Node<T> {
    /// Creates the root node: no parent, no last element, size 0.
    pub fn root(state: T) -> Self {
        Self {
            state,
            parent: None,
            last: None,
            size: 0,
            visit: None,
            solution: false,
        }
    }

    /// Creates the node reached from `parent` (of size `parent_size`) through `element`.
    pub fn child(state: T, parent: NodeId, parent_size: usize, element: T::Element) -> Self {
        Self {
            state,
            parent: Some(parent),
            last: Some(element),
            size: parent_size + 1,
            visit: None,
            solution: false,
        }
    }

    pub fn state(&self) -> &T {
        &self.state
    }

    /// The element that produced this node, `None` for the root.
    pub fn last_element(&self) -> Option<&T::Element> {
        self.last.as_ref()
    }

    /// The node that created this one, `None` for the root.
    pub fn previous(&self) -> Option<NodeId> {
        self.parent
    }

    /// Number of elements on the path from the root.
    pub fn size(&self) -> usize {
        self.size
    }

    /// 1-based order in which the node was accepted, `None` if never visited.
    pub fn visit_index(&self) -> Option<usize> {
        self.visit
    }

    /// # Panics
    ///
    /// Panics if the visit index is already set.
    pub fn set_visit_index(&mut self, visit: usize) {
        assert!(self.visit.is_none(), "Visit index is already set");
        assert_ne!(visit, 0, "Visit indices are 1-based");
        self.visit = Some(visit);
    }

    pub fn is_part_of_solution(&self) -> bool {
        self.solution
    }
    pub fn set_part_of_solution(&mut self, solution: bool) {
        self.solution = solution;
    }
}
