//! Node arena.
//!
//! The search tree is stored in a growable slot arena. A node refers to its
//! parent by [`NodeId`], so the whole ancestor chain is plain indices and
//! there is no shared ownership between nodes.
//!
//! Nodes discarded by the engine (duplicates popped from the frontier) are
//! released with [`Tree::drop`], and their slots are reused by later
//! allocations, most recently released first. A node is only released while nothing refers to it: a
//! discarded duplicate was never expanded, so it has no children.

use std::ops::{Index, IndexMut};

use crate::state::{Node, NodeId, State};

pub struct Tree<T: State> {
    data: Vec<Option<Node<T>>>,
    /// Released slots, reused last-in first-out.
    free: Vec<usize>,
    /// Number of occupied slots.
    real_size: usize,
}

impl<T: State> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: State> Tree<T> {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            free: Vec::new(),
            real_size: 0,
        }
    }

    /// Number of allocated slots (occupied or not).
    pub fn size(&self) -> usize {
        self.data.len()
    }
    /// Number of live nodes.
    pub fn real_size(&self) -> usize {
        self.real_size
    }

    pub fn is_occupied(&self, id: NodeId) -> bool {
        matches!(self.data.get(id.index()), Some(Some(_)))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.data.get(id.index()).and_then(Option::as_ref)
    }
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.data.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Adds a node and returns its id.
    pub fn add(&mut self, node: Node<T>) -> NodeId {
        let index = match self.free.pop() {
            Some(index) => {
                debug_assert!(self.data[index].is_none());
                self.data[index] = Some(node);
                index
            }
            None => {
                self.data.push(Some(node));
                self.data.len() - 1
            }
        };
        self.real_size += 1;

        NodeId::new(index)
    }

    /// Releases the node. Its id may be handed out again by [`add`][Tree::add].
    pub fn drop(&mut self, id: NodeId) -> Option<Node<T>> {
        let node = self.data.get_mut(id.index())?.take()?;
        self.free.push(id.index());
        self.real_size -= 1;
        Some(node)
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.free.clear();
        self.real_size = 0;
    }

    /// Walks the ancestor chain from `id` up to the root, inclusive.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, T> {
        Ancestors {
            tree: self,
            current: Some(id),
        }
    }

    /// Iterates over the live nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<T>)> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|node| (NodeId::new(i), node)))
    }
}

impl<T: State> Index<NodeId> for Tree<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.get(id).unwrap_or_else(|| panic!("Node {} is not occupied", id))
    }
}

impl<T: State> IndexMut<NodeId> for Tree<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.get_mut(id).unwrap_or_else(|| panic!("Node {} is not occupied", id))
    }
}

/// Iterator over a node and its ancestors, see [`Tree::ancestors`].
pub struct Ancestors<'a, T: State> {
    tree: &'a Tree<T>,
    current: Option<NodeId>,
}

impl<'a, T: State> Iterator for Ancestors<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.get(id).and_then(Node::previous);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Unit;

    impl State for Unit {
        type Element = ();
        type Key = ();

        fn is_solution(&self) -> bool {
            false
        }
        fn next_elements(&self) -> Vec<()> {
            vec![]
        }
        fn next(&self, _: &()) -> Self {
            Unit
        }
        fn key(&self) {}
    }

    #[test]
    fn test_add() {
        let mut tree = Tree::new();
        let a = tree.add(Node::root(Unit));
        let b = tree.add(Node::child(Unit, a, 0, ()));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(tree.real_size(), 2);
        assert_eq!(tree[b].previous(), Some(a));
        assert_eq!(tree[b].size(), 1);
    }

    #[test]
    fn test_drop_reuses_slot() {
        let mut tree = Tree::new();
        let a = tree.add(Node::root(Unit));
        let b = tree.add(Node::child(Unit, a, 0, ()));
        let c = tree.add(Node::child(Unit, a, 0, ()));
        assert!(tree.drop(b).is_some());
        assert!(!tree.is_occupied(b));
        assert!(tree.drop(b).is_none());
        assert_eq!(tree.real_size(), 2);

        let d = tree.add(Node::child(Unit, c, 1, ()));
        assert_eq!(d, b);
        assert_eq!(tree.size(), 3);
        let e = tree.add(Node::child(Unit, c, 1, ()));
        assert_eq!(e.index(), 3);
    }

    #[test]
    fn test_reuse_order() {
        let mut tree = Tree::new();
        let ids: Vec<NodeId> = (0..5).map(|_| tree.add(Node::root(Unit))).collect();
        tree.drop(ids[1]);
        tree.drop(ids[3]);
        tree.drop(ids[0]);
        assert_eq!(tree.real_size(), 2);

        // Most recently released first, then fresh slots.
        let reused: Vec<NodeId> = (0..4).map(|_| tree.add(Node::root(Unit))).collect();
        assert_eq!(reused, vec![ids[0], ids[3], ids[1], NodeId::new(5)]);
        assert_eq!(tree.size(), 6);
        assert_eq!(tree.real_size(), 6);

        tree.clear();
        assert_eq!(tree.add(Node::root(Unit)), NodeId::new(0));
    }

    #[test]
    fn test_many_drops() {
        // Alternating add/drop, as the engine does with duplicates, keeps the
        // arena bounded by the number of live nodes.
        let mut tree = Tree::new();
        let root = tree.add(Node::root(Unit));
        for i in 0..100_000 {
            let child = tree.add(Node::child(Unit, root, 0, ()));
            if i % 2 == 0 {
                tree.drop(child);
            }
        }
        assert_eq!(tree.real_size(), 50_001);
        assert_eq!(tree.size(), 50_001);
    }

    #[test]
    fn test_ancestors() {
        let mut tree = Tree::new();
        let a = tree.add(Node::root(Unit));
        let b = tree.add(Node::child(Unit, a, 0, ()));
        let c = tree.add(Node::child(Unit, b, 1, ()));
        assert_eq!(tree.ancestors(c).collect::<Vec<_>>(), vec![c, b, a]);
        assert_eq!(tree.ancestors(a).collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    #[should_panic(expected = "is not occupied")]
    fn test_index_dropped() {
        let mut tree = Tree::new();
        let a = tree.add(Node::root(Unit));
        tree.drop(a);
        let _ = tree[a].size();
    }
}
