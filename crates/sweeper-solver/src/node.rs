//! The tile-node graph the solver reasons over.
//!
//! Nodes live in an arena ([`NodeGraph`]) and refer to each other through
//! [`NodeId`]s. Ids are ordered, so sets of nodes iterate deterministically.

use std::collections::BTreeSet;

use num_rational::Rational64;
use num_traits::{One as _, Zero as _};
use sweeper_core::{Position, Tile};

use crate::SolverError;

/// Identifier of a node within its [`NodeGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index of this node.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The solver's knowledge about one tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    position: Position,
    value: Tile,
    adjacent: BTreeSet<NodeId>,
    mine_probability: Rational64,
    adjacent_mines_left: u8,
}

impl Node {
    fn new(position: Position) -> Self {
        Self {
            position,
            value: Tile::Covered,
            adjacent: BTreeSet::new(),
            mine_probability: Rational64::zero(),
            adjacent_mines_left: 0,
        }
    }

    /// Returns the tile position this node stands for.
    #[must_use]
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the last known tile value.
    #[must_use]
    #[inline]
    pub fn value(&self) -> Tile {
        self.value
    }

    /// Returns the ids of all neighbors.
    #[must_use]
    #[inline]
    pub fn adjacent(&self) -> &BTreeSet<NodeId> {
        &self.adjacent
    }

    /// Returns the current mine probability estimate.
    #[must_use]
    #[inline]
    pub fn mine_probability(&self) -> Rational64 {
        self.mine_probability
    }

    /// For a hint, returns its number minus the adjacent flags.
    ///
    /// Meaningless for nodes that are not hints.
    #[must_use]
    #[inline]
    pub fn adjacent_mines_left(&self) -> u8 {
        self.adjacent_mines_left
    }

    /// Returns `true` if the node is a revealed hint.
    #[must_use]
    #[inline]
    pub fn is_hint(&self) -> bool {
        self.value.is_hint()
    }

    /// Returns `true` if the node is still covered.
    #[must_use]
    #[inline]
    pub fn is_covered(&self) -> bool {
        self.value.is_covered()
    }
}

/// An arena of [`Node`]s and their adjacency.
///
/// Mutations keep derived node state consistent: flagging a node updates the
/// remaining mine count of every neighboring hint.
///
/// # Examples
///
/// ```
/// use sweeper_core::{Position, Tile};
/// use sweeper_solver::NodeGraph;
///
/// let mut graph = NodeGraph::new();
/// let hint = graph.add_node(Position::new(0, 0));
/// let covered = graph.add_node(Position::new(1, 0));
/// graph.add_adjacent(hint, covered);
///
/// graph.set_value(hint, Tile::Hint(1));
/// assert!(graph.is_hint_edge(hint));
/// assert!(graph.is_covered_edge(covered));
///
/// graph.set_value(covered, Tile::Flag);
/// assert_eq!(graph[hint].adjacent_mines_left(), 0);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeGraph {
    nodes: Vec<Node>,
}

impl NodeGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a covered, unlinked node for `position`.
    pub fn add_node(&mut self, position: Position) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(position));
        id
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over all node ids in ascending order.
    pub fn ids(&self) -> impl DoubleEndedIterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Links two nodes as neighbors.
    ///
    /// Linking is symmetric and idempotent. Returns `true` if the link is new.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`.
    pub fn add_adjacent(&mut self, a: NodeId, b: NodeId) -> bool {
        assert_ne!(a, b, "a node cannot be its own neighbor");
        let inserted = self.nodes[a.0].adjacent.insert(b);
        self.nodes[b.0].adjacent.insert(a);
        inserted
    }

    /// Records a new tile value for `id`.
    ///
    /// A flag forces the probability to 1 and takes one mine off every
    /// neighboring hint; removing a flag gives it back. A hint forces the
    /// probability to 0 and recounts its own remaining mines from the
    /// neighboring flags.
    pub fn set_value(&mut self, id: NodeId, value: Tile) {
        let old = self.nodes[id.0].value;
        if old == value {
            return;
        }
        self.nodes[id.0].value = value;

        if old.is_flag() {
            for n in self.neighbor_ids(id) {
                let node = &mut self.nodes[n.0];
                if node.is_hint() {
                    node.adjacent_mines_left = node.adjacent_mines_left.saturating_add(1);
                }
            }
        }

        match value {
            Tile::Flag => {
                self.nodes[id.0].mine_probability = Rational64::one();
                for n in self.neighbor_ids(id) {
                    let node = &mut self.nodes[n.0];
                    if node.is_hint() {
                        node.adjacent_mines_left = node.adjacent_mines_left.saturating_sub(1);
                    }
                }
            }
            Tile::Hint(hint) => {
                let flags = self.nodes[id.0]
                    .adjacent
                    .iter()
                    .filter(|n| self.nodes[n.0].value.is_flag())
                    .count();
                let node = &mut self.nodes[id.0];
                node.mine_probability = Rational64::zero();
                node.adjacent_mines_left = hint.saturating_sub(u8::try_from(flags).unwrap_or(u8::MAX));
            }
            Tile::Mine | Tile::Covered => {}
        }
    }

    /// Sets the mine probability estimate of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::ProbabilityOutOfRange`] unless `0 <= p <= 1`.
    pub fn set_mine_probability(&mut self, id: NodeId, p: Rational64) -> Result<(), SolverError> {
        if p < Rational64::zero() || p > Rational64::one() {
            return Err(SolverError::ProbabilityOutOfRange { probability: p });
        }
        self.nodes[id.0].mine_probability = p;
        Ok(())
    }

    /// Returns the covered neighbors of `id`.
    #[must_use]
    pub fn adjacent_covered(&self, id: NodeId) -> BTreeSet<NodeId> {
        self.neighbors_where(id, Node::is_covered).collect()
    }

    /// Returns the number of covered neighbors of `id`.
    #[must_use]
    pub fn adjacent_covered_count(&self, id: NodeId) -> usize {
        self.neighbors_where(id, Node::is_covered).count()
    }

    /// Returns the neighboring hints that still need at least one mine.
    #[must_use]
    pub fn adjacent_active_hints(&self, id: NodeId) -> BTreeSet<NodeId> {
        self.neighbors_where(id, |n| n.is_hint() && n.adjacent_mines_left > 0)
            .collect()
    }

    /// Returns `true` if `id` is covered and touches at least one hint.
    #[must_use]
    pub fn is_covered_edge(&self, id: NodeId) -> bool {
        self[id].is_covered() && self.neighbors_where(id, Node::is_hint).next().is_some()
    }

    /// Returns `true` if `id` is a hint and touches at least one covered node.
    #[must_use]
    pub fn is_hint_edge(&self, id: NodeId) -> bool {
        self[id].is_hint() && self.neighbors_where(id, Node::is_covered).next().is_some()
    }

    /// Returns `true` if `id` is covered and touches a hint whose mines are
    /// all flagged.
    #[must_use]
    pub fn is_covered_safe(&self, id: NodeId) -> bool {
        self[id].is_covered()
            && self
                .neighbors_where(id, |n| n.is_hint() && n.adjacent_mines_left == 0)
                .next()
                .is_some()
    }

    fn neighbor_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id.0].adjacent.iter().copied().collect()
    }

    fn neighbors_where<'a>(
        &'a self,
        id: NodeId,
        pred: impl Fn(&Node) -> bool + 'a,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.nodes[id.0]
            .adjacent
            .iter()
            .copied()
            .filter(move |n| pred(&self.nodes[n.0]))
    }
}

impl std::ops::Index<NodeId> for NodeGraph {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.0]
    }
}
