use std::{
    collections::BTreeSet,
    fmt::{self, Display},
};

use sweeper_core::{Minefield, Position, Tile};

use crate::{NodeGraph, NodeId, SolverError};

/// The solver's view of a whole board.
///
/// Owns one node per tile, linked to its eight neighbors. Node ids follow the
/// column-major order of [`Minefield::positions`], so `id = x * height + y`
/// and every set of nodes returned here iterates in that order.
///
/// # Examples
///
/// ```
/// use sweeper_core::Minefield;
/// use sweeper_solver::SolverState;
///
/// let field: Minefield = "
///     01f
///     12#
///     ####
/// "
/// .parse()?;
/// let state = SolverState::new(&field)?;
///
/// assert_eq!(state.covered().len(), 4);
/// assert_eq!(state.hint_edge().len(), 3);
/// assert_eq!(state.to_field(), field);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverState {
    width: usize,
    height: usize,
    graph: NodeGraph,
    selected: Option<NodeId>,
}

impl SolverState {
    /// Builds the node graph for `field` and loads its tiles.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::EmptyGrid`] if `field` has zero width or height.
    pub fn new(field: &Minefield) -> Result<Self, SolverError> {
        let (width, height) = (field.width(), field.height());
        if width == 0 || height == 0 {
            return Err(SolverError::EmptyGrid { width, height });
        }

        let id = |x: usize, y: usize| NodeId::from_index(x * height + y);
        let mut graph = NodeGraph::new();
        for pos in field.positions() {
            graph.add_node(pos);
        }
        for x in 0..width {
            for y in 0..height {
                let right = x + 1 < width;
                let down = y + 1 < height;
                if right {
                    graph.add_adjacent(id(x, y), id(x + 1, y));
                }
                if down {
                    graph.add_adjacent(id(x, y), id(x, y + 1));
                }
                if right && down {
                    graph.add_adjacent(id(x, y), id(x + 1, y + 1));
                }
                if x > 0 && down {
                    graph.add_adjacent(id(x, y), id(x - 1, y + 1));
                }
            }
        }
        for pos in field.positions() {
            graph.set_value(id(pos.x(), pos.y()), field[pos]);
        }

        Ok(Self {
            width,
            height,
            graph,
            selected: None,
        })
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the node graph.
    #[must_use]
    pub fn graph(&self) -> &NodeGraph {
        &self.graph
    }

    /// Returns the node graph for updating probability estimates.
    pub fn graph_mut(&mut self) -> &mut NodeGraph {
        &mut self.graph
    }

    /// Returns the id of the node at `pos`, if it is on the board.
    #[must_use]
    pub fn node_at(&self, pos: Position) -> Option<NodeId> {
        (pos.x() < self.width && pos.y() < self.height).then(|| self.id(pos.x(), pos.y()))
    }

    /// Returns the position of node `id`.
    #[must_use]
    pub fn position(&self, id: NodeId) -> Position {
        self.graph[id].position()
    }

    /// Returns the currently selected node, if any.
    #[must_use]
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Marks `id` as the node being acted on.
    pub fn set_selected(&mut self, id: NodeId) {
        self.selected = Some(id);
    }

    /// Reloads `id` from `field`.
    ///
    /// A zero hint uncovers its whole region in the game, so every covered
    /// neighbor of a zero is reloaded as well, until the region's border of
    /// numbered tiles is reached.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::OutOfBounds`] if `field` is smaller than this
    /// state.
    pub fn update(&mut self, id: NodeId, field: &Minefield) -> Result<(), SolverError> {
        let start = id;
        let mut queue = vec![start];
        while let Some(id) = queue.pop() {
            if id != start && !self.graph[id].is_covered() {
                continue;
            }
            let value = field.tile(self.position(id))?;
            self.graph.set_value(id, value);
            if value == Tile::Hint(0) {
                queue.extend(self.graph.adjacent_covered(id));
            }
        }
        Ok(())
    }

    /// Returns every covered node.
    #[must_use]
    pub fn covered(&self) -> BTreeSet<NodeId> {
        self.graph
            .ids()
            .filter(|&id| self.graph[id].is_covered())
            .collect()
    }

    /// Returns every hint with at least one covered neighbor.
    #[must_use]
    pub fn hint_edge(&self) -> BTreeSet<NodeId> {
        self.graph
            .ids()
            .filter(|&id| self.graph.is_hint_edge(id))
            .collect()
    }

    /// Returns every covered node with at least one hint neighbor.
    #[must_use]
    pub fn covered_edge(&self) -> BTreeSet<NodeId> {
        self.graph
            .ids()
            .filter(|&id| self.graph.is_covered_edge(id))
            .collect()
    }

    /// Returns the tile values currently known to the solver.
    #[must_use]
    pub fn to_field(&self) -> Minefield {
        let mut field = Minefield::new(self.width, self.height);
        for id in self.graph.ids() {
            let node = &self.graph[id];
            field[node.position()] = node.value();
        }
        field
    }

    fn id(&self, x: usize, y: usize) -> NodeId {
        debug_assert!(x < self.width && y < self.height);
        NodeId::from_index(x * self.height + y)
    }
}

impl Display for SolverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_field())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos_set(state: &SolverState, ids: &BTreeSet<NodeId>) -> Vec<Position> {
        ids.iter().map(|&id| state.position(id)).collect()
    }

    fn p(x: usize, y: usize) -> Position {
        Position::new(x, y)
    }

    /// Columns `x0 = [0, 1, F]`, `x1 = [2, 3, C]`, the rest covered.
    fn revealed_field() -> Minefield {
        "
        02##
        13##
        f###
        "
        .parse()
        .unwrap()
    }

    #[test]
    fn test_rejects_empty_grid() {
        assert_eq!(
            SolverState::new(&Minefield::new(0, 3)),
            Err(SolverError::EmptyGrid {
                width: 0,
                height: 3
            })
        );
        assert_eq!(
            SolverState::new(&Minefield::new(4, 0)),
            Err(SolverError::EmptyGrid {
                width: 4,
                height: 0
            })
        );
    }

    #[test]
    fn test_all_covered() {
        let state = SolverState::new(&Minefield::new(4, 3)).unwrap();
        assert_eq!(state.covered().len(), 12);
        assert!(state.covered_edge().is_empty());
        assert!(state.hint_edge().is_empty());
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_adjacency() {
        let state = SolverState::new(&Minefield::new(4, 3)).unwrap();
        let graph = state.graph();
        let center = state.node_at(p(1, 1)).unwrap();
        assert_eq!(graph[center].adjacent().len(), 8);

        let corner = state.node_at(p(3, 0)).unwrap();
        assert_eq!(
            pos_set(&state, graph[corner].adjacent()),
            [p(2, 0), p(2, 1), p(3, 1)]
        );
        assert_eq!(state.node_at(p(4, 0)), None);
    }

    #[test]
    fn test_ids_are_column_major() {
        let state = SolverState::new(&Minefield::new(4, 3)).unwrap();
        assert_eq!(state.node_at(p(0, 0)).map(NodeId::index), Some(0));
        assert_eq!(state.node_at(p(0, 2)).map(NodeId::index), Some(2));
        assert_eq!(state.node_at(p(1, 0)).map(NodeId::index), Some(3));
        assert_eq!(state.node_at(p(3, 2)).map(NodeId::index), Some(11));
    }

    #[test]
    fn test_initial_values() {
        let state = SolverState::new(&revealed_field()).unwrap();
        let graph = state.graph();
        let mines_left = |x, y| graph[state.node_at(p(x, y)).unwrap()].adjacent_mines_left();
        assert_eq!(mines_left(0, 1), 0);
        assert_eq!(mines_left(1, 0), 2);
        assert_eq!(mines_left(1, 1), 2);
        assert_eq!(state.to_field(), revealed_field());
    }

    #[test]
    fn test_update_cascades_zero_region() {
        let mut state = SolverState::new(&Minefield::new(4, 3)).unwrap();
        let target = revealed_field();

        let origin = state.node_at(p(0, 0)).unwrap();
        state.update(origin, &target).unwrap();

        assert_eq!(
            pos_set(&state, &state.covered()),
            [
                p(0, 2),
                p(1, 2),
                p(2, 0),
                p(2, 1),
                p(2, 2),
                p(3, 0),
                p(3, 1),
                p(3, 2),
            ]
        );
        assert_eq!(
            pos_set(&state, &state.covered_edge()),
            [p(0, 2), p(1, 2), p(2, 0), p(2, 1), p(2, 2)]
        );
        assert_eq!(
            pos_set(&state, &state.hint_edge()),
            [p(0, 1), p(1, 0), p(1, 1)]
        );

        let flag = state.node_at(p(0, 2)).unwrap();
        state.update(flag, &target).unwrap();
        let graph = state.graph();
        assert_eq!(graph[state.node_at(p(0, 1)).unwrap()].adjacent_mines_left(), 0);
        assert_eq!(graph[state.node_at(p(1, 1)).unwrap()].adjacent_mines_left(), 2);
    }

    #[test]
    fn test_update_out_of_bounds() {
        let mut state = SolverState::new(&Minefield::new(4, 3)).unwrap();
        let corner = state.node_at(p(3, 2)).unwrap();
        assert!(matches!(
            state.update(corner, &Minefield::new(2, 2)),
            Err(SolverError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_display_dumps_tiles() {
        let mut state = SolverState::new(&revealed_field()).unwrap();
        state.set_selected(state.node_at(p(1, 1)).unwrap());
        assert_eq!(state.to_string(), "02##\n13##\nf###\n");
        assert_eq!(state.selected(), state.node_at(p(1, 1)));
    }
}
