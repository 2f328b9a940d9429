#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that partitions live cells into connected components.
//!
//! A component (a "combination") is a maximal group of live cells connected
//! under toroidal 8-adjacency. The traversal uses an explicit breadth-first
//! frontier instead of recursion so that a region spanning the whole board
//! cannot exhaust the call stack, and it reuses scratch buffers across
//! generations to avoid repeated allocation.

use std::collections::VecDeque;

use torus_life_core::{CellCoord, Census};
use torus_life_world::query::CellsView;

/// Maximal 8-connected group of live cells captured from one snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    cells: Vec<CellCoord>,
}

impl Component {
    /// Cells belonging to the component, in discovery order.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Number of live cells in the component.
    #[must_use]
    pub fn size(&self) -> usize {
        self.cells.len()
    }
}

/// Pure extraction system with reusable traversal scratch buffers.
#[derive(Debug, Default)]
pub struct Extraction {
    visited: Vec<bool>,
    frontier: VecDeque<CellCoord>,
}

impl Extraction {
    /// Creates a new extraction system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts live cells and multi-cell components in one sweep.
    ///
    /// Singleton live cells contribute to `live_cells` but never to
    /// `combinations`.
    #[must_use]
    pub fn census(&mut self, view: &CellsView<'_>) -> Census {
        let mut census = Census::default();
        self.for_each_component(view, |cells| {
            census.live_cells += cells.len();
            if cells.len() > 1 {
                census.combinations += 1;
            }
        });
        census
    }

    /// Collects every component with its full coordinate list.
    #[must_use]
    pub fn components(&mut self, view: &CellsView<'_>) -> Vec<Component> {
        let mut components = Vec::new();
        self.for_each_component(view, |cells| {
            components.push(Component {
                cells: cells.to_vec(),
            });
        });
        components
    }

    /// Flood-fills every unvisited live cell, handing each finished
    /// component's cells to the visitor. Every live cell is assigned to
    /// exactly one component and enqueued at most once.
    fn for_each_component<F>(&mut self, view: &CellsView<'_>, mut visit: F)
    where
        F: FnMut(&[CellCoord]),
    {
        let columns = view.columns();
        let rows = view.rows();
        let capacity = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(0);
        self.visited.clear();
        self.visited.resize(capacity, false);
        self.frontier.clear();

        let mut current: Vec<CellCoord> = Vec::new();
        for row in 0..rows {
            for column in 0..columns {
                let seed = CellCoord::new(column, row);
                if !view.alive(seed) || self.is_visited(seed, columns) {
                    continue;
                }

                current.clear();
                self.mark_visited(seed, columns);
                self.frontier.push_back(seed);
                while let Some(cell) = self.frontier.pop_front() {
                    current.push(cell);
                    for neighbor in view.wrapped_neighbors(cell) {
                        if view.alive(neighbor) && !self.is_visited(neighbor, columns) {
                            self.mark_visited(neighbor, columns);
                            self.frontier.push_back(neighbor);
                        }
                    }
                }
                visit(&current);
            }
        }
    }

    fn is_visited(&self, cell: CellCoord, columns: u32) -> bool {
        Self::visited_index(cell, columns)
            .map_or(true, |index| self.visited.get(index).copied().unwrap_or(true))
    }

    fn mark_visited(&mut self, cell: CellCoord, columns: u32) {
        if let Some(index) = Self::visited_index(cell, columns) {
            if let Some(slot) = self.visited.get_mut(index) {
                *slot = true;
            }
        }
    }

    fn visited_index(cell: CellCoord, columns: u32) -> Option<usize> {
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(columns).ok()?;
        Some(row * width + column)
    }
}

#[cfg(test)]
mod tests {
    use super::Extraction;
    use torus_life_core::{BoardConfig, CellCoord, CellUpdate, Command};
    use torus_life_world::{apply, query, World};

    fn board_with(cells: &[(u32, u32)], width: u32, height: u32) -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigureBoard {
                config: BoardConfig::new(width, height, 1, 0.0),
                seed: 0,
            },
            &mut events,
        );
        let updates = cells
            .iter()
            .map(|&(column, row)| CellUpdate::new(CellCoord::new(column, row), true))
            .collect();
        apply(&mut world, Command::PaintCells { updates }, &mut events);
        world
    }

    #[test]
    fn census_counts_singletons_toward_cells_only() {
        let world = board_with(&[(0, 0), (0, 1), (1, 0), (1, 1), (4, 4)], 6, 6);
        let mut extraction = Extraction::new();
        let census = extraction.census(&query::cells_view(&world));
        assert_eq!(census.live_cells, 5);
        assert_eq!(census.combinations, 1);
    }

    #[test]
    fn census_separates_diagonal_groups_that_do_not_touch() {
        let world = board_with(&[(0, 0), (1, 1), (3, 3), (3, 4)], 8, 8);
        let mut extraction = Extraction::new();
        let census = extraction.census(&query::cells_view(&world));
        // (0,0) and (1,1) touch diagonally and form one combination.
        assert_eq!(census.live_cells, 4);
        assert_eq!(census.combinations, 2);
    }

    #[test]
    fn components_wrap_across_board_edges() {
        let world = board_with(&[(0, 2), (4, 2)], 5, 5);
        let mut extraction = Extraction::new();
        let components = extraction.components(&query::cells_view(&world));
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].size(), 2);
    }

    #[test]
    fn component_sizes_sum_to_live_cell_count() {
        let world = board_with(
            &[(0, 0), (0, 1), (1, 0), (3, 3), (3, 4), (3, 5), (5, 0), (0, 5)],
            7, 7,
        );
        let mut extraction = Extraction::new();
        let view = query::cells_view(&world);
        let components = extraction.components(&view);
        let total: usize = components.iter().map(super::Component::size).sum();
        assert_eq!(total, view.live_cell_count());
    }

    #[test]
    fn every_live_cell_belongs_to_exactly_one_component() {
        let world = board_with(&[(1, 1), (2, 2), (3, 3), (5, 1), (1, 5)], 7, 7);
        let mut extraction = Extraction::new();
        let components = extraction.components(&query::cells_view(&world));
        let mut seen = std::collections::BTreeSet::new();
        for component in &components {
            for cell in component.cells() {
                assert!(seen.insert(*cell), "cell {cell:?} assigned twice");
            }
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn empty_board_yields_no_components() {
        let world = board_with(&[], 4, 4);
        let mut extraction = Extraction::new();
        assert!(extraction.components(&query::cells_view(&world)).is_empty());
        let census = extraction.census(&query::cells_view(&world));
        assert_eq!(census.live_cells, 0);
        assert_eq!(census.combinations, 0);
    }

    #[test]
    fn scratch_buffers_reset_between_snapshots() {
        let mut extraction = Extraction::new();
        let first = board_with(&[(0, 0), (1, 0)], 4, 4);
        let second = board_with(&[(2, 2), (3, 2)], 4, 4);
        assert_eq!(extraction.census(&query::cells_view(&first)).live_cells, 2);
        let census = extraction.census(&query::cells_view(&second));
        assert_eq!(census.live_cells, 2);
        assert_eq!(census.combinations, 1);
    }
}
