#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state management for torus-life.
//!
//! The world owns the toroidal cell grid and is the only place the Life
//! update rule executes. Mutations arrive exclusively through [`apply`] and
//! every observable change is mirrored by an [`Event`], so systems can stay
//! pure and deterministic.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use torus_life_core::{BoardConfig, CellCoord, Command, Event, WELCOME_BANNER};

/// Offsets spanning the full Moore neighborhood of a cell.
///
/// Enumerated as directions rather than deduplicated cells so that boards
/// thinner than three cells in a dimension count the same neighbor once per
/// wrap direction, matching the classic fixed-eight-references topology.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Fixed-size toroidal grid of cell states with a double-buffered update.
#[derive(Clone, Debug)]
pub struct Board {
    columns: u32,
    rows: u32,
    cell_size: u32,
    alive: Vec<bool>,
    alive_next: Vec<bool>,
}

impl Board {
    /// Allocates a dead board sized by truncating division of the raw
    /// dimensions by the cell size.
    #[must_use]
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        let columns = if cell_size == 0 { 0 } else { width / cell_size };
        let rows = if cell_size == 0 { 0 } else { height / cell_size };
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cell_size,
            alive: vec![false; capacity],
            alive_next: vec![false; capacity],
        }
    }

    /// Number of cell columns in the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows in the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Edge length of a single cell in raw units.
    #[must_use]
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Reports whether the provided cell is currently alive.
    ///
    /// Out-of-range coordinates read as dead.
    #[must_use]
    pub fn is_alive(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .map_or(false, |index| self.alive.get(index).copied().unwrap_or(false))
    }

    /// Overwrites the liveness of a single cell, ignoring out-of-range
    /// coordinates.
    pub fn set_alive(&mut self, cell: CellCoord, alive: bool) {
        if let Some(index) = self.index(cell) {
            if let Some(state) = self.alive.get_mut(index) {
                *state = alive;
            }
        }
    }

    /// Independently re-rolls every cell's liveness with the provided
    /// probability, leaving the grid topology untouched.
    pub fn randomize(&mut self, rng: &mut ChaCha8Rng, density: f64) {
        let density = density.clamp(0.0, 1.0);
        for state in self.alive.iter_mut() {
            *state = rng.gen_bool(density);
        }
    }

    /// Advances the board one generation with the standard Life rule.
    ///
    /// Phase one computes every cell's next state from the current buffer;
    /// phase two commits the whole next buffer at once. Neighbor counts must
    /// never observe a partially updated generation.
    pub fn advance(&mut self) {
        for row in 0..self.rows {
            for column in 0..self.columns {
                let cell = CellCoord::new(column, row);
                let live_neighbors = self.live_neighbor_count(cell);
                let next = if self.is_alive(cell) {
                    live_neighbors == 2 || live_neighbors == 3
                } else {
                    live_neighbors == 3
                };
                if let Some(index) = self.index(cell) {
                    if let Some(state) = self.alive_next.get_mut(index) {
                        *state = next;
                    }
                }
            }
        }
        std::mem::swap(&mut self.alive, &mut self.alive_next);
    }

    /// Enumerates the eight toroidal Moore neighbors of a cell.
    #[must_use]
    pub fn wrapped_neighbors(&self, cell: CellCoord) -> [CellCoord; 8] {
        let mut neighbors = [cell; 8];
        for (slot, offset) in neighbors.iter_mut().zip(NEIGHBOR_OFFSETS) {
            *slot = self.wrap(cell, offset);
        }
        neighbors
    }

    fn live_neighbor_count(&self, cell: CellCoord) -> u32 {
        let mut count = 0;
        for offset in NEIGHBOR_OFFSETS {
            if self.is_alive(self.wrap(cell, offset)) {
                count += 1;
            }
        }
        count
    }

    fn wrap(&self, cell: CellCoord, offset: (i64, i64)) -> CellCoord {
        let columns = i64::from(self.columns.max(1));
        let rows = i64::from(self.rows.max(1));
        let column = (i64::from(cell.column()) + offset.0).rem_euclid(columns);
        let row = (i64::from(cell.row()) + offset.1).rem_euclid(rows);
        CellCoord::new(column as u32, row as u32)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Represents the authoritative torus-life world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    board: Board,
    generation: u64,
}

impl World {
    /// Creates a new world seeded with the default board configuration.
    #[must_use]
    pub fn new() -> Self {
        let config = BoardConfig::default();
        Self {
            banner: WELCOME_BANNER,
            board: Board::new(
                config.board_width,
                config.board_height,
                config.board_cell_size,
            ),
            generation: 0,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureBoard { config, seed } => {
            world.board = Board::new(
                config.board_width,
                config.board_height,
                config.board_cell_size,
            );
            world.generation = 0;
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            world.board.randomize(&mut rng, config.clamped_density());
            out_events.push(Event::BoardConfigured {
                columns: world.board.columns(),
                rows: world.board.rows(),
            });
            out_events.push(Event::BoardReloaded);
        }
        Command::Randomize { density, seed } => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            world.board.randomize(&mut rng, density);
            out_events.push(Event::BoardReloaded);
        }
        Command::PaintCells { updates } => {
            for update in updates {
                world.board.set_alive(update.cell, update.alive);
            }
            out_events.push(Event::BoardReloaded);
        }
        Command::Tick => {
            world.board.advance();
            world.generation = world.generation.saturating_add(1);
            out_events.push(Event::GenerationAdvanced {
                generation: world.generation,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use torus_life_core::CellCoord;

    /// Retrieves the welcome banner the adapter may display on boot.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Number of generations advanced since the board was configured.
    #[must_use]
    pub fn generation(world: &World) -> u64 {
        world.generation
    }

    /// Cell columns and rows of the current board.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        (world.board.columns(), world.board.rows())
    }

    /// Edge length of one cell in raw units.
    #[must_use]
    pub fn cell_size(world: &World) -> u32 {
        world.board.cell_size()
    }

    /// Captures a read-only view of the current generation's cells.
    #[must_use]
    pub fn cells_view(world: &World) -> CellsView<'_> {
        CellsView {
            board: &world.board,
        }
    }

    /// Read-only snapshot of one generation's cell states.
    #[derive(Clone, Copy, Debug)]
    pub struct CellsView<'a> {
        board: &'a super::Board,
    }

    impl<'a> CellsView<'a> {
        /// Number of cell columns in the viewed board.
        #[must_use]
        pub fn columns(&self) -> u32 {
            self.board.columns()
        }

        /// Number of cell rows in the viewed board.
        #[must_use]
        pub fn rows(&self) -> u32 {
            self.board.rows()
        }

        /// Reports whether the provided cell is alive in this snapshot.
        #[must_use]
        pub fn alive(&self, cell: CellCoord) -> bool {
            self.board.is_alive(cell)
        }

        /// Total number of live cells in this snapshot.
        #[must_use]
        pub fn live_cell_count(&self) -> usize {
            let mut count = 0;
            for row in 0..self.rows() {
                for column in 0..self.columns() {
                    if self.alive(CellCoord::new(column, row)) {
                        count += 1;
                    }
                }
            }
            count
        }

        /// Enumerates the eight toroidal Moore neighbors of a cell.
        #[must_use]
        pub fn wrapped_neighbors(&self, cell: CellCoord) -> [CellCoord; 8] {
            self.board.wrapped_neighbors(cell)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{apply, query, Board, World};
    use std::collections::BTreeSet;
    use torus_life_core::{BoardConfig, CellCoord, CellUpdate, Command, Event};

    fn paint(world: &mut World, cells: &[(u32, u32)]) {
        let updates = cells
            .iter()
            .map(|&(column, row)| CellUpdate::new(CellCoord::new(column, row), true))
            .collect();
        let mut events = Vec::new();
        apply(world, Command::PaintCells { updates }, &mut events);
        assert_eq!(events, vec![Event::BoardReloaded]);
    }

    fn configure(world: &mut World, width: u32, height: u32) {
        let mut events = Vec::new();
        apply(
            world,
            Command::ConfigureBoard {
                config: BoardConfig::new(width, height, 1, 0.0),
                seed: 0,
            },
            &mut events,
        );
    }

    fn tick(world: &mut World) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::Tick, &mut events);
        events
    }

    #[test]
    fn board_divides_dimensions_by_cell_size() {
        let board = Board::new(100, 100, 10);
        assert_eq!(board.columns(), 10);
        assert_eq!(board.rows(), 10);
    }

    #[test]
    fn neighbors_are_distinct_on_boards_of_at_least_three() {
        let board = Board::new(3, 3, 1);
        for row in 0..3 {
            for column in 0..3 {
                let cell = CellCoord::new(column, row);
                let unique: BTreeSet<_> = board.wrapped_neighbors(cell).into_iter().collect();
                assert_eq!(unique.len(), 8, "cell ({column}, {row})");
                assert!(!unique.contains(&cell));
            }
        }
    }

    #[test]
    fn corner_neighbors_wrap_toroidally() {
        let board = Board::new(5, 4, 1);
        let neighbors: BTreeSet<_> = board
            .wrapped_neighbors(CellCoord::new(0, 0))
            .into_iter()
            .collect();
        assert!(neighbors.contains(&CellCoord::new(4, 3)));
        assert!(neighbors.contains(&CellCoord::new(0, 3)));
        assert!(neighbors.contains(&CellCoord::new(4, 0)));
        assert!(neighbors.contains(&CellCoord::new(1, 1)));
    }

    #[test]
    fn tiny_boards_repeat_neighbors_through_multiple_wraps() {
        let board = Board::new(2, 2, 1);
        let neighbors = board.wrapped_neighbors(CellCoord::new(0, 0));
        let unique: BTreeSet<_> = neighbors.into_iter().collect();
        assert!(unique.len() < 8);
    }

    #[test]
    fn live_cell_with_two_or_three_neighbors_survives() {
        let mut world = World::new();
        configure(&mut world, 6, 6);
        paint(&mut world, &[(1, 1), (2, 1), (3, 1)]);
        let _ = tick(&mut world);
        assert!(query::cells_view(&world).alive(CellCoord::new(2, 1)));
    }

    #[test]
    fn dead_cell_with_exactly_three_neighbors_is_born() {
        let mut world = World::new();
        configure(&mut world, 6, 6);
        paint(&mut world, &[(1, 1), (2, 1), (3, 1)]);
        let _ = tick(&mut world);
        let view = query::cells_view(&world);
        assert!(view.alive(CellCoord::new(2, 0)));
        assert!(view.alive(CellCoord::new(2, 2)));
    }

    #[test]
    fn underpopulated_and_overcrowded_cells_die() {
        let mut world = World::new();
        configure(&mut world, 8, 8);
        // Lone cell starves; the centre of a filled 3x3 block suffocates.
        paint(
            &mut world,
            &[(6, 6), (0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1), (0, 2), (1, 2), (2, 2)],
        );
        let _ = tick(&mut world);
        let view = query::cells_view(&world);
        assert!(!view.alive(CellCoord::new(6, 6)));
        assert!(!view.alive(CellCoord::new(1, 1)));
    }

    #[test]
    fn isolated_block_is_a_still_life() {
        let mut world = World::new();
        configure(&mut world, 8, 8);
        let block = [(3, 3), (4, 3), (3, 4), (4, 4)];
        paint(&mut world, &block);
        let _ = tick(&mut world);
        let view = query::cells_view(&world);
        for (column, row) in block {
            assert!(view.alive(CellCoord::new(column, row)));
        }
        assert_eq!(view.live_cell_count(), 4);
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let mut world = World::new();
        configure(&mut world, 7, 7);
        paint(&mut world, &[(2, 3), (3, 3), (4, 3)]);
        let _ = tick(&mut world);
        let view = query::cells_view(&world);
        assert!(view.alive(CellCoord::new(3, 2)));
        assert!(view.alive(CellCoord::new(3, 3)));
        assert!(view.alive(CellCoord::new(3, 4)));
        assert_eq!(view.live_cell_count(), 3);

        let _ = tick(&mut world);
        let view = query::cells_view(&world);
        assert!(view.alive(CellCoord::new(2, 3)));
        assert!(view.alive(CellCoord::new(3, 3)));
        assert!(view.alive(CellCoord::new(4, 3)));
        assert_eq!(view.live_cell_count(), 3);
    }

    #[test]
    fn randomize_with_full_density_fills_the_board() {
        let mut world = World::new();
        configure(&mut world, 5, 5);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Randomize {
                density: 1.0,
                seed: 9,
            },
            &mut events,
        );
        assert_eq!(events, vec![Event::BoardReloaded]);
        assert_eq!(query::cells_view(&world).live_cell_count(), 25);
    }

    #[test]
    fn randomize_is_deterministic_per_seed() {
        let mut first = World::new();
        let mut second = World::new();
        for world in [&mut first, &mut second] {
            configure(world, 10, 10);
            let mut events = Vec::new();
            apply(
                world,
                Command::Randomize {
                    density: 0.5,
                    seed: 42,
                },
                &mut events,
            );
        }
        let left = query::cells_view(&first);
        let right = query::cells_view(&second);
        for row in 0..10 {
            for column in 0..10 {
                let cell = CellCoord::new(column, row);
                assert_eq!(left.alive(cell), right.alive(cell));
            }
        }
    }

    #[test]
    fn ticks_count_generations_and_configure_resets_them() {
        let mut world = World::new();
        configure(&mut world, 4, 4);
        assert_eq!(query::generation(&world), 0);
        let events = tick(&mut world);
        assert_eq!(events, vec![Event::GenerationAdvanced { generation: 1 }]);
        let _ = tick(&mut world);
        assert_eq!(query::generation(&world), 2);
        configure(&mut world, 4, 4);
        assert_eq!(query::generation(&world), 0);
    }

    #[test]
    fn paint_ignores_out_of_range_cells() {
        let mut world = World::new();
        configure(&mut world, 3, 3);
        paint(&mut world, &[(10, 10)]);
        assert_eq!(query::cells_view(&world).live_cell_count(), 0);
    }
}
