#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the torus-life engine.
//!
//! This crate defines the message surface that connects the driver adapter,
//! the authoritative world, and pure systems. The adapter submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems
//! to react to deterministically. Systems consume event streams, query
//! immutable snapshots, and respond with plain data.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the simulation boots.
pub const WELCOME_BANNER: &str = "Conway's Game of Life on a torus.";

/// Label assigned to live-cell groups that match no loaded template.
pub const UNKNOWN_FIGURE: &str = "Unknown";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the board with a freshly allocated, randomized grid.
    ConfigureBoard {
        /// Dimensions and density used to build the new board.
        config: BoardConfig,
        /// Seed driving the deterministic initial randomization.
        seed: u64,
    },
    /// Re-rolls the liveness of every cell without touching the topology.
    Randomize {
        /// Probability that each cell becomes alive, clamped to `[0, 1]`.
        density: f64,
        /// Seed driving the deterministic re-roll.
        seed: u64,
    },
    /// Overwrites the listed cells, leaving every other cell untouched.
    ///
    /// Board text files and figure stamps arrive through this command, so a
    /// short or truncated source simply produces fewer updates.
    PaintCells {
        /// Cell overwrites to apply in order.
        updates: Vec<CellUpdate>,
    },
    /// Advances the simulation by exactly one generation.
    Tick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a new board replaced the previous one.
    BoardConfigured {
        /// Number of cell columns in the new board.
        columns: u32,
        /// Number of cell rows in the new board.
        rows: u32,
    },
    /// Signals that cell states changed outside of the Life rule.
    ///
    /// Randomization, board-file loads, and figure stamps all count as a
    /// reload; observers tracking convergence must start over.
    BoardReloaded,
    /// Confirms that the simulation advanced a generation.
    GenerationAdvanced {
        /// Generation index after the advance completed.
        generation: u64,
    },
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Single-cell liveness overwrite applied by [`Command::PaintCells`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellUpdate {
    /// Cell whose state is replaced.
    pub cell: CellCoord,
    /// Liveness written into the cell.
    pub alive: bool,
}

impl CellUpdate {
    /// Creates an overwrite for the provided cell.
    #[must_use]
    pub const fn new(cell: CellCoord, alive: bool) -> Self {
        Self { cell, alive }
    }
}

/// Board dimensions and initial density consumed by the world constructor.
///
/// The serde names mirror the `Property.json` files produced by the original
/// tooling, hence the PascalCase rename.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoardConfig {
    /// Total board width in raw units.
    pub board_width: u32,
    /// Total board height in raw units.
    pub board_height: u32,
    /// Edge length of a single cell in raw units.
    pub board_cell_size: u32,
    /// Probability that a cell starts alive, expected in `[0, 1]`.
    pub life_density: f64,
}

impl BoardConfig {
    /// Creates a configuration from explicit dimensions and density.
    #[must_use]
    pub const fn new(
        board_width: u32,
        board_height: u32,
        board_cell_size: u32,
        life_density: f64,
    ) -> Self {
        Self {
            board_width,
            board_height,
            board_cell_size,
            life_density,
        }
    }

    /// Number of cell columns after truncating division by the cell size.
    ///
    /// A width that does not divide evenly is truncated rather than
    /// rejected; a zero cell size yields zero columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        if self.board_cell_size == 0 {
            0
        } else {
            self.board_width / self.board_cell_size
        }
    }

    /// Number of cell rows after truncating division by the cell size.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        if self.board_cell_size == 0 {
            0
        } else {
            self.board_height / self.board_cell_size
        }
    }

    /// Density clamped into `[0, 1]` for use as a probability.
    #[must_use]
    pub fn clamped_density(&self) -> f64 {
        self.life_density.clamp(0.0, 1.0)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new(40, 20, 1, 0.5)
    }
}

/// Aggregate population counts produced by component extraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Census {
    /// Total number of live cells on the board.
    pub live_cells: usize,
    /// Number of connected groups containing more than one cell.
    pub combinations: usize,
}

impl Census {
    /// Creates a census from explicit counts.
    #[must_use]
    pub const fn new(live_cells: usize, combinations: usize) -> Self {
        Self {
            live_cells,
            combinations,
        }
    }
}
