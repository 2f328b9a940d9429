//! Board and figure text I/O for the torus-life driver.
//!
//! The on-disk encoding is one line per grid row, `'1'` for a live cell and
//! `'0'` for a dead one, newline-terminated, row-major top-to-bottom. Reading
//! is deliberately permissive: a file or line shorter than the grid leaves
//! the unmentioned cells at whatever state they already held.

use torus_life_core::{CellCoord, CellUpdate};
use torus_life_system_classification::Pattern;
use torus_life_world::query::CellsView;

/// Character marking a live cell in board text files.
const ALIVE_MARK: char = '1';
/// Character marking a dead cell in board text files.
const DEAD_MARK: char = '0';

/// Serializes a cell snapshot into the flat board text encoding.
pub(crate) fn board_text(view: &CellsView<'_>) -> String {
    let columns = usize::try_from(view.columns()).unwrap_or(0);
    let rows = usize::try_from(view.rows()).unwrap_or(0);
    let mut text = String::with_capacity(rows * (columns + 1));
    for row in 0..view.rows() {
        for column in 0..view.columns() {
            let mark = if view.alive(CellCoord::new(column, row)) {
                ALIVE_MARK
            } else {
                DEAD_MARK
            };
            text.push(mark);
        }
        text.push('\n');
    }
    text
}

/// Parses board text into cell overwrites for a `columns` x `rows` grid.
///
/// Only characters that are actually present and in range produce updates,
/// so truncated files apply partially instead of failing.
pub(crate) fn board_updates(text: &str, columns: u32, rows: u32) -> Vec<CellUpdate> {
    let mut updates = Vec::new();
    for (row, line) in text.lines().enumerate() {
        let Ok(row) = u32::try_from(row) else {
            break;
        };
        if row >= rows {
            break;
        }
        for (column, mark) in line.chars().enumerate() {
            let Ok(column) = u32::try_from(column) else {
                break;
            };
            if column >= columns {
                break;
            }
            updates.push(CellUpdate::new(
                CellCoord::new(column, row),
                mark == ALIVE_MARK,
            ));
        }
    }
    updates
}

/// Expands a figure pattern into overwrites for its full rectangle anchored
/// at `origin`, overwriting dead figure cells as well.
///
/// Cells falling outside the board are skipped rather than wrapped, matching
/// the stamp-in-place behavior of figure loading.
pub(crate) fn figure_updates(
    pattern: &Pattern,
    origin: CellCoord,
    columns: u32,
    rows: u32,
) -> Vec<CellUpdate> {
    let mut updates = Vec::new();
    for row in 0..pattern.height() {
        for column in 0..pattern.width() {
            let Some(board_column) = origin.column().checked_add(column) else {
                continue;
            };
            let Some(board_row) = origin.row().checked_add(row) else {
                continue;
            };
            if board_column >= columns || board_row >= rows {
                continue;
            }
            updates.push(CellUpdate::new(
                CellCoord::new(board_column, board_row),
                pattern.alive_at(column, row),
            ));
        }
    }
    updates
}

/// Renders a cell snapshot for the terminal, `'*'` for live cells.
pub(crate) fn render(view: &CellsView<'_>) -> String {
    let columns = usize::try_from(view.columns()).unwrap_or(0);
    let rows = usize::try_from(view.rows()).unwrap_or(0);
    let mut text = String::with_capacity(rows * (columns + 1));
    for row in 0..view.rows() {
        for column in 0..view.columns() {
            let mark = if view.alive(CellCoord::new(column, row)) {
                '*'
            } else {
                ' '
            };
            text.push(mark);
        }
        text.push('\n');
    }
    text
}
