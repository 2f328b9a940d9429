#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that names live-cell groups by exact shape match.
//!
//! The classifier normalizes each component into a bounding-box-local
//! boolean matrix and compares it against a fixed library of figure
//! templates. Matching is exact: identical width, height, and cell pattern.
//! Rotations and reflections of a template deliberately classify as
//! [`UNKNOWN_FIGURE`].

use std::{collections::BTreeMap, fs, path::Path};

use torus_life_core::{CellCoord, UNKNOWN_FIGURE};
use torus_life_system_extraction::{Component, Extraction};
use torus_life_world::query::CellsView;

/// Figure names recognized by the library, paired with their definition
/// files. The order is fixed so classification ties resolve deterministically.
const FIGURE_FILES: [(&str, &str); 5] = [
    ("Block", "block.txt"),
    ("Blinker", "blinker.txt"),
    ("Hive", "hive.txt"),
    ("Glider", "glider.txt"),
    ("Boat", "boat.txt"),
];

/// Character marking a live cell in figure and board text files.
const ALIVE_MARK: char = '1';

/// Bounding-box-local boolean matrix describing one shape.
///
/// Row-major, with the invariant that patterns built from components carry a
/// tight bounding box: at least one live cell in row 0 and in column 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl Pattern {
    /// Parses a pattern from figure text: one line per row, `'1'` marking a
    /// live cell and any other character a dead one.
    ///
    /// Blank lines are trimmed from both ends and the width is taken from
    /// the longest remaining line, padding shorter lines with dead cells.
    /// Returns `None` when no non-blank lines remain.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut trimmed: Vec<&str> = text
            .lines()
            .skip_while(|line| line.trim().is_empty())
            .collect();
        while trimmed.last().map_or(false, |line| line.trim().is_empty()) {
            let _ = trimmed.pop();
        }
        if trimmed.is_empty() {
            return None;
        }

        let width = trimmed.iter().map(|line| line.chars().count()).max()?;
        let height = trimmed.len();
        let mut cells = vec![false; width * height];
        for (row, line) in trimmed.iter().enumerate() {
            for (column, mark) in line.chars().enumerate() {
                if mark == ALIVE_MARK {
                    cells[row * width + column] = true;
                }
            }
        }

        Some(Self {
            width: u32::try_from(width).ok()?,
            height: u32::try_from(height).ok()?,
            cells,
        })
    }

    /// Normalizes a component into its bounding-box-local pattern by
    /// translating every cell by the negated minimum column and row.
    #[must_use]
    pub fn from_component(component: &Component) -> Option<Self> {
        let min_column = component.cells().iter().map(CellCoord::column).min()?;
        let min_row = component.cells().iter().map(CellCoord::row).min()?;
        let max_column = component.cells().iter().map(CellCoord::column).max()?;
        let max_row = component.cells().iter().map(CellCoord::row).max()?;

        let width = max_column - min_column + 1;
        let height = max_row - min_row + 1;
        let capacity = usize::try_from(u64::from(width) * u64::from(height)).ok()?;
        let mut cells = vec![false; capacity];
        for cell in component.cells() {
            let column = usize::try_from(cell.column() - min_column).ok()?;
            let row = usize::try_from(cell.row() - min_row).ok()?;
            let stride = usize::try_from(width).ok()?;
            cells[row * stride + column] = true;
        }

        Some(Self {
            width,
            height,
            cells,
        })
    }

    /// Width of the pattern's bounding box in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the pattern's bounding box in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the cell at the provided pattern-local coordinates
    /// is alive. Out-of-range coordinates read as dead.
    #[must_use]
    pub fn alive_at(&self, column: u32, row: u32) -> bool {
        if column >= self.width || row >= self.height {
            return false;
        }
        let index = usize::try_from(u64::from(row) * u64::from(self.width) + u64::from(column));
        index.map_or(false, |index| self.cells.get(index).copied().unwrap_or(false))
    }
}

/// Read-only mapping from figure names to their reference patterns.
///
/// Loaded once per classifier; iteration follows the fixed insertion order
/// of [`FIGURE_FILES`].
#[derive(Clone, Debug, Default)]
pub struct TemplateLibrary {
    entries: Vec<(String, Pattern)>,
}

impl TemplateLibrary {
    /// Loads the fixed figure set from the provided directory.
    ///
    /// A missing or unreadable definition file omits that name from the
    /// library rather than failing the load.
    #[must_use]
    pub fn load(figures_dir: &Path) -> Self {
        let mut entries = Vec::new();
        for (name, file) in FIGURE_FILES {
            let Ok(text) = fs::read_to_string(figures_dir.join(file)) else {
                continue;
            };
            if let Some(pattern) = Pattern::parse(&text) {
                entries.push((name.to_owned(), pattern));
            }
        }
        Self { entries }
    }

    /// Builds a library directly from named patterns, preserving order.
    #[must_use]
    pub fn from_patterns(entries: Vec<(String, Pattern)>) -> Self {
        Self { entries }
    }

    /// Names loaded into the library, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    fn match_name(&self, pattern: &Pattern) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, template)| template == pattern)
            .map(|(name, _)| name.as_str())
    }
}

/// Pure classification system backed by a fixed template library.
#[derive(Clone, Debug, Default)]
pub struct Classifier {
    library: TemplateLibrary,
}

impl Classifier {
    /// Creates a classifier over the provided template library.
    #[must_use]
    pub fn new(library: TemplateLibrary) -> Self {
        Self { library }
    }

    /// Names a component by exact shape match, or [`UNKNOWN_FIGURE`].
    #[must_use]
    pub fn classify(&self, component: &Component) -> &str {
        let Some(pattern) = Pattern::from_component(component) else {
            return UNKNOWN_FIGURE;
        };
        self.library
            .match_name(&pattern)
            .unwrap_or(UNKNOWN_FIGURE)
    }

    /// Classifies every multi-cell component in the snapshot.
    ///
    /// The result always contains one zero-initialized entry per loaded
    /// template name plus [`UNKNOWN_FIGURE`]; singleton live cells are
    /// excluded entirely.
    #[must_use]
    pub fn classify_board(
        &self,
        extraction: &mut Extraction,
        view: &CellsView<'_>,
    ) -> BTreeMap<String, usize> {
        let mut counts: BTreeMap<String, usize> = self
            .library
            .names()
            .map(|name| (name.to_owned(), 0))
            .collect();
        let _ = counts.entry(UNKNOWN_FIGURE.to_owned()).or_insert(0);

        for component in extraction.components(view) {
            if component.size() <= 1 {
                continue;
            }
            let name = self.classify(&component);
            if let Some(count) = counts.get_mut(name) {
                *count += 1;
            }
        }
        counts
    }
}
