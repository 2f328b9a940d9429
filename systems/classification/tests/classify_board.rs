use std::path::Path;

use torus_life_core::{BoardConfig, CellCoord, CellUpdate, Command};
use torus_life_system_classification::{Classifier, TemplateLibrary};
use torus_life_system_extraction::Extraction;
use torus_life_world::{apply, query, World};

fn figures_dir() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../../figures"))
}

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
fn library_loads_all_shipped_figures() {
    let library = TemplateLibrary::load(figures_dir());
    let names: Vec<&str> = library.names().collect();
    assert_eq!(names, vec!["Block", "Blinker", "Hive", "Glider", "Boat"]);
}

#[test]
fn block_and_horizontal_line_classify_as_block_and_blinker() {
    let world = board_with(&[(0, 0), (1, 0), (0, 1), (1, 1), (3, 4), (4, 4), (5, 4)], 8, 8);
    let classifier = Classifier::new(TemplateLibrary::load(figures_dir()));
    let mut extraction = Extraction::new();
    let counts = classifier.classify_board(&mut extraction, &query::cells_view(&world));

    assert_eq!(counts.get("Block"), Some(&1));
    assert_eq!(counts.get("Blinker"), Some(&1));
    assert_eq!(counts.get("Hive"), Some(&0));
    assert_eq!(counts.get("Glider"), Some(&0));
    assert_eq!(counts.get("Boat"), Some(&0));
    assert_eq!(counts.get("Unknown"), Some(&0));
}

#[test]
fn singleton_cells_never_reach_the_result_mapping() {
    let world = board_with(&[(0, 0), (1, 0), (0, 1), (1, 1), (5, 5)], 8, 8);
    let classifier = Classifier::new(TemplateLibrary::load(figures_dir()));
    let mut extraction = Extraction::new();
    let counts = classifier.classify_board(&mut extraction, &query::cells_view(&world));

    let total: usize = counts.values().sum();
    assert_eq!(total, 1);
    assert_eq!(counts.get("Block"), Some(&1));
}

#[test]
fn missing_template_file_omits_the_name() {
    let library = TemplateLibrary::load(Path::new("/nonexistent-figures"));
    assert_eq!(library.names().count(), 0);
}
