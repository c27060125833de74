#![cfg(test)]

use crate::{
    coords::Coordinates,
    export::split_for_export,
    grid::SampleGrid,
    lattice::LatticeKind,
    output::{
        CsvLayout, chunk_file_name, path_file_name, segment_file_name, write_chunk_csv,
        write_path_csv, write_segment_csv,
    },
    path::{AssembledPath, assemble},
};

fn small_square_path() -> AssembledPath {
    let axis = [0.0, 180.0];
    let mut grid = SampleGrid::new(2);
    for &x in &axis {
        for &y in &axis {
            grid.insert(x, y, vec![x / 360.0, y / 360.0]).unwrap();
        }
    }
    let coords = Coordinates::from_degrees(&axis);
    assemble(&grid, &coords, &coords, LatticeKind::Square).unwrap()
}

fn render(write: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
    let mut buffer = Vec::new();
    write(&mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[test]
fn labelled_path_table() {
    let path = small_square_path();
    let csv = render(|w| write_path_csv(w, &path, &CsvLayout::labelled("px", "py")));
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "label,mode1,mode2",
            "px=0deg py=0deg,0,0",
            "px=180deg py=0deg,0.5,0",
            "px=180deg py=180deg,0.5,0.5",
        ]
    );
}

#[test]
fn bare_table_has_values_only() {
    let path = small_square_path();
    let csv = render(|w| write_path_csv(w, &path, &CsvLayout::bare()));
    assert_eq!(csv, "0,0\n0.5,0\n0.5,0.5\n");
}

#[test]
fn distance_column_follows_label() {
    let path = small_square_path();
    let layout = CsvLayout {
        distance: true,
        ..CsvLayout::labelled("kx", "ky")
    };
    let csv = render(|w| write_path_csv(w, &path, &layout));
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "label,distance,mode1,mode2");
    assert_eq!(lines[2], "kx=180deg ky=0deg,180,0.5,0");
    assert_eq!(lines[3], "kx=180deg ky=180deg,360,0.5,0.5");
}

#[test]
fn segment_table_keeps_shared_corner() {
    let path = small_square_path();
    let closing = &path.segments()[2];
    let csv = render(|w| write_segment_csv(w, closing, path.mode_count(), &CsvLayout::bare()));
    assert_eq!(csv, "0.5,0.5\n");
}

#[test]
fn chunk_table_has_one_row_per_primary_value() {
    let primary = Coordinates::from_degrees(&[0.0, 90.0]);
    let secondary = Coordinates::from_degrees(&[0.0, 45.0, 90.0]);
    let mut grid = SampleGrid::new(2);
    for x in primary.iter() {
        for y in secondary.iter() {
            grid.insert(x, y, vec![x, y + 1.0]).unwrap();
        }
    }
    let chunks = split_for_export(&grid, &primary, &secondary, 2).unwrap();
    let csv = render(|w| write_chunk_csv(w, &chunks[0]));
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "kx,ky0_c0,ky0_c1,ky45_c0,ky45_c1");
    assert_eq!(lines[1], "0,0,1,0,46");
    assert_eq!(lines[2], "90,90,1,90,46");
    assert_eq!(lines.len(), 3);
}

#[test]
fn file_names_follow_legacy_scheme() {
    assert_eq!(path_file_name("run_"), "run_dispersionData.csv");
    assert_eq!(segment_file_name("run_", 0), "run_path1.csv");
    assert_eq!(chunk_file_name("fields", 2), "fields2.csv");
}
