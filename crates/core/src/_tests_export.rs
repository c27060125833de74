#![cfg(test)]

use num_complex::Complex64;

use crate::{
    coords::Coordinates,
    error::PathError,
    export::{chunk_sizes, split_for_export, verify_coverage},
    grid::{Sample, SampleGrid},
};

const PRIMARY: [f64; 3] = [0.0, 90.0, 180.0];
const SECONDARY: [f64; 7] = [0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0];

/// Two-channel (re, im) field payload that encodes its position.
fn field_grid(primary: &[f64], secondary: &[f64]) -> SampleGrid {
    let samples = primary.iter().flat_map(|&x| {
        secondary
            .iter()
            .map(move |&y| Sample::from_field(x, y, &[Complex64::new(x, y)]))
    });
    SampleGrid::from_samples(2, samples).unwrap()
}

#[test]
fn chunk_sizes_take_remainder_last() {
    assert_eq!(chunk_sizes(12, 5).unwrap(), vec![5, 5, 2]);
    assert_eq!(chunk_sizes(10, 5).unwrap(), vec![5, 5]);
    assert_eq!(chunk_sizes(3, 5).unwrap(), vec![3]);
    assert!(chunk_sizes(0, 5).unwrap().is_empty());
}

#[test]
fn non_positive_width_is_rejected() {
    assert_eq!(chunk_sizes(4, 0).unwrap_err(), PathError::ChunkBoundary(0));
    assert_eq!(chunk_sizes(4, -3).unwrap_err(), PathError::ChunkBoundary(-3));

    let grid = field_grid(&PRIMARY, &SECONDARY);
    let err = split_for_export(
        &grid,
        &Coordinates::from_degrees(&PRIMARY),
        &Coordinates::from_degrees(&SECONDARY),
        0,
    )
    .unwrap_err();
    assert_eq!(err, PathError::ChunkBoundary(0));
}

#[test]
fn chunks_cover_secondary_axis_without_gaps() {
    let grid = field_grid(&PRIMARY, &SECONDARY);
    let primary = Coordinates::from_degrees(&PRIMARY);
    let secondary = Coordinates::from_degrees(&SECONDARY);

    let chunks = split_for_export(&grid, &primary, &secondary, 3).unwrap();

    assert_eq!(chunks.len(), 3, "ceil(7 / 3) chunks");
    let widths: Vec<usize> = chunks.iter().map(|c| c.width()).collect();
    assert_eq!(widths, vec![3, 3, 1]);
    assert_eq!(widths.iter().sum::<usize>(), secondary.len());

    let rejoined: Vec<f64> = chunks
        .iter()
        .flat_map(|c| c.secondary().iter().collect::<Vec<_>>())
        .collect();
    assert_eq!(rejoined, SECONDARY.to_vec());
    for (idx, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.index(), idx);
        assert_eq!(chunk.primary(), &primary);
    }
}

#[test]
fn samples_are_secondary_major() {
    let grid = field_grid(&PRIMARY, &SECONDARY);
    let chunks = split_for_export(
        &grid,
        &Coordinates::from_degrees(&PRIMARY),
        &Coordinates::from_degrees(&SECONDARY),
        2,
    )
    .unwrap();

    let order: Vec<[f64; 2]> = chunks[1].samples().iter().map(|s| s.position()).collect();
    assert_eq!(
        order,
        vec![
            [0.0, 60.0],
            [90.0, 60.0],
            [180.0, 60.0],
            [0.0, 90.0],
            [90.0, 90.0],
            [180.0, 90.0],
        ]
    );
}

#[test]
fn rows_follow_primary_and_append_secondary_columns() {
    let grid = field_grid(&PRIMARY, &SECONDARY);
    let chunks = split_for_export(
        &grid,
        &Coordinates::from_degrees(&PRIMARY),
        &Coordinates::from_degrees(&SECONDARY),
        3,
    )
    .unwrap();

    let rows = chunks[0].rows();
    assert_eq!(rows.len(), PRIMARY.len());
    assert_eq!(rows[1], vec![90.0, 0.0, 90.0, 30.0, 90.0, 60.0]);

    let last = chunks[2].rows();
    assert_eq!(last[2], vec![180.0, 180.0]);
}

#[test]
fn every_missing_variation_is_counted() {
    let mut grid = field_grid(&PRIMARY, &[0.0, 30.0]);
    grid.insert(0.0, 60.0, vec![0.0, 60.0]).unwrap();
    let primary = Coordinates::from_degrees(&PRIMARY);
    let secondary = Coordinates::from_degrees(&[0.0, 30.0, 60.0]);

    let err = verify_coverage(&grid, &primary, &secondary).unwrap_err();
    assert_eq!(
        err,
        PathError::IncompleteGrid {
            missing: 2,
            kx: 90.0,
            ky: 60.0,
        }
    );
    assert!(split_for_export(&grid, &primary, &secondary, 5).is_err());
}

#[test]
fn narrow_axis_fits_in_one_chunk() {
    let grid = field_grid(&PRIMARY, &[0.0, 45.0]);
    let chunks = split_for_export(
        &grid,
        &Coordinates::from_degrees(&PRIMARY),
        &Coordinates::from_degrees(&[0.0, 45.0]),
        5,
    )
    .unwrap();
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].samples().len(), 6);
}
