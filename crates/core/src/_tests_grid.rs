#![cfg(test)]

use num_complex::Complex64;

use crate::{
    coords::Coordinates,
    error::PathError,
    grid::{Sample, SampleGrid},
};

#[test]
fn tuples_must_match_mode_count() {
    let mut grid = SampleGrid::new(3);
    grid.insert(0.0, 0.0, vec![0.1, 0.2, 0.3]).unwrap();
    let err = grid.insert(60.0, 0.0, vec![0.1, 0.2]).unwrap_err();
    assert_eq!(
        err,
        PathError::ModeCountMismatch {
            kx: 60.0,
            ky: 0.0,
            expected: 3,
            actual: 2,
        }
    );
    assert_eq!(grid.len(), 1);
}

#[test]
fn negative_zero_finds_the_origin() {
    let mut grid = SampleGrid::new(1);
    grid.insert(0.0, 0.0, vec![1.0]).unwrap();
    assert_eq!(grid.get(-0.0, 0.0), Some(&[1.0][..]));
    assert!(grid.contains(0.0, -0.0));
}

#[test]
fn reinserting_a_pair_replaces_it() {
    let mut grid = SampleGrid::new(1);
    grid.insert(30.0, 60.0, vec![1.0]).unwrap();
    grid.insert(30.0, 60.0, vec![2.0]).unwrap();
    assert_eq!(grid.len(), 1);
    assert_eq!(grid.sample(30.0, 60.0).unwrap().values, vec![2.0]);
}

#[test]
fn absent_pair_is_an_incomplete_path() {
    let grid = SampleGrid::new(2);
    assert_eq!(
        grid.sample(45.0, 90.0).unwrap_err(),
        PathError::IncompletePath { kx: 45.0, ky: 90.0 }
    );
}

#[test]
fn missing_pairs_scan_ky_major() {
    let mut grid = SampleGrid::new(1);
    grid.insert(0.0, 0.0, vec![0.0]).unwrap();
    grid.insert(90.0, 90.0, vec![0.0]).unwrap();
    let axis = Coordinates::from_degrees(&[0.0, 90.0]);
    assert_eq!(grid.missing_pairs(&axis, &axis), vec![(90.0, 0.0), (0.0, 90.0)]);
}

#[test]
fn field_components_interleave_real_and_imaginary() {
    let sample = Sample::from_field(
        10.0,
        20.0,
        &[Complex64::new(1.0, -1.0), Complex64::new(2.5, 0.5)],
    );
    assert_eq!(sample.values, vec![1.0, -1.0, 2.5, 0.5]);
    assert!(!sample.is_origin());
    assert!(Sample::new(0.0, 0.0, vec![]).is_origin());
}

#[test]
fn tolerance_resolves_nearest_stored_pair() {
    let mut grid = SampleGrid::new(1).with_tolerance(1e-6);
    grid.insert(60.0 + 4e-7, 0.0, vec![1.0]).unwrap();
    grid.insert(60.0 - 9e-7, 0.0, vec![2.0]).unwrap();
    grid.insert(120.0, 0.0, vec![3.0]).unwrap();

    assert_eq!(grid.get(60.0, 0.0), Some(&[1.0][..]));
    assert_eq!(grid.get(120.0 + 5e-7, 5e-7), Some(&[3.0][..]));
    assert!(!grid.contains(60.0 + 2e-6, 0.0));

    let sample = grid.sample(60.0, 0.0).unwrap();
    assert_eq!(sample.position(), [60.0, 0.0], "sample takes the requested coordinates");
}

#[test]
fn exact_lookup_ignores_near_neighbours_by_default() {
    let mut grid = SampleGrid::new(1);
    grid.insert(60.0 + 1e-9, 0.0, vec![1.0]).unwrap();
    assert_eq!(grid.tolerance(), 0.0);
    assert_eq!(
        grid.sample(60.0, 0.0).unwrap_err(),
        PathError::IncompletePath { kx: 60.0, ky: 0.0 }
    );
}
