#![cfg(test)]

use super::{
    error::PathError,
    lattice::{LatticeKind, TRIANGULAR_M_BOUNDARY_DEG},
};

#[test]
fn selectors_parse_by_name_and_legacy_index() {
    assert_eq!("square".parse::<LatticeKind>().unwrap(), LatticeKind::Square);
    assert_eq!(" Triangular ".parse::<LatticeKind>().unwrap(), LatticeKind::Triangular);
    assert_eq!("hexagonal".parse::<LatticeKind>().unwrap(), LatticeKind::Triangular);
    assert_eq!("1".parse::<LatticeKind>().unwrap(), LatticeKind::Triangular);
    assert_eq!(LatticeKind::from_index(0).unwrap(), LatticeKind::Square);
    assert_eq!(LatticeKind::from_index(1).unwrap(), LatticeKind::Triangular);
}

#[test]
fn unknown_selectors_are_ambiguous() {
    assert_eq!(
        "oblique".parse::<LatticeKind>().unwrap_err(),
        PathError::AmbiguousLattice("oblique".to_string())
    );
    assert_eq!(
        LatticeKind::from_index(2).unwrap_err(),
        PathError::AmbiguousLattice("2".to_string())
    );
}

#[test]
fn legs_follow_high_symmetry_order() {
    assert_eq!(
        LatticeKind::Square.legs(),
        [("Gamma", "X"), ("X", "M"), ("M", "Gamma")]
    );
    assert_eq!(
        LatticeKind::Triangular.legs(),
        [("Gamma", "M"), ("M", "K"), ("K", "Gamma")]
    );
}

#[test]
fn m_boundary_matches_hexagonal_ratio() {
    let derived = 180.0 * 4.0 / (3.0 * 3.0f64.sqrt());
    assert!((TRIANGULAR_M_BOUNDARY_DEG - derived).abs() < 0.05);
}

#[test]
fn display_round_trips_through_from_str() {
    for kind in [LatticeKind::Square, LatticeKind::Triangular] {
        assert_eq!(kind.to_string().parse::<LatticeKind>().unwrap(), kind);
    }
}
