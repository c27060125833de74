//! Lattice selectors and the high-symmetry geometry of their reduced zones.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::PathError;

/// Phase (degrees) separating the Γ→M and M→K legs of the triangular path.
///
/// Samples with kx at or above this value belong to the M→K edge; samples
/// below it (with ky below it) belong to K→Γ. The value agrees with
/// 180°·4/(3√3) to within its one-decimal rounding; it is kept at the rounded
/// figure because existing sweeps were laid out against it.
pub const TRIANGULAR_M_BOUNDARY_DEG: f64 = 138.6;

/// Lattice symmetry that decides the zone-boundary path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatticeKind {
    /// Γ → X → M → Γ
    Square,
    /// Γ → M → K → Γ
    #[serde(alias = "hexagonal")]
    Triangular,
}

impl LatticeKind {
    /// Legacy numeric selector: 0 = square, 1 = triangular.
    pub fn from_index(index: i64) -> Result<Self, PathError> {
        match index {
            0 => Ok(LatticeKind::Square),
            1 => Ok(LatticeKind::Triangular),
            other => Err(PathError::AmbiguousLattice(other.to_string())),
        }
    }

    /// High-symmetry points in traversal order, Γ first and last.
    pub fn corners(self) -> [&'static str; 4] {
        match self {
            LatticeKind::Square => ["Gamma", "X", "M", "Gamma"],
            LatticeKind::Triangular => ["Gamma", "M", "K", "Gamma"],
        }
    }

    /// `(from, to)` labels of the three boundary edges.
    pub fn legs(self) -> [(&'static str, &'static str); 3] {
        let c = self.corners();
        [(c[0], c[1]), (c[1], c[2]), (c[2], c[3])]
    }
}

impl FromStr for LatticeKind {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" | "0" => Ok(LatticeKind::Square),
            "triangular" | "hexagonal" | "1" => Ok(LatticeKind::Triangular),
            _ => Err(PathError::AmbiguousLattice(s.to_string())),
        }
    }
}

impl fmt::Display for LatticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatticeKind::Square => write!(f, "square"),
            LatticeKind::Triangular => write!(f, "triangular"),
        }
    }
}
