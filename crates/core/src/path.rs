//! Zone-boundary path assembly.
//!
//! A dual phase sweep stores its results as a rectangular product of kx and
//! ky values, but a dispersion diagram needs one ordered walk around the edge
//! of the irreducible zone:
//!
//! ```text
//! square      Γ(0,0) → X(180,0) → M(180,180) → Γ
//! triangular  Γ(0,0) → M(180,0) → K          → Γ
//! ```
//!
//! Straight edges along an axis are read off directly. Diagonal edges are not
//! a stored order: they are rebuilt by pairing the i-th ascending kx value
//! with the i-th ascending ky value and then walking that list backwards, so
//! the edge runs from the far corner towards the origin. The pairing is only
//! meaningful when both filtered axes have the same length, which is checked
//! before anything is paired.
//!
//! Assembly happens in two steps. [`plan_path`] decides which coordinate
//! pairs make up each edge without touching any data; [`assemble`] (or
//! [`assemble_from_provider`]) resolves the plan against stored samples and
//! concatenates the edges, dropping a shared corner when an edge starts
//! where the previous one ended.

use std::ops::Range;

use log::debug;

use crate::{
    coords::Coordinates,
    error::PathError,
    grid::{Sample, SampleGrid},
    lattice::{LatticeKind, TRIANGULAR_M_BOUNDARY_DEG},
    provider::SampleProvider,
};

// ============================================================================
// Plan
// ============================================================================

/// Coordinate pairs of one boundary edge, in traversal order.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPlan {
    pub from: &'static str,
    pub to: &'static str,
    pub points: Vec<[f64; 2]>,
}

/// Decide the three boundary edges for `lattice` over the given axes.
///
/// Fails with `NoIrreducibleSamples` when either axis is empty or lacks 0deg.
pub fn plan_path(
    kx: &Coordinates,
    ky: &Coordinates,
    lattice: LatticeKind,
) -> Result<Vec<SegmentPlan>, PathError> {
    // both axes must start at Γ
    if kx.first() != Some(0.0) || ky.first() != Some(0.0) {
        return Err(PathError::NoIrreducibleSamples);
    }
    let legs = lattice.legs();
    let edges = match lattice {
        LatticeKind::Square => square_edges(kx, ky)?,
        LatticeKind::Triangular => triangular_edges(kx, ky)?,
    };
    Ok(legs
        .into_iter()
        .zip(edges)
        .map(|((from, to), points)| SegmentPlan { from, to, points })
        .collect())
}

fn square_edges(kx: &Coordinates, ky: &Coordinates) -> Result<[Vec<[f64; 2]>; 3], PathError> {
    let gamma_x = axis_edge(kx);

    let x_edge = kx.last().ok_or(PathError::NoIrreducibleSamples)?;
    let x_m: Vec<[f64; 2]> = ky
        .iter()
        .filter(|&y| y != 0.0)
        .map(|y| [x_edge, y])
        .collect();

    let nonzero_x = kx.filtered(|v| v != 0.0);
    let nonzero_y = ky.filtered(|v| v != 0.0);
    let m_gamma = diagonal_pairs("M-Gamma", &nonzero_x, &nonzero_y)?;

    Ok([gamma_x, x_m, m_gamma])
}

fn triangular_edges(
    kx: &Coordinates,
    ky: &Coordinates,
) -> Result<[Vec<[f64; 2]>; 3], PathError> {
    let boundary = TRIANGULAR_M_BOUNDARY_DEG;
    let gamma_m = axis_edge(kx);

    let m_k = diagonal_pairs(
        "M-K",
        &kx.filtered(|v| v >= boundary && v != 0.0),
        &ky.filtered(|v| v <= boundary && v != 0.0),
    )?;

    let k_gamma = diagonal_pairs(
        "K-Gamma",
        &kx.filtered(|v| v < boundary && v != 0.0),
        &ky.filtered(|v| v < boundary && v != 0.0),
    )?;

    Ok([gamma_m, m_k, k_gamma])
}

/// ky = 0 with kx ascending; starts at Γ.
fn axis_edge(kx: &Coordinates) -> Vec<[f64; 2]> {
    kx.iter().map(|x| [x, 0.0]).collect()
}

/// Rebuild a diagonal edge from independently sorted axes.
///
/// The i-th kx value is paired with the i-th ky value, then the list is
/// reversed so the edge runs from the far corner back towards Γ. Both axes
/// must have the same length.
pub fn diagonal_pairs(
    segment: &'static str,
    kx: &Coordinates,
    ky: &Coordinates,
) -> Result<Vec<[f64; 2]>, PathError> {
    if kx.len() != ky.len() {
        return Err(PathError::AxisCardinalityMismatch {
            segment,
            kx_len: kx.len(),
            ky_len: ky.len(),
        });
    }
    let mut pairs: Vec<[f64; 2]> = kx.iter().zip(ky.iter()).map(|(x, y)| [x, y]).collect();
    pairs.reverse();
    Ok(pairs)
}

// ============================================================================
// Assembled path
// ============================================================================

/// One resolved boundary edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub from: &'static str,
    pub to: &'static str,
    pub samples: Vec<Sample>,
}

impl PathSegment {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn label(&self) -> String {
        format!("{} to {}", self.from, self.to)
    }
}

/// The full walk around the zone boundary.
///
/// `segments` keeps every edge as resolved; `samples` is their concatenation
/// with shared corners emitted once. Γ appears exactly once, first.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledPath {
    lattice: LatticeKind,
    mode_count: usize,
    segments: Vec<PathSegment>,
    samples: Vec<Sample>,
    offsets: Vec<usize>,
    overlaps: Vec<usize>,
}

impl AssembledPath {
    fn concatenate(lattice: LatticeKind, mode_count: usize, segments: Vec<PathSegment>) -> Self {
        let mut samples: Vec<Sample> = Vec::new();
        let mut offsets = Vec::with_capacity(segments.len());
        let mut overlaps = Vec::with_capacity(segments.len());
        for segment in &segments {
            let shared = match (samples.last(), segment.samples.first()) {
                (Some(last), Some(first)) if last.position() == first.position() => 1,
                _ => 0,
            };
            offsets.push(samples.len());
            overlaps.push(shared);
            samples.extend(segment.samples.iter().skip(shared).cloned());
        }
        Self {
            lattice,
            mode_count,
            segments,
            samples,
            offsets,
            overlaps,
        }
    }

    pub fn lattice(&self) -> LatticeKind {
        self.lattice
    }

    pub fn mode_count(&self) -> usize {
        self.mode_count
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Corner samples dropped when segment `index` was appended (0 or 1).
    pub fn overlap(&self, index: usize) -> usize {
        self.overlaps.get(index).copied().unwrap_or(0)
    }

    /// Indices into [`samples`](Self::samples) contributed by segment `index`.
    pub fn segment_range(&self, index: usize) -> Range<usize> {
        let start = self.offsets.get(index).copied().unwrap_or(self.samples.len());
        let end = self
            .offsets
            .get(index + 1)
            .copied()
            .unwrap_or(self.samples.len());
        start..end
    }

    pub fn positions(&self) -> Vec<[f64; 2]> {
        self.samples.iter().map(Sample::position).collect()
    }

    /// Cumulative distance along the path in degree space, starting at 0.
    pub fn distances(&self) -> Vec<f64> {
        cumulative_distances(&self.samples)
    }

    /// Column `mode` of every sample, in path order.
    pub fn mode_values(&self, mode: usize) -> Vec<f64> {
        self.samples
            .iter()
            .filter_map(|s| s.values.get(mode).copied())
            .collect()
    }
}

pub(crate) fn cumulative_distances(samples: &[Sample]) -> Vec<f64> {
    let mut total = 0.0;
    let mut out = Vec::with_capacity(samples.len());
    for (idx, sample) in samples.iter().enumerate() {
        if idx > 0 {
            let prev = &samples[idx - 1];
            total += (sample.kx - prev.kx).hypot(sample.ky - prev.ky);
        }
        out.push(total);
    }
    out
}

// ============================================================================
// Assembly
// ============================================================================

/// Assemble the boundary walk from stored samples.
///
/// Fails with `IncompletePath` on the first required pair the grid lacks.
pub fn assemble(
    grid: &SampleGrid,
    kx: &Coordinates,
    ky: &Coordinates,
    lattice: LatticeKind,
) -> Result<AssembledPath, PathError> {
    let plans = plan_path(kx, ky, lattice)?;
    resolve(lattice, grid.mode_count(), plans, |x, y| grid.sample(x, y))
}

/// Assemble the boundary walk by asking `provider` for each required pair.
///
/// Corner pairs are requested once per edge that contains them; wrap the
/// provider in a [`MemoizedProvider`](crate::provider::MemoizedProvider) to
/// serve repeats from cache.
pub fn assemble_from_provider<P: SampleProvider + ?Sized>(
    provider: &mut P,
    mode_count: usize,
    kx: &Coordinates,
    ky: &Coordinates,
    lattice: LatticeKind,
) -> Result<AssembledPath, PathError> {
    let plans = plan_path(kx, ky, lattice)?;
    resolve(lattice, mode_count, plans, |x, y| {
        let values = provider.values(x, y)?;
        if values.len() != mode_count {
            return Err(PathError::ModeCountMismatch {
                kx: x,
                ky: y,
                expected: mode_count,
                actual: values.len(),
            });
        }
        Ok(Sample::new(x, y, values))
    })
}

fn resolve(
    lattice: LatticeKind,
    mode_count: usize,
    plans: Vec<SegmentPlan>,
    mut lookup: impl FnMut(f64, f64) -> Result<Sample, PathError>,
) -> Result<AssembledPath, PathError> {
    let mut segments = Vec::with_capacity(plans.len());
    for plan in plans {
        let samples = plan
            .points
            .iter()
            .map(|&[x, y]| lookup(x, y))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "{lattice} path: {} to {} resolved {} sample(s)",
            plan.from,
            plan.to,
            samples.len()
        );
        segments.push(PathSegment {
            from: plan.from,
            to: plan.to,
            samples,
        });
    }
    let path = AssembledPath::concatenate(lattice, mode_count, segments);
    debug!("{lattice} path assembled with {} sample(s)", path.len());
    Ok(path)
}
