//! Splitting a solved grid into width-bounded export chunks.
//!
//! Field exports go through a channel that can only hold a fixed number of
//! secondary-axis columns at once. The secondary axis is therefore cut into
//! contiguous slices of at most `max_chunk_width` values, and each slice
//! becomes one [`ExportChunk`] covering the whole primary axis.
//!
//! Grid lookups use `(primary, secondary)` as `(kx, ky)`.

use log::{debug, warn};

use crate::{
    coords::Coordinates,
    error::PathError,
    grid::{Sample, SampleGrid},
};

/// Samples for one contiguous slice of the secondary axis.
///
/// Samples are stored secondary-major: all primary values for the first
/// secondary coordinate, then all for the second, and so on.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportChunk {
    index: usize,
    primary: Coordinates,
    secondary: Coordinates,
    samples: Vec<Sample>,
}

impl ExportChunk {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn primary(&self) -> &Coordinates {
        &self.primary
    }

    pub fn secondary(&self) -> &Coordinates {
        &self.secondary
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of secondary coordinates in this chunk.
    pub fn width(&self) -> usize {
        self.secondary.len()
    }

    /// Tabular view: one row per primary coordinate.
    ///
    /// Each row holds, for every secondary coordinate in ascending order, the
    /// payload components of the sample at `(primary, secondary)`.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        let n_primary = self.primary.len();
        (0..n_primary)
            .map(|p| {
                (0..self.secondary.len())
                    .flat_map(|s| self.samples[s * n_primary + p].values.iter().copied())
                    .collect()
            })
            .collect()
    }
}

/// Slice widths for `total` secondary values: full chunks then the remainder.
pub fn chunk_sizes(total: usize, max_chunk_width: i64) -> Result<Vec<usize>, PathError> {
    if max_chunk_width <= 0 {
        return Err(PathError::ChunkBoundary(max_chunk_width));
    }
    let width = usize::try_from(max_chunk_width).unwrap_or(usize::MAX);
    let chunks = total.div_ceil(width);
    let mut sizes = vec![width; chunks];
    if let Some(last) = sizes.last_mut() {
        *last = total - width * (chunks - 1);
    }
    Ok(sizes)
}

/// Check that every `primary × secondary` pair was solved.
///
/// Each missing pair is logged; the error names the count and the first one.
pub fn verify_coverage(
    grid: &SampleGrid,
    primary: &Coordinates,
    secondary: &Coordinates,
) -> Result<(), PathError> {
    let missing = grid.missing_pairs(primary, secondary);
    for &(kx, ky) in &missing {
        warn!("field data not found for solved variation kx={kx}deg, ky={ky}deg");
    }
    match missing.first() {
        Some(&(kx, ky)) => Err(PathError::IncompleteGrid {
            missing: missing.len(),
            kx,
            ky,
        }),
        None => Ok(()),
    }
}

/// Split `grid` into chunks of at most `max_chunk_width` secondary values.
///
/// Produces exactly `ceil(|secondary| / max_chunk_width)` chunks whose
/// secondary slices, concatenated, reproduce `secondary`.
pub fn split_for_export(
    grid: &SampleGrid,
    primary: &Coordinates,
    secondary: &Coordinates,
    max_chunk_width: i64,
) -> Result<Vec<ExportChunk>, PathError> {
    let sizes = chunk_sizes(secondary.len(), max_chunk_width)?;
    verify_coverage(grid, primary, secondary)?;
    if sizes.len() > 1 {
        warn!(
            "{} secondary values exceed the channel width of {max_chunk_width}; splitting into {} chunks",
            secondary.len(),
            sizes.len()
        );
    }

    let mut chunks = Vec::with_capacity(sizes.len());
    let mut start = 0;
    for (index, size) in sizes.into_iter().enumerate() {
        let slice = secondary.slice(start, start + size);
        let mut samples = Vec::with_capacity(size * primary.len());
        for ky in slice.iter() {
            for kx in primary.iter() {
                samples.push(grid.sample(kx, ky)?);
            }
        }
        debug!(
            "chunk {index}: secondary {:?}..{:?} ({size} column(s))",
            slice.first(),
            slice.last()
        );
        chunks.push(ExportChunk {
            index,
            primary: primary.clone(),
            secondary: slice,
            samples,
        });
        start += size;
    }
    Ok(chunks)
}
