//! Solved samples indexed by their two sweep coordinates.

use std::collections::HashMap;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::{coords::Coordinates, error::PathError};

/// Exact-bit key for a `(kx, ky)` pair. `-0.0` folds onto `+0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct PairKey(u64, u64);

impl PairKey {
    pub(crate) fn new(kx: f64, ky: f64) -> Self {
        Self((kx + 0.0).to_bits(), (ky + 0.0).to_bits())
    }

    fn coords(self) -> (f64, f64) {
        (f64::from_bits(self.0), f64::from_bits(self.1))
    }
}

/// One solved variation: its coordinates (degrees) and value tuple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub kx: f64,
    pub ky: f64,
    pub values: Vec<f64>,
}

impl Sample {
    pub fn new(kx: f64, ky: f64, values: Vec<f64>) -> Self {
        Self { kx, ky, values }
    }

    /// Flatten complex field components into interleaved `re, im` channels.
    pub fn from_field(kx: f64, ky: f64, field: &[Complex64]) -> Self {
        let values = field.iter().flat_map(|z| [z.re, z.im]).collect();
        Self { kx, ky, values }
    }

    pub fn position(&self) -> [f64; 2] {
        [self.kx, self.ky]
    }

    /// True at the zone centre Γ.
    pub fn is_origin(&self) -> bool {
        self.kx == 0.0 && self.ky == 0.0
    }
}

/// Sparse map from `(kx, ky)` to an N-value tuple.
///
/// Every tuple has exactly `mode_count` entries; pairs that were never solved
/// are simply absent.
///
/// Lookups are exact unless a tolerance is set with
/// [`with_tolerance`](Self::with_tolerance). With one, a pair that misses
/// exactly resolves to the nearest stored pair lying within the tolerance on
/// both axes, matching how normalization merges near-duplicate coordinates.
#[derive(Debug, Clone, Default)]
pub struct SampleGrid {
    mode_count: usize,
    tolerance: f64,
    entries: HashMap<PairKey, Vec<f64>>,
}

impl SampleGrid {
    pub fn new(mode_count: usize) -> Self {
        Self {
            mode_count,
            tolerance: 0.0,
            entries: HashMap::new(),
        }
    }

    /// Resolve lookups within `tolerance` degrees; use the normalization
    /// policy's `dedup_tolerance`.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn from_samples(
        mode_count: usize,
        samples: impl IntoIterator<Item = Sample>,
    ) -> Result<Self, PathError> {
        let mut grid = Self::new(mode_count);
        for sample in samples {
            grid.insert(sample.kx, sample.ky, sample.values)?;
        }
        Ok(grid)
    }

    pub fn mode_count(&self) -> usize {
        self.mode_count
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store a tuple, replacing any earlier one at the same pair.
    pub fn insert(&mut self, kx: f64, ky: f64, values: Vec<f64>) -> Result<(), PathError> {
        if values.len() != self.mode_count {
            return Err(PathError::ModeCountMismatch {
                kx,
                ky,
                expected: self.mode_count,
                actual: values.len(),
            });
        }
        self.entries.insert(PairKey::new(kx, ky), values);
        Ok(())
    }

    pub fn get(&self, kx: f64, ky: f64) -> Option<&[f64]> {
        if let Some(values) = self.entries.get(&PairKey::new(kx, ky)) {
            return Some(values.as_slice());
        }
        if self.tolerance > 0.0 {
            self.nearest_within_tolerance(kx, ky)
        } else {
            None
        }
    }

    pub fn contains(&self, kx: f64, ky: f64) -> bool {
        self.get(kx, ky).is_some()
    }

    // ties resolve to the lowest key bits
    fn nearest_within_tolerance(&self, kx: f64, ky: f64) -> Option<&[f64]> {
        self.entries
            .iter()
            .filter_map(|(key, values)| {
                let (x, y) = key.coords();
                let offset = (x - kx).abs().max((y - ky).abs());
                (offset <= self.tolerance).then_some((offset, *key, values))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
            .map(|(_, _, values)| values.as_slice())
    }

    /// The sample at `(kx, ky)`, or `IncompletePath` naming the pair.
    pub fn sample(&self, kx: f64, ky: f64) -> Result<Sample, PathError> {
        self.get(kx, ky)
            .map(|values| Sample::new(kx, ky, values.to_vec()))
            .ok_or(PathError::IncompletePath { kx, ky })
    }

    /// Pairs of the `kx × ky` product with no stored tuple, ky-major.
    pub fn missing_pairs(&self, kx: &Coordinates, ky: &Coordinates) -> Vec<(f64, f64)> {
        ky.iter()
            .flat_map(|y| kx.iter().map(move |x| (x, y)))
            .filter(|&(x, y)| !self.contains(x, y))
            .collect()
    }
}
