//! Access to the external simulation data source.
//!
//! The core never drives a solver. It asks a [`SampleProvider`] for the axis
//! listings and for the value tuple at each pair it needs, and turns the
//! answers into a [`SampleGrid`].

use std::collections::HashMap;

use log::debug;

use crate::{
    coords::to_degrees,
    error::PathError,
    grid::{PairKey, SampleGrid},
};

/// Which phase-sweep variable an axis listing refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SweepAxis {
    X,
    Y,
}

/// Source of solved variations.
pub trait SampleProvider {
    /// Raw listing of the swept values for `axis`, in radians, in whatever
    /// order (and with whatever repeats) the solver reports.
    fn available(&self, axis: SweepAxis) -> Vec<f64>;

    /// Value tuple at `(kx, ky)` degrees.
    fn values(&mut self, kx: f64, ky: f64) -> Result<Vec<f64>, PathError>;
}

impl<P: SampleProvider + ?Sized> SampleProvider for &mut P {
    fn available(&self, axis: SweepAxis) -> Vec<f64> {
        (**self).available(axis)
    }

    fn values(&mut self, kx: f64, ky: f64) -> Result<Vec<f64>, PathError> {
        (**self).values(kx, ky)
    }
}

/// Caches every tuple fetched from the wrapped provider.
///
/// Path plans revisit corner pairs (the X→M end is the M→Γ start), so the
/// second request for a pair is served from the cache.
#[derive(Debug)]
pub struct MemoizedProvider<P> {
    inner: P,
    cache: HashMap<PairKey, Vec<f64>>,
    hits: usize,
}

impl<P: SampleProvider> MemoizedProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: HashMap::new(),
            hits: 0,
        }
    }

    /// Requests answered without consulting the wrapped provider.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Distinct pairs fetched from the wrapped provider.
    pub fn fetched(&self) -> usize {
        self.cache.len()
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: SampleProvider> SampleProvider for MemoizedProvider<P> {
    fn available(&self, axis: SweepAxis) -> Vec<f64> {
        self.inner.available(axis)
    }

    fn values(&mut self, kx: f64, ky: f64) -> Result<Vec<f64>, PathError> {
        let key = PairKey::new(kx, ky);
        if let Some(hit) = self.cache.get(&key) {
            self.hits += 1;
            return Ok(hit.clone());
        }
        let fetched = self.inner.values(kx, ky)?;
        self.cache.insert(key, fetched.clone());
        Ok(fetched)
    }
}

/// Provider backed by samples already held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryProvider {
    grid: SampleGrid,
    raw_x: Vec<f64>,
    raw_y: Vec<f64>,
}

impl InMemoryProvider {
    /// Build from `(kx_rad, ky_rad, values)` records as a solver reports them.
    ///
    /// Records are keyed by their degree conversion, so lookups with
    /// normalized coordinates hit exactly.
    pub fn from_radians(
        mode_count: usize,
        records: impl IntoIterator<Item = (f64, f64, Vec<f64>)>,
    ) -> Result<Self, PathError> {
        let mut grid = SampleGrid::new(mode_count);
        let mut raw_x = Vec::new();
        let mut raw_y = Vec::new();
        for (kx_rad, ky_rad, values) in records {
            raw_x.push(kx_rad);
            raw_y.push(ky_rad);
            grid.insert(to_degrees(kx_rad), to_degrees(ky_rad), values)?;
        }
        debug!(
            "in-memory provider holds {} variation(s), {} mode(s) each",
            grid.len(),
            mode_count
        );
        Ok(Self { grid, raw_x, raw_y })
    }

    /// Resolve lookups within `tolerance` degrees of a stored variation.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.grid = self.grid.with_tolerance(tolerance);
        self
    }

    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    pub fn mode_count(&self) -> usize {
        self.grid.mode_count()
    }
}

impl SampleProvider for InMemoryProvider {
    fn available(&self, axis: SweepAxis) -> Vec<f64> {
        match axis {
            SweepAxis::X => self.raw_x.clone(),
            SweepAxis::Y => self.raw_y.clone(),
        }
    }

    fn values(&mut self, kx: f64, ky: f64) -> Result<Vec<f64>, PathError> {
        self.grid
            .get(kx, ky)
            .map(<[f64]>::to_vec)
            .ok_or(PathError::IncompletePath { kx, ky })
    }
}

/// Fetch every listed pair from `provider` into a fresh grid.
///
/// Repeated pairs are fetched again unless the provider memoizes.
pub fn collect_grid<P: SampleProvider + ?Sized>(
    provider: &mut P,
    mode_count: usize,
    pairs: impl IntoIterator<Item = [f64; 2]>,
) -> Result<SampleGrid, PathError> {
    let mut grid = SampleGrid::new(mode_count);
    for [kx, ky] in pairs {
        let values = provider.values(kx, ky)?;
        grid.insert(kx, ky, values)?;
    }
    Ok(grid)
}
