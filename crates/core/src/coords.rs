//! Canonical angular coordinates for the two phase-sweep axes.
//!
//! Eigenmode solvers report phase variations in radians, in the order they
//! were solved, and occasionally list the same variation twice. Everything
//! downstream wants unique, ascending degree values, so raw axis listings go
//! through [`normalize`] (irreducible half-zone) or [`normalize_full_range`]
//! (every solved variation) first.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::PathError;

/// π as used when converting solver radians back into degrees.
///
/// The solver formats its phase variables with this truncated constant, so
/// converting with the exact `std::f64::consts::PI` lands 180deg samples a
/// hair off the boundary. Thirteen significant digits is the minimum that
/// keeps 0deg and 180deg exact.
pub const PI_DEG_CONVERSION: f64 = 3.1415926535897;

/// Upper edge of the irreducible half-zone in degrees.
pub const IRREDUCIBLE_MAX_DEG: f64 = 180.0;

/// Dedup and range policy applied during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizePolicy {
    /// Values closer than this (in degrees) collapse into the smaller one.
    /// Zero keeps only exact duplicates out.
    pub dedup_tolerance: f64,
    /// Slack above [`IRREDUCIBLE_MAX_DEG`] still treated as inside the zone.
    pub upper_slack: f64,
}

impl Default for NormalizePolicy {
    fn default() -> Self {
        Self {
            dedup_tolerance: 0.0,
            upper_slack: 0.1,
        }
    }
}

/// Unique, strictly ascending coordinates in degrees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coordinates(Vec<f64>);

impl Coordinates {
    /// Build from degree values, sorting and dropping exact duplicates.
    pub fn from_degrees(values: &[f64]) -> Self {
        Self(sort_dedup(values.to_vec(), 0.0))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<f64> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<f64> {
        self.0.last().copied()
    }

    /// Subset that keeps the ordering invariant.
    pub fn filtered(&self, keep: impl Fn(f64) -> bool) -> Self {
        Self(self.0.iter().copied().filter(|&v| keep(v)).collect())
    }

    /// Contiguous slice `[start, end)` as its own coordinate set.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        Self(self.0[start..end].to_vec())
    }
}

/// Convert a solver radian value into degrees.
pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI_DEG_CONVERSION
}

/// Normalize a raw radian axis listing into the irreducible half-zone.
///
/// Fails only when `raw` is empty. A listing that has no value inside
/// `[0, 180 + slack]` yields an empty set; see [`normalize_irreducible`].
pub fn normalize(raw: &[f64], policy: &NormalizePolicy) -> Result<Coordinates, PathError> {
    if raw.is_empty() {
        return Err(PathError::EmptyInput);
    }
    let degrees: Vec<f64> = raw.iter().map(|&r| to_degrees(r)).collect();
    Ok(restrict(degrees, policy))
}

/// Like [`normalize`], but an empty result is an error.
pub fn normalize_irreducible(
    raw: &[f64],
    policy: &NormalizePolicy,
) -> Result<Coordinates, PathError> {
    let coords = normalize(raw, policy)?;
    if coords.is_empty() {
        return Err(PathError::NoIrreducibleSamples);
    }
    Ok(coords)
}

/// Convert, dedup and sort without restricting to the half-zone.
pub fn normalize_full_range(
    raw: &[f64],
    policy: &NormalizePolicy,
) -> Result<Coordinates, PathError> {
    if raw.is_empty() {
        return Err(PathError::EmptyInput);
    }
    let degrees: Vec<f64> = raw
        .iter()
        .map(|&r| to_degrees(r))
        .filter(|v| v.is_finite())
        .collect();
    Ok(Coordinates(sort_dedup(degrees, policy.dedup_tolerance)))
}

/// Apply the dedup/range/sort policy to values already in degrees.
pub fn normalize_degrees(
    values: &[f64],
    policy: &NormalizePolicy,
) -> Result<Coordinates, PathError> {
    if values.is_empty() {
        return Err(PathError::EmptyInput);
    }
    Ok(restrict(values.to_vec(), policy))
}

fn restrict(degrees: Vec<f64>, policy: &NormalizePolicy) -> Coordinates {
    let upper = IRREDUCIBLE_MAX_DEG + policy.upper_slack.max(0.0);
    let total = degrees.len();
    let inside: Vec<f64> = degrees
        .into_iter()
        .filter(|&v| (0.0..=upper).contains(&v))
        .collect();
    if inside.len() < total {
        debug!(
            "dropped {} of {} sweep values outside [0, {upper}] deg",
            total - inside.len(),
            total
        );
    }
    Coordinates(sort_dedup(inside, policy.dedup_tolerance))
}

fn sort_dedup(mut values: Vec<f64>, tolerance: f64) -> Vec<f64> {
    // -0.0 + 0.0 == +0.0, so the origin always prints as 0
    for v in values.iter_mut() {
        *v += 0.0;
    }
    values.sort_by(f64::total_cmp);
    let tol = tolerance.max(0.0);
    let mut out: Vec<f64> = Vec::with_capacity(values.len());
    for v in values {
        match out.last() {
            Some(&kept) if v - kept <= tol => {}
            _ => out.push(v),
        }
    }
    out
}
