//! Error types shared by the normalizer, the path assembler and the exporter.

use thiserror::Error;

/// Failures raised while turning sweep data into a path or export chunks.
///
/// Every variant is terminal for the operation that raised it; no partial
/// output is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("no sweep values were supplied")]
    EmptyInput,

    #[error("no samples fall inside the irreducible range [0deg, 180deg]")]
    NoIrreducibleSamples,

    #[error("grid has no sample at kx={kx}deg, ky={ky}deg")]
    IncompletePath { kx: f64, ky: f64 },

    #[error(
        "grid is missing {missing} solved variation(s); first missing at kx={kx}deg, ky={ky}deg"
    )]
    IncompleteGrid { missing: usize, kx: f64, ky: f64 },

    #[error("unrecognised lattice selector '{0}' (expected square or triangular)")]
    AmbiguousLattice(String),

    #[error("chunk width must be positive, got {0}")]
    ChunkBoundary(i64),

    #[error(
        "diagonal segment {segment} pairs {kx_len} kx value(s) with {ky_len} ky value(s)"
    )]
    AxisCardinalityMismatch {
        segment: &'static str,
        kx_len: usize,
        ky_len: usize,
    },

    #[error("sample at kx={kx}deg, ky={ky}deg carries {actual} value(s), grid expects {expected}")]
    ModeCountMismatch {
        kx: f64,
        ky: f64,
        expected: usize,
        actual: usize,
    },

    #[error("provider failed at kx={kx}deg, ky={ky}deg: {message}")]
    Provider { kx: f64, ky: f64, message: String },
}
