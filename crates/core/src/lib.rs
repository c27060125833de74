//! Brillouin-zone path assembly for dual phase-sweep eigenmode data.
//!
//! - [`coords`]: canonical degree coordinates from raw solver listings
//! - [`path`]: ordered Γ → … → Γ walks for square and triangular lattices
//! - [`export`]: width-bounded chunking of a grid for field export
//! - [`provider`]: the seam to the external simulation data source
//! - [`output`]: CSV writers
//! - [`io`]: TOML job configuration

pub mod coords;
pub mod error;
pub mod export;
pub mod grid;
pub mod io;
pub mod lattice;
pub mod output;
pub mod path;
pub mod provider;

pub use coords::{Coordinates, NormalizePolicy, normalize, normalize_irreducible};
pub use error::PathError;
pub use export::{ExportChunk, split_for_export};
pub use grid::{Sample, SampleGrid};
pub use lattice::LatticeKind;
pub use path::{AssembledPath, PathSegment, assemble};
pub use provider::{MemoizedProvider, SampleProvider, SweepAxis};

#[cfg(test)]
mod _tests_export;
#[cfg(test)]
mod _tests_grid;
#[cfg(test)]
mod _tests_lattice;
#[cfg(test)]
mod _tests_output;
