//! Job configuration parsing.
//!
//! A job file holds a `[path]` table for dispersion path assembly, an
//! `[export]` table for segmented field export, or both.
//!
//! # File Format
//!
//! ```toml
//! [path]
//! output_name_base = "slab_"
//! lattice = "square"        # or "triangular", or the legacy 0 / 1
//! x_variable = "px"
//! y_variable = "py"
//! mode_count = 3
//! setup_index = 0
//!
//! [path.normalize]
//! dedup_tolerance = 0.0
//! upper_slack = 0.1
//!
//! [export]
//! output_name_base = "fields_"
//! points_file = "grid"
//! field_component = "E"
//! setup_label = "Setup1: LastAdaptive"
//! max_chunk_width = 5
//! ```

use std::{fmt, path::Path};

use serde::{Deserialize, Deserializer, Serialize};

use crate::{coords::NormalizePolicy, error::PathError, lattice::LatticeKind};

// ============================================================================
// Lattice selector
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum LatticeSelector {
    Index(i64),
    Name(String),
}

fn deserialize_lattice<'de, D>(deserializer: D) -> Result<LatticeKind, D::Error>
where
    D: Deserializer<'de>,
{
    let selector = LatticeSelector::deserialize(deserializer)?;
    let parsed = match selector {
        LatticeSelector::Index(index) => LatticeKind::from_index(index),
        LatticeSelector::Name(name) => name.parse(),
    };
    parsed.map_err(serde::de::Error::custom)
}

// ============================================================================
// Path job
// ============================================================================

/// Settings for assembling one dispersion path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathJobConfig {
    /// Prefix for every file the job writes.
    #[serde(default)]
    pub output_name_base: String,
    #[serde(
        default = "default_lattice",
        deserialize_with = "deserialize_lattice"
    )]
    pub lattice: LatticeKind,
    /// Name of the x phase-sweep variable.
    #[serde(default = "default_x_variable")]
    pub x_variable: String,
    /// Name of the y phase-sweep variable.
    #[serde(default = "default_y_variable")]
    pub y_variable: String,
    /// Number of modes (value columns) to carry per sample.
    #[serde(default = "default_mode_count")]
    pub mode_count: usize,
    /// Zero-based solver setup the samples came from.
    #[serde(default)]
    pub setup_index: usize,
    #[serde(default)]
    pub normalize: NormalizePolicy,
}

fn default_lattice() -> LatticeKind {
    LatticeKind::Square
}

fn default_x_variable() -> String {
    "px".to_string()
}

fn default_y_variable() -> String {
    "py".to_string()
}

fn default_mode_count() -> usize {
    3
}

impl Default for PathJobConfig {
    fn default() -> Self {
        Self {
            output_name_base: String::new(),
            lattice: default_lattice(),
            x_variable: default_x_variable(),
            y_variable: default_y_variable(),
            mode_count: default_mode_count(),
            setup_index: 0,
            normalize: NormalizePolicy::default(),
        }
    }
}

impl PathJobConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mode_count == 0 {
            return Err(ConfigError::Invalid("path mode_count must be at least 1".into()));
        }
        validate_policy(&self.normalize)?;
        Ok(())
    }
}

// ============================================================================
// Export job
// ============================================================================

/// Field quantity requested from the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FieldComponent {
    #[default]
    E,
    H,
}

impl fmt::Display for FieldComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldComponent::E => write!(f, "E"),
            FieldComponent::H => write!(f, "H"),
        }
    }
}

/// Settings for splitting a field sweep into chunked outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportJobConfig {
    #[serde(default)]
    pub output_name_base: String,
    /// Spatial points file, without its `.pts` extension.
    #[serde(default = "default_points_file")]
    pub points_file: String,
    #[serde(default)]
    pub field_component: FieldComponent,
    #[serde(default = "default_setup_label")]
    pub setup_label: String,
    /// Secondary-axis values per output chunk.
    #[serde(default = "default_max_chunk_width")]
    pub max_chunk_width: i64,
    #[serde(default)]
    pub normalize: NormalizePolicy,
}

fn default_points_file() -> String {
    "grid".to_string()
}

fn default_setup_label() -> String {
    "Setup1: LastAdaptive".to_string()
}

fn default_max_chunk_width() -> i64 {
    5
}

impl Default for ExportJobConfig {
    fn default() -> Self {
        Self {
            output_name_base: String::new(),
            points_file: default_points_file(),
            field_component: FieldComponent::default(),
            setup_label: default_setup_label(),
            max_chunk_width: default_max_chunk_width(),
            normalize: NormalizePolicy::default(),
        }
    }
}

impl ExportJobConfig {
    pub fn points_file_name(&self) -> String {
        format!("{}.pts", self.points_file)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chunk_width <= 0 {
            return Err(PathError::ChunkBoundary(self.max_chunk_width).into());
        }
        validate_policy(&self.normalize)?;
        Ok(())
    }
}

fn validate_policy(policy: &NormalizePolicy) -> Result<(), ConfigError> {
    if policy.dedup_tolerance.is_nan() || policy.dedup_tolerance < 0.0 {
        return Err(ConfigError::Invalid(
            "normalize.dedup_tolerance must be non-negative".into(),
        ));
    }
    if policy.upper_slack.is_nan() || policy.upper_slack < 0.0 {
        return Err(ConfigError::Invalid(
            "normalize.upper_slack must be non-negative".into(),
        ));
    }
    Ok(())
}

// ============================================================================
// Job file
// ============================================================================

/// A complete job file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobFile {
    #[serde(default)]
    pub path: Option<PathJobConfig>,
    #[serde(default)]
    pub export: Option<ExportJobConfig>,
}

impl JobFile {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let job: JobFile = toml::from_str(s)?;
        job.validate()?;
        Ok(job)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.is_none() && self.export.is_none() {
            return Err(ConfigError::Empty);
        }
        if let Some(path) = &self.path {
            path.validate()?;
        }
        if let Some(export) = &self.export {
            export.validate()?;
        }
        Ok(())
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("job file has neither a [path] nor an [export] table")]
    Empty,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Path(#[from] PathError),
}
