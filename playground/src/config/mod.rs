//! Configuration management
//!
//! This module handles the YAML configuration structures and their defaults.

mod args;

pub use args::Args;

use basis::Plane;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub basis_set: Option<String>,
    /// Local gaussian94 file used instead of the exchange
    pub basis_file: Option<String>,
    /// JSON file the retrieved basis set is cached in
    pub basis_cache: Option<String>,
    pub geometry: GeometryConfig,
    pub exchange: Option<ExchangeParams>,
    pub sample: Option<SampleParams>,
}

impl Config {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        if self.basis_set.is_none() {
            self.basis_set = Some("6-31G*".to_string());
        }
        self.exchange = Some(self.exchange.take().unwrap_or_default().with_defaults());
        self.sample = self.sample.take().map(SampleParams::with_defaults);
        self
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Angstrom,
    Bohr,
}

/// Molecular geometry: atoms in input order and bonds between them
#[derive(Debug, Deserialize, Serialize)]
pub struct GeometryConfig {
    #[serde(default)]
    pub units: LengthUnit,
    pub atoms: Vec<AtomConfig>,
    #[serde(default)]
    pub bonds: Vec<BondConfig>,
}

/// Atomic position configuration
#[derive(Debug, Deserialize, Serialize)]
pub struct AtomConfig {
    /// Unique id, defaults to `a1`, `a2`, ... by position
    pub id: Option<String>,
    pub element: String,
    pub coords: [f64; 3],
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BondConfig {
    pub atoms: [String; 2],
    /// Bond order code: 1, 2, 3 or A (default 1)
    pub order: Option<String>,
}

/// Basis Set Exchange connection parameters
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeParams {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub retries: Option<usize>,
}

impl Default for ExchangeParams {
    fn default() -> Self {
        ExchangeParams {
            url: Some(basis::exchange::DEFAULT_URL.to_string()),
            timeout_secs: Some(basis::exchange::DEFAULT_TIMEOUT.as_secs()),
            retries: Some(1),
        }
    }
}

impl ExchangeParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.url.is_none() {
            self.url = defaults.url;
        }
        if self.timeout_secs.is_none() {
            self.timeout_secs = defaults.timeout_secs;
        }
        if self.retries.is_none() {
            self.retries = defaults.retries;
        }
        self
    }
}

/// Field sampling on a square slice through the molecule
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SampleParams {
    pub plane: Option<Plane>,
    pub offset: Option<f64>,
    pub bounds: Option<[f64; 2]>,
    pub resolution: Option<usize>,
    /// Index into the molecule's orbital list; the whole molecule when absent
    pub orbital: Option<usize>,
    pub output: Option<String>,
}

impl Default for SampleParams {
    fn default() -> Self {
        SampleParams {
            plane: Some(Plane::Z),
            offset: Some(0.0),
            bounds: Some([-5.0, 5.0]),
            resolution: Some(100),
            orbital: None,
            output: None,
        }
    }
}

impl SampleParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.plane.is_none() {
            self.plane = defaults.plane;
        }
        if self.offset.is_none() {
            self.offset = defaults.offset;
        }
        if self.bounds.is_none() {
            self.bounds = defaults.bounds;
        }
        if self.resolution.is_none() {
            self.resolution = defaults.resolution;
        }
        self
    }
}
