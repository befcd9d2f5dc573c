/* Contracted Cartesian Gaussian-type orbitals (atomic orbitals),
   built from the one-dimensional primitives in gto.rs.
*/

use crate::error::{BasisError, Result};
use crate::gto::GTO1d;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cartesian component of a shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrbitalType {
    S,
    Px,
    Py,
    Pz,
    Dx2,
    Dy2,
    Dz2,
    Dxy,
    Dyz,
    Dzx,
}

impl OrbitalType {
    pub const ALL: [OrbitalType; 10] = [
        OrbitalType::S,
        OrbitalType::Px,
        OrbitalType::Py,
        OrbitalType::Pz,
        OrbitalType::Dx2,
        OrbitalType::Dy2,
        OrbitalType::Dz2,
        OrbitalType::Dxy,
        OrbitalType::Dyz,
        OrbitalType::Dzx,
    ];

    /// Cartesian exponents (l, m, n) of x, y and z.
    pub fn angular(&self) -> Vector3<i32> {
        match self {
            OrbitalType::S => Vector3::new(0, 0, 0),
            OrbitalType::Px => Vector3::new(1, 0, 0),
            OrbitalType::Py => Vector3::new(0, 1, 0),
            OrbitalType::Pz => Vector3::new(0, 0, 1),
            OrbitalType::Dx2 => Vector3::new(2, 0, 0),
            OrbitalType::Dy2 => Vector3::new(0, 2, 0),
            OrbitalType::Dz2 => Vector3::new(0, 0, 2),
            OrbitalType::Dxy => Vector3::new(1, 1, 0),
            OrbitalType::Dyz => Vector3::new(0, 1, 1),
            OrbitalType::Dzx => Vector3::new(1, 0, 1),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrbitalType::S => "S",
            OrbitalType::Px => "Px",
            OrbitalType::Py => "Py",
            OrbitalType::Pz => "Pz",
            OrbitalType::Dx2 => "Dx2",
            OrbitalType::Dy2 => "Dy2",
            OrbitalType::Dz2 => "Dz2",
            OrbitalType::Dxy => "Dxy",
            OrbitalType::Dyz => "Dyz",
            OrbitalType::Dzx => "Dzx",
        }
    }
}

impl fmt::Display for OrbitalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrbitalType {
    type Err = BasisError;

    fn from_str(s: &str) -> Result<Self> {
        OrbitalType::ALL
            .iter()
            .copied()
            .find(|t| t.label() == s)
            .ok_or_else(|| BasisError::InvalidOrbital(format!("unknown orbital type '{}'", s)))
    }
}

/// A contracted Cartesian GTO: `sum_i c_i * x^l y^m z^n exp(-alpha_i r^2)` about `center`.
///
/// Templates produced by the parser sit at the origin; the molecule assigns
/// each copy the centre of the atom that owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicOrbital {
    pub orbital_type: OrbitalType,
    exponents: Vec<f64>,
    coefficients: Vec<f64>,
    pub center: Vector3<f64>,
}

impl AtomicOrbital {
    pub fn new(orbital_type: OrbitalType, exponents: Vec<f64>, coefficients: Vec<f64>) -> Result<Self> {
        if exponents.is_empty() {
            return Err(BasisError::InvalidOrbital(format!(
                "{} orbital has an empty contraction",
                orbital_type
            )));
        }
        if exponents.len() != coefficients.len() {
            return Err(BasisError::InvalidOrbital(format!(
                "{} orbital has {} exponents but {} coefficients",
                orbital_type,
                exponents.len(),
                coefficients.len()
            )));
        }
        if let Some(alpha) = exponents.iter().find(|a| !(a.is_finite() && **a > 0.0)) {
            return Err(BasisError::InvalidOrbital(format!(
                "{} orbital has non-positive exponent {}",
                orbital_type, alpha
            )));
        }
        Ok(Self {
            orbital_type,
            exponents,
            coefficients,
            center: Vector3::zeros(),
        })
    }

    pub fn with_center(mut self, center: Vector3<f64>) -> Self {
        self.center = center;
        self
    }

    pub fn contraction_length(&self) -> usize {
        self.exponents.len()
    }

    pub fn angular(&self) -> Vector3<i32> {
        self.orbital_type.angular()
    }

    pub fn exponents(&self) -> &[f64] {
        &self.exponents
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn coefficients_mut(&mut self) -> &mut [f64] {
        &mut self.coefficients
    }

    fn primitives(&self, alpha: f64) -> [GTO1d; 3] {
        let l_xyz = self.angular();
        [
            GTO1d::new(alpha, l_xyz.x, self.center.x),
            GTO1d::new(alpha, l_xyz.y, self.center.y),
            GTO1d::new(alpha, l_xyz.z, self.center.z),
        ]
    }

    /// Unnormalised value at (x, y, z).
    pub fn evaluate(&self, x: f64, y: f64, z: f64) -> f64 {
        self.exponents
            .iter()
            .zip(&self.coefficients)
            .map(|(&alpha, &c)| {
                let [gx, gy, gz] = self.primitives(alpha);
                c * gx.evaluate(x) * gy.evaluate(y) * gz.evaluate(z)
            })
            .sum()
    }

    /// Value with every primitive normalised, the convention basis-set
    /// libraries publish contraction coefficients in.
    pub fn normalized_value(&self, x: f64, y: f64, z: f64) -> f64 {
        let l_xyz = self.angular();
        self.exponents
            .iter()
            .zip(&self.coefficients)
            .map(|(&alpha, &c)| {
                let norm = GTO1d::norm(alpha, l_xyz.x)
                    * GTO1d::norm(alpha, l_xyz.y)
                    * GTO1d::norm(alpha, l_xyz.z);
                let [gx, gy, gz] = self.primitives(alpha);
                norm * c * gx.evaluate(x) * gy.evaluate(y) * gz.evaluate(z)
            })
            .sum()
    }
}

impl fmt::Display for AtomicOrbital {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Atomic Orbital, type {}>", self.orbital_type)
    }
}
