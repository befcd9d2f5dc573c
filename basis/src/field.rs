//! Point sampling of scalar fields (orbitals, atoms, whole molecules).

use crate::cgto::AtomicOrbital;
use crate::error::{BasisError, Result};
use crate::helper::linspace;
use itertools::iproduct;
use nalgebra::{DMatrix, Vector3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A real function of position, in atomic units.
///
/// Grid evaluation is data parallel: every point is independent.
pub trait ScalarField: Sync {
    fn value(&self, x: f64, y: f64, z: f64) -> f64;

    fn value_at(&self, r: &Vector3<f64>) -> f64 {
        self.value(r.x, r.y, r.z)
    }

    /// Element-wise evaluation over same-length coordinate arrays.
    fn values(&self, xs: &[f64], ys: &[f64], zs: &[f64]) -> Result<Vec<f64>> {
        if xs.len() != ys.len() || xs.len() != zs.len() {
            return Err(BasisError::ShapeMismatch {
                x: xs.len(),
                y: ys.len(),
                z: zs.len(),
            });
        }
        Ok((0..xs.len())
            .into_par_iter()
            .map(|i| self.value(xs[i], ys[i], zs[i]))
            .collect())
    }

    fn values_at(&self, points: &[Vector3<f64>]) -> Vec<f64> {
        points.par_iter().map(|r| self.value_at(r)).collect()
    }
}

impl ScalarField for AtomicOrbital {
    fn value(&self, x: f64, y: f64, z: f64) -> f64 {
        self.evaluate(x, y, z)
    }
}

/// Orientation of a sampling slice, named by the axis it is normal to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plane {
    X,
    Y,
    Z,
}

impl Plane {
    fn point(&self, offset: f64, a: f64, b: f64) -> Vector3<f64> {
        match self {
            Plane::X => Vector3::new(offset, a, b),
            Plane::Y => Vector3::new(a, offset, b),
            Plane::Z => Vector3::new(a, b, offset),
        }
    }
}

/// Samples `field` on a `resolution` x `resolution` square slice normal to
/// `plane` at `offset`, spanning `bounds` along both in-plane axes.
///
/// Entry (i, j) holds the value at the i-th sample of the first in-plane axis
/// (y for `Plane::X`, x otherwise) and the j-th sample of the second.
pub fn sample_plane<F: ScalarField + ?Sized>(
    field: &F,
    plane: Plane,
    offset: f64,
    bounds: (f64, f64),
    resolution: usize,
) -> DMatrix<f64> {
    let axis = linspace(bounds.0, bounds.1, resolution);
    let points: Vec<Vector3<f64>> = iproduct!(axis.iter(), axis.iter())
        .map(|(&a, &b)| plane.point(offset, a, b))
        .collect();
    let values = field.values_at(&points);
    DMatrix::from_row_slice(resolution, resolution, &values)
}
