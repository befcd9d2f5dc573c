use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// One-dimensional unnormalised Gaussian primitive `(v - c)^l exp(-alpha (v - c)^2)`.
///
/// A Cartesian primitive is the product of three of these, one per axis.
#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq)]
pub struct GTO1d {
    pub alpha: f64,
    pub l: i32,
    pub center: f64,
}

fn factorial(n: i32) -> f64 {
    (1..=n).fold(1.0, |acc, x| acc * x as f64)
}

impl GTO1d {
    pub fn new(alpha: f64, l: i32, center: f64) -> Self {
        Self { alpha, l, center }
    }

    pub fn evaluate(&self, v: f64) -> f64 {
        let x = v - self.center;
        // powi(0) is 1 even at x == 0
        x.powi(self.l) * (-self.alpha * x * x).exp()
    }

    pub fn evaluate_many(&self, vs: &[f64]) -> Vec<f64> {
        vs.iter().map(|&v| self.evaluate(v)).collect()
    }

    /// Normalisation constant of the 1-D primitive:
    /// N^2 = (2^(3l) * l! * alpha^l * sqrt(2 alpha / pi)) / (2l)!
    pub fn norm(alpha: f64, l: i32) -> f64 {
        let numerator = 2.0_f64.powi(3 * l) * factorial(l) * alpha.powi(l);
        let factor = (2.0 * alpha / PI).sqrt();
        (numerator * factor / factorial(2 * l)).sqrt()
    }
}
