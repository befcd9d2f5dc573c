use crate::error::{BasisError, Result};

/// Parses a float written either in standard notation or with the Fortran
/// `D` exponent marker (`0.1543289673D+00`).
pub(crate) fn parse_fortran_float(token: &str) -> Result<f64> {
    let normalized = token.replace(['D', 'd'], "E");
    normalized
        .parse::<f64>()
        .map_err(|e| BasisError::malformed(token, format!("invalid number '{}': {}", token, e)))
}

pub(crate) fn is_numeric_token(token: &str) -> bool {
    parse_fortran_float(token).is_ok()
}

/// `n` evenly spaced samples over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let h = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * h).collect()
        }
    }
}

// Simpson's rule integration
#[cfg(test)]
pub(crate) fn simpson_integration<F>(f: F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let n = if n % 2 == 0 { n } else { n + 1 };
    let h = (b - a) / n as f64;

    let mut sum = f(a) + f(b);
    for i in 1..n {
        let x = a + i as f64 * h;
        sum += if i % 2 == 0 { 2.0 * f(x) } else { 4.0 * f(x) };
    }
    sum * h / 3.0
}

#[cfg(test)]
fn simpson_weight(i: usize, n: usize) -> f64 {
    if i == 0 || i == n {
        1.0
    } else if i % 2 == 1 {
        4.0
    } else {
        2.0
    }
}

/// Simpson's rule over the cube `[a, b]^3` with `n` (even) subdivisions per axis.
#[cfg(test)]
pub(crate) fn simpson_integration_3d<F>(f: F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64, f64, f64) -> f64 + Sync,
{
    use rayon::prelude::*;

    let n = if n % 2 == 0 { n } else { n + 1 };
    let h = (b - a) / n as f64;
    let coords: Vec<f64> = (0..=n).map(|i| a + i as f64 * h).collect();
    let weights: Vec<f64> = (0..=n).map(|i| simpson_weight(i, n)).collect();

    let sum: f64 = (0..=n)
        .into_par_iter()
        .map(|i| {
            let mut acc = 0.0;
            for j in 0..=n {
                for k in 0..=n {
                    acc += weights[i]
                        * weights[j]
                        * weights[k]
                        * f(coords[i], coords[j], coords[k]);
                }
            }
            acc
        })
        .sum();

    sum * h.powi(3) / 27.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fortran_float() {
        assert_eq!(parse_fortran_float("0.1543289673D+00").unwrap(), 0.1543289673);
        assert_eq!(parse_fortran_float("0.5484671660d+04").unwrap(), 5484.671660);
        assert_eq!(parse_fortran_float("-1.5E-01").unwrap(), -0.15);
        assert_eq!(parse_fortran_float("2.0").unwrap(), 2.0);
        assert!(parse_fortran_float("SP").is_err());
    }

    #[test]
    fn test_linspace() {
        let xs = linspace(-1.0, 1.0, 5);
        assert_eq!(xs, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
