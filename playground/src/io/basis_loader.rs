//! Basis set loading utilities

use basis::{parse_gaussian94, BasisSetExchange, Gaussian94Document};
use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read a gaussian94 basis set from a local file
pub fn read_basis_file(path: &Path, basis_name: &str) -> Result<Gaussian94Document> {
    debug!("Loading basis set from local file: {}", path.display());
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read local basis set file: {}", path.display()))?;
    parse_gaussian94(basis_name, &text)
        .wrap_err_with(|| format!("Failed to parse basis set file: {}", path.display()))
}

/// Fetch a basis set for the given atomic numbers from the basis set exchange
pub fn download_basis(
    exchange: &BasisSetExchange,
    basis_name: &str,
    atomic_numbers: &[usize],
) -> Result<Gaussian94Document> {
    debug!("URL: {}", exchange.url(basis_name, atomic_numbers));
    let doc = exchange
        .get_basis_set(basis_name, atomic_numbers)
        .wrap_err_with(|| format!("Failed to retrieve basis set '{}'", basis_name))?;
    debug!("Parsed basis set for {} elements", doc.basis.len());
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_basis_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "! STO-3G\n\nH     0\nS    3   1.00\n      0.3425250914D+01       0.1543289673D+00\n      0.6239137298D+00       0.5353281423D+00\n      0.1688554040D+00       0.4446345422D+00\n****").unwrap();
        let doc = read_basis_file(file.path(), "STO-3G").unwrap();
        assert_eq!(doc.header, vec![" STO-3G"]);
        assert_eq!(doc.basis.elements(), vec!["H"]);
    }

    #[test]
    fn test_read_missing_file() {
        assert!(read_basis_file(Path::new("does/not/exist.gbs"), "STO-3G").is_err());
    }
}
