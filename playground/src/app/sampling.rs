use crate::config::SampleParams;
use crate::io::write_plane;
use ::basis::{sample_plane, Molecule, Plane, ScalarField};
use color_eyre::eyre::{eyre, Result, WrapErr};
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

/// Sample the molecule (or one of its orbitals) on the configured slice.
pub fn run_sampling(molecule: &Molecule, params: &SampleParams) -> Result<()> {
    let params = params.clone().with_defaults();
    let plane = params.plane.unwrap_or(Plane::Z);
    let offset = params.offset.unwrap_or(0.0);
    let bounds = params.bounds.unwrap_or([-5.0, 5.0]);
    let resolution = params.resolution.unwrap_or(100);

    let orbitals = molecule.orbitals();
    let field: &dyn ScalarField = match params.orbital {
        Some(index) => *orbitals.get(index).ok_or_else(|| {
            eyre!(
                "Orbital index {} out of range: the molecule has {} orbitals",
                index,
                orbitals.len()
            )
        })?,
        None => molecule,
    };

    info!(
        "Sampling {} on a {}x{} slice normal to {:?} at {:.4} bohr",
        params
            .orbital
            .map(|i| format!("orbital {} ({})", i, orbitals[i]))
            .unwrap_or_else(|| "molecule".to_string()),
        resolution,
        resolution,
        plane,
        offset
    );
    let values = sample_plane(field, plane, offset, (bounds[0], bounds[1]), resolution);
    info!("Sampled range: [{:.6e}, {:.6e}]", values.min(), values.max());

    if let Some(path) = &params.output {
        let file = File::create(path).wrap_err_with(|| format!("Unable to create sample file: {}", path))?;
        let mut writer = BufWriter::new(file);
        write_plane(&mut writer, &values, plane, offset, bounds)?;
        info!("Samples written to: {}", path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::basis::{Atom, AtomicOrbital, BasisSet, OrbitalType};
    use nalgebra::Vector3;
    use std::fs;

    fn hydrogen() -> Molecule {
        let atom = Atom::new("H", Vector3::zeros()).unwrap();
        let mut molecule = Molecule::new(vec![("a1".to_string(), atom)], vec![]).unwrap();
        let s = AtomicOrbital::new(OrbitalType::S, vec![1.0], vec![1.0]).unwrap();
        molecule
            .apply_basis_set(&BasisSet::new("toy", vec![("H".to_string(), vec![s])]))
            .unwrap();
        molecule
    }

    #[test]
    fn test_run_sampling_writes_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slice.dat");
        let params = SampleParams {
            plane: Some(Plane::Y),
            offset: None,
            bounds: Some([-1.0, 1.0]),
            resolution: Some(3),
            orbital: Some(0),
            output: Some(path.to_string_lossy().into_owned()),
        };
        run_sampling(&hydrogen(), &params).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2 + 9);
        assert!(text.contains("0.000000 0.000000 1.0000000000e0"));
    }

    #[test]
    fn test_run_sampling_rejects_bad_orbital() {
        let params = SampleParams {
            orbital: Some(3),
            ..SampleParams::default()
        };
        assert!(run_sampling(&hydrogen(), &params).is_err());
    }
}
