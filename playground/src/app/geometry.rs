use crate::config::{Config, LengthUnit};
use ::basis::{Atom, BondOrder, Molecule, ANGSTROM_TO_BOHR};
use color_eyre::eyre::{Result, WrapErr};
use nalgebra::Vector3;
use tracing::{debug, info};

/// Build the molecule defined in the YAML configuration, in atomic units.
pub fn build_molecule(config: &Config) -> Result<Molecule> {
    info!("Preparing geometry...");

    let scale = match config.geometry.units {
        LengthUnit::Angstrom => ANGSTROM_TO_BOHR,
        LengthUnit::Bohr => 1.0,
    };

    let mut atoms = Vec::with_capacity(config.geometry.atoms.len());
    for (i, atom) in config.geometry.atoms.iter().enumerate() {
        let id = atom.id.clone().unwrap_or_else(|| format!("a{}", i + 1));
        let center = Vector3::new(atom.coords[0], atom.coords[1], atom.coords[2]) * scale;
        let parsed = Atom::new(&atom.element, center)
            .wrap_err_with(|| format!("Invalid atom '{}'", id))?;
        atoms.push((id, parsed));
    }

    let mut bonds = Vec::with_capacity(config.geometry.bonds.len());
    for bond in &config.geometry.bonds {
        let key = format!("{} {}", bond.atoms[0], bond.atoms[1]);
        let order = bond
            .order
            .as_deref()
            .unwrap_or("1")
            .parse::<BondOrder>()
            .wrap_err_with(|| format!("Invalid order for bond '{}'", key))?;
        bonds.push((key, order));
    }

    let molecule = Molecule::new(atoms, bonds).wrap_err("Invalid molecular geometry")?;
    info!(
        "Parsed geometry: {} atoms, {} electrons",
        molecule.len(),
        molecule.n_electrons()
    );
    for (key, order) in molecule.bond_orders() {
        debug!("Bond {}: {:?}", key, order);
    }
    Ok(molecule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yaml: &str) -> Config {
        serde_yml::from_str::<Config>(yaml).unwrap().with_defaults()
    }

    #[test]
    fn test_build_molecule_converts_units() {
        let config = config(
            "geometry:\n  atoms:\n    - element: O\n      coords: [0.0, 0.0, 1.0]\n    - element: H\n      coords: [1.0, 0.0, 0.0]\n    - element: H\n      coords: [-1.0, 0.0, 0.0]\n  bonds:\n    - atoms: [a1, a3]\n      order: \"1\"\n",
        );
        let molecule = build_molecule(&config).unwrap();
        assert_eq!(molecule.n_electrons(), 10);
        assert_eq!(molecule.atom_ids().collect::<Vec<_>>(), vec!["a1", "a2", "a3"]);
        assert_eq!(molecule.bonds(), vec![(0, 2)]);
        assert_eq!(molecule.coordinates()[(0, 2)], ANGSTROM_TO_BOHR);
    }

    #[test]
    fn test_build_molecule_in_bohr() {
        let config = config(
            "geometry:\n  units: bohr\n  atoms:\n    - id: h1\n      element: H\n      coords: [0.0, 0.0, 0.7]\n",
        );
        let molecule = build_molecule(&config).unwrap();
        assert_eq!(molecule.atom("h1").unwrap().center.z, 0.7);
    }

    #[test]
    fn test_build_molecule_rejects_bad_input() {
        let unknown = config("geometry:\n  atoms:\n    - element: Qq\n      coords: [0.0, 0.0, 0.0]\n");
        assert!(build_molecule(&unknown).is_err());

        let dangling = config(
            "geometry:\n  atoms:\n    - element: H\n      coords: [0.0, 0.0, 0.0]\n  bonds:\n    - atoms: [a1, a2]\n",
        );
        assert!(build_molecule(&dangling).is_err());
    }
}
