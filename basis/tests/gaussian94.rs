//! End-to-end checks over gaussian94 files as served by the basis set exchange.

use basis::{
    parse_gaussian94, Atom, BasisError, BondOrder, Molecule, OrbitalType, ScalarField,
    ANGSTROM_TO_BOHR,
};
use nalgebra::Vector3;
use std::fs;
use std::path::PathBuf;

fn basis_path(filename: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("basis_sets")
        .join(filename)
}

fn read_basis(filename: &str) -> String {
    fs::read_to_string(basis_path(filename)).unwrap()
}

fn water() -> Molecule {
    let angstrom = |x: f64, y: f64, z: f64| Vector3::new(x, y, z) * ANGSTROM_TO_BOHR;
    let atoms = vec![
        ("a1".to_string(), Atom::new("O", angstrom(0.0, 0.0, 0.1173)).unwrap()),
        ("a2".to_string(), Atom::new("H", angstrom(0.0, 0.7572, -0.4692)).unwrap()),
        ("a3".to_string(), Atom::new("H", angstrom(0.0, -0.7572, -0.4692)).unwrap()),
    ];
    let bonds = vec![
        ("a1 a2".to_string(), BondOrder::Single),
        ("a1 a3".to_string(), BondOrder::Single),
    ];
    Molecule::new(atoms, bonds).unwrap()
}

#[test]
fn test_631g_star_water() {
    let doc = parse_gaussian94("6-31G*", &read_basis("6-31g_star.gaussian94")).unwrap();
    assert!(doc.header.iter().any(|line| line.contains("Basis set: 6-31G*")));
    assert_eq!(doc.basis.elements(), vec!["H", "O"]);

    // H: two S shells; O: S + 2 x SP + D
    assert_eq!(doc.basis.get("H").unwrap().len(), 2);
    let oxygen = doc.basis.get("O").unwrap();
    assert_eq!(oxygen.len(), 1 + 4 + 4 + 6);
    assert_eq!(oxygen[0].contraction_length(), 6);
    assert_eq!(oxygen[0].exponents()[0], 5484.671660);
    assert_eq!(oxygen[14].orbital_type, OrbitalType::Dzx);

    let mut water = water();
    water.apply_basis_set(&doc.basis).unwrap();
    assert_eq!(water.n_electrons(), 10);
    assert_eq!(water.orbitals().len(), 19);

    let h = water.atom("a2").unwrap();
    assert!(h.orbitals().iter().all(|ao| ao.center == h.center));

    // the total field is the sum of all orbital values
    let r = Vector3::new(0.1, 0.4, -0.3);
    let total: f64 = water.orbitals().iter().map(|ao| ao.value_at(&r)).sum();
    assert!((water.value_at(&r) - total).abs() < 1e-10);
}

#[test]
fn test_basis_with_f_shell_is_rejected() {
    let err = parse_gaussian94("cc-pVDZ", &read_basis("cc-pvdz.C.gaussian94")).unwrap_err();
    match err {
        BasisError::UnsupportedShell { element, shell } => {
            assert_eq!(element, "C");
            assert_eq!(shell, "F");
        }
        other => panic!("expected unsupported shell error, got {:?}", other),
    }
}

#[test]
fn test_missing_element_after_parse() {
    let doc = parse_gaussian94("6-31G*", &read_basis("6-31g_star.gaussian94")).unwrap();
    let atoms = vec![
        ("c1".to_string(), Atom::new("C", Vector3::zeros()).unwrap()),
        ("o1".to_string(), Atom::new("O", Vector3::new(2.13, 0.0, 0.0)).unwrap()),
    ];
    let mut co = Molecule::new(atoms, vec![("c1 o1".to_string(), BondOrder::Triple)]).unwrap();
    let err = co.apply_basis_set(&doc.basis).unwrap_err();
    assert!(matches!(err, BasisError::MissingElement { ref symbol, .. } if symbol == "C"));
    assert!(err.to_string().contains("6-31G*"));
    assert!(co.orbitals().is_empty());
}
