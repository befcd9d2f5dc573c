use crate::basis::BasisSet;
use crate::cgto::AtomicOrbital;
use crate::error::{BasisError, Result};
use crate::field::ScalarField;
use nalgebra::{DMatrix, Vector3};
use periodic_table_on_an_enum::Element;
use std::fmt;
use std::str::FromStr;

/// Bohr per angstrom.
pub const ANGSTROM_TO_BOHR: f64 = 1.8897261339213;

/// An atom at a fixed position (bohr) with the orbitals bound to it.
#[derive(Debug, Clone)]
pub struct Atom {
    symbol: &'static str,
    atomic_number: usize,
    name: &'static str,
    pub center: Vector3<f64>,
    orbitals: Vec<AtomicOrbital>,
}

impl Atom {
    pub fn new(symbol: &str, center: Vector3<f64>) -> Result<Self> {
        let element = Element::from_symbol(symbol)
            .ok_or_else(|| BasisError::UnknownElement(symbol.to_string()))?;
        Ok(Self {
            symbol: element.get_symbol(),
            atomic_number: element.get_atomic_number() as usize,
            name: element.get_name(),
            center,
            orbitals: Vec::new(),
        })
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn atomic_number(&self) -> usize {
        self.atomic_number
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Orbitals bound by the last basis-set application; empty before that.
    pub fn orbitals(&self) -> &[AtomicOrbital] {
        &self.orbitals
    }

    pub fn orbitals_mut(&mut self) -> &mut [AtomicOrbital] {
        &mut self.orbitals
    }
}

impl ScalarField for Atom {
    fn value(&self, x: f64, y: f64, z: f64) -> f64 {
        self.orbitals.iter().map(|ao| ao.evaluate(x, y, z)).sum()
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name())?;
        writeln!(
            f,
            "    position [{:.6}, {:.6}, {:.6}]",
            self.center.x, self.center.y, self.center.z
        )?;
        write!(f, "    orbitals")?;
        for ao in &self.orbitals {
            write!(f, "\n        {}", ao)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
}

impl FromStr for BondOrder {
    type Err = BasisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1" | "S" => Ok(BondOrder::Single),
            "2" | "D" => Ok(BondOrder::Double),
            "3" | "T" => Ok(BondOrder::Triple),
            "A" => Ok(BondOrder::Aromatic),
            _ => Err(BasisError::malformed(s, "unknown bond order")),
        }
    }
}

/// Atoms keyed by id in input order, plus bonds keyed by `"id1 id2"`.
#[derive(Debug, Clone)]
pub struct Molecule {
    atoms: Vec<(String, Atom)>,
    bonds: Vec<(String, BondOrder)>,
    n_electrons: usize,
}

impl Molecule {
    pub fn new(atoms: Vec<(String, Atom)>, bonds: Vec<(String, BondOrder)>) -> Result<Self> {
        for (i, (id, _)) in atoms.iter().enumerate() {
            if atoms[..i].iter().any(|(other, _)| other == id) {
                return Err(BasisError::DuplicateAtom(id.clone()));
            }
        }

        // A repeated key keeps its first position but takes the last order.
        let mut unique: Vec<(String, BondOrder)> = Vec::with_capacity(bonds.len());
        for (key, order) in bonds {
            match unique.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = order,
                None => unique.push((key, order)),
            }
        }
        let bonds = unique;

        for (key, _) in &bonds {
            let ids: Vec<&str> = key.split_whitespace().collect();
            if ids.len() != 2 {
                return Err(BasisError::malformed(key, "bond key must name two atom ids"));
            }
            if ids[0] == ids[1] {
                return Err(BasisError::malformed(key, "an atom cannot bond to itself"));
            }
            for id in ids {
                if !atoms.iter().any(|(atom_id, _)| atom_id == id) {
                    return Err(BasisError::UnknownBondAtom {
                        bond: key.clone(),
                        id: id.to_string(),
                    });
                }
            }
        }

        // Fixed at construction; charge is not taken into account.
        let n_electrons = atoms.iter().map(|(_, atom)| atom.atomic_number()).sum();

        Ok(Self {
            atoms,
            bonds,
            n_electrons,
        })
    }

    pub fn n_electrons(&self) -> usize {
        self.n_electrons
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter().map(|(_, atom)| atom)
    }

    pub fn atom(&self, id: &str) -> Option<&Atom> {
        self.atoms
            .iter()
            .find(|(atom_id, _)| atom_id == id)
            .map(|(_, atom)| atom)
    }

    pub fn atom_mut(&mut self, id: &str) -> Option<&mut Atom> {
        self.atoms
            .iter_mut()
            .find(|(atom_id, _)| atom_id == id)
            .map(|(_, atom)| atom)
    }

    pub fn atom_ids(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().map(|(id, _)| id.as_str())
    }

    /// All orbitals, atom by atom in input order.
    pub fn orbitals(&self) -> Vec<&AtomicOrbital> {
        self.atoms().flat_map(|atom| atom.orbitals()).collect()
    }

    /// Atom centres as an n x 3 matrix, one row per atom.
    pub fn coordinates(&self) -> DMatrix<f64> {
        let centers: Vec<Vector3<f64>> = self.atoms().map(|atom| atom.center).collect();
        DMatrix::from_fn(centers.len(), 3, |i, j| centers[i][j])
    }

    pub fn atom_types(&self) -> Vec<&'static str> {
        self.atoms().map(Atom::symbol).collect()
    }

    /// Bonds as zero-based atom index pairs, in bond input order.
    pub fn bonds(&self) -> Vec<(usize, usize)> {
        self.bonds
            .iter()
            .filter_map(|(key, _)| {
                let mut ids = key.split_whitespace();
                let first = self.index_of(ids.next()?)?;
                let second = self.index_of(ids.next()?)?;
                Some((first, second))
            })
            .collect()
    }

    pub fn bond_orders(&self) -> impl Iterator<Item = (&str, BondOrder)> {
        self.bonds.iter().map(|(key, order)| (key.as_str(), *order))
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.atoms.iter().position(|(atom_id, _)| atom_id == id)
    }

    /// Binds a copy of the element's orbital templates to every atom, centred
    /// on that atom. Previous orbitals are replaced.
    ///
    /// Fails if any atom's element is missing from `basis`; every atom is then
    /// left without orbitals.
    pub fn apply_basis_set(&mut self, basis: &BasisSet) -> Result<()> {
        match self.bind_orbitals(basis) {
            Ok(lists) => {
                for ((_, atom), orbitals) in self.atoms.iter_mut().zip(lists) {
                    atom.orbitals = orbitals;
                }
                Ok(())
            }
            Err(e) => {
                for (_, atom) in &mut self.atoms {
                    atom.orbitals.clear();
                }
                Err(e)
            }
        }
    }

    fn bind_orbitals(&self, basis: &BasisSet) -> Result<Vec<Vec<AtomicOrbital>>> {
        self.atoms()
            .map(|atom| {
                let templates = basis.templates(atom.symbol())?;
                Ok(templates
                    .iter()
                    .map(|template| template.clone().with_center(atom.center))
                    .collect::<Vec<_>>())
            })
            .collect()
    }
}

impl ScalarField for Molecule {
    fn value(&self, x: f64, y: f64, z: f64) -> f64 {
        self.atoms().map(|atom| atom.value(x, y, z)).sum()
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, atom) in self.atoms().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", atom)?;
        }
        Ok(())
    }
}
