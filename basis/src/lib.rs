//! Gaussian-type orbital basis sets: gaussian94 parsing, molecular basis
//! assembly and point evaluation of the resulting orbitals.

pub mod basis;
pub mod cgto;
pub mod error;
pub mod exchange;
pub mod field;
pub mod gto;
mod helper;
pub mod molecule;


pub use basis::{parse_element_block, parse_gaussian94, BasisSet, Gaussian94Document, ShellKind};
pub use cgto::{AtomicOrbital, OrbitalType};
pub use error::{BasisError, Result};
pub use exchange::BasisSetExchange;
pub use field::{sample_plane, Plane, ScalarField};
pub use gto::GTO1d;
pub use helper::linspace;
pub use molecule::{Atom, BondOrder, Molecule, ANGSTROM_TO_BOHR};
