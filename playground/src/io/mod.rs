//! Input/Output operations
//!
//! This module handles logging setup, basis set loading and sample output.

mod basis_loader;
mod output;

pub use basis_loader::{download_basis, read_basis_file};
pub use output::{setup_output, write_plane};
