//! Basis-set playground command-line interface
//!
//! Reads a molecule from a YAML configuration, retrieves its basis set and
//! binds the atomic orbitals to the atoms.

use color_eyre::eyre::Result;

mod app;
mod config;
mod io;

fn main() -> Result<()> {
    color_eyre::install()?;
    app::PlaygroundApplication::from_cli()?.run()
}
