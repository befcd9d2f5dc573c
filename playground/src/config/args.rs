//! Command-line argument parsing

use clap::{ArgAction, Parser};

/// Retrieves basis sets from the Basis Set Exchange and binds them to a molecule
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "playground/example/water.yaml")]
    pub config_file: String,

    /// Override the basis set name, e.g. 6-31G* (see https://www.basissetexchange.org/)
    #[arg(short, long)]
    pub basis_set: Option<String>,

    /// Read the basis set from a local gaussian94 file instead of the exchange
    #[arg(long)]
    pub basis_file: Option<String>,

    /// Override output file: (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Verbose logs (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Never contact the basis set exchange
    #[arg(long)]
    pub offline: bool,
}
