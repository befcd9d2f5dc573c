mod basis;
mod geometry;
mod sampling;

pub use self::basis::{select_loader, BasisLoader};
pub use self::geometry::build_molecule;
pub use self::sampling::run_sampling;

use crate::config::{Args, Config};
use crate::io::setup_output;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use tracing::{error, info, warn};

pub struct PlaygroundApplication {
    args: Args,
    config: Config,
}

impl PlaygroundApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(&args)?;
        Ok(Self { args, config })
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.output.as_ref(), self.args.verbose)?;
        info!("Read configuration from: {}", self.args.config_file);

        let mut molecule = build_molecule(&self.config)?;
        let basis_name = self
            .args
            .basis_set
            .clone()
            .or_else(|| self.config.basis_set.clone())
            .unwrap_or_else(|| "6-31G*".to_string());

        info!("Retrieving basis set {}...", basis_name);
        let loader = select_loader(&self.config, self.args.basis_file.as_deref(), self.args.offline)?;
        let doc = match loader.load(&basis_name, &molecule) {
            Ok(doc) => doc,
            Err(e) => {
                error!("{:#}", e);
                self.coverage_hint(&basis_name);
                return Err(e);
            }
        };
        for line in &doc.header {
            info!("{}", line);
        }

        if let Err(e) = molecule.apply_basis_set(&doc.basis) {
            error!("{}", e);
            self.coverage_hint(&basis_name);
            return Err(e).wrap_err("Failed to apply basis set to molecule");
        }
        info!("Applied basis set to molecule");
        for line in molecule.to_string().lines() {
            info!("{}", line);
        }
        info!(
            "{} atomic orbitals for {} electrons",
            molecule.orbitals().len(),
            molecule.n_electrons()
        );

        if let Some(sample) = &self.config.sample {
            run_sampling(&molecule, sample)?;
        }

        Ok(())
    }

    fn coverage_hint(&self, basis_name: &str) {
        warn!(
            "You're likely seeing this error because an atom from '{}' is not defined in the basis set '{}'. For more details see https://www.basissetexchange.org/",
            self.args.config_file, basis_name
        );
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let config_content = fs::read_to_string(&args.config_file)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", args.config_file))?;

    let config = serde_yml::from_str::<Config>(&config_content)
        .wrap_err("Failed to parse configuration file")?
        .with_defaults();

    Ok(config)
}
