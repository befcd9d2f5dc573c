use crate::config::{Config, ExchangeParams};
use crate::io::{download_basis, read_basis_file};
use ::basis::{BasisSetExchange, Gaussian94Document, Molecule};
use color_eyre::eyre::{eyre, Result, WrapErr};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Source of basis sets; implemented for the exchange, local files and caches.
pub trait BasisLoader {
    fn load(&self, basis_name: &str, molecule: &Molecule) -> Result<Gaussian94Document>;
}

/// Loader backed by the Basis Set Exchange REST API.
pub struct ExchangeLoader {
    exchange: BasisSetExchange,
}

impl ExchangeLoader {
    pub fn new(params: &ExchangeParams) -> Result<Self> {
        let params = params.clone().with_defaults();
        let url = params.url.as_deref().unwrap_or(::basis::exchange::DEFAULT_URL);
        let timeout = params
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(::basis::exchange::DEFAULT_TIMEOUT);
        let exchange = BasisSetExchange::with_options(url, timeout, params.retries.unwrap_or(1))
            .wrap_err("Failed to build basis set exchange client")?;
        Ok(Self { exchange })
    }
}

impl BasisLoader for ExchangeLoader {
    fn load(&self, basis_name: &str, molecule: &Molecule) -> Result<Gaussian94Document> {
        let atomic_numbers: Vec<usize> = molecule.atoms().map(|atom| atom.atomic_number()).collect();
        download_basis(&self.exchange, basis_name, &atomic_numbers)
    }
}

/// Loader reading a gaussian94 file from disk.
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BasisLoader for FileLoader {
    fn load(&self, basis_name: &str, _molecule: &Molecule) -> Result<Gaussian94Document> {
        read_basis_file(&self.path, basis_name)
    }
}

/// Wraps another loader with a JSON cache file. The cache is used when it
/// holds the requested basis set and covers every element of the molecule.
pub struct CachedLoader<L: BasisLoader> {
    inner: L,
    path: PathBuf,
}

impl<L: BasisLoader> CachedLoader<L> {
    pub fn new(inner: L, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
        }
    }

    fn read_cache(&self, basis_name: &str, molecule: &Molecule) -> Option<Gaussian94Document> {
        if !self.path.exists() {
            return None;
        }
        match ::basis::BasisSet::load_from_file(&self.path) {
            Ok(basis) if basis.name() == basis_name && molecule.atoms().all(|a| basis.contains(a.symbol())) => {
                Some(Gaussian94Document {
                    header: Vec::new(),
                    basis,
                })
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Ignoring unreadable basis cache {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

impl<L: BasisLoader> BasisLoader for CachedLoader<L> {
    fn load(&self, basis_name: &str, molecule: &Molecule) -> Result<Gaussian94Document> {
        if let Some(doc) = self.read_cache(basis_name, molecule) {
            info!("Using cached basis set from {}", self.path.display());
            return Ok(doc);
        }

        let doc = self.inner.load(basis_name, molecule)?;
        if let Err(e) = doc.basis.save_to_file(&self.path) {
            warn!("Could not write basis cache {}: {}", self.path.display(), e);
        }
        Ok(doc)
    }
}

/// Picks the basis source: an explicit file first, then the exchange unless
/// running offline, optionally behind a cache.
pub fn select_loader(config: &Config, basis_file: Option<&str>, offline: bool) -> Result<Box<dyn BasisLoader>> {
    let loader: Box<dyn BasisLoader> = match (basis_file.or(config.basis_file.as_deref()), &config.basis_cache) {
        (Some(file), _) => Box::new(FileLoader::new(file)),
        (None, Some(cache)) if offline => Box::new(CachedLoader::new(OfflineLoader, cache)),
        (None, None) if offline => {
            return Err(eyre!("Running offline requires a basis_file or a basis_cache"));
        }
        (None, cache) => {
            let params = config.exchange.clone().unwrap_or_default();
            let exchange = ExchangeLoader::new(&params)?;
            match cache {
                Some(cache) => Box::new(CachedLoader::new(exchange, cache)),
                None => Box::new(exchange),
            }
        }
    };
    Ok(loader)
}

/// Stands in for the exchange when offline; only reached on a cache miss.
struct OfflineLoader;

impl BasisLoader for OfflineLoader {
    fn load(&self, basis_name: &str, molecule: &Molecule) -> Result<Gaussian94Document> {
        let symbols: BTreeSet<&str> = molecule.atoms().map(|a| a.symbol()).collect();
        Err(eyre!(
            "Basis set '{}' for {:?} is not cached and the exchange cannot be reached offline",
            basis_name,
            symbols
        ))
    }
}
