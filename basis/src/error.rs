use thiserror::Error;

pub type Result<T> = std::result::Result<T, BasisError>;

#[derive(Debug, Error)]
pub enum BasisError {
    #[error("{shell} orbitals are not yet supported (element {element}). Please choose a simpler basis set")]
    UnsupportedShell { element: String, shell: String },

    #[error(
        "contraction length mismatch in {shell} shell of {element}: declared {declared} primitives, found {found}"
    )]
    ContractionMismatch {
        element: String,
        shell: String,
        declared: usize,
        found: usize,
    },

    #[error("malformed gaussian94 input: {details} (line: '{line}')")]
    Malformed { line: String, details: String },

    #[error(
        "element {symbol} is not defined in basis set '{basis}'; check the input geometry against the elements the basis set covers"
    )]
    MissingElement { symbol: String, basis: String },

    #[error("unknown element symbol '{0}'")]
    UnknownElement(String),

    #[error("atom id '{0}' appears more than once")]
    DuplicateAtom(String),

    #[error("bond '{bond}' refers to unknown atom id '{id}'")]
    UnknownBondAtom { bond: String, id: String },

    #[error("invalid orbital: {0}")]
    InvalidOrbital(String),

    #[error("coordinate arrays differ in length: x={x}, y={y}, z={z}")]
    ShapeMismatch { x: usize, y: usize, z: usize },

    #[error("basis set request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("basis set exchange returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("I/O operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl BasisError {
    pub(crate) fn malformed(line: &str, details: impl Into<String>) -> Self {
        Self::Malformed {
            line: line.trim().to_string(),
            details: details.into(),
        }
    }
}
