use crate::cgto::{AtomicOrbital, OrbitalType};
use crate::error::{BasisError, Result};
use crate::helper::{is_numeric_token, parse_fortran_float};
use periodic_table_on_an_enum::Element;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::str::FromStr;

// Example of a gaussian94 element block, as served by the basis set exchange:
//
// O     0
// S    6   1.00
//       0.5484671660D+04       0.1831074430D-02
//       0.8252349460D+03       0.1395017220D-01
//       0.1880469580D+03       0.6844507810D-01
//       0.5296450000D+02       0.2327143360D+00
//       0.1689757040D+02       0.4701928980D+00
//       0.5799635340D+01       0.3585208530D+00
// SP   3   1.00
//       0.1553961625D+02      -0.1107775495D+00       0.7087426823D-01
//       0.3599933586D+01      -0.1480262627D+00       0.3397528391D+00
//       0.1013761750D+01       0.1130767015D+01       0.7271585773D+00
// D    1   1.00
//       0.8000000000D+00       1.0000000000D+00
// ****

/// Shell types with angular momentum beyond D.
const UNSUPPORTED_SHELLS: [&str; 5] = ["F", "G", "H", "I", "K"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    S,
    P,
    D,
    SP,
}

impl ShellKind {
    /// Orbitals generated by the shell, each paired with the coefficient
    /// column of the data lines it takes its contraction coefficients from.
    pub fn expansion(&self) -> &'static [(OrbitalType, usize)] {
        use OrbitalType::*;
        match self {
            ShellKind::S => &[(S, 0)],
            ShellKind::P => &[(Px, 0), (Py, 0), (Pz, 0)],
            ShellKind::D => &[(Dx2, 0), (Dy2, 0), (Dz2, 0), (Dxy, 0), (Dyz, 0), (Dzx, 0)],
            ShellKind::SP => &[(S, 0), (Px, 1), (Py, 1), (Pz, 1)],
        }
    }

    /// Number of coefficient columns following the exponent on a data line.
    pub fn columns(&self) -> usize {
        match self {
            ShellKind::SP => 2,
            _ => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShellKind::S => "S",
            ShellKind::P => "P",
            ShellKind::D => "D",
            ShellKind::SP => "SP",
        }
    }

    fn parse(token: &str, element: &str) -> Result<Self> {
        match token.to_ascii_uppercase().as_str() {
            "S" => Ok(ShellKind::S),
            "P" => Ok(ShellKind::P),
            "D" => Ok(ShellKind::D),
            "SP" | "L" => Ok(ShellKind::SP),
            other if UNSUPPORTED_SHELLS.contains(&other) => Err(BasisError::UnsupportedShell {
                element: element.to_string(),
                shell: other.to_string(),
            }),
            _ => Err(BasisError::malformed(
                token,
                format!("unknown shell type '{}' for element {}", token, element),
            )),
        }
    }
}

impl FromStr for ShellKind {
    type Err = BasisError;

    fn from_str(s: &str) -> Result<Self> {
        ShellKind::parse(s, "?")
    }
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Radial data of one shell record: shared exponents plus one or two
/// coefficient columns.
struct Shell {
    kind: ShellKind,
    exponents: Vec<f64>,
    columns: Vec<Vec<f64>>,
}

impl Shell {
    fn parse(kind: ShellKind, scale: f64, lines: &[&str]) -> Result<Self> {
        let mut exponents = Vec::with_capacity(lines.len());
        let mut columns = vec![Vec::with_capacity(lines.len()); kind.columns()];

        for line in lines {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != kind.columns() + 1 {
                return Err(BasisError::malformed(
                    line,
                    format!(
                        "{} shell data lines need {} fields, found {}",
                        kind,
                        kind.columns() + 1,
                        tokens.len()
                    ),
                ));
            }
            let alpha = parse_fortran_float(tokens[0])? * scale * scale;
            if !(alpha.is_finite() && alpha > 0.0) {
                return Err(BasisError::malformed(line, format!("exponent must be positive, got {}", alpha)));
            }
            exponents.push(alpha);
            for (column, token) in columns.iter_mut().zip(&tokens[1..]) {
                column.push(parse_fortran_float(token)?);
            }
        }

        Ok(Self { kind, exponents, columns })
    }

    fn expand(&self) -> Result<Vec<AtomicOrbital>> {
        self.kind
            .expansion()
            .iter()
            .map(|&(orbital_type, column)| {
                AtomicOrbital::new(orbital_type, self.exponents.clone(), self.columns[column].clone())
            })
            .collect()
    }
}

/// `CL`, `cl` and `Cl` all name chlorine; templates are stored under `Cl`.
fn canonical_symbol(raw: &str) -> String {
    let mut chars = raw.chars();
    let title: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    };
    match Element::from_symbol(&title) {
        Some(element) => element.get_symbol().to_string(),
        None => title,
    }
}

fn starts_with_number(line: &str) -> bool {
    line.split_whitespace().next().is_some_and(is_numeric_token)
}

/// Parses the block of one element: a `SYMBOL CHARGE` line followed by shell
/// records (`TYPE NPRIM SCALE` and NPRIM data lines).
///
/// Returns the element symbol in canonical case and its orbital templates, all
/// centred at the origin.
///
/// A shell's scale factor multiplies its exponents by `scale^2`. Readers that
/// ignore the factor agree with this only for the usual `1.00`.
pub fn parse_element_block(lines: &[&str]) -> Result<(String, Vec<AtomicOrbital>)> {
    let lines: Vec<&str> = lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let first = lines
        .first()
        .ok_or_else(|| BasisError::malformed("", "empty element block"))?;
    let symbol = first
        .split_whitespace()
        .next()
        .filter(|s| s.chars().all(char::is_alphabetic))
        .map(canonical_symbol)
        .ok_or_else(|| BasisError::malformed(first, "expected 'SYMBOL CHARGE' line"))?;

    // An F (or higher) shell anywhere rejects the whole element.
    if let Some(shell) = lines[1..]
        .iter()
        .filter_map(|l| l.split_whitespace().next())
        .map(|t| t.to_ascii_uppercase())
        .find(|t| UNSUPPORTED_SHELLS.contains(&t.as_str()))
    {
        return Err(BasisError::UnsupportedShell { element: symbol, shell });
    }

    let mut orbitals = Vec::new();
    let mut cursor = 1;
    while cursor < lines.len() {
        let header = lines[cursor];
        let tokens: Vec<&str> = header.split_whitespace().collect();
        let kind = ShellKind::parse(tokens[0], &symbol)?;
        if tokens.len() < 2 || tokens.len() > 3 {
            return Err(BasisError::malformed(header, "expected shell header 'TYPE NPRIM SCALE'"));
        }
        let declared: usize = tokens[1].parse().map_err(|_| {
            BasisError::malformed(header, format!("invalid primitive count '{}'", tokens[1]))
        })?;
        if declared == 0 {
            return Err(BasisError::malformed(header, "shell declares no primitives"));
        }
        let scale = match tokens.get(2) {
            Some(token) => parse_fortran_float(token)?,
            None => 1.0,
        };
        cursor += 1;

        let found = lines[cursor..]
            .iter()
            .take_while(|l| starts_with_number(l))
            .count();
        if found != declared {
            return Err(BasisError::ContractionMismatch {
                element: symbol,
                shell: kind.to_string(),
                declared,
                found,
            });
        }

        let shell = Shell::parse(kind, scale, &lines[cursor..cursor + found])?;
        orbitals.extend(shell.expand()?);
        cursor += found;
    }

    Ok((symbol, orbitals))
}

/// Named mapping from element symbol to its orbital templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasisSet {
    name: String,
    elements: HashMap<String, Vec<AtomicOrbital>>,
}

impl BasisSet {
    pub fn new<I>(name: impl Into<String>, elements: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<AtomicOrbital>)>,
    {
        Self {
            name: name.into(),
            elements: elements.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, symbol: &str) -> Option<&[AtomicOrbital]> {
        self.elements.get(symbol).map(Vec::as_slice)
    }

    /// Like [`BasisSet::get`], but a missing element is an error.
    pub fn templates(&self, symbol: &str) -> Result<&[AtomicOrbital]> {
        self.get(symbol).ok_or_else(|| BasisError::MissingElement {
            symbol: symbol.to_string(),
            basis: self.name.clone(),
        })
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.elements.contains_key(symbol)
    }

    /// Element symbols covered, sorted.
    pub fn elements(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.elements.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// A parsed gaussian94 file: the comment header and the basis set itself.
#[derive(Debug, Clone)]
pub struct Gaussian94Document {
    pub header: Vec<String>,
    pub basis: BasisSet,
}

/// Parses a complete gaussian94 text into a [`BasisSet`] named `name`.
///
/// The first failing element block fails the whole parse; no partial basis
/// set is returned.
pub fn parse_gaussian94(name: &str, text: &str) -> Result<Gaussian94Document> {
    let header: Vec<String> = text
        .lines()
        .map_while(|line| line.strip_prefix('!'))
        .map(|line| line.trim_start_matches('!').trim_end().to_string())
        .collect();

    let mut elements = HashMap::new();
    let mut block: Vec<&str> = Vec::new();

    let lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('!'));

    for line in lines {
        if line.starts_with('*') {
            if !block.is_empty() {
                let (symbol, orbitals) = parse_element_block(&block)?;
                elements.insert(symbol, orbitals);
                block.clear();
            }
        } else {
            block.push(line);
        }
    }
    if !block.is_empty() {
        let (symbol, orbitals) = parse_element_block(&block)?;
        elements.insert(symbol, orbitals);
    }

    Ok(Gaussian94Document {
        header,
        basis: BasisSet::new(name, elements),
    })
}
