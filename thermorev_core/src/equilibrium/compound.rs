//! This module provides compound identifiers and the compound table

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// A validated KEGG identifier
///
/// KEGG identifiers consist of a one letter kind prefix ("C" for compounds,
/// "D" for drugs, "G" for glycans) followed by digits, five in the wild.
/// Identifiers are stored in normalized form, so "C31" and "C00031" compare
/// equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeggId {
    kind: KeggIdKind,
    number: u64,
}

/// The KEGG database an identifier belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeggIdKind {
    /// A compound identifier ("C...")
    Compound,
    /// A drug identifier ("D...")
    Drug,
    /// A glycan identifier ("G...")
    Glycan,
}

impl KeggId {
    /// Parse a KEGG identifier from its string form
    ///
    /// # Examples
    /// ```rust
    /// use thermorev_core::equilibrium::compound::{KeggId, KeggIdKind};
    /// let id = KeggId::parse("C00031").unwrap();
    /// assert_eq!(id.kind(), KeggIdKind::Compound);
    /// assert_eq!(id.number(), 31);
    /// assert!(KeggId::parse("glc__D_c").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<KeggId, KeggIdError> {
        let mut chars = raw.chars();
        let kind = match chars.next() {
            Some('C') => KeggIdKind::Compound,
            Some('D') => KeggIdKind::Drug,
            Some('G') => KeggIdKind::Glycan,
            _ => return Err(KeggIdError::InvalidPrefix(raw.to_string())),
        };
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(KeggIdError::InvalidNumber(raw.to_string()));
        }
        let number = digits
            .parse::<u64>()
            .map_err(|_| KeggIdError::InvalidNumber(raw.to_string()))?;
        Ok(KeggId { kind, number })
    }

    /// Create a compound ("C") identifier directly from its numeric part
    pub const fn compound(number: u64) -> KeggId {
        KeggId {
            kind: KeggIdKind::Compound,
            number,
        }
    }

    pub fn kind(&self) -> KeggIdKind {
        self.kind
    }

    /// The numeric part of the identifier, used for ordering
    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn is_compound(&self) -> bool {
        self.kind == KeggIdKind::Compound
    }
}

impl Display for KeggId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.kind {
            KeggIdKind::Compound => 'C',
            KeggIdKind::Drug => 'D',
            KeggIdKind::Glycan => 'G',
        };
        write!(f, "{}{:05}", prefix, self.number)
    }
}

#[derive(Clone, Debug, Error)]
pub enum KeggIdError {
    #[error("Identifier {0} does not start with a KEGG kind prefix (C, D, or G)")]
    InvalidPrefix(String),
    #[error("Identifier {0} does not have a numeric part")]
    InvalidNumber(String),
}

/// Attempt to map a metabolite display name into the compound identifier space
///
/// This is the fallback used by the reversibility check when a metabolite
/// carries no usable compound annotation.
pub trait CompoundMatcher {
    fn match_name(&self, name: &str) -> Option<KeggId>;
}

/// A single record of the compound table
#[derive(Clone, Debug)]
pub struct Compound {
    pub id: KeggId,
    pub name: String,
    /// Chemical formula of the major species at pH 7
    pub formula: String,
    /// Electrical charge of the major species at pH 7
    pub charge: i32,
    /// Standard transformed formation energy in kJ/mol (pH 7, I = 0.1 M,
    /// T = 298.15 K)
    ///
    /// `None` for species the group contribution method cannot decompose.
    pub dg_f_prime: Option<f64>,
}

/// JSON record of the compound table file
#[derive(Deserialize)]
struct JsonCompound {
    id: String,
    name: String,
    formula: String,
    charge: i32,
    dg_f_prime: Option<f64>,
}

/// The compound table backing the tabulated estimator
///
/// Keyed by normalized identifier, with a secondary index from normalized
/// compound names for name based matching.
#[derive(Clone, Debug, Default)]
pub struct CompoundRegistry {
    compounds: IndexMap<KeggId, Compound>,
    names: IndexMap<String, KeggId>,
}

impl CompoundRegistry {
    pub fn new() -> Self {
        CompoundRegistry {
            compounds: IndexMap::new(),
            names: IndexMap::new(),
        }
    }

    /// Read a compound table from a JSON file
    ///
    /// The file holds a list of records with `id`, `name`, `formula`,
    /// `charge`, and nullable `dg_f_prime` fields.
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<CompoundRegistry, RegistryError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(RegistryError::UnableToRead(format!("{:?}", err))),
        };
        let records = match serde_json::from_str::<Vec<JsonCompound>>(&data) {
            Ok(records) => records,
            Err(err) => return Err(RegistryError::UnableToParse(format!("{:?}", err))),
        };
        let mut registry = CompoundRegistry::new();
        for record in records {
            let id = KeggId::parse(&record.id)?;
            registry.insert(Compound {
                id,
                name: record.name,
                formula: record.formula,
                charge: record.charge,
                dg_f_prime: record.dg_f_prime,
            });
        }
        Ok(registry)
    }

    /// Add a compound to the registry
    ///
    /// The first compound registered under a given normalized name wins name
    /// matching for that name.
    pub fn insert(&mut self, compound: Compound) {
        let normalized = normalize_name(&compound.name);
        if !normalized.is_empty() {
            self.names.entry(normalized).or_insert(compound.id.clone());
        }
        self.compounds.insert(compound.id.clone(), compound);
    }

    pub fn get(&self, id: &KeggId) -> Option<&Compound> {
        self.compounds.get(id)
    }

    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }
}

impl CompoundMatcher for CompoundRegistry {
    fn match_name(&self, name: &str) -> Option<KeggId> {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return None;
        }
        self.names.get(&normalized).cloned()
    }
}

/// Normalize a compound name for matching
///
/// Case and punctuation carry no chemical meaning ("D-Glucose" and
/// "D glucose" name the same compound), so matching happens on the lowercased
/// alphanumeric skeleton of the name.
fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unable to read compound table due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse compound table due to {0}")]
    UnableToParse(String),
    #[error("Compound table contains an invalid identifier")]
    InvalidId(#[from] KeggIdError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parse_kegg_ids() {
        let compound = KeggId::parse("C00031").unwrap();
        assert_eq!(compound.kind(), KeggIdKind::Compound);
        assert_eq!(compound.number(), 31);
        assert!(compound.is_compound());

        let drug = KeggId::parse("D00009").unwrap();
        assert_eq!(drug.kind(), KeggIdKind::Drug);
        assert!(!drug.is_compound());

        let glycan = KeggId::parse("G10609").unwrap();
        assert_eq!(glycan.kind(), KeggIdKind::Glycan);
    }

    #[test]
    fn parse_rejects_model_ids() {
        assert!(matches!(
            KeggId::parse("glc__D_c"),
            Err(KeggIdError::InvalidNumber(_))
        ));
        assert!(matches!(
            KeggId::parse("atp_c"),
            Err(KeggIdError::InvalidPrefix(_))
        ));
        assert!(matches!(
            KeggId::parse("CHEBI:17634"),
            Err(KeggIdError::InvalidNumber(_))
        ));
        assert!(matches!(KeggId::parse("C"), Err(KeggIdError::InvalidNumber(_))));
    }

    #[test]
    fn display_is_normalized() {
        assert_eq!(KeggId::parse("C31").unwrap().to_string(), "C00031");
        assert_eq!(KeggId::parse("C00031").unwrap().to_string(), "C00031");
        assert_eq!(KeggId::parse("C31").unwrap(), KeggId::parse("C00031").unwrap());
        assert_eq!(KeggId::compound(31), KeggId::parse("C00031").unwrap());
    }

    #[test]
    fn name_matching() {
        let mut registry = CompoundRegistry::new();
        registry.insert(Compound {
            id: KeggId::compound(9),
            name: "Orthophosphate".to_string(),
            formula: "HO4P".to_string(),
            charge: -2,
            dg_f_prime: Some(-1059.5),
        });
        assert_eq!(
            registry.match_name("orthophosphate"),
            Some(KeggId::compound(9))
        );
        assert_eq!(
            registry.match_name("Ortho-phosphate"),
            Some(KeggId::compound(9))
        );
        assert_eq!(registry.match_name("phosphoenolpyruvate"), None);
        assert_eq!(registry.match_name(""), None);
    }

    #[test]
    fn read_json() {
        let table_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test_data")
            .join("compounds.json");
        let registry = CompoundRegistry::read_json(table_path).unwrap();
        assert!(!registry.is_empty());

        let water = registry.get(&KeggId::compound(1)).unwrap();
        assert_eq!(water.formula, "H2O");
        assert_eq!(water.charge, 0);
        assert!(water.dg_f_prime.is_some());

        // The xylulose record deliberately has no formation energy
        let xylulose = registry.get(&KeggId::compound(310)).unwrap();
        assert!(xylulose.dg_f_prime.is_none());
    }
}
