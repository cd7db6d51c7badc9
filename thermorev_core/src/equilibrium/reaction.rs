//! This module provides compound level reactions parsed from formula strings

use indexmap::IndexMap;
use thiserror::Error;

use crate::equilibrium::compound::{KeggId, KeggIdError};

/// Arrow tokens accepted in reaction formulas, longest first
///
/// The boolean marks arrows written right to left, for which the sides are
/// swapped during parsing.
const ARROWS: [(&str, bool); 7] = [
    ("<=>", false),
    ("<->", false),
    ("<--", true),
    ("-->", false),
    ("<-", true),
    ("->", false),
    ("=", false),
];

/// A reaction over the compound identifier space
///
/// Negative coefficients are consumed and positive coefficients produced.
/// Species appearing on both sides net out, entries netting to zero are
/// dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompoundReaction {
    stoichiometry: IndexMap<KeggId, f64>,
}

impl CompoundReaction {
    /// Parse a reaction formula string
    ///
    /// Formulas look like `"C00002 + C00031 -> C00008 + C00092 + C00080"`,
    /// with optional stoichiometric coefficients (`"2 C00001"`). Every
    /// identifier must be a syntactically valid KEGG identifier.
    ///
    /// # Examples
    /// ```rust
    /// use thermorev_core::equilibrium::compound::KeggId;
    /// use thermorev_core::equilibrium::reaction::CompoundReaction;
    /// let rxn = CompoundReaction::parse("C00092 <=> C00085").unwrap();
    /// assert_eq!(rxn.coefficient(&KeggId::compound(92)), -1.0);
    /// assert_eq!(rxn.coefficient(&KeggId::compound(85)), 1.0);
    /// ```
    pub fn parse(formula: &str) -> Result<CompoundReaction, ReactionParseError> {
        let (position, arrow, reversed) = find_arrow(formula)
            .ok_or_else(|| ReactionParseError::MissingArrow(formula.to_string()))?;
        let (left, right) = formula.split_at(position);
        let right = &right[arrow.len()..];
        let (reactants, products) = if reversed { (right, left) } else { (left, right) };

        let mut stoichiometry: IndexMap<KeggId, f64> = IndexMap::new();
        for (side, sign) in [(reactants, -1f64), (products, 1f64)] {
            for (id, coefficient) in parse_side(side)? {
                *stoichiometry.entry(id).or_insert(0f64) += sign * coefficient;
            }
        }
        stoichiometry.retain(|_, coefficient| coefficient.abs() > 1e-9);
        Ok(CompoundReaction { stoichiometry })
    }

    /// The stoichiometric coefficient of a compound, zero when absent
    pub fn coefficient(&self, id: &KeggId) -> f64 {
        self.stoichiometry.get(id).copied().unwrap_or(0f64)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeggId, f64)> {
        self.stoichiometry.iter().map(|(id, coefficient)| (id, *coefficient))
    }

    pub fn is_empty(&self) -> bool {
        self.stoichiometry.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stoichiometry.len()
    }
}

/// Locate the first arrow token in a formula
fn find_arrow(formula: &str) -> Option<(usize, &'static str, bool)> {
    let mut best: Option<(usize, &'static str, bool)> = None;
    for (arrow, reversed) in ARROWS {
        if let Some(position) = formula.find(arrow) {
            let replace = match best {
                // Longest arrow wins at equal positions, so "<=>" is not
                // mistaken for "=" and "<--" not for "<-"
                Some((best_position, best_arrow, _)) => {
                    position < best_position
                        || (position == best_position && arrow.len() > best_arrow.len())
                }
                None => true,
            };
            if replace {
                best = Some((position, arrow, reversed));
            }
        }
    }
    best
}

/// Parse one side of a reaction formula into (compound, coefficient) pairs
fn parse_side(side: &str) -> Result<Vec<(KeggId, f64)>, ReactionParseError> {
    let mut terms = Vec::new();
    if side.trim().is_empty() {
        return Ok(terms);
    }
    for term in side.split('+') {
        let tokens: Vec<&str> = term.split_whitespace().collect();
        match tokens.as_slice() {
            [id] => terms.push((KeggId::parse(id)?, 1f64)),
            [coefficient, id] => {
                let coefficient = coefficient
                    .parse::<f64>()
                    .map_err(|_| ReactionParseError::InvalidCoefficient(term.trim().to_string()))?;
                terms.push((KeggId::parse(id)?, coefficient));
            }
            _ => return Err(ReactionParseError::MalformedTerm(term.trim().to_string())),
        }
    }
    Ok(terms)
}

#[derive(Debug, Error)]
pub enum ReactionParseError {
    #[error("Reaction formula {0:?} contains no arrow")]
    MissingArrow(String),
    #[error("Invalid stoichiometric coefficient in term {0:?}")]
    InvalidCoefficient(String),
    #[error("Malformed term {0:?}")]
    MalformedTerm(String),
    #[error("Reaction formula contains an identifier outside the compound space")]
    InvalidCompound(#[from] KeggIdError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple() {
        let rxn = CompoundReaction::parse("C00002 + C00031 -> C00008 + C00092 + C00080").unwrap();
        assert_eq!(rxn.len(), 5);
        assert_eq!(rxn.coefficient(&KeggId::compound(2)), -1.0);
        assert_eq!(rxn.coefficient(&KeggId::compound(31)), -1.0);
        assert_eq!(rxn.coefficient(&KeggId::compound(8)), 1.0);
        assert_eq!(rxn.coefficient(&KeggId::compound(92)), 1.0);
        assert_eq!(rxn.coefficient(&KeggId::compound(80)), 1.0);
    }

    #[test]
    fn parse_coefficients() {
        let rxn = CompoundReaction::parse("2 C00027 <=> 2 C00001 + C00007").unwrap();
        assert_eq!(rxn.coefficient(&KeggId::compound(27)), -2.0);
        assert_eq!(rxn.coefficient(&KeggId::compound(1)), 2.0);
        assert_eq!(rxn.coefficient(&KeggId::compound(7)), 1.0);
        let fractional = CompoundReaction::parse("0.5 C00007 + C00080 -> C00001").unwrap();
        assert_eq!(fractional.coefficient(&KeggId::compound(7)), -0.5);
    }

    #[test]
    fn parse_arrows() {
        for formula in [
            "C00092 <=> C00085",
            "C00092 <-> C00085",
            "C00092 --> C00085",
            "C00092 -> C00085",
            "C00092 = C00085",
        ] {
            let rxn = CompoundReaction::parse(formula).unwrap();
            assert_eq!(rxn.coefficient(&KeggId::compound(92)), -1.0, "{}", formula);
            assert_eq!(rxn.coefficient(&KeggId::compound(85)), 1.0, "{}", formula);
        }
        // Right to left arrows swap the sides
        for formula in ["C00092 <- C00085", "C00092 <-- C00085"] {
            let rxn = CompoundReaction::parse(formula).unwrap();
            assert_eq!(rxn.coefficient(&KeggId::compound(92)), 1.0, "{}", formula);
            assert_eq!(rxn.coefficient(&KeggId::compound(85)), -1.0, "{}", formula);
        }
    }

    #[test]
    fn species_on_both_sides_net_out() {
        let rxn = CompoundReaction::parse("C00001 + C00031 -> C00001 + C00092").unwrap();
        assert_eq!(rxn.len(), 2);
        assert_eq!(rxn.coefficient(&KeggId::compound(1)), 0.0);
        let cancelled = CompoundReaction::parse("C00001 -> C00001").unwrap();
        assert!(cancelled.is_empty());
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            CompoundReaction::parse("C00031 C00092"),
            Err(ReactionParseError::MissingArrow(_))
        ));
        assert!(matches!(
            CompoundReaction::parse("glc__D_c -> C00092"),
            Err(ReactionParseError::InvalidCompound(_))
        ));
        assert!(matches!(
            CompoundReaction::parse("two C00031 -> C00092"),
            Err(ReactionParseError::InvalidCoefficient(_))
        ));
        assert!(matches!(
            CompoundReaction::parse("2 C00031 C00001 -> C00092"),
            Err(ReactionParseError::MalformedTerm(_))
        ));
    }
}
