//! This module provides the estimator trait and its table backed implementation

use thiserror::Error;
use tracing::debug;

use crate::configuration::CONFIGURATION;
use crate::equilibrium::compound::{CompoundRegistry, KeggId};
use crate::equilibrium::formula::{parse_formula, FormulaError};
use crate::equilibrium::reaction::{CompoundReaction, ReactionParseError};

/// Gas constant in kJ/(mol K)
pub const R: f64 = 8.314462618e-3;
/// Standard temperature in K
pub const T: f64 = 298.15;
/// RT at standard temperature in kJ/mol
pub const RT: f64 = R * T;

/// Water, excluded from participant counts (its activity is taken as unity)
const WATER: KeggId = KeggId::compound(1);
/// The proton, excluded from participant counts (pH is held constant in the
/// transformed convention)
const PROTON: KeggId = KeggId::compound(80);

/// Tolerance on net atom and charge counts when checking balance
const BALANCE_EPSILON: f64 = 1e-6;

/// Estimates reaction thermodynamics from a compound level reaction
///
/// This is the seam towards the thermodynamic estimation service. The
/// reversibility check only talks to this trait, so the tabulated
/// implementation below can be swapped for one backed by an actual
/// estimation backend.
pub trait ThermodynamicEstimator {
    /// Parse a reaction formula string and resolve every identifier against
    /// the compound space
    fn parse_reaction(&self, formula: &str) -> Result<CompoundReaction, EstimationError>;

    /// Whether the reaction is chemically and redox balanced
    ///
    /// A residual hydrogen imbalance matching the residual charge imbalance
    /// is considered balanced, since free protons are available at constant
    /// pH.
    fn is_balanced(&self, reaction: &CompoundReaction) -> Result<bool, EstimationError>;

    /// Magnitude of the log reversibility index of the reaction
    ///
    /// The reversibility index gamma measures how far metabolite
    /// concentrations would have to be pushed from their mean to reverse the
    /// direction of flux. Reactions with `ln gamma` below the configured
    /// cutoff are considered thermodynamically reversible.
    fn ln_reversibility_index(&self, reaction: &CompoundReaction) -> Result<f64, EstimationError>;
}

/// Estimator backed by a table of standard transformed formation energies
pub struct TabulatedEstimator {
    registry: CompoundRegistry,
}

impl TabulatedEstimator {
    pub fn new(registry: CompoundRegistry) -> Self {
        TabulatedEstimator { registry }
    }

    pub fn registry(&self) -> &CompoundRegistry {
        &self.registry
    }

    /// Standard transformed reaction energy in kJ/mol
    ///
    /// The sum of the tabulated formation energies weighted by the
    /// stoichiometric coefficients.
    pub fn standard_dg_prime(&self, reaction: &CompoundReaction) -> Result<f64, EstimationError> {
        let mut dg_prime = 0f64;
        for (id, coefficient) in reaction.iter() {
            let compound = self
                .registry
                .get(id)
                .ok_or_else(|| EstimationError::UnknownCompound(id.to_string()))?;
            let dg_f = compound
                .dg_f_prime
                .ok_or_else(|| EstimationError::MissingFormationEnergy(id.to_string()))?;
            dg_prime += coefficient * dg_f;
        }
        Ok(dg_prime)
    }

    /// Sum of coefficients and sum of absolute coefficients, excluding water
    /// and protons
    fn participant_counts(&self, reaction: &CompoundReaction) -> (f64, f64) {
        let mut net = 0f64;
        let mut total = 0f64;
        for (id, coefficient) in reaction.iter() {
            if *id == WATER || *id == PROTON {
                continue;
            }
            net += coefficient;
            total += coefficient.abs();
        }
        (net, total)
    }
}

impl ThermodynamicEstimator for TabulatedEstimator {
    fn parse_reaction(&self, formula: &str) -> Result<CompoundReaction, EstimationError> {
        let reaction = CompoundReaction::parse(formula)?;
        for (id, _) in reaction.iter() {
            if self.registry.get(id).is_none() {
                return Err(EstimationError::UnknownCompound(id.to_string()));
            }
        }
        Ok(reaction)
    }

    fn is_balanced(&self, reaction: &CompoundReaction) -> Result<bool, EstimationError> {
        let mut net_atoms: indexmap::IndexMap<String, f64> = indexmap::IndexMap::new();
        let mut net_charge = 0f64;
        for (id, coefficient) in reaction.iter() {
            let compound = self
                .registry
                .get(id)
                .ok_or_else(|| EstimationError::UnknownCompound(id.to_string()))?;
            let counts = parse_formula(&compound.formula).map_err(|source| {
                EstimationError::InvalidFormula {
                    compound: id.to_string(),
                    source,
                }
            })?;
            for (element, count) in counts {
                *net_atoms.entry(element).or_insert(0f64) += coefficient * count as f64;
            }
            net_charge += coefficient * compound.charge as f64;
        }
        let net_hydrogen = net_atoms.shift_remove("H").unwrap_or(0f64);
        for (element, net) in &net_atoms {
            if net.abs() > BALANCE_EPSILON {
                debug!(element = element.as_str(), net, "reaction is elementally unbalanced");
                return Ok(false);
            }
        }
        // Protons can be added freely at constant pH, so a hydrogen imbalance
        // is acceptable exactly when it matches the charge imbalance
        Ok((net_hydrogen - net_charge).abs() < BALANCE_EPSILON)
    }

    fn ln_reversibility_index(&self, reaction: &CompoundReaction) -> Result<f64, EstimationError> {
        let dg_prime = self.standard_dg_prime(reaction)?;
        let (net, total) = self.participant_counts(reaction);
        if total == 0f64 {
            return Err(EstimationError::EmptyReaction);
        }
        let mean_concentration = CONFIGURATION.read().unwrap().mean_concentration;
        let dg_mean = dg_prime + RT * net * mean_concentration.ln();
        Ok((2f64 / total) * dg_mean.abs() / RT)
    }
}

#[derive(Debug, Error)]
pub enum EstimationError {
    #[error("Unable to parse the reaction formula")]
    UnparsableFormula(#[from] ReactionParseError),
    #[error("Compound {0} is not present in the compound table")]
    UnknownCompound(String),
    #[error("Unable to parse the chemical formula of compound {compound}")]
    InvalidFormula {
        compound: String,
        #[source]
        source: FormulaError,
    },
    #[error("No formation energy is available for compound {0}")]
    MissingFormationEnergy(String),
    #[error("The reversibility index is undefined for a reaction without participants")]
    EmptyReaction,
}
