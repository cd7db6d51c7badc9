//! This module provides the report produced by the reversibility check

use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Outcome of checking a model's reactions against thermodynamics
///
/// Each checked reaction either agrees with the thermodynamic estimate or
/// lands in exactly one of the four buckets below.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ReversibilityReport {
    /// Reactions whose annotated reversibility disagrees with the estimate
    pub incorrect_reversibility: Vec<String>,
    /// Reactions with at least one metabolite that could not be mapped to a
    /// compound identifier
    pub incomplete_mapping: Vec<String>,
    /// Reactions for which the standard Gibbs energy change could not be
    /// calculated
    pub problematic_calculation: Vec<String>,
    /// Reactions that are not chemically or redox balanced after mapping
    pub unbalanced: Vec<String>,
    /// Number of purely metabolic reactions that were checked
    pub checked: usize,
}

impl ReversibilityReport {
    pub fn new() -> Self {
        ReversibilityReport::default()
    }

    /// Total number of reactions that did not agree cleanly with the estimate
    pub fn total_flagged(&self) -> usize {
        self.incorrect_reversibility.len()
            + self.incomplete_mapping.len()
            + self.problematic_calculation.len()
            + self.unbalanced.len()
    }

    /// Fraction of checked reactions that were flagged
    ///
    /// Zero for an empty population. The check has no mandatory pass
    /// criterion, the metric simply summarizes how much of the model could
    /// not be confirmed.
    pub fn metric(&self) -> f64 {
        if self.checked == 0 {
            0f64
        } else {
            self.total_flagged() as f64 / self.checked as f64
        }
    }
}

impl Display for ReversibilityReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Out of {} purely metabolic reactions, the reversibility of {} does not agree \
             with the thermodynamic estimate, {} could not be mapped to KEGG completely, \
             {} contained problematic metabolites, and {} are chemically or redox \
             unbalanced ({:.1}% flagged)",
            self.checked,
            self.incorrect_reversibility.len(),
            self.incomplete_mapping.len(),
            self.problematic_calculation.len(),
            self.unbalanced.len(),
            self.metric() * 100.0,
        )
    }
}
