//! Check whether annotated reaction reversibility agrees with thermodynamics
//!
//! For every purely metabolic reaction the check maps the metabolites into
//! the compound identifier space, asks the thermodynamic estimator for the
//! reversibility index, and compares the verdict with the reversibility
//! annotated through the reaction's flux bounds. Reactions that cannot be
//! mapped, balanced, or calculated are collected into separate buckets
//! rather than failing the whole pass.

pub mod mapping;
pub mod report;

use tracing::{debug, info};

use crate::configuration::CONFIGURATION;
use crate::equilibrium::compound::CompoundMatcher;
use crate::equilibrium::estimator::ThermodynamicEstimator;
use crate::metabolic_model::model::Model;
use crate::reversibility::report::ReversibilityReport;

/// Find reactions whose annotated reversibility disagrees with thermodynamics
///
/// Each purely metabolic reaction passes through three stages: mapping into
/// the compound space, the balancing check, and the reversibility index
/// calculation. A reaction failing a stage lands in the corresponding report
/// bucket and later stages are skipped. A reaction is considered
/// thermodynamically reversible when its log reversibility index is below
/// `ln_gamma`.
///
/// # Parameters
/// - `model`: the metabolic model under investigation
/// - `estimator`: the thermodynamic estimation service
/// - `matcher`: name based compound matching fallback
/// - `ln_gamma`: cutoff on the log reversibility index, `None` uses the
///   configured default of 3, which corresponds to allowing concentrations to
///   span three orders of magnitude around 100 uM (roughly 3 uM to 3 mM) at
///   pH 7, I = 0.1 M and T = 298 K
pub fn find_incorrect_thermodynamic_reversibility(
    model: &Model,
    estimator: &impl ThermodynamicEstimator,
    matcher: &impl CompoundMatcher,
    ln_gamma: Option<f64>,
) -> ReversibilityReport {
    let ln_gamma = ln_gamma.unwrap_or_else(|| CONFIGURATION.read().unwrap().ln_gamma);
    let reactions = model.pure_metabolic_reactions();
    let mut report = ReversibilityReport::new();
    report.checked = reactions.len();

    for reaction in reactions {
        let formula = mapping::compound_reaction_string(reaction, model, matcher);
        let compound_reaction = match estimator.parse_reaction(&formula) {
            Ok(parsed) => parsed,
            Err(err) => {
                debug!(reaction = reaction.id.as_str(), error = %err, "mapping incomplete");
                report.incomplete_mapping.push(reaction.id.clone());
                continue;
            }
        };
        match estimator.is_balanced(&compound_reaction) {
            Ok(true) => {}
            Ok(false) => {
                debug!(reaction = reaction.id.as_str(), "reaction is unbalanced");
                report.unbalanced.push(reaction.id.clone());
                continue;
            }
            Err(err) => {
                debug!(reaction = reaction.id.as_str(), error = %err, "balancing failed");
                report.problematic_calculation.push(reaction.id.clone());
                continue;
            }
        }
        let ln_ri = match estimator.ln_reversibility_index(&compound_reaction) {
            Ok(ln_ri) => ln_ri,
            Err(err) => {
                debug!(reaction = reaction.id.as_str(), error = %err, "calculation failed");
                report.problematic_calculation.push(reaction.id.clone());
                continue;
            }
        };
        let thermodynamically_reversible = ln_ri < ln_gamma;
        if thermodynamically_reversible != reaction.reversibility() {
            debug!(
                reaction = reaction.id.as_str(),
                ln_ri,
                annotated_reversible = reaction.reversibility(),
                "reversibility disagrees with thermodynamics"
            );
            report.incorrect_reversibility.push(reaction.id.clone());
        }
    }

    info!(
        checked = report.checked,
        flagged = report.total_flagged(),
        "thermodynamic reversibility check finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::equilibrium::compound::CompoundRegistry;
    use crate::equilibrium::estimator::TabulatedEstimator;

    fn test_data(file: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test_data")
            .join(file)
    }

    fn setup() -> (Model, TabulatedEstimator) {
        let model = Model::read_json(test_data("mini_model.json")).unwrap();
        let registry = CompoundRegistry::read_json(test_data("compounds.json")).unwrap();
        (model, TabulatedEstimator::new(registry))
    }

    #[test]
    fn classification_of_mini_model() {
        let (model, estimator) = setup();
        let report = find_incorrect_thermodynamic_reversibility(
            &model,
            &estimator,
            estimator.registry(),
            None,
        );

        // Boundary, transport, and biomass reactions are not checked
        assert_eq!(report.checked, 7);

        // Hexokinase is annotated reversible but strongly exergonic
        assert_eq!(report.incorrect_reversibility, vec!["HEX1".to_string()]);
        // The mystery metabolite has no annotation and no matchable name
        assert_eq!(report.incomplete_mapping, vec!["MYST".to_string()]);
        // Xylulose carries no formation energy
        assert_eq!(report.problematic_calculation, vec!["XYLI".to_string()]);
        // The phantom phosphorylation misses its phosphoryl donor
        assert_eq!(report.unbalanced, vec!["GLCP".to_string()]);

        assert_eq!(report.total_flagged(), 4);
        assert!((report.metric() - 4.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn agreeing_reactions_are_not_flagged() {
        let (model, estimator) = setup();
        let report = find_incorrect_thermodynamic_reversibility(
            &model,
            &estimator,
            estimator.registry(),
            None,
        );
        // PGI (reversible), PFK and ATPM (irreversible) all agree
        for id in ["PGI", "PFK", "ATPM"] {
            assert!(!report.incorrect_reversibility.contains(&id.to_string()), "{}", id);
            assert!(!report.incomplete_mapping.contains(&id.to_string()), "{}", id);
            assert!(!report.problematic_calculation.contains(&id.to_string()), "{}", id);
            assert!(!report.unbalanced.contains(&id.to_string()), "{}", id);
        }
    }

    #[test]
    fn cutoff_changes_the_verdict() {
        let (model, estimator) = setup();
        // With a loose cutoff hexokinase (ln RI of about 4.2) counts as
        // reversible again and agrees with its annotation, while the
        // irreversible phosphofructokinase (ln RI of about 3.8) now disagrees
        let report = find_incorrect_thermodynamic_reversibility(
            &model,
            &estimator,
            estimator.registry(),
            Some(5.0),
        );
        assert!(!report.incorrect_reversibility.contains(&"HEX1".to_string()));
        assert!(report.incorrect_reversibility.contains(&"PFK".to_string()));

        // With a cutoff of zero every calculable reaction is irreversible,
        // so the reversible isomerase gets flagged instead
        let strict = find_incorrect_thermodynamic_reversibility(
            &model,
            &estimator,
            estimator.registry(),
            Some(0.0),
        );
        assert!(strict.incorrect_reversibility.contains(&"PGI".to_string()));
        assert!(!strict.incorrect_reversibility.contains(&"PFK".to_string()));
    }

    #[test]
    fn empty_model_reports_nothing() {
        let model = Model::new_empty();
        let registry = CompoundRegistry::new();
        let estimator = TabulatedEstimator::new(registry);
        let report = find_incorrect_thermodynamic_reversibility(
            &model,
            &estimator,
            estimator.registry(),
            None,
        );
        assert_eq!(report.checked, 0);
        assert_eq!(report.total_flagged(), 0);
        assert_eq!(report.metric(), 0.0);
    }
}
