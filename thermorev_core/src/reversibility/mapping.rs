//! Map model metabolites and reactions into the compound identifier space
//!
//! Model metabolite ids are local to the model ("glc__D_c"), while the
//! thermodynamic estimator only understands canonical compound identifiers
//! ("C00031"). Resolution first consults the metabolite's "kegg.compound"
//! annotation and falls back to matching its display name.

use tracing::debug;

use crate::equilibrium::compound::{CompoundMatcher, KeggId};
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::{format_term, Reaction};

/// Namespace under which KEGG compound annotations are stored
const KEGG_COMPOUND_NAMESPACE: &str = "kegg.compound";

/// Select the compound identifier with the smallest numeric part
///
/// Annotation lists mix compound, drug, and glycan identifiers. Only compound
/// ("C") identifiers can be looked up in the compound table, and when several
/// are annotated the lowest numbered one is kept.
///
/// # Examples
/// ```rust
/// use thermorev_core::equilibrium::compound::KeggId;
/// use thermorev_core::reversibility::mapping::smallest_compound_id;
/// let annotated = vec![
///     "G10609".to_string(),
///     "C05345".to_string(),
///     "D00009".to_string(),
///     "C00092".to_string(),
/// ];
/// assert_eq!(smallest_compound_id(&annotated), Some(KeggId::compound(92)));
/// ```
pub fn smallest_compound_id(ids: &[String]) -> Option<KeggId> {
    ids.iter()
        .filter_map(|id| KeggId::parse(id).ok())
        .filter(KeggId::is_compound)
        .min_by_key(KeggId::number)
}

/// Resolve a metabolite to a compound identifier
///
/// Resolution order:
/// 1. compound identifiers from the "kegg.compound" annotation, smallest
///    numeric part first;
/// 2. matching the metabolite name through the [`CompoundMatcher`];
/// 3. unresolved, the caller keeps the model id.
pub fn resolve_metabolite(
    metabolite: &Metabolite,
    matcher: &impl CompoundMatcher,
) -> Option<KeggId> {
    if let Some(id) = smallest_compound_id(metabolite.annotation.get(KEGG_COMPOUND_NAMESPACE)) {
        return Some(id);
    }
    let name = match metabolite.name {
        Some(ref name) => name,
        None => {
            debug!(
                metabolite = metabolite.id.as_str(),
                "metabolite has neither a compound annotation nor a name"
            );
            return None;
        }
    };
    match matcher.match_name(name) {
        Some(id) => {
            debug!(
                metabolite = metabolite.id.as_str(),
                compound = %id,
                "resolved metabolite by name"
            );
            Some(id)
        }
        None => {
            debug!(
                metabolite = metabolite.id.as_str(),
                name = name.as_str(),
                "metabolite could not be resolved to a compound"
            );
            None
        }
    }
}

/// Render a reaction's stoichiometry in the compound identifier space
///
/// Metabolites that cannot be resolved keep their model id, which the
/// estimator then rejects, surfacing the reaction as incompletely mapped.
pub fn compound_reaction_string(
    reaction: &Reaction,
    model: &Model,
    matcher: &impl CompoundMatcher,
) -> String {
    let arrow = if reaction.reversibility() { "<=>" } else { "->" };
    let mut reactants: Vec<String> = Vec::new();
    let mut products: Vec<String> = Vec::new();
    for (metabolite_id, coefficient) in &reaction.metabolites {
        let resolved = model
            .metabolites
            .get(metabolite_id)
            .and_then(|met| resolve_metabolite(met, matcher))
            .map(|id| id.to_string())
            .unwrap_or_else(|| metabolite_id.clone());
        if *coefficient < 0f64 {
            reactants.push(format_term(&resolved, -coefficient));
        } else if *coefficient > 0f64 {
            products.push(format_term(&resolved, *coefficient));
        }
    }
    format!("{} {} {}", reactants.join(" + "), arrow, products.join(" + "))
}
