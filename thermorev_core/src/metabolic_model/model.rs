//! This module provides the Model struct for representing an entire metabolic model
use indexmap::IndexMap;

use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::reaction::Reaction;

/// Represents a Genome Scale Metabolic Model
#[derive(Clone, Debug)]
pub struct Model {
    /// Map of reaction ids to Reaction Objects
    pub reactions: IndexMap<String, Reaction>,
    /// Map of metabolite ids to Metabolite Objects
    pub metabolites: IndexMap<String, Metabolite>,
    /// Id associated with the Model
    pub id: Option<String>,
    /// Compartments in the model
    ///
    /// An IndexMap<String, String> of {short name: long name}
    pub compartments: Option<IndexMap<String, String>>,
    /// A version identifier for the Model, stored as a string
    pub version: Option<String>,
}

impl Model {
    pub fn new_empty() -> Self {
        Model {
            reactions: IndexMap::new(),
            metabolites: IndexMap::new(),
            id: None,
            compartments: None,
            version: None,
        }
    }

    /// Add a reaction to the model
    ///
    /// # Parameters
    /// - reaction: Reaction to add
    ///
    /// # Examples
    /// ```rust
    /// use thermorev_core::metabolic_model::model::Model;
    /// use thermorev_core::metabolic_model::reaction::ReactionBuilder;
    /// let mut model = Model::new_empty();
    /// let new_reaction = ReactionBuilder::default().id("new_reaction".to_string()).build().unwrap();
    /// model.add_reaction(new_reaction);
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) {
        let id = reaction.id.clone();
        self.reactions.insert(id, reaction);
    }

    /// Add a metabolite to the model
    ///
    /// # Parameters
    /// - metabolite: Metabolite to add
    pub fn add_metabolite(&mut self, metabolite: Metabolite) {
        let id = metabolite.id.clone();
        self.metabolites.insert(id, metabolite);
    }

    /// Whether a reaction moves a chemical species between compartments
    ///
    /// A reaction is considered a transport reaction if the same species (same
    /// chemical formula, or the same base id when formulas are missing) appears
    /// among both its reactants and its products in different compartments.
    pub fn is_transport(&self, reaction: &Reaction) -> bool {
        for reactant_id in reaction.reactant_ids() {
            let reactant = match self.metabolites.get(reactant_id) {
                Some(met) => met,
                None => continue,
            };
            for product_id in reaction.product_ids() {
                let product = match self.metabolites.get(product_id) {
                    Some(met) => met,
                    None => continue,
                };
                if reactant.compartment.is_none() || product.compartment.is_none() {
                    continue;
                }
                if reactant.compartment == product.compartment {
                    continue;
                }
                let same_species = match (&reactant.formula, &product.formula) {
                    (Some(rf), Some(pf)) => rf == pf,
                    _ => reactant.base_id() == product.base_id(),
                };
                if same_species {
                    return true;
                }
            }
        }
        false
    }

    /// All reactions which are neither boundary, transport, nor biomass reactions
    ///
    /// These purely metabolic reactions are the population over which the
    /// thermodynamic reversibility check is run.
    pub fn pure_metabolic_reactions(&self) -> Vec<&Reaction> {
        self.reactions
            .values()
            .filter(|rxn| !rxn.is_boundary() && !rxn.is_biomass() && !self.is_transport(rxn))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metabolic_model::metabolite::MetaboliteBuilder;
    use crate::metabolic_model::reaction::ReactionBuilder;

    fn metabolite(id: &str, compartment: &str, formula: Option<&str>) -> Metabolite {
        MetaboliteBuilder::default()
            .id(id.to_string())
            .compartment(Some(compartment.to_string()))
            .formula(formula.map(|f| f.to_string()))
            .build()
            .unwrap()
    }

    fn reaction(id: &str, stoich: &[(&str, f64)]) -> Reaction {
        let mut metabolites = IndexMap::new();
        for (met, coef) in stoich {
            metabolites.insert(met.to_string(), *coef);
        }
        ReactionBuilder::default()
            .id(id.to_string())
            .metabolites(metabolites)
            .build()
            .unwrap()
    }

    fn setup_model() -> Model {
        let mut model = Model::new_empty();
        model.add_metabolite(metabolite("glc__D_e", "e", Some("C6H12O6")));
        model.add_metabolite(metabolite("glc__D_c", "c", Some("C6H12O6")));
        model.add_metabolite(metabolite("g6p_c", "c", Some("C6H11O9P")));
        model.add_metabolite(metabolite("f6p_c", "c", Some("C6H11O9P")));
        model
    }

    #[test]
    fn transport_by_formula() {
        let model = setup_model();
        let glct = reaction("GLCt", &[("glc__D_e", -1.), ("glc__D_c", 1.)]);
        assert!(model.is_transport(&glct));
    }

    #[test]
    fn transport_by_base_id() {
        let mut model = Model::new_empty();
        model.add_metabolite(metabolite("na1_e", "e", None));
        model.add_metabolite(metabolite("na1_c", "c", None));
        let nat = reaction("NAt", &[("na1_e", -1.), ("na1_c", 1.)]);
        assert!(model.is_transport(&nat));
    }

    #[test]
    fn isomerase_is_not_transport() {
        // g6p and f6p share a formula but live in the same compartment
        let model = setup_model();
        let pgi = reaction("PGI", &[("g6p_c", -1.), ("f6p_c", 1.)]);
        assert!(!model.is_transport(&pgi));
    }

    #[test]
    fn pure_metabolic_filter() {
        let mut model = setup_model();
        model.add_reaction(reaction("PGI", &[("g6p_c", -1.), ("f6p_c", 1.)]));
        model.add_reaction(reaction("GLCt", &[("glc__D_e", -1.), ("glc__D_c", 1.)]));
        model.add_reaction(reaction("EX_glc__D_e", &[("glc__D_e", -1.)]));
        model.add_reaction(reaction("BIOMASS_core", &[("g6p_c", -1.)]));
        let pure: Vec<&str> = model
            .pure_metabolic_reactions()
            .iter()
            .map(|rxn| rxn.id.as_str())
            .collect();
        assert_eq!(pure, vec!["PGI"]);
    }

    #[test]
    fn empty_model_has_no_pure_reactions() {
        let model = Model::new_empty();
        assert!(model.pure_metabolic_reactions().is_empty());
    }
}
