//! This module provides a struct for representing reactions
use derive_builder::Builder;
use indexmap::IndexMap;

use crate::configuration::CONFIGURATION;
use crate::metabolic_model::annotation::Annotation;

/// SBO term identifying a biomass production reaction
const BIOMASS_SBO: &str = "SBO:0000629";

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone)]
pub struct Reaction {
    /// Used to identify the reaction
    pub id: String,
    /// Metabolite stoichiometry of the reaction
    ///
    /// Maps metabolite ids to coefficients, negative coefficients are consumed and
    /// positive coefficients produced.
    #[builder(default = "IndexMap::new()")]
    pub metabolites: IndexMap<String, f64>,
    /// Human-readable reaction name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Lower flux bound
    #[builder(default = "CONFIGURATION.read().unwrap().lower_bound")]
    pub lower_bound: f64,
    /// Upper flux bound
    #[builder(default = "CONFIGURATION.read().unwrap().upper_bound")]
    pub upper_bound: f64,
    /// Reaction subsystem
    #[builder(default = "None")]
    pub subsystem: Option<String>,
    /// Notes about the reaction
    #[builder(default = "None")]
    pub notes: Option<String>,
    /// Reaction Annotations
    #[builder(default = "Annotation::new()")]
    pub annotation: Annotation,
}

impl Reaction {
    /// The annotated reversibility of the reaction
    ///
    /// A reaction is annotated as reversible when its flux bounds allow flux in both
    /// directions.
    pub fn reversibility(&self) -> bool {
        self.lower_bound < 0f64 && self.upper_bound > 0f64
    }

    /// Whether this is a boundary (exchange, sink, or demand) reaction
    ///
    /// Boundary reactions involve exactly one metabolite which is created from or
    /// destroyed into nothing.
    pub fn is_boundary(&self) -> bool {
        self.metabolites.len() == 1
    }

    /// Whether this is a biomass production reaction
    ///
    /// Identified by the SBO:0000629 annotation, or by "biomass" appearing in the
    /// reaction id or name.
    pub fn is_biomass(&self) -> bool {
        if self.annotation.contains("sbo", BIOMASS_SBO) {
            return true;
        }
        if self.id.to_lowercase().contains("biomass") {
            return true;
        }
        match self.name {
            Some(ref name) => name.to_lowercase().contains("biomass"),
            None => false,
        }
    }

    /// Metabolite ids consumed by the reaction (negative coefficients)
    pub fn reactant_ids(&self) -> impl Iterator<Item = &String> {
        self.metabolites
            .iter()
            .filter(|(_, coef)| **coef < 0f64)
            .map(|(id, _)| id)
    }

    /// Metabolite ids produced by the reaction (positive coefficients)
    pub fn product_ids(&self) -> impl Iterator<Item = &String> {
        self.metabolites
            .iter()
            .filter(|(_, coef)| **coef > 0f64)
            .map(|(id, _)| id)
    }

    /// Build a human readable reaction string from the stoichiometry
    ///
    /// # Examples
    /// ```rust
    /// use indexmap::IndexMap;
    /// use thermorev_core::metabolic_model::reaction::ReactionBuilder;
    /// let mut stoichiometry = IndexMap::new();
    /// stoichiometry.insert("g6p_c".to_string(), -1.0);
    /// stoichiometry.insert("f6p_c".to_string(), 1.0);
    /// let reaction = ReactionBuilder::default()
    ///     .id("PGI".to_string())
    ///     .metabolites(stoichiometry)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(reaction.build_reaction_string(), "g6p_c <=> f6p_c");
    /// ```
    pub fn build_reaction_string(&self) -> String {
        let arrow = if self.reversibility() {
            "<=>"
        } else if self.upper_bound > 0f64 {
            "-->"
        } else {
            "<--"
        };
        let reactants: Vec<String> = self
            .metabolites
            .iter()
            .filter(|(_, coef)| **coef < 0f64)
            .map(|(id, coef)| format_term(id, -coef))
            .collect();
        let products: Vec<String> = self
            .metabolites
            .iter()
            .filter(|(_, coef)| **coef > 0f64)
            .map(|(id, coef)| format_term(id, *coef))
            .collect();
        format!("{} {} {}", reactants.join(" + "), arrow, products.join(" + "))
    }
}

/// Format a single stoichiometric term, omitting unit coefficients
pub(crate) fn format_term(id: &str, coef: f64) -> String {
    if (coef - 1f64).abs() < 1e-9 {
        id.to_string()
    } else if (coef - coef.round()).abs() < 1e-9 {
        format!("{} {}", coef.round() as i64, id)
    } else {
        format!("{} {}", coef, id)
    }
}
