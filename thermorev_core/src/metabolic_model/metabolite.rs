//! This module provides the metabolite struct representing a metabolite

use std::hash::Hash;

use derive_builder::Builder;

use crate::metabolic_model::annotation::Annotation;

/// Represents a metabolite
#[derive(Builder, Debug, Clone)]
pub struct Metabolite {
    /// Used to identify the metabolite (must be unique)
    pub id: String,
    /// Human Readable name of the metabolite
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Which compartment the metabolite is in
    #[builder(default = "None")]
    pub compartment: Option<String>,
    /// Electrical charge of the Metabolite
    #[builder(default = "0")]
    pub charge: i32,
    /// Chemical Formula of the metabolite
    #[builder(default = "None")]
    pub formula: Option<String>,
    /// Notes about the metabolite
    #[builder(default = "None")]
    pub notes: Option<String>,
    /// Metabolite annotations
    #[builder(default = "Annotation::new()")]
    pub annotation: Annotation,
}

impl Metabolite {
    /// The metabolite id with the compartment suffix stripped
    ///
    /// Model metabolite ids commonly encode the compartment as a suffix
    /// ("glc__D_c" in compartment "c"). The base id identifies the chemical
    /// species across compartments.
    pub fn base_id(&self) -> &str {
        match self.compartment {
            Some(ref compartment) => {
                let suffix = format!("_{}", compartment);
                self.id.strip_suffix(suffix.as_str()).unwrap_or(&self.id)
            }
            None => &self.id,
        }
    }
}

impl Hash for Metabolite {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state); // Hash by id
                             // If the metabolite has an associated compartment, also hash by that
        if let Some(ref compartment) = self.compartment {
            compartment.hash(state)
        };
    }
}
