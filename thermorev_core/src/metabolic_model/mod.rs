//! Module providing the representation of a genome scale metabolic model
pub mod annotation;
pub mod metabolite;
pub mod model;
pub mod reaction;
