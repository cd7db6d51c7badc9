//! Core rust implementation of ThermoRev, a crate for checking whether the annotated
//! reversibility of metabolic reactions agrees with a thermodynamics based estimate.
#![allow(unused)]

pub mod equilibrium;
pub mod io;
pub mod metabolic_model;
pub mod reversibility;
mod configuration;
