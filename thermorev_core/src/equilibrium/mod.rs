//! Module providing the thermodynamic estimation service
//!
//! The reversibility check talks to this service through the
//! [`ThermodynamicEstimator`](estimator::ThermodynamicEstimator) and
//! [`CompoundMatcher`](compound::CompoundMatcher) traits. The bundled
//! implementation is backed by a table of standard transformed formation
//! energies, no thermodynamic quantities are derived from structure here.
pub mod compound;
pub mod estimator;
pub mod formula;
pub mod reaction;
