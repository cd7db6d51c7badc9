use std::sync::{LazyLock, RwLock};

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

pub struct Configuration {
    pub lower_bound: f64,
    pub upper_bound: f64,
    /// Cutoff on the log reversibility index above which a reaction is
    /// considered thermodynamically irreversible
    pub ln_gamma: f64,
    /// Assumed mean metabolite concentration in mol/L
    pub mean_concentration: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            lower_bound: -1000.,
            upper_bound: 1000.,
            ln_gamma: 3.,
            mean_concentration: 1e-4,
        }
    }
}
