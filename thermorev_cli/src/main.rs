//! Command line front end for the thermodynamic reversibility check
//!
//! Loads a metabolic model and a compound table, runs the check, and prints
//! the report. A model with flagged reactions is still a successful run, the
//! check has no mandatory pass criterion.
//!
//! ```bash
//! thermorev model.json --compounds compounds.json
//! thermorev model.json --compounds compounds.json --ln-gamma 5 --format json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use thermorev_core::equilibrium::compound::{CompoundRegistry, RegistryError};
use thermorev_core::equilibrium::estimator::TabulatedEstimator;
use thermorev_core::io::json::JsonError;
use thermorev_core::metabolic_model::model::Model;
use thermorev_core::reversibility::find_incorrect_thermodynamic_reversibility;
use thermorev_core::reversibility::report::ReversibilityReport;

#[derive(Parser)]
#[command(
    name = "thermorev",
    version,
    about = "Check annotated reaction reversibility against a thermodynamic estimate"
)]
struct Cli {
    /// Metabolic model in COBRA JSON format
    model: PathBuf,

    /// Compound table with standard transformed formation energies
    #[arg(long)]
    compounds: PathBuf,

    /// Cutoff on the log reversibility index
    #[arg(long, default_value_t = 3.0)]
    ln_gamma: f64,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Model(#[from] JsonError),
    #[error(transparent)]
    Compounds(#[from] RegistryError),
    #[error("Unable to serialize the report")]
    Serialize(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "thermorev=info".into());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let model = Model::read_json(&cli.model)?;
    let registry = CompoundRegistry::read_json(&cli.compounds)?;
    tracing::info!(
        model = model.id.as_deref().unwrap_or("unnamed"),
        reactions = model.reactions.len(),
        compounds = registry.len(),
        "loaded inputs"
    );
    let estimator = TabulatedEstimator::new(registry);
    let report = find_incorrect_thermodynamic_reversibility(
        &model,
        &estimator,
        estimator.registry(),
        Some(cli.ln_gamma),
    );
    match cli.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => print_text_report(&report),
    }
    Ok(())
}

fn print_text_report(report: &ReversibilityReport) {
    println!("{}", report);
    print_bucket("Incorrect reversibility", &report.incorrect_reversibility);
    print_bucket("Incomplete mapping", &report.incomplete_mapping);
    print_bucket("Problematic calculation", &report.problematic_calculation);
    print_bucket("Unbalanced", &report.unbalanced);
}

fn print_bucket(title: &str, ids: &[String]) {
    if ids.is_empty() {
        return;
    }
    println!();
    println!("{}:", title);
    for id in ids {
        println!("  {}", id);
    }
}
