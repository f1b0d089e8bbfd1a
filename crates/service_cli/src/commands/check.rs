//! Check command implementation
//!
//! Prints the effective settings and prices a reference contract with each
//! model.

use pricer_core::types::{OptionKind, PricingInputs};
use pricer_models::PricingModel;
use pricer_strategy::grid::ParallelConfig;
use tracing::info;

use crate::config::EngineSettings;
use crate::output::boxed_table;
use crate::{CliError, Result};

/// S = K = 100, r = 5%, σ = 20%, T = 1.
const REFERENCE_CALL: f64 = 10.4506;

/// Run the check command
pub fn run(settings: &EngineSettings) -> Result<()> {
    info!("Checking engine configuration...");
    settings.validate()?;

    let rows = vec![
        vec!["log_level".to_string(), settings.log_level.to_string()],
        vec!["sample_count".to_string(), settings.sample_count.to_string()],
        vec!["price_band".to_string(), settings.price_band.to_string()],
        vec!["lattice_steps".to_string(), settings.lattice_steps.to_string()],
        vec!["parallel".to_string(), settings.parallel.to_string()],
        vec!["payoff_samples".to_string(), settings.payoff_samples.to_string()],
        vec!["market_close".to_string(), settings.market_close.clone()],
        vec![
            "rayon".to_string(),
            ParallelConfig::default()
                .should_parallelize(usize::MAX)
                .to_string(),
        ],
    ];
    println!(
        "{}",
        boxed_table(&["setting".to_string(), "value".to_string()], &rows)
    );

    let inputs = PricingInputs::new(100.0, 100.0, 1.0, 0.05, 0.0, 0.2, OptionKind::Call);
    let closed_form = PricingModel::EuropeanClosedForm.price(&inputs)?;
    let lattice = PricingModel::AmericanLattice {
        steps: settings.lattice_steps,
    }
    .price(&inputs)?;

    println!("closed form: {:.4} (expected {:.4})", closed_form, REFERENCE_CALL);
    println!("lattice ({} steps): {:.4}", settings.lattice_steps, lattice);

    if (closed_form - REFERENCE_CALL).abs() > 1e-3 {
        return Err(CliError::InvalidArgument(format!(
            "closed-form reference price off: {:.6}",
            closed_form
        )));
    }

    info!("Check complete");
    Ok(())
}
