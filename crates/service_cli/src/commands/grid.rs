//! Grid command implementation
//!
//! Builds the date × price profit grid for a scenario.

use std::path::Path;

use pricer_strategy::{GridEngine, Strategy, ValuationGrid};
use serde::Serialize;
use tracing::info;

use crate::config::EngineSettings;
use crate::output::{boxed_table, to_json, OutputFormat};
use crate::scenario::Scenario;
use crate::{CliError, Result};

/// Command-line overrides for the grid axes.
#[derive(Debug, Clone, Default)]
pub struct GridOptions {
    /// Lower price bound
    pub lower: Option<f64>,
    /// Upper price bound
    pub upper: Option<f64>,
    /// Price sample count
    pub samples: Option<usize>,
    /// Print strategy value instead of profit
    pub show_value: bool,
}

#[derive(Serialize)]
struct GridReport<'a> {
    ticker: &'a str,
    spot: f64,
    cost_basis: f64,
    legs: usize,
    grid: &'a ValuationGrid,
}

/// Builds the grid for `strategy` as of the scenario's valuation instant.
pub fn build(
    scenario: &Scenario,
    strategy: &Strategy,
    settings: &EngineSettings,
    options: &GridOptions,
) -> Result<ValuationGrid> {
    let mut engine = GridEngine::new(settings.grid_config()?);
    if let Some(samples) = options.samples {
        engine.set_sample_count(samples)?;
    }

    let bounds = match (options.lower, options.upper) {
        (Some(lower), Some(upper)) => Some((lower, upper)),
        (None, None) => scenario.price_bounds(),
        _ => {
            return Err(CliError::InvalidArgument(
                "--lower and --upper must be given together".to_string(),
            ))
        }
    };
    if let Some((lower, upper)) = bounds {
        engine.set_price_bounds(lower, upper)?;
    }

    Ok(engine.build(strategy, scenario.as_of())?)
}

/// Renders a grid in the requested format.
pub fn render(
    strategy: &Strategy,
    grid: &ValuationGrid,
    format: OutputFormat,
    show_value: bool,
) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&GridReport {
            ticker: strategy.ticker(),
            spot: strategy.spot(),
            cost_basis: strategy.cost_basis(),
            legs: strategy.len(),
            grid,
        }),
        OutputFormat::Table => {
            let cells = if show_value { &grid.value } else { &grid.profit };
            let mut header = vec!["date".to_string()];
            header.extend(grid.prices.iter().map(|p| format!("{:.2}", p)));

            let rows: Vec<Vec<String>> = grid
                .instants
                .iter()
                .zip(cells)
                .map(|(instant, row)| {
                    let mut line = vec![instant.format("%Y-%m-%d").to_string()];
                    line.extend(row.iter().map(|v| format!("{:.2}", v)));
                    line
                })
                .collect();

            Ok(boxed_table(&header, &rows))
        }
    }
}

/// Run the grid command
pub fn run(
    scenario_path: &Path,
    settings: &EngineSettings,
    options: &GridOptions,
    format: &str,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    info!("Building valuation grid...");
    info!("  Scenario: {}", scenario_path.display());

    let scenario = Scenario::load(scenario_path)?;
    let strategy = scenario.strategy()?;
    let grid = build(&scenario, &strategy, settings, options)?;

    let (dates, prices) = grid.shape();
    info!("Grid complete: {} dates × {} prices", dates, prices);

    println!("{}", render(&strategy, &grid, format, options.show_value)?);
    Ok(())
}
