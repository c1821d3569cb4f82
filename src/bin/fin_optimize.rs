use std::path::PathBuf;

use clap::Parser;
use fin_optimizer::DEFAULT_CONFIG_PATH;
use fin_optimizer::config::load_design;
use fin_optimizer::common::units::{m_to_mm, n_to_kn};
use fin_optimizer::design::{FinDesignProblem, design_finset};
use fin_optimizer::export::{report as export_report, sweep as export_sweep, writer_for_path};

/// Search root chord, tip chord, and span for the lightest flutter-safe, stable finset.
#[derive(Parser, Debug)]
#[command(author, version, about = "Minimum-mass fin optimizer")]
struct Cli {
    /// Design configuration (TOML, or YAML by extension)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Fix the optimizer seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Override the generation budget
    #[arg(long)]
    max_generations: Option<usize>,

    /// Override the population multiplier (members per search dimension)
    #[arg(long)]
    population: Option<usize>,

    /// Write the report as JSON (use '-' for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the stability sweep of the optimized finset as CSV (use '-' for stdout)
    #[arg(long)]
    sweep_csv: Option<PathBuf>,

    /// Print per-generation progress to stderr
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_design(&cli.config)?;
    let problem = FinDesignProblem::from_config(&config)?;

    let mut settings = problem.settings.clone();
    if let Some(seed) = cli.seed {
        settings.seed = Some(seed);
    }
    if let Some(generations) = cli.max_generations {
        settings.max_generations = generations;
    }
    if let Some(population) = cli.population {
        settings.population_multiplier = population;
    }

    let verbose = cli.verbose;
    let report = design_finset(&problem, &settings, |progress| {
        if verbose {
            eprintln!(
                "[gen {:>4}] best = {:.6e}  mean = {:.6e}  spread = {:.3e}  nfev = {}",
                progress.generation,
                progress.best_energy,
                progress.mean_energy,
                progress.energy_spread,
                progress.evaluations
            );
        }
    })?;

    let geometry = &report.design.geometry;
    println!("=== Fin Design: {} ({}) ===", report.vehicle_name, report.material_name);
    println!("Status            : {}", report.outcome.message);
    println!("Total evaluations : {}", report.outcome.evaluations);
    println!();
    println!("Root chord /m     : {:.6}", geometry.chord_root_m);
    println!("Tip chord /m      : {:.6}", geometry.chord_tip_m);
    println!("Fin span /m       : {:.6}", geometry.span_m);
    println!("Total mass /kg    : {:.6}", report.design.mass_kg);
    println!();
    println!("Fin thickness /mm : {:.3}", m_to_mm(report.design.thickness_m));
    println!("Max fin force /kN : {:.3}", n_to_kn(report.design.peak_fin_force_n));
    println!("Min margin /cal   : {:.3}", report.min_margin_cal);

    if let Some(path) = &cli.json {
        let mut writer = writer_for_path(path)?;
        export_report::write_json(&mut *writer, &report)?;
    }
    if let Some(path) = &cli.sweep_csv {
        let mut writer = writer_for_path(path)?;
        export_sweep::write_csv(&mut *writer, &report.sweep)?;
    }

    Ok(())
}
