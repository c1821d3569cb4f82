use std::path::PathBuf;

use clap::Parser;
use fin_optimizer::DEFAULT_CONFIG_PATH;
use fin_optimizer::config::load_design;
use fin_optimizer::common::units::{m_to_mm, n_to_kn};
use fin_optimizer::design::{Evaluation, FinDesignProblem, minimum_margin, sweep_stability};
use fin_optimizer::export::{sweep, writer_for_path};

/// Evaluate one fin geometry: feasibility, mass, and margin across the Mach grid.
#[derive(Parser, Debug)]
#[command(author, version, about = "Stability sweep for a single fin geometry")]
struct Cli {
    /// Design configuration (TOML, or YAML by extension)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Root chord in metres
    #[arg(long)]
    root_chord: f64,

    /// Tip chord in metres
    #[arg(long)]
    tip_chord: f64,

    /// Fin span in metres
    #[arg(long)]
    span: f64,

    /// Write the sweep as CSV (use '-' for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if !(cli.root_chord > 0.0 && cli.tip_chord >= 0.0 && cli.span > 0.0) {
        anyhow::bail!("root chord and span must be positive and tip chord non-negative");
    }
    let config = load_design(&cli.config)?;
    let problem = FinDesignProblem::from_config(&config)?;

    let fins = problem.vehicle.fins(cli.root_chord, cli.tip_chord, cli.span);
    let samples = sweep_stability(&problem, &fins);

    println!("=== Stability Sweep: {} ===", problem.vehicle.name);
    println!("{:>8}  {:<17} {:>10} {:>10}", "Mach", "regime", "margin", "CP /m");
    for sample in &samples {
        let flag = if sample.margin_cal < problem.min_margin_cal { "  <" } else { "" };
        println!(
            "{:>8.3}  {:<17} {:>10.3} {:>10.4}{}",
            sample.mach,
            sample.regime.label(),
            sample.margin_cal,
            sample.centre_of_pressure_m,
            flag
        );
    }
    if let Some(min) = minimum_margin(&samples) {
        println!("Min margin /cal   : {:.3} (required {:.3})", min, problem.min_margin_cal);
    }

    match problem.evaluate(cli.root_chord, cli.tip_chord, cli.span) {
        Evaluation::Feasible(design) => {
            println!("Feasible          : yes");
            println!("Total mass /kg    : {:.6}", design.mass_kg);
            println!("Fin thickness /mm : {:.3}", m_to_mm(design.thickness_m));
            println!("Max fin force /kN : {:.3}", n_to_kn(design.peak_fin_force_n));
        }
        Evaluation::Infeasible(reason) => {
            println!("Feasible          : no ({reason})");
        }
    }

    if let Some(path) = &cli.csv {
        let mut writer = writer_for_path(path)?;
        sweep::write_csv(&mut *writer, &samples)?;
    }

    Ok(())
}
