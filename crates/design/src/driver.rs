//! Global search driver and final design report.

use fin_evolution::{EvolutionSettings, GenerationReport, minimize_with_observer};
use fin_geometry::FinGeometry;

use crate::DesignError;
use crate::objective::{Evaluation, FeasibleDesign};
use crate::problem::FinDesignProblem;
use crate::sweep::{StabilitySample, minimum_margin, sweep_stability};

/// Raw result of the differential-evolution search.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationOutcome {
    pub best_geometry: FinGeometry,
    /// Objective value of the best point; the penalty if nothing feasible was found.
    pub best_objective: f64,
    pub evaluations: usize,
    pub generations: usize,
    pub converged: bool,
    pub message: &'static str,
}

/// Optimized finset together with the side quantities recovered by re-evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct FinDesignReport {
    pub vehicle_name: String,
    pub material_name: String,
    pub outcome: OptimizationOutcome,
    pub design: FeasibleDesign,
    pub sweep: Vec<StabilitySample>,
    pub min_margin_cal: f64,
}

/// Run the search. The optimizer only ever sees the scalar objective.
pub fn optimize<O>(
    problem: &FinDesignProblem,
    settings: &EvolutionSettings,
    observer: O,
) -> Result<OptimizationOutcome, DesignError>
where
    O: FnMut(&GenerationReport),
{
    let minimum = minimize_with_observer(
        |x: &[f64]| problem.objective(x),
        &problem.bounds,
        settings,
        observer,
    )?;

    Ok(OptimizationOutcome {
        best_geometry: problem.vehicle.fins(minimum.x[0], minimum.x[1], minimum.x[2]),
        best_objective: minimum.energy,
        evaluations: minimum.evaluations,
        generations: minimum.generations,
        converged: minimum.converged(),
        message: minimum.message(),
    })
}

/// Optimize and re-evaluate the winner once to recover thickness, load, and its sweep.
pub fn design_finset<O>(
    problem: &FinDesignProblem,
    settings: &EvolutionSettings,
    observer: O,
) -> Result<FinDesignReport, DesignError>
where
    O: FnMut(&GenerationReport),
{
    let outcome = optimize(problem, settings, observer)?;
    let best = outcome.best_geometry;

    let design = match problem.evaluate(best.chord_root_m, best.chord_tip_m, best.span_m) {
        Evaluation::Feasible(design) => design,
        Evaluation::Infeasible(reason) => {
            return Err(DesignError::NoFeasibleGeometry {
                evaluations: outcome.evaluations,
                reason,
            });
        }
    };

    let sweep = sweep_stability(problem, &design.geometry);
    let min_margin_cal = minimum_margin(&sweep).unwrap_or(f64::NAN);

    Ok(FinDesignReport {
        vehicle_name: problem.vehicle.name.clone(),
        material_name: problem.material.name.clone(),
        outcome,
        design,
        sweep,
        min_margin_cal,
    })
}
