//! Fin design façade: builds the evaluation problem from configuration, scores candidate
//! geometries, and drives the global search toward the lightest stable finset.

pub mod driver;
pub mod objective;
pub mod problem;
pub mod sweep;

pub use driver::{FinDesignReport, OptimizationOutcome, design_finset, optimize};
pub use objective::{Evaluation, FeasibleDesign, INFEASIBLE_PENALTY, InfeasibleReason};
pub use problem::{FinDesignProblem, FlightState, Material};
pub use sweep::{StabilitySample, minimum_margin, sweep_stability};

use fin_config::ConfigError;
use fin_evolution::EvolutionError;

/// Top-level design error.
#[derive(Debug, thiserror::Error)]
pub enum DesignError {
    #[error("configuration rejected: {0}")]
    Config(#[from] ConfigError),
    #[error("optimizer setup failed: {0}")]
    Evolution(#[from] EvolutionError),
    #[error(
        "no feasible fin geometry found after {evaluations} evaluations (best candidate: {reason})"
    )]
    NoFeasibleGeometry {
        evaluations: usize,
        reason: InfeasibleReason,
    },
}
