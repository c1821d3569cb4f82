//! Full stability profile of one geometry across the Mach grid.

use fin_aero::{MachRegime, analyse};
use fin_geometry::FinGeometry;

use crate::problem::FinDesignProblem;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilitySample {
    pub mach: f64,
    pub regime: MachRegime,
    pub margin_cal: f64,
    /// Overall centre of pressure from the nose tip (m).
    pub centre_of_pressure_m: f64,
}

/// Evaluate every grid point, without the early exit the objective uses.
pub fn sweep_stability(problem: &FinDesignProblem, fins: &FinGeometry) -> Vec<StabilitySample> {
    let angle = problem.flight.stability_angle_of_attack_rad;
    problem
        .mach_grid
        .iter()
        .map(|&mach| {
            let breakdown = analyse(mach, &problem.vehicle, fins, angle);
            StabilitySample {
                mach,
                regime: breakdown.regime,
                margin_cal: breakdown.margin_cal,
                centre_of_pressure_m: breakdown.centre_of_pressure_m,
            }
        })
        .collect()
}

/// Smallest margin in a sweep, or `None` for an empty one.
pub fn minimum_margin(samples: &[StabilitySample]) -> Option<f64> {
    samples
        .iter()
        .map(|s| s.margin_cal)
        .fold(None, |min, m| Some(min.map_or(m, |current: f64| current.min(m))))
}
