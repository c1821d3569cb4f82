//! Candidate scoring: flutter thickness, finset mass, stability sweep, and max-Q load.

use std::fmt;

use fin_aero::stability_margin;
use fin_geometry::FinGeometry;
use fin_structures::{FlutterInputs, PeakLoadInputs, peak_fin_force, required_thickness};

use crate::problem::FinDesignProblem;

/// Objective value handed to the optimizer for any infeasible candidate.
pub const INFEASIBLE_PENALTY: f64 = 1.0e10;

/// A candidate that passed every constraint, with the quantities worth reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeasibleDesign {
    pub geometry: FinGeometry,
    /// Mass of the whole finset (kg).
    pub mass_kg: f64,
    /// Flutter-limited skin thickness (m).
    pub thickness_m: f64,
    /// Normal force on the finset at max-Q (N).
    pub peak_fin_force_n: f64,
}

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InfeasibleReason {
    /// Tip chord leaves less than the minimum leading-edge sweep.
    InsufficientSweep { chord_tip_m: f64, max_chord_tip_m: f64 },
    /// Margin fell below the minimum at `mach`, the `samples_checked`-th grid point.
    InsufficientMargin {
        mach: f64,
        margin_cal: f64,
        samples_checked: usize,
    },
}

impl fmt::Display for InfeasibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfeasibleReason::InsufficientSweep {
                chord_tip_m,
                max_chord_tip_m,
            } => write!(
                f,
                "tip chord {chord_tip_m:.4} m exceeds the {max_chord_tip_m:.4} m sweep limit"
            ),
            InfeasibleReason::InsufficientMargin {
                mach,
                margin_cal,
                samples_checked,
            } => write!(
                f,
                "stability margin {margin_cal:.3} cal at Mach {mach:.3} (grid point {samples_checked})"
            ),
        }
    }
}

/// Outcome of scoring one candidate geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    Feasible(FeasibleDesign),
    Infeasible(InfeasibleReason),
}

impl Evaluation {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Evaluation::Feasible(_))
    }

    /// Scalar seen by the optimizer: mass when feasible, the penalty otherwise.
    pub fn objective_value(&self) -> f64 {
        match self {
            Evaluation::Feasible(design) => design.mass_kg,
            Evaluation::Infeasible(_) => INFEASIBLE_PENALTY,
        }
    }
}

impl FinDesignProblem {
    /// Score one candidate. Pure: identical inputs always give identical results.
    pub fn evaluate(&self, chord_root_m: f64, chord_tip_m: f64, span_m: f64) -> Evaluation {
        let fins = self.vehicle.fins(chord_root_m, chord_tip_m, span_m);
        let thickness_m = self.required_thickness(&fins);
        let mass_kg = thickness_m
            * fins.planform_area()
            * self.material.density_kg_m3
            * self.vehicle.fin_count as f64;

        let max_chord_tip_m = chord_root_m - self.min_sweep_m;
        if !(chord_tip_m <= max_chord_tip_m) {
            return Evaluation::Infeasible(InfeasibleReason::InsufficientSweep {
                chord_tip_m,
                max_chord_tip_m,
            });
        }

        let angle = self.flight.stability_angle_of_attack_rad;
        for (index, &mach) in self.mach_grid.iter().enumerate() {
            let margin_cal = stability_margin(mach, &self.vehicle, &fins, angle);
            if !(margin_cal >= self.min_margin_cal) {
                return Evaluation::Infeasible(InfeasibleReason::InsufficientMargin {
                    mach,
                    margin_cal,
                    samples_checked: index + 1,
                });
            }
        }

        Evaluation::Feasible(FeasibleDesign {
            geometry: fins,
            mass_kg,
            thickness_m,
            peak_fin_force_n: self.peak_fin_force(&fins),
        })
    }

    /// Optimizer adapter over `[root chord, tip chord, span]`.
    pub fn objective(&self, x: &[f64]) -> f64 {
        self.evaluate(x[0], x[1], x[2]).objective_value()
    }

    /// Flutter-limited thickness for `fins` at the critical flight condition (m).
    pub fn required_thickness(&self, fins: &FinGeometry) -> f64 {
        required_thickness(&FlutterInputs {
            flutter_velocity_m_s: self.flight.flutter_velocity_m_s,
            speed_of_sound_m_s: self.flight.speed_of_sound_m_s,
            ambient_pressure_pa: self.flight.max_q_static_pressure_pa,
            ground_pressure_pa: self.flight.ground_pressure_pa,
            chord_root_m: fins.chord_root_m,
            aspect_ratio: fins.aspect_ratio(),
            shear_modulus_psi: self.material.shear_modulus_psi,
            taper_ratio: fins.taper_ratio(),
        })
    }

    /// Finset normal force at max-Q (N).
    pub fn peak_fin_force(&self, fins: &FinGeometry) -> f64 {
        peak_fin_force(&PeakLoadInputs {
            fin_count: self.vehicle.fin_count,
            reference_area_m2: self.vehicle.body.reference_area(),
            fin_area_m2: fins.planform_area(),
            beta: self.flight.max_q_beta,
            angle_of_attack_rad: self.flight.load_angle_of_attack_rad,
            density_kg_m3: self.flight.max_q_density_kg_m3,
            velocity_m_s: self.flight.max_q_velocity_m_s,
        })
    }
}
