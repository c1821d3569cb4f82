//! Static stability margin from the nosecone, body, and finset contributions.

use fin_geometry::{FinGeometry, Vehicle};

use crate::coefficients::{
    body_centre_of_pressure, body_normal_force_slope, fin_cp_fraction_supersonic,
    fin_cp_fraction_transonic, fin_normal_force_slope_subsonic, fin_normal_force_slope_supersonic,
    prandtl_beta,
};
use crate::regime::{CentreOfPressureModel, MachRegime, NormalForceModel};

/// Normal-force slope and its point of action for one component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution {
    pub normal_force_slope: f64,
    /// Measured aft from the nose tip (m).
    pub centre_of_pressure_m: f64,
}

/// Everything computed for one (geometry, Mach) pair. Never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityBreakdown {
    pub mach: f64,
    pub regime: MachRegime,
    pub beta: f64,
    pub nosecone: Contribution,
    pub body: Contribution,
    /// Finset slope including fin-body interference.
    pub fins: Contribution,
    pub centre_of_pressure_m: f64,
    /// `(CP - CoM) / diameter`; positive means CP aft of CoM.
    pub margin_cal: f64,
}

/// Stability margin in calibres for one Mach number.
pub fn stability_margin(
    mach: f64,
    vehicle: &Vehicle,
    fins: &FinGeometry,
    angle_of_attack_rad: f64,
) -> f64 {
    analyse(mach, vehicle, fins, angle_of_attack_rad).margin_cal
}

/// Fin centre of pressure (from the nose tip) under the CP correlation of `regime`.
pub fn fin_centre_of_pressure(
    mach: f64,
    regime: MachRegime,
    vehicle: &Vehicle,
    fins: &FinGeometry,
) -> f64 {
    let leading_edge = vehicle.fin_leading_edge_station(fins);
    let mac = fins.mean_aerodynamic_chord();
    let mac_offset = fins.mac_leading_edge_offset();
    let aspect = fins.panel_pair_aspect_ratio();

    match regime.centre_of_pressure_model() {
        CentreOfPressureModel::Barrowman => fins.subsonic_centre_of_pressure() + leading_edge,
        CentreOfPressureModel::Transonic => {
            fin_cp_fraction_transonic(aspect, mach) * mac + leading_edge + mac_offset
        }
        CentreOfPressureModel::Supersonic => {
            fin_cp_fraction_supersonic(aspect, prandtl_beta(mach)) * mac + leading_edge + mac_offset
        }
    }
}

/// Full breakdown of the three contributions and the resulting margin.
///
/// Divides by the summed normal-force slope; the all-zero case is physically degenerate
/// and is excluded by configuration validation rather than guarded here.
pub fn analyse(
    mach: f64,
    vehicle: &Vehicle,
    fins: &FinGeometry,
    angle_of_attack_rad: f64,
) -> StabilityBreakdown {
    let regime = MachRegime::classify(mach);
    let beta = prandtl_beta(mach);
    let body = &vehicle.body;
    let reference_area = body.reference_area();
    let fin_area = fins.planform_area();

    let fin_slope = match regime.normal_force_model() {
        NormalForceModel::Subsonic => fin_normal_force_slope_subsonic(
            vehicle.fin_count,
            fins.span_m,
            reference_area,
            fin_area,
            beta,
            fins.mid_chord_sweep_rad(),
        ),
        NormalForceModel::Supersonic => fin_normal_force_slope_supersonic(
            vehicle.fin_count,
            reference_area,
            fin_area,
            beta,
            angle_of_attack_rad,
        ),
    };

    let nosecone = Contribution {
        normal_force_slope: vehicle.nosecone.normal_force_slope,
        centre_of_pressure_m: vehicle.nosecone.centre_of_pressure(),
    };
    let body_contribution = Contribution {
        normal_force_slope: body_normal_force_slope(
            body.planform_area(),
            reference_area,
            angle_of_attack_rad,
        ),
        centre_of_pressure_m: body_centre_of_pressure(vehicle.nosecone.length_m, body.length_m),
    };
    let fin_contribution = Contribution {
        normal_force_slope: fin_slope * fins.body_interference_factor(),
        centre_of_pressure_m: fin_centre_of_pressure(mach, regime, vehicle, fins),
    };

    let parts = [nosecone, body_contribution, fin_contribution];
    let total_slope: f64 = parts.iter().map(|p| p.normal_force_slope).sum();
    let moment: f64 = parts
        .iter()
        .map(|p| p.normal_force_slope * p.centre_of_pressure_m)
        .sum();
    let centre_of_pressure = moment / total_slope;

    StabilityBreakdown {
        mach,
        regime,
        beta,
        nosecone,
        body: body_contribution,
        fins: fin_contribution,
        centre_of_pressure_m: centre_of_pressure,
        margin_cal: (centre_of_pressure - vehicle.centre_of_mass_m) / body.diameter_m,
    }
}
