//! Flutter-limited skin thickness and peak aerodynamic fin loads.

use fin_aero::coefficients::{
    fin_normal_force_slope_supersonic, normal_force, normal_force_coefficient,
};
use fin_core::constants::NACA_4197_FLUTTER_CONSTANT;

/// Flight and material state at the flutter-critical point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlutterInputs {
    /// Velocity the fin must survive without flutter (m/s).
    pub flutter_velocity_m_s: f64,
    pub speed_of_sound_m_s: f64,
    /// Static pressure at the critical point (Pa).
    pub ambient_pressure_pa: f64,
    /// Launch-site static pressure (Pa).
    pub ground_pressure_pa: f64,
    pub chord_root_m: f64,
    pub aspect_ratio: f64,
    /// Shear modulus in psi; the empirical constant is calibrated in psi.
    pub shear_modulus_psi: f64,
    pub taper_ratio: f64,
}

/// Dimensionless flutter parameter, equal to `(t / c_root)³` at the flutter boundary.
pub fn flutter_parameter(inputs: &FlutterInputs) -> f64 {
    let mach = inputs.flutter_velocity_m_s / inputs.speed_of_sound_m_s;
    let pressure_ratio = inputs.ambient_pressure_pa / inputs.ground_pressure_pa;
    let aspect = inputs.aspect_ratio;
    mach * mach
        * NACA_4197_FLUTTER_CONSTANT
        * pressure_ratio
        * ((inputs.taper_ratio + 1.0) / 2.0)
        * aspect.powi(3)
        / (inputs.shear_modulus_psi * (aspect + 2.0))
}

/// Minimum solid-fin thickness whose NACA TN 4197 flutter speed equals the target (m).
///
/// `aspect_ratio` and `shear_modulus_psi` must be strictly positive; the configuration
/// layer rejects anything else before optimisation starts.
pub fn required_thickness(inputs: &FlutterInputs) -> f64 {
    inputs.chord_root_m * flutter_parameter(inputs).cbrt()
}

/// Max-Q state used to size the finset side load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakLoadInputs {
    pub fin_count: u32,
    pub reference_area_m2: f64,
    pub fin_area_m2: f64,
    /// Inverse Prandtl factor at max-Q.
    pub beta: f64,
    pub angle_of_attack_rad: f64,
    pub density_kg_m3: f64,
    pub velocity_m_s: f64,
}

/// Aerodynamic normal force on the whole finset at max-Q (N).
pub fn peak_fin_force(inputs: &PeakLoadInputs) -> f64 {
    let slope = fin_normal_force_slope_supersonic(
        inputs.fin_count,
        inputs.reference_area_m2,
        inputs.fin_area_m2,
        inputs.beta,
        inputs.angle_of_attack_rad,
    );
    let coefficient = normal_force_coefficient(slope, inputs.angle_of_attack_rad);
    normal_force(
        coefficient,
        inputs.density_kg_m3,
        inputs.reference_area_m2,
        inputs.velocity_m_s,
    )
}
