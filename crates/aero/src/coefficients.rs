//! Closed-form normal-force and centre-of-pressure correlations.
//!
//! Slopes are per radian and angles are radians. Fin slopes are for the whole finset of
//! `fin_count` panels, before fin-body interference.

use std::f64::consts::PI;

use fin_core::constants::GAMMA_AIR;

use crate::regime::{SUBSONIC_LIMIT, SUPERSONIC_CP_ONSET};

/// Galejs body-lift constant.
const BODY_LIFT_FACTOR: f64 = 1.1;
const SUBSONIC_CP_FRACTION: f64 = 0.25;
const SUPERSONIC_CP_FRACTION_MAX: f64 = 0.5;

/// Inverse Prandtl factor `sqrt(|1 - M²|)`.
pub fn prandtl_beta(mach: f64) -> f64 {
    (1.0 - mach * mach).abs().sqrt()
}

/// Barrowman subsonic finset normal-force slope.
pub fn fin_normal_force_slope_subsonic(
    fin_count: u32,
    span_m: f64,
    reference_area_m2: f64,
    fin_area_m2: f64,
    beta: f64,
    mid_chord_sweep_rad: f64,
) -> f64 {
    let span_sq = span_m * span_m;
    let compressibility = beta * span_sq / (fin_area_m2 * mid_chord_sweep_rad.cos());
    let single = 2.0 * PI * (span_sq / reference_area_m2)
        / (1.0 + (1.0 + compressibility * compressibility).sqrt());
    0.5 * fin_count as f64 * single
}

/// Busemann second-order supersonic finset normal-force slope.
///
/// The Mach number is recovered from `beta` (`M² = 1 + β²`), so `beta` must be the
/// supersonic branch of [`prandtl_beta`].
pub fn fin_normal_force_slope_supersonic(
    fin_count: u32,
    reference_area_m2: f64,
    fin_area_m2: f64,
    beta: f64,
    angle_of_attack_rad: f64,
) -> f64 {
    let beta_sq = beta * beta;
    let mach_sq = 1.0 + beta_sq;
    let k1 = 2.0 / beta;
    let k2 = ((GAMMA_AIR + 1.0) * mach_sq * mach_sq - 4.0 * beta_sq) / (4.0 * beta_sq * beta_sq);
    0.5 * fin_count as f64 * (fin_area_m2 / reference_area_m2) * (k1 + k2 * angle_of_attack_rad)
}

/// Supersonic fin CP as a fraction of the MAC, measured from the MAC leading edge.
///
/// `aspect` is the two-panel aspect ratio `2 s² / A_fin`. Clamped to the physical range
/// between the subsonic quarter chord and the mid chord.
pub fn fin_cp_fraction_supersonic(aspect: f64, beta: f64) -> f64 {
    let u = aspect * beta;
    let denominator = 2.0 * u - 1.0;
    if denominator <= 0.0 {
        return SUPERSONIC_CP_FRACTION_MAX;
    }
    ((u - 0.67) / denominator).clamp(SUBSONIC_CP_FRACTION, SUPERSONIC_CP_FRACTION_MAX)
}

/// d/dM of [`fin_cp_fraction_supersonic`]; zero wherever the clamp is active.
fn fin_cp_fraction_supersonic_slope(aspect: f64, mach: f64) -> f64 {
    let beta = prandtl_beta(mach);
    let u = aspect * beta;
    let denominator = 2.0 * u - 1.0;
    if denominator <= 0.0 || beta == 0.0 {
        return 0.0;
    }
    let fraction = (u - 0.67) / denominator;
    if !(SUBSONIC_CP_FRACTION..=SUPERSONIC_CP_FRACTION_MAX).contains(&fraction) {
        return 0.0;
    }
    0.34 / (denominator * denominator) * aspect * mach / beta
}

/// Transonic fin CP as a fraction of the MAC.
///
/// Cubic Hermite blend from the quarter chord (zero slope) at the subsonic limit to the
/// supersonic value and slope at the supersonic CP onset, so the fin CP is continuous at
/// both band edges. Outside the blend window the end values are held.
pub fn fin_cp_fraction_transonic(aspect: f64, mach: f64) -> f64 {
    let start = SUBSONIC_LIMIT;
    let end = SUPERSONIC_CP_ONSET;
    let width = end - start;
    let t = ((mach - start) / width).clamp(0.0, 1.0);

    let y0 = SUBSONIC_CP_FRACTION;
    let y1 = fin_cp_fraction_supersonic(aspect, prandtl_beta(end));
    let m1 = fin_cp_fraction_supersonic_slope(aspect, end) * width;

    let t2 = t * t;
    let t3 = t2 * t;
    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;
    h00 * y0 + h01 * y1 + h11 * m1
}

/// Galejs body-lift normal-force slope; grows linearly with angle of attack.
pub fn body_normal_force_slope(
    planform_area_m2: f64,
    reference_area_m2: f64,
    angle_of_attack_rad: f64,
) -> f64 {
    BODY_LIFT_FACTOR * (planform_area_m2 / reference_area_m2) * angle_of_attack_rad
}

/// Body-lift centre of pressure: planform centroid of the tube behind the nose.
pub fn body_centre_of_pressure(nose_length_m: f64, body_length_m: f64) -> f64 {
    nose_length_m + 0.5 * body_length_m
}

/// Normal-force coefficient at a given angle of attack from its slope.
pub fn normal_force_coefficient(slope: f64, angle_of_attack_rad: f64) -> f64 {
    slope * angle_of_attack_rad
}

/// Dimensional normal force `½ ρ v² A_ref C_N` (N).
pub fn normal_force(
    coefficient: f64,
    density_kg_m3: f64,
    reference_area_m2: f64,
    velocity_m_s: f64,
) -> f64 {
    0.5 * density_kg_m3 * velocity_m_s * velocity_m_s * reference_area_m2 * coefficient
}
