use approx::assert_relative_eq;
use fin_optimizer::aero::coefficients::{
    fin_cp_fraction_supersonic, fin_cp_fraction_transonic, prandtl_beta,
};
use fin_optimizer::aero::{
    CentreOfPressureModel, MachRegime, NormalForceModel, analyse, fin_centre_of_pressure,
    stability_margin,
};
use fin_optimizer::geometry::{BodyGeometry, FinGeometry, NoseShape, Nosecone, Vehicle};

const ALPHA: f64 = 0.034_906_585_039_886_59; // 2 degrees

fn vehicle() -> Vehicle {
    Vehicle {
        name: "Panthera".to_string(),
        total_length_m: 5.0,
        centre_of_mass_m: 2.9,
        fin_count: 4,
        body: BodyGeometry {
            diameter_m: 0.2,
            length_m: 4.2,
        },
        nosecone: Nosecone::barrowman(NoseShape::Ogive, 0.8),
    }
}

fn fins() -> FinGeometry {
    FinGeometry::new(1.0, 0.5, 0.3, 0.2)
}

#[test]
fn regime_table_matches_band_edges() {
    assert_eq!(MachRegime::classify(0.3), MachRegime::Subsonic);
    assert_eq!(MachRegime::classify(0.8), MachRegime::Subsonic);
    assert_eq!(MachRegime::classify(0.81), MachRegime::Transonic);
    assert_eq!(MachRegime::classify(1.19), MachRegime::Transonic);
    assert_eq!(MachRegime::classify(1.2), MachRegime::TransSupersonic);
    assert_eq!(MachRegime::classify(2.0), MachRegime::TransSupersonic);
    assert_eq!(MachRegime::classify(2.01), MachRegime::Supersonic);
    assert_eq!(MachRegime::classify(5.5), MachRegime::Supersonic);
}

#[test]
fn transonic_bands_straddle_correlations() {
    assert_eq!(
        MachRegime::Transonic.normal_force_model(),
        NormalForceModel::Subsonic
    );
    assert_eq!(
        MachRegime::Transonic.centre_of_pressure_model(),
        CentreOfPressureModel::Transonic
    );
    assert_eq!(
        MachRegime::TransSupersonic.normal_force_model(),
        NormalForceModel::Supersonic
    );
    assert_eq!(
        MachRegime::TransSupersonic.centre_of_pressure_model(),
        CentreOfPressureModel::Transonic
    );
    assert_eq!(
        MachRegime::Subsonic.centre_of_pressure_model(),
        CentreOfPressureModel::Barrowman
    );
    assert_eq!(
        MachRegime::Supersonic.centre_of_pressure_model(),
        CentreOfPressureModel::Supersonic
    );
}

#[test]
fn fin_geometry_derived_quantities() {
    let fins = fins();
    assert_relative_eq!(fins.sweep_length_m, 0.5);
    assert_relative_eq!(fins.planform_area(), 0.225);
    assert_relative_eq!(fins.aspect_ratio(), 0.4, max_relative = 1e-12);
    assert_relative_eq!(fins.taper_ratio(), 0.5);
    // 2/3 (1.5 - 0.5/1.5)
    assert_relative_eq!(fins.mean_aerodynamic_chord(), 0.777_777_777_8, max_relative = 1e-9);
    // 0.5/3 · 2.0/1.5
    assert_relative_eq!(fins.mac_leading_edge_offset(), 0.222_222_222_2, max_relative = 1e-9);
    assert_relative_eq!(fins.body_interference_factor(), 1.25, max_relative = 1e-12);
}

#[test]
fn fin_cp_is_continuous_across_regime_edges() {
    let vehicle = vehicle();
    let fins = fins();
    let eps = 1e-9;

    let below = fin_centre_of_pressure(0.8, MachRegime::Subsonic, &vehicle, &fins);
    let above = fin_centre_of_pressure(0.8 + eps, MachRegime::Transonic, &vehicle, &fins);
    assert!((below - above).abs() < 1e-6, "jump at 0.8: {below} vs {above}");

    let below = fin_centre_of_pressure(1.2 - eps, MachRegime::Transonic, &vehicle, &fins);
    let above = fin_centre_of_pressure(1.2, MachRegime::TransSupersonic, &vehicle, &fins);
    assert!((below - above).abs() < 1e-6, "jump at 1.2: {below} vs {above}");

    let below = fin_centre_of_pressure(2.0, MachRegime::TransSupersonic, &vehicle, &fins);
    let above = fin_centre_of_pressure(2.0 + eps, MachRegime::Supersonic, &vehicle, &fins);
    assert!((below - above).abs() < 1e-6, "jump at 2.0: {below} vs {above}");
}

#[test]
fn transonic_blend_starts_at_quarter_chord_and_meets_supersonic_value() {
    let aspect = 1.2;
    assert_relative_eq!(fin_cp_fraction_transonic(aspect, 0.8), 0.25, epsilon = 1e-12);
    assert_relative_eq!(
        fin_cp_fraction_transonic(aspect, 2.0),
        fin_cp_fraction_supersonic(aspect, prandtl_beta(2.0)),
        epsilon = 1e-12
    );
    let mid = fin_cp_fraction_transonic(aspect, 1.4);
    assert!((0.25..=0.5).contains(&mid));
}

#[test]
fn margin_is_continuous_at_subsonic_edge() {
    let vehicle = vehicle();
    let fins = fins();
    let below = stability_margin(0.8, &vehicle, &fins, ALPHA);
    let above = stability_margin(0.8 + 1e-9, &vehicle, &fins, ALPHA);
    assert!((below - above).abs() < 1e-6);
}

#[test]
fn normal_force_may_jump_at_supersonic_onset() {
    let vehicle = vehicle();
    let fins = fins();
    let below = analyse(1.2 - 1e-6, &vehicle, &fins, ALPHA);
    let above = analyse(1.2, &vehicle, &fins, ALPHA);
    assert_eq!(below.regime, MachRegime::Transonic);
    assert_eq!(above.regime, MachRegime::TransSupersonic);
    assert!((below.fins.normal_force_slope - above.fins.normal_force_slope).abs() > 1e-3);
    assert!((below.fins.centre_of_pressure_m - above.fins.centre_of_pressure_m).abs() < 1e-6);
}

#[test]
fn breakdown_combines_three_contributions() {
    let vehicle = vehicle();
    let fins = fins();
    let result = analyse(0.5, &vehicle, &fins, ALPHA);

    assert_relative_eq!(result.beta, 0.75_f64.sqrt(), max_relative = 1e-12);
    assert_relative_eq!(result.nosecone.normal_force_slope, 2.0);
    assert_relative_eq!(result.nosecone.centre_of_pressure_m, 0.8 * 0.466, max_relative = 1e-12);
    assert_relative_eq!(result.body.centre_of_pressure_m, 2.9, max_relative = 1e-12);

    let parts = [result.nosecone, result.body, result.fins];
    let slope: f64 = parts.iter().map(|p| p.normal_force_slope).sum();
    let moment: f64 = parts
        .iter()
        .map(|p| p.normal_force_slope * p.centre_of_pressure_m)
        .sum();
    assert_relative_eq!(result.centre_of_pressure_m, moment / slope, max_relative = 1e-12);
    assert_relative_eq!(
        result.margin_cal,
        (result.centre_of_pressure_m - 2.9) / 0.2,
        max_relative = 1e-12
    );
}

#[test]
fn larger_fins_move_centre_of_pressure_aft() {
    let vehicle = vehicle();
    let small = FinGeometry::new(0.6, 0.3, 0.15, 0.2);
    let large = FinGeometry::new(0.6, 0.3, 0.45, 0.2);
    for mach in [0.5, 1.0, 1.5, 3.0] {
        let small_margin = stability_margin(mach, &vehicle, &small, ALPHA);
        let large_margin = stability_margin(mach, &vehicle, &large, ALPHA);
        assert!(
            large_margin > small_margin,
            "Mach {mach}: {large_margin} <= {small_margin}"
        );
    }
}

#[test]
fn moving_centre_of_mass_forward_adds_one_calibre_per_diameter() {
    let mut vehicle = vehicle();
    let fins = fins();
    let baseline = stability_margin(2.5, &vehicle, &fins, ALPHA);
    vehicle.centre_of_mass_m -= vehicle.body.diameter_m;
    let forward = stability_margin(2.5, &vehicle, &fins, ALPHA);
    assert_relative_eq!(forward - baseline, 1.0, max_relative = 1e-9);
}
