use approx::assert_relative_eq;
use fin_optimizer::structures::{
    FlutterInputs, PeakLoadInputs, flutter_parameter, peak_fin_force, required_thickness,
};

fn baseline() -> FlutterInputs {
    FlutterInputs {
        flutter_velocity_m_s: 1_080.0,
        speed_of_sound_m_s: 300.0,
        ambient_pressure_pa: 40_000.0,
        ground_pressure_pa: 101_325.0,
        chord_root_m: 0.5,
        aspect_ratio: 1.0,
        shear_modulus_psi: 3.8e6,
        taper_ratio: 0.5,
    }
}

#[test]
fn thickness_matches_hand_calculation() {
    let inputs = baseline();
    // (3.6)² · 39.3 · (40000/101325) · 0.75 · 1 / (3.8e6 · 3)
    assert_relative_eq!(flutter_parameter(&inputs), 1.322_809_6e-5, max_relative = 1e-6);
    assert_relative_eq!(required_thickness(&inputs), 0.011_825_04, max_relative = 1e-5);
}

#[test]
fn thickness_increases_with_flutter_velocity() {
    let mut previous = 0.0;
    for velocity in [300.0, 600.0, 900.0, 1_200.0, 1_500.0] {
        let inputs = FlutterInputs {
            flutter_velocity_m_s: velocity,
            ..baseline()
        };
        let thickness = required_thickness(&inputs);
        assert!(
            thickness > previous,
            "thickness {thickness} at {velocity} m/s not above {previous}"
        );
        previous = thickness;
    }
}

#[test]
fn thickness_increases_with_pressure_ratio() {
    let mut previous = 0.0;
    for pressure in [5_000.0, 20_000.0, 40_000.0, 80_000.0, 101_325.0] {
        let inputs = FlutterInputs {
            ambient_pressure_pa: pressure,
            ..baseline()
        };
        let thickness = required_thickness(&inputs);
        assert!(thickness > previous);
        previous = thickness;
    }
}

#[test]
fn thickness_scales_linearly_with_root_chord_at_fixed_aspect_ratio() {
    let base = required_thickness(&baseline());
    let doubled = required_thickness(&FlutterInputs {
        chord_root_m: 1.0,
        ..baseline()
    });
    assert_relative_eq!(doubled, 2.0 * base, max_relative = 1e-12);
}

#[test]
fn stiffer_material_needs_thinner_fins() {
    let aluminium = required_thickness(&baseline());
    let steel = required_thickness(&FlutterInputs {
        shear_modulus_psi: 11.5e6,
        ..baseline()
    });
    assert!(steel < aluminium);
}

#[test]
fn peak_force_matches_busemann_slope() {
    let reference_area = std::f64::consts::PI * 0.2 * 0.2 / 4.0;
    let force = peak_fin_force(&PeakLoadInputs {
        fin_count: 4,
        reference_area_m2: reference_area,
        fin_area_m2: 0.225,
        beta: 8.0_f64.sqrt(),
        angle_of_attack_rad: 5.0_f64.to_radians(),
        density_kg_m3: 0.6,
        velocity_m_s: 900.0,
    });
    assert_relative_eq!(force, 7_275.9, max_relative = 1e-4);
}

#[test]
fn peak_force_vanishes_at_zero_incidence() {
    let force = peak_fin_force(&PeakLoadInputs {
        fin_count: 3,
        reference_area_m2: 0.03,
        fin_area_m2: 0.1,
        beta: 2.0,
        angle_of_attack_rad: 0.0,
        density_kg_m3: 1.0,
        velocity_m_s: 700.0,
    });
    assert_eq!(force, 0.0);
}
