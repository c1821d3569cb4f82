//! Immutable evaluation context assembled once from a [`DesignConfig`].

use fin_aero::coefficients::prandtl_beta;
use fin_config::{DesignConfig, NoseShapeConfig};
use fin_core::grid::linspace;
use fin_core::units::deg_to_rad;
use fin_evolution::EvolutionSettings;
use fin_geometry::{BodyGeometry, NoseShape, Nosecone, Vehicle};

use crate::DesignError;

/// Flight environment in the units the models consume.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightState {
    /// Max-Q velocity scaled by the flutter safety factor (m/s).
    pub flutter_velocity_m_s: f64,
    pub speed_of_sound_m_s: f64,
    pub max_q_velocity_m_s: f64,
    pub max_q_density_kg_m3: f64,
    pub max_q_static_pressure_pa: f64,
    pub max_q_beta: f64,
    pub ground_pressure_pa: f64,
    pub stability_angle_of_attack_rad: f64,
    pub load_angle_of_attack_rad: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub shear_modulus_psi: f64,
    pub density_kg_m3: f64,
}

/// Everything the objective needs, passed by reference into every evaluation.
#[derive(Debug, Clone)]
pub struct FinDesignProblem {
    pub vehicle: Vehicle,
    pub flight: FlightState,
    pub material: Material,
    /// Strictly increasing Mach numbers checked for every candidate.
    pub mach_grid: Vec<f64>,
    pub min_margin_cal: f64,
    pub min_sweep_m: f64,
    /// Root chord, tip chord, span.
    pub bounds: [(f64, f64); 3],
    pub settings: EvolutionSettings,
}

impl FinDesignProblem {
    /// Validate the configuration and convert it into model inputs.
    pub fn from_config(config: &DesignConfig) -> Result<Self, DesignError> {
        config.validate()?;

        let vehicle_cfg = &config.vehicle;
        let shape = match vehicle_cfg.nosecone.shape {
            NoseShapeConfig::Conical => NoseShape::Conical,
            NoseShapeConfig::Ogive => NoseShape::Ogive,
            NoseShapeConfig::Parabolic => NoseShape::Parabolic,
            NoseShapeConfig::VonKarman => NoseShape::VonKarman,
        };
        let mut nosecone = Nosecone::barrowman(shape, vehicle_cfg.nosecone.length_m);
        if let Some(slope) = vehicle_cfg.nosecone.normal_force_slope {
            nosecone.normal_force_slope = slope;
        }
        if let Some(fraction) = vehicle_cfg.nosecone.cp_fraction {
            nosecone.cp_fraction = fraction;
        }

        let vehicle = Vehicle {
            name: vehicle_cfg.name.clone(),
            total_length_m: vehicle_cfg.total_length_m,
            centre_of_mass_m: vehicle_cfg.centre_of_mass_m,
            fin_count: vehicle_cfg.fin_count,
            body: BodyGeometry {
                diameter_m: vehicle_cfg.body.diameter_m,
                length_m: vehicle_cfg.body.length_m,
            },
            nosecone,
        };

        let flight_cfg = &config.flight;
        let flight = FlightState {
            flutter_velocity_m_s: flight_cfg.flutter_velocity_m_s(),
            speed_of_sound_m_s: flight_cfg.speed_of_sound_m_s,
            max_q_velocity_m_s: flight_cfg.max_q_velocity_m_s,
            max_q_density_kg_m3: flight_cfg.max_q_density_kg_m3,
            max_q_static_pressure_pa: flight_cfg.max_q_static_pressure_pa,
            max_q_beta: prandtl_beta(flight_cfg.max_q_mach()),
            ground_pressure_pa: flight_cfg.ground_pressure_pa,
            stability_angle_of_attack_rad: deg_to_rad(flight_cfg.stability_angle_of_attack_deg),
            load_angle_of_attack_rad: deg_to_rad(flight_cfg.load_angle_of_attack_deg),
        };

        let material = Material {
            name: config.material.name.clone(),
            shear_modulus_psi: config.material.shear_modulus_psi,
            density_kg_m3: config.material.density_kg_m3,
        };

        let grid = config.constraints.mach_grid;
        let search = &config.search;
        let settings = EvolutionSettings {
            population_multiplier: search.population_multiplier,
            max_generations: search.max_generations,
            tolerance: search.tolerance,
            mutation: (search.mutation[0], search.mutation[1]),
            recombination: search.recombination,
            seed: search.seed,
            ..EvolutionSettings::default()
        };

        Ok(Self {
            vehicle,
            flight,
            material,
            mach_grid: linspace(grid.start, grid.end, grid.points),
            min_margin_cal: config.constraints.min_stability_margin_cal,
            min_sweep_m: config.constraints.min_sweep_m,
            bounds: search.bounds(),
            settings,
        })
    }
}
