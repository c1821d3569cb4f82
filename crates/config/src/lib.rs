//! Configuration models and loaders for the fin optimizer.
//!
//! A [`DesignConfig`] is read once at start-up and passed by reference into every
//! evaluation; nothing downstream mutates it.

use std::fs::File;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Complete, immutable input to a fin design run.
#[derive(Debug, Deserialize, Clone)]
pub struct DesignConfig {
    pub vehicle: VehicleConfig,
    pub flight: FlightConfig,
    pub material: MaterialConfig,
    #[serde(default)]
    pub constraints: ConstraintConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Finless vehicle description. Stations are measured aft from the nose tip.
#[derive(Debug, Deserialize, Clone)]
pub struct VehicleConfig {
    pub name: String,
    pub total_length_m: f64,
    pub centre_of_mass_m: f64,
    pub fin_count: u32,
    pub body: BodyConfig,
    pub nosecone: NoseconeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BodyConfig {
    pub diameter_m: f64,
    pub length_m: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NoseconeConfig {
    pub shape: NoseShapeConfig,
    pub length_m: f64,
    /// Overrides the Barrowman slope of 2 per radian.
    #[serde(default)]
    pub normal_force_slope: Option<f64>,
    /// Overrides the tabulated CP fraction of the shape.
    #[serde(default)]
    pub cp_fraction: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoseShapeConfig {
    Conical,
    Ogive,
    Parabolic,
    VonKarman,
}

/// Environment at the max dynamic pressure point plus the two design angles of attack.
#[derive(Debug, Deserialize, Clone)]
pub struct FlightConfig {
    pub max_q_velocity_m_s: f64,
    pub max_q_density_kg_m3: f64,
    pub max_q_static_pressure_pa: f64,
    /// Defaults to velocity over speed of sound.
    #[serde(default)]
    pub max_q_mach: Option<f64>,
    pub speed_of_sound_m_s: f64,
    pub ground_pressure_pa: f64,
    pub stability_angle_of_attack_deg: f64,
    pub load_angle_of_attack_deg: f64,
    #[serde(default = "default_flutter_safety_factor")]
    pub flutter_safety_factor: f64,
}

impl FlightConfig {
    pub fn max_q_mach(&self) -> f64 {
        self.max_q_mach
            .unwrap_or(self.max_q_velocity_m_s / self.speed_of_sound_m_s)
    }

    /// Velocity the fins must reach before fluttering.
    pub fn flutter_velocity_m_s(&self) -> f64 {
        self.flutter_safety_factor * self.max_q_velocity_m_s
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MaterialConfig {
    pub name: String,
    pub shear_modulus_psi: f64,
    pub density_kg_m3: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConstraintConfig {
    #[serde(default = "default_min_margin")]
    pub min_stability_margin_cal: f64,
    /// Minimum leading-edge sweep, i.e. the tip must be at least this much shorter than the root.
    #[serde(default = "default_min_sweep")]
    pub min_sweep_m: f64,
    #[serde(default)]
    pub mach_grid: MachGridConfig,
}

impl Default for ConstraintConfig {
    fn default() -> Self {
        Self {
            min_stability_margin_cal: default_min_margin(),
            min_sweep_m: default_min_sweep(),
            mach_grid: MachGridConfig::default(),
        }
    }
}

/// Evenly spaced Mach numbers at which stability is checked.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct MachGridConfig {
    pub start: f64,
    pub end: f64,
    pub points: usize,
}

impl Default for MachGridConfig {
    fn default() -> Self {
        Self {
            start: 0.3,
            end: 5.5,
            points: 30,
        }
    }
}

/// Search box and differential-evolution settings.
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_chord_bounds")]
    pub root_chord_m: [f64; 2],
    #[serde(default = "default_chord_bounds")]
    pub tip_chord_m: [f64; 2],
    #[serde(default = "default_span_bounds")]
    pub span_m: [f64; 2],
    #[serde(default = "default_population_multiplier")]
    pub population_multiplier: usize,
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_mutation")]
    pub mutation: [f64; 2],
    #[serde(default = "default_recombination")]
    pub recombination: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            root_chord_m: default_chord_bounds(),
            tip_chord_m: default_chord_bounds(),
            span_m: default_span_bounds(),
            population_multiplier: default_population_multiplier(),
            max_generations: default_max_generations(),
            tolerance: default_tolerance(),
            mutation: default_mutation(),
            recombination: default_recombination(),
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Bounds in optimizer order: root chord, tip chord, span.
    pub fn bounds(&self) -> [(f64, f64); 3] {
        [
            (self.root_chord_m[0], self.root_chord_m[1]),
            (self.tip_chord_m[0], self.tip_chord_m[1]),
            (self.span_m[0], self.span_m[1]),
        ]
    }
}

fn default_flutter_safety_factor() -> f64 {
    1.2
}

fn default_min_margin() -> f64 {
    1.5
}

fn default_min_sweep() -> f64 {
    0.15
}

fn default_chord_bounds() -> [f64; 2] {
    [0.01, 1.5]
}

fn default_span_bounds() -> [f64; 2] {
    [0.01, 0.7]
}

fn default_population_multiplier() -> usize {
    15
}

fn default_max_generations() -> usize {
    1_000
}

fn default_tolerance() -> f64 {
    0.01
}

fn default_mutation() -> [f64; 2] {
    [0.5, 1.0]
}

fn default_recombination() -> f64 {
    0.7
}

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Load a design configuration from TOML, or YAML for `.yaml`/`.yml` files, and validate it.
pub fn load_design<P: AsRef<Path>>(path: P) -> Result<DesignConfig, ConfigError> {
    let config = parse_design(path.as_ref())?;
    config.validate()?;
    Ok(config)
}

/// Parse a design configuration from a TOML string and validate it.
pub fn design_from_toml(contents: &str) -> Result<DesignConfig, ConfigError> {
    let config: DesignConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

fn parse_design(path: &Path) -> Result<DesignConfig, ConfigError> {
    let is_yaml = path
        .extension()
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false);
    if is_yaml {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    } else {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

/// Allowed mismatch between the stacked nosecone and body and the overall length (m).
const STATION_TOLERANCE_M: f64 = 1.0e-6;

impl DesignConfig {
    /// Reject inputs that would make the physics undefined (division by zero, complex
    /// roots) or leave the search box empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let vehicle = &self.vehicle;
        positive("vehicle.total_length_m", vehicle.total_length_m)?;
        positive("vehicle.body.diameter_m", vehicle.body.diameter_m)?;
        positive("vehicle.body.length_m", vehicle.body.length_m)?;
        positive("vehicle.nosecone.length_m", vehicle.nosecone.length_m)?;
        if vehicle.fin_count == 0 {
            return Err(ConfigError::invalid("vehicle.fin_count", "at least one fin is required"));
        }
        if !(vehicle.centre_of_mass_m > 0.0 && vehicle.centre_of_mass_m < vehicle.total_length_m) {
            return Err(ConfigError::invalid(
                "vehicle.centre_of_mass_m",
                format!(
                    "{} lies outside the vehicle (length {})",
                    vehicle.centre_of_mass_m, vehicle.total_length_m
                ),
            ));
        }
        let stacked = vehicle.nosecone.length_m + vehicle.body.length_m;
        if (stacked - vehicle.total_length_m).abs() > STATION_TOLERANCE_M {
            return Err(ConfigError::invalid(
                "vehicle.total_length_m",
                format!(
                    "{} does not match nosecone plus body length {stacked}",
                    vehicle.total_length_m
                ),
            ));
        }
        if let Some(slope) = vehicle.nosecone.normal_force_slope {
            positive("vehicle.nosecone.normal_force_slope", slope)?;
        }
        if let Some(fraction) = vehicle.nosecone.cp_fraction {
            if !(fraction > 0.0 && fraction <= 1.0) {
                return Err(ConfigError::invalid(
                    "vehicle.nosecone.cp_fraction",
                    format!("{fraction} is outside (0, 1]"),
                ));
            }
        }

        let flight = &self.flight;
        positive("flight.max_q_velocity_m_s", flight.max_q_velocity_m_s)?;
        positive("flight.max_q_density_kg_m3", flight.max_q_density_kg_m3)?;
        positive("flight.max_q_static_pressure_pa", flight.max_q_static_pressure_pa)?;
        positive("flight.speed_of_sound_m_s", flight.speed_of_sound_m_s)?;
        positive("flight.ground_pressure_pa", flight.ground_pressure_pa)?;
        positive("flight.flutter_safety_factor", flight.flutter_safety_factor)?;
        // The peak-load correlation is supersonic; beta would vanish at Mach 1.
        if !(flight.max_q_mach() > 1.0) {
            return Err(ConfigError::invalid(
                "flight.max_q_mach",
                format!("{} must be supersonic", flight.max_q_mach()),
            ));
        }
        finite("flight.stability_angle_of_attack_deg", flight.stability_angle_of_attack_deg)?;
        finite("flight.load_angle_of_attack_deg", flight.load_angle_of_attack_deg)?;

        positive("material.shear_modulus_psi", self.material.shear_modulus_psi)?;
        positive("material.density_kg_m3", self.material.density_kg_m3)?;

        let grid = &self.constraints.mach_grid;
        if grid.points == 0 {
            return Err(ConfigError::invalid("constraints.mach_grid.points", "grid is empty"));
        }
        positive("constraints.mach_grid.start", grid.start)?;
        finite("constraints.mach_grid.end", grid.end)?;
        if grid.points > 1 && !(grid.end > grid.start) {
            return Err(ConfigError::invalid(
                "constraints.mach_grid",
                format!("end {} must exceed start {}", grid.end, grid.start),
            ));
        }
        finite(
            "constraints.min_stability_margin_cal",
            self.constraints.min_stability_margin_cal,
        )?;
        if !(self.constraints.min_sweep_m >= 0.0 && self.constraints.min_sweep_m.is_finite()) {
            return Err(ConfigError::invalid(
                "constraints.min_sweep_m",
                "must be finite and non-negative",
            ));
        }

        let search = &self.search;
        bounds("search.root_chord_m", search.root_chord_m)?;
        bounds("search.tip_chord_m", search.tip_chord_m)?;
        bounds("search.span_m", search.span_m)?;
        if search.root_chord_m[1] > vehicle.body.length_m {
            return Err(ConfigError::invalid(
                "search.root_chord_m",
                format!(
                    "upper bound {} is longer than the body tube ({})",
                    search.root_chord_m[1], vehicle.body.length_m
                ),
            ));
        }
        if search.population_multiplier == 0 {
            return Err(ConfigError::invalid("search.population_multiplier", "must be positive"));
        }
        if search.max_generations == 0 {
            return Err(ConfigError::invalid("search.max_generations", "must be positive"));
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be finite")))
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be positive")))
    }
}

fn bounds(field: &'static str, [lower, upper]: [f64; 2]) -> Result<(), ConfigError> {
    if !(lower.is_finite() && upper.is_finite()) || lower <= 0.0 {
        return Err(ConfigError::invalid(
            field,
            format!("bounds [{lower}, {upper}] must be finite and positive"),
        ));
    }
    if lower >= upper {
        return Err(ConfigError::invalid(
            field,
            format!("lower bound {lower} is not below upper bound {upper}"),
        ));
    }
    Ok(())
}
