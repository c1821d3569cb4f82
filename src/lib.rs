//! Minimum-mass fin sizing for finned flight vehicles.
//!
//! The workspace crates are re-exported here so front-ends and tests share one entry
//! point: configuration loading, geometry records, aerodynamic correlations, structural
//! sizing, the differential-evolution search, and report export.

pub use fin_aero as aero;
pub use fin_config as config;
pub use fin_core as common;
pub use fin_design as design;
pub use fin_evolution as evolution;
pub use fin_export as export;
pub use fin_geometry as geometry;
pub use fin_structures as structures;

/// Default configuration shipped with the workspace.
pub const DEFAULT_CONFIG_PATH: &str = "configs/panthera.toml";

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
