//! Aerodynamic coefficient correlations, Mach regime classification, and static stability.

pub mod coefficients;
pub mod regime;
pub mod stability;

pub use regime::{CentreOfPressureModel, MachRegime, NormalForceModel};
pub use stability::{Contribution, StabilityBreakdown, analyse, fin_centre_of_pressure, stability_margin};
