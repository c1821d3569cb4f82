//! Mach regime classifier and the correlation pair each regime selects.
//!
//! | regime            | Mach band        | normal force | fin CP      |
//! |-------------------|------------------|--------------|-------------|
//! | `Subsonic`        | M <= 0.8         | subsonic     | Barrowman   |
//! | `Transonic`       | 0.8 < M < 1.2    | subsonic     | transonic   |
//! | `TransSupersonic` | 1.2 <= M <= 2    | supersonic   | transonic   |
//! | `Supersonic`      | M > 2            | supersonic   | supersonic  |
//!
//! The two middle bands straddle: the coefficient formula switches at 1.2 while the CP
//! formula only switches at 2.

use std::fmt;

/// Upper edge of the purely subsonic band.
pub const SUBSONIC_LIMIT: f64 = 0.8;
/// Mach number at which the supersonic normal-force correlation takes over.
pub const SUPERSONIC_FORCE_ONSET: f64 = 1.2;
/// Mach number above which the supersonic centre-of-pressure correlation applies.
pub const SUPERSONIC_CP_ONSET: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MachRegime {
    Subsonic,
    Transonic,
    TransSupersonic,
    Supersonic,
}

/// Which fin normal-force slope correlation to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalForceModel {
    Subsonic,
    Supersonic,
}

/// Which fin centre-of-pressure correlation to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CentreOfPressureModel {
    /// Quarter chord of the MAC.
    Barrowman,
    Transonic,
    Supersonic,
}

impl MachRegime {
    /// Instantaneous classification; no hysteresis between calls.
    pub fn classify(mach: f64) -> Self {
        if mach <= SUBSONIC_LIMIT {
            MachRegime::Subsonic
        } else if mach < SUPERSONIC_FORCE_ONSET {
            MachRegime::Transonic
        } else if mach <= SUPERSONIC_CP_ONSET {
            MachRegime::TransSupersonic
        } else {
            MachRegime::Supersonic
        }
    }

    pub fn normal_force_model(self) -> NormalForceModel {
        match self {
            MachRegime::Subsonic | MachRegime::Transonic => NormalForceModel::Subsonic,
            MachRegime::TransSupersonic | MachRegime::Supersonic => NormalForceModel::Supersonic,
        }
    }

    pub fn centre_of_pressure_model(self) -> CentreOfPressureModel {
        match self {
            MachRegime::Subsonic => CentreOfPressureModel::Barrowman,
            MachRegime::Transonic | MachRegime::TransSupersonic => CentreOfPressureModel::Transonic,
            MachRegime::Supersonic => CentreOfPressureModel::Supersonic,
        }
    }

    /// Short lowercase label used in reports and CSV exports.
    pub fn label(self) -> &'static str {
        match self {
            MachRegime::Subsonic => "subsonic",
            MachRegime::Transonic => "transonic",
            MachRegime::TransSupersonic => "trans-supersonic",
            MachRegime::Supersonic => "supersonic",
        }
    }
}

impl fmt::Display for MachRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
