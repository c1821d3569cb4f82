//! Passive geometry records: trapezoidal fins, body tube, nosecone, and the assembled vehicle.
//!
//! All lengths are metres and all positions are measured aft from the nosecone tip.
//! Records are read-only during evaluation; the optimizer builds a fresh [`FinGeometry`]
//! per candidate and never mutates the vehicle.

use std::f64::consts::PI;

/// Trapezoidal fin planform with a straight trailing edge.
///
/// The leading edge is swept back by `sweep_length_m = chord_root_m - chord_tip_m`, so the
/// root and tip trailing edges line up with the aft end of the vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinGeometry {
    pub chord_root_m: f64,
    pub chord_tip_m: f64,
    pub span_m: f64,
    pub sweep_length_m: f64,
    pub body_diameter_m: f64,
}

impl FinGeometry {
    /// Build a fin whose leading-edge sweep is derived from the chord difference.
    ///
    /// No ordering is enforced between the chords; a tip longer than the root is a
    /// feasibility question for the caller, not a construction error.
    pub fn new(chord_root_m: f64, chord_tip_m: f64, span_m: f64, body_diameter_m: f64) -> Self {
        Self {
            chord_root_m,
            chord_tip_m,
            span_m,
            sweep_length_m: chord_root_m - chord_tip_m,
            body_diameter_m,
        }
    }

    /// Planform area of a single fin (m²).
    pub fn planform_area(&self) -> f64 {
        self.mean_chord() * self.span_m
    }

    /// Arithmetic mean of root and tip chord (m).
    pub fn mean_chord(&self) -> f64 {
        0.5 * (self.chord_root_m + self.chord_tip_m)
    }

    /// Single-panel aspect ratio `span² / area`, as used by the flutter boundary.
    pub fn aspect_ratio(&self) -> f64 {
        self.span_m * self.span_m / self.planform_area()
    }

    /// Aspect ratio of the two-panel wing formed by opposite fins, `2 span² / area`.
    pub fn panel_pair_aspect_ratio(&self) -> f64 {
        2.0 * self.aspect_ratio()
    }

    /// Tip-to-root chord ratio.
    pub fn taper_ratio(&self) -> f64 {
        self.chord_tip_m / self.chord_root_m
    }

    /// Sweep angle of the mid-chord line (rad).
    pub fn mid_chord_sweep_rad(&self) -> f64 {
        let mid_offset = self.sweep_length_m + 0.5 * self.chord_tip_m - 0.5 * self.chord_root_m;
        (mid_offset / self.span_m).atan()
    }

    /// Length of the mean aerodynamic chord (m).
    pub fn mean_aerodynamic_chord(&self) -> f64 {
        let sum = self.chord_root_m + self.chord_tip_m;
        2.0 / 3.0 * (sum - self.chord_root_m * self.chord_tip_m / sum)
    }

    /// Axial distance from the root leading edge to the leading edge of the MAC (m).
    pub fn mac_leading_edge_offset(&self) -> f64 {
        let sum = self.chord_root_m + self.chord_tip_m;
        self.sweep_length_m / 3.0 * (self.chord_root_m + 2.0 * self.chord_tip_m) / sum
    }

    /// Barrowman subsonic centre of pressure, measured from the root leading edge (m).
    ///
    /// Quarter-chord point of the mean aerodynamic chord.
    pub fn subsonic_centre_of_pressure(&self) -> f64 {
        self.mac_leading_edge_offset() + 0.25 * self.mean_aerodynamic_chord()
    }

    /// Fin-body interference factor `1 + r / (s + r)`.
    pub fn body_interference_factor(&self) -> f64 {
        let radius = 0.5 * self.body_diameter_m;
        1.0 + radius / (self.span_m + radius)
    }
}

/// Cylindrical body tube aft of the nosecone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyGeometry {
    pub diameter_m: f64,
    pub length_m: f64,
}

impl BodyGeometry {
    /// Frontal reference area used to normalise every coefficient (m²).
    pub fn reference_area(&self) -> f64 {
        PI * self.diameter_m * self.diameter_m / 4.0
    }

    /// Side-on planform area of the tube (m²).
    pub fn planform_area(&self) -> f64 {
        self.diameter_m * self.length_m
    }
}

/// Nosecone profile families with tabulated centre-of-pressure locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoseShape {
    Conical,
    Ogive,
    Parabolic,
    VonKarman,
}

impl NoseShape {
    /// Barrowman centre of pressure as a fraction of nose length.
    pub fn cp_fraction(self) -> f64 {
        match self {
            NoseShape::Conical => 2.0 / 3.0,
            NoseShape::Ogive => 0.466,
            NoseShape::Parabolic | NoseShape::VonKarman => 0.5,
        }
    }
}

/// Nosecone contribution; the coefficient and CP are fixed for every Mach number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nosecone {
    pub shape: NoseShape,
    pub length_m: f64,
    /// Normal-force coefficient slope (per rad); Barrowman gives 2 for any shape.
    pub normal_force_slope: f64,
    pub cp_fraction: f64,
}

impl Nosecone {
    /// Nosecone using the Barrowman slope and the tabulated CP of its shape.
    pub fn barrowman(shape: NoseShape, length_m: f64) -> Self {
        Self {
            shape,
            length_m,
            normal_force_slope: 2.0,
            cp_fraction: shape.cp_fraction(),
        }
    }

    /// Centre of pressure measured from the nose tip (m).
    pub fn centre_of_pressure(&self) -> f64 {
        self.cp_fraction * self.length_m
    }
}

/// Assembled vehicle minus its fins.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub name: String,
    pub total_length_m: f64,
    pub centre_of_mass_m: f64,
    pub fin_count: u32,
    pub body: BodyGeometry,
    pub nosecone: Nosecone,
}

impl Vehicle {
    /// Axial station of the fin root leading edge; fins end flush with the tail.
    pub fn fin_leading_edge_station(&self, fins: &FinGeometry) -> f64 {
        self.total_length_m - fins.chord_root_m
    }

    /// Build a candidate fin sized to this vehicle's body tube.
    pub fn fins(&self, chord_root_m: f64, chord_tip_m: f64, span_m: f64) -> FinGeometry {
        FinGeometry::new(chord_root_m, chord_tip_m, span_m, self.body.diameter_m)
    }
}
