//! Core units, constants, and shared primitives for the fin optimizer workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Ratio of specific heats for air.
    pub const GAMMA_AIR: f64 = 1.4;
    /// Empirical constant of the NACA TN 4197 flutter boundary (psi-based).
    pub const NACA_4197_FLUTTER_CONSTANT: f64 = 39.3;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert metres to millimetres.
    #[inline]
    pub fn m_to_mm(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert newtons to kilonewtons.
    #[inline]
    pub fn n_to_kn(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }
}

/// Sampling grids shared across crates.
pub mod grid {
    /// Evenly spaced samples from `start` to `end` inclusive.
    ///
    /// Returns an empty grid for `points == 0` and `[start]` for a single point.
    pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
        match points {
            0 => Vec::new(),
            1 => vec![start],
            n => {
                let step = (end - start) / (n - 1) as f64;
                (0..n)
                    .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                    .collect()
            }
        }
    }
}
