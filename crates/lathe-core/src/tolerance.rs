/// Numeric tolerances shared by the profile grid and the carving controller.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Smallest radius a carve may leave behind
    pub min_radius: f64,
}

impl Tolerance {
    pub const DEFAULT_MIN_RADIUS: f64 = 1e-4;

    pub fn new(min_radius: f64) -> Self {
        Self { min_radius }
    }

    pub fn default_precision() -> Self {
        Self::new(Self::DEFAULT_MIN_RADIUS)
    }

    /// Floor a candidate radius so carving never produces a degenerate surface.
    ///
    /// NaN collapses to the floor as well.
    pub fn floor_radius(self, r: f64) -> f64 {
        if r.is_nan() {
            self.min_radius
        } else {
            r.max(self.min_radius)
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}
