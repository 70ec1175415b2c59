//! Spin of the stock about its axis, decoupled from carving.

/// Accumulated spin angle plus the grab-to-speed mapping.
///
/// Rates are in degrees per second. With no hand tracked the stock turns at the
/// maximum rate; a tracked grab strength throttles it linearly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinControl {
    max_rate: f64,
    angle: f64,
}

impl SpinControl {
    pub fn new(max_rate: f64) -> Self {
        Self {
            max_rate,
            angle: 0.0,
        }
    }

    pub fn max_rate(&self) -> f64 {
        self.max_rate
    }

    /// Current angle in degrees, in `[0, 360)`.
    pub fn angle_degrees(&self) -> f64 {
        self.angle
    }

    pub fn angle_radians(&self) -> f64 {
        self.angle.to_radians()
    }

    /// Spin rate for a tick given the optional grab strength.
    pub fn rate(&self, grab_strength: Option<f64>) -> f64 {
        match grab_strength {
            None => self.max_rate,
            Some(g) if g.is_nan() => 0.0,
            Some(g) => self.max_rate * g.clamp(0.0, 1.0),
        }
    }

    /// Rotation a tick of `dt` seconds would apply, in radians.
    pub fn step_radians(&self, grab_strength: Option<f64>, dt: f64) -> f64 {
        (self.rate(grab_strength) * dt.max(0.0)).to_radians()
    }

    /// Advance by `step` radians.
    pub fn advance(&mut self, step: f64) {
        self.angle = (self.angle + step.to_degrees()).rem_euclid(360.0);
    }
}
