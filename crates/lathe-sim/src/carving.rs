//! Maps a tool tip onto the profile grid and removes material under it.

use std::f64::consts::{FRAC_PI_2, TAU};

use lathe_core::Result;
use lathe_math::{DVec3, Point3, Transform};
use lathe_mesh::{CarveRegion, LatheMesh, ProfileGrid};

/// Tracking snapshot for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ToolInput {
    /// Tool tip in world space, if a tool is tracked this tick.
    pub tip: Option<Point3>,
    /// Hand grab strength in `[0, 1]`, if a hand is tracked this tick.
    pub grab_strength: Option<f64>,
}

impl ToolInput {
    pub fn tip(tip: Point3) -> Self {
        Self {
            tip: Some(tip),
            grab_strength: None,
        }
    }
}

/// Where the tool sits relative to the grid on this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    /// Tool tip in the stock's local frame (X is the spin axis).
    pub local_position: DVec3,
    /// Distance from the spin axis, floored to the minimum radius.
    pub distance: f64,
    /// Angle around the axis in `[0, 2pi)`, zero on +Z.
    pub angle: f64,
    pub angle_index: usize,
    /// Nearest axial sample; negative or past the end when the tool is off the stock.
    pub axial_index: i64,
    pub radial_reach: usize,
    pub axial_reach: usize,
}

impl ToolState {
    pub fn region(&self) -> CarveRegion {
        CarveRegion {
            angle_index: self.angle_index,
            angle_reach: self.radial_reach,
            axial_index: self.axial_index,
            axial_reach: self.axial_reach,
        }
    }
}

/// Result of one [`CarvingController::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarveStep {
    pub tool: Option<ToolState>,
    pub carved: bool,
    pub refreshed: bool,
}

/// Per-tick carving step plus the "profile changed" flag that drives mesh refresh.
#[derive(Debug, Clone)]
pub struct CarvingController {
    tool_width: f64,
    length: f64,
    dirty: bool,
}

impl CarvingController {
    pub fn new(tool_width: f64, length: f64) -> Self {
        Self {
            tool_width: tool_width.max(0.0),
            length,
            dirty: false,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the profile as already reflected in the mesh.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Project a local tool position onto the grid.
    ///
    /// `sweep` is how far the stock turns this tick, in radians; the angular
    /// reach widens to cover it. Returns `None` for non-finite positions.
    pub fn locate(&self, local: DVec3, sweep: f64, profile: &ProfileGrid) -> Option<ToolState> {
        if !local.is_finite() {
            return None;
        }

        let radial = profile.radial_segments();
        let angle_step = TAU / radial as f64;
        let axial_step = self.length / profile.axial_segments() as f64;

        let distance = profile.tolerance().floor_radius(local.y.hypot(local.z));
        let angle = (FRAC_PI_2 - local.z.atan2(local.y)).rem_euclid(TAU);
        let angle_index = (angle / angle_step).round() as usize % radial;
        let axial_index = (local.x / axial_step).round() as i64;

        let axial_reach = (self.tool_width / axial_step).ceil() as usize;
        let radial_reach = if sweep.is_finite() {
            (sweep.abs() / angle_step).ceil() as usize
        } else {
            radial
        };

        Some(ToolState {
            local_position: local,
            distance,
            angle,
            angle_index,
            axial_index,
            radial_reach,
            axial_reach,
        })
    }

    /// Lower the profile under `tool`; flags the profile dirty if anything changed.
    pub fn carve(&mut self, tool: &ToolState, profile: &mut ProfileGrid) -> bool {
        let changed = profile.apply_carve(&tool.region(), tool.distance);
        if changed {
            log::trace!(
                "carved spoke {} sample {} to radius {:.5}",
                tool.angle_index,
                tool.axial_index,
                tool.distance
            );
            self.dirty = true;
        }
        changed
    }

    /// Refresh `mesh` from `profile` if a carve is pending. Returns whether it refreshed.
    pub fn flush(&mut self, profile: &ProfileGrid, mesh: Option<&mut LatheMesh>) -> Result<bool> {
        match mesh {
            Some(mesh) if self.dirty => {
                mesh.refresh(profile, false)?;
                self.dirty = false;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// One full carving tick: locate the world-space tip, carve, refresh if needed.
    pub fn step(
        &mut self,
        world_tip: Option<Point3>,
        world_to_local: &Transform,
        sweep: f64,
        profile: &mut ProfileGrid,
        mesh: Option<&mut LatheMesh>,
    ) -> Result<CarveStep> {
        let tool = world_tip
            .map(|tip| world_to_local.transform_point(tip))
            .and_then(|local| self.locate(local, sweep, profile));
        let carved = match &tool {
            Some(t) => self.carve(t, profile),
            None => false,
        };
        let refreshed = self.flush(profile, mesh)?;
        Ok(CarveStep {
            tool,
            carved,
            refreshed,
        })
    }
}
