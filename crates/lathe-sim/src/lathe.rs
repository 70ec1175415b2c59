//! Frame driver tying the profile, mesh, carving and spin together.

use lathe_core::traits::Validate;
use lathe_core::{LatheConfig, LatheError, Result};
use lathe_math::Transform;
use lathe_mesh::{LatheMesh, ProfileGrid};

use crate::carving::{CarvingController, ToolInput, ToolState};
use crate::spin::SpinControl;

/// What happened during one [`Lathe::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub tool: Option<ToolState>,
    /// Whether the profile lost material this tick.
    pub carved: bool,
    /// Whether the mesh buffers were rewritten this tick.
    pub refreshed: bool,
    /// Rotation applied this tick, in radians.
    pub rotation_step: f64,
}

/// A spinning stock that a tracked tool can cut.
///
/// Call [`initialize`](Self::initialize) once, then [`tick`](Self::tick) every frame.
#[derive(Debug, Clone)]
pub struct Lathe {
    config: LatheConfig,
    profile: ProfileGrid,
    mesh: Option<LatheMesh>,
    carving: CarvingController,
    spin: SpinControl,
    placement: Transform,
}

impl Lathe {
    pub fn new(config: LatheConfig) -> Result<Self> {
        config.validate()?;
        let profile = ProfileGrid::from_config(&config)?;
        Ok(Self {
            carving: CarvingController::new(config.tool_width, config.length),
            spin: SpinControl::new(config.max_spin_rate),
            profile,
            mesh: None,
            placement: Transform::identity(),
            config,
        })
    }

    /// Build the mesh buffers from the current profile.
    pub fn initialize(&mut self) -> Result<()> {
        self.mesh = Some(LatheMesh::create(&self.profile, self.config.length)?);
        self.carving.mark_clean();
        Ok(())
    }

    /// Drop the mesh buffers. Carving keeps updating the profile until the
    /// next [`initialize`](Self::initialize).
    pub fn clear_geometry(&mut self) {
        if self.mesh.take().is_some() {
            log::info!("cleared lathe geometry");
        }
    }

    /// Advance one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f64, input: &ToolInput) -> Result<TickReport> {
        let rotation_step = self.spin.step_radians(input.grab_strength, dt);
        let world_to_local = self.local_to_world().inverse().ok_or_else(|| {
            LatheError::InvalidOperation("lathe placement is not invertible".into())
        })?;

        let step = self.carving.step(
            input.tip,
            &world_to_local,
            rotation_step,
            &mut self.profile,
            self.mesh.as_mut(),
        )?;

        self.spin.advance(rotation_step);

        Ok(TickReport {
            tool: step.tool,
            carved: step.carved,
            refreshed: step.refreshed,
            rotation_step,
        })
    }

    /// Place the stock in the world. The spin is applied on top of this.
    pub fn set_placement(&mut self, placement: Transform) -> Result<()> {
        if placement.inverse().is_none() {
            return Err(LatheError::InvalidOperation(
                "lathe placement is not invertible".into(),
            ));
        }
        self.placement = placement;
        Ok(())
    }

    /// Current local-to-world frame, including the spin.
    pub fn local_to_world(&self) -> Transform {
        Transform::from_axis_rotation(self.spin.angle_radians()).then(&self.placement)
    }

    pub fn config(&self) -> &LatheConfig {
        &self.config
    }

    pub fn profile(&self) -> &ProfileGrid {
        &self.profile
    }

    pub fn mesh(&self) -> Option<&LatheMesh> {
        self.mesh.as_ref()
    }

    pub fn spin(&self) -> &SpinControl {
        &self.spin
    }
}
