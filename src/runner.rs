//! Fixed-timestep driver
//!
//! Front ends deliver frames at whatever rate the display runs. The runner
//! accumulates real time and feeds the world whole fixed steps so the
//! simulation stays reproducible.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{BodyId, GameEvent, SimResult, World};

/// Owns a world and the leftover frame time
#[derive(Debug, Clone)]
pub struct Runner {
    world: World,
    timestep: f32,
    accumulator: f32,
}

impl Runner {
    /// Wrap a world. A timestep that is not positive and finite falls back to `SIM_DT`.
    pub fn new(world: World) -> Self {
        let mut timestep = world.params().timestep;
        if !(timestep.is_finite() && timestep > 0.0) {
            log::warn!("Invalid timestep {}, using {}", timestep, SIM_DT);
            timestep = SIM_DT;
        }
        Self {
            world,
            timestep,
            accumulator: 0.0,
        }
    }

    /// Run as many fixed steps as `frame_dt` covers and return their events
    pub fn advance(&mut self, frame_dt: f32) -> Vec<GameEvent> {
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= self.timestep && substeps < MAX_SUBSTEPS {
            events.extend(self.world.step(self.timestep));
            self.accumulator -= self.timestep;
            substeps += 1;
        }

        // Drop time we couldn't catch up on instead of spiralling
        if substeps == MAX_SUBSTEPS && self.accumulator >= self.timestep {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }

        events
    }

    /// Forward a tap to the world
    pub fn drop_at(&mut self, x: f32) -> SimResult<BodyId> {
        self.world.drop_at(x)
    }

    /// Fixed step fed to the world
    pub fn timestep(&self) -> f32 {
        self.timestep
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Leftover time not yet simulated (for render interpolation)
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.timestep
    }
}
