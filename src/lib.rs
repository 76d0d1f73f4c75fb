//! Merit Beads - a bead-merging physics toy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integration, collisions, merge rule)
//! - `feedback`: Event to audio/visual cue mapping for presentation collaborators
//! - `runner`: Fixed-timestep driver for variable frame rates
//! - `settings`: Data-driven tuning and preferences

pub mod feedback;
pub mod runner;
pub mod settings;
pub mod sim;

pub use feedback::{Cue, FeedbackSink};
pub use runner::Runner;
pub use settings::{Settings, SettingsError};
pub use sim::{BodyId, GameEvent, GamePhase, SimError, World};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the browser frame rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta the runner accepts before clamping
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Container dimensions (inner span, pixels)
    pub const CONTAINER_WIDTH: f32 = 400.0;
    pub const CONTAINER_HEIGHT: f32 = 600.0;

    /// Downward gravity (pixels/s²). y grows toward the container floor.
    pub const GRAVITY: f32 = 1200.0;
    /// Height at which tapped beads are released
    pub const DROP_HEIGHT: f32 = 40.0;

    /// Score for a merge is (tier + 1) * SCORE_PER_TIER
    pub const SCORE_PER_TIER: u64 = 20;

    /// Mass per unit area
    pub const DENSITY: f32 = 0.001;

    /// Resolver tuning
    pub const SOLVER_ITERATIONS: u32 = 4;
    pub const POSITION_CORRECTION: f32 = 0.8;
    pub const PENETRATION_SLOP: f32 = 0.05;
}
