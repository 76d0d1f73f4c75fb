//! Simulation error types

use thiserror::Error;

use super::state::BodyId;

/// Errors surfaced by world operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Spawn position outside the container's horizontal span
    #[error("spawn x={x} outside container span [{min}, {max}]")]
    OutOfBounds { x: f32, min: f32, max: f32 },

    /// Spawn attempted after the game was won
    #[error("game is over, spawn rejected")]
    GameOver,

    /// Requested tier does not exist in the tier table
    #[error("tier {tier} exceeds the maximum tier {max}")]
    InvalidTier { tier: u8, max: u8 },

    /// Internal consistency failure. Logged and skipped, never returned from `step`.
    #[error("invariant violated: {context} (body {id:?})")]
    InvariantViolation { context: &'static str, id: BodyId },
}

pub type SimResult<T> = Result<T, SimError>;
