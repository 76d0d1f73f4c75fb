//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - No randomness
//! - Stable iteration order (by body ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod error;
pub mod merge;
pub mod resolve;
pub mod state;
pub mod tick;
pub mod tier;

pub use collision::{BodyPair, CollisionResult, Contacts, WallContact, detect};
pub use error::{SimError, SimResult};
pub use resolve::{SolverParams, resolve};
pub use state::{Body, BodyId, BodyView, GameEvent, GamePhase, Wall, WallSide, World, WorldParams};
pub use tick::tick;
pub use tier::{MAX_TIER, TIERS, TierSpec};
