//! World state and core simulation types
//!
//! The world exclusively owns every live bead and the container walls.
//! Presentation code reads it through snapshots and never mutates it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::error::{SimError, SimResult};
use super::tier::{self, MAX_TIER};
use crate::consts::*;
use crate::settings::{Settings, SettingsError};

/// Stable bead identifier. Allocated from a monotonic counter, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u64);

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing dropped yet, steps are no-ops
    Idle,
    /// Active simulation
    Running,
    /// Top tier reached. Stepping continues for settling, spawning is refused.
    Won,
}

/// Events produced by the world, in the order they happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A bead was dropped in by the player
    BodySpawned { id: BodyId, tier: u8, pos: Vec2 },
    /// Two beads of tier `from` fused into `into` (tier `from + 1`)
    Merged {
        from: u8,
        into: BodyId,
        consumed: (BodyId, BodyId),
        at: Vec2,
        points: u64,
    },
    /// The first top-tier bead was created
    Won { score: u64 },
}

/// A circular bead
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    pub tier: u8,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub inv_mass: f32,
}

impl Body {
    pub fn new(id: BodyId, tier: u8, pos: Vec2, density: f32) -> Self {
        let mass = tier::mass(tier, density);
        Self {
            id,
            tier,
            pos,
            vel: Vec2::ZERO,
            radius: tier::lookup(tier).radius,
            mass,
            inv_mass: 1.0 / mass,
        }
    }

    #[inline]
    pub fn restitution(&self) -> f32 {
        tier::lookup(self.tier).restitution
    }

    #[inline]
    pub fn friction(&self) -> f32 {
        tier::lookup(self.tier).friction
    }
}

/// Read-only view of a bead for renderers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyView {
    pub id: BodyId,
    pub tier: u8,
    pub pos: Vec2,
    pub radius: f32,
    pub color: u32,
}

/// Which side of the container a wall forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallSide {
    Left,
    Right,
    Bottom,
}

/// A static half-plane. Bodies live on the side the normal points to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wall {
    pub side: WallSide,
    /// Any point on the boundary line
    pub origin: Vec2,
    /// Unit normal pointing into the container
    pub normal: Vec2,
}

impl Wall {
    pub fn new(side: WallSide, origin: Vec2, normal: Vec2) -> Self {
        Self {
            side,
            origin,
            normal: normal.normalize(),
        }
    }

    /// Signed distance from the boundary line (positive inside)
    #[inline]
    pub fn signed_distance(&self, p: Vec2) -> f32 {
        (p - self.origin).dot(self.normal)
    }

    /// Left, right and bottom walls of an open-top box spanning [0, width] x (-inf, height]
    pub fn container(width: f32, height: f32) -> Vec<Wall> {
        vec![
            Wall::new(WallSide::Left, Vec2::ZERO, Vec2::X),
            Wall::new(WallSide::Right, Vec2::new(width, 0.0), Vec2::NEG_X),
            Wall::new(WallSide::Bottom, Vec2::new(0.0, height), Vec2::NEG_Y),
        ]
    }
}

/// Global physics and scoring parameters, fixed for a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldParams {
    pub width: f32,
    pub height: f32,
    pub gravity: Vec2,
    pub timestep: f32,
    pub drop_height: f32,
    pub score_per_tier: u64,
    pub density: f32,
    pub solver_iterations: u32,
    pub position_correction: f32,
    pub penetration_slop: f32,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            width: CONTAINER_WIDTH,
            height: CONTAINER_HEIGHT,
            gravity: Vec2::new(0.0, GRAVITY),
            timestep: SIM_DT,
            drop_height: DROP_HEIGHT,
            score_per_tier: SCORE_PER_TIER,
            density: DENSITY,
            solver_iterations: SOLVER_ITERATIONS,
            position_correction: POSITION_CORRECTION,
            penetration_slop: PENETRATION_SLOP,
        }
    }
}

impl From<&Settings> for WorldParams {
    fn from(s: &Settings) -> Self {
        Self {
            width: s.container_width,
            height: s.container_height,
            gravity: Vec2::new(0.0, s.gravity),
            timestep: s.timestep,
            drop_height: s.drop_height,
            score_per_tier: s.score_per_tier,
            density: s.density,
            solver_iterations: s.solver_iterations,
            position_correction: s.position_correction,
            penetration_slop: s.penetration_slop,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub(crate) params: WorldParams,
    pub(crate) walls: Vec<Wall>,
    /// Live beads, sorted by id
    pub(crate) bodies: Vec<Body>,
    pub(crate) score: u64,
    pub(crate) won: bool,
    pub(crate) phase: GamePhase,
    pub(crate) time_ticks: u64,
    /// Events raised outside `step` (spawns), handed out by the next step
    pub(crate) pending: Vec<GameEvent>,
    next_id: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldParams::default())
    }
}

impl World {
    pub fn new(params: WorldParams) -> Self {
        log::info!(
            "World created: container {}x{}, gravity {:?}",
            params.width,
            params.height,
            params.gravity
        );
        Self {
            walls: Wall::container(params.width, params.height),
            params,
            bodies: Vec::new(),
            score: 0,
            won: false,
            phase: GamePhase::Idle,
            time_ticks: 0,
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a world from user settings, rejecting values that would break the simulation
    pub fn with_settings(settings: &Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::new(WorldParams::from(settings)))
    }

    /// Allocate a new body ID
    fn next_body_id(&mut self) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Move from Idle to Running. No effect in other phases.
    pub fn start(&mut self) {
        if self.phase == GamePhase::Idle {
            log::info!("Simulation running");
            self.phase = GamePhase::Running;
        }
    }

    /// Drop a tier-0 bead at `pos`
    pub fn spawn(&mut self, pos: Vec2) -> SimResult<BodyId> {
        self.spawn_tier(pos, 0)
    }

    /// Drop a tier-0 bead at horizontal position `x`, released from the drop height
    pub fn drop_at(&mut self, x: f32) -> SimResult<BodyId> {
        self.spawn(Vec2::new(x, self.params.drop_height))
    }

    /// Drop a bead of the given tier at `pos`
    pub fn spawn_tier(&mut self, pos: Vec2, tier: u8) -> SimResult<BodyId> {
        if self.won {
            log::warn!("Spawn at {:?} rejected: game over", pos);
            return Err(SimError::GameOver);
        }
        if tier > MAX_TIER {
            return Err(SimError::InvalidTier {
                tier,
                max: MAX_TIER,
            });
        }
        let (min, max) = self.span();
        if !pos.is_finite() || pos.x < min || pos.x > max {
            log::warn!("Spawn at {:?} rejected: outside [{}, {}]", pos, min, max);
            return Err(SimError::OutOfBounds { x: pos.x, min, max });
        }

        self.start();
        let id = self.insert_body(tier, pos);
        self.pending.push(GameEvent::BodySpawned { id, tier, pos });
        log::debug!("Spawned {:?} tier {} at {:?}", id, tier, pos);
        Ok(id)
    }

    /// Create a body without any checks. Ids are monotonic, so pushing keeps the order.
    pub(crate) fn insert_body(&mut self, tier: u8, pos: Vec2) -> BodyId {
        let id = self.next_body_id();
        self.bodies
            .push(Body::new(id, tier, pos, self.params.density));
        id
    }

    /// Remove a live body, keeping the id order
    pub(crate) fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        let idx = self.index_of(id)?;
        Some(self.bodies.remove(idx))
    }

    #[inline]
    pub(crate) fn index_of(&self, id: BodyId) -> Option<usize> {
        self.bodies.binary_search_by_key(&id, |b| b.id).ok()
    }

    /// Advance the simulation by `dt` seconds and return this tick's events
    pub fn step(&mut self, dt: f32) -> Vec<GameEvent> {
        super::tick::tick(self, dt)
    }

    /// Hand out queued spawn events without stepping
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Horizontal span a spawn position must fall within
    pub fn span(&self) -> (f32, f32) {
        (0.0, self.params.width)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.index_of(id).map(|i| &self.bodies[i])
    }

    /// Live beads in id order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Render list: one entry per live bead, in id order
    pub fn snapshot(&self) -> Vec<BodyView> {
        self.bodies
            .iter()
            .map(|b| BodyView {
                id: b.id,
                tier: b.tier,
                pos: b.pos,
                radius: b.radius,
                color: tier::lookup(b.tier).color,
            })
            .collect()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn params(&self) -> &WorldParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_is_idle_and_empty() {
        let world = World::default();
        assert_eq!(world.phase(), GamePhase::Idle);
        assert_eq!(world.body_count(), 0);
        assert_eq!(world.score(), 0);
        assert!(!world.won());
        assert_eq!(world.walls().len(), 3);
    }

    #[test]
    fn test_spawn_starts_running_and_queues_event() {
        let mut world = World::default();
        let id = world.spawn(Vec2::new(200.0, 40.0)).unwrap();
        assert_eq!(world.phase(), GamePhase::Running);

        let body = world.body(id).unwrap();
        assert_eq!(body.tier, 0);
        assert_eq!(body.vel, Vec2::ZERO);
        assert_eq!(body.radius, 18.0);

        let events = world.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::BodySpawned {
                id,
                tier: 0,
                pos: Vec2::new(200.0, 40.0)
            }]
        );
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_spawn_out_of_bounds() {
        let mut world = World::default();
        let err = world.spawn(Vec2::new(-5.0, 40.0)).unwrap_err();
        assert_eq!(
            err,
            SimError::OutOfBounds {
                x: -5.0,
                min: 0.0,
                max: 400.0
            }
        );
        assert_eq!(world.body_count(), 0);
        assert!(world.drain_events().is_empty());
        assert_eq!(world.phase(), GamePhase::Idle);

        assert!(world.spawn(Vec2::new(400.5, 40.0)).is_err());
        assert!(world.spawn(Vec2::new(f32::NAN, 40.0)).is_err());
        assert!(world.spawn(Vec2::new(400.0, 40.0)).is_ok());
    }

    #[test]
    fn test_spawn_invalid_tier() {
        let mut world = World::default();
        assert_eq!(
            world.spawn_tier(Vec2::new(100.0, 100.0), MAX_TIER + 1),
            Err(SimError::InvalidTier {
                tier: MAX_TIER + 1,
                max: MAX_TIER
            })
        );
    }

    #[test]
    fn test_ids_never_reused() {
        let mut world = World::default();
        let a = world.spawn(Vec2::new(100.0, 100.0)).unwrap();
        world.remove_body(a);
        let b = world.spawn(Vec2::new(100.0, 100.0)).unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_ids_continue_past_u32_range() {
        let mut world = World::default();
        world.next_id = u32::MAX as u64;
        let a = world.spawn(Vec2::new(100.0, 100.0)).unwrap();
        let b = world.spawn(Vec2::new(300.0, 100.0)).unwrap();
        assert_eq!(a, BodyId(u32::MAX as u64));
        assert_eq!(b, BodyId(u32::MAX as u64 + 1));
        let ids: Vec<_> = world.bodies().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_with_settings_rejects_invalid_values() {
        let zero_step = Settings {
            timestep: 0.0,
            ..Settings::default()
        };
        assert!(matches!(
            World::with_settings(&zero_step),
            Err(SettingsError::Invalid { name: "timestep", .. })
        ));

        let negative_width = Settings {
            container_width: -400.0,
            ..Settings::default()
        };
        assert!(World::with_settings(&negative_width).is_err());

        assert!(World::with_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut world = World::default();
        let ids: Vec<_> = (0..5)
            .map(|i| world.spawn(Vec2::new(50.0 + i as f32 * 60.0, 100.0)).unwrap())
            .collect();
        world.remove_body(ids[2]);
        let remaining: Vec<_> = world.bodies().iter().map(|b| b.id).collect();
        assert_eq!(remaining, vec![ids[0], ids[1], ids[3], ids[4]]);
        assert!(world.body(ids[2]).is_none());
        assert!(world.remove_body(ids[2]).is_none());
    }

    #[test]
    fn test_drop_at_uses_drop_height() {
        let mut world = World::default();
        let id = world.drop_at(123.0).unwrap();
        assert_eq!(world.body(id).unwrap().pos, Vec2::new(123.0, DROP_HEIGHT));
    }

    #[test]
    fn test_wall_signed_distance() {
        let walls = Wall::container(400.0, 600.0);
        let p = Vec2::new(10.0, 590.0);
        assert_eq!(walls[0].signed_distance(p), 10.0);
        assert_eq!(walls[1].signed_distance(p), 390.0);
        assert_eq!(walls[2].signed_distance(p), 10.0);
    }

    #[test]
    fn test_snapshot_matches_bodies() {
        let mut world = World::default();
        world.spawn_tier(Vec2::new(100.0, 100.0), 2).unwrap();
        let snap = world.snapshot();
        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].radius, 38.0);
        assert_eq!(snap[0].color, 0xd4af37);
    }
}
