//! Simulation tick
//!
//! One call advances the world by `dt`: Integrate -> Detect -> Resolve -> Merge.
//! Merges take effect before the call returns.

use super::collision::detect;
use super::merge::apply_merges;
use super::resolve::{SolverParams, resolve};
use super::state::{GameEvent, GamePhase, World};

/// Advance the world by one timestep and return the events it produced
///
/// Spawn events queued since the previous tick come first, followed by
/// merge and win events in the order they occurred.
pub fn tick(world: &mut World, dt: f32) -> Vec<GameEvent> {
    let mut events = std::mem::take(&mut world.pending);

    if world.phase == GamePhase::Idle {
        return events;
    }
    if !(dt.is_finite() && dt > 0.0) {
        log::warn!("Ignoring tick with invalid dt {}", dt);
        return events;
    }

    world.time_ticks += 1;

    integrate(world, dt);

    let contacts = detect(&world.bodies, &world.walls);

    let solver = SolverParams {
        iterations: world.params.solver_iterations,
        position_correction: world.params.position_correction,
        penetration_slop: world.params.penetration_slop,
    };
    resolve(&mut world.bodies, &world.walls, &contacts, &solver);

    events.extend(apply_merges(world, &contacts.pairs));
    events
}

/// Semi-implicit Euler with per-tier damping
fn integrate(world: &mut World, dt: f32) {
    let gravity = world.params.gravity;
    for body in &mut world.bodies {
        body.vel += gravity * dt;
        body.vel *= (1.0 - body.friction() * dt).max(0.0);
        body.pos += body.vel * dt;
    }
}
