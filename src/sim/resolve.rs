//! Collision response
//!
//! Sequential impulses: contacts are processed in detector order and each one
//! re-reads the current (already corrected) bead state, so later contacts see
//! the effect of earlier ones. This is an approximation of a simultaneous
//! solve and is kept as-is for reproducibility.

use glam::Vec2;

use super::collision::{Contacts, circle_circle_collision, circle_wall_collision};
use super::state::{Body, BodyId, Wall};

/// Approach speed (px/s) below which contacts stop bouncing
pub const RESTING_SPEED: f32 = 30.0;

/// Resolver tuning
#[derive(Debug, Clone, Copy)]
pub struct SolverParams {
    /// Passes over the contact list per tick
    pub iterations: u32,
    /// Fraction of penetration removed per pass
    pub position_correction: f32,
    /// Penetration tolerated without correction
    pub penetration_slop: f32,
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Apply impulses and positional correction for every contact
///
/// `bodies` must be sorted by id. Never touches a bead's tier.
pub fn resolve(bodies: &mut [Body], walls: &[Wall], contacts: &Contacts, params: &SolverParams) {
    if contacts.is_empty() {
        return;
    }

    // Resolve ids to slice indices once; the slice doesn't change shape here.
    let view: &[Body] = bodies;
    let pair_indices: Vec<(usize, usize)> = contacts
        .pairs
        .iter()
        .filter_map(|p| Some((index_of(view, p.a)?, index_of(view, p.b)?)))
        .collect();
    let wall_indices: Vec<(usize, usize)> = contacts
        .walls
        .iter()
        .filter_map(|c| Some((index_of(view, c.body)?, c.wall)))
        .collect();

    for _ in 0..params.iterations.max(1) {
        for &(ia, ib) in &pair_indices {
            let (a, b) = pair_mut(bodies, ia, ib);
            resolve_pair(a, b, params);
        }
        for &(ib, wall_idx) in &wall_indices {
            if let Some(wall) = walls.get(wall_idx) {
                resolve_wall(&mut bodies[ib], wall);
            }
        }
    }
}

fn index_of(bodies: &[Body], id: BodyId) -> Option<usize> {
    bodies.binary_search_by_key(&id, |b| b.id).ok()
}

/// Borrow two distinct bodies mutably. Requires `i < j`.
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert!(i < j);
    let (left, right) = bodies.split_at_mut(j);
    (&mut left[i], &mut right[0])
}

/// Resolve one bead-bead contact against the current state
pub fn resolve_pair(a: &mut Body, b: &mut Body, params: &SolverParams) {
    let result = circle_circle_collision(a.pos, a.radius, b.pos, b.radius);
    if !result.hit {
        return;
    }
    let normal = result.normal;
    let inv_sum = a.inv_mass + b.inv_mass;

    let rel = b.vel - a.vel;
    let vn = rel.dot(normal);
    if vn < 0.0 {
        let restitution = if -vn < RESTING_SPEED {
            0.0
        } else {
            a.restitution().min(b.restitution())
        };
        let jn = -(1.0 + restitution) * vn / inv_sum;
        let impulse = normal * jn;
        a.vel -= impulse * a.inv_mass;
        b.vel += impulse * b.inv_mass;

        // Coulomb friction on the tangential component
        let rel = b.vel - a.vel;
        let tangential = rel - normal * rel.dot(normal);
        let speed = tangential.length();
        if speed > f32::EPSILON {
            let tangent = tangential / speed;
            let mu = 0.5 * (a.friction() + b.friction());
            let jt = (-rel.dot(tangent) / inv_sum).clamp(-mu * jn, mu * jn);
            a.vel -= tangent * (jt * a.inv_mass);
            b.vel += tangent * (jt * b.inv_mass);
        }
    }

    // Push apart proportionally to inverse mass
    let depth = (result.penetration - params.penetration_slop).max(0.0);
    let correction = normal * (depth / inv_sum * params.position_correction);
    a.pos -= correction * a.inv_mass;
    b.pos += correction * b.inv_mass;
}

/// Resolve one bead-wall contact against the current state
pub fn resolve_wall(body: &mut Body, wall: &Wall) {
    let result = circle_wall_collision(body.pos, body.radius, wall);
    if !result.hit {
        return;
    }
    let normal = result.normal;

    let vn = body.vel.dot(normal);
    if vn < 0.0 {
        let restitution = if -vn < RESTING_SPEED {
            0.0
        } else {
            body.restitution()
        };
        // Mirror the normal component, scaled by restitution
        let tangential = body.vel - normal * vn;
        let reflected_normal = reflect_velocity(normal * vn, normal) * restitution;

        // Friction removes tangential speed in proportion to the normal impulse
        let speed = tangential.length();
        let loss = body.friction() * (1.0 + restitution) * -vn;
        let tangential = if speed > f32::EPSILON {
            tangential * ((speed - loss).max(0.0) / speed)
        } else {
            tangential
        };
        body.vel = tangential + reflected_normal;
    }

    // Place the bead tangent to the wall
    body.pos += normal * result.penetration;
}
