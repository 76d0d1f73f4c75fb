//! Collision detection for beads and container walls
//!
//! Produces every overlapping pair for the current tick in a fixed order:
//! bead pairs ascending by (smaller id, larger id), then wall contacts
//! ascending by (bead id, wall index). Resolution and merging both walk
//! the lists in this order, which keeps the simulation reproducible.

use glam::Vec2;

use super::state::{Body, BodyId, Wall};

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit normal. For bead pairs it points from the first bead to the second,
    /// for walls it points into the container.
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check overlap between two circles
///
/// Circles overlap iff the distance between centers is strictly less than the
/// sum of radii. Coincident centers get an arbitrary but fixed normal (+x).
pub fn circle_circle_collision(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> CollisionResult {
    let delta = pos_b - pos_a;
    let dist_sq = delta.length_squared();
    let combined = radius_a + radius_b;

    if dist_sq >= combined * combined {
        return CollisionResult::miss();
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > f32::EPSILON { delta / dist } else { Vec2::X };
    CollisionResult {
        hit: true,
        normal,
        penetration: combined - dist,
    }
}

/// Check overlap between a circle and a wall half-plane
pub fn circle_wall_collision(pos: Vec2, radius: f32, wall: &Wall) -> CollisionResult {
    let dist = wall.signed_distance(pos);
    if dist >= radius {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        normal: wall.normal,
        penetration: radius - dist,
    }
}

/// Two overlapping beads. Invariant: `a < b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPair {
    pub a: BodyId,
    pub b: BodyId,
    pub normal: Vec2,
    pub penetration: f32,
}

/// A bead overlapping a wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContact {
    pub body: BodyId,
    /// Index into the world's wall list
    pub wall: usize,
    pub normal: Vec2,
    pub penetration: f32,
}

/// All contacts found in one tick
#[derive(Debug, Clone, Default)]
pub struct Contacts {
    pub pairs: Vec<BodyPair>,
    pub walls: Vec<WallContact>,
}

impl Contacts {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.walls.is_empty()
    }
}

/// Find every overlapping bead pair and bead-wall contact
///
/// `bodies` must be sorted by id. Naive O(n²), which is plenty for the few
/// dozen beads a container can hold.
pub fn detect(bodies: &[Body], walls: &[Wall]) -> Contacts {
    debug_assert!(bodies.windows(2).all(|w| w[0].id < w[1].id));

    let mut contacts = Contacts::default();

    for (i, a) in bodies.iter().enumerate() {
        for b in &bodies[i + 1..] {
            let result = circle_circle_collision(a.pos, a.radius, b.pos, b.radius);
            if result.hit {
                contacts.pairs.push(BodyPair {
                    a: a.id,
                    b: b.id,
                    normal: result.normal,
                    penetration: result.penetration,
                });
            }
        }
    }

    for body in bodies {
        for (wall_idx, wall) in walls.iter().enumerate() {
            let result = circle_wall_collision(body.pos, body.radius, wall);
            if result.hit {
                contacts.walls.push(WallContact {
                    body: body.id,
                    wall: wall_idx,
                    normal: result.normal,
                    penetration: result.penetration,
                });
            }
        }
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bead(id: u64, tier: u8, x: f32, y: f32) -> Body {
        Body::new(BodyId(id), tier, Vec2::new(x, y), 0.001)
    }

    #[test]
    fn test_circle_circle_overlap() {
        let result = circle_circle_collision(Vec2::ZERO, 18.0, Vec2::new(30.0, 0.0), 18.0);
        assert!(result.hit);
        assert!((result.penetration - 6.0).abs() < 0.001);
        assert!((result.normal - Vec2::X).length() < 0.001);
    }

    #[test]
    fn test_circle_circle_touching_is_not_overlap() {
        let result = circle_circle_collision(Vec2::ZERO, 18.0, Vec2::new(36.0, 0.0), 18.0);
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_circle_coincident_centers() {
        let result = circle_circle_collision(Vec2::ONE, 10.0, Vec2::ONE, 10.0);
        assert!(result.hit);
        assert_eq!(result.normal, Vec2::X);
        assert!((result.penetration - 20.0).abs() < 0.001);
    }

    #[test]
    fn test_circle_wall_collision() {
        let walls = Wall::container(400.0, 600.0);

        // Resting 5 px into the floor
        let result = circle_wall_collision(Vec2::new(200.0, 587.0), 18.0, &walls[2]);
        assert!(result.hit);
        assert!((result.penetration - 5.0).abs() < 0.001);
        assert_eq!(result.normal, Vec2::NEG_Y);

        // Well clear of the left wall
        assert!(!circle_wall_collision(Vec2::new(200.0, 300.0), 18.0, &walls[0]).hit);

        // Center past the right wall still collides
        assert!(circle_wall_collision(Vec2::new(405.0, 300.0), 18.0, &walls[1]).hit);
    }

    #[test]
    fn test_detect_stable_order_no_self_pairs() {
        let bodies = vec![
            bead(1, 0, 100.0, 300.0),
            bead(2, 0, 120.0, 300.0),
            bead(3, 0, 110.0, 310.0),
            bead(4, 0, 300.0, 300.0),
        ];
        let contacts = detect(&bodies, &[]);
        let ids: Vec<_> = contacts.pairs.iter().map(|p| (p.a.0, p.b.0)).collect();
        assert_eq!(ids, vec![(1, 2), (1, 3), (2, 3)]);
        assert!(contacts.walls.is_empty());
    }

    #[test]
    fn test_detect_wall_contacts_ordered() {
        let walls = Wall::container(400.0, 600.0);
        let bodies = vec![
            bead(1, 0, 395.0, 590.0), // right + bottom
            bead(2, 0, 5.0, 590.0),   // left + bottom
        ];
        let contacts = detect(&bodies, &walls);
        let ids: Vec<_> = contacts.walls.iter().map(|c| (c.body.0, c.wall)).collect();
        assert_eq!(ids, vec![(1, 1), (1, 2), (2, 0), (2, 2)]);
    }

    #[test]
    fn test_detect_body_in_several_pairs() {
        // One large bead touching two small ones
        let bodies = vec![
            bead(1, 2, 200.0, 300.0),
            bead(2, 0, 150.0, 300.0),
            bead(3, 0, 250.0, 300.0),
        ];
        let contacts = detect(&bodies, &[]);
        assert_eq!(contacts.pairs.len(), 2);
        assert!(contacts.pairs.iter().all(|p| p.a == BodyId(1)));
    }
}
