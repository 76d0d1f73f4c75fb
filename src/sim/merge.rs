//! Merge rule: two touching beads of the same tier fuse into one bead of the
//! next tier at their midpoint.
//!
//! Pairs are evaluated in detector order. A bead consumed by an earlier merge
//! is already gone from the world, so later pairs naming it are skipped and no
//! bead can merge twice in one tick.

use std::collections::HashSet;

use super::collision::BodyPair;
use super::error::SimError;
use super::state::{BodyId, GameEvent, GamePhase, World};
use super::tier::{MAX_TIER, merge_points};

/// Apply every eligible merge among this tick's overlapping pairs
pub fn apply_merges(world: &mut World, pairs: &[BodyPair]) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut consumed: HashSet<BodyId> = HashSet::new();

    for pair in pairs {
        if consumed.contains(&pair.a) || consumed.contains(&pair.b) {
            continue;
        }

        let (a, b) = match (world.body(pair.a), world.body(pair.b)) {
            (Some(a), Some(b)) => (a, b),
            (a, _) => {
                let missing = if a.is_none() { pair.a } else { pair.b };
                log::warn!(
                    "{}",
                    SimError::InvariantViolation {
                        context: "merge pair references a body that is not alive",
                        id: missing,
                    }
                );
                continue;
            }
        };

        if a.tier != b.tier || a.tier >= MAX_TIER {
            continue;
        }
        let from = a.tier;
        let at = (a.pos + b.pos) * 0.5;

        world.remove_body(pair.a);
        world.remove_body(pair.b);
        consumed.insert(pair.a);
        consumed.insert(pair.b);

        let into = world.insert_body(from + 1, at);

        // Score stops accruing once the game is won
        let points = if world.won {
            0
        } else {
            merge_points(from, world.params.score_per_tier)
        };
        world.score += points;

        log::debug!(
            "Merged {:?} + {:?} (tier {}) into {:?} at {:?}, +{}",
            pair.a,
            pair.b,
            from,
            into,
            at,
            points
        );
        events.push(GameEvent::Merged {
            from,
            into,
            consumed: (pair.a, pair.b),
            at,
            points,
        });

        if from + 1 == MAX_TIER && !world.won {
            world.won = true;
            world.phase = GamePhase::Won;
            log::info!("Top tier reached, final score {}", world.score);
            events.push(GameEvent::Won { score: world.score });
        }
    }

    events
}
