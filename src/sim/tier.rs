//! Bead tier table
//!
//! Each tier fixes a bead's size, bounciness, surface friction and look.
//! Radius (and therefore mass) strictly increases with tier; the table is
//! read-only for the life of the process.

use serde::Serialize;

/// Highest tier a bead can reach. Creating one wins the game.
pub const MAX_TIER: u8 = 4;

/// Static properties for one tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierSpec {
    pub tier: u8,
    pub radius: f32,
    pub restitution: f32,
    pub friction: f32,
    /// Fill color as 0xRRGGBB
    pub color: u32,
    /// Glow color as 0xRRGGBBAA
    pub glow: u32,
    pub label: &'static str,
}

/// Ash, wood, gold, glaze, rainbow
pub const TIERS: [TierSpec; MAX_TIER as usize + 1] = [
    TierSpec {
        tier: 0,
        radius: 18.0,
        restitution: 0.4,
        friction: 0.05,
        color: 0x7f8c8d,
        glow: 0x7f8c8d4d,
        label: "灰",
    },
    TierSpec {
        tier: 1,
        radius: 26.0,
        restitution: 0.5,
        friction: 0.02,
        color: 0x8b4513,
        glow: 0x8b45134d,
        label: "木",
    },
    TierSpec {
        tier: 2,
        radius: 38.0,
        restitution: 0.5,
        friction: 0.02,
        color: 0xd4af37,
        glow: 0xd4af3766,
        label: "金",
    },
    TierSpec {
        tier: 3,
        radius: 56.0,
        restitution: 0.5,
        friction: 0.02,
        color: 0x00ced1,
        glow: 0x00ced180,
        label: "琉",
    },
    TierSpec {
        tier: 4,
        radius: 86.0,
        restitution: 0.5,
        friction: 0.02,
        color: 0xfecfef,
        glow: 0xff9a9e99,
        label: "虹",
    },
];

/// Look up a tier. Tiers above MAX_TIER are clamped to the top entry.
#[inline]
pub fn lookup(tier: u8) -> &'static TierSpec {
    &TIERS[tier.min(MAX_TIER) as usize]
}

/// Mass of a bead of this tier for the given area density
#[inline]
pub fn mass(tier: u8, density: f32) -> f32 {
    let r = lookup(tier).radius;
    density * std::f32::consts::PI * r * r
}

/// Score awarded for merging two beads of `tier`
#[inline]
pub fn merge_points(tier: u8, score_per_tier: u64) -> u64 {
    (tier as u64 + 1) * score_per_tier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_indexed_by_tier() {
        for (i, t) in TIERS.iter().enumerate() {
            assert_eq!(t.tier as usize, i);
        }
    }

    #[test]
    fn test_radius_and_mass_strictly_increase() {
        for t in 0..MAX_TIER {
            assert!(lookup(t + 1).radius > lookup(t).radius);
            assert!(mass(t + 1, 0.001) > mass(t, 0.001));
        }
    }

    #[test]
    fn test_lookup_clamps_out_of_range() {
        assert_eq!(lookup(200).tier, MAX_TIER);
    }

    #[test]
    fn test_merge_points_increase_with_tier() {
        assert_eq!(merge_points(0, 20), 20);
        assert_eq!(merge_points(3, 20), 80);
        for t in 0..MAX_TIER {
            assert!(merge_points(t + 1, 20) > merge_points(t, 20));
        }
    }
}
