use serde::Serialize;

/// Minimum-follower threshold gating an offer
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct FollowerTier {
    pub label: &'static str,
    pub min_followers: i64,
}

/// Ascending by threshold.
pub static FOLLOWER_TIERS: [FollowerTier; 8] = [
    FollowerTier { label: "500+", min_followers: 500 },
    FollowerTier { label: "1K+", min_followers: 1_000 },
    FollowerTier { label: "2K+", min_followers: 2_000 },
    FollowerTier { label: "5K+", min_followers: 5_000 },
    FollowerTier { label: "10K+", min_followers: 10_000 },
    FollowerTier { label: "20K+", min_followers: 20_000 },
    FollowerTier { label: "50K+", min_followers: 50_000 },
    FollowerTier { label: "100K+", min_followers: 100_000 },
];

/// Position of `min_followers` in [`FOLLOWER_TIERS`], if it is a threshold
pub fn tier_index(min_followers: i64) -> Option<usize> {
    FOLLOWER_TIERS
        .iter()
        .position(|tier| tier.min_followers == min_followers)
}

pub fn is_tier(min_followers: i64) -> bool {
    tier_index(min_followers).is_some()
}

/// Tiers strictly above the given threshold, paired with their distance from it
pub fn tiers_above(min_followers: i64) -> impl Iterator<Item = (usize, &'static FollowerTier)> {
    let start = tier_index(min_followers).map_or(FOLLOWER_TIERS.len(), |i| i + 1);
    let base = start.saturating_sub(1);

    FOLLOWER_TIERS[start..]
        .iter()
        .enumerate()
        .map(move |(offset, tier)| (start + offset - base, tier))
}
