//! Fireworks shot tiers.
//!
//! Every launched rocket advances a shot counter. Reaching one of the
//! milestone counts upgrades that single shot to a heavier tier; the
//! nuclear milestone also resets the counter so the cycle starts over.
//! The exported runtime receives [`ShotSchedule`] as JSON and applies the
//! same rules, so this module is the single source of the table.

use serde::{Deserialize, Serialize};

/// Visual intensity of one rocket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShotTier {
    /// Ordinary shot.
    #[default]
    Normal,
    /// Red burst, twice the particles.
    BigRed,
    /// Dense, fast burst.
    SuperHeavy,
    /// Green and gold burst.
    VipGreenGold,
    /// Large multicolor burst.
    UltraVip,
    /// Screen-filling burst that restarts the cycle.
    Nuclear,
}

impl ShotTier {
    /// All tiers from weakest to strongest.
    pub const ALL: [Self; 6] = [
        Self::Normal,
        Self::BigRed,
        Self::SuperHeavy,
        Self::VipGreenGold,
        Self::UltraVip,
        Self::Nuclear,
    ];

    /// Rendering parameters for this tier.
    #[must_use]
    pub fn profile(self) -> TierProfile {
        let (particles, speed, radius, shadow, life, palette): (u32, f64, f64, f64, u32, &[&str]) =
            match self {
                Self::Normal => (
                    40,
                    4.0,
                    2.0,
                    6.0,
                    60,
                    &["#ff5252", "#ffd740", "#69f0ae", "#40c4ff", "#e040fb"],
                ),
                Self::BigRed => (80, 6.0, 2.5, 12.0, 70, &["#ff1744", "#d50000", "#ff8a80"]),
                Self::SuperHeavy => (
                    120,
                    7.5,
                    3.0,
                    18.0,
                    80,
                    &["#ffffff", "#ffab40", "#ff6d00"],
                ),
                Self::VipGreenGold => (
                    160,
                    8.5,
                    3.0,
                    24.0,
                    90,
                    &["#00e676", "#ffd700", "#b9f6ca", "#ffe57f"],
                ),
                Self::UltraVip => (
                    220,
                    10.0,
                    3.5,
                    30.0,
                    100,
                    &["#ffd700", "#e040fb", "#00e5ff", "#ffffff", "#ff4081"],
                ),
                Self::Nuclear => (
                    400,
                    14.0,
                    4.0,
                    45.0,
                    120,
                    &["#ffffff", "#fff176", "#ff9100", "#ff3d00"],
                ),
            };

        TierProfile {
            tier: self,
            particles,
            speed,
            radius,
            shadow,
            life,
            palette: palette.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

/// How a tier's explosion is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierProfile {
    /// Tier described.
    pub tier: ShotTier,
    /// Particles spawned by the explosion.
    pub particles: u32,
    /// Initial particle speed in pixels per frame.
    pub speed: f64,
    /// Particle radius in pixels.
    pub radius: f64,
    /// Glow blur radius in pixels.
    pub shadow: f64,
    /// Particle lifespan in frames.
    pub life: u32,
    /// Colors particles are drawn from.
    pub palette: Vec<String>,
}

/// Shot count at which each heavier tier fires.
pub const MILESTONES: [(u32, ShotTier); 5] = [
    (5, ShotTier::BigRed),
    (10, ShotTier::SuperHeavy),
    (15, ShotTier::VipGreenGold),
    (20, ShotTier::UltraVip),
    (30, ShotTier::Nuclear),
];

/// Shortest delay between launches, in milliseconds.
pub const LAUNCH_INTERVAL_MIN_MS: u32 = 500;
/// Longest delay between launches, in milliseconds.
pub const LAUNCH_INTERVAL_MAX_MS: u32 = 1000;
/// How long a non-looping instance keeps launching, in milliseconds.
pub const ONE_SHOT_WINDOW_MS: u32 = 5000;

/// Counts launches and assigns each one a tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShotCounter {
    count: u32,
}

impl ShotCounter {
    /// Create a counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    /// Shots counted since the last reset.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Register one launch and return its tier.
    pub fn next_shot(&mut self) -> ShotTier {
        self.count += 1;
        let tier = MILESTONES
            .iter()
            .find(|(at, _)| *at == self.count)
            .map_or(ShotTier::Normal, |(_, tier)| *tier);
        if tier == ShotTier::Nuclear {
            self.count = 0;
        }
        tier
    }
}

/// The complete table handed to the exported runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotSchedule {
    /// `[count, tier]` pairs.
    pub milestones: Vec<(u32, ShotTier)>,
    /// Rendering parameters keyed by tier.
    pub profiles: Vec<TierProfile>,
    /// Shortest launch delay in milliseconds.
    pub interval_min_ms: u32,
    /// Longest launch delay in milliseconds.
    pub interval_max_ms: u32,
    /// Launch window of non-looping instances in milliseconds.
    pub one_shot_window_ms: u32,
}

impl Default for ShotSchedule {
    fn default() -> Self {
        Self {
            milestones: MILESTONES.to_vec(),
            profiles: ShotTier::ALL.iter().map(|t| t.profile()).collect(),
            interval_min_ms: LAUNCH_INTERVAL_MIN_MS,
            interval_max_ms: LAUNCH_INTERVAL_MAX_MS,
            one_shot_window_ms: ONE_SHOT_WINDOW_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milestones_upgrade_single_shots() {
        let mut counter = ShotCounter::new();
        let tiers: Vec<_> = (0..10).map(|_| counter.next_shot()).collect();
        assert_eq!(tiers[4], ShotTier::BigRed);
        assert_eq!(tiers[9], ShotTier::SuperHeavy);
        assert_eq!(tiers[5], ShotTier::Normal);
        assert_eq!(counter.count(), 10);
    }

    #[test]
    fn test_nuclear_resets_counter() {
        let mut counter = ShotCounter::new();
        for _ in 0..29 {
            counter.next_shot();
        }
        assert_eq!(counter.next_shot(), ShotTier::Nuclear);
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.next_shot(), ShotTier::Normal);
    }

    #[test]
    fn test_profiles_escalate() {
        let profiles: Vec<_> = ShotTier::ALL.iter().map(|t| t.profile()).collect();
        for pair in profiles.windows(2) {
            assert!(pair[1].particles > pair[0].particles);
            assert!(pair[1].shadow > pair[0].shadow);
            assert!(pair[1].speed > pair[0].speed);
        }
        assert!(profiles.iter().all(|p| !p.palette.is_empty()));
    }

    #[test]
    fn test_schedule_serializes_camel_case() {
        let json = serde_json::to_string(&ShotSchedule::default()).expect("should serialize");
        assert!(json.contains("\"milestones\":[[5,\"bigRed\"]"));
        assert!(json.contains("\"oneShotWindowMs\":5000"));
        assert!(json.contains("\"tier\":\"vipGreenGold\""));
    }
}
