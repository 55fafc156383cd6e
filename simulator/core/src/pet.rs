//! Pet State
//!
//! The [`Pet`] struct holds every mutable attribute of the creature. It is
//! owned exclusively by the [`Simulator`](crate::simulator::Simulator);
//! everything outside the state lock sees by-value snapshots.
//!
//! Life [`Stage`] is a pure function of age in days and only ever moves
//! forward. Liveness is orthogonal: `alive` flips to `false` exactly once,
//! gated by health, and is terminal.

use chrono::{DateTime, Utc};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

/// Discrete life phase, derived from age in days.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Less than 1 day old.
    Egg,
    /// 1-2 days old.
    Baby,
    /// 3-6 days old.
    Child,
    /// 7-13 days old.
    Teen,
    /// 14 days or older. Terminal stage.
    Adult,
}

impl Stage {
    /// The stage a pet of the given age belongs to.
    #[must_use]
    pub fn for_age_days(age_days: u32) -> Self {
        match age_days {
            0 => Self::Egg,
            1..=2 => Self::Baby,
            3..=6 => Self::Child,
            7..=13 => Self::Teen,
            _ => Self::Adult,
        }
    }

    /// Lowercase display name, matching the persisted encoding.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Egg => "egg",
            Self::Baby => "baby",
            Self::Child => "child",
            Self::Teen => "teen",
            Self::Adult => "adult",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The creature. One per process lifetime, replaceable via restart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    /// Human-readable name, assigned at creation.
    pub name: String,
    /// Whole days since creation. Never decremented.
    pub age_days: u32,
    /// 0 = full, 100 = starving.
    pub hunger: i32,
    /// 0 = very sad, 100 = very happy.
    pub happiness: i32,
    /// 0 = sick, 100 = healthy. Reaching 0 is fatal.
    pub health: i32,
    /// 0 = exhausted, 100 = energetic.
    pub energy: i32,
    /// Weight in grams. Floor 10.0, no ceiling.
    pub weight: f64,
    /// Current life stage.
    pub stage: Stage,
    /// Creation timestamp; age is derived from it.
    pub created_at: DateTime<Utc>,
    /// When the pet was last fed.
    pub last_fed: DateTime<Utc>,
    /// When the pet last played.
    pub last_played: DateTime<Utc>,
    /// When the pet last slept.
    pub last_slept: DateTime<Utc>,
    /// False once dead. Death is terminal.
    pub alive: bool,
}

impl Pet {
    /// A fresh egg with default stats, created at `now`.
    #[must_use]
    pub fn hatch(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            age_days: 0,
            hunger: 50,
            happiness: 50,
            health: 100,
            energy: 100,
            weight: 50.0,
            stage: Stage::Egg,
            created_at: now,
            last_fed: now,
            last_played: now,
            last_slept: now,
            alive: true,
        }
    }

    /// Whole days of age at `now`, clamped to zero if the clock moved
    /// backwards past `created_at`.
    #[must_use]
    pub fn age_days_at(&self, now: DateTime<Utc>) -> u32 {
        let hours = (now - self.created_at).num_hours().max(0);
        u32::try_from(hours / 24).unwrap_or(u32::MAX)
    }
}

/// The fixed roster new pets are named from.
pub const NAME_ROSTER: [&str; 20] = [
    "Leslie",
    "Ron",
    "Ann",
    "April",
    "Andy",
    "Ben",
    "Tom",
    "Donna",
    "Jerry",
    "Chris",
    "Craig",
    "Jean-Ralphio",
    "Mona-Lisa",
    "Perd",
    "Jeremy",
    "Bobby",
    "Tammy One",
    "Tammy Two",
    "Shauna Malwae-Tweep",
    "Joan",
];

/// Pick a name from the roster, uniformly, seeded from OS entropy.
///
/// Falls back to the first roster entry if entropy is unavailable.
#[must_use]
pub fn random_name() -> &'static str {
    let mut seed = <StdRng as SeedableRng>::Seed::default();
    if OsRng.try_fill_bytes(&mut seed).is_err() {
        tracing::warn!("no OS entropy available, using first roster name");
        return NAME_ROSTER[0];
    }
    let mut rng = StdRng::from_seed(seed);
    NAME_ROSTER[rng.gen_range(0..NAME_ROSTER.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stage_thresholds() {
        assert_eq!(Stage::for_age_days(0), Stage::Egg);
        assert_eq!(Stage::for_age_days(1), Stage::Baby);
        assert_eq!(Stage::for_age_days(2), Stage::Baby);
        assert_eq!(Stage::for_age_days(3), Stage::Child);
        assert_eq!(Stage::for_age_days(6), Stage::Child);
        assert_eq!(Stage::for_age_days(7), Stage::Teen);
        assert_eq!(Stage::for_age_days(13), Stage::Teen);
        assert_eq!(Stage::for_age_days(14), Stage::Adult);
        assert_eq!(Stage::for_age_days(400), Stage::Adult);
    }

    #[test]
    fn test_stage_ordering_matches_progression() {
        assert!(Stage::Egg < Stage::Baby);
        assert!(Stage::Baby < Stage::Child);
        assert!(Stage::Child < Stage::Teen);
        assert!(Stage::Teen < Stage::Adult);
    }

    #[test]
    fn test_hatch_defaults() {
        let now = Utc::now();
        let pet = Pet::hatch("Ron", now);
        assert_eq!(pet.name, "Ron");
        assert_eq!(pet.age_days, 0);
        assert_eq!(pet.hunger, 50);
        assert_eq!(pet.happiness, 50);
        assert_eq!(pet.health, 100);
        assert_eq!(pet.energy, 100);
        assert_eq!(pet.weight, 50.0);
        assert_eq!(pet.stage, Stage::Egg);
        assert!(pet.alive);
        assert_eq!(pet.created_at, now);
    }

    #[test]
    fn test_age_days_derivation() {
        let now = Utc::now();
        let pet = Pet::hatch("Ann", now - Duration::days(3) - Duration::minutes(5));
        assert_eq!(pet.age_days_at(now), 3);
    }

    #[test]
    fn test_age_clamps_clock_regression() {
        let now = Utc::now();
        let pet = Pet::hatch("Tom", now + Duration::days(2));
        assert_eq!(pet.age_days_at(now), 0);
    }

    #[test]
    fn test_random_name_from_roster() {
        for _ in 0..32 {
            let name = random_name();
            assert!(NAME_ROSTER.contains(&name));
        }
    }

    #[test]
    fn test_stage_serde_lowercase() {
        let yaml = serde_yaml::to_string(&Stage::Child).unwrap();
        assert_eq!(yaml.trim(), "child");
        let back: Stage = serde_yaml::from_str("teen").unwrap();
        assert_eq!(back, Stage::Teen);
    }
}
