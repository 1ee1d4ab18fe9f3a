//! Difficulty tables.

use std::time::Duration;

use tracing::warn;

use crate::entities::Level;

/// Difficulty used when nothing else is asked for.
pub const DEFAULT_LEVEL: Level = Level::Easy;

/// Tunables derived from a single difficulty level. Never changes once the
/// game is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parameters {
    pub level: Level,
    /// Headshots needed to bring a dinosaur down.
    pub hits_to_kill: u32,
    /// Missiles the helicopter can carry.
    pub vehicle_capacity: u32,
    /// Time the truck takes between depot refills.
    pub reload_time: Duration,
    /// Time between dinosaur spawn attempts.
    pub spawn_period: Duration,
}

fn hits_to_kill(level: Level) -> u32 {
    match level {
        Level::Easy => 2,
        Level::Medium => 3,
        Level::Hard => 4,
    }
}

fn vehicle_capacity(level: Level) -> u32 {
    match level {
        Level::Easy => 5,
        Level::Medium => 3,
        Level::Hard => 2,
    }
}

fn reload_secs(level: Level) -> u64 {
    match level {
        Level::Easy => 5,
        Level::Medium => 3,
        Level::Hard => 2,
    }
}

fn spawn_secs(level: Level) -> u64 {
    match level {
        Level::Easy => 4,
        Level::Medium => 3,
        Level::Hard => 2,
    }
}

impl Parameters {
    pub fn for_level(level: Level) -> Self {
        Self {
            level,
            hits_to_kill: hits_to_kill(level),
            vehicle_capacity: vehicle_capacity(level),
            reload_time: Duration::from_secs(reload_secs(level)),
            spawn_period: Duration::from_secs(spawn_secs(level)),
        }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::for_level(DEFAULT_LEVEL)
    }
}

/// Reconfigure from a raw level code (1 = easy, 2 = medium, 3 = hard).
///
/// An unrecognized code keeps `prior` as-is rather than guessing.
pub fn configure(prior: Parameters, code: u8) -> Parameters {
    match Level::from_code(code) {
        Some(level) => Parameters::for_level(level),
        None => {
            warn!(code, kept = %prior.level, "unrecognized difficulty level, keeping previous parameters");
            prior
        }
    }
}
