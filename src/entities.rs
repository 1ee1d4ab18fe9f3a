//! All game entity types and the geometry they are measured with.
//!
//! Coordinates live in an 800x600 logical play field, origin top-left,
//! y growing downward. Every position is the top-left corner of a hitbox.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;

// ── Play field ────────────────────────────────────────────────────────────────

pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 600.0;

/// Enemies alive at once that doom the planet.
pub const MAX_ENEMIES: usize = 5;
/// Rounds the supply depot holds when full.
pub const DEPOT_CAPACITY: u32 = 5;
/// Missiles allowed in flight at the same time.
pub const MAX_ACTIVE_PROJECTILES: usize = 10;

// ── Hitboxes ──────────────────────────────────────────────────────────────────

pub const VEHICLE_SIZE: Vec2 = Vec2::new(40.0, 25.0);
pub const VEHICLE_START: Vec2 = Vec2::new(400.0, 300.0);
/// Units moved per frame for each held direction key.
pub const VEHICLE_SPEED: f32 = 10.0;

pub const PROJECTILE_SIZE: Vec2 = Vec2::new(4.0, 12.0);
/// Units a missile climbs per frame.
pub const PROJECTILE_SPEED: f32 = 10.0;

pub const ENEMY_BODY_SIZE: Vec2 = Vec2::new(36.0, 36.0);
pub const ENEMY_HEAD_SIZE: Vec2 = Vec2::new(12.0, 12.0);
/// The head juts out past the body's upper-left corner.
pub const ENEMY_HEAD_OFFSET: Vec2 = Vec2::new(-12.0, 0.0);

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test; rectangles that only share an edge do not
    /// intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x <= max.x && point.y >= self.min.y && point.y <= max.y
    }
}

// ── Difficulty level ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Level {
    /// Numeric level codes 1..=3. Anything else is unrecognized.
    pub fn from_code(code: u8) -> Option<Level> {
        match code {
            1 => Some(Level::Easy),
            2 => Some(Level::Medium),
            3 => Some(Level::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownLevel(pub String);

impl fmt::Display for UnknownLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown difficulty level `{}` (expected easy, medium or hard)", self.0)
    }
}

impl std::error::Error for UnknownLevel {}

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(Level::Easy),
            "medium" | "2" => Ok(Level::Medium),
            "hard" | "3" => Ok(Level::Hard),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Vehicle {
    pub position: Vec2,
}

impl Vehicle {
    pub fn new(position: Vec2) -> Self {
        Self { position }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, VEHICLE_SIZE)
    }

    /// Where a fired missile appears: centred on the fuselage, just above it.
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.position.x + (VEHICLE_SIZE.x - PROJECTILE_SIZE.x) / 2.0,
            self.position.y - PROJECTILE_SIZE.y,
        )
    }
}

impl Default for Vehicle {
    fn default() -> Self {
        Self::new(VEHICLE_START)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    pub active: bool,
}

impl Projectile {
    pub fn new(position: Vec2) -> Self {
        Self { position, active: true }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, PROJECTILE_SIZE)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Top-left of the body.
    pub position: Vec2,
    /// Head rectangle relative to `position`.
    pub head_offset: Vec2,
    pub head_size: Vec2,
    /// Headshots taken so far.
    pub hits: u32,
    pub active: bool,
}

impl Enemy {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            head_offset: ENEMY_HEAD_OFFSET,
            head_size: ENEMY_HEAD_SIZE,
            hits: 0,
            active: true,
        }
    }

    pub fn body(&self) -> Rect {
        Rect::new(self.position, ENEMY_BODY_SIZE)
    }

    pub fn head(&self) -> Rect {
        Rect::new(self.position + self.head_offset, self.head_size)
    }
}
