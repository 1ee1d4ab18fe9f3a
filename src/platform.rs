//! The seam between game logic and whatever draws it.
//!
//! The game only needs three things from its host: load a sprite, report
//! input, show a frame. [`Platform`] is that contract; the terminal build
//! implements it with crossterm, tests implement it with a script.

use std::fs;
use std::io;
use std::path::Path;

use glam::Vec2;
use tracing::{debug, error};

use crate::entities::{Enemy, Projectile, Rect, Vehicle};
use crate::state::Counters;

// ── Input events ──────────────────────────────────────────────────────────────

/// Game-level keys. Hosts map their own key codes onto these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    Press,
    Repeat,
    Release,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// The player asked to close the game.
    Close,
    Key { key: Key, kind: KeyKind },
}

// ── Visuals ───────────────────────────────────────────────────────────────────

/// A text sprite: rows of glyphs drawn from the entity's top-left corner.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Visual {
    pub rows: Vec<String>,
    pub scale: f32,
}

impl Visual {
    pub fn blank(scale: f32) -> Self {
        Self { rows: Vec::new(), scale }
    }

    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|r| r.trim().is_empty())
    }

    /// Glyph columns and rows this sprite occupies.
    pub fn cells(&self) -> (usize, usize) {
        let width = self.rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        (width, self.rows.len())
    }

    /// Box covered when drawn at `at`, given the logical size of one glyph
    /// cell. Scale multiplies the cell size.
    pub fn bounds(&self, at: Vec2, cell: Vec2) -> Rect {
        let (w, h) = self.cells();
        Rect::new(at, Vec2::new(w as f32, h as f32) * cell * self.scale)
    }
}

/// Read a sprite file. A missing or unreadable file is reported and yields a
/// blank sprite; the game carries on without it.
pub fn load_visual_file(path: &Path, scale: f32) -> Visual {
    match read_rows(path) {
        Ok(rows) => {
            debug!(path = %path.display(), rows = rows.len(), "sprite loaded");
            Visual { rows, scale }
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to load sprite");
            Visual::blank(scale)
        }
    }
}

fn read_rows(path: &Path) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text.lines().map(str::to_string).collect())
}

/// Sprites for every entity kind, loaded once at startup.
#[derive(Clone, Debug, Default)]
pub struct Visuals {
    pub vehicle: Visual,
    pub projectile: Visual,
    pub enemy: Visual,
}

// ── Frames ────────────────────────────────────────────────────────────────────

/// Everything needed to draw one frame, copied out so no lock is held while
/// drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub vehicle: Vehicle,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub counters: Counters,
    pub vehicle_capacity: u32,
    pub frame: u64,
}

// ── Host contract ─────────────────────────────────────────────────────────────

pub trait Platform {
    fn load_visual(&mut self, path: &Path, scale: f32) -> Visual;

    /// Everything that happened since the last call. Never blocks.
    fn poll_events(&mut self) -> Vec<Event>;

    fn present(&mut self, frame: &Frame) -> io::Result<()>;
}
