//! Held-key tracking.
//!
//! Instead of acting on each key event, we remember the frame number of the
//! last press/repeat event for every key. A key counts as held while it is
//! fresh (seen within [`HOLD_WINDOW`] frames) or until its release event.
//! That way fire and movement keys can be held together.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (kitty protocol): real `Press` /
//!   `Repeat` / `Release` events, keys drop out on release.
//! * **Classic terminals**: only `Press` events, OS key repeat arrives as
//!   more presses. Keys expire after `HOLD_WINDOW` frames of silence, which
//!   is shorter than the OS repeat interval.

use std::collections::HashMap;

use crate::compute::Steering;
use crate::platform::{Key, KeyKind};

/// A key is considered held if its last press/repeat arrived within this
/// many frames. Four frames at 30 FPS is about 133 ms.
pub const HOLD_WINDOW: u64 = 4;

#[derive(Clone, Debug, Default)]
pub struct InputTracker {
    last_seen: HashMap<Key, u64>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: Key, kind: KeyKind, frame: u64) {
        match kind {
            KeyKind::Press | KeyKind::Repeat => {
                self.last_seen.insert(key, frame);
            }
            KeyKind::Release => {
                self.last_seen.remove(&key);
            }
        }
    }

    pub fn is_held(&self, key: Key, frame: u64) -> bool {
        self.last_seen
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    pub fn steering(&self, frame: u64) -> Steering {
        Steering {
            up: self.is_held(Key::Up, frame),
            down: self.is_held(Key::Down, frame),
            left: self.is_held(Key::Left, frame),
            right: self.is_held(Key::Right, frame),
        }
    }
}
