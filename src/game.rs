//! Main control loop.
//!
//! One frame is: read input, move, fire, resupply at the pad, resolve
//! combat, check for a crash, then draw. The loop owns the helicopter and
//! its missiles; the dinosaurs and counters live in the shared
//! [`GameState`] and are only touched under its lock.

use std::io;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::compute::{
    active_projectiles, advance_projectiles, in_supply_zone, move_vehicle, vehicle_collides,
    CombatRules, Steering, DEFAULT_HEADSHOT_TOLERANCE,
};
use crate::entities::{Projectile, Vehicle, MAX_ACTIVE_PROJECTILES};
use crate::input::InputTracker;
use crate::platform::{Event, Frame, Key, Platform};
use crate::state::GameState;

/// Target frame time, about 30 FPS.
pub const FRAME: Duration = Duration::from_millis(33);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    pub headshot_tolerance: f32,
    pub frame_time: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            headshot_tolerance: DEFAULT_HEADSHOT_TOLERANCE,
            frame_time: FRAME,
        }
    }
}

/// Why the loop stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ending {
    /// The player closed the game.
    Closed,
    /// The helicopter flew into a dinosaur.
    Collision,
    /// The game ended elsewhere (the spawner filled the roster).
    Overrun,
}

/// Player intent for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub steering: Steering,
    pub fire: bool,
}

pub struct Game {
    state: Arc<GameState>,
    config: GameConfig,
    rules: CombatRules,
    vehicle: Vehicle,
    projectiles: Vec<Projectile>,
    input: InputTracker,
    frame: u64,
}

impl Game {
    pub fn new(state: Arc<GameState>, config: GameConfig) -> Self {
        let rules = CombatRules {
            hits_to_kill: state.params().hits_to_kill,
            headshot_tolerance: config.headshot_tolerance,
        };
        Self {
            state,
            config,
            rules,
            vehicle: Vehicle::default(),
            projectiles: Vec::new(),
            input: InputTracker::new(),
            frame: 0,
        }
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn vehicle_mut(&mut self) -> &mut Vehicle {
        &mut self.vehicle
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Launch a missile from the helicopter if it has one and fewer than
    /// [`MAX_ACTIVE_PROJECTILES`] are in flight.
    pub fn fire(&mut self) -> bool {
        if active_projectiles(&self.projectiles) >= MAX_ACTIVE_PROJECTILES {
            return false;
        }
        if !self.state.acquire().take_round() {
            return false;
        }
        self.projectiles.push(Projectile::new(self.vehicle.muzzle()));
        true
    }

    /// Reload from the depot, waiting for the truck if the depot is empty.
    /// Returns the rounds loaded.
    pub fn resupply(&mut self) -> u32 {
        let capacity = self.state.params().vehicle_capacity;
        let resources = self.state.acquire();
        if resources.is_terminal() || resources.vehicle_ammo() >= capacity {
            return 0;
        }

        let mut resources = resources.wait_until(|c| c.terminal || c.depot_ammo > 0);
        if resources.is_terminal() {
            return 0;
        }
        let moved = resources.resupply();
        info!(
            moved,
            vehicle = resources.vehicle_ammo(),
            depot = resources.depot_ammo(),
            "resupplied"
        );
        resources.notify_all();
        moved
    }

    /// Feed host events into the key tracker. Returns true on a close request.
    pub fn handle_events(&mut self, events: &[Event]) -> bool {
        for event in events {
            match *event {
                Event::Close => return true,
                Event::Key { key, kind } => self.input.record(key, kind, self.frame),
            }
        }
        false
    }

    /// Intent derived from the keys currently held.
    pub fn held_input(&self) -> FrameInput {
        FrameInput {
            steering: self.input.steering(self.frame),
            fire: self.input.is_held(Key::Fire, self.frame),
        }
    }

    /// Movement, firing, resupply, combat and the crash check for one frame.
    /// Returns `Some` once the game is over.
    pub fn step(&mut self, input: &FrameInput) -> Option<Ending> {
        if self.state.is_terminal() {
            return Some(Ending::Overrun);
        }

        self.vehicle = move_vehicle(&self.vehicle, input.steering);

        if input.fire {
            self.fire();
        }

        if in_supply_zone(&self.vehicle) {
            self.resupply();
        }

        let mut resources = self.state.acquire();
        let report = resources.resolve_combat(&mut self.projectiles, &self.rules);
        if report.headshots + report.body_hits > 0 {
            debug!(?report, frame = self.frame, "combat resolved");
        }

        if vehicle_collides(&self.vehicle, resources.enemies()) {
            resources.set_terminal();
            warn!(frame = self.frame, "helicopter collided with a dinosaur, game over");
            return Some(Ending::Collision);
        }
        if resources.is_terminal() {
            return Some(Ending::Overrun);
        }
        None
    }

    /// Fly every missile one step, drop the spent ones, and copy out what
    /// needs drawing.
    pub fn advance(&mut self) -> Frame {
        advance_projectiles(&mut self.projectiles);
        self.projectiles.retain(|p| p.active);
        self.snapshot()
    }

    pub fn snapshot(&self) -> Frame {
        let resources = self.state.acquire();
        Frame {
            vehicle: self.vehicle.clone(),
            projectiles: self.projectiles.clone(),
            enemies: resources.enemies().to_vec(),
            counters: resources.counters(),
            vehicle_capacity: self.state.params().vehicle_capacity,
            frame: self.frame,
        }
    }

    /// Run frames until the player quits or the game ends.
    pub fn run<P: Platform>(&mut self, platform: &mut P) -> io::Result<Ending> {
        loop {
            let frame_start = Instant::now();
            self.frame += 1;

            let events = platform.poll_events();
            if self.handle_events(&events) {
                return Ok(Ending::Closed);
            }

            let input = self.held_input();
            if let Some(ending) = self.step(&input) {
                return Ok(ending);
            }

            let frame = self.advance();
            platform.present(&frame)?;

            let elapsed = frame_start.elapsed();
            if elapsed < self.config.frame_time {
                thread::sleep(self.config.frame_time - elapsed);
            }
        }
    }
}
