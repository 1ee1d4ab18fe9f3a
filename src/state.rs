//! Shared resource state: the ammunition counters, the enemy roster and the
//! game-over flag, behind one lock and one condition variable.
//!
//! The main loop, the supply truck and the spawner all hold an `Arc` of the
//! same [`GameState`]. Every read or write goes through a [`Resources`]
//! guard obtained from [`GameState::acquire`]; dropping the guard releases
//! the lock. Multi-field updates (a depot-to-helicopter transfer, a spawn
//! that ends the game) happen inside a single guard so nobody sees them
//! half done.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tracing::debug;

use crate::compute::{resolve_combat, CombatReport, CombatRules};
use crate::difficulty::Parameters;
use crate::entities::{Enemy, Projectile, DEPOT_CAPACITY, MAX_ENEMIES};

/// A consistent copy of the counters, taken under the lock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Counters {
    pub vehicle_ammo: u32,
    pub depot_ammo: u32,
    pub active_enemies: usize,
    pub terminal: bool,
}

#[derive(Debug)]
struct Shared {
    counters: Counters,
    enemies: Vec<Enemy>,
}

/// Result of one spawn attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// The dinosaur joined the roster; `active` live ones now.
    Spawned { active: usize },
    /// The dinosaur joined the roster and filled it. The game is over.
    Overrun,
    /// Roster already full or game already over; nothing was created.
    Skipped,
}

#[derive(Debug)]
pub struct GameState {
    params: Parameters,
    shared: Mutex<Shared>,
    changed: Condvar,
}

impl GameState {
    /// Fresh game: helicopter loaded to capacity, depot full.
    pub fn new(params: Parameters) -> Self {
        Self::with_depot(params, DEPOT_CAPACITY)
    }

    /// Fresh game with a chosen depot stock (clamped to capacity).
    pub fn with_depot(params: Parameters, depot_ammo: u32) -> Self {
        Self {
            params,
            shared: Mutex::new(Shared {
                counters: Counters {
                    vehicle_ammo: params.vehicle_capacity,
                    depot_ammo: depot_ammo.min(DEPOT_CAPACITY),
                    active_enemies: 0,
                    terminal: false,
                },
                enemies: Vec::new(),
            }),
            changed: Condvar::new(),
        }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    // A panicking holder never leaves the counters half written, so a
    // poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take exclusive access. The lock is held until the guard drops.
    pub fn acquire(&self) -> Resources<'_> {
        Resources {
            guard: self.lock(),
            state: self,
        }
    }

    /// Wake every task blocked in [`Resources::wait_until`] or
    /// [`GameState::sleep_unless_terminal`].
    pub fn notify_all(&self) {
        self.changed.notify_all();
    }

    pub fn counters(&self) -> Counters {
        self.lock().counters
    }

    pub fn is_terminal(&self) -> bool {
        self.lock().counters.terminal
    }

    /// End the game. Returns true on the call that actually flipped the flag.
    pub fn set_terminal(&self) -> bool {
        self.acquire().set_terminal()
    }

    /// Sleep for `period`, returning early if the game ends meanwhile.
    /// Returns true if the game is still running afterwards.
    pub fn sleep_unless_terminal(&self, period: Duration) -> bool {
        let guard = self.lock();
        let (guard, _) = self
            .changed
            .wait_timeout_while(guard, period, |shared| !shared.counters.terminal)
            .unwrap_or_else(PoisonError::into_inner);
        !guard.counters.terminal
    }
}

/// Exclusive view of the shared state. Dropping it releases the lock.
pub struct Resources<'a> {
    guard: MutexGuard<'a, Shared>,
    state: &'a GameState,
}

impl<'a> Resources<'a> {
    pub fn counters(&self) -> Counters {
        self.guard.counters
    }

    pub fn vehicle_ammo(&self) -> u32 {
        self.guard.counters.vehicle_ammo
    }

    pub fn depot_ammo(&self) -> u32 {
        self.guard.counters.depot_ammo
    }

    pub fn active_enemies(&self) -> usize {
        self.guard.counters.active_enemies
    }

    pub fn is_terminal(&self) -> bool {
        self.guard.counters.terminal
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.guard.enemies
    }

    /// Block until `predicate` holds. The lock is released while blocked and
    /// held again whenever the predicate is evaluated.
    ///
    /// Never call this while holding any other lock.
    pub fn wait_until<F>(self, mut predicate: F) -> Resources<'a>
    where
        F: FnMut(&Counters) -> bool,
    {
        let Resources { guard, state } = self;
        let guard = state
            .changed
            .wait_while(guard, |shared| !predicate(&shared.counters))
            .unwrap_or_else(PoisonError::into_inner);
        Resources { guard, state }
    }

    pub fn notify_all(&self) {
        self.state.changed.notify_all();
    }

    /// Spend one of the helicopter's missiles. False if it has none left or
    /// the game is over.
    pub fn take_round(&mut self) -> bool {
        let counters = &mut self.guard.counters;
        if counters.terminal || counters.vehicle_ammo == 0 {
            return false;
        }
        counters.vehicle_ammo -= 1;
        true
    }

    /// Move as many rounds as fit from the depot into the helicopter.
    /// Returns the number moved; their sum is unchanged.
    pub fn resupply(&mut self) -> u32 {
        let capacity = self.state.params.vehicle_capacity;
        let counters = &mut self.guard.counters;
        let room = capacity.saturating_sub(counters.vehicle_ammo);
        let moved = counters.depot_ammo.min(room);
        counters.depot_ammo -= moved;
        counters.vehicle_ammo += moved;
        moved
    }

    /// Top the depot up to capacity. Returns the rounds added.
    pub fn refill_depot(&mut self) -> u32 {
        let counters = &mut self.guard.counters;
        let added = DEPOT_CAPACITY.saturating_sub(counters.depot_ammo);
        counters.depot_ammo = DEPOT_CAPACITY;
        added
    }

    /// Add a dinosaur if the roster has room. Filling the roster ends the
    /// game in the same step.
    pub fn spawn(&mut self, enemy: Enemy) -> SpawnOutcome {
        let shared = &mut *self.guard;
        if shared.counters.terminal || shared.counters.active_enemies >= MAX_ENEMIES {
            return SpawnOutcome::Skipped;
        }
        shared.enemies.push(enemy);
        shared.counters.active_enemies += 1;

        if shared.counters.active_enemies >= MAX_ENEMIES {
            shared.counters.terminal = true;
            self.state.changed.notify_all();
            SpawnOutcome::Overrun
        } else {
            SpawnOutcome::Spawned {
                active: shared.counters.active_enemies,
            }
        }
    }

    /// Run combat resolution against the roster. Kills are taken off the
    /// live count and dead dinosaurs leave the roster before the lock is
    /// released.
    pub fn resolve_combat(&mut self, projectiles: &mut [Projectile], rules: &CombatRules) -> CombatReport {
        let shared = &mut *self.guard;
        let report = resolve_combat(projectiles, &mut shared.enemies, rules);
        shared.counters.active_enemies -= report.kills as usize;
        shared.enemies.retain(|e| e.active);
        report
    }

    /// Returns true on the call that actually flipped the flag.
    pub fn set_terminal(&mut self) -> bool {
        let counters = &mut self.guard.counters;
        if counters.terminal {
            return false;
        }
        counters.terminal = true;
        debug!("terminal state reached");
        self.state.changed.notify_all();
        true
    }
}
