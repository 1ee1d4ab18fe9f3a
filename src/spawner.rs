//! Dinosaur spawner.

use rand::Rng;
use tracing::{debug, info, warn};

use crate::compute::random_enemy_position;
use crate::entities::Enemy;
use crate::state::{GameState, SpawnOutcome};

/// One spawn attempt, without the sleep. A full roster skips the attempt;
/// nothing is queued for later.
pub fn spawn_cycle(state: &GameState, rng: &mut impl Rng) -> SpawnOutcome {
    let mut resources = state.acquire();
    if resources.is_terminal() {
        return SpawnOutcome::Skipped;
    }

    let enemy = Enemy::new(random_enemy_position(rng));
    let (x, y) = (enemy.position.x, enemy.position.y);
    let outcome = resources.spawn(enemy);
    match outcome {
        SpawnOutcome::Spawned { active } => info!(x, y, active, "new dinosaur"),
        SpawnOutcome::Overrun => warn!(active = resources.active_enemies(), "the Earth is doomed, game over"),
        SpawnOutcome::Skipped => debug!("roster full, spawn skipped"),
    }
    outcome
}

/// Run the spawner until the game ends.
pub fn run_spawner(state: &GameState, rng: &mut impl Rng) {
    let period = state.params().spawn_period;
    debug!(?period, "spawner started");

    while state.sleep_unless_terminal(period) {
        spawn_cycle(state, rng);
    }

    debug!("spawner stopped");
}
