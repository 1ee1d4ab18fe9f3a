//! The supply truck: keeps the depot stocked on a fixed schedule.

use tracing::{debug, info};

use crate::entities::DEPOT_CAPACITY;
use crate::state::GameState;

/// One refill cycle, without the sleep. Blocks until the depot has room (or
/// the game ends), then fills it completely and wakes anyone waiting for
/// ammunition. Returns the rounds delivered, zero if the game ended first.
pub fn refill_cycle(state: &GameState) -> u32 {
    let mut resources = state
        .acquire()
        .wait_until(|c| c.terminal || c.depot_ammo < DEPOT_CAPACITY);
    if resources.is_terminal() {
        return 0;
    }

    let added = resources.refill_depot();
    info!(added, depot = resources.depot_ammo(), "truck refilled the depot");
    resources.notify_all();
    added
}

/// Run the truck until the game ends: wait `reload_time`, refill, repeat.
pub fn run_depot_refill(state: &GameState) {
    let period = state.params().reload_time;
    debug!(?period, "supply truck started");

    while state.sleep_unless_terminal(period) {
        refill_cycle(state);
    }

    debug!("supply truck stopped");
}
