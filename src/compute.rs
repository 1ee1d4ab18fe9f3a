//! Frame-level game rules: movement, combat resolution, collision checks.
//!
//! Nothing here touches shared state or threads. Callers hand in the
//! entities and get the outcome back; side effects are limited to the
//! slices passed in (and the injected RNG, for placement).

use glam::Vec2;
use rand::Rng;
use tracing::{debug, info};

use crate::entities::{
    Enemy, Projectile, Rect, Vehicle, ENEMY_BODY_SIZE, ENEMY_HEAD_OFFSET, FIELD_HEIGHT,
    FIELD_WIDTH, PROJECTILE_SPEED, VEHICLE_SIZE, VEHICLE_SPEED,
};

/// The helicopter reloads once it dips below this line.
pub const SUPPLY_ZONE_TOP: f32 = 550.0;

/// Default slack, in logical units, on the headshot alignment check. Half a
/// missile step means each passing missile lines up on exactly one frame.
pub const DEFAULT_HEADSHOT_TOLERANCE: f32 = PROJECTILE_SPEED / 2.0;

// ── Movement ─────────────────────────────────────────────────────────────────

/// Direction keys currently held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Steering {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Apply one frame of movement, every held key contributing. The helicopter
/// stays inside the play field.
pub fn move_vehicle(vehicle: &Vehicle, steering: Steering) -> Vehicle {
    let mut delta = Vec2::ZERO;
    if steering.left {
        delta.x -= VEHICLE_SPEED;
    }
    if steering.right {
        delta.x += VEHICLE_SPEED;
    }
    if steering.up {
        delta.y -= VEHICLE_SPEED;
    }
    if steering.down {
        delta.y += VEHICLE_SPEED;
    }
    let limit = Vec2::new(FIELD_WIDTH, FIELD_HEIGHT) - VEHICLE_SIZE;
    Vehicle {
        position: (vehicle.position + delta).clamp(Vec2::ZERO, limit),
    }
}

pub fn in_supply_zone(vehicle: &Vehicle) -> bool {
    vehicle.position.y > SUPPLY_ZONE_TOP
}

/// Move every live missile one step up; missiles that leave the top of the
/// field are spent.
pub fn advance_projectiles(projectiles: &mut [Projectile]) {
    for projectile in projectiles.iter_mut().filter(|p| p.active) {
        projectile.position.y -= PROJECTILE_SPEED;
        if projectile.bounds().max().y <= 0.0 {
            projectile.active = false;
        }
    }
}

pub fn active_projectiles(projectiles: &[Projectile]) -> usize {
    projectiles.iter().filter(|p| p.active).count()
}

/// Random body position with both body and head inside the field.
pub fn random_enemy_position(rng: &mut impl Rng) -> Vec2 {
    let min_x = -ENEMY_HEAD_OFFSET.x.min(0.0);
    let max_x = FIELD_WIDTH - ENEMY_BODY_SIZE.x;
    let max_y = FIELD_HEIGHT - ENEMY_BODY_SIZE.y;
    Vec2::new(rng.gen_range(min_x..max_x), rng.gen_range(0.0..max_y)).floor()
}

// ── Combat ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CombatRules {
    pub hits_to_kill: u32,
    /// How far apart, vertically, a missile and a head may be and still
    /// count as aligned. Zero demands exact equality.
    pub headshot_tolerance: f32,
}

/// What happened during one resolution pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatReport {
    pub headshots: u32,
    pub body_hits: u32,
    /// Enemies deactivated this pass.
    pub kills: u32,
}

fn aligned_with_head(projectile: &Projectile, head: &Rect, tolerance: f32) -> bool {
    (projectile.position.y - head.min.y).abs() <= tolerance
}

/// Resolve missile strikes against dinosaurs.
///
/// Each live missile checks live dinosaurs in list order and stops at the
/// first one it touches. A missile that is lined up with the head and
/// overlaps it scores a headshot; one that only overlaps the body is wasted.
/// Only headshots count toward `hits_to_kill`. Nothing is removed from
/// either slice, entities are only flagged inactive.
pub fn resolve_combat(
    projectiles: &mut [Projectile],
    enemies: &mut [Enemy],
    rules: &CombatRules,
) -> CombatReport {
    let mut report = CombatReport::default();

    for projectile in projectiles.iter_mut().filter(|p| p.active) {
        let bounds = projectile.bounds();

        for enemy in enemies.iter_mut().filter(|e| e.active) {
            let head = enemy.head();
            if aligned_with_head(projectile, &head, rules.headshot_tolerance)
                && bounds.intersects(&head)
            {
                projectile.active = false;
                enemy.hits += 1;
                report.headshots += 1;
                info!(hits = enemy.hits, needed = rules.hits_to_kill, "headshot");

                if enemy.hits >= rules.hits_to_kill {
                    enemy.active = false;
                    report.kills += 1;
                    info!(x = enemy.position.x, y = enemy.position.y, "dinosaur destroyed");
                }
                break;
            } else if bounds.intersects(&enemy.body()) {
                projectile.active = false;
                report.body_hits += 1;
                debug!("body hit has no effect");
                break;
            }
        }
    }

    report
}

/// True if the helicopter is touching any live dinosaur's body.
pub fn vehicle_collides(vehicle: &Vehicle, enemies: &[Enemy]) -> bool {
    let bounds = vehicle.bounds();
    enemies
        .iter()
        .any(|e| e.active && bounds.intersects(&e.body()))
}
