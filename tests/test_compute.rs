use chopper_strike::compute::*;
use chopper_strike::entities::*;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rules(hits_to_kill: u32) -> CombatRules {
    CombatRules {
        hits_to_kill,
        headshot_tolerance: 0.0,
    }
}

/// Enemy whose head spans x 88..100, y 100..112 and body x 100..136, y 100..136.
fn enemy() -> Enemy {
    Enemy::new(Vec2::new(100.0, 100.0))
}

fn missile(x: f32, y: f32) -> Projectile {
    Projectile::new(Vec2::new(x, y))
}

// ── move_vehicle ──────────────────────────────────────────────────────────────

#[test]
fn move_each_direction() {
    let v = Vehicle::default(); // (400, 300)
    let left = move_vehicle(&v, Steering { left: true, ..Default::default() });
    let right = move_vehicle(&v, Steering { right: true, ..Default::default() });
    let up = move_vehicle(&v, Steering { up: true, ..Default::default() });
    let down = move_vehicle(&v, Steering { down: true, ..Default::default() });
    assert_eq!(left.position, Vec2::new(390.0, 300.0));
    assert_eq!(right.position, Vec2::new(410.0, 300.0));
    assert_eq!(up.position, Vec2::new(400.0, 290.0));
    assert_eq!(down.position, Vec2::new(400.0, 310.0));
}

#[test]
fn move_diagonal_applies_both_keys() {
    let v = Vehicle::default();
    let moved = move_vehicle(&v, Steering { up: true, right: true, ..Default::default() });
    assert_eq!(moved.position, Vec2::new(410.0, 290.0));
}

#[test]
fn move_clamps_to_field() {
    let v = Vehicle::new(Vec2::new(5.0, 3.0));
    let moved = move_vehicle(&v, Steering { up: true, left: true, ..Default::default() });
    assert_eq!(moved.position, Vec2::ZERO);

    let v = Vehicle::new(Vec2::new(755.0, 570.0));
    let moved = move_vehicle(&v, Steering { down: true, right: true, ..Default::default() });
    assert_eq!(moved.position, Vec2::new(FIELD_WIDTH - VEHICLE_SIZE.x, FIELD_HEIGHT - VEHICLE_SIZE.y));
}

#[test]
fn supply_zone_is_below_the_line() {
    assert!(in_supply_zone(&Vehicle::new(Vec2::new(10.0, 551.0))));
    assert!(!in_supply_zone(&Vehicle::new(Vec2::new(10.0, 550.0))));
    assert!(!in_supply_zone(&Vehicle::default()));
}

// ── advance_projectiles ───────────────────────────────────────────────────────

#[test]
fn projectiles_climb_one_step() {
    let mut ps = vec![missile(50.0, 100.0)];
    advance_projectiles(&mut ps);
    assert_eq!(ps[0].position.y, 90.0);
    assert!(ps[0].active);
}

#[test]
fn projectiles_leaving_the_top_are_spent() {
    // y=0 -> -10, bottom edge at 2, still visible; y=-5 -> -15, gone.
    let mut ps = vec![missile(50.0, 0.0), missile(60.0, -5.0)];
    advance_projectiles(&mut ps);
    assert!(ps[0].active);
    assert!(!ps[1].active);
    assert_eq!(active_projectiles(&ps), 1);
}

#[test]
fn inactive_projectiles_do_not_move() {
    let mut ps = vec![missile(50.0, 100.0)];
    ps[0].active = false;
    advance_projectiles(&mut ps);
    assert_eq!(ps[0].position.y, 100.0);
}

// ── resolve_combat: headshots ─────────────────────────────────────────────────

#[test]
fn headshot_counts_once_and_spends_missile() {
    let mut ps = vec![missile(90.0, 100.0)];
    let mut es = vec![enemy()];
    let report = resolve_combat(&mut ps, &mut es, &rules(3));
    assert_eq!(report, CombatReport { headshots: 1, body_hits: 0, kills: 0 });
    assert!(!ps[0].active);
    assert_eq!(es[0].hits, 1);
    assert!(es[0].active);
}

#[test]
fn two_headshots_kill_on_easy() {
    // hits_to_kill = 2, as on easy
    let mut es = vec![enemy()];
    let mut first = vec![missile(90.0, 100.0)];
    let r1 = resolve_combat(&mut first, &mut es, &rules(2));
    assert_eq!(r1.kills, 0);
    assert!(es[0].active);

    let mut second = vec![missile(90.0, 100.0)];
    let r2 = resolve_combat(&mut second, &mut es, &rules(2));
    assert_eq!(r2.kills, 1);
    assert_eq!(es[0].hits, 2);
    assert!(!es[0].active);
}

#[test]
fn exact_alignment_required_with_zero_tolerance() {
    // Overlaps the head but sits 3 units lower than it.
    let mut ps = vec![missile(90.0, 103.0)];
    let mut es = vec![enemy()];
    let report = resolve_combat(&mut ps, &mut es, &rules(2));
    assert_eq!(report, CombatReport::default());
    assert!(ps[0].active);
    assert_eq!(es[0].hits, 0);
}

#[test]
fn tolerance_widens_alignment_window() {
    let tolerant = CombatRules { hits_to_kill: 2, headshot_tolerance: 5.0 };
    let mut ps = vec![missile(90.0, 103.0)];
    let mut es = vec![enemy()];
    let report = resolve_combat(&mut ps, &mut es, &tolerant);
    assert_eq!(report.headshots, 1);
    assert_eq!(es[0].hits, 1);
}

#[test]
fn aligned_but_not_overlapping_head_is_no_headshot() {
    // Same height as the head, but off to the side in open air.
    let mut ps = vec![missile(40.0, 100.0)];
    let mut es = vec![enemy()];
    let report = resolve_combat(&mut ps, &mut es, &rules(2));
    assert_eq!(report, CombatReport::default());
    assert!(ps[0].active);
}

// ── resolve_combat: body hits ─────────────────────────────────────────────────

#[test]
fn body_hit_spends_missile_without_damage() {
    let mut ps = vec![missile(110.0, 120.0)];
    let mut es = vec![enemy()];
    let report = resolve_combat(&mut ps, &mut es, &rules(2));
    assert_eq!(report, CombatReport { headshots: 0, body_hits: 1, kills: 0 });
    assert!(!ps[0].active);
    assert_eq!(es[0].hits, 0);
    assert!(es[0].active);
}

#[test]
fn aligned_body_hit_is_still_only_a_body_hit() {
    // Level with the head, but inside the body rather than the head box.
    let mut ps = vec![missile(110.0, 100.0)];
    let mut es = vec![enemy()];
    let report = resolve_combat(&mut ps, &mut es, &rules(2));
    assert_eq!(report.body_hits, 1);
    assert_eq!(es[0].hits, 0);
}

// ── resolve_combat: ordering and inactive entities ────────────────────────────

#[test]
fn first_enemy_in_list_order_wins() {
    // Both heads overlap the missile; only the first takes the hit.
    let mut ps = vec![missile(90.0, 100.0)];
    let mut es = vec![enemy(), Enemy::new(Vec2::new(102.0, 100.0))];
    let report = resolve_combat(&mut ps, &mut es, &rules(5));
    assert_eq!(report.headshots, 1);
    assert_eq!(es[0].hits, 1);
    assert_eq!(es[1].hits, 0);
}

#[test]
fn inactive_entities_are_skipped() {
    let mut ps = vec![missile(90.0, 100.0)];
    ps[0].active = false;
    let mut es = vec![enemy()];
    assert_eq!(resolve_combat(&mut ps, &mut es, &rules(2)), CombatReport::default());

    let mut ps = vec![missile(90.0, 100.0)];
    es[0].active = false;
    assert_eq!(resolve_combat(&mut ps, &mut es, &rules(2)), CombatReport::default());
    assert!(ps[0].active);
}

#[test]
fn each_missile_resolves_independently() {
    let mut ps = vec![missile(90.0, 100.0), missile(110.0, 120.0), missile(500.0, 500.0)];
    let mut es = vec![enemy()];
    let report = resolve_combat(&mut ps, &mut es, &rules(2));
    assert_eq!(report, CombatReport { headshots: 1, body_hits: 1, kills: 0 });
    assert!(ps[2].active);
    assert_eq!(ps.len(), 3); // nothing removed
}

// ── vehicle_collides ──────────────────────────────────────────────────────────

#[test]
fn vehicle_touching_body_collides() {
    let v = Vehicle::new(Vec2::new(100.0, 100.0));
    let es = vec![Enemy::new(Vec2::new(120.0, 110.0))];
    assert!(vehicle_collides(&v, &es));
}

#[test]
fn vehicle_ignores_dead_and_distant_enemies() {
    let v = Vehicle::new(Vec2::new(100.0, 100.0));
    let mut dead = Enemy::new(Vec2::new(120.0, 110.0));
    dead.active = false;
    let far = Enemy::new(Vec2::new(600.0, 400.0));
    assert!(!vehicle_collides(&v, &[dead, far]));
}

// ── random_enemy_position ─────────────────────────────────────────────────────

#[test]
fn spawn_positions_keep_head_and_body_on_field() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let e = Enemy::new(random_enemy_position(&mut rng));
        assert!(e.head().min.x >= 0.0);
        assert!(e.body().max().x <= FIELD_WIDTH);
        assert!(e.body().min.y >= 0.0);
        assert!(e.body().max().y <= FIELD_HEIGHT);
        assert_eq!(e.position, e.position.floor());
    }
}
