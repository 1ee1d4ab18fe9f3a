use std::time::Duration;

use chopper_strike::difficulty::*;
use chopper_strike::entities::Level;

#[test]
fn easy_table() {
    let p = Parameters::for_level(Level::Easy);
    assert_eq!(p.hits_to_kill, 2);
    assert_eq!(p.vehicle_capacity, 5);
    assert_eq!(p.reload_time, Duration::from_secs(5));
    assert_eq!(p.spawn_period, Duration::from_secs(4));
}

#[test]
fn medium_table() {
    let p = Parameters::for_level(Level::Medium);
    assert_eq!(p.hits_to_kill, 3);
    assert_eq!(p.vehicle_capacity, 3);
    assert_eq!(p.reload_time, Duration::from_secs(3));
    assert_eq!(p.spawn_period, Duration::from_secs(3));
}

#[test]
fn hard_table() {
    let p = Parameters::for_level(Level::Hard);
    assert_eq!(p.hits_to_kill, 4);
    assert_eq!(p.vehicle_capacity, 2);
    assert_eq!(p.reload_time, Duration::from_secs(2));
    assert_eq!(p.spawn_period, Duration::from_secs(2));
}

#[test]
fn harder_levels_never_get_easier() {
    let levels = [Level::Easy, Level::Medium, Level::Hard].map(Parameters::for_level);
    for pair in levels.windows(2) {
        assert!(pair[1].hits_to_kill >= pair[0].hits_to_kill);
        assert!(pair[1].vehicle_capacity <= pair[0].vehicle_capacity);
        assert!(pair[1].spawn_period <= pair[0].spawn_period);
    }
}

#[test]
fn default_is_the_compile_time_level() {
    assert_eq!(Parameters::default(), Parameters::for_level(DEFAULT_LEVEL));
    assert_eq!(DEFAULT_LEVEL, Level::Easy);
}

#[test]
fn configure_known_codes() {
    let prior = Parameters::for_level(Level::Easy);
    assert_eq!(configure(prior, 2), Parameters::for_level(Level::Medium));
    assert_eq!(configure(prior, 3), Parameters::for_level(Level::Hard));
}

#[test]
fn configure_unknown_code_keeps_prior() {
    let prior = Parameters::for_level(Level::Hard);
    assert_eq!(configure(prior, 0), prior);
    assert_eq!(configure(prior, 7), prior);
}
