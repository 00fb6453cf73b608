use std::{thread, time::Duration};

use liblife::{Simulation, SimulationConfig};

fn fast_config() -> SimulationConfig {
    SimulationConfig {
        rows: 8,
        cols: 8,
        tick_millis: 10,
        autostart: false,
        seed: Some(3),
        ..SimulationConfig::default()
    }
}

/// Paused simulation holding only a blinker, so ticks are observable but the
/// board can never go extinct on its own.
fn blinker_simulation(config: SimulationConfig) -> Simulation {
    let mut simulation = Simulation::new(config);
    simulation.clear();
    for (row, col) in [(3, 2), (3, 3), (3, 4)] {
        simulation.toggle_cell(row, col).unwrap();
    }
    simulation
}

#[test]
fn running_simulation_advances_generations() {
    let mut simulation = blinker_simulation(fast_config());

    simulation.play();
    assert!(simulation.snapshot().running);

    thread::sleep(Duration::from_millis(200));
    simulation.pause();

    let snapshot = simulation.snapshot();
    assert!(!snapshot.running);
    assert!(snapshot.generation > 0);
    // The blinker oscillates forever, it never gains or loses cells.
    assert_eq!(snapshot.board.living_count(), 3);
}

#[test]
fn pause_freezes_the_generation_count() {
    let mut simulation = blinker_simulation(fast_config());

    simulation.play();
    thread::sleep(Duration::from_millis(100));
    simulation.pause();

    let frozen = simulation.snapshot().generation;
    thread::sleep(Duration::from_millis(100));

    assert_eq!(simulation.snapshot().generation, frozen);
}

#[test]
fn pause_before_the_first_tick_is_a_clean_no_op() {
    let mut simulation = blinker_simulation(SimulationConfig {
        tick_millis: 60_000,
        ..fast_config()
    });

    simulation.play();
    simulation.pause();

    let snapshot = simulation.snapshot();
    assert_eq!(snapshot.generation, 0);
    assert!(!snapshot.running);

    // Pausing again when already stopped changes nothing.
    simulation.pause();
    assert_eq!(simulation.snapshot(), snapshot);
}

#[test]
fn extinction_auto_clears_and_stops_the_clock() {
    let mut simulation = Simulation::new(fast_config());
    simulation.clear();
    // A lone cell dies of underpopulation on the first tick.
    simulation.toggle_cell(0, 0).unwrap();

    simulation.play();
    thread::sleep(Duration::from_millis(200));

    let snapshot = simulation.snapshot();
    assert!(!snapshot.running);
    assert!(snapshot.cleared);
    assert_eq!(snapshot.generation, 0);
    assert_eq!(snapshot.board.living_count(), 0);
}

#[test]
fn clock_restarts_after_an_extinction_stop() {
    let mut simulation = Simulation::new(fast_config());
    simulation.clear();
    simulation.toggle_cell(0, 0).unwrap();
    simulation.play();
    thread::sleep(Duration::from_millis(100));
    assert!(simulation.snapshot().cleared);

    for (row, col) in [(3, 2), (3, 3), (3, 4)] {
        simulation.toggle_cell(row, col).unwrap();
    }
    simulation.play();
    thread::sleep(Duration::from_millis(100));
    simulation.pause();

    let snapshot = simulation.snapshot();
    assert!(snapshot.generation > 0);
    assert_eq!(snapshot.board.living_count(), 3);
}

#[test]
fn autostart_begins_running_immediately() {
    // Default 30x50 at 0.30 density cannot plausibly die within the test
    // window, so the clock keeps running.
    let simulation = Simulation::new(SimulationConfig {
        tick_millis: 10,
        seed: Some(11),
        ..SimulationConfig::default()
    });

    thread::sleep(Duration::from_millis(200));

    let snapshot = simulation.snapshot();
    assert!(snapshot.running);
    assert!(snapshot.generation > 0);
}
