#![allow(dead_code)]

use cityworld::model::*;
use cityworld::sim::{AllowAll, CityStores, CycleConfig, CycleReport, run_cycle};

/// Neutral world state at `cycle` with a fixed seed.
pub fn seeded_state(seed: u64, cycle: u32) -> WorldState {
    WorldState {
        cycle,
        seed: Some(seed),
        ..WorldState::default()
    }
}

/// A city under pressure: sick, out of work, angry, in bad weather.
pub fn stressed_state(seed: u64, cycle: u32) -> WorldState {
    let mut state = seeded_state(seed, cycle);
    state.population.illness_rate = 0.1;
    state.population.employment_rate = 0.83;
    state.population.migration = 420;
    state.dynamics.sentiment = -0.6;
    state.dynamics.economic_mood = 18.0;
    state.dynamics.nightlife = 8.0;
    state.weather.kind = "storm".to_string();
    state.weather.impact = 1.9;
    state.calendar.season = Season::Winter;
    state
}

/// Run consecutive cycles against one set of stores.
pub fn run_cycles(
    make_state: impl Fn(u32) -> WorldState,
    cycles: std::ops::Range<u32>,
    stores: &mut CityStores,
) -> Vec<CycleReport> {
    let config = CycleConfig::default();
    cycles
        .map(|cycle| run_cycle(&make_state(cycle), &config, stores, &AllowAll, &[]))
        .collect()
}

pub fn read_lines(path: &std::path::Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}
