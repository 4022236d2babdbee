//! Weighted selection helpers shared by the generators.

use rand::{Rng, RngCore};

use crate::model::{Holiday, Neighborhood, SportsPhase, WorldState};

/// Minimum weight any neighborhood candidate can carry.
pub const WEIGHT_FLOOR: f64 = 0.1;

/// Ticket count for a weight: `round(max(weight, 0.1) * 10)`.
///
/// Selecting uniformly among tickets gives the same odds as replicating each
/// candidate that many times into a flat pool, without building the pool.
pub fn tickets(weight: f64) -> u32 {
    (weight.max(WEIGHT_FLOOR) * 10.0).round() as u32
}

/// Map a ticket number in `0..total_tickets` to its candidate.
pub fn select_by_ticket<T: Copy>(candidates: &[(T, f64)], mut roll: u32) -> Option<T> {
    for (item, weight) in candidates {
        let t = tickets(*weight);
        if roll < t {
            return Some(*item);
        }
        roll -= t;
    }
    None
}

/// Low-resolution weighted pick using the ticket scheme.
pub fn pick_by_tickets<T: Copy>(candidates: &[(T, f64)], rng: &mut dyn RngCore) -> Option<T> {
    let total: u32 = candidates.iter().map(|(_, w)| tickets(*w)).sum();
    if total == 0 {
        return None;
    }
    select_by_ticket(candidates, rng.random_range(0..total))
}

/// Continuous weighted pick. Non-positive weights never win.
pub fn pick_weighted<T: Copy>(candidates: &[(T, f64)], rng: &mut dyn RngCore) -> Option<T> {
    let total: f64 = candidates.iter().map(|(_, w)| w.max(0.0)).sum();
    if candidates.is_empty() || total <= 0.0 {
        return None;
    }
    let mut roll = rng.random::<f64>() * total;
    for (item, weight) in candidates {
        let w = weight.max(0.0);
        if roll < w {
            return Some(*item);
        }
        roll -= w;
    }
    // Float residue: fall back to the last candidate that could win.
    candidates
        .iter()
        .rev()
        .find(|(_, w)| *w > 0.0)
        .map(|(item, _)| *item)
}

/// Uniform pick from a static list.
pub fn pick_str(items: &[&'static str], rng: &mut dyn RngCore) -> Option<&'static str> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.random_range(0..items.len())])
}

/// Extra pull a neighborhood gets from the calendar this cycle.
pub fn calendar_bonus(hood: Neighborhood, state: &WorldState) -> f64 {
    let mut bonus = 0.0;

    if state.calendar.is_first_friday {
        bonus += match hood {
            Neighborhood::Uptown | Neighborhood::Kono => 0.6,
            Neighborhood::Temescal => 0.3,
            _ => 0.0,
        };
    }

    bonus += match (&state.calendar.holiday, hood) {
        (Holiday::LunarNewYear, Neighborhood::Chinatown) => 0.8,
        (Holiday::CincoDeMayo | Holiday::DiaDeMuertos, Neighborhood::Fruitvale) => 0.8,
        (Holiday::OaklandPride, Neighborhood::LakeMerritt) => 0.5,
        (Holiday::OaklandPride, Neighborhood::Downtown) => 0.3,
        (Holiday::Juneteenth, Neighborhood::WestOakland) => 0.5,
        (Holiday::Juneteenth, Neighborhood::LakeMerritt) => 0.3,
        (Holiday::Independence, Neighborhood::JackLondon) => 0.4,
        (Holiday::ArtSoulFestival, Neighborhood::Downtown) => 0.5,
        _ => 0.0,
    };

    bonus += match (state.sports.phase, hood) {
        (SportsPhase::Playoffs | SportsPhase::Championship, Neighborhood::JackLondon) => 0.5,
        (SportsPhase::Playoffs | SportsPhase::Championship, Neighborhood::Downtown) => 0.3,
        (SportsPhase::Regular, Neighborhood::JackLondon) => 0.2,
        _ => 0.0,
    };

    bonus
}

/// Candidate weights for all neighborhoods: base + `extra` + calendar, floored.
pub fn neighborhood_weights(
    state: &WorldState,
    extra: impl Fn(Neighborhood) -> f64,
) -> Vec<(Neighborhood, f64)> {
    Neighborhood::ALL
        .iter()
        .map(|&hood| {
            let w = hood.base_weight() + extra(hood) + calendar_bonus(hood, state);
            (hood, w.max(WEIGHT_FLOOR))
        })
        .collect()
}
