//! Per-cycle domain presence: how much of the city's attention each domain
//! holds, counted from events, active arcs, story seeds, hooks and the
//! calendar.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{
    Arc, ArcRegistry, Domain, HolidayPriority, SportsPhase, StoryHook, StorySeed, WorldEvent,
    WorldState,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainPresence {
    /// One entry per domain, in the fixed domain order.
    pub counts: BTreeMap<Domain, u32>,
    /// Highest count; ties go to the earlier domain. `None` when nothing counted.
    pub dominant: Option<Domain>,
    pub total: u32,
}

impl Default for DomainPresence {
    fn default() -> Self {
        Self {
            counts: Domain::ALL.iter().map(|&d| (d, 0)).collect(),
            dominant: None,
            total: 0,
        }
    }
}

impl DomainPresence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, domain: Domain) -> u32 {
        self.counts.get(&domain).copied().unwrap_or(0)
    }

    pub fn add(&mut self, domain: Domain, n: u32) {
        *self.counts.entry(domain).or_insert(0) += n;
        self.refresh();
    }

    /// Domains with a non-zero count, in the fixed domain order.
    pub fn present(&self) -> impl Iterator<Item = (Domain, u32)> + '_ {
        self.counts
            .iter()
            .filter(|(_, n)| **n > 0)
            .map(|(d, n)| (*d, *n))
    }

    fn refresh(&mut self) {
        self.total = self.counts.values().sum();
        let mut best: Option<(Domain, u32)> = None;
        for (&domain, &n) in &self.counts {
            if n > 0 && best.is_none_or(|(_, b)| n > b) {
                best = Some((domain, n));
            }
        }
        self.dominant = best.map(|(d, _)| d);
    }
}

/// Domain an arc contributes: its type's domain when the type is specific,
/// otherwise the domain stamped on the arc.
pub fn arc_domain(arc: &Arc) -> Domain {
    arc.arc_type.implied_domain().unwrap_or(arc.domain)
}

/// Fixed calendar increments for the cycle.
pub fn calendar_presence(state: &WorldState) -> DomainPresence {
    let mut presence = DomainPresence::new();
    let cal = &state.calendar;

    if !cal.holiday.is_none() {
        presence.add(Domain::Holiday, 1);
        if matches!(cal.holiday_priority, HolidayPriority::Major | HolidayPriority::Oakland) {
            presence.add(Domain::Festival, 1);
        }
    }
    if cal.is_first_friday {
        presence.add(Domain::Arts, 2);
        presence.add(Domain::Culture, 1);
    }
    if cal.is_creation_day {
        presence.add(Domain::Civic, 1);
        presence.add(Domain::Community, 1);
    }
    if state.sports.in_season() {
        presence.add(Domain::Sports, 1);
        match state.sports.phase {
            SportsPhase::Championship => presence.add(Domain::Sports, 2),
            SportsPhase::Playoffs => presence.add(Domain::Sports, 1),
            _ => {}
        }
    }
    presence
}

/// Recompute presence from scratch for one cycle.
pub fn track_presence(
    state: &WorldState,
    events: &[WorldEvent],
    arcs: &ArcRegistry,
    seeds: &[StorySeed],
    hooks: &[StoryHook],
) -> DomainPresence {
    let mut presence = calendar_presence(state);
    for event in events {
        presence.add(event.domain, 1);
    }
    for arc in arcs.active() {
        presence.add(arc_domain(arc), 1);
    }
    for seed in seeds {
        presence.add(seed.domain, 1);
    }
    for hook in hooks {
        presence.add(hook.domain, 1);
    }
    presence
}
