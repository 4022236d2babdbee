use rand::RngCore;

use super::config::CycleConfig;
use crate::model::{ArcRegistry, CooldownStore, WorldEvent, WorldState};

/// Context passed to each generator stage within a cycle.
///
/// Bundled so stages share one RNG stream and see each other's writes to the
/// cooldown store and arc registry immediately.
pub struct CycleContext<'a> {
    pub state: &'a WorldState,
    pub config: &'a CycleConfig,
    pub rng: &'a mut dyn RngCore,
    pub cooldowns: &'a mut CooldownStore,
    pub arcs: &'a mut ArcRegistry,
    /// Events produced this cycle, in creation order.
    pub events: &'a mut Vec<WorldEvent>,
    /// Human-readable trail of accepted crises.
    pub audit: &'a mut Vec<String>,
}

impl CycleContext<'_> {
    pub fn cycle(&self) -> u32 {
        self.state.cycle
    }

    /// Stamp an event with the cycle's timestamp and calendar context, then log it.
    pub fn push_event(&mut self, mut event: WorldEvent) {
        event.timestamp = self.state.timestamp.clone();
        if !self.state.calendar.holiday.is_none() {
            event.holiday_context = Some(self.state.calendar.holiday.clone());
        }
        if self.state.sports.in_season() {
            event.sports_context = Some(self.state.sports.phase);
        }
        self.events.push(event);
    }
}
