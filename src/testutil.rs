use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::model::*;
use crate::sim::{CycleConfig, CycleContext};

/// World state with every field at its neutral default, set to `cycle`.
pub fn neutral_state(cycle: u32) -> WorldState {
    WorldState {
        cycle,
        ..WorldState::default()
    }
}

/// Owns everything a `CycleContext` borrows so a single stage can be run in
/// isolation and its side effects inspected afterwards.
pub struct Harness {
    pub state: WorldState,
    pub config: CycleConfig,
    pub rng: SmallRng,
    pub cooldowns: CooldownStore,
    pub arcs: ArcRegistry,
    pub events: Vec<WorldEvent>,
    pub audit: Vec<String>,
}

impl Harness {
    pub fn new(state: WorldState, seed: u64) -> Self {
        Self::with_rng(state, SmallRng::seed_from_u64(seed))
    }

    pub fn with_rng(state: WorldState, rng: SmallRng) -> Self {
        Self {
            state,
            config: CycleConfig::default(),
            rng,
            cooldowns: CooldownStore::new(),
            arcs: ArcRegistry::new(),
            events: Vec::new(),
            audit: Vec::new(),
        }
    }

    pub fn ctx(&mut self) -> CycleContext<'_> {
        CycleContext {
            state: &self.state,
            config: &self.config,
            rng: &mut self.rng as &mut dyn RngCore,
            cooldowns: &mut self.cooldowns,
            arcs: &mut self.arcs,
            events: &mut self.events,
            audit: &mut self.audit,
        }
    }
}
