use serde::{Deserialize, Serialize};

use super::config::CycleConfig;
use super::context::CycleContext;
use super::crisis::generate_crises;
use super::hooks::synthesize_hooks;
use super::policy::DomainPolicy;
use super::presence::{DomainPresence, track_presence};
use super::rng::cycle_rng;
use super::texture::generate_texture;
use crate::model::{
    Arc, ArcRegistry, CooldownStore, Crisis, EventLedger, StoryHook, StorySeed, WorldEvent,
    WorldState,
};

/// State that outlives a cycle. The caller persists it between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CityStores {
    pub cooldowns: CooldownStore,
    pub arcs: ArcRegistry,
    pub ledger: EventLedger,
}

/// Everything one cycle produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub cycle: u32,
    pub crises: Vec<Crisis>,
    /// Crisis events first, then texture events.
    pub events: Vec<WorldEvent>,
    /// Arcs opened this cycle. They are also in the caller's registry.
    pub spawned_arcs: Vec<Arc>,
    pub presence: DomainPresence,
    pub hooks: Vec<StoryHook>,
    pub audit: Vec<String>,
}

/// Run one full cycle: crises, texture, domain presence, story hooks.
///
/// Crisis rolls draw from the cycle RNG before any texture roll, so a seeded
/// state reproduces the same report given the same stores.
pub fn run_cycle(
    state: &WorldState,
    config: &CycleConfig,
    stores: &mut CityStores,
    policy: &dyn DomainPolicy,
    seeds: &[StorySeed],
) -> CycleReport {
    run_cycle_with_events(state, config, stores, policy, seeds, &[])
}

/// [`run_cycle`] plus events produced outside this crate this cycle.
///
/// External events count toward presence and can raise event hooks. They are
/// not copied into the report's event list and never touch the RNG.
pub fn run_cycle_with_events(
    state: &WorldState,
    config: &CycleConfig,
    stores: &mut CityStores,
    policy: &dyn DomainPolicy,
    seeds: &[StorySeed],
    external: &[WorldEvent],
) -> CycleReport {
    let cycle = state.cycle;
    let mut rng = cycle_rng(state.seed, cycle);
    let mut events = Vec::new();
    let mut audit = Vec::new();
    let arcs_before = stores.arcs.len();

    let (crises, texture) = {
        let mut ctx = CycleContext {
            state,
            config,
            rng: &mut rng,
            cooldowns: &mut stores.cooldowns,
            arcs: &mut stores.arcs,
            events: &mut events,
            audit: &mut audit,
        };
        let crises = generate_crises(&mut ctx);
        let texture = generate_texture(&mut ctx, policy, &stores.ledger);
        (crises, texture)
    };

    for event in &texture {
        stores.ledger.record(cycle, event.description.clone());
    }
    stores.ledger.prune(cycle, config.ledger_lookback);

    let spawned_arcs = stores.arcs.all()[arcs_before..].to_vec();
    let observed: Vec<WorldEvent> = events.iter().chain(external).cloned().collect();
    let presence = track_presence(state, &observed, &stores.arcs, seeds, &[]);
    let hooks = synthesize_hooks(state, &stores.arcs, &presence, &observed);

    tracing::info!(
        cycle,
        crises = crises.len(),
        events = events.len(),
        external = external.len(),
        arcs_spawned = spawned_arcs.len(),
        hooks = hooks.len(),
        dominant = ?presence.dominant,
        "cycle complete"
    );

    CycleReport {
        cycle,
        crises,
        events,
        spawned_arcs,
        presence,
        hooks,
        audit,
    }
}
