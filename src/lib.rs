pub mod error;
pub mod flush;
pub mod id;
pub mod model;
pub mod sim;

#[cfg(test)]
mod testutil;

pub use error::Error;
pub use id::IdGenerator;
pub use model::{
    Arc, ArcPhase, ArcRegistry, ArcType, CooldownStore, Crisis, CrisisCategory, Domain,
    EventLedger, Neighborhood, Severity, StoryHook, StorySeed, WorldEvent, WorldState,
};
pub use sim::{
    CityStores, CycleConfig, CycleReport, DomainPolicy, run_cycle, run_cycle_with_events,
};
