#[macro_use]
mod macros;

pub mod adapter;
pub mod arc;
pub mod calendar;
pub mod cooldown;
pub mod crisis;
pub mod domain;
pub mod event;
pub mod hook;
pub mod ledger;
pub mod neighborhood;
pub mod severity;
pub mod world_state;

pub use adapter::StorySeed;
pub use arc::{Arc, ArcPhase, ArcRegistry, ArcType, ResolutionConditions};
pub use calendar::{
    Calendar, Holiday, HolidayPriority, Season, SeasonalMarker, SportsContext, SportsPhase,
    SportsSource,
};
pub use cooldown::CooldownStore;
pub use crisis::{Crisis, CrisisCategory, CrisisRoll};
pub use domain::Domain;
pub use event::{EventSource, WorldEvent};
pub use hook::{HookType, StoryHook};
pub use ledger::EventLedger;
pub use neighborhood::Neighborhood;
pub use severity::Severity;
pub use world_state::{
    CityDynamics, CivicLoad, EconomyOutlook, PatternFlag, PopulationMetrics, RecoveryLevel,
    ShockState, Weather, WorldState,
};
