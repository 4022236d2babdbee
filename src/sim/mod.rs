pub mod arcs;
mod config;
mod context;
pub mod crisis;
pub mod hooks;
mod policy;
pub mod presence;
mod rng;
mod runner;
pub mod sampling;
pub mod texture;

pub use config::CycleConfig;
pub use context::CycleContext;
pub use policy::{AllowAll, DomainPolicy, SuppressDomains};
pub use presence::DomainPresence;
pub use rng::{cycle_rng, cycle_seed};
pub use runner::{CityStores, CycleReport, run_cycle, run_cycle_with_events};
