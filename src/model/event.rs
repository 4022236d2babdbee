use serde::{Deserialize, Serialize};

use super::calendar::{Holiday, SportsPhase};
use super::domain::Domain;
use super::neighborhood::Neighborhood;
use super::severity::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EventSource {
    Crisis,
    Texture,
    External,
}

string_enum!(EventSource {
    Crisis => "crisis-generator",
    Texture => "texture-generator",
    External => "external",
});

/// Append-only log entry describing something that happened this cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldEvent {
    pub cycle: u32,
    pub domain: Domain,
    /// Finer-grained label: crisis subtype or texture category key.
    pub subdomain: String,
    pub description: String,
    pub neighborhood: Option<Neighborhood>,
    pub severity: Severity,
    pub impact_score: u32,
    pub source: EventSource,
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_context: Option<Holiday>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sports_context: Option<SportsPhase>,
}

impl WorldEvent {
    /// Build an event with `impact_score` derived from `severity`.
    pub fn new(
        cycle: u32,
        domain: Domain,
        subdomain: impl Into<String>,
        description: impl Into<String>,
        neighborhood: Option<Neighborhood>,
        severity: Severity,
        source: EventSource,
    ) -> Self {
        Self {
            cycle,
            domain,
            subdomain: subdomain.into(),
            description: description.into(),
            neighborhood,
            severity,
            impact_score: severity.impact_score(),
            source,
            timestamp: None,
            holiday_context: None,
            sports_context: None,
        }
    }
}
