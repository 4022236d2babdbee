use serde::{Deserialize, Serialize};

use super::domain::Domain;
use super::neighborhood::Neighborhood;

/// Arc phases in lifecycle order. Movement is strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ArcPhase {
    #[default]
    Early,
    Rising,
    Peak,
    Decline,
    Resolved,
}

string_enum!(ArcPhase {
    Early => "early",
    Rising => "rising",
    Peak => "peak",
    Decline => "decline",
    Resolved => "resolved",
});

impl ArcPhase {
    pub fn is_resolved(self) -> bool {
        self == ArcPhase::Resolved
    }

    /// Whether an external lifecycle processor may move an arc from `self`
    /// to `next`. Phases may be skipped but never revisited.
    pub fn can_advance_to(self, next: ArcPhase) -> bool {
        next > self
    }
}

/// Narrative thread type. Unknown tags from upstream are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ArcType {
    Generic,
    Crisis,
    HealthCrisis,
    LaborStrain,
    BudgetStrain,
    MigrationPressure,
    InfrastructureFailure,
    PublicSafety,
    EnvironmentalHazard,
    CrimeWave,
    Festival,
    Cultural,
    Arts,
    Sports,
    Housing,
    Transit,
    Education,
    Nightlife,
    Community,
    Technology,
    Weather,
    Custom(String),
}

string_enum_open!(ArcType, Generic, {
    Generic => "generic",
    Crisis => "crisis",
    HealthCrisis => "health-crisis",
    LaborStrain => "labor-strain",
    BudgetStrain => "budget-strain",
    MigrationPressure => "migration-pressure",
    InfrastructureFailure => "infrastructure-failure",
    PublicSafety => "public-safety",
    EnvironmentalHazard => "environmental-hazard",
    CrimeWave => "crime-wave",
    Festival => "festival",
    Cultural => "cultural",
    Arts => "arts",
    Sports => "sports",
    Housing => "housing",
    Transit => "transit",
    Education => "education",
    Nightlife => "nightlife",
    Community => "community",
    Technology => "technology",
    Weather => "weather",
});

impl ArcType {
    /// Domain implied by the arc type alone, if the type is specific enough.
    pub fn implied_domain(&self) -> Option<Domain> {
        let domain = match self {
            ArcType::HealthCrisis => Domain::Health,
            ArcType::LaborStrain | ArcType::BudgetStrain => Domain::Economic,
            ArcType::MigrationPressure => Domain::Civic,
            ArcType::InfrastructureFailure => Domain::Infrastructure,
            ArcType::PublicSafety => Domain::Safety,
            ArcType::EnvironmentalHazard => Domain::Environment,
            ArcType::CrimeWave => Domain::Crime,
            ArcType::Festival => Domain::Festival,
            ArcType::Cultural => Domain::Culture,
            ArcType::Arts => Domain::Arts,
            ArcType::Sports => Domain::Sports,
            ArcType::Housing => Domain::Housing,
            ArcType::Transit => Domain::Transit,
            ArcType::Education => Domain::Education,
            ArcType::Nightlife => Domain::Nightlife,
            ArcType::Community => Domain::Community,
            ArcType::Technology => Domain::Technology,
            ArcType::Weather => Domain::Weather,
            ArcType::Generic | ArcType::Crisis | ArcType::Custom(_) => return None,
        };
        Some(domain)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolutionConditions {
    pub natural_resolution: String,
    /// Expected lifetime in cycles, inclusive.
    pub expected_duration: (u32, u32),
    pub accelerators: Vec<String>,
}

/// A long-lived narrative thread. Owned by the caller between cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub arc_id: String,
    #[serde(rename = "type")]
    pub arc_type: ArcType,
    pub phase: ArcPhase,
    pub tension: f64,
    pub age: u32,
    /// `None` means the arc is city-wide.
    pub neighborhood: Option<Neighborhood>,
    pub domain: Domain,
    pub summary: String,
    pub subtype: String,
    pub cycle_created: u32,
    pub cycle_resolved: Option<u32>,
    pub resolution_conditions: ResolutionConditions,
    pub source: String,
}

impl Arc {
    pub fn is_active(&self) -> bool {
        !self.phase.is_resolved()
    }
}

/// Caller-owned arc list with the lookups the generators need.
///
/// Holds at most one active arc per `(domain, neighborhood)` pair as long as
/// arcs are only added through the spawn path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArcRegistry {
    arcs: Vec<Arc>,
}

impl ArcRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_arcs(arcs: Vec<Arc>) -> Self {
        Self { arcs }
    }

    pub fn into_arcs(self) -> Vec<Arc> {
        self.arcs
    }

    pub fn all(&self) -> &[Arc] {
        &self.arcs
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Arcs that are not resolved, in insertion order.
    pub fn active(&self) -> impl Iterator<Item = &Arc> {
        self.arcs.iter().filter(|a| a.is_active())
    }

    /// True if a non-resolved arc already holds this `(domain, neighborhood)`
    /// slot. City-wide arcs (`None`) only collide with other city-wide arcs.
    pub fn has_active(&self, domain: Domain, neighborhood: Option<Neighborhood>) -> bool {
        self.active()
            .any(|a| a.domain == domain && a.neighborhood == neighborhood)
    }

    pub fn get(&self, arc_id: &str) -> Option<&Arc> {
        self.arcs.iter().find(|a| a.arc_id == arc_id)
    }

    pub(crate) fn push(&mut self, arc: Arc) {
        self.arcs.push(arc);
    }
}
