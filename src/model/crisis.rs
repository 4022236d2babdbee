use serde::{Deserialize, Serialize};

use super::arc::ArcType;
use super::domain::Domain;
use super::neighborhood::Neighborhood;
use super::severity::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CrisisCategory {
    Health,
    Economic,
    Civic,
    Infrastructure,
    Safety,
    Environment,
}

string_enum!(CrisisCategory {
    Health => "HEALTH",
    Economic => "ECONOMIC",
    Civic => "CIVIC",
    Infrastructure => "INFRASTRUCTURE",
    Safety => "SAFETY",
    Environment => "ENVIRONMENT",
});

impl CrisisCategory {
    pub fn domain(self) -> Domain {
        match self {
            CrisisCategory::Health => Domain::Health,
            CrisisCategory::Economic => Domain::Economic,
            CrisisCategory::Civic => Domain::Civic,
            CrisisCategory::Infrastructure => Domain::Infrastructure,
            CrisisCategory::Safety => Domain::Safety,
            CrisisCategory::Environment => Domain::Environment,
        }
    }
}

/// One independent probability roll per cycle. Two rolls share the
/// `Economic` category; declaration order is the roll order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CrisisRoll {
    Health,
    Employment,
    Migration,
    Economy,
    Infrastructure,
    Safety,
    Environment,
}

string_enum!(CrisisRoll {
    Health => "health",
    Employment => "employment",
    Migration => "migration",
    Economy => "economy",
    Infrastructure => "infrastructure",
    Safety => "safety",
    Environment => "environment",
});

impl CrisisRoll {
    pub fn category(self) -> CrisisCategory {
        match self {
            CrisisRoll::Health => CrisisCategory::Health,
            CrisisRoll::Employment | CrisisRoll::Economy => CrisisCategory::Economic,
            CrisisRoll::Migration => CrisisCategory::Civic,
            CrisisRoll::Infrastructure => CrisisCategory::Infrastructure,
            CrisisRoll::Safety => CrisisCategory::Safety,
            CrisisRoll::Environment => CrisisCategory::Environment,
        }
    }

    /// Arc type used when this roll spawns an arc outside of a shock.
    pub fn arc_type(self) -> ArcType {
        match self {
            CrisisRoll::Health => ArcType::HealthCrisis,
            CrisisRoll::Employment => ArcType::LaborStrain,
            CrisisRoll::Migration => ArcType::MigrationPressure,
            CrisisRoll::Economy => ArcType::BudgetStrain,
            CrisisRoll::Infrastructure => ArcType::InfrastructureFailure,
            CrisisRoll::Safety => ArcType::PublicSafety,
            CrisisRoll::Environment => ArcType::EnvironmentalHazard,
        }
    }
}

/// A crisis accepted this cycle. Transient; never persisted directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crisis {
    pub category: CrisisCategory,
    pub roll: CrisisRoll,
    pub subtype: String,
    pub severity: Severity,
    pub location: Neighborhood,
    pub cycle: u32,
}

impl Crisis {
    pub fn domain(&self) -> Domain {
        self.category.domain()
    }

    /// Audit line recorded when the crisis is accepted.
    pub fn audit_line(&self) -> String {
        format!(
            "cycle {}: {} {} '{}' in {}",
            self.cycle, self.category, self.severity, self.subtype, self.location
        )
    }
}
