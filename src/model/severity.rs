use serde::{Deserialize, Serialize};

/// Three-level intensity rating shared by crises and world events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Severity {
    Low,
    Medium,
    High,
}

string_enum!(Severity {
    Low => "low",
    Medium => "medium",
    High => "high",
});

impl Severity {
    /// Fixed numeric impact attached to every event of this severity.
    pub fn impact_score(self) -> u32 {
        match self {
            Severity::Low => 15,
            Severity::Medium => 30,
            Severity::High => 50,
        }
    }

    /// Starting tension for an arc spawned at this severity.
    pub fn baseline_tension(self) -> f64 {
        match self {
            Severity::Low => 2.0,
            Severity::Medium => 4.0,
            Severity::High => 6.0,
        }
    }
}
