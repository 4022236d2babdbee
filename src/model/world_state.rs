use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::calendar::{Calendar, SportsContext};
use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EconomyOutlook {
    Weak,
    #[default]
    Stable,
    Strong,
}

string_enum!(EconomyOutlook {
    Weak => "weak",
    Stable => "stable",
    Strong => "strong",
});

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationMetrics {
    /// Fraction of residents currently ill (0.0–1.0).
    pub illness_rate: f64,
    /// Fraction of the labor force employed (0.0–1.0).
    pub employment_rate: f64,
    /// Net residents moving in (positive) or out (negative) this cycle.
    pub migration: i32,
    pub economy: EconomyOutlook,
}

impl Default for PopulationMetrics {
    fn default() -> Self {
        Self {
            illness_rate: 0.05,
            employment_rate: 0.92,
            migration: 0,
            economy: EconomyOutlook::Stable,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Weather {
    /// Free-text condition, e.g. "clear", "rain", "heat", "smoke".
    #[serde(rename = "type")]
    pub kind: String,
    /// Disruption multiplier; 1.0 is an ordinary day.
    pub impact: f64,
    pub first_snow: bool,
    pub first_warm_day: bool,
    pub heat_wave_declared: bool,
}

impl Default for Weather {
    fn default() -> Self {
        Self {
            kind: "clear".to_string(),
            impact: 1.0,
            first_snow: false,
            first_warm_day: false,
            heat_wave_declared: false,
        }
    }
}

impl Weather {
    /// Conditions that feed environmental hazards (fire weather, smoke, wind).
    pub fn is_hazardous(&self) -> bool {
        let kind = self.kind.to_lowercase();
        ["heat", "smoke", "storm", "wind"]
            .iter()
            .any(|k| kind.contains(k))
    }

    pub fn is_wet(&self) -> bool {
        let kind = self.kind.to_lowercase();
        ["rain", "storm", "flood"].iter().any(|k| kind.contains(k))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CivicLoad {
    #[default]
    Stable,
    Elevated,
    LoadStrain,
}

string_enum!(CivicLoad {
    Stable => "stable",
    Elevated => "elevated",
    LoadStrain => "load-strain",
});

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CityDynamics {
    /// City mood, -1.0 (grim) to 1.0 (buoyant).
    pub sentiment: f64,
    pub traffic: f64,
    /// Nightlife intensity on a 0–10 scale.
    pub nightlife: f64,
    pub public_spaces: f64,
    pub cultural_activity: f64,
    pub community_engagement: f64,
    /// Economic mood on a 0–100 scale.
    pub economic_mood: f64,
    pub civic_load: CivicLoad,
}

impl Default for CityDynamics {
    fn default() -> Self {
        Self {
            sentiment: 0.0,
            traffic: 1.0,
            nightlife: 5.0,
            public_spaces: 1.0,
            cultural_activity: 1.0,
            community_engagement: 1.0,
            economic_mood: 50.0,
            civic_load: CivicLoad::Stable,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ShockState {
    #[default]
    None,
    Active,
    Fading,
}

string_enum!(ShockState {
    None => "none",
    Active => "shock-flag",
    Fading => "shock-fading",
});

impl ShockState {
    pub fn is_present(self) -> bool {
        self != ShockState::None
    }
}

/// Multi-cycle trend flags computed upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum PatternFlag {
    #[default]
    None,
    StrainTrend,
    CalmAfterShock,
    MicroEventWave,
    Custom(String),
}

string_enum_open!(PatternFlag, None, {
    None => "none",
    StrainTrend => "strain-trend",
    CalmAfterShock => "calm-after-shock",
    MicroEventWave => "micro-event-wave",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum RecoveryLevel {
    #[default]
    None,
    Light,
    Heavy,
}

string_enum!(RecoveryLevel {
    None => "none",
    Light => "light",
    Heavy => "heavy",
});

/// Read-only snapshot of the city handed in once per cycle.
///
/// Every field has a neutral default so partial snapshots still run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldState {
    pub cycle: u32,
    /// Seed for reproducible runs; the cycle RNG is derived from `seed ^ cycle`.
    pub seed: Option<u64>,
    /// Caller-formatted timestamp copied onto every event of the cycle.
    pub timestamp: Option<String>,
    pub population: PopulationMetrics,
    pub weather: Weather,
    pub dynamics: CityDynamics,
    pub calendar: Calendar,
    pub sports: SportsContext,
    pub shock: ShockState,
    pub pattern: PatternFlag,
    pub migration_drift: f64,
    /// Volume multiplier during recovery periods (0.0–1.0).
    pub event_suppression: f64,
    pub recovery: RecoveryLevel,
    /// Number of high-chaos events in the previous cycle.
    pub prior_chaos: u32,
}

impl Default for WorldState {
    fn default() -> Self {
        Self {
            cycle: 0,
            seed: None,
            timestamp: None,
            population: PopulationMetrics::default(),
            weather: Weather::default(),
            dynamics: CityDynamics::default(),
            calendar: Calendar::default(),
            sports: SportsContext::default(),
            shock: ShockState::None,
            pattern: PatternFlag::None,
            migration_drift: 0.0,
            event_suppression: 1.0,
            recovery: RecoveryLevel::None,
            prior_chaos: 0,
        }
    }
}

impl WorldState {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Event suppression clamped into `[0, 1]`.
    pub fn suppression(&self) -> f64 {
        self.event_suppression.clamp(0.0, 1.0)
    }
}
