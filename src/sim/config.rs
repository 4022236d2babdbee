use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Tunables for one generation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    /// Crisis acceptance budget on an ordinary cycle.
    pub max_new_crises: usize,
    /// Crisis acceptance budget while any shock state is present.
    pub max_new_crises_during_shock: usize,
    /// Cycles a `(category, location)` stays blocked after a crisis.
    pub base_cooldown: u32,
    /// A `(category, subtype)` pair is blocked for this many cycles after use.
    pub subtype_window: u32,
    /// How many past cycles of ambient descriptions to avoid repeating.
    pub ledger_lookback: u32,
    /// Attempts to find unused texture before accepting a repeat.
    pub max_item_retries: u32,
    pub min_events: u32,
    pub max_events: u32,
    /// Upper bound on a single crisis roll's base chance.
    pub chance_cap: f64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            max_new_crises: 3,
            max_new_crises_during_shock: 2,
            base_cooldown: 3,
            subtype_window: 2,
            ledger_lookback: 5,
            max_item_retries: 8,
            min_events: 1,
            max_events: 6,
            chance_cap: 0.40,
        }
    }
}

impl CycleConfig {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let config: CycleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Reject tunables the generators cannot honor.
    pub fn validate(&self) -> Result<(), Error> {
        if self.min_events > self.max_events {
            return Err(Error::InvalidConfig {
                field: "min_events",
                reason: format!(
                    "{} is above max_events {}",
                    self.min_events, self.max_events
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.chance_cap) {
            return Err(Error::InvalidConfig {
                field: "chance_cap",
                reason: format!("{} is outside [0, 1]", self.chance_cap),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_overrides_defaults() {
        let config = CycleConfig::from_json_str(r#"{ "base_cooldown": 5 }"#).unwrap();
        assert_eq!(config.base_cooldown, 5);
        assert_eq!(config.max_new_crises, 3);
        assert_eq!(config.chance_cap, 0.40);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            CycleConfig::from_json_str("{ nope"),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn inverted_event_range_is_rejected() {
        assert!(matches!(
            CycleConfig::from_json_str(r#"{ "min_events": 4, "max_events": 2 }"#),
            Err(Error::InvalidConfig { field: "min_events", .. })
        ));
    }

    #[test]
    fn chance_cap_must_be_a_probability() {
        for json in [r#"{ "chance_cap": -0.1 }"#, r#"{ "chance_cap": 1.5 }"#] {
            assert!(matches!(
                CycleConfig::from_json_str(json),
                Err(Error::InvalidConfig { field: "chance_cap", .. })
            ));
        }
        assert!(CycleConfig::from_json_str(r#"{ "chance_cap": 0.0 }"#).is_ok());
    }
}
