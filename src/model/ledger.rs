use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// Descriptions of ambient events from recent cycles, used to avoid
/// repeating the same texture too soon. Persisted by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLedger {
    by_cycle: BTreeMap<u32, Vec<String>>,
}

impl EventLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, cycle: u32, description: impl Into<String>) {
        self.by_cycle.entry(cycle).or_default().push(description.into());
    }

    /// Descriptions from the `lookback` cycles strictly before `cycle`.
    pub fn recent(&self, cycle: u32, lookback: u32) -> HashSet<&str> {
        let start = cycle.saturating_sub(lookback);
        self.by_cycle
            .range(start..cycle)
            .flat_map(|(_, descs)| descs.iter().map(String::as_str))
            .collect()
    }

    /// Forget cycles older than the lookback window ending at `cycle`.
    pub fn prune(&mut self, cycle: u32, lookback: u32) {
        let start = cycle.saturating_sub(lookback);
        self.by_cycle.retain(|c, _| *c >= start);
    }

    pub fn cycles(&self) -> usize {
        self.by_cycle.len()
    }
}
