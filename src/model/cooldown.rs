use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::crisis::CrisisCategory;
use super::neighborhood::Neighborhood;

/// Crisis throttling state carried between cycles by the caller.
///
/// - `(category, location) -> until_cycle`: blocks while `cycle < until_cycle`.
/// - `(category, subtype) -> last_seen_cycle`: blocks within a trailing window.
///
/// Entries are never removed automatically; see [`CooldownStore::prune`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CooldownSnapshot", into = "CooldownSnapshot")]
pub struct CooldownStore {
    location_until: BTreeMap<(CrisisCategory, Neighborhood), u32>,
    subtype_seen: BTreeMap<(CrisisCategory, String), u32>,
}

impl CooldownStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location_until(&self, category: CrisisCategory, location: Neighborhood) -> Option<u32> {
        self.location_until.get(&(category, location)).copied()
    }

    pub fn set_location_until(&mut self, category: CrisisCategory, location: Neighborhood, until: u32) {
        self.location_until.insert((category, location), until);
    }

    /// True while the location cooldown has not expired at `cycle`.
    pub fn has_location_cooldown(
        &self,
        category: CrisisCategory,
        location: Neighborhood,
        cycle: u32,
    ) -> bool {
        self.location_until(category, location)
            .is_some_and(|until| cycle < until)
    }

    pub fn subtype_last_seen(&self, category: CrisisCategory, subtype: &str) -> Option<u32> {
        self.subtype_seen
            .get(&(category, subtype.to_string()))
            .copied()
    }

    pub fn mark_subtype_seen(&mut self, category: CrisisCategory, subtype: &str, cycle: u32) {
        self.subtype_seen.insert((category, subtype.to_string()), cycle);
    }

    /// True if the subtype was seen at most `window` cycles before `cycle`.
    pub fn has_subtype_cooldown(
        &self,
        category: CrisisCategory,
        subtype: &str,
        cycle: u32,
        window: u32,
    ) -> bool {
        self.subtype_last_seen(category, subtype)
            .is_some_and(|last| cycle.saturating_sub(last) <= window)
    }

    pub fn len(&self) -> usize {
        self.location_until.len() + self.subtype_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop entries that can no longer block anything at or after `cycle`.
    /// Returns how many entries were removed.
    ///
    /// Never called by the cycle runner; long-running callers opt in.
    pub fn prune(&mut self, cycle: u32, subtype_window: u32) -> usize {
        let before = self.len();
        self.location_until.retain(|_, until| *until > cycle);
        self.subtype_seen
            .retain(|_, last| cycle.saturating_sub(*last) <= subtype_window);
        before - self.len()
    }
}

#[derive(Serialize, Deserialize)]
struct LocationEntry {
    category: CrisisCategory,
    location: Neighborhood,
    until_cycle: u32,
}

#[derive(Serialize, Deserialize)]
struct SubtypeEntry {
    category: CrisisCategory,
    subtype: String,
    last_seen_cycle: u32,
}

/// JSON-friendly shape: maps with tuple keys become entry lists.
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct CooldownSnapshot {
    locations: Vec<LocationEntry>,
    subtypes: Vec<SubtypeEntry>,
}

impl From<CooldownSnapshot> for CooldownStore {
    fn from(snapshot: CooldownSnapshot) -> Self {
        let mut store = CooldownStore::new();
        for e in snapshot.locations {
            store.set_location_until(e.category, e.location, e.until_cycle);
        }
        for e in snapshot.subtypes {
            store.mark_subtype_seen(e.category, &e.subtype, e.last_seen_cycle);
        }
        store
    }
}

impl From<CooldownStore> for CooldownSnapshot {
    fn from(store: CooldownStore) -> Self {
        Self {
            locations: store
                .location_until
                .into_iter()
                .map(|((category, location), until_cycle)| LocationEntry {
                    category,
                    location,
                    until_cycle,
                })
                .collect(),
            subtypes: store
                .subtype_seen
                .into_iter()
                .map(|((category, subtype), last_seen_cycle)| SubtypeEntry {
                    category,
                    subtype,
                    last_seen_cycle,
                })
                .collect(),
        }
    }
}
