use serde::{Deserialize, Serialize};

use super::domain::Domain;
use super::neighborhood::Neighborhood;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum HookType {
    Arc,
    Cluster,
    Signal,
    Holiday,
    FirstFriday,
    CreationDay,
    Sports,
    Weather,
    Sentiment,
    Cultural,
    Community,
    Pattern,
    Shock,
    Event,
    Demographic,
    Nightlife,
    Seasonal,
}

string_enum!(HookType {
    Arc => "arc",
    Cluster => "cluster",
    Signal => "signal",
    Holiday => "holiday",
    FirstFriday => "firstfriday",
    CreationDay => "creationday",
    Sports => "sports",
    Weather => "weather",
    Sentiment => "sentiment",
    Cultural => "cultural",
    Community => "community",
    Pattern => "pattern",
    Shock => "shock",
    Event => "event",
    Demographic => "demographic",
    Nightlife => "nightlife",
    Seasonal => "seasonal",
});

/// A prioritized writing prompt routed to a desk. Rebuilt every cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryHook {
    pub hook_id: String,
    pub domain: Domain,
    pub neighborhood: Option<Neighborhood>,
    /// 1 (low) to 3 (urgent).
    pub priority: u8,
    pub text: String,
    pub linked_arc_id: Option<String>,
    pub hook_type: HookType,
    pub suggested_desk: String,
    pub cycle: u32,
}
