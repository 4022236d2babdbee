//! Boundary adapters for loosely shaped upstream records.
//!
//! Story seeds and externally produced events arrive with inconsistent field
//! names. They are converted here once; nothing past this module sees the raw
//! shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::Domain;
use super::event::{EventSource, WorldEvent};
use super::neighborhood::Neighborhood;
use super::severity::Severity;

const DOMAIN_FIELDS: &[&str] = &["domain", "Domain", "seedDomain", "SeedDomain"];
const TEXT_FIELDS: &[&str] = &["description", "Description", "subtype", "text", "seedText"];
const SUBDOMAIN_FIELDS: &[&str] = &["subdomain", "subtype", "category"];
const NEIGHBORHOOD_FIELDS: &[&str] = &["neighborhood", "Neighborhood", "location"];
const SEVERITY_FIELDS: &[&str] = &["severity", "Severity"];

/// Canonical narrative seed used by the presence tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorySeed {
    pub domain: Domain,
    pub text: String,
}

fn first_str<'a>(record: &'a Value, fields: &[&str]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|f| record.get(f).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

impl StorySeed {
    /// Convert one raw record. Records without any text are dropped.
    pub fn from_value(record: &Value) -> Option<StorySeed> {
        let text = first_str(record, TEXT_FIELDS)?;
        let domain = Domain::resolve(first_str(record, DOMAIN_FIELDS), text);
        Some(StorySeed {
            domain,
            text: text.to_string(),
        })
    }

    /// Convert a batch, skipping unusable records.
    pub fn from_values(records: &[Value]) -> Vec<StorySeed> {
        records.iter().filter_map(StorySeed::from_value).collect()
    }
}

impl WorldEvent {
    /// Convert one externally produced event record into a canonical event
    /// for `cycle`. Records without any text are dropped. Unknown
    /// neighborhoods become city-wide and unknown severities read as low.
    pub fn from_value(record: &Value, cycle: u32) -> Option<WorldEvent> {
        let description = first_str(record, TEXT_FIELDS)?;
        let domain = Domain::resolve(first_str(record, DOMAIN_FIELDS), description);
        let subdomain = first_str(record, SUBDOMAIN_FIELDS).unwrap_or_default();
        let neighborhood = first_str(record, NEIGHBORHOOD_FIELDS)
            .and_then(|n| n.parse::<Neighborhood>().ok());
        let severity = first_str(record, SEVERITY_FIELDS)
            .and_then(|s| s.to_lowercase().parse::<Severity>().ok())
            .unwrap_or(Severity::Low);
        Some(WorldEvent::new(
            cycle,
            domain,
            subdomain,
            description,
            neighborhood,
            severity,
            EventSource::External,
        ))
    }

    /// Convert a batch, skipping unusable records.
    pub fn from_values(records: &[Value], cycle: u32) -> Vec<WorldEvent> {
        records
            .iter()
            .filter_map(|r| WorldEvent::from_value(r, cycle))
            .collect()
    }
}
