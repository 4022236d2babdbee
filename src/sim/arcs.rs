//! Spawn side of the arc lifecycle.
//!
//! Arcs are created here in phase `early` and never touched again by this
//! crate; phase advancement belongs to an external lifecycle processor.

use crate::model::{
    Arc, ArcPhase, ArcRegistry, ArcType, Crisis, CrisisRoll, Domain, ResolutionConditions,
    Severity, ShockState, WorldState,
};

/// Source tag on arcs spawned from accepted crises.
pub const CRISIS_ARC_SOURCE: &str = "crisis-generator";

/// Illness rate that spawns a health arc regardless of severity.
const HEALTH_ARC_ILLNESS: f64 = 0.08;
/// Economic mood at or below which a budget arc spawns regardless of severity.
const BUDGET_ARC_MOOD: f64 = 25.0;
/// Net migration magnitude that spawns a civic arc.
const MIGRATION_ARC_MAGNITUDE: i32 = 250;
const INFRASTRUCTURE_ARC_IMPACT: f64 = 1.5;
const SAFETY_ARC_SENTIMENT: f64 = -0.5;
const ENVIRONMENT_ARC_IMPACT: f64 = 1.6;

/// Whether an accepted crisis qualifies to open a narrative arc at all.
pub fn should_spawn(crisis: &Crisis, state: &WorldState) -> bool {
    let high = crisis.severity == Severity::High;
    match crisis.roll {
        CrisisRoll::Health => high || state.population.illness_rate >= HEALTH_ARC_ILLNESS,
        CrisisRoll::Employment => high,
        CrisisRoll::Economy => high || state.dynamics.economic_mood <= BUDGET_ARC_MOOD,
        CrisisRoll::Migration => state.population.migration.abs() > MIGRATION_ARC_MAGNITUDE,
        CrisisRoll::Infrastructure => state.weather.impact >= INFRASTRUCTURE_ARC_IMPACT,
        CrisisRoll::Safety => high || state.dynamics.sentiment <= SAFETY_ARC_SENTIMENT,
        CrisisRoll::Environment => state.weather.impact >= ENVIRONMENT_ARC_IMPACT,
    }
}

/// Arc type for a crisis-spawned arc. Everything opened under an active
/// shock is filed as a generic `crisis` thread.
pub fn arc_type_for(roll: CrisisRoll, state: &WorldState) -> ArcType {
    if state.shock == ShockState::Active {
        ArcType::Crisis
    } else {
        roll.arc_type()
    }
}

/// How an arc in `domain` is expected to wind down.
pub fn resolution_conditions(domain: Domain) -> ResolutionConditions {
    let (natural, duration, accelerators): (&str, (u32, u32), &[&str]) = match domain {
        Domain::Health => (
            "Case counts return to the seasonal baseline",
            (3, 6),
            &["vaccination drive", "pop-up clinic", "county health order"],
        ),
        Domain::Economic => (
            "Hiring and revenue indicators stabilize",
            (4, 8),
            &["council relief package", "major employer announcement", "hiring fair"],
        ),
        Domain::Civic => (
            "Services absorb the population shift",
            (4, 10),
            &["shelter expansion", "council emergency session"],
        ),
        Domain::Infrastructure => (
            "Repairs finish and service is restored",
            (2, 5),
            &["emergency repair crews", "state funding release"],
        ),
        Domain::Safety => (
            "Incident reports fall for consecutive cycles",
            (3, 7),
            &["community patrols", "targeted enforcement", "violence interruption program"],
        ),
        Domain::Environment => (
            "Conditions normalize and cleanup concludes",
            (2, 4),
            &["weather break", "cleanup volunteers"],
        ),
        _ => (
            "Attention fades as the city moves on",
            (3, 6),
            &[],
        ),
    };
    ResolutionConditions {
        natural_resolution: natural.to_string(),
        expected_duration: duration,
        accelerators: accelerators.iter().map(|s| s.to_string()).collect(),
    }
}

fn arc_id(crisis: &Crisis) -> String {
    format!(
        "arc-{}-{}-{}",
        crisis.cycle,
        crisis.domain().as_str().to_lowercase(),
        crisis.location.slug()
    )
}

fn summary(crisis: &Crisis) -> String {
    format!(
        "{} {} in {}",
        capitalize(crisis.severity.as_str()),
        crisis.subtype,
        crisis.location
    )
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Open an arc for `crisis` unless one is already active for its
/// `(domain, location)` slot. Returns the new arc.
pub fn try_spawn_arc<'a>(
    arcs: &'a mut ArcRegistry,
    crisis: &Crisis,
    arc_type: ArcType,
) -> Option<&'a Arc> {
    let domain = crisis.domain();
    if arcs.has_active(domain, Some(crisis.location)) {
        return None;
    }

    let arc = Arc {
        arc_id: arc_id(crisis),
        arc_type,
        phase: ArcPhase::Early,
        tension: crisis.severity.baseline_tension(),
        age: 0,
        neighborhood: Some(crisis.location),
        domain,
        summary: summary(crisis),
        subtype: crisis.subtype.clone(),
        cycle_created: crisis.cycle,
        cycle_resolved: None,
        resolution_conditions: resolution_conditions(domain),
        source: CRISIS_ARC_SOURCE.to_string(),
    };
    tracing::debug!(arc_id = %arc.arc_id, arc_type = %arc.arc_type, "spawned arc");
    arcs.push(arc);
    arcs.all().last()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CrisisCategory, Neighborhood};

    fn crisis(roll: CrisisRoll, severity: Severity) -> Crisis {
        Crisis {
            category: roll.category(),
            roll,
            subtype: "test subtype".to_string(),
            severity,
            location: Neighborhood::Downtown,
            cycle: 7,
        }
    }

    #[test]
    fn spawn_sets_early_phase_and_tension() {
        let mut arcs = ArcRegistry::new();
        let arc = try_spawn_arc(&mut arcs, &crisis(CrisisRoll::Health, Severity::Medium), ArcType::HealthCrisis)
            .unwrap();
        assert_eq!(arc.phase, ArcPhase::Early);
        assert_eq!(arc.tension, 4.0);
        assert_eq!(arc.domain, Domain::Health);
        assert_eq!(arc.neighborhood, Some(Neighborhood::Downtown));
        assert_eq!(arc.arc_id, "arc-7-health-downtown");
        assert_eq!(arc.summary, "Medium test subtype in Downtown");
        assert_eq!(arc.source, CRISIS_ARC_SOURCE);
        assert_eq!(arc.resolution_conditions.expected_duration, (3, 6));
    }

    #[test]
    fn spawning_twice_yields_one_arc() {
        let mut arcs = ArcRegistry::new();
        let c = crisis(CrisisRoll::Safety, Severity::High);
        assert!(try_spawn_arc(&mut arcs, &c, ArcType::PublicSafety).is_some());
        assert!(try_spawn_arc(&mut arcs, &c, ArcType::PublicSafety).is_none());
        assert_eq!(arcs.len(), 1);
    }

    #[test]
    fn employment_and_budget_share_the_economic_slot() {
        let mut arcs = ArcRegistry::new();
        assert!(try_spawn_arc(&mut arcs, &crisis(CrisisRoll::Employment, Severity::High), ArcType::LaborStrain).is_some());
        assert!(try_spawn_arc(&mut arcs, &crisis(CrisisRoll::Economy, Severity::High), ArcType::BudgetStrain).is_none());
    }

    #[test]
    fn resolved_arc_frees_the_slot() {
        let mut arcs = ArcRegistry::new();
        let c = crisis(CrisisRoll::Health, Severity::High);
        try_spawn_arc(&mut arcs, &c, ArcType::HealthCrisis);
        let mut list = arcs.into_arcs();
        list[0].phase = ArcPhase::Resolved;
        let mut arcs = ArcRegistry::from_arcs(list);
        assert!(try_spawn_arc(&mut arcs, &c, ArcType::HealthCrisis).is_some());
        assert_eq!(arcs.len(), 2);
    }

    #[test]
    fn spawn_gates() {
        let mut state = WorldState::default();
        assert!(!should_spawn(&crisis(CrisisRoll::Health, Severity::Medium), &state));
        assert!(should_spawn(&crisis(CrisisRoll::Health, Severity::High), &state));
        state.population.illness_rate = 0.08;
        assert!(should_spawn(&crisis(CrisisRoll::Health, Severity::Low), &state));

        assert!(!should_spawn(&crisis(CrisisRoll::Employment, Severity::Medium), &state));
        state.dynamics.economic_mood = 25.0;
        assert!(should_spawn(&crisis(CrisisRoll::Economy, Severity::Low), &state));

        state.population.migration = 250;
        assert!(!should_spawn(&crisis(CrisisRoll::Migration, Severity::High), &state));
        state.population.migration = -251;
        assert!(should_spawn(&crisis(CrisisRoll::Migration, Severity::Low), &state));

        state.weather.impact = 1.5;
        assert!(should_spawn(&crisis(CrisisRoll::Infrastructure, Severity::Low), &state));
        assert!(!should_spawn(&crisis(CrisisRoll::Environment, Severity::High), &state));
        state.weather.impact = 1.6;
        assert!(should_spawn(&crisis(CrisisRoll::Environment, Severity::Low), &state));

        state.dynamics.sentiment = -0.5;
        assert!(should_spawn(&crisis(CrisisRoll::Safety, Severity::Low), &state));
    }

    #[test]
    fn shock_files_arcs_as_crisis() {
        let mut state = WorldState::default();
        assert_eq!(arc_type_for(CrisisRoll::Environment, &state), ArcType::EnvironmentalHazard);
        state.shock = ShockState::Active;
        assert_eq!(arc_type_for(CrisisRoll::Environment, &state), ArcType::Crisis);
        state.shock = ShockState::Fading;
        assert_eq!(arc_type_for(CrisisRoll::Health, &state), ArcType::HealthCrisis);
    }

    #[test]
    fn generic_resolution_fallback() {
        let rc = resolution_conditions(Domain::Nightlife);
        assert!(rc.accelerators.is_empty());
        assert_eq!(rc.expected_duration, (3, 6));
        assert_eq!(resolution_conditions(Domain::Civic).expected_duration, (4, 10));
    }

    #[test]
    fn every_crisis_domain_has_resolution_text() {
        for cat in CrisisCategory::ALL {
            assert!(!resolution_conditions(cat.domain()).natural_resolution.is_empty());
        }
    }
}
