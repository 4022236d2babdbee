//! Story hook synthesis: turns the cycle's arcs, domain presence, calendar and
//! notable events into prioritized prompts for the news desks.

use std::collections::HashMap;

use crate::id::IdGenerator;
use crate::model::{
    Arc, ArcPhase, ArcRegistry, Domain, Holiday, HookType, Neighborhood, PatternFlag,
    SeasonalMarker, Severity, ShockState, SportsPhase, StoryHook, WorldEvent, WorldState,
};

use super::presence::{DomainPresence, arc_domain};

const CLUSTER_THRESHOLD: u32 = 4;
const SIGNAL_THRESHOLD: u32 = 2;
const SEVERE_WEATHER_IMPACT: f64 = 1.5;
const NOTABLE_WEATHER_IMPACT: f64 = 1.3;
const LOW_SENTIMENT: f64 = -0.4;
const HIGH_SENTIMENT: f64 = 0.35;
const ELEVATED_ACTIVITY: f64 = 1.4;
const ELEVATED_NIGHTLIFE: f64 = 7.0;
const OUTFLOW_DRIFT: f64 = -35.0;
const INFLOW_DRIFT: f64 = 30.0;

/// Words that make any event worth a top-priority hook.
const BREAKING_KEYWORDS: &[&str] = &["earthquake", "blackout", "outage", "protest", "rally"];

pub fn desk_for(domain: Domain) -> &'static str {
    match domain {
        Domain::Health => "Health Desk",
        Domain::Crime | Domain::Safety => "Public Safety Desk",
        Domain::Civic => "Civic Desk",
        Domain::Economic | Domain::Business => "Business Desk",
        Domain::Transit | Domain::Infrastructure => "Metro Desk",
        Domain::Education => "Education Desk",
        Domain::Culture | Domain::Arts | Domain::Festival | Domain::Holiday => "Culture Desk",
        Domain::Sports => "Sports Desk",
        Domain::Weather | Domain::Environment => "Weather & Environment Desk",
        Domain::Nightlife => "Nightlife Desk",
        Domain::Community | Domain::Housing => "Community Desk",
        Domain::Technology => "Tech Desk",
        Domain::General => "City Desk",
    }
}

/// True if the text mentions fire in any form other than fireworks.
fn mentions_fire(lower: &str) -> bool {
    lower
        .match_indices("fire")
        .any(|(i, _)| !lower[i + 4..].starts_with("works"))
}

/// Whether a description carries one of the breaking-news keywords.
pub fn is_breaking(description: &str) -> bool {
    let lower = description.to_lowercase();
    BREAKING_KEYWORDS.iter().any(|k| lower.contains(k)) || mentions_fire(&lower)
}

/// A hook before id and desk assignment.
struct Draft {
    domain: Domain,
    neighborhood: Option<Neighborhood>,
    priority: u8,
    text: String,
    linked_arc_id: Option<String>,
    hook_type: HookType,
}

impl Draft {
    fn new(domain: Domain, hook_type: HookType, priority: u8, text: impl Into<String>) -> Self {
        Self {
            domain,
            neighborhood: None,
            priority,
            text: text.into(),
            linked_arc_id: None,
            hook_type,
        }
    }

    fn at(mut self, neighborhood: Option<Neighborhood>) -> Self {
        self.neighborhood = neighborhood;
        self
    }
}

fn place(neighborhood: Option<Neighborhood>) -> String {
    match neighborhood {
        Some(n) => n.as_str().to_string(),
        None => "the city".to_string(),
    }
}

fn arc_hook(arc: &Arc) -> Option<Draft> {
    let loc = place(arc.neighborhood);
    let (priority, text) = match arc.phase {
        ArcPhase::Early => (1, format!("Emerging in {loc}: {}. Who is feeling it first?", arc.summary)),
        ArcPhase::Rising => (2, format!("Building in {loc}: {}. Follow the response and who is pushing back.", arc.summary)),
        ArcPhase::Peak => (3, format!("At its peak in {loc}: {}. This is front-page material.", arc.summary)),
        ArcPhase::Decline => (2, format!("Winding down in {loc}: {}. What changed, and what lingers?", arc.summary)),
        ArcPhase::Resolved => return None,
    };
    let mut draft = Draft::new(arc_domain(arc), HookType::Arc, priority, text).at(arc.neighborhood);
    draft.linked_arc_id = Some(arc.arc_id.clone());
    Some(draft)
}

fn holiday_text(holiday: &Holiday) -> String {
    let text = match holiday {
        Holiday::OaklandPride => "Oakland Pride fills the streets. Profile the people who built it.",
        Holiday::ArtSoulFestival => "Art & Soul takes over downtown. Which artists are breaking out?",
        Holiday::Juneteenth => "Juneteenth celebrations across West Oakland. Whose stories anchor the day?",
        Holiday::LunarNewYear => "Lunar New Year in Chinatown. Families, vendors, and the parade route.",
        Holiday::DiaDeMuertos => "Día de Muertos altars in Fruitvale. Who is being remembered this year?",
        Holiday::NewYearsEve => "New Year's Eve plans and the city's mood heading into the new year.",
        Holiday::Independence => "Fourth of July by the water. Fireworks, crowds, and quiet corners.",
        Holiday::Thanksgiving => "Thanksgiving tables and the volunteers feeding those without one.",
        Holiday::Christmas => "Holiday week: what the season looks like on Oakland blocks.",
        Holiday::Halloween => "Halloween on the porches. Which blocks go all out?",
        Holiday::LaborDay => "Labor Day: check in with the city's workers and unions.",
        Holiday::MlkDay => "MLK Day service projects and what the day means here now.",
        Holiday::CincoDeMayo => "Cinco de Mayo in Fruitvale. Music, food, and small business.",
        Holiday::EarthDay => "Earth Day cleanups. Which parks and creeks get the attention?",
        _ => return format!("{holiday} across the city. Find the local angle."),
    };
    text.to_string()
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

fn calendar_hooks(state: &WorldState, out: &mut Vec<Draft>) {
    let cal = &state.calendar;

    if !cal.holiday.is_none() {
        let priority = if cal.holiday.is_oakland_canonical() { 3 } else { 2 };
        out.push(Draft::new(Domain::Holiday, HookType::Holiday, priority, holiday_text(&cal.holiday)));
    }

    if cal.is_first_friday {
        out.push(Draft::new(
            Domain::Arts,
            HookType::FirstFriday,
            2,
            "First Friday art walk: galleries, vendors, and the crowd along Telegraph.",
        ));
        out.push(Draft::new(
            Domain::Nightlife,
            HookType::FirstFriday,
            1,
            "After the art walk: where the First Friday crowd ends up.",
        ));
    }

    if cal.is_creation_day {
        out.push(Draft::new(
            Domain::Civic,
            HookType::CreationDay,
            2,
            "Creation Day: how the city marks its founding this year.",
        ));
        if let Some(n) = cal.creation_day_anniversary {
            out.push(Draft::new(
                Domain::Community,
                HookType::CreationDay,
                2,
                format!("The {} Creation Day. Longtime residents on what has changed.", ordinal(n)),
            ));
        }
    }

    if state.sports.in_season() {
        let (priority, text) = match state.sports.phase {
            SportsPhase::Championship => (3, "Championship run: the whole city is watching."),
            SportsPhase::Playoffs => (3, "Playoff fever. Bars, jerseys, and the ticket scramble."),
            SportsPhase::Preseason => (2, "Preseason is here. Who are fans betting on?"),
            _ => (2, "Game days are back. The regulars at Jack London sports bars."),
        };
        out.push(Draft::new(Domain::Sports, HookType::Sports, priority, text));
    }

    match cal.marker {
        SeasonalMarker::None => {}
        marker => out.push(Draft::new(
            Domain::General,
            HookType::Seasonal,
            1,
            format!("The {} marks a turn of the season. A light seasonal piece.", marker.as_str().replace('-', " ")),
        )),
    }
}

fn conditions_hooks(state: &WorldState, out: &mut Vec<Draft>) {
    let weather = &state.weather;
    let d = &state.dynamics;

    if weather.impact >= SEVERE_WEATHER_IMPACT {
        out.push(Draft::new(
            Domain::Weather,
            HookType::Weather,
            3,
            format!("Severe {} weather is disrupting the city. Who is most exposed?", weather.kind),
        ));
    } else if weather.impact >= NOTABLE_WEATHER_IMPACT {
        out.push(Draft::new(
            Domain::Weather,
            HookType::Weather,
            2,
            format!("Unsettled {} weather. How are commuters and outdoor workers coping?", weather.kind),
        ));
    }
    if weather.heat_wave_declared {
        out.push(Draft::new(
            Domain::Health,
            HookType::Weather,
            3,
            "Heat wave declared. Cooling centers, vulnerable neighbors, and the power grid.",
        ));
    }
    if weather.first_snow {
        out.push(Draft::new(Domain::Weather, HookType::Weather, 2, "First snow on the hills. A rare sight worth capturing."));
    }
    if weather.first_warm_day {
        out.push(Draft::new(Domain::Weather, HookType::Weather, 1, "First warm day of the year. The lake and the parks fill up."));
    }

    if d.sentiment <= LOW_SENTIMENT {
        out.push(Draft::new(
            Domain::Community,
            HookType::Sentiment,
            3,
            "City mood is sour. Talk to residents about what is weighing on them.",
        ));
    } else if d.sentiment >= HIGH_SENTIMENT {
        out.push(Draft::new(
            Domain::Community,
            HookType::Sentiment,
            2,
            "The city is in good spirits. What is going right?",
        ));
    }

    if d.cultural_activity >= ELEVATED_ACTIVITY {
        out.push(Draft::new(Domain::Culture, HookType::Cultural, 2, "Cultural calendar is packed. Round up the week's standouts."));
    }
    if d.community_engagement >= ELEVATED_ACTIVITY {
        out.push(Draft::new(Domain::Community, HookType::Community, 2, "Neighbors are showing up. Profile the organizers behind the turnout."));
    }

    match &state.pattern {
        PatternFlag::StrainTrend => out.push(Draft::new(
            Domain::Civic,
            HookType::Pattern,
            3,
            "Strain has been building for several cycles. Connect the dots.",
        )),
        PatternFlag::CalmAfterShock => out.push(Draft::new(
            Domain::Community,
            HookType::Pattern,
            2,
            "Calm after the shock. How is the city recovering?",
        )),
        _ => {}
    }

    match state.shock {
        ShockState::None => {}
        ShockState::Active => out.push(Draft::new(
            Domain::Civic,
            HookType::Shock,
            3,
            "The city is absorbing a shock. Track the response hour by hour.",
        )),
        ShockState::Fading => out.push(Draft::new(
            Domain::Civic,
            HookType::Shock,
            3,
            "The shock is fading. What did it leave behind?",
        )),
    }

    if state.migration_drift < OUTFLOW_DRIFT {
        out.push(Draft::new(
            Domain::Housing,
            HookType::Demographic,
            2,
            "Residents are leaving. Who is going, and why?",
        ));
    } else if state.migration_drift > INFLOW_DRIFT {
        out.push(Draft::new(
            Domain::Housing,
            HookType::Demographic,
            2,
            "New arrivals are reshaping neighborhoods. Meet the newcomers.",
        ));
    }

    if d.nightlife >= ELEVATED_NIGHTLIFE {
        out.push(Draft::new(Domain::Nightlife, HookType::Nightlife, 2, "Nightlife is buzzing. Where is the late crowd going?"));
    }
}

fn event_hook(event: &WorldEvent) -> Option<Draft> {
    let priority = if is_breaking(&event.description) {
        3
    } else if event.severity == Severity::Medium {
        2
    } else {
        return None;
    };
    let text = format!("{} in {}. Get details on the ground.", event.description, place(event.neighborhood));
    Some(Draft::new(event.domain, HookType::Event, priority, text).at(event.neighborhood))
}

/// Keep the highest-priority hook per `(domain, hook_type)`. Among equal
/// priorities the first emitted wins. Emission order is preserved.
fn dedup(drafts: Vec<Draft>) -> Vec<Draft> {
    let mut best: HashMap<(Domain, HookType), usize> = HashMap::new();
    for (i, d) in drafts.iter().enumerate() {
        let key = (d.domain, d.hook_type);
        let wins = best
            .get(&key)
            .is_none_or(|&j| d.priority > drafts[j].priority);
        if wins {
            best.insert(key, i);
        }
    }
    drafts
        .into_iter()
        .enumerate()
        .filter(|(i, d)| best.get(&(d.domain, d.hook_type)) == Some(i))
        .map(|(_, d)| d)
        .collect()
}

/// Build the cycle's hooks from scratch, deduplicated and sorted by
/// descending priority.
pub fn synthesize_hooks(
    state: &WorldState,
    arcs: &ArcRegistry,
    presence: &DomainPresence,
    events: &[WorldEvent],
) -> Vec<StoryHook> {
    let mut drafts = Vec::new();

    drafts.extend(arcs.active().filter_map(arc_hook));

    for (domain, n) in presence.present() {
        if n >= CLUSTER_THRESHOLD {
            drafts.push(Draft::new(
                domain,
                HookType::Cluster,
                3,
                format!("{n} {domain} stories this cycle. Is there a bigger pattern?"),
            ));
        } else if n >= SIGNAL_THRESHOLD {
            drafts.push(Draft::new(
                domain,
                HookType::Signal,
                2,
                format!("{domain} is picking up. Worth a closer look."),
            ));
        }
    }

    calendar_hooks(state, &mut drafts);
    conditions_hooks(state, &mut drafts);
    drafts.extend(events.iter().filter_map(event_hook));

    let emitted = drafts.len();
    let mut kept = dedup(drafts);
    kept.sort_by(|a, b| b.priority.cmp(&a.priority));
    tracing::debug!(emitted, kept = kept.len(), "story hooks synthesized");

    let mut ids = IdGenerator::for_hooks(state.cycle);
    kept.into_iter()
        .map(|d| StoryHook {
            hook_id: ids.next_id(),
            domain: d.domain,
            neighborhood: d.neighborhood,
            priority: d.priority,
            text: d.text,
            linked_arc_id: d.linked_arc_id,
            hook_type: d.hook_type,
            suggested_desk: desk_for(d.domain).to_string(),
            cycle: state.cycle,
        })
        .collect()
}
