//! Ambient (non-crisis) events sampled from a registry of domain-tagged
//! texture categories.

use std::collections::HashSet;

use rand::{Rng, RngCore};

use super::context::CycleContext;
use super::policy::DomainPolicy;
use super::sampling::{neighborhood_weights, pick_by_tickets, pick_str, pick_weighted};
use crate::model::{
    CivicLoad, Domain, EventLedger, EventSource, Holiday, Neighborhood, PatternFlag,
    RecoveryLevel, Season, Severity, ShockState, SportsPhase, WorldEvent, WorldState,
};

/// A texture category: a domain tag, a pool of descriptions, and whether its
/// events are city-wide (no neighborhood).
pub struct TextureCategory {
    pub key: &'static str,
    pub domain: Domain,
    pub citywide: bool,
    pub items: &'static [&'static str],
}

pub const CATEGORIES: &[TextureCategory] = &[
    TextureCategory {
        key: "street-scene",
        domain: Domain::General,
        citywide: false,
        items: &[
            "Street musicians draw a lunchtime crowd",
            "A lost dog reunites with its owner after a neighborhood search",
            "Chalk art covers a stretch of sidewalk overnight",
            "A food truck line wraps around the block",
            "Neighbors trade plants at an impromptu curbside swap",
        ],
    },
    TextureCategory {
        key: "weather-moment",
        domain: Domain::Weather,
        citywide: true,
        items: &[
            "Morning fog lingers over the lake past noon",
            "A sudden breeze sends hats flying across the plaza",
            "Clear skies bring residents out to the hills",
            "A brief drizzle catches commuters without umbrellas",
            "An unusually warm evening keeps porches full",
        ],
    },
    TextureCategory {
        key: "transit-hiccup",
        domain: Domain::Transit,
        citywide: false,
        items: &[
            "Bus bunching leaves riders waiting twenty minutes",
            "A stalled car snarls the morning commute",
            "New bike lane striping confuses drivers",
            "BART escalator out of service again",
            "Ferry riders report a smooth, crowded crossing",
        ],
    },
    TextureCategory {
        key: "community-gathering",
        domain: Domain::Community,
        citywide: false,
        items: &[
            "Block party fills a residential street",
            "Volunteers plant trees along a schoolyard fence",
            "A potluck raises money for a neighbor's medical bills",
            "Library hosts a packed community forum",
            "Neighbors organize a cleanup of a vacant lot",
        ],
    },
    TextureCategory {
        key: "arts-happening",
        domain: Domain::Arts,
        citywide: false,
        items: &[
            "A new mural goes up on a warehouse wall",
            "Gallery opening spills out onto the sidewalk",
            "Poetry reading draws a standing-room crowd",
            "Pop-up exhibit of local photographers opens",
            "Sculpture installation appears in a pocket park",
        ],
    },
    TextureCategory {
        key: "culture-moment",
        domain: Domain::Culture,
        citywide: false,
        items: &[
            "Dance troupe rehearses in the park",
            "Heritage cooking class sells out",
            "Elders share oral histories at the community center",
            "A tradition returns after a decade away",
            "Drum circle gathers by the water at sunset",
        ],
    },
    TextureCategory {
        key: "nightlife-buzz",
        domain: Domain::Nightlife,
        citywide: false,
        items: &[
            "A new cocktail bar opens to a long line",
            "Late-night DJ set keeps a club packed past closing",
            "Karaoke night turns into a neighborhood event",
            "Jazz club books a surprise headliner",
            "Rooftop bar hosts its first silent disco",
        ],
    },
    TextureCategory {
        key: "minor-health",
        domain: Domain::Health,
        citywide: false,
        items: &[
            "Pharmacy lines grow as a cold goes around",
            "Free blood pressure screenings at the farmers market",
            "Clinic extends evening hours",
            "School nurse reports a wave of sniffles",
            "Pop-up flu shot table sees steady traffic",
        ],
    },
    TextureCategory {
        key: "petty-crime",
        domain: Domain::Crime,
        citywide: false,
        items: &[
            "Package thefts reported on several porches",
            "Catalytic converter stolen from a parked car",
            "Graffiti tags appear on freshly painted storefronts",
            "Bike stolen from a locked rack",
            "Shoplifting uptick frustrates corner store owners",
        ],
    },
    TextureCategory {
        key: "small-business",
        domain: Domain::Business,
        citywide: false,
        items: &[
            "Family restaurant celebrates thirty years",
            "A bakery sells out before nine",
            "Vintage shop moves into a long-vacant storefront",
            "Hardware store owner announces retirement",
            "Market vendors report a brisk weekend",
        ],
    },
    TextureCategory {
        key: "housing-notice",
        domain: Domain::Housing,
        citywide: false,
        items: &[
            "Tenants gather to compare rent increase notices",
            "Open house draws dozens of hopeful buyers",
            "Construction wraps on a small apartment building",
            "Landlord repairs a long-broken building elevator",
            "Housing workshop fills every seat",
        ],
    },
    TextureCategory {
        key: "school-note",
        domain: Domain::Education,
        citywide: false,
        items: &[
            "Students present science fair projects",
            "School garden harvest goes to the cafeteria",
            "Teachers rally support for a library fund",
            "High school band practices on the field",
            "Parents line up for kindergarten enrollment",
        ],
    },
    TextureCategory {
        key: "civic-meeting",
        domain: Domain::Civic,
        citywide: false,
        items: &[
            "Council committee meeting runs past midnight",
            "Residents pack a zoning hearing",
            "Neighborhood council elects new officers",
            "Public comment fills a budget workshop",
            "City staff hold office hours at the library",
        ],
    },
    TextureCategory {
        key: "sports-chatter",
        domain: Domain::Sports,
        citywide: true,
        items: &[
            "Fans debate last night's game at every coffee shop",
            "Youth league signups open with a rush",
            "Pickup basketball runs late under the lights",
            "Jerseys appear on every other commuter",
            "Sports bar extends happy hour for the game",
        ],
    },
    TextureCategory {
        key: "festival-scene",
        domain: Domain::Festival,
        citywide: false,
        items: &[
            "Street fair vendors set up before dawn",
            "Parade route barricades go up",
            "Fireworks test lights up the estuary",
            "Festival stage crews run sound checks",
            "Lantern procession winds through the streets",
        ],
    },
    TextureCategory {
        key: "park-nature",
        domain: Domain::Environment,
        citywide: false,
        items: &[
            "Egrets return to the lake's edge",
            "Creek restoration volunteers pull invasive plants",
            "Old oak loses a limb in the park",
            "Birdwatchers spot a rare visitor",
            "Community garden plots open for the season",
        ],
    },
    TextureCategory {
        key: "tech-scene",
        domain: Domain::Technology,
        citywide: false,
        items: &[
            "Startup demo night fills a co-working space",
            "Coding bootcamp graduates its first local cohort",
            "Delivery robots spotted on the sidewalk",
            "Free wifi pilot launches in a plaza",
            "Hackathon teams build apps for local nonprofits",
        ],
    },
    TextureCategory {
        key: "utility-work",
        domain: Domain::Infrastructure,
        citywide: false,
        items: &[
            "Crews repave a stretch of arterial road",
            "Brief power outage darkens a few blocks",
            "Water main crews work through the night",
            "Streetlight replacement finally reaches a dark corner",
            "Sewer work closes a lane for the week",
        ],
    },
    TextureCategory {
        key: "safety-notice",
        domain: Domain::Safety,
        citywide: false,
        items: &[
            "Small kitchen fire contained at an apartment",
            "Crossing guards return to a busy intersection",
            "Fire department holds an open house",
            "Neighborhood watch meets with patrol officers",
            "Residents report a protest march passing peacefully",
        ],
    },
];

pub fn category(key: &str) -> Option<&'static TextureCategory> {
    CATEGORIES.iter().find(|c| c.key == key)
}

/// Health-domain weight multiplier once a health event is already in the cycle.
const HEALTH_REPEAT_FACTOR: f64 = 0.35;
/// Further health multiplier on top of the repeat factor under heavy recovery.
const HEAVY_RECOVERY_HEALTH_FACTOR: f64 = 0.6;

/// Season- and mood-driven weight before calendar boosts.
fn base_weight(cat: &TextureCategory, s: &WorldState) -> f64 {
    let d = &s.dynamics;
    let season = s.calendar.season;
    match cat.key {
        "street-scene" => 0.8 + 0.4 * d.public_spaces,
        "weather-moment" => {
            let extreme = matches!(season, Season::Winter | Season::Summer);
            0.6 + 0.5 * (s.weather.impact - 1.0).max(0.0) + if extreme { 0.3 } else { 0.0 }
        }
        "transit-hiccup" => 0.5 + 0.4 * d.traffic,
        "community-gathering" => 0.5 + 0.5 * d.community_engagement,
        "arts-happening" | "culture-moment" => 0.4 + 0.5 * d.cultural_activity,
        "nightlife-buzz" => 0.3 + 0.08 * d.nightlife,
        "minor-health" => {
            let mut w = 0.4;
            if season == Season::Winter {
                w += 0.4;
            }
            if s.population.illness_rate > 0.06 {
                w += 0.3;
            }
            w
        }
        "petty-crime" => 0.5 + (-d.sentiment).max(0.0) * 0.6,
        "small-business" => 0.5 + d.economic_mood / 100.0,
        "housing-notice" => 0.4 + (s.migration_drift.abs() / 100.0).min(0.5),
        "school-note" => match season {
            Season::Fall => 0.8,
            Season::Spring => 0.6,
            Season::Winter => 0.5,
            Season::Summer => 0.2,
        },
        "civic-meeting" => match d.civic_load {
            CivicLoad::Stable => 0.5,
            CivicLoad::Elevated => 0.7,
            CivicLoad::LoadStrain => 0.9,
        },
        "sports-chatter" => {
            if s.sports.in_season() {
                0.7
            } else {
                0.3
            }
        }
        "festival-scene" => {
            if season == Season::Summer {
                0.6
            } else {
                0.2
            }
        }
        "park-nature" => match season {
            Season::Spring => 0.8,
            Season::Summer => 0.9,
            Season::Fall => 0.5,
            Season::Winter => 0.3,
        },
        "utility-work" => {
            if s.weather.is_wet() {
                0.7
            } else {
                0.4
            }
        }
        "safety-notice" => {
            if d.sentiment <= -0.2 {
                0.6
            } else {
                0.3
            }
        }
        _ => 0.4,
    }
}

/// Additive boosts from holidays, First Friday, Creation Day and the sports calendar.
fn calendar_boost(cat: &TextureCategory, s: &WorldState) -> f64 {
    let cal = &s.calendar;
    let mut boost = 0.0;

    if cal.is_first_friday {
        boost += match cat.key {
            "arts-happening" => 1.5,
            "nightlife-buzz" => 0.5,
            "small-business" => 0.3,
            _ => 0.0,
        };
    }
    if cal.is_creation_day {
        boost += match cat.key {
            "community-gathering" => 1.0,
            "civic-meeting" => 0.8,
            _ => 0.0,
        };
    }

    boost += match cat.key {
        "sports-chatter" => match s.sports.phase {
            SportsPhase::OffSeason => 0.0,
            SportsPhase::Preseason => 0.3,
            SportsPhase::Regular => 0.8,
            SportsPhase::Playoffs => 1.5,
            SportsPhase::Championship => 2.0,
        },
        _ => 0.0,
    };

    let h = &cal.holiday;
    boost += match cat.key {
        "festival-scene" if h.is_crowd() || h.is_oakland_canonical() => 1.2,
        "culture-moment"
            if matches!(
                h,
                Holiday::LunarNewYear
                    | Holiday::DiaDeMuertos
                    | Holiday::Juneteenth
                    | Holiday::Hanukkah
                    | Holiday::Kwanzaa
            ) =>
        {
            1.0
        }
        "community-gathering" if matches!(h, Holiday::Thanksgiving | Holiday::MlkDay) => 0.8,
        "nightlife-buzz"
            if matches!(h, Holiday::NewYearsEve | Holiday::Halloween | Holiday::StPatricksDay) =>
        {
            1.0
        }
        "safety-notice" if matches!(h, Holiday::Independence | Holiday::NewYearsEve) => 0.5,
        "park-nature" if *h == Holiday::EarthDay => 1.0,
        "arts-happening" if *h == Holiday::ArtSoulFestival => 1.0,
        _ => 0.0,
    };

    boost
}

pub fn category_weight(cat: &TextureCategory, state: &WorldState) -> f64 {
    base_weight(cat, state) + calendar_boost(cat, state)
}

/// Categories the policy allows. Never empty: falls back to GENERAL
/// categories, then to the first three categories of the registry.
pub fn select_pool<'a>(
    registry: &'a [TextureCategory],
    policy: &dyn DomainPolicy,
) -> Vec<&'a TextureCategory> {
    let allowed: Vec<_> = registry
        .iter()
        .filter(|c| !policy.is_suppressed(c.domain))
        .collect();
    if !allowed.is_empty() {
        return allowed;
    }

    let general: Vec<_> = registry
        .iter()
        .filter(|c| c.domain == Domain::General)
        .collect();
    if !general.is_empty() {
        tracing::debug!("all texture domains suppressed, falling back to GENERAL");
        return general;
    }

    tracing::warn!("texture pool empty after suppression, using first three categories");
    registry.iter().take(3).collect()
}

fn holiday_count_bonus(holiday: &Holiday) -> i32 {
    match holiday {
        Holiday::NewYearsEve | Holiday::Independence | Holiday::OaklandPride => 2,
        Holiday::Halloween
        | Holiday::StPatricksDay
        | Holiday::CincoDeMayo
        | Holiday::LunarNewYear
        | Holiday::Juneteenth
        | Holiday::DiaDeMuertos
        | Holiday::ArtSoulFestival => 1,
        Holiday::Christmas => -2,
        Holiday::Thanksgiving | Holiday::Easter | Holiday::MothersDay | Holiday::FathersDay => -1,
        _ => 0,
    }
}

/// Unscaled event count: one draw plus state bonuses, clamped to `[min, max]`.
/// An inverted range collapses to `min`.
pub fn base_event_count(state: &WorldState, min: u32, max: u32, rng: &mut dyn RngCore) -> u32 {
    let mut count: i64 = 1 + rng.random_range(0..3);
    if state.dynamics.nightlife >= 7.0 {
        count += 1;
    }
    if state.prior_chaos >= 3 {
        count += 1;
    }
    if state.pattern == PatternFlag::MicroEventWave {
        count += 1;
    }
    if state.dynamics.sentiment <= -0.4 {
        count += 1;
    }
    if state.dynamics.civic_load == CivicLoad::LoadStrain {
        count += 1;
    }
    count += i64::from(holiday_count_bonus(&state.calendar.holiday));
    let (lo, hi) = (i64::from(min), i64::from(max.max(min)));
    count.max(lo).min(hi) as u32
}

/// Apply event suppression: `max(1, round(base * suppression))`.
pub fn scaled_event_count(base: u32, suppression: f64) -> u32 {
    ((base as f64 * suppression).round() as u32).max(1)
}

/// Additive severity score for the cycle's texture events.
pub fn severity_score(state: &WorldState) -> i32 {
    let mut score = 0;
    if state.prior_chaos >= 3 {
        score += 2;
    }
    if state.shock == ShockState::Active {
        score += 3;
    }
    if state.dynamics.sentiment <= -0.4 {
        score += 1;
    }
    if state.weather.impact >= 1.3 {
        score += 1;
    }
    if state.migration_drift <= -20.0 {
        score += 1;
    }
    let holiday = &state.calendar.holiday;
    if holiday.is_crowd() {
        score += 1;
    }
    if holiday.is_peaceful() {
        score -= 1;
    }
    let suppression = state.suppression();
    if suppression <= 0.55 {
        score -= 2;
    } else if suppression <= 0.75 {
        score -= 1;
    }
    score
}

/// Severity shared by every texture event of the cycle.
pub fn texture_severity(state: &WorldState) -> Severity {
    let score = severity_score(state);
    let severity = if score >= 5 {
        Severity::High
    } else if score >= 3 {
        Severity::Medium
    } else {
        Severity::Low
    };
    if severity == Severity::High && state.suppression() <= 0.55 {
        Severity::Medium
    } else {
        severity
    }
}

fn weighted_view(
    pool: &[&TextureCategory],
    state: &WorldState,
    health_chosen: bool,
) -> Vec<(usize, f64)> {
    pool.iter()
        .enumerate()
        .map(|(i, cat)| {
            let mut w = category_weight(cat, state);
            if cat.domain == Domain::Health && health_chosen {
                w *= HEALTH_REPEAT_FACTOR;
                if state.recovery == RecoveryLevel::Heavy {
                    w *= HEAVY_RECOVERY_HEALTH_FACTOR;
                }
            }
            (i, w)
        })
        .collect()
}

/// Pick an item not used this cycle and absent from the recent ledger.
/// Gives up after `retries` redraws and accepts the repeat.
fn pick_fresh_item(
    cat: &TextureCategory,
    used: &HashSet<&'static str>,
    recent: &HashSet<&str>,
    retries: u32,
    rng: &mut dyn RngCore,
) -> &'static str {
    let mut item = pick_str(cat.items, rng).unwrap_or(cat.key);
    let mut attempts = 0;
    while (used.contains(item) || recent.contains(item)) && attempts < retries {
        item = pick_str(cat.items, rng).unwrap_or(cat.key);
        attempts += 1;
    }
    if used.contains(item) || recent.contains(item) {
        tracing::debug!(category = cat.key, item, "texture retries exhausted, accepting repeat");
    }
    item
}

/// Generate the cycle's ambient events, append them to the context, and
/// return them.
pub fn generate_texture(
    ctx: &mut CycleContext,
    policy: &dyn DomainPolicy,
    ledger: &EventLedger,
) -> Vec<WorldEvent> {
    let state = ctx.state;
    let config = ctx.config;
    let cycle = ctx.cycle();

    let pool = select_pool(CATEGORIES, policy);
    let base = base_event_count(state, config.min_events, config.max_events, ctx.rng);
    let count = scaled_event_count(base, state.suppression());
    let severity = texture_severity(state);
    let recent = ledger.recent(cycle, config.ledger_lookback);
    let hood_weights = neighborhood_weights(state, |_| 0.0);

    let start = ctx.events.len();
    let mut used: HashSet<&'static str> = HashSet::new();
    let mut health_chosen = false;

    for _ in 0..count {
        let view = weighted_view(&pool, state, health_chosen);
        let Some(idx) = pick_weighted(&view, ctx.rng) else {
            continue;
        };
        let cat = pool[idx];
        let item = pick_fresh_item(cat, &used, &recent, config.max_item_retries, ctx.rng);
        used.insert(item);
        if cat.domain == Domain::Health {
            health_chosen = true;
        }

        let neighborhood: Option<Neighborhood> = if cat.citywide {
            None
        } else {
            pick_by_tickets(&hood_weights, ctx.rng)
        };

        ctx.push_event(WorldEvent::new(
            cycle,
            cat.domain,
            cat.key,
            item,
            neighborhood,
            severity,
            EventSource::Texture,
        ));
    }

    tracing::debug!(base, count, %severity, "texture events generated");
    ctx.events[start..].to_vec()
}
