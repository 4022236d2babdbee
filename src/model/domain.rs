use serde::{Deserialize, Serialize};

/// Fixed domain tags used to classify events, arcs, and hooks.
///
/// Declaration order is significant: it is the tie-break order when picking
/// the dominant domain of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Domain {
    Civic,
    Crime,
    Health,
    Transit,
    Economic,
    Education,
    Community,
    Culture,
    Sports,
    Business,
    Weather,
    Infrastructure,
    Safety,
    Nightlife,
    Housing,
    General,
    Festival,
    Holiday,
    Arts,
    Environment,
    Technology,
}

string_enum!(Domain {
    Civic => "CIVIC",
    Crime => "CRIME",
    Health => "HEALTH",
    Transit => "TRANSIT",
    Economic => "ECONOMIC",
    Education => "EDUCATION",
    Community => "COMMUNITY",
    Culture => "CULTURE",
    Sports => "SPORTS",
    Business => "BUSINESS",
    Weather => "WEATHER",
    Infrastructure => "INFRASTRUCTURE",
    Safety => "SAFETY",
    Nightlife => "NIGHTLIFE",
    Housing => "HOUSING",
    General => "GENERAL",
    Festival => "FESTIVAL",
    Holiday => "HOLIDAY",
    Arts => "ARTS",
    Environment => "ENVIRONMENT",
    Technology => "TECHNOLOGY",
});

/// Alias spellings seen in upstream records, keyed by their normalized form.
const SYNONYMS: &[(&str, Domain)] = &[
    ("CRIMINAL", Domain::Crime),
    ("POLICE", Domain::Safety),
    ("EMERGENCY", Domain::Safety),
    ("ART", Domain::Arts),
    ("MUSIC", Domain::Arts),
    ("ATHLETICS", Domain::Sports),
    ("SPORT", Domain::Sports),
    ("ECONOMY", Domain::Economic),
    ("JOBS", Domain::Economic),
    ("BUSINESSES", Domain::Business),
    ("COMMERCE", Domain::Business),
    ("TRAFFIC", Domain::Transit),
    ("TRANSPORTATION", Domain::Transit),
    ("SCHOOL", Domain::Education),
    ("SCHOOLS", Domain::Education),
    ("MEDICAL", Domain::Health),
    ("PUBLIC_HEALTH", Domain::Health),
    ("GOVERNMENT", Domain::Civic),
    ("POLITICS", Domain::Civic),
    ("CULTURAL", Domain::Culture),
    ("FESTIVALS", Domain::Festival),
    ("HOLIDAYS", Domain::Holiday),
    ("TECH", Domain::Technology),
    ("CLIMATE", Domain::Environment),
    ("NATURE", Domain::Environment),
    ("NIGHT_LIFE", Domain::Nightlife),
    ("UTILITIES", Domain::Infrastructure),
    ("REAL_ESTATE", Domain::Housing),
    ("NEIGHBORHOOD", Domain::Community),
    ("MISC", Domain::General),
];

/// Description keywords used when a record carries no explicit domain.
/// First matching row wins. Keywords match whole words; a trailing `*` marks a
/// stem that matches any word it begins, and multi-word keywords must appear
/// as consecutive words.
const KEYWORDS: &[(&[&str], Domain)] = &[
    (&["shooting*", "robbery", "robberies", "theft*", "break-in", "burglar*", "arrest*"], Domain::Crime),
    (&["police", "firefighter*", "emergency", "emergencies", "evacuat*"], Domain::Safety),
    (&["flu", "clinic*", "illness*", "outbreak*", "hospital*", "vaccin*"], Domain::Health),
    (&["bart", "bus", "buses", "traffic", "commut*", "ferry", "ferries"], Domain::Transit),
    (&["rain", "rainy", "rainstorm*", "storm*", "heat", "heatwave*", "fog", "foggy", "snow*", "weather"], Domain::Weather),
    (&["council*", "city hall", "mayor*", "ballot*", "protest*", "rally", "rallies"], Domain::Civic),
    (&["school*", "student*", "teacher*", "librar*"], Domain::Education),
    (&["mural*", "galler*", "exhibit*", "poetry"], Domain::Arts),
    (&["concert*", "club", "clubs", "bar", "bars", "dj", "djs", "nightlife"], Domain::Nightlife),
    (&["rent", "rents", "renter*", "housing", "eviction*", "landlord*"], Domain::Housing),
    (&["warriors", "roots", "stadium*", "playoff*", "fans"], Domain::Sports),
    (&["festival*", "parade*", "fireworks"], Domain::Festival),
    (&["startup*", "app", "apps", "software", "robot*"], Domain::Technology),
    (&["shop", "shops", "store", "stores", "restaurant*", "market*", "vendor*"], Domain::Business),
    (&["layoff*", "budget*", "jobs", "wages"], Domain::Economic),
    (&["water main*", "outage*", "pothole*", "power line*"], Domain::Infrastructure),
    (&["creek*", "estuary", "tree", "trees", "park", "parks", "air quality"], Domain::Environment),
    (&["block party", "block parties", "neighbor*", "potluck*", "volunteer*"], Domain::Community),
    (&["dance*", "heritage", "tradition*", "altar*"], Domain::Culture),
];

/// Lowercase words of `text`, split on anything that is not alphanumeric.
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Whether `keyword` occurs in `text_words` on word boundaries.
fn mentions(text_words: &[String], keyword: &str) -> bool {
    let (phrase, stem) = match keyword.strip_suffix('*') {
        Some(phrase) => (phrase, true),
        None => (keyword, false),
    };
    let kw = words(phrase);
    let Some((last, head)) = kw.split_last() else {
        return false;
    };
    text_words.windows(kw.len()).any(|window| {
        let (w_last, w_head) = (&window[kw.len() - 1], &window[..kw.len() - 1]);
        w_head == head
            && if stem {
                w_last.starts_with(last.as_str())
            } else {
                w_last == last
            }
    })
}

impl Domain {
    /// Parse a free-text domain tag, accepting canonical names and the fixed
    /// synonym table. Case, surrounding whitespace, spaces and hyphens are
    /// ignored.
    pub fn normalize(raw: &str) -> Option<Domain> {
        let key: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        if key.is_empty() {
            return None;
        }
        if let Ok(domain) = key.parse::<Domain>() {
            return Some(domain);
        }
        SYNONYMS
            .iter()
            .find(|(alias, _)| *alias == key)
            .map(|(_, domain)| *domain)
    }

    /// Infer a domain from description text. Falls back to `General`.
    pub fn infer_from_text(text: &str) -> Domain {
        let text_words = words(text);
        KEYWORDS
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| mentions(&text_words, k)))
            .map(|(_, domain)| *domain)
            .unwrap_or(Domain::General)
    }

    /// Resolve an optional explicit tag, falling back to keyword inference.
    pub fn resolve(explicit: Option<&str>, text: &str) -> Domain {
        explicit
            .and_then(Domain::normalize)
            .unwrap_or_else(|| Domain::infer_from_text(text))
    }
}
