use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Fall,
    Winter,
}

string_enum!(Season {
    Spring => "Spring",
    Summer => "Summer",
    Fall => "Fall",
    Winter => "Winter",
});

/// Holidays the calendar layer can report. Unknown names are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Holiday {
    #[default]
    None,
    NewYear,
    MlkDay,
    LunarNewYear,
    ValentinesDay,
    PresidentsDay,
    StPatricksDay,
    Easter,
    EarthDay,
    CincoDeMayo,
    MothersDay,
    MemorialDay,
    Juneteenth,
    FathersDay,
    Independence,
    LaborDay,
    OaklandPride,
    ArtSoulFestival,
    Halloween,
    DiaDeMuertos,
    VeteransDay,
    Thanksgiving,
    Hanukkah,
    Christmas,
    Kwanzaa,
    NewYearsEve,
    Custom(String),
}

string_enum_open!(Holiday, None, {
    None => "none",
    NewYear => "NewYear",
    MlkDay => "MLKDay",
    LunarNewYear => "LunarNewYear",
    ValentinesDay => "ValentinesDay",
    PresidentsDay => "PresidentsDay",
    StPatricksDay => "StPatricksDay",
    Easter => "Easter",
    EarthDay => "EarthDay",
    CincoDeMayo => "CincoDeMayo",
    MothersDay => "MothersDay",
    MemorialDay => "MemorialDay",
    Juneteenth => "Juneteenth",
    FathersDay => "FathersDay",
    Independence => "Independence",
    LaborDay => "LaborDay",
    OaklandPride => "OaklandPride",
    ArtSoulFestival => "ArtSoulFestival",
    Halloween => "Halloween",
    DiaDeMuertos => "DiaDeMuertos",
    VeteransDay => "VeteransDay",
    Thanksgiving => "Thanksgiving",
    Hanukkah => "Hanukkah",
    Christmas => "Christmas",
    Kwanzaa => "Kwanzaa",
    NewYearsEve => "NewYearsEve",
});

impl Holiday {
    pub fn is_none(&self) -> bool {
        matches!(self, Holiday::None)
    }

    /// Quiet family holidays that dampen crisis odds.
    pub fn is_peaceful(&self) -> bool {
        matches!(
            self,
            Holiday::Thanksgiving
                | Holiday::Christmas
                | Holiday::Easter
                | Holiday::MothersDay
                | Holiday::FathersDay
                | Holiday::Hanukkah
                | Holiday::Kwanzaa
        )
    }

    /// Government days off.
    pub fn is_civic_rest(&self) -> bool {
        matches!(
            self,
            Holiday::MlkDay
                | Holiday::PresidentsDay
                | Holiday::MemorialDay
                | Holiday::LaborDay
                | Holiday::VeteransDay
        )
    }

    /// Holidays that pull big crowds into the street.
    pub fn is_crowd(&self) -> bool {
        matches!(
            self,
            Holiday::NewYearsEve
                | Holiday::Independence
                | Holiday::Halloween
                | Holiday::StPatricksDay
                | Holiday::CincoDeMayo
                | Holiday::OaklandPride
        )
    }

    /// Holidays the city treats as its own.
    pub fn is_oakland_canonical(&self) -> bool {
        matches!(
            self,
            Holiday::OaklandPride
                | Holiday::ArtSoulFestival
                | Holiday::Juneteenth
                | Holiday::LunarNewYear
                | Holiday::DiaDeMuertos
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum HolidayPriority {
    #[default]
    None,
    Minor,
    Major,
    Oakland,
    Cultural,
}

string_enum!(HolidayPriority {
    None => "none",
    Minor => "minor",
    Major => "major",
    Oakland => "oakland",
    Cultural => "cultural",
});

/// Astronomical markers the calendar layer flags on the cycle they fall in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SeasonalMarker {
    #[default]
    None,
    SpringEquinox,
    SummerSolstice,
    FallEquinox,
    WinterSolstice,
}

string_enum!(SeasonalMarker {
    None => "none",
    SpringEquinox => "spring-equinox",
    SummerSolstice => "summer-solstice",
    FallEquinox => "fall-equinox",
    WinterSolstice => "winter-solstice",
});

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Calendar {
    pub season: Season,
    pub holiday: Holiday,
    pub holiday_priority: HolidayPriority,
    pub is_first_friday: bool,
    pub is_creation_day: bool,
    /// Which Creation Day this is, when the calendar layer knows.
    pub creation_day_anniversary: Option<u32>,
    pub cycle_of_year: u32,
    pub month: u32,
    pub marker: SeasonalMarker,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            season: Season::Spring,
            holiday: Holiday::None,
            holiday_priority: HolidayPriority::None,
            is_first_friday: false,
            is_creation_day: false,
            creation_day_anniversary: None,
            cycle_of_year: 1,
            month: 1,
            marker: SeasonalMarker::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SportsPhase {
    #[default]
    OffSeason,
    Preseason,
    Regular,
    Playoffs,
    Championship,
}

string_enum!(SportsPhase {
    OffSeason => "off-season",
    Preseason => "preseason",
    Regular => "regular",
    Playoffs => "playoffs",
    Championship => "championship",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SportsSource {
    #[default]
    Inferred,
    ConfigOverride,
}

string_enum!(SportsSource {
    Inferred => "inferred",
    ConfigOverride => "config-override",
});

/// League state as handed in from outside. Never simulated here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SportsContext {
    pub phase: SportsPhase,
    pub source: SportsSource,
}

impl SportsContext {
    pub fn in_season(&self) -> bool {
        self.phase != SportsPhase::OffSeason
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_holiday_kept_as_custom() {
        let h: Holiday = serde_json::from_value(serde_json::json!("BlockPartyWeek")).unwrap();
        assert_eq!(h, Holiday::Custom("BlockPartyWeek".to_string()));
        assert_eq!(h.as_str(), "BlockPartyWeek");
    }

    #[test]
    fn empty_holiday_is_none() {
        let h: Holiday = serde_json::from_value(serde_json::json!("")).unwrap();
        assert!(h.is_none());
    }

    #[test]
    fn holiday_groups() {
        assert!(Holiday::Thanksgiving.is_peaceful());
        assert!(Holiday::LaborDay.is_civic_rest());
        assert!(Holiday::NewYearsEve.is_crowd());
        assert!(Holiday::OaklandPride.is_crowd());
        assert!(Holiday::OaklandPride.is_oakland_canonical());
        assert!(!Holiday::Christmas.is_oakland_canonical());
    }

    #[test]
    fn sports_season_flag() {
        let mut sports = SportsContext::default();
        assert!(!sports.in_season());
        sports.phase = SportsPhase::Playoffs;
        assert!(sports.in_season());
    }

    #[test]
    fn calendar_defaults_missing_fields() {
        let cal: Calendar =
            serde_json::from_value(serde_json::json!({ "season": "Winter" })).unwrap();
        assert_eq!(cal.season, Season::Winter);
        assert!(cal.holiday.is_none());
        assert!(!cal.is_first_friday);
    }
}
