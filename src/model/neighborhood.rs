use serde::{Deserialize, Serialize};

/// The twelve fixed neighborhoods events and crises can land in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Neighborhood {
    Downtown,
    Temescal,
    Fruitvale,
    LakeMerritt,
    WestOakland,
    Laurel,
    Rockridge,
    JackLondon,
    Uptown,
    Kono,
    Chinatown,
    PiedmontAve,
}

string_enum!(Neighborhood {
    Downtown => "Downtown",
    Temescal => "Temescal",
    Fruitvale => "Fruitvale",
    LakeMerritt => "Lake Merritt",
    WestOakland => "West Oakland",
    Laurel => "Laurel",
    Rockridge => "Rockridge",
    JackLondon => "Jack London",
    Uptown => "Uptown",
    Kono => "KONO",
    Chinatown => "Chinatown",
    PiedmontAve => "Piedmont Ave",
});

impl Neighborhood {
    /// Baseline selection weight before category and calendar bonuses.
    pub fn base_weight(self) -> f64 {
        match self {
            Neighborhood::Downtown => 1.5,
            Neighborhood::Temescal => 1.0,
            Neighborhood::Fruitvale => 1.2,
            Neighborhood::LakeMerritt => 1.3,
            Neighborhood::WestOakland => 1.2,
            Neighborhood::Laurel => 0.8,
            Neighborhood::Rockridge => 0.8,
            Neighborhood::JackLondon => 1.1,
            Neighborhood::Uptown => 1.2,
            Neighborhood::Kono => 0.9,
            Neighborhood::Chinatown => 1.0,
            Neighborhood::PiedmontAve => 0.7,
        }
    }

    /// Lowercase, hyphenated form used inside generated ids.
    pub fn slug(self) -> String {
        self.as_str().to_lowercase().replace(' ', "-")
    }
}
