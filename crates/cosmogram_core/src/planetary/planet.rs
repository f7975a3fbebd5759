//! The seven classical planets.

use crate::config::palette::Color;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One of exactly seven planetary rulers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Planet {
    Saturn,
    Jupiter,
    Mars,
    Sun,
    Venus,
    Mercury,
    Moon,
}

/// Chaldean ruling sequence used for hour succession.
pub const CHALDEAN_ORDER: [Planet; 7] = [
    Planet::Saturn,
    Planet::Jupiter,
    Planet::Mars,
    Planet::Sun,
    Planet::Venus,
    Planet::Mercury,
    Planet::Moon,
];

impl Planet {
    /// Stable name used in registries and schema documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Saturn => "Saturn",
            Self::Jupiter => "Jupiter",
            Self::Mars => "Mars",
            Self::Sun => "Sun",
            Self::Venus => "Venus",
            Self::Mercury => "Mercury",
            Self::Moon => "Moon",
        }
    }

    /// Correspondence color used for overlay markers.
    pub fn color(self) -> Color {
        match self {
            Self::Sun => Color::rgb(0xff, 0xc8, 0x00),
            Self::Venus => Color::rgb(0xff, 0xd7, 0x00),
            Self::Mercury => Color::rgb(0xc0, 0xc0, 0xc0),
            Self::Moon => Color::rgb(0x87, 0xce, 0xfa),
            Self::Saturn => Color::rgb(0x2e, 0x2e, 0x2e),
            Self::Jupiter => Color::rgb(0x00, 0xff, 0x80),
            Self::Mars => Color::rgb(0xb7, 0x41, 0x0e),
        }
    }

    /// Position in `CHALDEAN_ORDER`.
    pub fn chaldean_index(self) -> usize {
        match self {
            Self::Saturn => 0,
            Self::Jupiter => 1,
            Self::Mars => 2,
            Self::Sun => 3,
            Self::Venus => 4,
            Self::Mercury => 5,
            Self::Moon => 6,
        }
    }
}

impl Display for Planet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Planet {
    type Err = UnknownPlanet;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        CHALDEAN_ORDER
            .iter()
            .copied()
            .find(|planet| planet.as_str() == value)
            .ok_or_else(|| UnknownPlanet(value.to_string()))
    }
}

/// Raised when a string names none of the seven planets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlanet(pub String);

impl Display for UnknownPlanet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown planet: {}", self.0)
    }
}

impl Error for UnknownPlanet {}

#[cfg(test)]
mod tests {
    use super::{Planet, CHALDEAN_ORDER};

    #[test]
    fn chaldean_index_matches_order() {
        for (index, planet) in CHALDEAN_ORDER.iter().enumerate() {
            assert_eq!(planet.chaldean_index(), index);
        }
    }

    #[test]
    fn parses_exact_names_only() {
        assert_eq!("Mercury".parse::<Planet>().expect("mercury"), Planet::Mercury);
        assert!("mercury".parse::<Planet>().is_err());
        assert!("Pluto".parse::<Planet>().is_err());
    }
}
