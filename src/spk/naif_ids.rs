//! Typed NAIF body identifiers.
//!
//! NAIF uses integer codes for every body: `0` is the Solar System
//! Barycentre, `10` the Sun, `1..=9` the planetary system barycentres and
//! `x99` the planet mass centres (e.g. `399` for the Earth). [`NaifBody`]
//! covers the bodies found in the DE planetary kernels and converts to and
//! from the raw code.
use std::fmt;

use crate::barytrack_errors::BaryTrackError;

/// Planetary systems, numbered like their NAIF barycentre codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanetarySystem {
    Mercury = 1,
    Venus = 2,
    Earth = 3,
    Mars = 4,
    Jupiter = 5,
    Saturn = 6,
    Uranus = 7,
    Neptune = 8,
    Pluto = 9,
}

impl PlanetarySystem {
    pub fn from_index(index: i32) -> Option<Self> {
        use PlanetarySystem::*;
        match index {
            1 => Some(Mercury),
            2 => Some(Venus),
            3 => Some(Earth),
            4 => Some(Mars),
            5 => Some(Jupiter),
            6 => Some(Saturn),
            7 => Some(Uranus),
            8 => Some(Neptune),
            9 => Some(Pluto),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        use PlanetarySystem::*;
        match self {
            Mercury => "Mercury",
            Venus => "Venus",
            Earth => "Earth",
            Mars => "Mars",
            Jupiter => "Jupiter",
            Saturn => "Saturn",
            Uranus => "Uranus",
            Neptune => "Neptune",
            Pluto => "Pluto",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NaifBody {
    SolarSystemBarycenter,
    Sun,
    /// Barycentre of a planetary system (codes 1 to 9).
    Barycenter(PlanetarySystem),
    /// Mass centre of the planet itself (codes 199 to 999).
    Planet(PlanetarySystem),
    Moon,
}

impl NaifBody {
    pub const SSB: NaifBody = NaifBody::SolarSystemBarycenter;
    pub const EARTH: NaifBody = NaifBody::Planet(PlanetarySystem::Earth);

    pub fn from_id(id: i32) -> Result<Self, BaryTrackError> {
        match id {
            0 => Ok(NaifBody::SolarSystemBarycenter),
            10 => Ok(NaifBody::Sun),
            301 => Ok(NaifBody::Moon),
            1..=9 => PlanetarySystem::from_index(id)
                .map(NaifBody::Barycenter)
                .ok_or(BaryTrackError::InvalidNaifId(id)),
            199..=999 if id % 100 == 99 => PlanetarySystem::from_index(id / 100)
                .map(NaifBody::Planet)
                .ok_or(BaryTrackError::InvalidNaifId(id)),
            _ => Err(BaryTrackError::InvalidNaifId(id)),
        }
    }

    pub fn to_id(&self) -> i32 {
        match self {
            NaifBody::SolarSystemBarycenter => 0,
            NaifBody::Sun => 10,
            NaifBody::Barycenter(system) => *system as i32,
            NaifBody::Planet(system) => *system as i32 * 100 + 99,
            NaifBody::Moon => 301,
        }
    }
}

impl From<NaifBody> for i32 {
    fn from(body: NaifBody) -> Self {
        body.to_id()
    }
}

impl TryFrom<i32> for NaifBody {
    type Error = BaryTrackError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        NaifBody::from_id(id)
    }
}

impl fmt::Display for NaifBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NaifBody::SolarSystemBarycenter => write!(f, "Solar System Barycenter"),
            NaifBody::Sun => write!(f, "Sun"),
            NaifBody::Barycenter(PlanetarySystem::Earth) => write!(f, "Earth-Moon Barycenter"),
            NaifBody::Barycenter(system) => write!(f, "{} Barycenter", system.name()),
            NaifBody::Planet(system) => write!(f, "{}", system.name()),
            NaifBody::Moon => write!(f, "Moon"),
        }
    }
}

#[cfg(test)]
mod test_naif_body {
    use super::*;

    #[test]
    fn test_from_id() {
        assert_eq!(NaifBody::from_id(0), Ok(NaifBody::SolarSystemBarycenter));
        assert_eq!(NaifBody::from_id(10), Ok(NaifBody::Sun));
        assert_eq!(
            NaifBody::from_id(3),
            Ok(NaifBody::Barycenter(PlanetarySystem::Earth))
        );
        assert_eq!(NaifBody::from_id(399), Ok(NaifBody::EARTH));
        assert_eq!(
            NaifBody::from_id(599),
            Ok(NaifBody::Planet(PlanetarySystem::Jupiter))
        );
        assert_eq!(NaifBody::from_id(301), Ok(NaifBody::Moon));
        assert_eq!(NaifBody::from_id(11), Err(BaryTrackError::InvalidNaifId(11)));
        assert_eq!(
            NaifBody::from_id(398),
            Err(BaryTrackError::InvalidNaifId(398))
        );
        assert_eq!(
            NaifBody::from_id(1099),
            Err(BaryTrackError::InvalidNaifId(1099))
        );
    }

    #[test]
    fn test_to_id_round_trips() {
        for id in [0, 10, 1, 3, 9, 199, 399, 999, 301] {
            assert_eq!(NaifBody::from_id(id).unwrap().to_id(), id);
            assert_eq!(i32::from(NaifBody::try_from(id).unwrap()), id);
        }
    }

    #[test]
    fn test_to_string() {
        assert_eq!(NaifBody::SSB.to_string(), "Solar System Barycenter");
        assert_eq!(NaifBody::Sun.to_string(), "Sun");
        assert_eq!(
            NaifBody::Barycenter(PlanetarySystem::Earth).to_string(),
            "Earth-Moon Barycenter"
        );
        assert_eq!(
            NaifBody::Barycenter(PlanetarySystem::Mars).to_string(),
            "Mars Barycenter"
        );
        assert_eq!(NaifBody::EARTH.to_string(), "Earth");
    }
}
