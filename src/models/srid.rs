use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A UTM longitude band, numbered 1..=60 eastward from the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtmZone(u8);

impl UtmZone {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 60;

    pub fn new(zone: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&zone).then_some(UtmZone(zone))
    }

    pub fn clamped(zone: i64) -> Self {
        UtmZone(zone.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
    }

    pub fn number(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for UtmZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// Anything below the equator is south; the equator itself is north.
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude < 0.0 {
            Hemisphere::South
        } else {
            Hemisphere::North
        }
    }

    /// Third digit of the WGS84/UTM EPSG code.
    pub fn digit(&self) -> char {
        match self {
            Hemisphere::North => '6',
            Hemisphere::South => '7',
        }
    }
}

/// EPSG code of a WGS84 UTM zone: `326xx` north, `327xx` south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Srid {
    pub zone: UtmZone,
    pub hemisphere: Hemisphere,
}

impl Srid {
    pub fn new(zone: UtmZone, hemisphere: Hemisphere) -> Self {
        Srid { zone, hemisphere }
    }

    pub fn code(&self) -> u32 {
        let base = match self.hemisphere {
            Hemisphere::North => 32600,
            Hemisphere::South => 32700,
        };
        base + self.zone.number() as u32
    }

    /// `EPSG:326xx` form accepted by PROJ and GDAL.
    pub fn to_epsg(&self) -> String {
        format!("EPSG:{}", self.code())
    }
}

impl fmt::Display for Srid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "32{}{:02}", self.hemisphere.digit(), self.zone.number())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("not a WGS84 UTM SRID: '{0}'")]
pub struct ParseSridError(String);

impl FromStr for Srid {
    type Err = ParseSridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSridError(s.to_string());
        let s = s.trim();
        let s = s.strip_prefix("EPSG:").unwrap_or(s);
        if s.len() != 5 || !s.is_ascii() {
            return Err(err());
        }

        let hemisphere = match s.strip_prefix("32").and_then(|rest| rest.chars().next()) {
            Some('6') => Hemisphere::North,
            Some('7') => Hemisphere::South,
            _ => return Err(err()),
        };
        let zone = s[3..]
            .parse::<u8>()
            .ok()
            .and_then(UtmZone::new)
            .ok_or_else(err)?;

        Ok(Srid::new(zone, hemisphere))
    }
}
