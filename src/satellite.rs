use std::fmt;

use serde::Deserialize;
use strum::{Display, EnumIter};

/// N2YO satellite category used to filter the "above" lookup.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Display, EnumIter, clap::ValueEnum,
)]
pub enum Category {
    #[strum(to_string = "All")]
    All,

    // Space stations
    #[strum(to_string = "ISS")]
    Iss,

    // Constellations
    Starlink,
    #[strum(to_string = "OneWeb")]
    OneWeb,
    Iridium,
    Globalstar,
    Orbcomm,

    // Weather satellites
    Weather,
    #[strum(to_string = "NOAA")]
    Noaa,

    // Navigation satellites
    #[strum(to_string = "GPS Operational")]
    Gps,
    #[strum(to_string = "GLONASS Operational")]
    Glonass,
    Galileo,
    Beidou,

    // Miscellaneous satellites
    #[strum(to_string = "Amateur radio")]
    Amateur,
    Geostationary,
    CubeSats,
    Military,
}

impl Category {
    /// Returns the N2YO category id
    pub fn id(&self) -> u32 {
        match self {
            Self::All => 0,
            Self::Iss => 2,
            Self::Starlink => 52,
            Self::OneWeb => 53,
            Self::Iridium => 15,
            Self::Globalstar => 17,
            Self::Orbcomm => 16,
            Self::Weather => 3,
            Self::Noaa => 4,
            Self::Gps => 20,
            Self::Glonass => 21,
            Self::Galileo => 22,
            Self::Beidou => 35,
            Self::Amateur => 18,
            Self::Geostationary => 10,
            Self::CubeSats => 32,
            Self::Military => 30,
        }
    }
}

/// Descriptor of a single satellite as reported by the lookup endpoints.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SatelliteInfo {
    #[serde(rename = "satid")]
    pub id: u64,
    #[serde(rename = "satname")]
    pub name: String,

    #[serde(rename = "intDesignator", default)]
    pub cospar_id: Option<String>,
    #[serde(rename = "launchDate", default)]
    pub launch_date: Option<String>,
    #[serde(rename = "satlat", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "satlng", default)]
    pub longitude: Option<f64>,
    #[serde(rename = "satalt", default)]
    pub altitude: Option<f64>,
}

impl SatelliteInfo {
    #[cfg(test)]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cospar_id: None,
            launch_date: None,
            latitude: None,
            longitude: None,
            altitude: None,
        }
    }
}

impl fmt::Display for SatelliteInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// One sample of a satellite's sub-point.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Position {
    /// Unix seconds
    pub timestamp: i64,
    #[serde(rename = "satlatitude", default)]
    pub latitude: Option<f64>,
    #[serde(rename = "satlongitude", default)]
    pub longitude: Option<f64>,
    /// Altitude above the ellipsoid in km
    #[serde(rename = "sataltitude", default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub azimuth: Option<f64>,
    #[serde(default)]
    pub elevation: Option<f64>,
}

impl Position {
    #[cfg(test)]
    pub fn new(timestamp: i64, latitude: f64, longitude: f64) -> Self {
        Self {
            timestamp,
            latitude: Some(latitude),
            longitude: Some(longitude),
            altitude: None,
            azimuth: None,
            elevation: None,
        }
    }

    /// Returns `(longitude, latitude)` if the sample carries a fix.
    ///
    /// A zero coordinate is the upstream "no fix" sentinel and is treated
    /// like an absent one.
    pub fn fix(&self) -> Option<(f64, f64)> {
        let valid = |value: Option<f64>| value.filter(|v| *v != 0.0 && v.is_finite());
        Some((valid(self.longitude)?, valid(self.latitude)?))
    }
}

/// Time series of positions for one satellite.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SatelliteTrack {
    pub info: SatelliteInfo,
    #[serde(default)]
    pub positions: Vec<Position>,
}

impl SatelliteTrack {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Returns the concatenated digit runs of a satellite name.
///
/// `"STARLINK-1234"` yields `"1234"`; a name without digits yields an empty
/// string.
pub fn label_from_name(name: &str) -> String {
    name.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[rstest]
    #[case("STARLINK-1234", "1234")]
    #[case("NOSTARLINKNAME", "")]
    #[case("STARLINK-42", "42")]
    #[case("COSMOS 2251 DEB 12", "225112")]
    #[case("", "")]
    fn label_extraction(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(label_from_name(name), expected);
        assert_eq!(label_from_name(name), label_from_name(name));
    }

    #[rstest]
    #[case(Some(0.0), Some(20.0))]
    #[case(Some(10.0), Some(0.0))]
    #[case(None, Some(20.0))]
    #[case(Some(10.0), None)]
    #[case(Some(f64::NAN), Some(20.0))]
    fn missing_fix(#[case] latitude: Option<f64>, #[case] longitude: Option<f64>) {
        let position = Position {
            latitude,
            longitude,
            ..Position::new(0, 1.0, 1.0)
        };
        assert_eq!(position.fix(), None);
    }

    #[test]
    fn fix_is_longitude_first() {
        assert_eq!(Position::new(1000, 10.0, 20.0).fix(), Some((20.0, 10.0)));
    }

    #[test]
    fn category_ids_are_unique() {
        let mut ids: Vec<u32> = Category::iter().map(|c| c.id()).collect();
        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
        assert_eq!(Category::Starlink.id(), 52);
    }
}
