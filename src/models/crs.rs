//! Coordinate reference system tag carried by every geospatial frame.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// EPSG code of WGS84 geographic coordinates
pub const WGS84_EPSG: u32 = 4326;

/// Coordinate Reference System, identified by its EPSG code.
///
/// Serializes as `"EPSG:<code>"`. Parsing also accepts the lowercase
/// `epsg:<code>` form and a bare numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Crs {
    epsg: u32,
}

impl Crs {
    /// Create a CRS from an EPSG code
    pub fn from_epsg(code: u32) -> Self {
        Self { epsg: code }
    }

    /// WGS84 geographic CRS (EPSG:4326)
    pub fn wgs84() -> Self {
        Self::from_epsg(WGS84_EPSG)
    }

    pub fn epsg(&self) -> u32 {
        self.epsg
    }

    pub fn is_wgs84(&self) -> bool {
        self.epsg == WGS84_EPSG
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg)
    }
}

impl FromStr for Crs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let code = match trimmed.split_once(':') {
            Some((authority, code)) if authority.eq_ignore_ascii_case("epsg") => code,
            Some(_) => return Err(Error::InvalidCrs(s.to_string())),
            None => trimmed,
        };
        code.trim()
            .parse::<u32>()
            .map(Self::from_epsg)
            .map_err(|_| Error::InvalidCrs(s.to_string()))
    }
}

impl TryFrom<String> for Crs {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Crs> for String {
    fn from(crs: Crs) -> Self {
        crs.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_wgs84() {
        let crs = Crs::default();
        assert!(crs.is_wgs84());
        assert_eq!(crs.to_string(), "EPSG:4326");
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!("EPSG:4326".parse::<Crs>().unwrap(), Crs::wgs84());
        assert_eq!("epsg:3857".parse::<Crs>().unwrap(), Crs::from_epsg(3857));
        assert_eq!(" 4326 ".parse::<Crs>().unwrap(), Crs::wgs84());
    }

    #[test]
    fn test_parse_rejects_other_authorities() {
        assert!(matches!(
            "ESRI:102100".parse::<Crs>(),
            Err(Error::InvalidCrs(_))
        ));
        assert!(matches!("EPSG:abc".parse::<Crs>(), Err(Error::InvalidCrs(_))));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Crs::wgs84()).unwrap();
        assert_eq!(json, "\"EPSG:4326\"");
        let back: Crs = serde_json::from_str("\"epsg:4326\"").unwrap();
        assert_eq!(back, Crs::wgs84());
    }
}
