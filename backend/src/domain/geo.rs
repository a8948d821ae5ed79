//! Great-circle distance helpers for proximity queries.
//!
//! Coordinates are WGS84 degrees. Distances use the haversine formula on a
//! sphere of radius [`EARTH_RADIUS_KM`]; inclusion checks are inclusive of the
//! radius so a point exactly on the boundary is "nearby".

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by every distance calculation, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Search radius for nearby local services, in kilometres.
pub const NEARBY_SERVICES_RADIUS_KM: f64 = 10.0;

/// Search radius for nearby sightseeing spots, in kilometres.
pub const NEARBY_SIGHTSEEING_RADIUS_KM: f64 = 20.0;

/// A latitude/longitude pair in decimal degrees.
///
/// # Examples
/// ```
/// use backend::domain::Coordinates;
///
/// let mumbai = Coordinates::new(19.0760, 72.8777);
/// assert_eq!(mumbai.distance_km(&mumbai), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl Coordinates {
    /// Build a coordinate pair from decimal degrees.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse the decimal-string coordinates stored on catalogue entities.
    ///
    /// Returns `None` when either side is missing, blank, or not a number.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Coordinates;
    ///
    /// let parsed = Coordinates::parse(Some("15.2993"), Some(" 74.1240 "));
    /// assert_eq!(parsed, Some(Coordinates::new(15.2993, 74.1240)));
    /// assert_eq!(Coordinates::parse(Some("15.2993"), None), None);
    /// assert_eq!(Coordinates::parse(Some(""), Some("74.1")), None);
    /// ```
    pub fn parse(latitude: Option<&str>, longitude: Option<&str>) -> Option<Self> {
        let latitude = parse_degrees(latitude?)?;
        let longitude = parse_degrees(longitude?)?;
        Some(Self::new(latitude, longitude))
    }

    /// Haversine distance to `other`, in kilometres.
    pub fn distance_km(&self, other: &Self) -> f64 {
        haversine_km(*self, *other)
    }

    /// Whether `other` lies within `radius_km` of this point, boundary included.
    pub fn is_within(&self, other: &Self, radius_km: f64) -> bool {
        self.distance_km(other) <= radius_km
    }
}

fn parse_degrees(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| !value.is_nan())
}

/// Great-circle distance between two points, in kilometres.
///
/// `a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)`,
/// `c = 2·atan2(√a, √(1−a))`, distance `= R·c`.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let half_lat = (d_lat / 2.0).sin();
    let half_lon = (d_lon / 2.0).sin();
    let a = half_lat.powi(2)
        + from.latitude.to_radians().cos() * to.latitude.to_radians().cos() * half_lon.powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}
