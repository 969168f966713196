use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::PickerError;

/// Raw latitude/longitude pair as it arrives from a map event or request body.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A validated geographic point in degrees. Immutable once constructed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(try_from = "LatLng", into = "LatLng")]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Result<Self, PickerError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(PickerError::InvalidCoordinate { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl TryFrom<LatLng> for GeoPoint {
    type Error = PickerError;

    fn try_from(raw: LatLng) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.lat, raw.lng)
    }
}

impl From<GeoPoint> for LatLng {
    fn from(point: GeoPoint) -> Self {
        LatLng {
            lat: point.lat,
            lng: point.lng,
        }
    }
}

/// Which field the next incoming coordinate updates.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Selecting {
    #[default]
    Pickup,
    Drop,
}

impl FromStr for Selecting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pickup" => Ok(Selecting::Pickup),
            "drop" => Ok(Selecting::Drop),
            other => Err(format!("unknown marker: {}", other)),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ModeRequest {
    pub mode: Selecting,
}

#[derive(Deserialize, Debug)]
pub struct FareQuery {
    pub sector: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct DistanceResponse {
    pub distance_km: Option<f64>,
}

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_bounds_inclusive() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_geo_point_out_of_range() {
        assert_eq!(
            GeoPoint::new(90.5, 0.0),
            Err(PickerError::InvalidCoordinate { lat: 90.5, lng: 0.0 })
        );
        assert!(GeoPoint::new(0.0, -180.1).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_geo_point_serde() {
        let point = GeoPoint::new(18.0735, -15.9582).unwrap();
        let json = serde_json::to_string(&point).unwrap();
        assert_eq!(json, r#"{"lat":18.0735,"lng":-15.9582}"#);

        let back: GeoPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);

        let invalid = serde_json::from_str::<GeoPoint>(r#"{"lat":91.0,"lng":0.0}"#);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_selecting_lowercase() {
        assert_eq!(serde_json::to_string(&Selecting::Drop).unwrap(), r#""drop""#);
        let mode: ModeRequest = serde_json::from_str(r#"{"mode":"pickup"}"#).unwrap();
        assert_eq!(mode.mode, Selecting::Pickup);
        assert_eq!(Selecting::default(), Selecting::Pickup);
        assert_eq!("drop".parse::<Selecting>(), Ok(Selecting::Drop));
        assert!("middle".parse::<Selecting>().is_err());
    }
}
