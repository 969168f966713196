use serde::Serialize;
use tracing::debug;

use crate::{
    error::PickerError,
    haversine::{haversine_km, round_km},
    types::{GeoPoint, Selecting},
};

/// Which of the two points are placed.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NoPoints,
    PickupSet,
    DropSet,
    BothSet,
}

/// Read model handed to the rendering layer and to whoever persists the points.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PickerSnapshot {
    pub pickup: Option<GeoPoint>,
    pub drop: Option<GeoPoint>,
    pub selecting: Selecting,
    pub phase: Phase,
    pub distance_km: Option<f64>,
}

/// Pickup/drop pair of a single editing session.
///
/// Every mutation validates its input first, so a rejected call leaves the
/// state exactly as it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinatePairState {
    pickup: Option<GeoPoint>,
    drop: Option<GeoPoint>,
    selecting: Selecting,
}

impl CoordinatePairState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pickup_point(&self) -> Option<GeoPoint> {
        self.pickup
    }

    pub fn drop_point(&self) -> Option<GeoPoint> {
        self.drop
    }

    pub fn selecting(&self) -> Selecting {
        self.selecting
    }

    /// Assigns the point targeted by the current mode. Placing the pickup
    /// advances the mode to `Drop`; placing the drop leaves it there.
    pub fn set_point(&mut self, lat: f64, lng: f64) -> Result<GeoPoint, PickerError> {
        let point = GeoPoint::new(lat, lng)?;
        match self.selecting {
            Selecting::Pickup => {
                self.pickup = Some(point);
                self.selecting = Selecting::Drop;
                debug!("pickup set to {},{}; now selecting drop", lat, lng);
            }
            Selecting::Drop => {
                self.drop = Some(point);
                debug!("drop set to {},{}", lat, lng);
            }
        }
        Ok(point)
    }

    pub fn switch_mode(&mut self, mode: Selecting) {
        self.selecting = mode;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Moves the pickup marker without touching the mode.
    pub fn drag_pickup(&mut self, lat: f64, lng: f64) -> Result<GeoPoint, PickerError> {
        let point = GeoPoint::new(lat, lng)?;
        self.pickup = Some(point);
        Ok(point)
    }

    /// Moves the drop marker without touching the mode.
    pub fn drag_drop(&mut self, lat: f64, lng: f64) -> Result<GeoPoint, PickerError> {
        let point = GeoPoint::new(lat, lng)?;
        self.drop = Some(point);
        Ok(point)
    }

    pub fn phase(&self) -> Phase {
        match (self.pickup, self.drop) {
            (None, None) => Phase::NoPoints,
            (Some(_), None) => Phase::PickupSet,
            (None, Some(_)) => Phase::DropSet,
            (Some(_), Some(_)) => Phase::BothSet,
        }
    }

    /// Endpoints of the line drawn between the markers.
    pub fn route(&self) -> Option<(GeoPoint, GeoPoint)> {
        Some((self.pickup?, self.drop?))
    }

    /// Full precision distance, `None` until both points are placed.
    pub fn distance_km(&self) -> Option<f64> {
        self.route()
            .map(|(pickup, drop)| haversine_km(&pickup, &drop))
    }

    pub fn distance_km_rounded(&self) -> Option<f64> {
        self.distance_km().map(round_km)
    }

    pub fn snapshot(&self) -> PickerSnapshot {
        PickerSnapshot {
            pickup: self.pickup,
            drop: self.drop,
            selecting: self.selecting,
            phase: self.phase(),
            distance_km: self.distance_km_rounded(),
        }
    }
}
