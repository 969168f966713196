//! Pickup/drop coordinate picking for delivery orders.
//!
//! [`CoordinatePairState`] tracks the two points of one editing session and
//! computes the haversine distance between them. The rest of the crate is the
//! plumbing a map UI talks to: injected geolocation, fare quotes, an in-memory
//! session store and the warp routes on top of it.

pub mod config;
pub mod error;
pub mod fare;
pub mod handlers;
pub mod haversine;
pub mod location;
pub mod picker;
pub mod routes;
pub mod session;
pub mod telemetry;
pub mod types;

pub use error::{LocationError, PickerError};
pub use haversine::{EARTH_RADIUS_KM, haversine_km};
pub use location::{FixedLocation, LocationProvider, locate_into};
pub use picker::{CoordinatePairState, Phase, PickerSnapshot};
pub use types::{GeoPoint, LatLng, Selecting};
