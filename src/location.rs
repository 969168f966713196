use tracing::{debug, instrument, warn};

use crate::{error::LocationError, picker::CoordinatePairState, types::GeoPoint};

/// Source of a device position. One call is one reading; retries and timeouts
/// are up to the caller.
pub trait LocationProvider {
    fn locate(&self) -> impl Future<Output = Result<GeoPoint, LocationError>> + Send;
}

/// Serves a single preconfigured reading, or reports the position as
/// unavailable when none is configured.
#[derive(Debug, Clone, Default)]
pub struct FixedLocation {
    reading: Option<GeoPoint>,
}

impl FixedLocation {
    pub fn new(reading: Option<GeoPoint>) -> Self {
        Self { reading }
    }
}

impl LocationProvider for FixedLocation {
    async fn locate(&self) -> Result<GeoPoint, LocationError> {
        self.reading
            .ok_or_else(|| LocationError::Unavailable("no default location configured".into()))
    }
}

/// Awaits one reading from `provider` and feeds it to `set_point`. On failure
/// the state is left untouched.
#[instrument(skip_all)]
pub async fn locate_into<P: LocationProvider>(
    state: &mut CoordinatePairState,
    provider: &P,
) -> Result<GeoPoint, LocationError> {
    let reading = match provider.locate().await {
        Ok(reading) => reading,
        Err(e) => {
            warn!("Geolocation failed: {}", e);
            return Err(e);
        }
    };
    debug!("Received reading {},{}", reading.lat(), reading.lng());
    Ok(state.set_point(reading.lat(), reading.lng())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Selecting;

    struct Denied;

    impl LocationProvider for Denied {
        async fn locate(&self) -> Result<GeoPoint, LocationError> {
            Err(LocationError::PermissionDenied)
        }
    }

    #[tokio::test]
    async fn test_locate_into_sets_pickup() {
        let reading = GeoPoint::new(18.0735, -15.9582).unwrap();
        let provider = FixedLocation::new(Some(reading));
        let mut state = CoordinatePairState::new();

        let point = locate_into(&mut state, &provider).await.unwrap();
        assert_eq!(point, reading);
        assert_eq!(state.pickup_point(), Some(reading));
        assert_eq!(state.selecting(), Selecting::Drop);
    }

    #[tokio::test]
    async fn test_locate_into_follows_mode() {
        let reading = GeoPoint::new(18.0894, -15.9785).unwrap();
        let provider = FixedLocation::new(Some(reading));
        let mut state = CoordinatePairState::new();
        state.set_point(18.0735, -15.9582).unwrap();

        locate_into(&mut state, &provider).await.unwrap();
        assert_eq!(state.drop_point(), Some(reading));
    }

    #[tokio::test]
    async fn test_denied_leaves_state_unchanged() {
        let mut state = CoordinatePairState::new();
        state.set_point(18.0735, -15.9582).unwrap();
        let before = state.clone();

        let result = locate_into(&mut state, &Denied).await;
        assert_eq!(result, Err(LocationError::PermissionDenied));
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn test_unconfigured_fixed_location() {
        let mut state = CoordinatePairState::new();
        let result = locate_into(&mut state, &FixedLocation::default()).await;
        assert!(matches!(result, Err(LocationError::Unavailable(_))));
        assert_eq!(state, CoordinatePairState::new());
        assert_eq!(
            result.unwrap_err().to_string(),
            "location unavailable: no default location configured"
        );
    }
}
