use serde::Serialize;
use std::convert::Infallible;
use tracing::{debug, info, instrument, warn};
use warp::{
    Rejection, Reply,
    http::StatusCode,
    reply::{self, Response},
};

use crate::{
    fare::FareRule,
    location::{LocationProvider, locate_into},
    picker::PickerSnapshot,
    session::{SessionStore, SharedState},
    types::{DistanceResponse, ErrorResponse, FareQuery, LatLng, ModeRequest, Selecting},
};

#[derive(Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub state: PickerSnapshot,
}

fn error_reply(status: StatusCode, message: impl Into<String>) -> Response {
    reply::with_status(
        reply::json(&ErrorResponse {
            error: message.into(),
        }),
        status,
    )
    .into_response()
}

fn not_found(id: &str) -> Response {
    error_reply(StatusCode::NOT_FOUND, format!("session {} not found", id))
}

async fn session(store: &SessionStore, id: &str) -> Result<SharedState, Response> {
    store.get(id).await.ok_or_else(|| not_found(id))
}

pub async fn get_status() -> Result<impl Reply, Rejection> {
    Ok(reply::with_status("Ok", StatusCode::OK))
}

#[instrument(skip_all)]
pub async fn create_session(store: SessionStore) -> Result<impl Reply, Rejection> {
    let (id, state) = store.create().await;
    let state = state.lock().await.snapshot();
    info!("Session {} opened", id);
    Ok(reply::with_status(
        reply::json(&SessionResponse { id, state }),
        StatusCode::CREATED,
    ))
}

pub async fn get_session(id: String, store: SessionStore) -> Result<Response, Rejection> {
    let session = match session(&store, &id).await {
        Ok(session) => session,
        Err(response) => return Ok(response),
    };
    let snapshot = session.lock().await.snapshot();
    Ok(reply::json(&snapshot).into_response())
}

#[instrument(skip(store))]
pub async fn delete_session(id: String, store: SessionStore) -> Result<Response, Rejection> {
    if !store.remove(&id).await {
        return Ok(not_found(&id));
    }
    info!("Session {} closed", id);
    Ok(reply::with_status(reply::reply(), StatusCode::NO_CONTENT).into_response())
}

#[instrument(skip(store))]
pub async fn post_point(
    id: String,
    point: LatLng,
    store: SessionStore,
) -> Result<Response, Rejection> {
    let session = match session(&store, &id).await {
        Ok(session) => session,
        Err(response) => return Ok(response),
    };
    let mut state = session.lock().await;
    match state.set_point(point.lat, point.lng) {
        Ok(_) => Ok(reply::json(&state.snapshot()).into_response()),
        Err(e) => Ok(error_reply(StatusCode::BAD_REQUEST, e.to_string())),
    }
}

#[instrument(skip(store))]
pub async fn post_drag(
    id: String,
    marker: Selecting,
    point: LatLng,
    store: SessionStore,
) -> Result<Response, Rejection> {
    let session = match session(&store, &id).await {
        Ok(session) => session,
        Err(response) => return Ok(response),
    };
    let mut state = session.lock().await;
    let result = match marker {
        Selecting::Pickup => state.drag_pickup(point.lat, point.lng),
        Selecting::Drop => state.drag_drop(point.lat, point.lng),
    };
    match result {
        Ok(_) => Ok(reply::json(&state.snapshot()).into_response()),
        Err(e) => Ok(error_reply(StatusCode::BAD_REQUEST, e.to_string())),
    }
}

pub async fn put_mode(
    id: String,
    request: ModeRequest,
    store: SessionStore,
) -> Result<Response, Rejection> {
    let session = match session(&store, &id).await {
        Ok(session) => session,
        Err(response) => return Ok(response),
    };
    let mut state = session.lock().await;
    state.switch_mode(request.mode);
    Ok(reply::json(&state.snapshot()).into_response())
}

pub async fn post_clear(id: String, store: SessionStore) -> Result<Response, Rejection> {
    let session = match session(&store, &id).await {
        Ok(session) => session,
        Err(response) => return Ok(response),
    };
    let mut state = session.lock().await;
    state.clear();
    Ok(reply::json(&state.snapshot()).into_response())
}

#[instrument(skip(store, provider))]
pub async fn post_locate<P>(
    id: String,
    store: SessionStore,
    provider: P,
) -> Result<Response, Rejection>
where
    P: LocationProvider + Send + Sync,
{
    let session = match session(&store, &id).await {
        Ok(session) => session,
        Err(response) => return Ok(response),
    };
    let mut state = session.lock().await;
    match locate_into(&mut state, &provider).await {
        Ok(_) => Ok(reply::json(&state.snapshot()).into_response()),
        Err(e) => {
            warn!("Locate failed for session {}: {}", id, e);
            Ok(error_reply(StatusCode::SERVICE_UNAVAILABLE, e.to_string()))
        }
    }
}

pub async fn get_distance(id: String, store: SessionStore) -> Result<Response, Rejection> {
    let session = match session(&store, &id).await {
        Ok(session) => session,
        Err(response) => return Ok(response),
    };
    let distance_km = session.lock().await.distance_km_rounded();
    Ok(reply::json(&DistanceResponse { distance_km }).into_response())
}

pub async fn get_fare(
    id: String,
    query: FareQuery,
    store: SessionStore,
) -> Result<Response, Rejection> {
    let session = match session(&store, &id).await {
        Ok(session) => session,
        Err(response) => return Ok(response),
    };
    let Some(distance) = session.lock().await.distance_km() else {
        return Ok(error_reply(
            StatusCode::CONFLICT,
            "pickup and drop must both be set",
        ));
    };
    let rule = FareRule::for_sector(query.sector.as_deref().unwrap_or("standard"));
    Ok(reply::json(&rule.quote(distance)).into_response())
}

/// Turns warp's own rejections into the JSON error body the handlers use.
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, String::from("not found"))
    } else if let Some(e) = err.find::<warp::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            String::from("request body too large"),
        )
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (
            StatusCode::LENGTH_REQUIRED,
            String::from("content-length header required"),
        )
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            String::from("method not allowed"),
        )
    } else {
        warn!("Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            String::from("internal error"),
        )
    };
    debug!("Rejected request with {}: {}", status, message);
    Ok(error_reply(status, message))
}
