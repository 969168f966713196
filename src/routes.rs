use serde::de::DeserializeOwned;
use std::convert::Infallible;
use warp::{Filter, Rejection, Reply};

use crate::{
    config::Config,
    handlers,
    location::LocationProvider,
    session::SessionStore,
    types::{FareQuery, LatLng, ModeRequest, Selecting},
};

fn with_store(
    store: SessionStore,
) -> impl Filter<Extract = (SessionStore,), Error = Infallible> + Clone {
    warp::any().map(move || store.clone())
}

fn json_body<T: DeserializeOwned + Send>(
    limit: u64,
) -> impl Filter<Extract = (T,), Error = Rejection> + Clone {
    warp::body::content_length_limit(limit).and(warp::body::json())
}

/// HTTP surface over the session store.
pub fn routes<P>(
    store: SessionStore,
    provider: P,
    config: Config,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone
where
    P: LocationProvider + Clone + Send + Sync + 'static,
{
    let limit = config.max_post_size.as_u64();

    let status = warp::path!("status")
        .and(warp::get())
        .and_then(handlers::get_status);

    let create = warp::path!("sessions")
        .and(warp::post())
        .and(with_store(store.clone()))
        .and_then(handlers::create_session);

    let get = warp::path!("sessions" / String)
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(handlers::get_session);

    let delete = warp::path!("sessions" / String)
        .and(warp::delete())
        .and(with_store(store.clone()))
        .and_then(handlers::delete_session);

    let point = warp::path!("sessions" / String / "point")
        .and(warp::post())
        .and(json_body::<LatLng>(limit))
        .and(with_store(store.clone()))
        .and_then(handlers::post_point);

    let drag = warp::path!("sessions" / String / "drag" / Selecting)
        .and(warp::post())
        .and(json_body::<LatLng>(limit))
        .and(with_store(store.clone()))
        .and_then(handlers::post_drag);

    let mode = warp::path!("sessions" / String / "mode")
        .and(warp::put())
        .and(json_body::<ModeRequest>(limit))
        .and(with_store(store.clone()))
        .and_then(handlers::put_mode);

    let clear = warp::path!("sessions" / String / "clear")
        .and(warp::post())
        .and(with_store(store.clone()))
        .and_then(handlers::post_clear);

    let locate = warp::path!("sessions" / String / "locate")
        .and(warp::post())
        .and(with_store(store.clone()))
        .and(warp::any().map(move || provider.clone()))
        .and_then(handlers::post_locate::<P>);

    let distance = warp::path!("sessions" / String / "distance")
        .and(warp::get())
        .and(with_store(store.clone()))
        .and_then(handlers::get_distance);

    let fare = warp::path!("sessions" / String / "fare")
        .and(warp::get())
        .and(warp::query::<FareQuery>())
        .and(with_store(store))
        .and_then(handlers::get_fare);

    status
        .or(create)
        .or(get)
        .or(delete)
        .or(point)
        .or(drag)
        .or(mode)
        .or(clear)
        .or(locate)
        .or(distance)
        .or(fare)
        .recover(handlers::handle_rejection)
        .with(warp::trace::request())
}
