use map_picker::{
    config::CONFIG, location::FixedLocation, routes, session::SessionStore, telemetry,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_telemetry()?;

    let config = CONFIG.clone();
    info!("Max Post Size: {}", config.max_post_size);
    info!("Session Capacity: {}", config.session_capacity);
    info!("Session Idle Timeout: {:?}", config.session_idle);
    match config.default_location {
        Some(point) => info!("Default Location: {},{}", point.lat(), point.lng()),
        None => info!("Default Location: none"),
    }

    let store = SessionStore::new(config.session_capacity, config.session_idle);
    let provider = FixedLocation::new(config.default_location);
    let api = routes::routes(store, provider, config.clone());

    info!("Listening on {}:{}", config.bind, config.port);
    warp::serve(api).run((config.bind, config.port)).await;

    Ok(())
}
