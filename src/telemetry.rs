use tracing::info;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan, prelude::*};

pub fn init_telemetry() -> Result<(), Box<dyn std::error::Error>> {
    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_ansi(true)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    // RUST_LOG wins; otherwise info for this crate and warn for everything else.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,map_picker=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| format!("Failed to initialize tracing: {}", e))?;

    info!("Tracing initialized");
    Ok(())
}
