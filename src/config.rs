// src/config.rs

use byte_unit::Byte;
use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::{env, net::Ipv4Addr, time::Duration};

use crate::types::GeoPoint;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind: Ipv4Addr,
    pub max_post_size: Byte,
    pub session_capacity: u64,
    pub session_idle: Duration,
    pub default_location: Option<GeoPoint>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            bind: Ipv4Addr::new(0, 0, 0, 0),
            max_post_size: Byte::from_u64(16 * 1000),
            session_capacity: 10_000,
            session_idle: Duration::from_secs(1800),
            default_location: None,
        }
    }
}

impl Config {
    /// Reads the environment, keeping the default for anything missing or
    /// malformed.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key/value source.
    pub fn from_lookup<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        // Both halves are needed, and the pair has to be a valid point.
        let lat = var("DEFAULT_LAT").and_then(|s| s.parse::<f64>().ok());
        let lng = var("DEFAULT_LNG").and_then(|s| s.parse::<f64>().ok());
        let default_location = match (lat, lng) {
            (Some(lat), Some(lng)) => GeoPoint::new(lat, lng).ok(),
            _ => None,
        };

        Config {
            port: var("PORT")
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(defaults.port),
            bind: var("BIND")
                .and_then(|s| s.parse::<Ipv4Addr>().ok())
                .unwrap_or(defaults.bind),
            max_post_size: var("MAX_POST_SIZE")
                .and_then(|s| Byte::parse_str(s, true).ok())
                .unwrap_or(defaults.max_post_size),
            session_capacity: var("SESSION_CAPACITY")
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(defaults.session_capacity),
            session_idle: var("SESSION_IDLE_SECS")
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_idle),
            default_location,
        }
    }
}

// Initialize dotenv and config only once
pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Loads .env (only the first time it's called)
    Config::from_env()
});
