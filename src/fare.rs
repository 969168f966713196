use serde::Serialize;

use crate::haversine::round_km;

/// Pricing of one delivery sector: a base price covering the first
/// `free_distance_km`, then a per-kilometre fee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareRule {
    pub sector: String,
    pub base_price: f64,
    pub fee_per_km: f64,
    pub free_distance_km: f64,
}

impl Default for FareRule {
    fn default() -> Self {
        Self {
            sector: String::from("standard"),
            base_price: 50.0,
            fee_per_km: 10.0,
            free_distance_km: 5.0,
        }
    }
}

impl FareRule {
    fn new(sector: &str, base_price: f64, fee_per_km: f64) -> Self {
        Self {
            sector: sector.to_string(),
            base_price,
            fee_per_km,
            ..Self::default()
        }
    }

    /// Built-in rule for `sector`, falling back to the standard pricing.
    pub fn for_sector(sector: &str) -> Self {
        match sector {
            "premium" => Self::new("premium", 100.0, 10.0),
            "express" => Self::new("express", 150.0, 15.0),
            "fragile" => Self::new("fragile", 120.0, 12.0),
            "medical" => Self::new("medical", 200.0, 20.0),
            _ => Self::default(),
        }
    }

    /// Quotes a fare from a full precision distance.
    pub fn quote(&self, distance_km: f64) -> FareQuote {
        let extra_km = (distance_km - self.free_distance_km).max(0.0);
        let extra_fee = extra_km * self.fee_per_km;
        FareQuote {
            sector: self.sector.clone(),
            distance_km: round_km(distance_km),
            base_price: self.base_price,
            extra_km: round_km(extra_km),
            extra_fee: round_km(extra_fee),
            total: round_km(self.base_price + extra_fee),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareQuote {
    pub sector: String,
    pub distance_km: f64,
    pub base_price: f64,
    pub extra_km: f64,
    pub extra_fee: f64,
    pub total: f64,
}
