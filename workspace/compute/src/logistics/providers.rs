//! Carrier quotes and per-mode route analysis.

use common::logistics::{
    ModeScore, PreciseAnalysis, ProviderComparison, ProviderQuote, TransportMode,
};
use common::{round1, round2};
use tracing::{debug, instrument};

use super::geo::distance_km;
use crate::error::{ComputeError, Result};

/// Anything that can quote a time and price for a distance.
pub trait ProviderAdapter: Send + Sync {
    fn name(&self) -> &str;

    fn mode(&self) -> TransportMode;

    fn quote(&self, distance_km: f64) -> ProviderQuote;
}

/// A carrier priced from fixed speed, per-km rate and handling time.
#[derive(Debug, Clone, PartialEq)]
pub struct RateCardProvider {
    pub name: String,
    pub mode: TransportMode,
    pub speed_kmh: f64,
    pub cost_per_km: f64,
    pub handling_hours: f64,
}

pub const HANDLING_COST_PER_HOUR: f64 = 50.0;
pub const BOOKING_FEE: f64 = 200.0;
/// Freight surcharge on the shipment weight.
pub const COST_PER_KG: f64 = 15.0;

impl RateCardProvider {
    pub fn new(
        name: &str,
        mode: TransportMode,
        speed_kmh: f64,
        cost_per_km: f64,
        handling_hours: f64,
    ) -> Self {
        Self { name: name.to_string(), mode, speed_kmh, cost_per_km, handling_hours }
    }

    pub fn hours(&self, distance_km: f64) -> f64 {
        round1(distance_km / self.speed_kmh + self.handling_hours)
    }

    pub fn cost(&self, distance_km: f64) -> f64 {
        let handling = self.handling_hours * HANDLING_COST_PER_HOUR;
        round2(distance_km * self.cost_per_km + handling + BOOKING_FEE)
    }
}

impl ProviderAdapter for RateCardProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn mode(&self) -> TransportMode {
        self.mode
    }

    fn quote(&self, distance_km: f64) -> ProviderQuote {
        ProviderQuote {
            provider: self.name.clone(),
            mode: self.mode,
            estimated_time_hours: self.hours(distance_km),
            estimated_cost: self.cost(distance_km),
            notes: format!("rate card {}", self.name),
        }
    }
}

/// One carrier per transport mode.
pub fn default_providers() -> Vec<Box<dyn ProviderAdapter>> {
    vec![
        Box::new(RateCardProvider::new("FastShip", TransportMode::Air, 800.0, 12.0, 2.0)),
        Box::new(RateCardProvider::new("EcoRoad", TransportMode::Road, 60.0, 6.0, 6.0)),
        Box::new(RateCardProvider::new("RailLink", TransportMode::Rail, 70.0, 5.0, 6.0)),
        Box::new(RateCardProvider::new("SeaCargo", TransportMode::Sea, 30.0, 3.0, 12.0)),
    ]
}

/// Asks every provider for a quote between two places.
#[instrument(skip(providers), fields(num_providers = providers.len()))]
pub fn compare_providers(
    providers: &[Box<dyn ProviderAdapter>],
    origin: &str,
    destination: &str,
) -> ProviderComparison {
    let distance = distance_km(origin, destination);
    let quotes: Vec<ProviderQuote> = providers.iter().map(|p| p.quote(distance)).collect();

    let cheapest = quotes
        .iter()
        .min_by(|a, b| a.estimated_cost.total_cmp(&b.estimated_cost))
        .map(|q| q.provider.clone());
    let fastest = quotes
        .iter()
        .min_by(|a, b| a.estimated_time_hours.total_cmp(&b.estimated_time_hours))
        .map(|q| q.provider.clone());
    debug!("Quoted {} providers over {} km", quotes.len(), distance);

    ProviderComparison {
        origin: origin.to_string(),
        destination: destination.to_string(),
        distance_km: distance,
        providers: quotes,
        cheapest,
        fastest,
    }
}

/// Duration and cost of a shipment for every mode, plus the best overall.
///
/// Modes are scored on a 0 to 100 scale, half for speed and half for price,
/// relative to the fastest and cheapest mode.
#[instrument(skip(providers))]
pub fn precise_analysis(
    providers: &[Box<dyn ProviderAdapter>],
    origin: &str,
    destination: &str,
    mode: TransportMode,
    weight_kg: f64,
) -> Result<PreciseAnalysis> {
    if weight_kg.is_nan() || weight_kg <= 0.0 {
        return Err(ComputeError::Validation("Weight must be positive".to_string()));
    }
    let distance = distance_km(origin, destination);
    let surcharge = weight_kg * COST_PER_KG;

    let quotes: Vec<ProviderQuote> = providers.iter().map(|p| p.quote(distance)).collect();
    let selected = quotes
        .iter()
        .find(|q| q.mode == mode)
        .ok_or_else(|| ComputeError::NotFound(format!("No provider for mode {}", mode.as_str())))?;

    let min_hours = quotes.iter().map(|q| q.estimated_time_hours).fold(f64::INFINITY, f64::min);
    let min_cost = quotes
        .iter()
        .map(|q| q.estimated_cost + surcharge)
        .fold(f64::INFINITY, f64::min);

    let mode_scores: Vec<ModeScore> = quotes
        .iter()
        .map(|q| {
            let cost = round2(q.estimated_cost + surcharge);
            let speed = if q.estimated_time_hours > 0.0 {
                min_hours / q.estimated_time_hours
            } else {
                1.0
            };
            let price = if cost > 0.0 { min_cost / cost } else { 1.0 };
            ModeScore {
                mode: q.mode,
                duration_hours: q.estimated_time_hours,
                cost,
                score: round1((speed * 0.5 + price * 0.5) * 100.0),
            }
        })
        .collect();

    let recommended_mode = mode_scores
        .iter()
        .fold(None, |best: Option<&ModeScore>, s| match best {
            Some(b) if b.score >= s.score => Some(b),
            _ => Some(s),
        })
        .map(|s| s.mode)
        .unwrap_or(mode);

    Ok(PreciseAnalysis {
        origin: origin.to_string(),
        destination: destination.to_string(),
        distance_km: distance,
        transport_mode: mode,
        weight_kg,
        duration_hours: selected.estimated_time_hours,
        cost: round2(selected.estimated_cost + surcharge),
        recommended_mode,
        mode_scores,
    })
}
