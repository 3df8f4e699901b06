//! Deterministic demand forecast.
//!
//! A forecast covers `[today, today + period)` and is made of three parts:
//! ranked product demand from the business profile, festival demand spikes
//! from the retail calendar, and season surges. Scores come from
//! [`stable_score`] so the same request on the same day always yields the
//! same document.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, Months, NaiveDate};
use common::calendar::CalendarFestival;
use common::forecast::{
    FestivalDemands, FestivalPoint, Forecast, ForecastRequest, ProductDemand, SeasonPoint,
    SeasonalDemands, TopItems,
};
use common::round1;
use tracing::{debug, info, instrument};

use crate::calendar::{festival_calendar, stable_score};
use crate::error::{ComputeError, Result};

pub const DEFAULT_FORECAST_PERIOD: u32 = 6;
pub const CONFIDENCE_SCORE: f64 = 0.75;

const MAX_FESTIVAL_INCREASE: u32 = 85;
const FESTIVAL_SPREAD: u32 = 12;
const CLUSTER_BOOST: u32 = 5;
const CLUSTER_INDEX_DISTANCE: usize = 2;
const CLUSTER_DAYS: i64 = 10;
const SEASON_BASE: u32 = 20;
const SEASON_SPREAD: u32 = 15;
const TOP_ITEMS: usize = 3;
const PRODUCT_COUNT: usize = 10;

fn product_pool(business_type: &str) -> &'static [&'static str] {
    match business_type {
        "Electronics Store" => &[
            "Smartphone", "Laptop", "TV", "Headphones", "Refrigerator", "Washing Machine",
            "Microwave", "Camera", "Printer", "Tablet",
        ],
        "Clothing Store" => &[
            "Shirt", "Jeans", "Saree", "T-shirt", "Jacket", "Kurta", "Dress", "Shorts", "Skirt",
            "Suit",
        ],
        "Medical Store" => &[
            "Paracetamol", "Cough Syrup", "Bandage", "Antibiotic", "Sanitizer", "Mask",
            "Thermometer", "Pain Relief Gel", "Vitamins", "Glucose",
        ],
        "Cosmetics Store" => &[
            "Lipstick", "Face Cream", "Shampoo", "Perfume", "Nail Polish", "Foundation",
            "Eyeliner", "Face Wash", "Moisturizer", "Hair Oil",
        ],
        "Food & Beverage" => &[
            "Cold Drink", "Juice", "Chips", "Chocolate", "Ice Cream", "Cookies", "Namkeen", "Cake",
            "Coffee", "Energy Drink",
        ],
        _ => &[
            "Rice", "Wheat", "Sugar", "Oil", "Milk", "Snacks", "Biscuits", "Soap", "Tea", "Salt",
            "Spices", "Lentils",
        ],
    }
}

/// Stocking advice per business type. Types without their own list get the
/// grocery list.
pub fn suggestions(business_type: &str) -> Vec<String> {
    let list: &[&str] = match business_type {
        "Electronics Store" => &[
            "Stock up on gift items before Diwali",
            "New product launches during festival season",
            "Extended warranty promotions",
            "Trade-in offers for old electronics",
        ],
        "Clothing Store" => &[
            "Festival collection launch 6 weeks early",
            "Wedding wear inventory planning",
            "Seasonal color and style preferences",
            "Size and fit optimization for regional preferences",
        ],
        _ => &[
            "Increase inventory by 60% before Diwali season",
            "Focus on essential items during monsoon",
            "Bulk purchase discounts for wedding season",
            "Seasonal vegetable and fruit planning",
        ],
    };
    list.iter().map(|s| s.to_string()).collect()
}

fn scale_factor(business_scale: &str) -> f64 {
    match business_scale {
        "Medium" => 1.2,
        _ => 1.0,
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).map(|d| d - Duration::days(1))
}

/// One season occurrence. `end` is inclusive.
#[derive(Debug, Clone, PartialEq)]
struct SeasonInterval {
    name: &'static str,
    start: NaiveDate,
    end: NaiveDate,
}

/// The five Indian retail seasons that start in December of `year`.
fn season_intervals(year: i32) -> Result<Vec<SeasonInterval>> {
    let spans: [(&'static str, i32, u32, u32); 5] = [
        ("Winter", year, 12, 2),
        ("Spring", year + 1, 3, 4),
        ("Summer", year + 1, 5, 6),
        ("Monsoon", year + 1, 7, 9),
        ("Autumn", year + 1, 10, 11),
    ];
    spans
        .into_iter()
        .map(|(name, start_year, start_month, end_month)| {
            let end_year = if end_month < start_month { start_year + 1 } else { start_year };
            let start = NaiveDate::from_ymd_opt(start_year, start_month, 1);
            let end = last_day_of_month(end_year, end_month);
            match (start, end) {
                (Some(start), Some(end)) => Ok(SeasonInterval { name, start, end }),
                _ => Err(ComputeError::Calendar(format!("{} {} has no valid bounds", name, year))),
            }
        })
        .collect()
}

/// Builds forecasts relative to a fixed "today".
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    today: NaiveDate,
}

impl ForecastEngine {
    pub fn new_with_today(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Exclusive end of a window of `period_months` starting today.
    pub fn window_end(&self, period_months: u32) -> Result<NaiveDate> {
        self.today
            .checked_add_months(Months::new(period_months))
            .ok_or_else(|| {
                ComputeError::Calendar(format!(
                    "cannot add {} months to {}",
                    period_months, self.today
                ))
            })
    }

    #[instrument(
        skip(self, request),
        fields(business_type = %request.business_type, today = %self.today)
    )]
    pub fn generate(&self, request: &ForecastRequest, period_months: u32) -> Result<Forecast> {
        if period_months == 0 {
            return Err(ComputeError::Validation(
                "Forecast period must be at least one month".to_string(),
            ));
        }
        let end = self.window_end(period_months)?;
        info!("Generating forecast from {} to {}", self.today, end);

        let product_demands = self.product_demands(request);
        let festival_demands = self.festival_demands(end)?;
        let seasonal_demands = self.seasonal_demands(end)?;

        debug!(
            "Forecast has {} festivals and {} seasons",
            festival_demands.chart.len(),
            seasonal_demands.chart.len()
        );

        Ok(Forecast {
            forecast_start: Some(self.today),
            forecast_end: Some(end),
            confidence_score: CONFIDENCE_SCORE,
            product_demands,
            festival_demands,
            seasonal_demands,
            suggestions: suggestions(&request.business_type),
        })
    }

    /// Ten products ranked by share, scaled by business size and sales.
    pub fn product_demands(&self, request: &ForecastRequest) -> Vec<ProductDemand> {
        let scale = scale_factor(&request.business_scale);
        let sales = (request.current_sales / 100_000.0).clamp(0.8, 2.0);
        product_pool(&request.business_type)
            .iter()
            .take(PRODUCT_COUNT)
            .enumerate()
            .map(|(i, product)| ProductDemand {
                product: product.to_string(),
                demand_percentage: round1((20 - i) as f64 * scale * sales),
            })
            .collect()
    }

    /// Festivals dated inside `[today, end)`, oldest first.
    fn festivals_in_window(&self, end: NaiveDate) -> Result<Vec<CalendarFestival>> {
        let mut festivals = Vec::new();
        for year in self.today.year()..=end.year() {
            let calendar = festival_calendar(year)?;
            festivals.extend(
                calendar
                    .all_festivals()
                    .filter(|f| f.date >= self.today && f.date < end)
                    .cloned(),
            );
        }
        festivals.sort_by_key(|f| f.date);
        Ok(festivals)
    }

    pub fn festival_demands(&self, end: NaiveDate) -> Result<FestivalDemands> {
        let festivals = self.festivals_in_window(end)?;
        let mut chart = Vec::with_capacity(festivals.len());
        let mut top_items = BTreeMap::new();

        for (i, festival) in festivals.iter().enumerate() {
            let boost = cluster_boost(&festivals, i);
            let key = format!("{}-{}", festival.name, festival.date.format("%Y-%m-%d"));
            let score = stable_score(&key, festival.impact.base_increase(), FESTIVAL_SPREAD);
            let demand_increase = (score + boost).min(MAX_FESTIVAL_INCREASE);

            let month = festival.date.format("%b").to_string();
            let year = festival.date.year();
            let label = format!("{} ({} {})", festival.name, month, year);

            top_items.insert(
                label.clone(),
                TopItems {
                    this_year: (1..=TOP_ITEMS)
                        .map(|n| format!("{} Item {}", festival.name, n))
                        .collect(),
                    last_year: (1..=TOP_ITEMS)
                        .map(|n| format!("{} Item {} ({})", festival.name, n, year - 1))
                        .collect(),
                },
            );
            chart.push(FestivalPoint {
                festival: label,
                demand_increase: f64::from(demand_increase),
                date: Some(festival.date),
                month,
                year: Some(year),
            });
        }

        Ok(FestivalDemands { chart, top_items })
    }

    pub fn seasonal_demands(&self, end: NaiveDate) -> Result<SeasonalDemands> {
        let mut chart = Vec::new();
        let mut top_items = BTreeMap::new();

        for base_year in (self.today.year() - 1)..=end.year() {
            for season in season_intervals(base_year)? {
                // overlap with [today, end)
                if season.start >= end || season.end < self.today {
                    continue;
                }
                let key = format!("{}-{}", season.name, season.start.format("%Y-%m-%d"));
                let surge = stable_score(&key, SEASON_BASE, SEASON_SPREAD);
                let years = if season.start.year() == season.end.year() {
                    season.start.year().to_string()
                } else {
                    format!("{}-{}", season.start.year(), season.end.year())
                };

                top_items.insert(
                    format!("{} {}", season.name, years),
                    TopItems {
                        this_year: (1..=TOP_ITEMS)
                            .map(|n| format!("{} Item {}", season.name, n))
                            .collect(),
                        last_year: (1..=TOP_ITEMS)
                            .map(|n| {
                                format!("{} Item {} ({})", season.name, n, season.start.year() - 1)
                            })
                            .collect(),
                    },
                );
                chart.push(SeasonPoint {
                    season: format!("{} ({})", season.name, season.start.format("%b %Y")),
                    start: Some(season.start),
                    end: Some(season.end),
                    demand_surge: f64::from(surge),
                });
            }
        }

        chart.sort_by_key(|s| s.start);
        Ok(SeasonalDemands { chart, top_items })
    }
}

/// +5 for every other high-impact festival at most two positions and ten
/// days away. Only high-impact festivals get boosted.
fn cluster_boost(festivals: &[CalendarFestival], index: usize) -> u32 {
    let festival = &festivals[index];
    if !festival.impact.is_high() {
        return 0;
    }
    let from = index.saturating_sub(CLUSTER_INDEX_DISTANCE);
    let to = (index + CLUSTER_INDEX_DISTANCE + 1).min(festivals.len());
    (from..to)
        .filter(|&j| j != index)
        .map(|j| &festivals[j])
        .filter(|other| other.impact.is_high())
        .filter(|other| (other.date - festival.date).num_days().abs() <= CLUSTER_DAYS)
        .count() as u32
        * CLUSTER_BOOST
}
