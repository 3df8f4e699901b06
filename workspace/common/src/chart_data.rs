//! Chart-ready projections of a [`Forecast`].
//!
//! Three datasets are derived from one forecast:
//!
//! * a bar series with one bar per festival occurrence,
//! * a pie series with one slice per season,
//! * a weekly pair of seasonal/festival intensity lines over the forecast
//!   window, clamped to `[0, 100]` and smoothed with a centred moving average
//!   of width 3.
//!
//! The weekly lines are only produced for a non-empty window.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::forecast::{FestivalPoint, Forecast, SeasonPoint};

const BUCKET_DAYS: i64 = 7;
const INTENSITY_MAX: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LabeledSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl LabeledSeries {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Weekly intensity lines over the forecast window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct WeeklyIntensity {
    /// First day of every bucket.
    pub week_starts: Vec<NaiveDate>,
    pub seasonal_raw: Vec<f64>,
    pub festival_raw: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub festival: Vec<f64>,
    /// Per-week minimum of the two smoothed lines. High where both effects
    /// coincide.
    pub coordination: Vec<f64>,
}

impl WeeklyIntensity {
    pub fn len(&self) -> usize {
        self.week_starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.week_starts.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChartData {
    pub festival_bars: LabeledSeries,
    pub seasonal_pie: LabeledSeries,
    pub weekly: Option<WeeklyIntensity>,
}

/// Derives every chart dataset for a forecast.
pub fn derive_chart_data(forecast: &Forecast) -> ChartData {
    let festivals = &forecast.festival_demands.chart;
    let seasons = &forecast.seasonal_demands.chart;

    let festival_bars = LabeledSeries {
        labels: festivals.iter().map(|f| f.festival.clone()).collect(),
        values: festivals.iter().map(|f| f.demand_increase).collect(),
    };
    let seasonal_pie = LabeledSeries {
        labels: seasons.iter().map(|s| s.season.clone()).collect(),
        values: seasons.iter().map(|s| s.demand_surge).collect(),
    };

    let weekly = match (forecast.forecast_start, forecast.forecast_end) {
        (Some(start), Some(end)) => weekly_intensity(start, end, seasons, festivals),
        _ => None,
    };

    tracing::debug!(
        festivals = festival_bars.values.len(),
        seasons = seasonal_pie.values.len(),
        weeks = weekly.as_ref().map(WeeklyIntensity::len).unwrap_or(0),
        "derived forecast chart data"
    );

    ChartData {
        festival_bars,
        seasonal_pie,
        weekly,
    }
}

/// Buckets `[start, end)` into 7-day weeks. The last week may be shorter.
///
/// Returns `None` when the window is empty or reversed.
pub fn weekly_intensity(
    start: NaiveDate,
    end: NaiveDate,
    seasons: &[SeasonPoint],
    festivals: &[FestivalPoint],
) -> Option<WeeklyIntensity> {
    if start >= end {
        return None;
    }

    let mut week_starts = Vec::new();
    let mut seasonal_raw = Vec::new();
    let mut festival_raw = Vec::new();

    let mut bucket_start = start;
    while bucket_start < end {
        let bucket_end = (bucket_start + Duration::days(BUCKET_DAYS)).min(end);
        let last_day = bucket_end - Duration::days(1);

        let seasonal = seasons
            .iter()
            .filter_map(|s| match (s.start, s.end) {
                (Some(s_start), Some(s_end)) if s_start <= last_day && s_end >= bucket_start => {
                    Some(s.demand_surge)
                }
                _ => None,
            })
            .fold(0.0_f64, f64::max);

        let festival: f64 = festivals
            .iter()
            .filter(|f| matches!(f.date, Some(d) if d >= bucket_start && d < bucket_end))
            .map(|f| f.demand_increase)
            .sum();

        week_starts.push(bucket_start);
        seasonal_raw.push(clamp_intensity(seasonal));
        festival_raw.push(clamp_intensity(festival));
        bucket_start = bucket_end;
    }

    let seasonal = smooth(&seasonal_raw);
    let festival = smooth(&festival_raw);
    let coordination = seasonal
        .iter()
        .zip(&festival)
        .map(|(s, f)| s.min(*f))
        .collect();

    Some(WeeklyIntensity {
        week_starts,
        seasonal_raw,
        festival_raw,
        seasonal,
        festival,
        coordination,
    })
}

/// Centred moving average of width 3. Edge points average the neighbours
/// that exist.
pub fn smooth(values: &[f64]) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            let lo = i.saturating_sub(1);
            let hi = (i + 1).min(values.len() - 1);
            let window = &values[lo..=hi];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect()
}

fn clamp_intensity(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, INTENSITY_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{FestivalDemands, SeasonalDemands};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn season(name: &str, start: NaiveDate, end: NaiveDate, surge: f64) -> SeasonPoint {
        SeasonPoint {
            season: name.to_string(),
            start: Some(start),
            end: Some(end),
            demand_surge: surge,
        }
    }

    fn festival(name: &str, on: NaiveDate, increase: f64) -> FestivalPoint {
        FestivalPoint {
            festival: name.to_string(),
            demand_increase: increase,
            date: Some(on),
            month: on.format("%b").to_string(),
            year: Some(2025),
        }
    }

    #[test]
    fn test_season_inside_second_week() {
        let seasons = vec![season("Mid", date(2025, 1, 8), date(2025, 1, 14), 80.0)];
        let weekly = weekly_intensity(date(2025, 1, 1), date(2025, 1, 22), &seasons, &[]).unwrap();

        assert_eq!(weekly.len(), 3);
        assert_eq!(weekly.week_starts[1], date(2025, 1, 8));
        assert_eq!(weekly.seasonal_raw, vec![0.0, 80.0, 0.0]);
        assert_eq!(weekly.seasonal[0], 40.0);
        assert!((weekly.seasonal[1] - 80.0 / 3.0).abs() < 1e-9);
        assert_eq!(weekly.seasonal[2], 40.0);
    }

    #[test]
    fn test_festival_sum_is_clamped() {
        let festivals = vec![festival("Mega", date(2025, 1, 3), 150.0)];
        let (start, end) = (date(2025, 1, 1), date(2025, 1, 22));
        let weekly = weekly_intensity(start, end, &[], &festivals).unwrap();
        assert_eq!(weekly.festival_raw, vec![100.0, 0.0, 0.0]);
    }

    #[test]
    fn test_festivals_in_same_week_add_up() {
        let festivals = vec![
            festival("Lohri", date(2025, 1, 13), 30.0),
            festival("Pongal", date(2025, 1, 14), 45.0),
        ];
        let (start, end) = (date(2025, 1, 1), date(2025, 1, 22));
        let weekly = weekly_intensity(start, end, &[], &festivals).unwrap();
        assert_eq!(weekly.festival_raw, vec![0.0, 75.0, 0.0]);
    }

    #[test]
    fn test_seasonal_takes_maximum_of_overlaps() {
        let seasons = vec![
            season("Winter", date(2024, 12, 1), date(2025, 1, 10), 30.0),
            season("Spring", date(2025, 1, 9), date(2025, 2, 28), 55.0),
        ];
        let weekly = weekly_intensity(date(2025, 1, 1), date(2025, 1, 15), &seasons, &[]).unwrap();
        assert_eq!(weekly.seasonal_raw, vec![30.0, 55.0]);
    }

    #[test]
    fn test_last_bucket_may_be_partial() {
        let festivals = vec![festival("Edge", date(2025, 1, 9), 20.0)];
        let (start, end) = (date(2025, 1, 1), date(2025, 1, 10));
        let weekly = weekly_intensity(start, end, &[], &festivals).unwrap();
        assert_eq!(weekly.week_starts, vec![date(2025, 1, 1), date(2025, 1, 8)]);
        assert_eq!(weekly.festival_raw, vec![0.0, 20.0]);
    }

    #[test]
    fn test_festival_on_end_date_is_outside_window() {
        let festivals = vec![festival("Late", date(2025, 1, 22), 40.0)];
        let (start, end) = (date(2025, 1, 1), date(2025, 1, 22));
        let weekly = weekly_intensity(start, end, &[], &festivals).unwrap();
        assert!(weekly.festival_raw.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_empty_lists_give_zero_series() {
        let weekly = weekly_intensity(date(2025, 1, 1), date(2025, 2, 1), &[], &[]).unwrap();
        assert_eq!(weekly.len(), 5);
        assert!(weekly.seasonal.iter().all(|v| *v == 0.0));
        assert!(weekly.festival.iter().all(|v| *v == 0.0));
        assert!(weekly.coordination.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_zero_length_window_disables_weekly() {
        assert!(weekly_intensity(date(2025, 1, 1), date(2025, 1, 1), &[], &[]).is_none());
        assert!(weekly_intensity(date(2025, 2, 1), date(2025, 1, 1), &[], &[]).is_none());
    }

    #[test]
    fn test_coordination_is_minimum_of_smoothed() {
        let seasons = vec![season("Autumn", date(2025, 1, 1), date(2025, 1, 21), 40.0)];
        let festivals = vec![festival("Diwali", date(2025, 1, 9), 90.0)];
        let weekly =
            weekly_intensity(date(2025, 1, 1), date(2025, 1, 22), &seasons, &festivals).unwrap();
        for i in 0..weekly.len() {
            assert_eq!(weekly.coordination[i], weekly.seasonal[i].min(weekly.festival[i]));
        }
        assert_eq!(weekly.coordination[1], 30.0);
    }

    #[test]
    fn test_smooth_single_and_pair() {
        assert_eq!(smooth(&[]), Vec::<f64>::new());
        assert_eq!(smooth(&[9.0]), vec![9.0]);
        assert_eq!(smooth(&[0.0, 10.0]), vec![5.0, 5.0]);
    }

    #[test]
    fn test_empty_festival_chart_gives_empty_bars() {
        let forecast = Forecast {
            forecast_start: Some(date(2025, 1, 1)),
            forecast_end: Some(date(2025, 3, 1)),
            festival_demands: FestivalDemands::default(),
            seasonal_demands: SeasonalDemands {
                chart: vec![season("Winter", date(2024, 12, 1), date(2025, 2, 28), 25.0)],
                ..Default::default()
            },
            ..Default::default()
        };
        let charts = derive_chart_data(&forecast);
        assert!(charts.festival_bars.is_empty());
        assert!(charts.festival_bars.labels.is_empty());
        assert_eq!(charts.seasonal_pie.values, vec![25.0]);
        assert!(charts.weekly.is_some());
    }

    #[test]
    fn test_missing_dates_skip_weekly_but_keep_bars() {
        let forecast = Forecast {
            festival_demands: FestivalDemands {
                chart: vec![festival("Holi", date(2025, 3, 14), 27.0)],
                ..Default::default()
            },
            ..Default::default()
        };
        let charts = derive_chart_data(&forecast);
        assert!(charts.weekly.is_none());
        assert_eq!(charts.festival_bars.labels, vec!["Holi".to_string()]);
    }

    #[test]
    fn test_derive_from_malformed_json() {
        let forecast: Forecast = serde_json::from_value(serde_json::json!({
            "forecast_start": "2025-01-01",
            "forecast_end": "2025-01-22",
            "festival_demands": "oops",
            "seasonal_demands": {"chart": [{"season": "Winter", "start": "bad"}]}
        }))
        .unwrap();
        let charts = derive_chart_data(&forecast);
        assert!(charts.festival_bars.is_empty());
        let weekly = charts.weekly.unwrap();
        assert!(weekly.seasonal_raw.iter().all(|v| *v == 0.0));
    }
}
