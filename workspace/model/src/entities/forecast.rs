use chrono::{NaiveDate, NaiveDateTime};
use common::forecast::{Forecast, ForecastHistoryEntry, ForecastRecord, ForecastRequest};
use sea_orm::entity::prelude::*;
use tracing::warn;

/// A generated demand forecast together with the request that produced it.
/// The forecast document itself is kept as JSON in `payload`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "forecasts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub business_name: Option<String>,
    pub business_type: String,
    pub business_scale: String,
    pub location: String,
    pub current_sales: f64,
    /// Months covered, counted from `forecast_start`.
    pub forecast_period: i32,
    pub forecast_start: NaiveDate,
    /// Exclusive.
    pub forecast_end: NaiveDate,
    pub payload: Json,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Parses the stored document. Anything unreadable becomes an empty forecast.
    pub fn forecast(&self) -> Forecast {
        match serde_json::from_value(self.payload.clone()) {
            Ok(forecast) => forecast,
            Err(e) => {
                warn!(id = self.id, "Stored forecast payload is unreadable: {}", e);
                Forecast::default()
            }
        }
    }

    pub fn request(&self) -> ForecastRequest {
        ForecastRequest {
            business_name: self.business_name.clone(),
            business_type: self.business_type.clone(),
            business_scale: self.business_scale.clone(),
            location: self.location.clone(),
            current_sales: self.current_sales,
            forecast_period: u32::try_from(self.forecast_period).ok(),
        }
    }

    pub fn history_entry(&self) -> ForecastHistoryEntry {
        let forecast = self.forecast();
        ForecastHistoryEntry {
            id: self.id,
            business_name: self.business_name.clone(),
            business_type: self.business_type.clone(),
            business_scale: self.business_scale.clone(),
            location: self.location.clone(),
            forecast_period: u32::try_from(self.forecast_period).unwrap_or(0),
            forecast_start: self.forecast_start,
            forecast_end: self.forecast_end,
            created_at: self.created_at,
            festival_count: forecast.festival_demands.chart.len(),
            peak_festival: forecast.peak_festival().map(|f| f.festival.clone()),
        }
    }
}

impl From<Model> for ForecastRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            request: model.request(),
            forecast: model.forecast(),
        }
    }
}
