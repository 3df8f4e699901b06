use axum::{http::StatusCode, response::Json};
use chrono::{NaiveDate, NaiveDateTime};
use common::calendar::{
    BusinessPattern, CalendarFestival, FestivalCalendar, FestivalSeason, Impact, MonsoonImpact,
    SeasonalPatterns, ShoppingSeason,
};
use common::forecast::{
    FestivalDemands, FestivalPoint, Forecast, ForecastHistoryEntry, ForecastRecord, ForecastRequest,
    ProductDemand, SeasonPoint, SeasonalDemands, TopItems,
};
use common::inventory::{
    CategorySummary, CategoryValue, CreateInventoryItemRequest, InventoryAnalytics, InventoryItem,
    StockStatus, UpdateInventoryItemRequest,
};
use common::logistics::{
    CreateShipmentRequest, LocationPair, LogisticsAnalytics, ModeScore, NewsItem, PerformanceTrends,
    PreciseAnalysis, Priority, ProviderComparison, ProviderQuote, RiskLevel, RouteNews,
    RouteOptimization, RouteSavings, RouteStop, RouteWeather, RouteWeatherAnalysis,
    RouteWeatherSample, Shipment, ShipmentItem, ShipmentStatus, ShipmentTracking,
    ShipmentWeatherAnalysis, StatusHistoryEntry, StatusUpdateRequest, TrackingInfo, TransportMode,
    TrendWindow, WeatherReport,
};
use common::reports::{
    CategoryTotal, ExecutiveSummary, ForecastAccuracyReport, GenerateReportRequest, InventoryReport,
    LogisticsReport, MonthlyAccuracy, RegionalPerformance, ReportKind, ReportReceipt, SalesPoint,
    SalesReport, ShipmentStatusCounts, StockStatusCounts,
};
use common::scenario::{
    CompareRequest, CompetitorAction, CompetitorLandscape, ImpactRange, ScenarioBreakdown,
    ScenarioComparison, ScenarioInsights, ScenarioParameters, ScenarioRequest, ScenarioResult,
    ScenarioTemplate,
};
use common::BusinessTypesResponse;
use compute::error::ComputeError;
use compute::weather::WeatherProvider;
use moka::future::Cache;
use sea_orm::{DatabaseConnection, DbErr};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};

use crate::config::AppConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for festival calendars and weather lookups
    pub cache: Cache<String, CachedData>,
    pub config: Arc<AppConfig>,
    pub weather: Arc<dyn WeatherProvider>,
    /// Pinned "today" for the date-dependent engines. `None` uses the clock.
    pub today: Option<NaiveDate>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("today", &self.today)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Current time, or noon of the pinned day.
    pub fn now(&self) -> NaiveDateTime {
        match self.today.and_then(|day| day.and_hms_opt(12, 0, 0)) {
            Some(noon) => noon,
            None => compute::local_now(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    FestivalCalendar(FestivalCalendar),
    Weather(WeatherReport),
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Json<Self> {
        Json(Self {
            data,
            message: message.into(),
            success: true,
        })
    }
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Rejection returned by every handler.
pub type HandlerError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

pub fn database_error(context: &str, e: DbErr) -> HandlerError {
    error!("{}: {}", context, e);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR", context)
}

/// Maps domain errors to HTTP statuses.
pub fn compute_error(e: ComputeError) -> HandlerError {
    match e {
        ComputeError::Validation(message) => {
            error_response(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
        }
        ComputeError::NotFound(message) => {
            error_response(StatusCode::NOT_FOUND, "NOT_FOUND", message)
        }
        ComputeError::Database(e) => database_error("Database operation failed", e),
        ComputeError::Weather(message) => {
            error!("Weather provider failed: {}", message);
            error_response(StatusCode::BAD_GATEWAY, "WEATHER_UNAVAILABLE", message)
        }
        ComputeError::Calendar(message) => {
            error!("Calendar computation failed: {}", message);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "CALENDAR_ERROR", message)
        }
    }
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Service banner returned by `GET /`
#[derive(Serialize, Deserialize, ToSchema)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    /// Path of the interactive API documentation
    pub docs: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::root,
        crate::handlers::health::health_check,
        crate::handlers::demand::create_forecast,
        crate::handlers::demand::get_forecast,
        crate::handlers::demand::get_forecast_history,
        crate::handlers::demand::get_business_types,
        crate::handlers::demand::get_seasonal_patterns,
        crate::handlers::demand::get_festival_calendar,
        crate::handlers::inventory::get_inventory,
        crate::handlers::inventory::create_inventory_item,
        crate::handlers::inventory::update_inventory_item,
        crate::handlers::inventory::delete_inventory_item,
        crate::handlers::inventory::get_low_stock,
        crate::handlers::inventory::get_inventory_analytics,
        crate::handlers::logistics::shipments::get_shipments,
        crate::handlers::logistics::shipments::create_shipment,
        crate::handlers::logistics::shipments::get_shipment,
        crate::handlers::logistics::shipments::update_shipment_status,
        crate::handlers::logistics::shipments::get_shipment_tracking,
        crate::handlers::logistics::shipments::get_logistics_analytics,
        crate::handlers::logistics::routes::optimize_routes,
        crate::handlers::logistics::routes::compare_providers,
        crate::handlers::logistics::routes::precise_analysis,
        crate::handlers::logistics::weather::get_weather,
        crate::handlers::logistics::weather::get_route_weather,
        crate::handlers::logistics::weather::route_weather_analysis,
        crate::handlers::logistics::weather::shipment_weather_analysis,
        crate::handlers::logistics::weather::get_route_news,
        crate::handlers::scenarios::analyze_scenario,
        crate::handlers::scenarios::get_templates,
        crate::handlers::scenarios::compare_scenarios,
        crate::handlers::scenarios::get_insights,
        crate::handlers::reports::get_executive_summary,
        crate::handlers::reports::get_sales_report,
        crate::handlers::reports::get_inventory_report,
        crate::handlers::reports::get_forecast_accuracy_report,
        crate::handlers::reports::get_logistics_report,
        crate::handlers::reports::generate_report,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            RootResponse,
            ApiResponse<ForecastRecord>,
            ForecastRequest,
            ForecastRecord,
            Forecast,
            ProductDemand,
            FestivalDemands,
            FestivalPoint,
            SeasonalDemands,
            SeasonPoint,
            TopItems,
            ForecastHistoryEntry,
            BusinessTypesResponse,
            FestivalCalendar,
            CalendarFestival,
            ShoppingSeason,
            Impact,
            SeasonalPatterns,
            MonsoonImpact,
            FestivalSeason,
            BusinessPattern,
            InventoryItem,
            StockStatus,
            CreateInventoryItemRequest,
            UpdateInventoryItemRequest,
            InventoryAnalytics,
            CategorySummary,
            CategoryValue,
            Shipment,
            ShipmentStatus,
            ShipmentItem,
            TransportMode,
            Priority,
            TrackingInfo,
            StatusHistoryEntry,
            CreateShipmentRequest,
            StatusUpdateRequest,
            ShipmentTracking,
            LocationPair,
            RouteOptimization,
            RouteSavings,
            RouteStop,
            ProviderComparison,
            ProviderQuote,
            PreciseAnalysis,
            ModeScore,
            WeatherReport,
            RouteWeather,
            RouteWeatherSample,
            RouteWeatherAnalysis,
            ShipmentWeatherAnalysis,
            RiskLevel,
            RouteNews,
            NewsItem,
            LogisticsAnalytics,
            PerformanceTrends,
            TrendWindow,
            ScenarioRequest,
            ScenarioResult,
            ScenarioBreakdown,
            ScenarioTemplate,
            ScenarioParameters,
            CompetitorAction,
            CompareRequest,
            ScenarioComparison,
            ImpactRange,
            ScenarioInsights,
            CompetitorLandscape,
            ReportKind,
            ExecutiveSummary,
            SalesReport,
            SalesPoint,
            InventoryReport,
            StockStatusCounts,
            CategoryTotal,
            ForecastAccuracyReport,
            MonthlyAccuracy,
            LogisticsReport,
            ShipmentStatusCounts,
            RegionalPerformance,
            GenerateReportRequest,
            ReportReceipt,
        )
    ),
    tags(
        (name = "health", description = "Service status endpoints"),
        (
            name = "demand",
            description = "Demand forecasting, festival calendar and seasonal patterns"
        ),
        (name = "inventory", description = "Inventory items, stock alerts and analytics"),
        (name = "logistics", description = "Shipments, routes, carriers and route weather"),
        (name = "scenarios", description = "What-if sales scenarios"),
        (name = "reports", description = "Business reports"),
    ),
    info(
        title = "AI Supply Chain Management Platform",
        description = "Demand forecasting, inventory and logistics API for Indian MSMEs",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
