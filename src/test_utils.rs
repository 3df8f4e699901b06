use crate::config::AppConfig;
use crate::router::create_router;
use crate::schemas::AppState;
use axum::Router;
use axum_test::TestServer;
use chrono::NaiveDate;
use compute::weather::BuiltinWeather;
use migration::{Migrator, MigratorTrait};
use moka::future::Cache;
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Day every date-dependent engine sees during tests.
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 14).unwrap()
}

/// Create an in-memory SQLite database with the schema and seed data
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

/// Create AppState for testing, pinned to [`test_today`] with the built-in weather
pub async fn setup_test_app_state() -> AppState {
    setup_test_app_state_with(AppConfig::default()).await
}

/// Same as [`setup_test_app_state`] with the given settings. The database
/// is always a fresh in-memory one.
pub async fn setup_test_app_state_with(config: AppConfig) -> AppState {
    let config = AppConfig {
        database_url: "sqlite::memory:".to_string(),
        ..config
    };
    AppState {
        db: setup_test_db().await,
        cache: Cache::new(100),
        weather: Arc::new(BuiltinWeather::new_with_today(test_today())),
        today: Some(test_today()),
        config: Arc::new(config),
    }
}

/// Tracing for tests, written to stderr at the level named by RUST_LOG
/// (WARN when unset).
fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse::<Level>().ok())
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

/// Create axum app for testing
pub async fn setup_test_app() -> Router {
    let _guard = init_test_tracing();
    create_router(setup_test_app_state().await)
}

pub async fn setup_test_server() -> TestServer {
    TestServer::new(setup_test_app().await).expect("Failed to start test server")
}

pub async fn setup_test_server_with(config: AppConfig) -> TestServer {
    let _guard = init_test_tracing();
    let app = create_router(setup_test_app_state_with(config).await);
    TestServer::new(app).expect("Failed to start test server")
}
