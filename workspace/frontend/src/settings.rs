use log::Level;
use wasm_bindgen::JsValue;
use web_sys::window;

/// Global application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Backend API host (e.g., "localhost" or "api.example.com")
    pub api_host: String,

    /// Backend API port
    pub api_port: u16,

    /// API path prefix
    pub api_path: String,

    /// Use HTTPS for API requests
    pub api_use_https: bool,

    /// Default log level for the application
    pub log_level: Level,

    /// Enable debug mode
    pub debug_mode: bool,

    /// Toast notification duration in milliseconds
    pub toast_duration_ms: u32,

    /// Rows requested from the forecast history endpoint
    pub history_limit: u32,

    /// Requests still pending after this many milliseconds are abandoned
    pub request_timeout_ms: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_host: "localhost".to_string(),
            api_port: 8000,
            api_path: "/api".to_string(),
            api_use_https: false,
            log_level: Level::Info,
            debug_mode: false,
            toast_duration_ms: 5000,
            history_limit: 10,
            request_timeout_ms: 30_000,
        }
    }
}

impl AppSettings {
    /// Create settings from the window location and localStorage overrides
    pub fn from_environment() -> Self {
        let mut settings = Self::default();

        let Some(window) = window() else {
            return settings;
        };

        if let Ok(hostname) = window.location().hostname() {
            settings.debug_mode = hostname == "localhost" || hostname == "127.0.0.1";
            if settings.debug_mode {
                settings.log_level = Level::Debug;
            }
        }

        if let Ok(Some(storage)) = window.local_storage() {
            let read = |key: &str| storage.get_item(key).ok().flatten();
            settings.apply_overrides(read);
        }

        settings
    }

    /// Applies every stored override that parses. Unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, read: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_host) = read("supplychain_api_host") {
            self.api_host = api_host;
        }
        if let Some(port) = read("supplychain_api_port").and_then(|p| p.parse::<u16>().ok()) {
            self.api_port = port;
        }
        if let Some(api_path) = read("supplychain_api_path") {
            self.api_path = api_path;
        }
        if let Some(use_https) = read("supplychain_api_use_https") {
            self.api_use_https = use_https.eq_ignore_ascii_case("true");
        }
        if let Some(log_level) = read("supplychain_log_level") {
            self.log_level = match log_level.to_lowercase().as_str() {
                "error" => Level::Error,
                "warn" => Level::Warn,
                "info" => Level::Info,
                "debug" => Level::Debug,
                "trace" => Level::Trace,
                _ => self.log_level,
            };
        }
        if let Some(limit) = read("supplychain_history_limit").and_then(|l| l.parse::<u32>().ok()) {
            self.history_limit = limit.clamp(1, 100);
        }
        let timeout = read("supplychain_request_timeout_ms").and_then(|t| t.parse::<u32>().ok());
        if let Some(timeout) = timeout {
            self.request_timeout_ms = timeout.clamp(1_000, 300_000);
        }
    }

    /// Save settings to localStorage
    pub fn save_to_storage(&self) -> Result<(), JsValue> {
        if let Some(window) = window() {
            if let Some(storage) = window.local_storage()? {
                storage.set_item("supplychain_api_host", &self.api_host)?;
                storage.set_item("supplychain_api_port", &self.api_port.to_string())?;
                storage.set_item("supplychain_api_path", &self.api_path)?;
                storage.set_item("supplychain_api_use_https", &self.api_use_https.to_string())?;
                let log_level = self.log_level.to_string().to_lowercase();
                storage.set_item("supplychain_log_level", &log_level)?;
                storage.set_item("supplychain_history_limit", &self.history_limit.to_string())?;
                let timeout = self.request_timeout_ms.to_string();
                storage.set_item("supplychain_request_timeout_ms", &timeout)?;
            }
        }
        Ok(())
    }

    /// Protocol, host, port and path prefix of the backend API
    pub fn api_base_url(&self) -> String {
        let protocol = if self.api_use_https { "https" } else { "http" };
        format!("{}://{}:{}{}", protocol, self.api_host, self.api_port, self.api_path)
    }

    /// Get the full API URL for an endpoint
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.api_base_url(), endpoint)
    }
}

use std::cell::RefCell;

thread_local! {
    static SETTINGS: RefCell<AppSettings> = RefCell::new(AppSettings::default());
}

/// Get a copy of the current settings
pub fn get_settings() -> AppSettings {
    SETTINGS.with(|s| s.borrow().clone())
}

/// Update the global settings
pub fn update_settings<F>(f: F)
where
    F: FnOnce(&mut AppSettings),
{
    SETTINGS.with(|s| f(&mut s.borrow_mut()));
}

/// Initialize settings (call this at app startup)
pub fn init_settings() {
    SETTINGS.with(|s| {
        *s.borrow_mut() = AppSettings::from_environment();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_api_url() {
        let settings = AppSettings::default();
        assert_eq!(settings.api_base_url(), "http://localhost:8000/api");
        assert_eq!(settings.api_url("/inventory/"), "http://localhost:8000/api/inventory/");
    }

    #[test]
    fn test_overrides_ignore_bad_values() {
        let stored: HashMap<&str, &str> = [
            ("supplychain_api_host", "api.example.com"),
            ("supplychain_api_port", "not-a-port"),
            ("supplychain_api_use_https", "TRUE"),
            ("supplychain_log_level", "verbose"),
            ("supplychain_history_limit", "500"),
        ]
        .into_iter()
        .collect();

        let mut settings = AppSettings::default();
        settings.apply_overrides(|key| stored.get(key).map(|v| v.to_string()));

        assert_eq!(settings.api_base_url(), "https://api.example.com:8000/api");
        assert_eq!(settings.log_level, Level::Info);
        assert_eq!(settings.history_limit, 100);
    }

    #[test]
    fn test_request_timeout_override() {
        fn stored(value: &'static str) -> impl Fn(&str) -> Option<String> {
            move |key| (key == "supplychain_request_timeout_ms").then(|| value.to_string())
        }

        let mut settings = AppSettings::default();
        assert_eq!(settings.request_timeout_ms, 30_000);

        settings.apply_overrides(stored("12000"));
        assert_eq!(settings.request_timeout_ms, 12_000);

        settings.apply_overrides(stored("5"));
        assert_eq!(settings.request_timeout_ms, 1_000);

        settings.apply_overrides(stored("soon"));
        assert_eq!(settings.request_timeout_ms, 1_000);
    }

    #[test]
    fn test_update_settings() {
        update_settings(|s| s.api_port = 9000);
        assert_eq!(get_settings().api_port, 9000);
    }
}
