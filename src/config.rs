use crate::error::{config_error, env_error, DeskResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use toml;

/// Backend address used when `API_URL` is not set
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Login gate password used when `APP_PASSWORD` is not set
pub const DEFAULT_APP_PASSWORD: &str = "123456";

/// Backend user whose tasks and memos are shown
pub const DEFAULT_USER: &str = "default_user";

/// Component names, in the order they appear on the dashboard
pub const COMPONENT_NAMES: [&str; 4] = ["calendar", "tasks", "memos", "briefing"];

const COMPONENTS_FILE: &str = "config/components.toml";

/// Main configuration structure for the dashboard client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the dashboard backend
    pub api_url: String,
    /// Password checked by the login gate (plaintext, not a security boundary)
    pub app_password: String,
    /// Backend user id for tasks and memos
    pub user_id: String,
    /// Timezone that decides what "today" is
    pub timezone: String,
    /// Message catalog locale
    pub locale: String,
    /// Map of component names to their enabled status
    pub components: HashMap<String, bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            app_password: DEFAULT_APP_PASSWORD.to_string(),
            user_id: DEFAULT_USER.to_string(),
            timezone: "Asia/Seoul".to_string(),
            locale: "ko".to_string(),
            components: default_components(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> DeskResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let defaults = Config::default();

        let api_url = env::var("API_URL").unwrap_or(defaults.api_url);
        let app_password = env::var("APP_PASSWORD").unwrap_or(defaults.app_password);
        let user_id = env::var("DASHBOARD_USER").unwrap_or(defaults.user_id);
        let timezone = env::var("TIMEZONE").unwrap_or(defaults.timezone);
        let locale = env::var("DASHBOARD_LOCALE").unwrap_or(defaults.locale);

        // Reject a timezone chrono-tz does not know before anything uses it
        if timezone.parse::<Tz>().is_err() {
            return Err(env_error("TIMEZONE"));
        }

        let mut components = defaults.components;

        // Load components configuration from file if it exists
        if let Ok(content) = fs::read_to_string(COMPONENTS_FILE) {
            merge_components(&mut components, &content)?;
        }

        Ok(Config {
            api_url,
            app_password,
            user_id,
            timezone,
            locale,
            components,
        })
    }

    /// Parsed timezone, falling back to UTC for values that slipped past `load`
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or(Tz::UTC)
    }

    /// Check if a component is enabled
    pub fn is_component_enabled(&self, name: &str) -> bool {
        *self.components.get(name).unwrap_or(&false)
    }

    /// Update component enabled status
    pub fn set_component_enabled(&mut self, name: &str, enabled: bool) -> DeskResult<()> {
        if !COMPONENT_NAMES.contains(&name) {
            return Err(config_error(&format!("Unknown component: {}", name)));
        }
        self.components.insert(name.to_string(), enabled);
        self.save_components()
    }

    /// Save component configuration to file
    fn save_components(&self) -> DeskResult<()> {
        // Create config directory if it doesn't exist
        if !Path::new("config").exists() {
            fs::create_dir("config")?;
        }

        let toml_str = toml::to_string(&self.components)?;
        fs::write(COMPONENTS_FILE, toml_str)?;

        Ok(())
    }
}

fn default_components() -> HashMap<String, bool> {
    COMPONENT_NAMES
        .iter()
        .map(|name| (name.to_string(), true))
        .collect()
}

/// Merge a components.toml document over the defaults
fn merge_components(components: &mut HashMap<String, bool>, content: &str) -> DeskResult<()> {
    let file_components = toml::from_str::<HashMap<String, bool>>(content)?;
    for (key, value) in file_components {
        components.insert(key, value);
    }
    Ok(())
}
