use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::Context;

pub const SETTINGS_FILE: &str = "newsdesk.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Service answering `/news/*` for the admin panel.
    pub admin_base_url: String,
    /// Site answering `/api/*` and the server-rendered admin forms.
    pub api_base_url: String,
    pub save_reset_delay_ms: u64,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            admin_base_url: "http://127.0.0.1:8000".into(),
            api_base_url: "http://127.0.0.1:5000".into(),
            save_reset_delay_ms: 2000,
            request_timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn save_reset_delay(&self) -> Duration {
        Duration::from_millis(self.save_reset_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then the settings file (if present), then the environment.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        let file_cfg = toml::from_str::<HashMap<String, String>>(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
        if let Some(v) = file_cfg.get("admin_base_url") {
            settings.admin_base_url = v.clone();
        }
        if let Some(v) = file_cfg.get("api_base_url") {
            settings.api_base_url = v.clone();
        }
        if let Some(v) = file_cfg.get("save_reset_delay_ms") {
            settings.save_reset_delay_ms = parse_number("save_reset_delay_ms", v)?;
        }
        if let Some(v) = file_cfg.get("request_timeout_secs") {
            settings.request_timeout_secs = Some(parse_number("request_timeout_secs", v)?);
        }
    }

    if let Some(v) = env("NEWSDESK_ADMIN_BASE_URL") {
        settings.admin_base_url = v;
    }
    if let Some(v) = env("APP__ADMIN_BASE_URL") {
        settings.admin_base_url = v;
    }

    if let Some(v) = env("NEWSDESK_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = env("APP__SAVE_RESET_DELAY_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.save_reset_delay_ms = parsed;
        }
    }
    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }

    Ok(settings)
}

fn parse_number(key: &str, raw: &str) -> anyhow::Result<u64> {
    raw.trim()
        .parse::<u64>()
        .with_context(|| format!("setting '{key}' must be a whole number, got '{raw}'"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
