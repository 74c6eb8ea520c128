use std::{collections::HashMap, fs, path::Path, time::Duration};

use shared::domain::PLACEHOLDER_IMAGE;
use tracing::warn;

pub const DEFAULT_SETTINGS_FILE: &str = "post_form.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    /// Run the required-field checks before handing a draft to the sink.
    pub enforce_validation: bool,
    /// How long the "created" acknowledgment stays up after a submit.
    pub success_notice_ms: u64,
    pub placeholder_image: String,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            enforce_validation: true,
            success_notice_ms: 3000,
            placeholder_image: PLACEHOLDER_IMAGE.into(),
        }
    }
}

impl FormSettings {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn loose() -> Self {
        Self {
            enforce_validation: false,
            ..Self::default()
        }
    }

    pub fn success_notice(&self) -> Duration {
        Duration::from_millis(self.success_notice_ms)
    }
}

/// Reads `path` (or `post_form.toml` in the working directory) and then
/// applies environment overrides. Missing files and bad values fall back to
/// the previous value.
pub fn load_settings(path: Option<&Path>) -> FormSettings {
    let mut settings = FormSettings::default();

    let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => apply_file_values(&mut settings, &file_cfg),
            Err(err) => warn!(path = %path.display(), %err, "ignoring unparsable settings file"),
        }
    }

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn apply_file_values(settings: &mut FormSettings, file_cfg: &HashMap<String, toml::Value>) {
    if let Some(v) = file_cfg.get("enforce_validation") {
        match v {
            toml::Value::Boolean(b) => settings.enforce_validation = *b,
            toml::Value::String(s) => set_bool(&mut settings.enforce_validation, "enforce_validation", s),
            other => warn!(value = %other, "enforce_validation must be a boolean"),
        }
    }
    if let Some(v) = file_cfg.get("success_notice_ms") {
        match v {
            toml::Value::Integer(ms) if *ms >= 0 => settings.success_notice_ms = *ms as u64,
            toml::Value::String(s) => set_millis(&mut settings.success_notice_ms, s),
            other => warn!(value = %other, "success_notice_ms must be a non-negative integer"),
        }
    }
    if let Some(toml::Value::String(v)) = file_cfg.get("placeholder_image") {
        settings.placeholder_image = v.clone();
    }
}

fn apply_env_overrides(settings: &mut FormSettings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("POST_FORM_ENFORCE_VALIDATION") {
        set_bool(&mut settings.enforce_validation, "POST_FORM_ENFORCE_VALIDATION", &v);
    }
    if let Some(v) = var("APP__ENFORCE_VALIDATION") {
        set_bool(&mut settings.enforce_validation, "APP__ENFORCE_VALIDATION", &v);
    }
    if let Some(v) = var("APP__SUCCESS_NOTICE_MS") {
        set_millis(&mut settings.success_notice_ms, &v);
    }
    if let Some(v) = var("APP__PLACEHOLDER_IMAGE") {
        if !v.trim().is_empty() {
            settings.placeholder_image = v;
        }
    }
}

fn set_bool(slot: &mut bool, name: &str, raw: &str) {
    match parse_flag(raw) {
        Some(value) => *slot = value,
        None => warn!(setting = name, raw, "expected a boolean flag, keeping {}", slot),
    }
}

fn set_millis(slot: &mut u64, raw: &str) {
    match raw.trim().parse::<u64>() {
        Ok(ms) => *slot = ms,
        Err(_) => warn!(raw, "expected milliseconds, keeping {}", slot),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
