//! Settings loading from configuration files.
//!
//! Loads [`Settings`] from TOML or JSON and applies environment variable
//! overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `DJANGO_DEBUG` | `debug` |
//! | `DJANGO_LOG_LEVEL` | `log_level` |
//! | `DJANGO_REST_VIEW_NAME_FORMAT` | `rest_framework.view_name_format` |
//! | `DJANGO_REST_URL_FIELD_NAME` | `rest_framework.url_field_name` |
//! | `DJANGO_REST_HYPERLINKED` | `rest_framework.hyperlinked` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use django_rs_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/settings.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::DjangoError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Any settings not present in the TOML keep their default values.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, DjangoError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| DjangoError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;
    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, DjangoError> {
    from_toml_str(&read_config(path.as_ref(), "TOML")?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, DjangoError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<Settings, DjangoError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| DjangoError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;
    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, DjangoError> {
    from_json_str(&read_config(path.as_ref(), "JSON")?)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// Boolean variables accept "true", "1" and "yes" (case-insensitive) as true;
/// anything else is false.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("DJANGO_DEBUG") {
        settings.debug = parse_bool(&val);
    }

    if let Ok(val) = std::env::var("DJANGO_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("DJANGO_REST_VIEW_NAME_FORMAT") {
        settings.rest_framework.view_name_format = val;
    }

    if let Ok(val) = std::env::var("DJANGO_REST_URL_FIELD_NAME") {
        settings.rest_framework.url_field_name = val;
    }

    if let Ok(val) = std::env::var("DJANGO_REST_HYPERLINKED") {
        settings.rest_framework.hyperlinked = parse_bool(&val);
    }
}

// ============================================================
// Helpers
// ============================================================

fn parse_bool(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn read_config(path: &Path, format: &str) -> Result<String, DjangoError> {
    std::fs::read_to_string(path).map_err(|e| {
        DjangoError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

/// Deserializes `overrides` on top of the serialized default settings.
fn merge_over_defaults(
    overrides: serde_json::Value,
    format: &str,
) -> Result<Settings, DjangoError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        DjangoError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, overrides);
    serde_json::from_value(merged).map_err(|e| {
        DjangoError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = false
            log_level = "debug"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.rest_framework.url_field_name, "url");
    }

    #[test]
    fn test_from_toml_str_rest_framework_section() {
        let toml = r#"
            [rest_framework]
            view_name_format = "{app_label}:{model_name}-detail"
            hyperlinked = true
        "#;

        let settings = from_toml_str(toml).unwrap();
        let rf = &settings.rest_framework;
        assert_eq!(rf.view_name_format, "{app_label}:{model_name}-detail");
        assert!(rf.hyperlinked);
        // Keys missing from the section keep their defaults.
        assert_eq!(rf.url_field_name, "url");
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert!(settings.debug);
        assert_eq!(settings.rest_framework.view_name_format, "{model_name}-detail");
    }

    #[test]
    fn test_from_toml_str_extra() {
        let toml = r#"
            [extra]
            page_size = 25
        "#;
        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.extra.get("page_size"), Some(&serde_json::json!(25)));
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("debug = [");
        assert!(matches!(result, Err(DjangoError::ConfigurationError(_))));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let result = from_toml_str("debug = \"sometimes\"");
        assert!(matches!(result, Err(DjangoError::ConfigurationError(_))));
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{"debug": false, "rest_framework": {"url_field_name": "href"}}"#;
        let settings = from_json_str(json).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.rest_framework.url_field_name, "href");
        assert_eq!(settings.rest_framework.view_name_format, "{model_name}-detail");
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{not json").is_err());
    }

    // ── Files ───────────────────────────────────────────────────────

    #[test]
    fn test_from_toml_file() {
        let dir = std::env::temp_dir().join("django_rs_rest_test_toml");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        std::fs::write(&path, "[rest_framework]\nhyperlinked = true\n").unwrap();

        let settings = from_toml_file(&path).unwrap();
        assert!(settings.rest_framework.hyperlinked);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_from_json_file() {
        let dir = std::env::temp_dir().join("django_rs_rest_test_json");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        std::fs::write(&path, r#"{"log_level": "warn"}"#).unwrap();

        let settings = from_json_file(&path).unwrap();
        assert_eq!(settings.log_level, "warn");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_from_toml_file_missing() {
        let result = from_toml_file("/nonexistent/settings.toml");
        assert!(matches!(result, Err(DjangoError::ConfigurationError(_))));
    }

    // ── Environment overrides ───────────────────────────────────────

    #[test]
    fn test_apply_env_overrides_view_name_format() {
        let mut settings = Settings::default();
        std::env::set_var("DJANGO_REST_VIEW_NAME_FORMAT", "api:{model_name}-detail");
        apply_env_overrides(&mut settings);
        assert_eq!(
            settings.rest_framework.view_name_format,
            "api:{model_name}-detail"
        );
        std::env::remove_var("DJANGO_REST_VIEW_NAME_FORMAT");
    }

    #[test]
    fn test_apply_env_overrides_hyperlinked() {
        let mut settings = Settings::default();
        std::env::set_var("DJANGO_REST_HYPERLINKED", "YES");
        apply_env_overrides(&mut settings);
        assert!(settings.rest_framework.hyperlinked);
        std::env::remove_var("DJANGO_REST_HYPERLINKED");
    }

    #[test]
    fn test_apply_env_overrides_url_field_name() {
        let mut settings = Settings::default();
        std::env::set_var("DJANGO_REST_URL_FIELD_NAME", "self");
        apply_env_overrides(&mut settings);
        assert_eq!(settings.rest_framework.url_field_name, "self");
        std::env::remove_var("DJANGO_REST_URL_FIELD_NAME");
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("1"));
        assert!(parse_bool("Yes"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"a": {"b": 1, "c": 2}});
        let over = serde_json::json!({"a": {"c": 3}});
        let merged = merge_json(base, over);
        assert_eq!(merged, serde_json::json!({"a": {"b": 1, "c": 3}}));
    }
}
