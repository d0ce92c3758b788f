//! Settings for the django-rs REST framework layer.
//!
//! [`Settings`] holds the framework configuration and [`LazySettings`] is a
//! globally-accessible, lazily-initialized instance of it. The
//! [`RestFrameworkSettings`] section mirrors the `REST_FRAMEWORK` dictionary
//! of a Django project and controls how serializer fields are derived from
//! model fields.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// Options consumed by the serializer field builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestFrameworkSettings {
    /// Format of the view name used for hyperlinked relations.
    ///
    /// `{model_name}` is replaced with the lowercased model name and
    /// `{app_label}` with the model's application label.
    pub view_name_format: String,
    /// The name of the identity field added to hyperlinked serializers.
    pub url_field_name: String,
    /// Whether relations are built as hyperlinks instead of primary keys.
    pub hyperlinked: bool,
}

impl Default for RestFrameworkSettings {
    fn default() -> Self {
        Self {
            view_name_format: "{model_name}-detail".to_string(),
            url_field_name: "url".to_string(),
            hyperlinked: false,
        }
    }
}

/// The complete set of framework settings.
///
/// # Examples
///
/// ```
/// use django_rs_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.rest_framework.view_name_format, "{model_name}-detail");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Whether debug mode is enabled.
    pub debug: bool,
    /// The log level filter (e.g. "info", "django_rs_serializers=trace").
    pub log_level: String,
    /// Serializer options.
    pub rest_framework: RestFrameworkSettings,
    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            rest_framework: RestFrameworkSettings::default(),
            extra: HashMap::new(),
        }
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup, then use
/// [`get`](LazySettings::get) to access the settings. Code that must work
/// without configuration uses [`get_or_default`](LazySettings::get_or_default).
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings. Must be called exactly once.
    ///
    /// # Panics
    ///
    /// Panics if settings have already been configured.
    pub fn configure(&self, settings: Settings) {
        self.inner
            .set(settings)
            .expect("Settings have already been configured");
    }

    /// Returns a reference to the configured settings.
    ///
    /// # Panics
    ///
    /// Panics if settings have not been configured.
    pub fn get(&self) -> &Settings {
        self.inner
            .get()
            .expect("Settings have not been configured. Call SETTINGS.configure() first.")
    }

    /// Returns the configured settings, initializing them with defaults if
    /// nothing was configured.
    pub fn get_or_default(&self) -> &Settings {
        self.inner.get_or_init(Settings::default)
    }

    /// Returns `true` if settings have been configured.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(s.debug);
        assert_eq!(s.log_level, "info");
        assert!(s.extra.is_empty());
    }

    #[test]
    fn test_default_rest_framework() {
        let rf = RestFrameworkSettings::default();
        assert_eq!(rf.view_name_format, "{model_name}-detail");
        assert_eq!(rf.url_field_name, "url");
        assert!(!rf.hyperlinked);
    }

    #[test]
    fn test_lazy_settings_configure_and_get() {
        let lazy = LazySettings::new();
        assert!(!lazy.is_configured());

        let mut settings = Settings::default();
        settings.debug = false;
        settings.rest_framework.hyperlinked = true;

        lazy.configure(settings);
        assert!(lazy.is_configured());
        assert!(!lazy.get().debug);
        assert!(lazy.get().rest_framework.hyperlinked);
    }

    #[test]
    fn test_lazy_settings_get_or_default() {
        let lazy = LazySettings::new();
        assert_eq!(lazy.get_or_default().log_level, "info");
        assert!(lazy.is_configured());
    }

    #[test]
    #[should_panic(expected = "already been configured")]
    fn test_lazy_settings_double_configure_panics() {
        let lazy = LazySettings::new();
        lazy.configure(Settings::default());
        lazy.configure(Settings::default());
    }

    #[test]
    #[should_panic(expected = "not been configured")]
    fn test_lazy_settings_get_before_configure_panics() {
        let lazy = LazySettings::new();
        let _ = lazy.get();
    }
}
