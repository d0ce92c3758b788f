//! Logging integration for the django-rs REST framework crates.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-serializer spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level` (e.g. "debug",
/// "django_rs_serializers=trace"). In debug mode a pretty, human-readable
/// format is used; otherwise a structured JSON format is used. Installing a
/// second subscriber is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span covering the construction of a serializer's fields.
///
/// # Examples
///
/// ```
/// use django_rs_core::logging::serializer_span;
///
/// let span = serializer_span("blog.article");
/// let _guard = span.enter();
/// tracing::debug!("building fields");
/// ```
pub fn serializer_span(model_label: &str) -> tracing::Span {
    tracing::debug_span!("serializer", model = model_label)
}
