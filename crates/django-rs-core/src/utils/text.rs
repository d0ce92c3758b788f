//! String utility functions.
//!
//! These mirror the Django text helpers the serializer layer relies on to
//! derive human-readable labels: `capfirst`, `str.capitalize` and
//! `camel_case_to_spaces`.

use regex::Regex;
use std::sync::OnceLock;

/// Capitalizes the first character of a string, leaving the rest untouched.
///
/// # Examples
///
/// ```
/// use django_rs_core::utils::text::capfirst;
///
/// assert_eq!(capfirst("hello"), "Hello");
/// assert_eq!(capfirst(""), "");
/// assert_eq!(capfirst("HELLO"), "HELLO");
/// ```
pub fn capfirst(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |c| {
        let mut result = c.to_uppercase().to_string();
        result.extend(chars);
        result
    })
}

/// Uppercases the first character and lowercases the remainder.
///
/// # Examples
///
/// ```
/// use django_rs_core::utils::text::capitalize;
///
/// assert_eq!(capitalize("first NAME"), "First name");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |c| {
        let mut result = c.to_uppercase().to_string();
        result.extend(chars.flat_map(char::to_lowercase));
        result
    })
}

/// Derives the label a field gets when no verbose name is given.
///
/// Underscores become spaces and the result is capitalized.
///
/// # Examples
///
/// ```
/// use django_rs_core::utils::text::label_from_field_name;
///
/// assert_eq!(label_from_field_name("date_of_birth"), "Date of birth");
/// ```
pub fn label_from_field_name(field_name: &str) -> String {
    capitalize(&field_name.replace('_', " "))
}

/// Splits a `CamelCase` name into lowercase, space-separated words.
///
/// # Examples
///
/// ```
/// use django_rs_core::utils::text::camel_case_to_spaces;
///
/// assert_eq!(camel_case_to_spaces("BlogPost"), "blog post");
/// ```
pub fn camel_case_to_spaces(s: &str) -> String {
    static WORD_START: OnceLock<Regex> = OnceLock::new();
    static LOWER_UPPER: OnceLock<Regex> = OnceLock::new();

    let word_start = WORD_START.get_or_init(|| Regex::new(r"(.)([A-Z][a-z]+)").unwrap());
    let lower_upper = LOWER_UPPER.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());

    let s = word_start.replace_all(s, "$1 $2");
    let s = lower_upper.replace_all(&s, "$1 $2");
    s.trim().to_lowercase()
}
