//! ConfigMap key rules

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length of a ConfigMap key
pub const MAX_KEY_LENGTH: usize = 253;

static KEY_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-._a-zA-Z0-9]+$").expect("valid regex"));

/// Whether `key` may be used as a ConfigMap key
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_KEY_LENGTH
        && KEY_CHARS.is_match(key)
        && key != "."
        && !key.starts_with("..")
}
