//! Common utilities and helper functions

pub mod error;

use regex::Regex;
use std::sync::LazyLock;

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*\s\x00-\x1f]"#).expect("valid filename regex"));

/// Make a competition slug safe to use as a file name stem
///
/// Path separators, reserved characters and whitespace become `_`. A stem
/// that would be empty or made only of dots becomes `competition`.
pub fn file_stem(slug: &str) -> String {
    let stem = UNSAFE_FILENAME_CHARS.replace_all(slug.trim(), "_").to_string();

    if stem.chars().all(|c| c == '.') {
        String::from("competition")
    } else {
        stem
    }
}

/// Format byte size as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return String::from("0 B");
    }

    let base: f64 = 1024.0;
    let exponent = ((bytes as f64).log(base).floor() as usize).min(UNITS.len() - 1);
    if exponent == 0 {
        return format!("{bytes} B");
    }

    let value = bytes as f64 / base.powi(exponent as i32);
    format!("{value:.2} {}", UNITS[exponent])
}
