//! Helpers shared by the adapters to map provider fields onto `Article`

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Parse a provider timestamp, falling back to `now` when it is missing or unreadable.
///
/// Accepts RFC 3339, RFC 2822 and the naive `YYYY-MM-DD HH:MM:SS` /
/// `YYYY-MM-DDTHH:MM:SS` forms (read as UTC).
pub fn normalize_timestamp(raw: Option<&str>, now: DateTime<Utc>) -> DateTime<Utc> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(parse_timestamp)
        .unwrap_or(now)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Trimmed value, or `None` when missing or blank
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Pull a list of provider records out of a JSON payload.
///
/// A missing or non-array field yields an empty list, and individual
/// records that do not fit `T` are skipped.
pub fn extract_list<T: DeserializeOwned>(payload: &Value, field: &str, provider: &str) -> Vec<T> {
    let Some(items) = payload.get(field).and_then(Value::as_array) else {
        debug!("{} payload has no '{}' list, treating as empty", provider, field);
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<T>(item.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("Skipping malformed {} record: {}", provider, e);
                None
            }
        })
        .collect()
}

/// Strip HTML tags from text
pub fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    // Clean up whitespace and HTML entities (`&amp;` last, so escaped entities stay escaped)
    result
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract image URL from HTML content (finds first <img src="...">)
pub fn extract_image_from_html(html: &str) -> Option<String> {
    let img_pattern = regex::Regex::new(r#"<img[^>]+src=["']([^"']+)["']"#).ok()?;
    let url = img_pattern.captures(html)?.get(1)?.as_str().to_string();
    // Skip tiny tracking pixels and icons
    if url.contains("1x1") || url.contains("pixel") || url.contains("spacer") {
        return None;
    }
    Some(url)
}
