//! The fixed lambda library, invoked with section syntax only
//! (`{{#lower}}...{{/lower}}`).

use chrono::{TimeZone, Utc};

/// Returns the rendered replacement for `body` under lambda `name`, or
/// `None` if `name` does not name a lambda (the caller then falls back to
/// ordinary dotted-path section semantics).
#[must_use]
pub fn apply(name: &str, body: &str) -> Option<String> {
    Some(match name {
        "lower" => body.to_lowercase(),
        "upper" => body.to_uppercase(),
        "trim" => body.trim().to_string(),
        "first" => prefix_alnum(body).to_string(),
        "firstLower" => prefix_alnum(body).to_lowercase(),
        "firstUpper" => prefix_alnum(body).to_uppercase(),
        "last" => suffix_alnum(body).to_string(),
        "lastLower" => suffix_alnum(body).to_lowercase(),
        "lastUpper" => suffix_alnum(body).to_uppercase(),
        "sanitize" => sanitize(body),
        "sanitizeLower" => sanitize(body).to_lowercase(),
        "sanitizeUpper" => sanitize(body).to_uppercase(),
        "short5" => short(body, 5),
        "short6" => short(body, 6),
        "short7" => short(body, 7),
        "timestampISO8601" => timestamp_iso8601(body),
        "timestampYYYYMMDDHHMMSS" => timestamp_compact(body),
        "environment.user" => std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_default(),
        "environment.variable" => std::env::var(body.trim()).unwrap_or_default(),
        "file.content" => std::fs::read_to_string(body.trim()).unwrap_or_default(),
        "file.exists" => std::path::Path::new(body.trim()).exists().to_string(),
        _ => return None,
    })
}

/// The prefix up to (not including) the first non-alphanumeric character.
fn prefix_alnum(s: &str) -> &str {
    let end = s.find(|c: char| !c.is_alphanumeric()).unwrap_or(s.len());
    &s[..end]
}

/// The suffix after (not including) the last non-alphanumeric character.
fn suffix_alnum(s: &str) -> &str {
    let start = s.rfind(|c: char| !c.is_alphanumeric()).map_or(0, |i| i + 1);
    &s[start..]
}

fn sanitize(s: &str) -> String {
    s.chars().filter(|c| c.is_alphanumeric()).collect()
}

fn short(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

fn timestamp_iso8601(body: &str) -> String {
    parse_epoch_ms(body)
        .map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
        .unwrap_or_default()
}

fn timestamp_compact(body: &str) -> String {
    parse_epoch_ms(body)
        .map(|dt| dt.format("%Y%m%d%H%M%S").to_string())
        .unwrap_or_default()
}

fn parse_epoch_ms(body: &str) -> Option<chrono::DateTime<Utc>> {
    let ms: i64 = body.trim().parse().ok()?;
    Utc.timestamp_millis_opt(ms).single()
}
