//! Data-format predicates backing the named field tests.
//!
//! Every predicate trims and lowercases where the format is case-insensitive
//! and returns `false` for the empty string; "empty is fine" is decided by
//! the field test, not here.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use regex::Regex;
use serde_json::Value;

static EMAIL_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$")
        .expect("static pattern")
});

static WEB_DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$")
        .expect("static pattern")
});

static WEB_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}(?::\d{1,5})?(?:[/?#]\S*)?$",
    )
    .expect("static pattern")
});

static FILE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^gs://[a-z0-9][a-z0-9._-]{1,220}[a-z0-9](?:/\S*)?$").expect("static pattern")
});

const GCS_SCHEME: &str = "gs://";
const GCS_HTTP_HOST: &str = "https://storage.googleapis.com/";

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn utc_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// ISO-8601 UTC timestamp (`Z` suffix) or bare `YYYY-MM-DD` date.
pub fn is_utc_date(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | ':' | '.' | 'T' | 'Z'))
    {
        return false;
    }
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => dt.offset().local_minus_utc() == 0,
        Err(_) => NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok(),
    }
}

/// `YYYY-MM-DD` by segment length only.
pub fn is_date_ymd(s: &str) -> bool {
    let mut parts = s.trim().split('-');
    matches!(
        (parts.next(), parts.next(), parts.next(), parts.next()),
        (Some(y), Some(m), Some(d), None) if y.len() == 4 && m.len() == 2 && d.len() == 2
    )
}

pub fn is_email_address(s: &str) -> bool {
    EMAIL_ADDRESS.is_match(&s.trim().to_lowercase())
}

/// Bare domain name: no scheme and no path.
pub fn is_web_domain(s: &str) -> bool {
    let cleaned = s.trim().to_lowercase();
    !cleaned.contains("://") && !cleaned.contains('/') && WEB_DOMAIN.is_match(&cleaned)
}

/// `http(s)` URL. `gs://` paths are accepted through their HTTP form.
pub fn is_web_url(s: &str) -> bool {
    let trimmed = s.trim();
    let rewritten = match trimmed.strip_prefix(GCS_SCHEME) {
        Some(rest) => format!("{}{}", GCS_HTTP_HOST, rest),
        None => trimmed.to_string(),
    };
    WEB_URL.is_match(&rewritten.to_lowercase())
}

/// Cloud storage bucket path, e.g. `gs://bucket/file`.
pub fn is_file_path(s: &str) -> bool {
    FILE_PATH.is_match(&s.trim().to_lowercase())
}

pub fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(n) => {
            n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn utc_now_has_millisecond_precision() {
        let now = utc_now();
        assert!(now.ends_with('Z'));
        assert_eq!(now.len(), "2020-01-01T00:00:00.000Z".len());
        assert!(is_utc_date(&now));
    }

    #[test]
    fn utc_dates() {
        assert!(is_utc_date("2020-01-01T00:00:00.000Z"));
        assert!(is_utc_date("2020-01-01"));
        assert!(!is_utc_date("2020-01-01T00:00:00+02:00"));
        assert!(!is_utc_date("2020-01-01T00:00:00-05:00"));
        assert!(!is_utc_date("yesterday"));
        assert!(!is_utc_date(""));
        assert!(!is_utc_date("2020-13-01"));
    }

    #[test]
    fn ymd_dates() {
        assert!(is_date_ymd("2020-01-31"));
        assert!(!is_date_ymd("2020-1-31"));
        assert!(!is_date_ymd("2020-01-31-01"));
    }

    #[test]
    fn email_addresses() {
        assert!(is_email_address("john@example.com"));
        assert!(is_email_address(" John.Doe+tag@Mail.Example.org "));
        assert!(!is_email_address("john@"));
        assert!(!is_email_address("john.example.com"));
        assert!(!is_email_address("john@example"));
    }

    #[test]
    fn domains_and_urls() {
        assert!(is_web_domain("example.com"));
        assert!(is_web_domain("sub.Example.co.uk"));
        assert!(!is_web_domain("https://example.com"));
        assert!(!is_web_domain("example.com/path"));

        assert!(is_web_url("https://example.com"));
        assert!(is_web_url("http://example.com:8080/a?b=c"));
        assert!(is_web_url("gs://bucket/file.png"));
        assert!(!is_web_url("example.com"));
        assert!(!is_web_url("ftp://example.com"));
    }

    #[test]
    fn file_paths() {
        assert!(is_file_path("gs://bucket/file"));
        assert!(!is_file_path("https://bucket/file"));
    }

    #[test]
    fn integers() {
        assert!(is_integer(&json!(3)));
        assert!(is_integer(&json!(-3)));
        assert!(is_integer(&json!(2.0)));
        assert!(!is_integer(&json!(2.5)));
        assert!(!is_integer(&json!("3")));
    }
}
