use chrono::{DateTime, NaiveDateTime, Utc};
use http::uri::Uri;

use crate::{Error, Result};

/// Normalize an API base URL: default the scheme to `http://` when absent
/// and strip any trailing slash so paths can be appended verbatim.
pub fn clean_base_url(url: &str) -> Result<String> {
    let url = if url.starts_with("http://") || url.starts_with("https://") {
        url
    } else {
        &format!("http://{url}")
    };

    let parsed: Uri = url.parse()?;
    let Some(authority) = parsed.authority() else {
        return Err(Error::Server(format!("base URL {url} must have an authority")));
    };
    let Some(scheme) = parsed.scheme_str() else {
        return Err(Error::Server(format!("base URL {url} must have a scheme")));
    };

    let cleaned = format!("{scheme}://{authority}{path}", path = parsed.path());
    Ok(cleaned.trim_end_matches('/').to_owned())
}

/// Parse a user-entered date-time into a UTC instant.
///
/// Form inputs produce minute-precision local strings (`2024-01-01T00:00`);
/// these are taken as UTC and completed with seconds, matching the query
/// API's wire format. Full RFC 3339 strings pass through unchanged.
pub fn parse_user_datetime(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Ok(datetime.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }

    Err(Error::InvalidTimestamp(input.to_string()))
}
