//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use serde::Serialize;

use super::config::config;

/// Get the base URL for API requests
///
/// Uses `api.base_url` from the configuration when set, otherwise the current
/// window location with the configured backend port.
///
/// # Returns
/// - API base URL like "http://localhost:8000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let api = &config().api;
    if !api.base_url.trim().is_empty() {
        return api.base_url.trim().trim_end_matches('/').to_string();
    }

    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, api.port)
}

/// Build a full API URL from a path
///
/// # Example
/// ```ignore
/// let url = api_url("/api/masterfile/details");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Percent-encode one path segment (filenames may contain spaces or slashes).
pub fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Append a query string built from `query`; nothing is appended when it is empty.
pub fn with_query<Q: Serialize>(path: &str, query: &Q) -> String {
    match serde_qs::to_string(query) {
        Ok(qs) if !qs.is_empty() => format!("{}?{}", path, qs),
        Ok(_) => path.to_string(),
        Err(e) => {
            log::warn!("Failed to encode query for {}: {}", path, e);
            path.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Serialize)]
    struct RangeQuery {
        #[serde(skip_serializing_if = "Option::is_none")]
        start_date: Option<NaiveDate>,
        #[serde(skip_serializing_if = "Option::is_none")]
        end_date: Option<NaiveDate>,
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("Prices 2024/Q1.xlsx"), "Prices%202024%2FQ1.xlsx");
        assert_eq!(segment("42"), "42");
    }

    #[test]
    fn test_with_query() {
        let query = RangeQuery {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: None,
        };
        assert_eq!(
            with_query("/api/storeorders/analytics/1/2", &query),
            "/api/storeorders/analytics/1/2?start_date=2024-01-01"
        );

        let empty = RangeQuery {
            start_date: None,
            end_date: None,
        };
        assert_eq!(with_query("/x", &empty), "/x");
    }
}
