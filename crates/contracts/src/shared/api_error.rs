use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Error taxonomy for every backend call.
///
/// `Display` is the user-facing text; pages render `err.to_string()` as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No response was received (DNS, CORS, connection refused...)
    #[error("Cannot connect to server. Please check your connection and try again.")]
    Network(String),

    /// HTTP 401. The client has already cleared the token and redirected.
    #[error("Authentication failed. Please log in again.")]
    Unauthorized,

    /// Any other non-2xx status, carrying the backend `detail` message.
    #[error("{detail}")]
    Http { status: u16, detail: String },

    /// Client-side validation blocked the request before it was sent.
    #[error("{0}")]
    Validation(String),

    /// The response arrived but did not match the expected shape.
    #[error("Unexpected response from server: {0}")]
    Payload(String),

    /// Multi-source load where not a single source succeeded.
    #[error("All {total} sources failed to load: {first}")]
    AllSourcesFailed { total: usize, first: Box<ApiError> },
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

impl ApiError {
    /// Build an error from a non-2xx status and the raw response body.
    pub fn from_status(status: u16, body: &str) -> Self {
        if status == 401 {
            return Self::Unauthorized;
        }
        let detail = extract_detail(body)
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        Self::Http { status, detail }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::String(_) | Value::Null => None,
        // Field validation errors come back as a list of {loc, msg} objects
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_is_surfaced_verbatim() {
        let err = ApiError::from_status(404, r#"{"detail":"Master file not found"}"#);
        assert_eq!(
            err,
            ApiError::Http {
                status: 404,
                detail: "Master file not found".to_string()
            }
        );
        assert_eq!(err.to_string(), "Master file not found");
    }

    #[test]
    fn test_missing_detail_falls_back() {
        let err = ApiError::from_status(500, "<html>Internal Server Error</html>");
        assert_eq!(err.to_string(), "Request failed with status 500");

        let err = ApiError::from_status(400, r#"{"detail":""}"#);
        assert_eq!(err.to_string(), "Request failed with status 400");
    }

    #[test]
    fn test_validation_list_detail() {
        let body = r#"{"detail":[{"loc":["body","company_id"],"msg":"field required"},{"msg":"bad filename"}]}"#;
        let err = ApiError::from_status(422, body);
        assert_eq!(err.to_string(), "field required; bad filename");
    }

    #[test]
    fn test_unauthorized_special_case() {
        let err = ApiError::from_status(401, r#"{"detail":"Token expired"}"#);
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Authentication failed. Please log in again.");
    }

    #[test]
    fn test_all_sources_failed_message() {
        let err = ApiError::AllSourcesFailed {
            total: 2,
            first: Box::new(ApiError::Network("refused".into())),
        };
        assert!(err.to_string().starts_with("All 2 sources failed to load"));
    }
}
