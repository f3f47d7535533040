use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthorized - session may have expired")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limited - too many requests")]
    RateLimited,

    #[error("API rate limit quota exhausted")]
    QuotaExhausted,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Header GitHub uses to report the remaining request quota
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    /// True when the headers say no requests are left in the current window.
    pub fn quota_exhausted(headers: &HeaderMap) -> bool {
        headers
            .get(RATE_LIMIT_REMAINING_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim() == "0")
            .unwrap_or(false)
    }

    pub fn from_status(status: StatusCode, headers: &HeaderMap, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 if Self::quota_exhausted(headers) => ApiError::QuotaExhausted,
            403 => ApiError::AccessDenied(truncated),
            404 => ApiError::NotFound(truncated),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(truncated),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }

    /// Whether this error is a request-quota signal that should stop the scan.
    pub fn is_quota(&self) -> bool {
        matches!(self, ApiError::RateLimited | ApiError::QuotaExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_from_status_classification() {
        let empty = HeaderMap::new();
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, &empty, ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, &empty, "gone"),
            ApiError::NotFound(ref b) if b == "gone"
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, &empty, ""),
            ApiError::RateLimited
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, &empty, ""),
            ApiError::ServerError(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::IM_A_TEAPOT, &empty, ""),
            ApiError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_forbidden_depends_on_quota_header() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, &headers, "private"),
            ApiError::AccessDenied(_)
        ));

        headers.insert(RATE_LIMIT_REMAINING_HEADER, HeaderValue::from_static("0"));
        let err = ApiError::from_status(StatusCode::FORBIDDEN, &headers, "");
        assert!(matches!(err, ApiError::QuotaExhausted));
        assert!(err.is_quota());

        headers.insert(RATE_LIMIT_REMAINING_HEADER, HeaderValue::from_static("42"));
        assert!(!ApiError::from_status(StatusCode::FORBIDDEN, &headers, "").is_quota());
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        let body = "é".repeat(400); // 800 bytes, two bytes per char
        let truncated = ApiError::truncate_body(&body);
        assert!(truncated.ends_with("(truncated, 800 total bytes)"));
        assert_eq!(ApiError::truncate_body("short"), "short");
    }
}
