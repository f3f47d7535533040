use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitResponse {
    pub rate: RateLimit,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    /// Unix timestamp at which the window resets
    #[serde(default)]
    pub reset: Option<i64>,
}

impl RateLimit {
    /// Reset time formatted for log output, if the API provided one.
    pub fn reset_display(&self) -> Option<String> {
        self.reset
            .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate_limit_response() {
        let json = r#"{"resources": {"core": {"limit": 60, "remaining": 0, "reset": 1700000000, "used": 60}}, "rate": {"limit": 60, "remaining": 0, "reset": 1700000000, "used": 60}}"#;
        let resp: RateLimitResponse = serde_json::from_str(json).expect("rate limit should parse");
        assert_eq!(resp.rate.remaining, 0);
        assert_eq!(resp.rate.limit, 60);
        assert_eq!(resp.rate.reset_display().as_deref(), Some("2023-11-14 22:13:20 UTC"));
    }
}
