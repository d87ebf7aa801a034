// GitHub HTTP client.
// Handles request headers, rate limit tracking, and response status checks.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::debug;

use crate::config::Config;
use crate::error::{LeetfindError, Result};

use super::types::RateLimit;

const GITHUB_API_VERSION: &str = "2022-11-28";

/// Unauthenticated GitHub client for the API and raw content hosts.
pub struct GitHubClient {
    client: Client,
    config: Config,
    rate_limit: RateLimit,
}

impl GitHubClient {
    /// Create a new client for the configured repository.
    pub fn new(config: Config) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("leetfind-tui"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(LeetfindError::Http)?;

        Ok(Self {
            client,
            config,
            rate_limit: RateLimit::default(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the current rate limit information.
    pub fn rate_limit(&self) -> &RateLimit {
        &self.rate_limit
    }

    /// Make a GET request to the GitHub API with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &mut self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.config.api_base, endpoint);
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(LeetfindError::Http)?;

        self.update_rate_limit(&response);
        self.check_response(response)
    }

    /// Fetch a file's raw contents from the configured repository and branch.
    pub async fn get_raw(&mut self, path: &str) -> Result<String> {
        let url = self.config.raw_url(path);
        debug!(%url, "GET raw");
        let response = self.client.get(&url).send().await.map_err(LeetfindError::Http)?;
        let response = self.check_response(response)?;
        Ok(response.text().await?)
    }

    /// Update rate limit from response headers.
    fn update_rate_limit(&mut self, response: &Response) {
        let header = |name: &str| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
        };

        if let Some(limit) = header("x-ratelimit-limit") {
            self.rate_limit.limit = limit;
        }
        if let Some(remaining) = header("x-ratelimit-remaining") {
            self.rate_limit.remaining = remaining;
        }
        if let Some(reset) = header("x-ratelimit-reset") {
            self.rate_limit.reset = reset;
        }
    }

    /// Check response status and convert errors.
    fn check_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        Err(status_error(status, &self.rate_limit, url))
    }
}

/// Error for a non-success `status`, given the last seen rate limit.
///
/// A 403 or 429 counts as rate limiting only once the quota is known to be
/// exhausted; otherwise it is a plain status error.
pub fn status_error(status: StatusCode, rate_limit: &RateLimit, url: String) -> LeetfindError {
    match status {
        StatusCode::NOT_FOUND => LeetfindError::NotFound(url),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
            if rate_limit.is_known() && rate_limit.remaining == 0 =>
        {
            let reset_at = chrono::DateTime::from_timestamp(rate_limit.reset as i64, 0)
                .map(|dt| {
                    dt.with_timezone(&chrono::Local)
                        .format("%H:%M:%S")
                        .to_string()
                })
                .unwrap_or_else(|| "unknown".to_string());
            LeetfindError::RateLimited { reset_at }
        }
        status => LeetfindError::Status {
            status: status.as_u16(),
            url,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://api.github.com/repos/o/r/git/trees/main";

    fn limit(remaining: u64) -> RateLimit {
        RateLimit {
            limit: 60,
            remaining,
            reset: 1_700_000_000,
        }
    }

    #[test]
    fn test_exhausted_quota_is_rate_limited() {
        for status in [StatusCode::FORBIDDEN, StatusCode::TOO_MANY_REQUESTS] {
            let err = status_error(status, &limit(0), URL.to_string());
            assert!(matches!(err, LeetfindError::RateLimited { .. }));
        }
    }

    #[test]
    fn test_forbidden_with_quota_left_is_status() {
        let err = status_error(StatusCode::FORBIDDEN, &limit(12), URL.to_string());
        assert!(matches!(err, LeetfindError::Status { status: 403, .. }));

        // No rate limit headers seen yet.
        let err = status_error(StatusCode::FORBIDDEN, &RateLimit::default(), URL.to_string());
        assert!(matches!(err, LeetfindError::Status { status: 403, .. }));
    }

    #[test]
    fn test_not_found_and_other_statuses() {
        let err = status_error(StatusCode::NOT_FOUND, &limit(0), URL.to_string());
        assert!(matches!(err, LeetfindError::NotFound(ref url) if url == URL));

        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, &limit(30), URL.to_string());
        assert!(matches!(err, LeetfindError::Status { status: 500, .. }));
    }
}
