use chrono::{Datelike, NaiveDate};
use futures::StreamExt;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Responses above this size are rejected before parsing.
const MAX_RESPONSE_SIZE: usize = 5 * 1024 * 1024; // 5MB

/// Default backend when neither config nor CLI names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Errors surfaced by the backend client.
///
/// `HttpStatus` carries the numeric status of any non-2xx answer; `Parse`
/// covers bodies that are not JSON. Neither is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success HTTP status.
    #[error("HTTP error! Status: {0}")]
    HttpStatus(u16),
    /// Connection, DNS or TLS failure.
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Request exceeded the configured timeout.
    #[error("Request timed out after {0}s")]
    Timeout(u64),
    /// Response body exceeded the size limit.
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    /// Response body is not valid JSON.
    #[error("Invalid JSON in response: {0}")]
    Parse(#[from] serde_json::Error),
    /// Base URL could not be joined with an endpoint path.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    /// The task running the request panicked.
    #[error("Internal error: {0}")]
    TaskPanicked(String),
}

impl ApiError {
    /// HTTP status carried by the error, if it came from a non-2xx answer.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus(code) => Some(*code),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Which trending-list retrieval form the backend exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendingEndpoint {
    /// `/api/trending-topics/{year}/{month}/{day}`
    #[default]
    Dated,
    /// `/api/top-articles`
    Top,
}

impl TrendingEndpoint {
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dated" => Some(Self::Dated),
            "top" => Some(Self::Top),
            _ => None,
        }
    }
}

/// Create a redirect policy with loop detection and limited hops.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= 3 {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        for prev in attempt.previous() {
            if prev.as_str() == url.as_str() {
                return attempt.error("Redirect loop detected");
            }
        }

        tracing::debug!(
            from = %attempt.previous().last().map(|u| u.as_str()).unwrap_or("initial"),
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );

        attempt.follow()
    })
}

/// Thin read-only client for the dashboard backend.
///
/// Each operation issues one GET and returns the decoded JSON body verbatim.
/// Shape checks belong to the panels that consume the value.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: url::Url,
    trending: TrendingEndpoint,
    timeout: Duration,
}

impl ApiClient {
    /// Build a client against `base_url`.
    ///
    /// # Errors
    ///
    /// Fails if the base URL does not parse or the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        trending: TrendingEndpoint,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .redirect(create_redirect_policy())
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(timeout)
            .build()?;

        // A trailing slash keeps `join` from dropping the last path segment
        // of a base like `https://host/dashboard`.
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = url::Url::parse(&base)?;

        Ok(Self {
            http,
            base_url,
            trending,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn trending_endpoint(&self) -> TrendingEndpoint {
        self.trending
    }

    /// Fetch the trending article list for `date` (ignored for the undated form).
    pub async fn fetch_trending_articles(&self, date: NaiveDate) -> Result<Value, ApiError> {
        let path = trending_path(self.trending, date);
        self.get_json(&path).await
    }

    /// Fetch the raw tone-chart payload for an article.
    pub async fn fetch_tone_chart(&self, article_id: &str) -> Result<Value, ApiError> {
        self.get_json(&format!("api/article-tone-chart/{}", article_id))
            .await
    }

    /// Fetch the latest discussion posts for an article.
    pub async fn fetch_reddit_posts(&self, article_id: &str) -> Result<Value, ApiError> {
        self.get_json(&format!("api/latest-reddit-posts/{}", article_id))
            .await
    }

    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.base_url.join(path)?;
        tracing::debug!(url = %url, "GET");

        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(self.timeout.as_secs())
            } else {
                ApiError::Network(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Backend returned error status");
            return Err(ApiError::HttpStatus(status.as_u16()));
        }

        let bytes = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Endpoint path for the trending list, relative to the base URL.
pub fn trending_path(endpoint: TrendingEndpoint, date: NaiveDate) -> String {
    match endpoint {
        TrendingEndpoint::Dated => format!(
            "api/trending-topics/{}/{:02}/{:02}",
            date.year(),
            date.month(),
            date.day()
        ),
        TrendingEndpoint::Top => "api/top-articles".to_string(),
    }
}

async fn read_limited_bytes(response: reqwest::Response, limit: usize) -> Result<Vec<u8>, ApiError> {
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(ApiError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(ApiError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(ApiError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, trending: TrendingEndpoint) -> ApiClient {
        ApiClient::new(&server.uri(), trending, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_dated_path_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(
            trending_path(TrendingEndpoint::Dated, date),
            "api/trending-topics/2026/03/07"
        );
        assert_eq!(
            trending_path(TrendingEndpoint::Top, date),
            "api/top-articles"
        );
    }

    #[test]
    fn test_endpoint_from_name() {
        assert_eq!(
            TrendingEndpoint::from_str_name("TOP"),
            Some(TrendingEndpoint::Top)
        );
        assert_eq!(
            TrendingEndpoint::from_str_name("dated"),
            Some(TrendingEndpoint::Dated)
        );
        assert_eq!(TrendingEndpoint::from_str_name("weekly"), None);
    }

    #[test]
    fn test_http_status_message_carries_code() {
        let err = ApiError::HttpStatus(503);
        assert_eq!(err.to_string(), "HTTP error! Status: 503");
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_fetch_trending_dated() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/trending-topics/2026/10/18"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
            .mount(&server)
            .await;

        let client = client_for(&server, TrendingEndpoint::Dated);
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let body = client.fetch_trending_articles(date).await.unwrap();
        assert_eq!(body, json!([{"id": 1}]));
    }

    #[tokio::test]
    async fn test_fetch_top_articles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/top-articles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server, TrendingEndpoint::Top);
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(client.fetch_trending_articles(date).await.unwrap(), json!([]));
    }

    #[tokio::test]
    async fn test_fetch_tone_chart_returns_wrapper_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/article-tone-chart/42"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"asString": "{\"histogram\":[]}"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, TrendingEndpoint::Dated);
        let body = client.fetch_tone_chart("42").await.unwrap();
        assert_eq!(body, json!({"asString": "{\"histogram\":[]}"}));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server, TrendingEndpoint::Dated);
        let err = client.fetch_reddit_posts("42").await.unwrap_err();
        assert!(matches!(err, ApiError::HttpStatus(500)));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_not_found_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server, TrendingEndpoint::Dated);
        let err = client.fetch_tone_chart("9").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server, TrendingEndpoint::Dated);
        let err = client.fetch_reddit_posts("1").await.unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[tokio::test]
    async fn test_base_url_with_path_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dashboard/api/latest-reddit-posts/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let base = format!("{}/dashboard/", server.uri());
        let client =
            ApiClient::new(&base, TrendingEndpoint::Dated, Duration::from_secs(5)).unwrap();
        assert_eq!(client.fetch_reddit_posts("5").await.unwrap(), json!([]));
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ApiClient::new("not a url", TrendingEndpoint::Dated, Duration::from_secs(5));
        assert!(matches!(result, Err(ApiError::InvalidBaseUrl(_))));
    }
}
