//! GitHub REST client implementation using reqwest.

use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_LENGTH, HeaderMap, HeaderValue, RETRY_AFTER};
use serde::Deserialize;
use url::Url;

use crate::domain::{AppError, GitHubApiConfig, RateLimitStatus, RepositoryRef};
use crate::ports::{AuthenticatedUser, RepositoryInfo, StarClient};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const OAUTH_SCOPES_HEADER: &str = "x-oauth-scopes";
const DEFAULT_STATUS_MESSAGE: &str = "GitHub API request failed";

/// HTTP transport for the GitHub REST API.
///
/// One request per call. Retries live in [`super::RetryingStarClient`].
#[derive(Clone)]
pub struct HttpStarClient {
    token: String,
    api_url: Url,
    client: Client,
}

impl std::fmt::Debug for HttpStarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpStarClient")
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

struct RawResponse {
    status: u16,
    headers: HeaderMap,
    body: String,
}

impl RawResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl HttpStarClient {
    pub fn new(token: impl Into<String>, config: &GitHubApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("starbatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::api(format!("Failed to create HTTP client: {}", e), None))?;

        Ok(Self { token: token.into(), api_url: config.api_url.clone(), client })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::config_error(format!("Invalid API URL: {}", self.api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn send(&self, method: Method, segments: &[&str]) -> Result<RawResponse, AppError> {
        let url = self.endpoint(segments)?;
        let mut request = self
            .client
            .request(method.clone(), url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(API_VERSION_HEADER, API_VERSION);

        if method == Method::PUT {
            request = request.header(CONTENT_LENGTH, "0");
        }

        let response = request
            .send()
            .map_err(|e| AppError::api(format!("HTTP request failed: {}", e), None))?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().unwrap_or_default();
        Ok(RawResponse { status, headers, body })
    }

    fn parse_json<T: for<'de> Deserialize<'de>>(response: &RawResponse) -> Result<T, AppError> {
        serde_json::from_str(&response.body).map_err(|e| {
            AppError::api(format!("Failed to parse response: {}", e), Some(response.status))
        })
    }
}

fn error_from_response(response: &RawResponse) -> AppError {
    let status = response.status;
    let mut message = extract_error_message(&response.body).unwrap_or_else(|| {
        if !response.body.trim().is_empty() {
            response.body.trim().to_string()
        } else if status == 404 {
            "Not Found".to_string()
        } else if status == 429 {
            "Rate limited".to_string()
        } else if status >= 500 {
            "Server error".to_string()
        } else {
            DEFAULT_STATUS_MESSAGE.to_string()
        }
    });

    if let Some(value) = response.headers.get(RETRY_AFTER).and_then(parse_retry_after_ms) {
        message.push_str(&format!(" (retry_after_ms={})", value));
    }

    AppError::api(message, Some(status))
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

fn parse_retry_after_ms(value: &HeaderValue) -> Option<u64> {
    let raw = value.to_str().ok()?.trim();
    let seconds = raw.parse::<u64>().ok()?;
    Some(seconds.saturating_mul(1000))
}

fn parse_scopes(headers: &HeaderMap) -> Option<Vec<String>> {
    let raw = headers.get(OAUTH_SCOPES_HEADER)?.to_str().ok()?;
    Some(
        raw.split(',')
            .map(str::trim)
            .filter(|scope| !scope.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
    )
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RateLimitResponse {
    rate: RateResource,
}

#[derive(Debug, Deserialize)]
struct RateResource {
    limit: u64,
    remaining: u64,
    reset: i64,
}

#[derive(Debug, Deserialize)]
struct RepositoryResponse {
    full_name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    language: Option<String>,
    html_url: String,
}

impl StarClient for HttpStarClient {
    fn authenticate(&self) -> Result<AuthenticatedUser, AppError> {
        let response = self.send(Method::GET, &["user"])?;
        if !response.is_success() {
            return Err(error_from_response(&response));
        }
        let user: UserResponse = Self::parse_json(&response)?;
        Ok(AuthenticatedUser { login: user.login, scopes: parse_scopes(&response.headers) })
    }

    fn is_starred(&self, repo: &RepositoryRef) -> Result<bool, AppError> {
        let response = self.send(Method::GET, &["user", "starred", repo.owner(), repo.name()])?;
        match response.status {
            404 => Ok(false),
            _ if response.is_success() => Ok(true),
            _ => Err(error_from_response(&response)),
        }
    }

    fn star(&self, repo: &RepositoryRef) -> Result<(), AppError> {
        let response = self.send(Method::PUT, &["user", "starred", repo.owner(), repo.name()])?;
        if response.is_success() { Ok(()) } else { Err(error_from_response(&response)) }
    }

    fn unstar(&self, repo: &RepositoryRef) -> Result<(), AppError> {
        let response =
            self.send(Method::DELETE, &["user", "starred", repo.owner(), repo.name()])?;
        if response.is_success() { Ok(()) } else { Err(error_from_response(&response)) }
    }

    fn rate_limit(&self) -> Result<RateLimitStatus, AppError> {
        let response = self.send(Method::GET, &["rate_limit"])?;
        if !response.is_success() {
            return Err(error_from_response(&response));
        }
        let parsed: RateLimitResponse = Self::parse_json(&response)?;
        Ok(RateLimitStatus {
            remaining: parsed.rate.remaining,
            limit: parsed.rate.limit,
            reset_epoch_seconds: parsed.rate.reset,
        })
    }

    fn repository(&self, repo: &RepositoryRef) -> Result<RepositoryInfo, AppError> {
        let response = self.send(Method::GET, &["repos", repo.owner(), repo.name()])?;
        if !response.is_success() {
            return Err(error_from_response(&response));
        }
        let parsed: RepositoryResponse = Self::parse_json(&response)?;
        Ok(RepositoryInfo {
            full_name: parsed.full_name,
            description: parsed.description,
            star_count: parsed.stargazers_count,
            primary_language: parsed.language,
            url: parsed.html_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::Server) -> HttpStarClient {
        let config = GitHubApiConfig {
            api_url: Url::parse(&server.url()).unwrap(),
            timeout_secs: 1,
            max_retries: 1,
            retry_delay_ms: 1,
        };
        HttpStarClient::new("ghp_test", &config).unwrap()
    }

    fn repo() -> RepositoryRef {
        RepositoryRef::new("acme", "widgets").unwrap()
    }

    #[test]
    fn is_starred_maps_204_and_404() {
        let mut server = mockito::Server::new();
        let _starred = server
            .mock("GET", "/user/starred/acme/widgets")
            .match_header("authorization", "Bearer ghp_test")
            .with_status(204)
            .create();
        let _missing = server.mock("GET", "/user/starred/acme/tools").with_status(404).create();

        let client = client_for(&server);
        assert!(client.is_starred(&repo()).unwrap());
        assert!(!client.is_starred(&RepositoryRef::new("acme", "tools").unwrap()).unwrap());
    }

    #[test]
    fn is_starred_surfaces_other_statuses() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/user/starred/acme/widgets")
            .with_status(403)
            .with_body(r#"{"message":"Resource not accessible by integration"}"#)
            .create();

        let err = client_for(&server).is_starred(&repo()).unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert_eq!(err.to_string(), "Resource not accessible by integration");
    }

    #[test]
    fn star_issues_put() {
        let mut server = mockito::Server::new();
        let mock =
            server.mock("PUT", "/user/starred/acme/widgets").with_status(204).expect(1).create();

        client_for(&server).star(&repo()).unwrap();
        mock.assert();
    }

    #[test]
    fn unstar_issues_delete() {
        let mut server = mockito::Server::new();
        let mock =
            server.mock("DELETE", "/user/starred/acme/widgets").with_status(204).expect(1).create();

        client_for(&server).unstar(&repo()).unwrap();
        mock.assert();
    }

    #[test]
    fn star_on_missing_repository_returns_404() {
        let mut server = mockito::Server::new();
        let _m = server.mock("PUT", "/user/starred/acme/widgets").with_status(404).create();

        let err = client_for(&server).star(&repo()).unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Not Found");
    }

    #[test]
    fn authenticate_reads_login_and_scopes() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/user")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_header("x-oauth-scopes", "public_repo, read:user")
            .with_body(r#"{"login":"octocat","id":1}"#)
            .create();

        let user = client_for(&server).authenticate().unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(
            user.scopes,
            Some(vec!["public_repo".to_string(), "read:user".to_string()])
        );
    }

    #[test]
    fn authenticate_without_scope_header() {
        let mut server = mockito::Server::new();
        let _m =
            server.mock("GET", "/user").with_status(200).with_body(r#"{"login":"bot"}"#).create();

        let user = client_for(&server).authenticate().unwrap();
        assert_eq!(user.scopes, None);
    }

    #[test]
    fn authenticate_rejects_bad_credentials() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/user")
            .with_status(401)
            .with_body(r#"{"message":"Bad credentials"}"#)
            .create();

        let err = client_for(&server).authenticate().unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "Bad credentials");
    }

    #[test]
    fn rate_limit_reads_core_rate() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/rate_limit")
            .with_status(200)
            .with_body(
                r#"{"resources":{"core":{"limit":5000,"remaining":4321,"reset":1700000000}},
                    "rate":{"limit":5000,"remaining":4321,"reset":1700000000,"used":679}}"#,
            )
            .create();

        let status = client_for(&server).rate_limit().unwrap();
        assert_eq!(
            status,
            RateLimitStatus { remaining: 4321, limit: 5000, reset_epoch_seconds: 1_700_000_000 }
        );
    }

    #[test]
    fn retry_after_is_appended_to_message() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("PUT", "/user/starred/acme/widgets")
            .with_status(429)
            .with_header("retry-after", "7")
            .create();

        let err = client_for(&server).star(&repo()).unwrap_err();
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.to_string(), "Rate limited (retry_after_ms=7000)");
    }

    #[test]
    fn repository_maps_metadata() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", "/repos/acme/widgets")
            .with_status(200)
            .with_body(
                r#"{"full_name":"acme/widgets","description":"Widgets","stargazers_count":42,
                    "language":"Rust","html_url":"https://github.com/acme/widgets"}"#,
            )
            .create();

        let info = client_for(&server).repository(&repo()).unwrap();
        assert_eq!(info.full_name, "acme/widgets");
        assert_eq!(info.star_count, 42);
        assert_eq!(info.primary_language.as_deref(), Some("Rust"));
        assert_eq!(info.url, "https://github.com/acme/widgets");
    }

    #[test]
    fn api_url_with_path_prefix_is_preserved() {
        let mut server = mockito::Server::new();
        let mock = server.mock("GET", "/api/v3/rate_limit").with_status(500).expect(1).create();

        let config = GitHubApiConfig {
            api_url: Url::parse(&format!("{}/api/v3/", server.url())).unwrap(),
            timeout_secs: 1,
            max_retries: 1,
            retry_delay_ms: 1,
        };
        let err = HttpStarClient::new("t", &config).unwrap().rate_limit().unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Server error");
        mock.assert();
    }

    #[test]
    fn debug_redacts_token() {
        let server = mockito::Server::new();
        let rendered = format!("{:?}", client_for(&server));
        assert!(!rendered.contains("ghp_test"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
