//! HTTP client shared by the GitHub and Helm lookups
//!
//! Redirects are followed manually so the bearer token only ever reaches the
//! origin it was configured for.

use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::error::{RepoError, Result};

const USER_AGENT: &str = concat!("consul-adapter/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: u32 = 10;

/// Bearer token bound to one origin
#[derive(Clone)]
struct ScopedToken {
    origin: String,
    token: String,
}

/// HTTP client with timeout, status mapping and origin-scoped auth
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    timeout: Duration,
    token: Option<ScopedToken>,
}

impl HttpClient {
    /// Create a client without credentials
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RepoError::NetworkError {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            timeout,
            token: None,
        })
    }

    /// Send `token` as a bearer token to URLs sharing `base_url`'s origin
    pub fn with_bearer_token(mut self, base_url: &str, token: impl Into<String>) -> Result<Self> {
        let origin = origin_of(base_url).ok_or_else(|| RepoError::InvalidUrl {
            url: base_url.to_string(),
            reason: "URL has no origin".to_string(),
        })?;
        self.token = Some(ScopedToken {
            origin,
            token: token.into(),
        });
        Ok(self)
    }

    /// Fetch a URL, mapping error statuses to [`RepoError`]
    pub async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let mut current_url = url.to_string();
        let mut redirects = 0;

        loop {
            let mut request = self.client.get(&current_url);
            if let Some(token) = &self.token {
                if origin_of(&current_url).as_deref() == Some(token.origin.as_str()) {
                    request = request.bearer_auth(&token.token);
                } else if redirects > 0 {
                    tracing::debug!(
                        url = %current_url,
                        "cross-origin redirect; token not forwarded"
                    );
                }
            }

            let response = request.send().await.map_err(|e| self.map_error(e))?;
            let status = response.status();

            if status.is_redirection() {
                redirects += 1;
                if redirects > MAX_REDIRECTS {
                    return Err(RepoError::NetworkError {
                        message: format!("Too many redirects (max {})", MAX_REDIRECTS),
                    });
                }

                let location = response
                    .headers()
                    .get(reqwest::header::LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| RepoError::NetworkError {
                        message: "Redirect without Location header".to_string(),
                    })?;

                let base = Url::parse(&current_url)?;
                current_url = base.join(location)?.to_string();
                continue;
            }

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);
                return Err(RepoError::RateLimited { retry_after });
            }

            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(RepoError::AuthRequired { url: current_url });
            }
            if status == reqwest::StatusCode::FORBIDDEN {
                return Err(RepoError::AuthFailed {
                    message: format!("Access denied to {}", current_url),
                });
            }
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(RepoError::NotFound { url: current_url });
            }

            if !status.is_success() {
                return Err(RepoError::HttpError {
                    status: status.as_u16(),
                    message: format!("Request to {} failed", current_url),
                });
            }

            return Ok(response);
        }
    }

    /// Fetch text from URL
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.get(url).await?;
        response.text().await.map_err(|e| self.map_error(e))
    }

    /// Fetch and decode a JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let text = self.get_text(url).await?;
        Ok(serde_json::from_str(&text)?)
    }

    fn map_error(&self, e: reqwest::Error) -> RepoError {
        if e.is_timeout() {
            RepoError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            RepoError::from(e)
        }
    }
}

/// `scheme://host:port` of a URL, with the port normalized
fn origin_of(url: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    let host = url.host_str()?;
    let port = url.port_or_known_default()?;
    Some(format!("{}://{}:{}", url.scheme(), host, port))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_origin_of() {
        assert_eq!(
            origin_of("https://api.github.com/repos/a/b"),
            Some("https://api.github.com:443".to_string())
        );
        assert_eq!(
            origin_of("https://api.github.com:443/x"),
            origin_of("https://api.github.com/y")
        );
        assert_ne!(
            origin_of("https://api.github.com/x"),
            origin_of("http://api.github.com/x")
        );
        assert!(origin_of("not a url").is_none());
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let server = MockServer::start().await;
        Mock::given(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(path("/limited"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "17"))
            .mount(&server)
            .await;
        Mock::given(path("/forbidden"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;
        Mock::given(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = HttpClient::new(Duration::from_secs(5)).unwrap();
        let url = |p: &str| format!("{}{}", server.uri(), p);

        assert!(matches!(
            client.get(&url("/missing")).await,
            Err(RepoError::NotFound { .. })
        ));
        assert!(matches!(
            client.get(&url("/limited")).await,
            Err(RepoError::RateLimited { retry_after: 17 })
        ));
        assert!(matches!(
            client.get(&url("/forbidden")).await,
            Err(RepoError::AuthFailed { .. })
        ));
        assert!(matches!(
            client.get(&url("/broken")).await,
            Err(RepoError::HttpError { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_follows_redirects_with_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", "/new"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .and(header("Authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_string("moved"))
            .mount(&server)
            .await;

        let client = HttpClient::new(Duration::from_secs(5))
            .unwrap()
            .with_bearer_token(&server.uri(), "s3cret")
            .unwrap();

        let body = client
            .get_text(&format!("{}/old", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "moved");
    }

    #[tokio::test]
    async fn test_cross_origin_redirect_drops_token() {
        let api = MockServer::start().await;
        let mirror = MockServer::start().await;
        Mock::given(path("/download"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", format!("{}/blob", mirror.uri()).as_str()),
            )
            .mount(&api)
            .await;
        Mock::given(path("/blob"))
            .respond_with(ResponseTemplate::new(200).set_body_string("clean"))
            .mount(&mirror)
            .await;

        let client = HttpClient::new(Duration::from_secs(5))
            .unwrap()
            .with_bearer_token(&api.uri(), "s3cret")
            .unwrap();

        let body = client
            .get_text(&format!("{}/download", api.uri()))
            .await
            .unwrap();
        assert_eq!(body, "clean");

        let api_requests = api.received_requests().await.unwrap();
        assert!(api_requests[0].headers.contains_key("authorization"));

        let mirror_requests = mirror.received_requests().await.unwrap();
        assert_eq!(mirror_requests.len(), 1);
        assert!(!mirror_requests[0].headers.contains_key("authorization"));
    }
}
