//! Consul adapter repository clients
//!
//! HTTP implementations of the collaborators the core bootstrap drives:
//!
//! - **GitHub**: release tags and CRD directory listings of `hashicorp/consul-k8s`
//! - **Helm**: chart version to app version through the repository `index.yaml`
//! - **Manifests**: raw CRD download for the component converter
//!
//! ## Example
//!
//! ```rust,no_run
//! use consul_adapter_core::{AdapterConfig, Bootstrap};
//! use consul_adapter_repo::Collaborators;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AdapterConfig::load()?;
//! let collaborators = Collaborators::from_config(&config)?;
//! let state = Bootstrap::new(&collaborators.github, &collaborators.helm, &collaborators.github)
//!     .source(config.source.clone())
//!     .chart(config.chart.clone())
//!     .timeout(config.bootstrap_timeout)
//!     .run(config.paths(&std::env::current_dir()?))
//!     .await;
//! println!("latest: {:?}", state.latest_version());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod fetch;
pub mod github;
pub mod helm;

pub use client::HttpClient;
pub use error::{RepoError, Result};
pub use fetch::ManifestFetcher;
pub use github::GitHubSource;
pub use helm::{ChartEntry, ChartIndex, HelmRepository};

use consul_adapter_core::AdapterConfig;

/// HTTP collaborators built from one configuration
pub struct Collaborators {
    pub github: GitHubSource,
    pub helm: HelmRepository,
    pub manifests: ManifestFetcher,
}

impl Collaborators {
    /// The GitHub token, when configured, is only sent to the GitHub API origin
    pub fn from_config(config: &AdapterConfig) -> Result<Self> {
        let plain = HttpClient::new(config.http_timeout)?;
        let github_client = match config.github_token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => plain.clone().with_bearer_token(&config.github_api_url, token)?,
            None => plain.clone(),
        };

        Ok(Self {
            github: GitHubSource::new(github_client, config.github_api_url.clone()),
            helm: HelmRepository::new(plain.clone()),
            manifests: ManifestFetcher::new(plain),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consul_adapter_core::ChartRef;
    use wiremock::matchers::{header, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const INDEX: &str = "entries:\n  consul:\n    - name: consul\n      version: 1.3.0\n      appVersion: 1.17.0\n";

    #[tokio::test]
    async fn test_token_only_reaches_github_api() {
        let github = MockServer::start().await;
        let helm = MockServer::start().await;
        Mock::given(path("/repos/hashicorp/consul-k8s/releases"))
            .and(header("Authorization", "Bearer ghp_test"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([{"tag_name": "v1.3.0"}])),
            )
            .mount(&github)
            .await;
        Mock::given(path("/index.yaml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(INDEX))
            .mount(&helm)
            .await;

        let config = AdapterConfig {
            github_api_url: github.uri(),
            github_token: Some("ghp_test".to_string()),
            chart: ChartRef {
                repo_url: helm.uri(),
                name: "consul".to_string(),
            },
            ..AdapterConfig::default()
        };
        let collaborators = Collaborators::from_config(&config).unwrap();

        let tags = collaborators
            .github
            .release_tags("hashicorp", "consul-k8s")
            .await
            .unwrap();
        assert_eq!(tags, vec!["v1.3.0"]);

        let app_version = collaborators
            .helm
            .app_version(&config.chart.repo_url, "consul", "1.3.0")
            .await
            .unwrap();
        assert_eq!(app_version, "1.17.0");

        let helm_requests = helm.received_requests().await.unwrap();
        assert_eq!(helm_requests.len(), 1);
        assert!(!helm_requests[0].headers.contains_key("authorization"));
    }
}
