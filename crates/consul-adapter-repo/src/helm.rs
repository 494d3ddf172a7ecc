//! Helm chart repository lookups
//!
//! Maps a chart version to the application version it ships by reading the
//! repository's `index.yaml`.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

use consul_adapter_core::error::CoreError;
use consul_adapter_core::source::AppVersionResolver;

use crate::client::HttpClient;
use crate::error::{RepoError, Result};

/// Helm repository index
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartIndex {
    /// Chart versions indexed by chart name
    #[serde(default)]
    pub entries: HashMap<String, Vec<ChartEntry>>,
}

impl ChartIndex {
    /// Parse index from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| RepoError::IndexParseError {
            message: e.to_string(),
        })
    }

    /// Get a specific version of a chart, with or without a leading `v`
    pub fn get_version(&self, name: &str, version: &str) -> Option<&ChartEntry> {
        let wanted = version.strip_prefix('v').unwrap_or(version);
        self.entries
            .get(name)?
            .iter()
            .find(|e| e.version.strip_prefix('v').unwrap_or(&e.version) == wanted)
    }

    /// App version shipped by `name@version`
    pub fn app_version(&self, repo: &str, name: &str, version: &str) -> Result<String> {
        if !self.entries.contains_key(name) {
            return Err(RepoError::ChartNotFound {
                name: name.to_string(),
                repo: repo.to_string(),
            });
        }
        let entry = self
            .get_version(name, version)
            .ok_or_else(|| RepoError::VersionNotFound {
                name: name.to_string(),
                version: version.to_string(),
                repo: repo.to_string(),
            })?;
        entry
            .app_version
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| RepoError::MissingAppVersion {
                name: name.to_string(),
                version: version.to_string(),
            })
    }
}

/// Chart version entry in the index
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartEntry {
    pub name: String,

    /// Chart version (semver)
    pub version: String,

    /// Application version
    #[serde(default)]
    pub app_version: Option<String>,
}

/// Reads Helm repository indexes, caching each one for the life of the client
pub struct HelmRepository {
    client: HttpClient,
    indexes: Mutex<HashMap<String, ChartIndex>>,
}

impl HelmRepository {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            indexes: Mutex::new(HashMap::new()),
        }
    }

    /// URL of the index of a repository
    pub fn index_url(repo_url: &str) -> String {
        format!("{}/index.yaml", repo_url.trim_end_matches('/'))
    }

    /// Fetch the index of `repo_url`, from cache when already fetched
    pub async fn fetch_index(&self, repo_url: &str) -> Result<ChartIndex> {
        let key = repo_url.trim_end_matches('/').to_string();
        let mut indexes = self.indexes.lock().await;
        if let Some(index) = indexes.get(&key) {
            return Ok(index.clone());
        }

        let index_url = Self::index_url(repo_url);
        debug!(url = %index_url, "fetching chart index");
        let yaml = self.client.get_text(&index_url).await?;
        let index = ChartIndex::from_yaml(&yaml)?;
        indexes.insert(key, index.clone());
        Ok(index)
    }

    /// App version shipped by `chart_name@chart_version`
    pub async fn app_version(
        &self,
        repo_url: &str,
        chart_name: &str,
        chart_version: &str,
    ) -> Result<String> {
        let index = self.fetch_index(repo_url).await?;
        index.app_version(repo_url, chart_name, chart_version)
    }
}

#[async_trait]
impl AppVersionResolver for HelmRepository {
    async fn resolve_app_version(
        &self,
        repo_url: &str,
        chart_name: &str,
        chart_version: &str,
    ) -> consul_adapter_core::Result<String> {
        self.app_version(repo_url, chart_name, chart_version)
            .await
            .map_err(|e| CoreError::AppVersionLookup {
                chart: chart_name.to_string(),
                version: chart_version.to_string(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const INDEX: &str = r#"
apiVersion: v1
generated: "2024-01-01T00:00:00Z"
entries:
  consul:
    - name: consul
      version: 1.3.0
      appVersion: 1.17.0
      urls:
        - https://helm.releases.hashicorp.com/consul-1.3.0.tgz
    - name: consul
      version: 1.2.0
      appVersion: 1.16.2
    - name: consul
      version: 0.1.0
  vault:
    - name: vault
      version: 0.27.0
      appVersion: 1.15.2
"#;

    #[test]
    fn test_parse_index() {
        let index = ChartIndex::from_yaml(INDEX).unwrap();
        assert_eq!(index.entries.len(), 2);
        assert_eq!(index.entries["consul"].len(), 3);
    }

    #[test]
    fn test_app_version_lookup() {
        let index = ChartIndex::from_yaml(INDEX).unwrap();
        assert_eq!(index.app_version("r", "consul", "1.3.0").unwrap(), "1.17.0");
        assert_eq!(index.app_version("r", "consul", "v1.2.0").unwrap(), "1.16.2");
    }

    #[test]
    fn test_app_version_errors() {
        let index = ChartIndex::from_yaml(INDEX).unwrap();
        assert!(matches!(
            index.app_version("r", "nomad", "1.0.0"),
            Err(RepoError::ChartNotFound { .. })
        ));
        assert!(matches!(
            index.app_version("r", "consul", "9.9.9"),
            Err(RepoError::VersionNotFound { .. })
        ));
        assert!(matches!(
            index.app_version("r", "consul", "0.1.0"),
            Err(RepoError::MissingAppVersion { .. })
        ));
    }

    #[test]
    fn test_invalid_index() {
        assert!(matches!(
            ChartIndex::from_yaml("entries: [not, a, map]"),
            Err(RepoError::IndexParseError { .. })
        ));
    }

    #[tokio::test]
    async fn test_resolve_fetches_index_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/index.yaml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(INDEX))
            .expect(1)
            .mount(&server)
            .await;

        let repo = HelmRepository::new(HttpClient::new(Duration::from_secs(5)).unwrap());
        let uri = format!("{}/", server.uri());

        assert_eq!(
            repo.resolve_app_version(&uri, "consul", "1.3.0").await.unwrap(),
            "1.17.0"
        );
        assert_eq!(
            repo.resolve_app_version(&server.uri(), "vault", "0.27.0")
                .await
                .unwrap(),
            "1.15.2"
        );
    }

    #[tokio::test]
    async fn test_resolve_failure_maps_to_core() {
        let server = MockServer::start().await;
        Mock::given(path("/index.yaml"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let repo = HelmRepository::new(HttpClient::new(Duration::from_secs(5)).unwrap());
        let result = repo
            .resolve_app_version(&server.uri(), "consul", "1.3.0")
            .await;
        assert!(matches!(result, Err(CoreError::AppVersionLookup { .. })));
    }
}
