//! Adapter configuration
//!
//! Stored in `~/.config/consul-adapter/config.yaml`. Every field has a
//! default, so a missing file means "track upstream Consul".

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{CoreError, Result};
use crate::source::{ChartRef, SourceRef};
use crate::state::AdapterPaths;
use crate::url::UrlResolver;

/// GitHub REST API endpoint
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Adapter configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterConfig {
    /// API version
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Replaces every computed CRD download URL when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_url: Option<String>,

    /// Upstream source tree
    #[serde(default)]
    pub source: SourceRef,

    /// Helm chart of the control plane
    #[serde(default)]
    pub chart: ChartRef,

    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    /// Bearer token for the GitHub API, raises the rate limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,

    /// Upper bound on the whole startup lookup
    #[serde(default = "default_bootstrap_timeout", with = "humantime_serde")]
    pub bootstrap_timeout: Duration,

    /// Per-request timeout of the HTTP collaborators
    #[serde(default = "default_http_timeout", with = "humantime_serde")]
    pub http_timeout: Duration,

    /// Base directory of the component templates (defaults to the working directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
}

fn default_api_version() -> String {
    "consul-adapter/v1".to_string()
}

fn default_github_api_url() -> String {
    DEFAULT_GITHUB_API_URL.to_string()
}

fn default_bootstrap_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_http_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            override_url: None,
            source: SourceRef::default(),
            chart: ChartRef::default(),
            github_api_url: default_github_api_url(),
            github_token: None,
            bootstrap_timeout: default_bootstrap_timeout(),
            http_timeout: default_http_timeout(),
            templates_dir: None,
        }
    }
}

impl AdapterConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default configuration path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| CoreError::InvalidConfig {
            message: "Could not determine config directory".to_string(),
        })?;
        Ok(config_dir.join("consul-adapter").join("config.yaml"))
    }

    fn validate(&self) -> Result<()> {
        if self.source.owner.is_empty() || self.source.repo.is_empty() {
            return Err(CoreError::InvalidConfig {
                message: "source.owner and source.repo must not be empty".to_string(),
            });
        }
        if self.chart.name.is_empty() || self.chart.repo_url.is_empty() {
            return Err(CoreError::InvalidConfig {
                message: "chart.name and chart.repoUrl must not be empty".to_string(),
            });
        }
        if self.bootstrap_timeout.is_zero() {
            return Err(CoreError::InvalidConfig {
                message: "bootstrapTimeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// The override URL, `None` when unset or empty
    pub fn override_url(&self) -> Option<&str> {
        self.override_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn url_resolver(&self) -> UrlResolver {
        UrlResolver::new(self.source.clone(), self.override_url.clone())
    }

    /// Template paths under the configured base, or under `cwd`
    pub fn paths(&self, cwd: &Path) -> AdapterPaths {
        AdapterPaths::from_base(self.templates_dir.as_deref().unwrap_or(cwd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: AdapterConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, AdapterConfig::default());
        assert_eq!(config.source.owner, "hashicorp");
        assert_eq!(config.chart.name, "consul");
        assert_eq!(config.bootstrap_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
overrideUrl: https://mirror.local/crds.yaml
source:
  owner: acme
  repo: consul-fork
chart:
  repoUrl: https://charts.acme.io
  name: consul
bootstrapTimeout: 15s
httpTimeout: 2s
"#;
        let config: AdapterConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.override_url(), Some("https://mirror.local/crds.yaml"));
        assert_eq!(config.source.owner, "acme");
        assert_eq!(config.source.crd_path, "control-plane/config/crd/bases/");
        assert_eq!(config.chart.repo_url, "https://charts.acme.io");
        assert_eq!(config.bootstrap_timeout, Duration::from_secs(15));
        assert_eq!(config.http_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_empty_override_is_unset() {
        let config = AdapterConfig {
            override_url: Some(String::new()),
            ..AdapterConfig::default()
        };
        assert!(config.override_url().is_none());
        assert!(config.url_resolver().override_url().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.yaml");

        let config = AdapterConfig {
            github_token: Some("ghp_test".to_string()),
            templates_dir: Some(PathBuf::from("/srv/adapter")),
            ..AdapterConfig::default()
        };
        config.save_to(&path).unwrap();

        let loaded = AdapterConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_rejects_empty_source() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "source:\n  owner: ''\n  repo: consul-k8s\n").unwrap();

        assert!(matches!(
            AdapterConfig::load_from(&path),
            Err(CoreError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_paths_prefer_templates_dir() {
        let config = AdapterConfig {
            templates_dir: Some(PathBuf::from("/srv/adapter")),
            ..AdapterConfig::default()
        };
        let paths = config.paths(Path::new("/work"));
        assert_eq!(
            paths.workload_path,
            PathBuf::from("/srv/adapter/templates/oam/workloads")
        );

        let paths = AdapterConfig::default().paths(Path::new("/work"));
        assert_eq!(
            paths.meshmodel_path,
            PathBuf::from("/work/templates/meshmodel/components")
        );
    }
}
