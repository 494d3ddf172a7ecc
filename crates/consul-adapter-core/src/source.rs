//! Upstream coordinates and the collaborator traits the bootstrap drives
//!
//! The core never talks to the network itself. Release listing, chart
//! lookups and directory listings go through these traits so the bootstrap
//! can be exercised against in-memory fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default owner of the upstream source tree
pub const DEFAULT_OWNER: &str = "hashicorp";

/// Default upstream source repository
pub const DEFAULT_REPO: &str = "consul-k8s";

/// Directory holding the CRD manifests inside the source tree
pub const DEFAULT_CRD_PATH: &str = "control-plane/config/crd/bases/";

/// Helm repository publishing the chart
pub const DEFAULT_CHART_REPO_URL: &str = "https://helm.releases.hashicorp.com";

/// Canonical chart name
pub const DEFAULT_CHART_NAME: &str = "consul";

/// Lists release identifiers of a source repository
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Release tags, sorted oldest to newest
    async fn list_release_tags(&self, owner: &str, repo: &str) -> Result<Vec<String>>;
}

/// Maps a chart version to the application version it ships
#[async_trait]
pub trait AppVersionResolver: Send + Sync {
    async fn resolve_app_version(
        &self,
        repo_url: &str,
        chart_name: &str,
        chart_version: &str,
    ) -> Result<String>;
}

/// Lists the file names under a path of a source repository
#[async_trait]
pub trait DirectoryLister: Send + Sync {
    async fn list_file_names(&self, owner: &str, repo: &str, path: &str) -> Result<Vec<String>>;
}

/// Location of the upstream source tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    pub owner: String,
    pub repo: String,
    #[serde(default = "default_crd_path")]
    pub crd_path: String,
}

fn default_crd_path() -> String {
    DEFAULT_CRD_PATH.to_string()
}

impl Default for SourceRef {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            crd_path: default_crd_path(),
        }
    }
}

/// Location of the Helm chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRef {
    pub repo_url: String,
    pub name: String,
}

impl Default for ChartRef {
    fn default() -> Self {
        Self {
            repo_url: DEFAULT_CHART_REPO_URL.to_string(),
            name: DEFAULT_CHART_NAME.to_string(),
        }
    }
}
