//! Startup lookup and the state it publishes
//!
//! [`Bootstrap::run`] is called once per process. The resulting
//! [`AdapterState`] is never mutated afterwards; consumers share it through an
//! `Arc` and treat an empty history as "version information unavailable".

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::catalog::CrdCatalog;
use crate::meshmodel::GenerationMethod;
use crate::source::{AppVersionResolver, ChartRef, DirectoryLister, ReleaseSource, SourceRef};
use crate::version::{VersionHistory, VersionHistoryBuilder, VersionRecord};

/// Where component templates are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterPaths {
    pub workload_path: PathBuf,
    pub meshmodel_path: PathBuf,
}

impl AdapterPaths {
    pub fn from_base(base: &Path) -> Self {
        Self {
            workload_path: base.join("templates").join("oam").join("workloads"),
            meshmodel_path: base.join("templates").join("meshmodel").join("components"),
        }
    }
}

/// Read-only state published by the bootstrap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterState {
    versions: VersionHistory,
    crd_names: Vec<String>,
    default_generation_method: Option<GenerationMethod>,
    paths: AdapterPaths,
}

impl AdapterState {
    /// State with no version information
    pub fn unavailable(paths: AdapterPaths) -> Self {
        Self {
            versions: VersionHistory::default(),
            crd_names: Vec::new(),
            default_generation_method: None,
            paths,
        }
    }

    pub fn versions(&self) -> &VersionHistory {
        &self.versions
    }

    pub fn crd_names(&self) -> &[String] {
        &self.crd_names
    }

    pub fn latest(&self) -> Option<&VersionRecord> {
        self.versions.latest()
    }

    pub fn latest_version(&self) -> Option<&str> {
        self.latest().map(|r| r.chart_version.as_str())
    }

    pub fn latest_app_version(&self) -> Option<&str> {
        self.latest().and_then(|r| r.app_version.as_deref())
    }

    pub fn default_generation_method(&self) -> Option<GenerationMethod> {
        self.default_generation_method
    }

    pub fn paths(&self) -> &AdapterPaths {
        &self.paths
    }

    pub fn is_available(&self) -> bool {
        !self.versions.is_empty()
    }
}

/// One-shot startup lookup of versions and CRD files
pub struct Bootstrap<'a> {
    releases: &'a dyn ReleaseSource,
    resolver: &'a dyn AppVersionResolver,
    lister: &'a dyn DirectoryLister,
    source: SourceRef,
    chart: ChartRef,
    timeout: Duration,
}

impl<'a> Bootstrap<'a> {
    pub fn new(
        releases: &'a dyn ReleaseSource,
        resolver: &'a dyn AppVersionResolver,
        lister: &'a dyn DirectoryLister,
    ) -> Self {
        Self {
            releases,
            resolver,
            lister,
            source: SourceRef::default(),
            chart: ChartRef::default(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn source(mut self, source: SourceRef) -> Self {
        self.source = source;
        self
    }

    pub fn chart(mut self, chart: ChartRef) -> Self {
        self.chart = chart;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the lookup. Never fails: every problem degrades to less state.
    pub async fn run(self, paths: AdapterPaths) -> AdapterState {
        match tokio::time::timeout(self.timeout, self.collect(paths.clone())).await {
            Ok(state) => state,
            Err(_) => {
                warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "bootstrap timed out; version information unavailable"
                );
                AdapterState::unavailable(paths)
            }
        }
    }

    async fn collect(&self, paths: AdapterPaths) -> AdapterState {
        let tags = match self
            .releases
            .list_release_tags(&self.source.owner, &self.source.repo)
            .await
        {
            Ok(tags) => tags,
            Err(e) => {
                warn!(error = %e, "could not list releases");
                Vec::new()
            }
        };

        let versions = VersionHistoryBuilder::new(self.resolver, &self.chart)
            .build(tags)
            .await;
        if versions.is_empty() {
            warn!(
                owner = %self.source.owner,
                repo = %self.source.repo,
                "no releases found; version information unavailable"
            );
            return AdapterState::unavailable(paths);
        }

        let crd_names = CrdCatalog::new(self.lister).fetch(&self.source).await;

        let state = AdapterState {
            versions,
            crd_names,
            default_generation_method: Some(GenerationMethod::Manifests),
            paths,
        };
        info!(
            versions = state.versions.len(),
            latest = state.latest_version().unwrap_or_default(),
            app_version = state.latest_app_version().unwrap_or_default(),
            crds = state.crd_names.len(),
            "bootstrap complete"
        );
        state
    }
}
