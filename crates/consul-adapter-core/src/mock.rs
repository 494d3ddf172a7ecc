//! In-memory collaborators for testing
//!
//! These stand in for the GitHub and Helm clients so the bootstrap can be
//! exercised without network access. Each fake records its calls for
//! assertions.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::error::{CoreError, Result};
use crate::source::{AppVersionResolver, DirectoryLister, ReleaseSource};

/// Canned release listing
#[derive(Clone, Default)]
pub struct MockReleaseSource {
    tags: Option<Vec<String>>,
    hang: bool,
    calls: Arc<RwLock<Vec<(String, String)>>>,
}

impl MockReleaseSource {
    /// Source returning these tags
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: Some(tags.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Source whose lookup always fails
    pub fn failing() -> Self {
        Self::default()
    }

    /// Source whose lookup never completes
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ReleaseSource for MockReleaseSource {
    async fn list_release_tags(&self, owner: &str, repo: &str) -> Result<Vec<String>> {
        self.calls
            .write()
            .unwrap()
            .push((owner.to_string(), repo.to_string()));
        if self.hang {
            std::future::pending::<()>().await;
        }
        self.tags.clone().ok_or_else(|| CoreError::ReleaseLookup {
            owner: owner.to_string(),
            repo: repo.to_string(),
            message: "mock failure".to_string(),
        })
    }
}

/// Canned app version lookup
#[derive(Clone, Default)]
pub struct MockResolver {
    app_version: Option<String>,
    calls: Arc<RwLock<Vec<(String, String, String)>>>,
}

impl MockResolver {
    pub fn returning(app_version: impl Into<String>) -> Self {
        Self {
            app_version: Some(app_version.into()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    /// Recorded `(repo_url, chart_name, chart_version)` calls
    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl AppVersionResolver for MockResolver {
    async fn resolve_app_version(
        &self,
        repo_url: &str,
        chart_name: &str,
        chart_version: &str,
    ) -> Result<String> {
        self.calls.write().unwrap().push((
            repo_url.to_string(),
            chart_name.to_string(),
            chart_version.to_string(),
        ));
        self.app_version
            .clone()
            .ok_or_else(|| CoreError::AppVersionLookup {
                chart: chart_name.to_string(),
                version: chart_version.to_string(),
                message: "mock failure".to_string(),
            })
    }
}

/// Canned directory listing
#[derive(Clone, Default)]
pub struct MockLister {
    files: Option<Vec<String>>,
    calls: Arc<RwLock<Vec<(String, String, String)>>>,
}

impl MockLister {
    pub fn with_files<I, S>(files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: Some(files.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl DirectoryLister for MockLister {
    async fn list_file_names(&self, owner: &str, repo: &str, path: &str) -> Result<Vec<String>> {
        self.calls
            .write()
            .unwrap()
            .push((owner.to_string(), repo.to_string(), path.to_string()));
        self.files
            .clone()
            .ok_or_else(|| CoreError::DirectoryListing {
                owner: owner.to_string(),
                repo: repo.to_string(),
                path: path.to_string(),
                message: "mock failure".to_string(),
            })
    }
}
