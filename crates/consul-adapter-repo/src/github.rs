//! GitHub REST API lookups
//!
//! Lists published release tags and directory contents of a repository.

use async_trait::async_trait;
use semver::Version;
use serde::Deserialize;
use tracing::debug;

use consul_adapter_core::error::CoreError;
use consul_adapter_core::source::{DirectoryLister, ReleaseSource};

use crate::client::HttpClient;
use crate::error::Result;

const PER_PAGE: usize = 100;
const MAX_PAGES: usize = 10;

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
    #[serde(default)]
    draft: bool,
    #[serde(default)]
    prerelease: bool,
}

#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// GitHub client for release tags and directory listings
pub struct GitHubSource {
    client: HttpClient,
    api_url: String,
}

impl GitHubSource {
    pub fn new(client: HttpClient, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Published release tags, sorted by semver from oldest to newest.
    ///
    /// Drafts, prereleases and tags that are not semver are skipped.
    pub async fn release_tags(&self, owner: &str, repo: &str) -> Result<Vec<String>> {
        let mut tagged: Vec<(Version, String)> = Vec::new();

        for page in 1..=MAX_PAGES {
            let url = format!(
                "{}/repos/{}/{}/releases?per_page={}&page={}",
                self.api_url, owner, repo, PER_PAGE, page
            );
            let releases: Vec<Release> = self.client.get_json(&url).await?;
            let page_len = releases.len();

            for release in releases {
                if release.draft || release.prerelease {
                    continue;
                }
                let tag = release.tag_name;
                match Version::parse(tag.strip_prefix('v').unwrap_or(&tag)) {
                    Ok(version) => tagged.push((version, tag)),
                    Err(e) => debug!(tag = %tag, error = %e, "skipping non-semver release tag"),
                }
            }

            if page_len < PER_PAGE {
                break;
            }
        }

        tagged.sort_by(|(a, _), (b, _)| a.cmp(b));
        tagged.dedup_by(|(a, _), (b, _)| a == b);
        Ok(tagged.into_iter().map(|(_, tag)| tag).collect())
    }

    /// Names of the files directly under `path`, in listing order
    pub async fn file_names(&self, owner: &str, repo: &str, path: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url,
            owner,
            repo,
            path.trim_matches('/')
        );
        let entries: Vec<ContentEntry> = self.client.get_json(&url).await?;
        Ok(entries
            .into_iter()
            .filter(|e| e.kind == "file")
            .map(|e| e.name)
            .collect())
    }
}

#[async_trait]
impl ReleaseSource for GitHubSource {
    async fn list_release_tags(
        &self,
        owner: &str,
        repo: &str,
    ) -> consul_adapter_core::Result<Vec<String>> {
        self.release_tags(owner, repo)
            .await
            .map_err(|e| CoreError::ReleaseLookup {
                owner: owner.to_string(),
                repo: repo.to_string(),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl DirectoryLister for GitHubSource {
    async fn list_file_names(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> consul_adapter_core::Result<Vec<String>> {
        self.file_names(owner, repo, path)
            .await
            .map_err(|e| CoreError::DirectoryListing {
                owner: owner.to_string(),
                repo: repo.to_string(),
                path: path.to_string(),
                message: e.to_string(),
            })
    }
}
