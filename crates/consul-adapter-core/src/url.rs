//! Download locations for CRD manifests

use crate::source::SourceRef;

/// Host serving raw files of the upstream source tree
pub const RAW_CONTENT_HOST: &str = "https://raw.githubusercontent.com";

/// Computes CRD download URLs, honoring an operator override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlResolver {
    source: SourceRef,
    override_url: Option<String>,
}

impl UrlResolver {
    /// An empty override is treated as unset
    pub fn new(source: SourceRef, override_url: Option<String>) -> Self {
        Self {
            source,
            override_url: override_url.filter(|url| !url.is_empty()),
        }
    }

    pub fn override_url(&self) -> Option<&str> {
        self.override_url.as_deref()
    }

    /// URL of `crd` at `version`.
    ///
    /// With an override configured both arguments are ignored.
    pub fn resolve(&self, crd: &str, version: &str) -> String {
        if let Some(url) = &self.override_url {
            return url.clone();
        }
        [self.base_url(version).as_str(), crd].join("/")
    }

    /// Directory holding the CRDs of `version`
    pub fn base_url(&self, version: &str) -> String {
        let mut url = format!(
            "{}/{}/{}/{}",
            RAW_CONTENT_HOST, self.source.owner, self.source.repo, version
        );
        // An empty path means the repository root
        let crd_path = self.source.crd_path.trim_matches('/');
        if !crd_path.is_empty() {
            url.push('/');
            url.push_str(crd_path);
        }
        url
    }
}

impl Default for UrlResolver {
    fn default() -> Self {
        Self::new(SourceRef::default(), None)
    }
}
