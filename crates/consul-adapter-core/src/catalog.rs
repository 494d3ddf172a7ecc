//! CRD file catalog of the upstream source tree

use tracing::{debug, warn};

use crate::source::{DirectoryLister, SourceRef};

/// Enumerates the CRD manifest files published by the upstream source tree
pub struct CrdCatalog<'a> {
    lister: &'a dyn DirectoryLister,
}

impl<'a> CrdCatalog<'a> {
    pub fn new(lister: &'a dyn DirectoryLister) -> Self {
        Self { lister }
    }

    /// File names under the CRD directory, in listing order.
    ///
    /// A failed listing yields an empty catalog.
    pub async fn fetch(&self, source: &SourceRef) -> Vec<String> {
        match self
            .lister
            .list_file_names(&source.owner, &source.repo, &source.crd_path)
            .await
        {
            Ok(names) => {
                debug!(count = names.len(), path = %source.crd_path, "listed CRD files");
                names
            }
            Err(e) => {
                warn!(path = %source.crd_path, error = %e, "could not list CRD files");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockLister;

    #[tokio::test]
    async fn test_fetch_passes_listing_through() {
        let lister = MockLister::with_files(["b.yaml", "a.yaml", "b.yaml"]);
        let names = CrdCatalog::new(&lister).fetch(&SourceRef::default()).await;

        assert_eq!(names, vec!["b.yaml", "a.yaml", "b.yaml"]);
        assert_eq!(
            lister.calls(),
            vec![(
                "hashicorp".to_string(),
                "consul-k8s".to_string(),
                "control-plane/config/crd/bases/".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_is_empty() {
        let lister = MockLister::failing();
        let names = CrdCatalog::new(&lister).fetch(&SourceRef::default()).await;
        assert!(names.is_empty());
    }
}
