//! Raw CRD manifest download

use consul_adapter_core::ManifestConfig;

use crate::client::HttpClient;
use crate::error::Result;

/// Downloads CRD manifests and splits them with a [`ManifestConfig`]
pub struct ManifestFetcher {
    client: HttpClient,
}

impl ManifestFetcher {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Raw manifest text at `url`
    pub async fn fetch(&self, url: &str) -> Result<String> {
        self.client.get_text(url).await
    }

    /// Download `url` and split it into CRD documents
    pub async fn fetch_documents(&self, url: &str, config: &ManifestConfig) -> Result<Vec<String>> {
        let manifest = self.fetch(url).await?;
        Ok(config.extract(&manifest))
    }
}
