//! Extract command - download a CRD manifest and split it into documents

use console::style;
use consul_adapter_core::{DOCUMENT_SEPARATOR, ManifestConfig};

use crate::context::Context;
use crate::error::Result;

/// Run the extract command
pub async fn run(ctx: &Context, crd: &str, version: Option<&str>, show: bool) -> Result<()> {
    let resolver = ctx.url_resolver();
    let version = match resolver.override_url() {
        Some(_) => version.unwrap_or_default().to_string(),
        None => ctx.version_or_latest(version).await?,
    };
    let url = resolver.resolve(crd, &version);

    tracing::info!(%url, "downloading CRD manifest");
    let collaborators = ctx.collaborators()?;
    let documents = collaborators
        .manifests
        .fetch_documents(&url, &ManifestConfig::new(&version))
        .await?;

    if show {
        println!("{}", documents.join(DOCUMENT_SEPARATOR));
        return Ok(());
    }

    println!(
        "{} {} document(s) from {}",
        style("Extracted").green().bold(),
        documents.len(),
        url
    );
    Ok(())
}
