//! Crds command - list the CRD manifest files upstream

use console::style;

use crate::context::Context;
use crate::error::{CliError, Result};

/// Run the crds command
pub async fn run(ctx: &Context, output_json: bool) -> Result<()> {
    let state = ctx.bootstrap().await?;

    if output_json {
        let json = serde_json::to_string_pretty(state.crd_names())
            .map_err(|e| CliError::internal(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    if state.crd_names().is_empty() {
        println!("{}", style("No CRD manifests found").yellow());
        return Ok(());
    }

    println!(
        "CRD manifests at {}:\n",
        style(manifest_location(ctx, state.latest_version())).cyan()
    );
    for name in state.crd_names() {
        println!("  {}", name);
    }
    println!("\n{} file(s)", state.crd_names().len());

    Ok(())
}

/// Where the listed manifests are downloaded from
fn manifest_location(ctx: &Context, latest: Option<&str>) -> String {
    let resolver = ctx.url_resolver();
    match resolver.override_url() {
        Some(url) => url.to_string(),
        None => resolver.base_url(latest.unwrap_or_default()),
    }
}
