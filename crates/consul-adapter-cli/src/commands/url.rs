//! Url command - print where a CRD manifest is downloaded from

use crate::context::Context;
use crate::error::Result;

/// Run the url command
pub async fn run(ctx: &Context, crd: &str, version: Option<&str>) -> Result<()> {
    let resolver = ctx.url_resolver();

    // An override wins over any version, so skip the upstream lookup
    if let Some(url) = resolver.override_url() {
        println!("{}", url);
        return Ok(());
    }

    let version = ctx.version_or_latest(version).await?;
    println!("{}", resolver.resolve(crd, &version));
    Ok(())
}
