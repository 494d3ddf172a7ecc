//! Versions command - show the chart version history

use console::style;

use crate::context::Context;
use crate::error::{CliError, Result};

/// Run the versions command
pub async fn run(ctx: &Context, output_json: bool) -> Result<()> {
    let state = ctx.bootstrap().await?;

    if output_json {
        let json = serde_json::to_string_pretty(&*state)
            .map_err(|e| CliError::internal(e.to_string()))?;
        println!("{}", json);
        return Ok(());
    }

    if !state.is_available() {
        println!("{}", style("Version information unavailable").yellow());
        return Ok(());
    }

    println!(
        "Releases of {}/{}:\n",
        style(&ctx.config.source.owner).cyan(),
        style(&ctx.config.source.repo).cyan()
    );
    println!(
        "{:<20} {:<20}",
        style("CHART VERSION").bold(),
        style("APP VERSION").bold()
    );

    let latest = state.latest_version();
    for record in state.versions().iter() {
        let app_version = record.app_version.as_deref().unwrap_or("-");
        if Some(record.chart_version.as_str()) == latest {
            println!(
                "{:<20} {:<20}",
                style(&record.chart_version).green(),
                style(app_version).green()
            );
        } else {
            println!(
                "{:<20} {:<20}",
                record.chart_version,
                style(app_version).dim()
            );
        }
    }

    if !state.versions().ordering_verified() {
        eprintln!(
            "\n{} release list is not sorted oldest to newest; latest may be wrong",
            style("Warning:").yellow().bold()
        );
    }

    Ok(())
}
