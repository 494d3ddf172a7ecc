//! Config commands - inspect the effective configuration

use crate::context::Context;
use crate::error::{CliError, Result};

const REDACTED: &str = "<redacted>";

/// Print the config file location
pub fn path(ctx: &Context) -> Result<()> {
    println!("{}", ctx.config_path.display());
    Ok(())
}

/// Print the configuration after overrides, without secrets
pub fn show(ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    if config.github_token.is_some() {
        config.github_token = Some(REDACTED.to_string());
    }

    let yaml = serde_yaml::to_string(&config).map_err(|e| CliError::internal(e.to_string()))?;
    print!("{}", yaml);
    Ok(())
}
