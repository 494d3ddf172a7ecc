//! Manifest-config command - print the component generation config

use consul_adapter_core::ManifestConfig;

use crate::error::{CliError, Result};

/// Run the manifest-config command
pub fn run(version: &str) -> Result<()> {
    if version.trim().is_empty() {
        return Err(CliError::input("version must not be empty"));
    }

    let config = ManifestConfig::new(version);
    let json =
        serde_json::to_string_pretty(&config).map_err(|e| CliError::internal(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
