//! Meshmodel command - print the component model category and metadata

use consul_adapter_core::MeshModelConfig;

use crate::error::{CliError, Result};

pub fn run() -> Result<()> {
    let yaml = serde_yaml::to_string(&MeshModelConfig::default())
        .map_err(|e| CliError::internal(e.to_string()))?;
    print!("{}", yaml);
    Ok(())
}
