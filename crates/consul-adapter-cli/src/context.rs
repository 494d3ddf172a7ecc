//! Effective settings: config file plus command-line overrides

use consul_adapter_core::{AdapterConfig, AdapterState, Bootstrap, UrlResolver};
use consul_adapter_repo::Collaborators;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::GlobalArgs;
use crate::error::{CliError, Result};

/// Configuration resolved for one invocation
pub struct Context {
    pub config: AdapterConfig,
    pub config_path: PathBuf,
}

impl Context {
    /// Load the config file and apply flag and environment overrides
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let config_path = match &args.config {
            Some(path) => path.clone(),
            None => AdapterConfig::default_path()?,
        };

        let mut config = if config_path.exists() {
            AdapterConfig::load_from(&config_path)?
        } else if args.config.is_some() {
            return Err(CliError::Config {
                message: format!("config file {} does not exist", config_path.display()),
                help: None,
            });
        } else {
            AdapterConfig::default()
        };

        if let Some(url) = &args.override_url {
            config.override_url = Some(url.clone());
        }
        if let Some(token) = &args.github_token {
            config.github_token = Some(token.clone());
        }
        if let Some(secs) = args.timeout_secs {
            if secs == 0 {
                return Err(CliError::input("--timeout-secs must be greater than zero"));
            }
            config.bootstrap_timeout = Duration::from_secs(secs);
        }

        Ok(Self {
            config,
            config_path,
        })
    }

    pub fn url_resolver(&self) -> UrlResolver {
        self.config.url_resolver()
    }

    pub fn collaborators(&self) -> Result<Collaborators> {
        Ok(Collaborators::from_config(&self.config)?)
    }

    /// Run the startup lookup against the live upstream
    pub async fn bootstrap(&self) -> Result<Arc<AdapterState>> {
        let collaborators = self.collaborators()?;
        let cwd = std::env::current_dir()?;

        let state = Bootstrap::new(
            &collaborators.github,
            &collaborators.helm,
            &collaborators.github,
        )
        .source(self.config.source.clone())
        .chart(self.config.chart.clone())
        .timeout(self.config.bootstrap_timeout)
        .run(self.config.paths(&cwd))
        .await;

        Ok(Arc::new(state))
    }

    /// `version` if given, otherwise the latest known release
    pub async fn version_or_latest(&self, version: Option<&str>) -> Result<String> {
        if let Some(version) = version {
            return Ok(version.to_string());
        }
        let state = self.bootstrap().await?;
        state
            .latest_version()
            .map(str::to_string)
            .ok_or_else(|| CliError::unavailable("no upstream releases could be listed"))
    }
}
