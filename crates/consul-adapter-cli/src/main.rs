//! consul-adapter CLI - Consul control-plane versions and CRD manifests

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod error;
mod exit_codes;

use context::Context;
use error::Result;

#[derive(Parser)]
#[command(name = "consul-adapter")]
#[command(author = "consul-adapter Contributors")]
#[command(version)]
#[command(about = "Resolve Consul control-plane versions and CRD manifests", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

/// Flags shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Config file (default: ~/.config/consul-adapter/config.yaml)
    #[arg(long, global = true, env = "CONSUL_ADAPTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Replace every CRD download URL with this one
    #[arg(long, global = true, env = "OVERRIDE_URL")]
    pub override_url: Option<String>,

    /// GitHub API token
    #[arg(long, global = true, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Upper bound on the upstream lookup, in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// List known chart versions
    Versions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List CRD manifest files of the latest release
    Crds {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the download URL of a CRD manifest
    Url {
        /// CRD file name
        crd: String,

        /// Chart version (default: latest)
        #[arg(short = 'c', long)]
        chart_version: Option<String>,
    },

    /// Print the component generation config for a version
    ManifestConfig {
        /// Mesh version
        #[arg(value_name = "VERSION")]
        mesh_version: String,
    },

    /// Download a CRD manifest and split it into documents
    Extract {
        /// CRD file name
        crd: String,

        /// Chart version (default: latest)
        #[arg(short = 'c', long)]
        chart_version: Option<String>,

        /// Print the documents, not only their count
        #[arg(long)]
        show: bool,
    },

    /// Print the component model category and metadata
    Meshmodel,

    /// Inspect adapter configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the config file location
    Path,

    /// Show the effective configuration
    Show,
}

fn main() {
    miette::set_panic_hook();

    let cli = Cli::parse();
    init_tracing(cli.global.debug);

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => exit_with(error::CliError::internal(e.to_string())),
    };

    if let Err(err) = runtime.block_on(run(cli)) {
        exit_with(err);
    }
}

fn exit_with(err: error::CliError) -> ! {
    let code = err.exit_code();
    eprintln!("{:?}", miette::Report::new(err));
    std::process::exit(code);
}

fn init_tracing(debug: bool) {
    let default = if debug {
        "info,consul_adapter=debug,consul_adapter_core=debug,consul_adapter_repo=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let Cli { command, global } = cli;

    match command {
        Commands::Meshmodel => commands::meshmodel::run(),

        Commands::ManifestConfig { mesh_version } => {
            commands::manifest_config::run(&mesh_version)
        }

        Commands::Versions { json } => {
            commands::versions::run(&Context::load(&global)?, json).await
        }

        Commands::Crds { json } => commands::crds::run(&Context::load(&global)?, json).await,

        Commands::Url { crd, chart_version } => {
            commands::url::run(&Context::load(&global)?, &crd, chart_version.as_deref()).await
        }

        Commands::Extract {
            crd,
            chart_version,
            show,
        } => {
            let ctx = Context::load(&global)?;
            commands::extract::run(&ctx, &crd, chart_version.as_deref(), show).await
        }

        Commands::Config { command } => {
            let ctx = Context::load(&global)?;
            match command {
                ConfigCommands::Path => commands::config::path(&ctx),
                ConfigCommands::Show => commands::config::show(&ctx),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_manifest_config_takes_positional_version() {
        let cli = Cli::try_parse_from(["consul-adapter", "manifest-config", "v1.2.0"]).unwrap();
        match cli.command {
            Commands::ManifestConfig { mesh_version } => assert_eq!(mesh_version, "v1.2.0"),
            _ => panic!("expected manifest-config"),
        }
    }
}
