//! CLI error types with exit code handling

use consul_adapter_core::CoreError;
use consul_adapter_repo::RepoError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Config file missing, unreadable or invalid
    #[error("Configuration error: {message}")]
    #[diagnostic(code(consul_adapter::cli::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Upstream lookup or download failed
    #[error("Network error: {message}")]
    #[diagnostic(code(consul_adapter::cli::network))]
    Network {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// No upstream version information is known
    #[error("Version information unavailable: {message}")]
    #[diagnostic(
        code(consul_adapter::cli::unavailable),
        help("pass --chart-version explicitly, or check network access to the GitHub API")
    )]
    Unavailable { message: String },

    /// Invalid command-line input
    #[error("Invalid input: {message}")]
    #[diagnostic(code(consul_adapter::cli::input))]
    Input { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(consul_adapter::cli::io))]
    Io { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(consul_adapter::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config { .. } => exit_codes::CONFIG_ERROR,
            CliError::Network { .. } => exit_codes::NETWORK_ERROR,
            CliError::Unavailable { .. } => exit_codes::UNAVAILABLE,
            CliError::Input { .. } => exit_codes::USAGE_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create an input error (user provided invalid input)
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidConfig { .. } | CoreError::Serialization(_) => CliError::Config {
                message: err.to_string(),
                help: Some("check the file shown by 'consul-adapter config path'".to_string()),
            },
            CoreError::Io(e) => e.into(),
            other => CliError::Network {
                message: other.to_string(),
                help: None,
            },
        }
    }
}

impl From<RepoError> for CliError {
    fn from(err: RepoError) -> Self {
        let help = match &err {
            RepoError::RateLimited { .. } | RepoError::AuthRequired { .. } => {
                Some("set GITHUB_TOKEN or --github-token".to_string())
            }
            RepoError::NotFound { .. } => {
                Some("check the version and CRD name, or the override URL".to_string())
            }
            _ => None,
        };
        CliError::Network {
            message: err.to_string(),
            help,
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::input("x").exit_code(), exit_codes::USAGE_ERROR);
        assert_eq!(CliError::unavailable("x").exit_code(), exit_codes::UNAVAILABLE);
        assert_eq!(CliError::internal("x").exit_code(), exit_codes::ERROR);
    }

    #[test]
    fn test_core_error_mapping() {
        let err: CliError = CoreError::InvalidConfig {
            message: "bad".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_codes::CONFIG_ERROR);

        let err: CliError = CoreError::ReleaseLookup {
            owner: "hashicorp".to_string(),
            repo: "consul-k8s".to_string(),
            message: "boom".to_string(),
        }
        .into();
        assert_eq!(err.exit_code(), exit_codes::NETWORK_ERROR);
    }

    #[test]
    fn test_rate_limit_has_help() {
        let err: CliError = RepoError::RateLimited { retry_after: 60 }.into();
        match err {
            CliError::Network { help, .. } => assert!(help.unwrap().contains("GITHUB_TOKEN")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
