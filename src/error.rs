//! Error type for configuration loading and training delegation.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a launch.
///
/// Configuration failures are raised before any status line is printed and
/// before the trainer is touched. A [`LaunchError::Trainer`] means the
/// delegate itself failed.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// The config file could not be opened or read.
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML.
    #[error("failed to parse config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The document parsed, but its root is not a mapping.
    #[error("config {} must be a YAML mapping at the top level", .path.display())]
    NotAMapping { path: PathBuf },

    /// A key the launcher reads is absent.
    #[error("config is missing required key `{key}`")]
    MissingKey { key: &'static str },

    /// A key the launcher reads has the wrong type.
    #[error("config key `{key}` must be a {expected}")]
    InvalidKey {
        key: &'static str,
        expected: &'static str,
    },

    /// The external trainer reported a failure.
    #[error("training failed: {0:#}")]
    Trainer(anyhow::Error),

    /// A status line could not be written.
    #[error("failed to write status output: {0}")]
    Output(#[from] std::io::Error),
}

impl LaunchError {
    /// True for failures detected while loading the configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigRead { .. }
                | Self::ConfigParse { .. }
                | Self::NotAMapping { .. }
                | Self::MissingKey { .. }
                | Self::InvalidKey { .. }
        )
    }

    /// True when the config file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ConfigRead { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}
