//! Training configuration loaded from YAML.
//!
//! The launcher reads only a handful of keys: `model.name` (required) plus
//! `training.output_dir` and `training.trainer_type` (optional, for status
//! output). The rest of the document is handed to the trainer untouched.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};

use crate::error::LaunchError;

/// Config path used when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "backend/oumi/rl/training.yaml";

/// Where the trainer writes artifacts unless `training.output_dir` says otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = "backend/oumi/rl/outputs";

/// The part of the `model` section the launcher understands.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelSection {
    /// Human-readable name printed in the banner.
    pub name: String,
}

/// The part of the `training` section the launcher understands.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainingSection {
    /// Directory the trainer writes checkpoints and logs to.
    #[serde(default)]
    pub output_dir: Option<String>,
    /// Trainer backend label (e.g. `TRL_GRPO`).
    #[serde(default)]
    pub trainer_type: Option<String>,
}

/// A parsed training configuration.
///
/// `raw` is the full document exactly as parsed; it is never mutated. The
/// typed sections are views the launcher validates up front so that a missing
/// model name fails before the trainer starts.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    raw: Mapping,
    model: ModelSection,
    training: TrainingSection,
    source: Option<PathBuf>,
}

impl TrainingConfig {
    /// Read and validate the config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LaunchError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LaunchError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_yaml_str(&text, Some(path))?;
        debug!(
            path = %path.display(),
            keys = config.raw.len(),
            model = %config.model.name,
            "Loaded training config"
        );
        if config.uses_default_output_dir() {
            warn!(
                path = %path.display(),
                output_dir = DEFAULT_OUTPUT_DIR,
                "training.output_dir not set; assuming default"
            );
        }
        Ok(config)
    }

    /// Parse a config from YAML text. `source` is recorded for trainers that
    /// need a file on disk and for error messages.
    pub fn from_yaml_str(text: &str, source: Option<&Path>) -> Result<Self, LaunchError> {
        let label = source
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("<inline>"));

        let value: Value = serde_yaml::from_str(text).map_err(|source| LaunchError::ConfigParse {
            path: label.clone(),
            source,
        })?;

        let raw = match value {
            Value::Mapping(map) => map,
            _ => return Err(LaunchError::NotAMapping { path: label }),
        };

        let model = read_model_section(&raw)?;
        let training = read_training_section(&raw)?;

        Ok(Self {
            raw,
            model,
            training,
            source: source.map(Path::to_path_buf),
        })
    }

    /// The `model.name` value.
    pub fn model_name(&self) -> &str {
        &self.model.name
    }

    /// The complete document, for trainers that consume it in-process.
    pub fn raw(&self) -> &Mapping {
        &self.raw
    }

    /// The document minus launcher-only keys (`model.name`), for trainers
    /// that validate against their own schema.
    pub fn trainer_mapping(&self) -> Mapping {
        let mut mapping = self.raw.clone();
        if let Some(Value::Mapping(model)) = mapping.get_mut("model") {
            model.remove("name");
        }
        mapping
    }

    /// The file this config was read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// `training.output_dir`, falling back to [`DEFAULT_OUTPUT_DIR`].
    pub fn output_dir(&self) -> &str {
        self.training.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR)
    }

    /// True when `training.output_dir` is absent.
    pub fn uses_default_output_dir(&self) -> bool {
        self.training.output_dir.is_none()
    }

    /// `training.trainer_type` (e.g. `TRL_GRPO`), if set.
    pub fn trainer_type(&self) -> Option<&str> {
        self.training.trainer_type.as_deref()
    }
}

fn read_model_section(raw: &Mapping) -> Result<ModelSection, LaunchError> {
    let model = raw
        .get("model")
        .ok_or(LaunchError::MissingKey { key: "model" })?;

    let fields = model.as_mapping().ok_or(LaunchError::InvalidKey {
        key: "model",
        expected: "mapping",
    })?;

    if !fields.contains_key("name") {
        return Err(LaunchError::MissingKey { key: "model.name" });
    }

    serde_yaml::from_value(model.clone()).map_err(|_| LaunchError::InvalidKey {
        key: "model.name",
        expected: "string",
    })
}

fn read_training_section(raw: &Mapping) -> Result<TrainingSection, LaunchError> {
    match raw.get("training") {
        None | Some(Value::Null) => Ok(TrainingSection::default()),
        Some(training) => {
            serde_yaml::from_value(training.clone()).map_err(|_| LaunchError::InvalidKey {
                key: "training",
                expected: "mapping with string output_dir and trainer_type",
            })
        }
    }
}
