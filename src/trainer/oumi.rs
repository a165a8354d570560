//! Trainer backed by the `oumi` command-line tool.
//!
//! Runs `<program> train -c <staged config> [extra args...]` as a child
//! process. The child inherits stdin, stdout and stderr, so its own progress
//! output reaches the terminal unchanged.
//!
//! oumi checks its config against a strict schema, so the launcher-only
//! `model.name` key is stripped into a staged copy under the output directory
//! before the child starts.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use tokio::process::Command;
use tracing::{debug, info};

use super::traits::Trainer;
use crate::config::TrainingConfig;

/// Executable used when no other program is configured.
pub const DEFAULT_OUMI_PROGRAM: &str = "oumi";

/// File name of the staged config inside the output directory.
pub const STAGED_CONFIG_NAME: &str = "launch_config.yaml";

/// Delegates training to an external `oumi` process.
#[derive(Debug, Clone)]
pub struct OumiCliTrainer {
    program: OsString,
    extra_args: Vec<OsString>,
}

impl OumiCliTrainer {
    /// Create a trainer that runs `program`.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    /// Append arguments after `train -c <config>`.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Write the trainer-facing copy of `config` and return its path.
    pub fn stage_config(&self, config: &TrainingConfig) -> Result<PathBuf> {
        let dir = Path::new(config.output_dir());
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output dir {}", dir.display()))?;

        let path = dir.join(STAGED_CONFIG_NAME);
        let yaml = serde_yaml::to_string(&config.trainer_mapping())
            .context("failed to serialize trainer config")?;
        std::fs::write(&path, yaml)
            .with_context(|| format!("failed to write staged config {}", path.display()))?;

        debug!(path = %path.display(), "Staged trainer config");
        Ok(path)
    }

    /// The full argument list passed to the program for a staged config.
    pub fn command_args(&self, staged: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["train".into(), "-c".into(), staged.into()];
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

impl Default for OumiCliTrainer {
    fn default() -> Self {
        Self::new(DEFAULT_OUMI_PROGRAM)
    }
}

impl Trainer for OumiCliTrainer {
    async fn train(&mut self, config: &TrainingConfig) -> Result<()> {
        let staged = self.stage_config(config)?;
        let args = self.command_args(&staged);
        let program = self.program.to_string_lossy().into_owned();
        debug!(program = %program, ?args, "Spawning trainer process");

        let started = Instant::now();
        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("failed to run trainer program `{program}`"))?;

        let elapsed = started.elapsed();
        if !status.success() {
            bail!("`{program} train` exited with {status} after {elapsed:.1?}");
        }

        info!(program = %program, elapsed = ?elapsed, "Trainer process finished");
        Ok(())
    }

    fn name(&self) -> &str {
        "oumi-cli"
    }
}
