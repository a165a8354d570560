//! The launch sequence: load → announce → delegate → report.
//!
//! ```text
//! Loading ──(config valid)──▶ Delegated ──(trainer Ok)──▶ completion line
//!    │                            │
//!    └── config error             └── trainer error
//!        (nothing printed)            (no completion line)
//! ```
//!
//! Any failure ends the launch. Status lines go to the sink given to
//! [`Launcher::new`]; diagnostics go through `tracing`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{error, info};

use crate::config::TrainingConfig;
use crate::error::LaunchError;
use crate::trainer::Trainer;

/// First status line, printed once the config has been validated.
pub const STARTING_BANNER: &str = "🚀 Starting Oumi GRPO RL training...";

/// Where the launch sequence currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchPhase {
    /// Reading and validating the configuration.
    Loading,
    /// The configuration has been handed to the trainer.
    Delegated,
}

/// Launcher behaviour switches.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Validate and announce, but do not call the trainer.
    pub dry_run: bool,
}

/// What a successful launch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    pub model_name: String,
    pub output_dir: String,
    /// False only for dry runs.
    pub trainer_invoked: bool,
}

/// Drives a single launch, writing status lines to `out`.
pub struct Launcher<W: Write> {
    out: W,
    options: LaunchOptions,
    phase: LaunchPhase,
}

impl<W: Write> Launcher<W> {
    pub fn new(out: W, options: LaunchOptions) -> Self {
        Self {
            out,
            options,
            phase: LaunchPhase::Loading,
        }
    }

    pub fn phase(&self) -> LaunchPhase {
        self.phase
    }

    /// Consume the launcher and return its sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Load the config at `path`, then run it through `trainer`.
    ///
    /// The trainer is not touched when loading fails.
    pub async fn launch<T: Trainer>(
        &mut self,
        path: impl AsRef<Path>,
        trainer: &mut T,
    ) -> Result<LaunchReport, LaunchError> {
        self.phase = LaunchPhase::Loading;
        let config = TrainingConfig::load(path)?;
        self.run(&config, trainer).await
    }

    /// Announce an already-loaded config and delegate it to `trainer`.
    pub async fn run<T: Trainer>(
        &mut self,
        config: &TrainingConfig,
        trainer: &mut T,
    ) -> Result<LaunchReport, LaunchError> {
        let mut report = LaunchReport {
            model_name: config.model_name().to_owned(),
            output_dir: config.output_dir().to_owned(),
            trainer_invoked: false,
        };

        writeln!(self.out, "{STARTING_BANNER}")?;
        writeln!(self.out, "Using model: {}", config.model_name())?;
        self.out.flush()?;

        if self.options.dry_run {
            let source = config
                .source()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("<inline>"));
            writeln!(
                self.out,
                "Dry run: trainer not invoked (config {})",
                source.display()
            )?;
            self.out.flush()?;
            info!(model = %report.model_name, "Dry run finished");
            return Ok(report);
        }

        self.phase = LaunchPhase::Delegated;
        info!(
            trainer = trainer.name(),
            model = %report.model_name,
            trainer_type = config.trainer_type().unwrap_or("unspecified"),
            "Delegating to trainer"
        );

        let started = Instant::now();
        if let Err(err) = trainer.train(config).await {
            error!(trainer = trainer.name(), error = %format!("{err:#}"), "Trainer failed");
            return Err(LaunchError::Trainer(err));
        }
        report.trainer_invoked = true;
        info!(
            trainer = trainer.name(),
            elapsed = ?started.elapsed(),
            "Trainer returned"
        );

        writeln!(
            self.out,
            "✅ Training complete! Outputs saved in {}",
            report.output_dir
        )?;
        self.out.flush()?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trainer::MockTrainer;

    const QWEN: &str = "model:\n  name: \"qwen-7b\"\n";

    fn lines(out: Vec<u8>) -> Vec<String> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[tokio::test]
    async fn test_status_lines_in_order() {
        let config = TrainingConfig::from_yaml_str(QWEN, None).unwrap();
        let mut trainer = MockTrainer::new();
        let mut launcher = Launcher::new(Vec::new(), LaunchOptions::default());

        let report = launcher.run(&config, &mut trainer).await.unwrap();

        assert_eq!(launcher.phase(), LaunchPhase::Delegated);
        assert!(report.trainer_invoked);
        assert_eq!(report.model_name, "qwen-7b");
        assert_eq!(trainer.models_seen(), ["qwen-7b".to_string()]);

        let out = lines(launcher.into_inner());
        assert_eq!(out.len(), 3);
        assert!(out[0].contains("Starting"));
        assert!(out[1].contains("qwen-7b"));
        assert!(out[2].contains("Training complete"));
        assert!(out[2].ends_with(crate::config::DEFAULT_OUTPUT_DIR));
    }

    #[tokio::test]
    async fn test_trainer_failure_skips_completion() {
        let config = TrainingConfig::from_yaml_str(QWEN, None).unwrap();
        let mut trainer = MockTrainer::failing("CUDA out of memory");
        let mut launcher = Launcher::new(Vec::new(), LaunchOptions::default());

        let err = launcher.run(&config, &mut trainer).await.unwrap_err();

        assert!(matches!(err, LaunchError::Trainer(_)));
        assert!(!err.is_config_error());
        assert!(err.to_string().contains("CUDA out of memory"));
        assert_eq!(trainer.call_count(), 1);
        assert_eq!(launcher.phase(), LaunchPhase::Delegated);

        let out = lines(launcher.into_inner());
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|l| !l.contains("Training complete")));
    }

    #[tokio::test]
    async fn test_dry_run_never_calls_trainer() {
        let config = TrainingConfig::from_yaml_str(QWEN, None).unwrap();
        let mut trainer = MockTrainer::new();
        let mut launcher = Launcher::new(Vec::new(), LaunchOptions { dry_run: true });

        let report = launcher.run(&config, &mut trainer).await.unwrap();

        assert!(!report.trainer_invoked);
        assert_eq!(trainer.call_count(), 0);
        assert_eq!(launcher.phase(), LaunchPhase::Loading);

        let out = lines(launcher.into_inner());
        assert_eq!(out.len(), 3);
        assert!(out[2].starts_with("Dry run"));
    }

    #[tokio::test]
    async fn test_missing_file_prints_nothing() {
        let mut trainer = MockTrainer::new();
        let mut launcher = Launcher::new(Vec::new(), LaunchOptions::default());

        let err = launcher
            .launch("no/such/dir/training.yaml", &mut trainer)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(trainer.call_count(), 0);
        assert_eq!(launcher.phase(), LaunchPhase::Loading);
        assert!(launcher.into_inner().is_empty());
    }
}
