//! grpo-launch: validate a YAML training config and hand it to an external
//! GRPO trainer.
//!
//! The crate owns the launch sequence and nothing else. Training itself lives
//! behind the [`trainer::Trainer`] trait; the production implementation shells
//! out to the `oumi` CLI.

pub mod config;
pub mod error;
pub mod launcher;
pub mod trainer;

pub use config::{TrainingConfig, DEFAULT_CONFIG_PATH, DEFAULT_OUTPUT_DIR};
pub use error::LaunchError;
pub use launcher::{LaunchOptions, LaunchPhase, LaunchReport, Launcher};
