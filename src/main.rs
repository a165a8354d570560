//! grpo-launch: start a GRPO RL training run from a YAML config.
//!
//! With no flags this reads `backend/oumi/rl/training.yaml`, prints the model
//! being trained, runs `oumi train` on it and reports where outputs went.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use grpo_launch::trainer::{AnyTrainer, MockTrainer, OumiCliTrainer, DEFAULT_OUMI_PROGRAM};
use grpo_launch::{LaunchOptions, Launcher, DEFAULT_CONFIG_PATH};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Launch GRPO reinforcement-learning training through an external trainer.
#[derive(Parser)]
#[command(name = "grpo-launch", version, about)]
struct Cli {
    /// Path to the YAML training configuration.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Which trainer receives the config.
    #[arg(long, default_value = "oumi")]
    trainer: TrainerChoice,

    /// Trainer executable to run as `<program> train -c <config>`.
    #[arg(long, default_value = DEFAULT_OUMI_PROGRAM)]
    trainer_bin: String,

    /// Extra argument appended to the trainer command line (repeatable).
    #[arg(long = "trainer-arg", allow_hyphen_values = true)]
    trainer_args: Vec<String>,

    /// Validate the config and print the banner without training.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
enum TrainerChoice {
    /// The external `oumi` CLI.
    Oumi,
    /// Record the call without training.
    Mock,
}

// ---------------------------------------------------------------------------
// Entrypoint
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for status lines.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut trainer = create_trainer(&cli);
    let mut launcher = Launcher::new(
        std::io::stdout().lock(),
        LaunchOptions {
            dry_run: cli.dry_run,
        },
    );

    launcher
        .launch(&cli.config, &mut trainer)
        .await
        .with_context(|| format!("Launch from {} failed", cli.config.display()))?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Trainer construction
// ---------------------------------------------------------------------------

fn create_trainer(cli: &Cli) -> AnyTrainer {
    match cli.trainer {
        TrainerChoice::Oumi => {
            tracing::info!(program = %cli.trainer_bin, "Using oumi CLI trainer");
            AnyTrainer::Oumi(
                OumiCliTrainer::new(&cli.trainer_bin).with_args(cli.trainer_args.iter()),
            )
        }
        TrainerChoice::Mock => {
            tracing::info!("Using mock trainer");
            AnyTrainer::Mock(MockTrainer::new())
        }
    }
}
