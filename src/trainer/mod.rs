//! Training entry points the launcher can delegate to.
//!
//! - [`oumi::OumiCliTrainer`] runs the external `oumi train` command.
//! - [`mock::MockTrainer`] records calls without training, for tests.

pub mod mock;
pub mod oumi;
pub mod traits;

pub use mock::MockTrainer;
pub use oumi::{OumiCliTrainer, DEFAULT_OUMI_PROGRAM};
pub use traits::Trainer;

use crate::config::TrainingConfig;

// ---------------------------------------------------------------------------
// AnyTrainer: enum dispatch wrapper for runtime trainer selection
// ---------------------------------------------------------------------------

/// Runtime choice of trainer without `dyn`, which async trait methods rule out.
#[derive(Debug, Clone)]
pub enum AnyTrainer {
    Oumi(OumiCliTrainer),
    Mock(MockTrainer),
}

impl Trainer for AnyTrainer {
    async fn train(&mut self, config: &TrainingConfig) -> anyhow::Result<()> {
        match self {
            Self::Oumi(t) => t.train(config).await,
            Self::Mock(t) => t.train(config).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Oumi(t) => t.name(),
            Self::Mock(t) => t.name(),
        }
    }
}
