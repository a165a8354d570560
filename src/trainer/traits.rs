//! The trainer seam.
//!
//! The launcher never trains anything itself. It hands a validated
//! [`TrainingConfig`] to a [`Trainer`] and waits for it to finish.

use crate::config::TrainingConfig;

/// An external training entry point.
///
/// Implementations own all training semantics, including validation of every
/// config key beyond `model.name`. A returned error is treated as fatal.
#[allow(async_fn_in_trait)]
pub trait Trainer: Send {
    /// Run training to completion with the given configuration.
    async fn train(&mut self, config: &TrainingConfig) -> anyhow::Result<()>;

    /// Short label used in log lines.
    fn name(&self) -> &str;
}
