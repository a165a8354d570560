//! Scripted trainer that records calls instead of training.

use anyhow::{anyhow, Result};

use super::traits::Trainer;
use crate::config::TrainingConfig;

/// A trainer that records each call instead of training.
#[derive(Debug, Clone, Default)]
pub struct MockTrainer {
    failure: Option<String>,
    calls: Vec<String>,
}

impl MockTrainer {
    /// A mock that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            calls: Vec::new(),
        }
    }

    /// Number of times `train` was called.
    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// Model names seen, one per call.
    pub fn models_seen(&self) -> &[String] {
        &self.calls
    }
}

impl Trainer for MockTrainer {
    async fn train(&mut self, config: &TrainingConfig) -> Result<()> {
        self.calls.push(config.model_name().to_owned());
        match &self.failure {
            Some(message) => Err(anyhow!("{message}")),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
