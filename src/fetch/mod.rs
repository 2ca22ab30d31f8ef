pub mod executor;
pub mod yt_dlp;

use crate::error::FetchError;
use crate::model::FetchTarget;
use std::time::Duration;

pub use executor::execute;
pub use yt_dlp::YtDlpTool;

/// Something that can turn a [`FetchTarget`] into a file in the destination
/// directory. Shared by every worker of the pool.
pub trait FetchTool: Send + Sync {
    /// Verify the tool is usable before any work is submitted.
    fn check_environment(&self) -> Result<(), FetchError> {
        Ok(())
    }

    fn fetch(&self, target: &FetchTarget) -> Result<(), FetchError>;
}

/// What happened to a single target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched,
    Failed(String),
    Fatal(String),
    /// Never started because the batch was halted.
    Skipped,
}

impl From<Result<(), FetchError>> for FetchOutcome {
    fn from(result: Result<(), FetchError>) -> Self {
        match result {
            Ok(()) => FetchOutcome::Fetched,
            Err(FetchError::Recoverable(reason)) => FetchOutcome::Failed(reason),
            Err(FetchError::Fatal(reason)) => FetchOutcome::Fatal(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub target: FetchTarget,
    pub reason: String,
}

/// Aggregate result of one batch, available after the pool drains.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    pub total: usize,
    pub fetched: Vec<FetchTarget>,
    pub failures: Vec<FetchFailure>,
    pub skipped: Vec<FetchTarget>,
    pub fatal: Option<FetchFailure>,
    pub duration: Duration,
}

impl FetchReport {
    pub fn is_fatal(&self) -> bool {
        self.fatal.is_some()
    }

    pub fn recoverable_failures(&self) -> usize {
        self.failures.len()
    }

    pub fn attempted(&self) -> usize {
        self.fetched.len() + self.failures.len() + usize::from(self.fatal.is_some())
    }
}
