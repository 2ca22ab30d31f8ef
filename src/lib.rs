pub mod cleanup;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod matcher;
pub mod model;
pub mod progress;
pub mod reconcile;
pub mod remote;
pub mod scanner;

pub use crate::config::{AppConfig, ListerKind, SyncOptions};
pub use engine::{SyncEngine, SyncResult};
pub use error::{Error, FetchError};
pub use fetch::{FetchOutcome, FetchReport, FetchTool};
pub use model::{FetchTarget, RemoteItem};
pub use progress::{ProgressReporter, SilentReporter};
pub use reconcile::{compute_fetch_set, compute_remove_set, SyncPlan};
pub use remote::RemoteLister;
