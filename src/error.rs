use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Cannot write to playlist directory {}", .0.display())]
    DestinationNotWritable(PathBuf),

    #[error("Remote listing error: {0}")]
    RemoteListing(String),

    #[error("Fetch tool is not usable: {0}. Try updating the fetch tool (e.g. `yt-dlp -U`)")]
    FatalFetchEnvironment(String),

    #[error("{0}")]
    Other(String),
}

/// Failure of a single fetch, classified by whether the batch may continue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// This item could not be fetched (removed video, geo-block, network blip).
    #[error("{0}")]
    Recoverable(String),

    /// The fetch tool itself is broken; nothing else should be attempted.
    #[error("{0}")]
    Fatal(String),
}

impl FetchError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, FetchError::Fatal(_))
    }
}
