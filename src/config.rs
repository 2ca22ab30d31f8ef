use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::PathBuf;
use std::thread;

pub const DEFAULT_THRESHOLD: usize = 5;
pub const DEFAULT_QUALITY: u32 = 192;
pub const DEFAULT_EXTENSION: &str = "mp3";
pub const DEFAULT_FETCH_TOOL: &str = "yt-dlp";

/// Where the remote playlist listing comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ListerKind {
    /// YouTube Data API v3 (needs YOUTUBE_KEY)
    #[default]
    Api,
    /// The fetch tool's own flat playlist dump
    FetchTool,
}

/// Settings read from `Config.toml` and `TUBE_SYNC_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub threshold: usize,
    pub concurrency: Option<usize>,
    pub quality: u32,
    pub thumbnail: bool,
    pub extension: String,
    pub fetch_tool: String,
    pub lister: ListerKind,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            concurrency: None,
            quality: DEFAULT_QUALITY,
            thumbnail: false,
            extension: DEFAULT_EXTENSION.to_string(),
            fetch_tool: DEFAULT_FETCH_TOOL.to_string(),
            lister: ListerKind::default(),
        }
    }
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(Environment::with_prefix("TUBE_SYNC"))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

/// Four workers per core: each fetch mostly waits on the network and on the
/// transcoder.
pub fn default_concurrency() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        * 4
}

/// Immutable settings for one run, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub playlist: String,
    pub dest: PathBuf,
    pub keep: bool,
    pub threshold: usize,
    pub concurrency: usize,
    pub dry_run: bool,
    pub thumbnail: bool,
    pub quality: u32,
    pub extension: String,
    pub fetch_tool: String,
    pub lister: ListerKind,
}

impl SyncOptions {
    /// Options for `playlist` into `dest` with everything else taken from
    /// `config`.
    pub fn new(playlist: impl Into<String>, dest: impl Into<PathBuf>, config: &AppConfig) -> Self {
        Self {
            playlist: playlist.into(),
            dest: dest.into(),
            keep: false,
            threshold: config.threshold,
            concurrency: config.concurrency.unwrap_or_else(default_concurrency),
            dry_run: false,
            thumbnail: config.thumbnail,
            quality: config.quality,
            extension: config.extension.clone(),
            fetch_tool: config.fetch_tool.clone(),
            lister: config.lister,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::config::FileFormat;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.threshold, 5);
        assert_eq!(config.quality, 192);
        assert_eq!(config.extension, "mp3");
        assert_eq!(config.lister, ListerKind::Api);

        let options = SyncOptions::new("PL123", "/music", &config);
        assert_eq!(options.concurrency, default_concurrency());
        assert!(options.concurrency >= 4);
        assert!(!options.keep);
        assert!(!options.dry_run);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(ConfigFile::from_str(
                "threshold = 3\nconcurrency = 2\nlister = \"fetch-tool\"\n",
                FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(config.threshold, 3);
        assert_eq!(config.concurrency, Some(2));
        assert_eq!(config.lister, ListerKind::FetchTool);
        assert_eq!(config.quality, 192);
        assert_eq!(config.fetch_tool, "yt-dlp");

        let options = SyncOptions::new("PL123", "/music", &config);
        assert_eq!(options.concurrency, 2);
    }
}
