use clap::Parser;
use std::path::PathBuf;
use tube_sync::{AppConfig, ListerKind, SyncOptions};

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "tube-sync")]
#[command(about = "Sync YouTube playlists to your disc using yt-dlp", long_about = None)]
pub struct Cli {
    /// Playlist to be synced, YouTube playlist id
    #[arg(long)]
    pub playlist: String,

    /// Destination folder to sync the playlist to
    #[arg(long)]
    pub dest: PathBuf,

    /// Keep files in dest folder that aren't in the playlist
    #[arg(long)]
    pub keep: bool,

    /// Threshold distance for the string metric; above it two titles are different [default: 5]
    #[arg(long)]
    pub threshold: Option<usize>,

    /// Number of parallel downloads [default: CPU count * 4]
    #[arg(long, visible_alias = "concurrency")]
    pub processes: Option<usize>,

    /// Don't actually change files, just print changes that would be made
    #[arg(long, visible_alias = "dry-run")]
    pub dont_update: bool,

    /// Embed video thumbnail as cover art
    #[arg(long)]
    pub thumbnail: bool,

    /// Audio quality in kbps [default: 192]
    #[arg(long)]
    pub quality: Option<u32>,

    /// Be verbose
    #[arg(long)]
    pub verbose: bool,

    /// Where to read the remote playlist from
    #[arg(long, value_enum)]
    pub lister: Option<ListerKind>,

    /// Fetch tool binary [default: yt-dlp]
    #[arg(long)]
    pub fetch_tool: Option<String>,

    /// Audio file extension to sync [default: mp3]
    #[arg(long)]
    pub extension: Option<String>,
}

impl Cli {
    /// Flags override `config`; the result is fixed for the rest of the run.
    pub fn into_options(self, config: &AppConfig) -> SyncOptions {
        let mut options = SyncOptions::new(self.playlist, self.dest, config);
        options.keep = self.keep;
        options.dry_run = self.dont_update;
        options.thumbnail |= self.thumbnail;
        if let Some(threshold) = self.threshold {
            options.threshold = threshold;
        }
        if let Some(processes) = self.processes {
            options.concurrency = processes;
        }
        if let Some(quality) = self.quality {
            options.quality = quality;
        }
        if let Some(lister) = self.lister {
            options.lister = lister;
        }
        if let Some(fetch_tool) = self.fetch_tool {
            options.fetch_tool = fetch_tool;
        }
        if let Some(extension) = self.extension {
            options.extension = extension;
        }
        options
    }
}
