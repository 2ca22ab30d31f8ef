use super::FetchTool;
use crate::config::SyncOptions;
use crate::error::FetchError;
use crate::model::FetchTarget;
use std::io;
use std::path::PathBuf;
use std::process::{Command, Output};
use tracing::debug;

const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Exit code yt-dlp uses for invalid options.
const USAGE_ERROR_CODE: i32 = 2;

/// stderr fragments meaning the tool or its toolchain is broken rather than
/// the single video being unavailable.
const ENVIRONMENT_FAULTS: &[&str] = &[
    "unable to extract",
    "please report this issue",
    "is not a valid url",
    "unsupported url",
    "ffmpeg not found",
    "ffprobe and ffmpeg not found",
    "ffprobe/avprobe and ffmpeg/avconv not found",
    "no such option",
    "error: embedthumbnail",
];

/// Fetch tool backed by an external `yt-dlp` (or `youtube-dl`) binary.
/// Audio is extracted into the destination directory as
/// `<title>.<extension>`.
#[derive(Debug, Clone)]
pub struct YtDlpTool {
    binary: String,
    dest: PathBuf,
    audio_format: String,
    quality: u32,
    thumbnail: bool,
}

impl YtDlpTool {
    pub fn new(binary: impl Into<String>, dest: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            dest: dest.into(),
            audio_format: "mp3".to_string(),
            quality: 192,
            thumbnail: false,
        }
    }

    pub fn from_options(options: &SyncOptions) -> Self {
        Self::new(options.fetch_tool.clone(), options.dest.clone())
            .with_audio_format(&options.extension)
            .with_quality(options.quality)
            .with_thumbnail(options.thumbnail)
    }

    pub fn with_audio_format(mut self, format: &str) -> Self {
        self.audio_format = format.to_string();
        self
    }

    pub fn with_quality(mut self, quality: u32) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: bool) -> Self {
        self.thumbnail = thumbnail;
        self
    }

    pub fn build_args(&self, url: &str) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "--no-playlist".into(),
            "--no-progress".into(),
            "--format".into(),
            "bestaudio/best".into(),
            "--extract-audio".into(),
            "--audio-format".into(),
            self.audio_format.clone(),
            "--audio-quality".into(),
            format!("{}K", self.quality),
            "--paths".into(),
            self.dest.to_string_lossy().into_owned(),
            "--output".into(),
            OUTPUT_TEMPLATE.into(),
        ];
        if self.thumbnail {
            args.push("--embed-thumbnail".into());
            args.push("--add-metadata".into());
        }
        args.push(url.to_string());
        args
    }

    fn run(&self, args: &[String]) -> Result<Output, FetchError> {
        Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|err| classify_spawn_error(&self.binary, &err))
    }
}

impl FetchTool for YtDlpTool {
    fn check_environment(&self) -> Result<(), FetchError> {
        let output = self.run(&["--version".to_string()])?;
        if !output.status.success() {
            return Err(FetchError::Fatal(format!(
                "`{} --version` exited with {}",
                self.binary, output.status
            )));
        }
        debug!(
            "Using {} {}",
            self.binary,
            String::from_utf8_lossy(&output.stdout).trim()
        );
        Ok(())
    }

    fn fetch(&self, target: &FetchTarget) -> Result<(), FetchError> {
        let output = self.run(&self.build_args(&target.url))?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stdout.lines().chain(stderr.lines()) {
            debug!("[{}] {}", target.id, line);
        }

        if output.status.success() {
            Ok(())
        } else {
            Err(classify_failure(output.status.code(), &stderr))
        }
    }
}

fn classify_spawn_error(binary: &str, err: &io::Error) -> FetchError {
    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => FetchError::Fatal(format!(
            "cannot run `{}`: {}. Install it or point --fetch-tool at a working binary",
            binary, err
        )),
        _ => FetchError::Recoverable(format!("cannot run `{}`: {}", binary, err)),
    }
}

/// Decide whether a failed run means the tool is broken or only this item
/// could not be fetched.
pub fn classify_failure(code: Option<i32>, stderr: &str) -> FetchError {
    let reason = stderr
        .lines()
        .rev()
        .find(|line| line.starts_with("ERROR:"))
        .or_else(|| stderr.lines().rev().find(|line| !line.trim().is_empty()))
        .map(|line| line.trim().to_string())
        .unwrap_or_else(|| match code {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        });

    let lowered = stderr.to_lowercase();
    if code == Some(USAGE_ERROR_CODE)
        || ENVIRONMENT_FAULTS.iter().any(|fault| lowered.contains(fault))
    {
        FetchError::Fatal(reason)
    } else {
        FetchError::Recoverable(reason)
    }
}
