//! Playlist listing through the fetch tool's own playlist extraction.

use super::{is_unavailable, playlist_url, RemoteLister};
use crate::error::Error;
use crate::model::RemoteItem;
use serde::Deserialize;
use std::process::Command;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct FlatPlaylist {
    #[serde(default)]
    entries: Vec<FlatEntry>,
}

#[derive(Debug, Deserialize)]
struct FlatEntry {
    id: Option<String>,
    title: Option<String>,
}

pub struct FlatPlaylistLister {
    binary: String,
}

impl FlatPlaylistLister {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl RemoteLister for FlatPlaylistLister {
    fn list(&self, playlist_id: &str) -> Result<Vec<RemoteItem>, Error> {
        let url = playlist_url(playlist_id);
        let output = Command::new(&self.binary)
            .args(["--flat-playlist", "--dump-single-json", "--no-warnings"])
            .arg(&url)
            .output()
            .map_err(|err| Error::RemoteListing(format!("cannot run `{}`: {}", self.binary, err)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::RemoteListing(format!(
                "`{}` could not list {}: {}",
                self.binary,
                url,
                stderr.trim()
            )));
        }

        let items = parse_flat_playlist(&output.stdout)?;
        debug!("{} listed {} playlist entries", self.binary, items.len());
        Ok(items)
    }
}

fn parse_flat_playlist(json: &[u8]) -> Result<Vec<RemoteItem>, Error> {
    let playlist: FlatPlaylist = serde_json::from_slice(json)
        .map_err(|err| Error::RemoteListing(format!("unreadable playlist dump: {}", err)))?;

    Ok(playlist
        .entries
        .into_iter()
        .filter_map(|entry| match (entry.id, entry.title) {
            (Some(id), Some(title)) if !is_unavailable(&title) => Some(RemoteItem { id, title }),
            _ => None,
        })
        .collect())
}
