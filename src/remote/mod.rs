pub mod data_api;
pub mod flat_playlist;

use crate::error::Error;
use crate::model::RemoteItem;

pub use data_api::DataApiLister;
pub use flat_playlist::FlatPlaylistLister;

const PLAYLIST_URL: &str = "https://www.youtube.com/playlist?list=";

/// Titles the remote side reports for entries that can no longer be played.
const UNAVAILABLE_TITLES: &[&str] = &[
    "Private video",
    "Deleted video",
    "[Private video]",
    "[Deleted video]",
];

/// Source of the remote playlist. Unavailable entries are dropped silently.
pub trait RemoteLister {
    fn list(&self, playlist_id: &str) -> Result<Vec<RemoteItem>, Error>;
}

pub fn playlist_url(playlist_id: &str) -> String {
    format!("{}{}", PLAYLIST_URL, playlist_id)
}

pub(crate) fn is_unavailable(title: &str) -> bool {
    UNAVAILABLE_TITLES.contains(&title)
}
