//! Playlist listing through the YouTube Data API v3.

use super::{is_unavailable, RemoteLister};
use crate::error::Error;
use crate::model::RemoteItem;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const PLAYLIST_ITEMS_URL: &str = "https://www.googleapis.com/youtube/v3/playlistItems";
const PAGE_SIZE: &str = "50";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsPage {
    #[serde(default)]
    items: Vec<PlaylistItem>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    title: String,
    resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

/// Lister backed by `ureq`, authenticated with an API key.
pub struct DataApiLister {
    http_client: ureq::Agent,
    api_key: String,
}

impl DataApiLister {
    pub fn new(api_key: impl Into<String>) -> Self {
        let http_client = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(5))
            .timeout_read(Duration::from_secs(15))
            .build();
        Self {
            http_client,
            api_key: api_key.into(),
        }
    }

    fn fetch_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsPage, Error> {
        let mut request = self
            .http_client
            .get(PLAYLIST_ITEMS_URL)
            .query("part", "snippet")
            .query("maxResults", PAGE_SIZE)
            .query("playlistId", playlist_id)
            .query("key", &self.api_key);
        if let Some(token) = page_token {
            request = request.query("pageToken", token);
        }

        let response = request.call().map_err(|err| match err {
            ureq::Error::Status(code, _) => Error::RemoteListing(format!(
                "YouTube Data API rejected playlist '{}' (HTTP {})",
                playlist_id, code
            )),
            ureq::Error::Transport(transport) => Error::RemoteListing(format!(
                "YouTube Data API unreachable: {}",
                transport
            )),
        })?;

        response.into_json::<PlaylistItemsPage>().map_err(|err| {
            Error::RemoteListing(format!("YouTube Data API response parse failed: {}", err))
        })
    }
}

impl RemoteLister for DataApiLister {
    fn list(&self, playlist_id: &str) -> Result<Vec<RemoteItem>, Error> {
        let mut items = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.fetch_page(playlist_id, page_token.as_deref())?;
            debug!("Fetched page with {} playlist items", page.items.len());
            page_token = page.next_page_token.clone();
            items.extend(items_from_page(page));
            if page_token.is_none() {
                break;
            }
        }

        Ok(items)
    }
}

fn items_from_page(page: PlaylistItemsPage) -> impl Iterator<Item = RemoteItem> {
    page.items.into_iter().filter_map(|item| {
        let Snippet { title, resource_id } = item.snippet;
        match resource_id.video_id {
            Some(id) if !is_unavailable(&title) => Some(RemoteItem { id, title }),
            _ => None,
        }
    })
}
