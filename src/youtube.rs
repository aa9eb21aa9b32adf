//! Client for the two YouTube Data API v3 operations this app consumes:
//! playlist metadata by id, and the paginated playlist item listing.

use crate::playlist::Video;
use serde::Deserialize;
use std::time::Duration;

const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
const API_TIMEOUT: Duration = Duration::from_secs(10);
/// Largest page the playlistItems endpoint accepts.
const PAGE_SIZE: &str = "50";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("playlist {0} not found or is private")]
    NotFound(String),

    #[error("no YouTube api key configured (set YOUTUBE_API_KEY or api_key in config.yaml)")]
    MissingKey,

    #[error("api request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to parse api response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// What a fetch produces before the original url is merged in by the store.
#[derive(Clone, Debug)]
pub struct FetchedPlaylist {
    pub title: String,
    pub videos: Vec<Video>,
}

#[derive(Deserialize, Debug)]
struct PlaylistListResponse {
    #[serde(default)]
    items: Vec<PlaylistResource>,
}

#[derive(Deserialize, Debug)]
struct PlaylistResource {
    snippet: PlaylistSnippet,
}

#[derive(Deserialize, Debug)]
struct PlaylistSnippet {
    title: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PlaylistItemsResponse {
    #[serde(default)]
    items: Vec<PlaylistItem>,
    next_page_token: Option<String>,
}

#[derive(Deserialize, Debug)]
struct PlaylistItem {
    snippet: ItemSnippet,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ItemSnippet {
    title: String,
    resource_id: Option<ResourceId>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: String,
}

/// A `reqwest::blocking::Client` wrapper configured once at startup (api key,
/// timeout) and reused for every request.
pub struct YouTubeClient {
    http: reqwest::blocking::Client,
    api_key: Option<String>,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: Option<String>) -> Result<Self, reqwest::Error> {
        Self::with_base_url(api_key, API_BASE_URL.to_string())
    }

    pub(crate) fn with_base_url(
        api_key: Option<String>,
        base_url: String,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(API_TIMEOUT)
            .build()?;

        Ok(YouTubeClient {
            http,
            api_key,
            base_url,
        })
    }

    /// Fetches a playlist's title and all member videos, following pagination
    /// until the api stops returning a continuation token. Pages are
    /// concatenated in response order, which preserves the authored order.
    pub fn fetch_playlist(&self, playlist_id: &str) -> Result<FetchedPlaylist, ApiError> {
        let key = self.api_key.as_deref().ok_or(ApiError::MissingKey)?;

        let title = self.playlist_title(key, playlist_id)?;

        let mut videos: Vec<Video> = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let page = self.playlist_items_page(key, playlist_id, page_token.as_deref())?;

            videos.extend(page.items.into_iter().filter_map(|item| {
                let resource = item.snippet.resource_id?;
                Some(Video::from_upstream(item.snippet.title, &resource.video_id))
            }));
            log::debug!("playlist {playlist_id}: {} videos so far", videos.len());

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        Ok(FetchedPlaylist { title, videos })
    }

    /// An empty result set here is the only validation that the id refers to
    /// a real, accessible playlist.
    fn playlist_title(&self, key: &str, playlist_id: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .get(format!("{}/playlists", self.base_url))
            .query(&[("part", "snippet"), ("key", key), ("id", playlist_id)])
            .send()?
            .error_for_status()?;

        let mut body: PlaylistListResponse = serde_json::from_str(&response.text()?)?;
        if body.items.is_empty() {
            return Err(ApiError::NotFound(playlist_id.to_string()));
        }

        Ok(body.items.remove(0).snippet.title)
    }

    fn playlist_items_page(
        &self,
        key: &str,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsResponse, ApiError> {
        let mut request = self
            .http
            .get(format!("{}/playlistItems", self.base_url))
            .query(&[
                ("part", "snippet"),
                ("key", key),
                ("playlistId", playlist_id),
                ("maxResults", PAGE_SIZE),
            ]);

        if let Some(token) = page_token {
            request = request.query(&[("pageToken", token)]);
        }

        let response = request.send()?.error_for_status()?;
        Ok(serde_json::from_str(&response.text()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_page_parsing() {
        let json = serde_json::json!({
            "items": [
                {
                    "snippet": {
                        "title": "First",
                        "resourceId": { "kind": "youtube#video", "videoId": "aaaaaaaaaaa" }
                    }
                },
                {
                    "snippet": { "title": "No resource" }
                }
            ],
            "nextPageToken": "CAUQAA"
        });

        let page: PlaylistItemsResponse = serde_json::from_value(json).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.next_page_token.as_deref(), Some("CAUQAA"));
        assert_eq!(page.items[0].snippet.title, "First");
        assert!(page.items[1].snippet.resource_id.is_none());
    }

    #[test]
    fn test_metadata_parsing_tolerates_missing_items() {
        // the api omits `items` entirely for some error-ish responses
        let body: PlaylistListResponse = serde_json::from_str("{}").unwrap();
        assert!(body.items.is_empty());
    }
}
