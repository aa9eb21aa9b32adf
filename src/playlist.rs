use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";
const EMBED_URL_BASE: &str = "https://www.youtube.com/embed/";

/// Compile the `list=` query parameter regex once
static LIST_PARAM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[?&]list=([^&]+)").expect("Failed to compile playlist id regex")
});

/// Opaque playlist identifier, also used as the cache filename key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct PlaylistId(String);

impl Display for PlaylistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlaylistId {
    fn from(fr: &str) -> Self {
        PlaylistId(fr.to_string())
    }
}

impl PlaylistId {
    /// Extracts the id following a `list=` query parameter, delimited by the
    /// next `&` or the end of the string. The parameter name is matched
    /// case-insensitively.
    pub fn from_url(url: &str) -> Option<PlaylistId> {
        LIST_PARAM_REGEX
            .captures(url)
            .and_then(|caps| caps.get(1).map(|m| m.as_str().to_owned()))
            .map(PlaylistId)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single playlist member with its canonical watch and embed urls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub title: String,
    pub url: String,
    pub embed_url: String,
}

impl Video {
    /// Derives both urls from the upstream video id.
    pub fn from_upstream(title: String, video_id: &str) -> Self {
        Video {
            title,
            url: format!("{WATCH_URL_BASE}{video_id}"),
            embed_url: format!("{EMBED_URL_BASE}{video_id}"),
        }
    }
}

/// The document persisted to `<id>.json` and returned by the api.
/// Videos keep the upstream playlist order, across pages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDocument {
    pub playlist_url: String,
    pub playlist_title: String,
    pub videos: Vec<Video>,
}

/// Projection used by the listing endpoint and `tubelist list`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub title: String,
    pub url: String,
}
