//! Flat-file playlist cache: one `<id>.json` document per playlist under the
//! data directory. No manifest; existence is discovered by directory listing.

use crate::playlist::{PlaylistDocument, PlaylistId, PlaylistSummary};
use crate::youtube::FetchedPlaylist;
use serde::Deserialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("no cached file for playlist id {0}; fetch it as a new url first")]
    NotCached(PlaylistId),

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("io error: {0:?}")]
    Io(#[from] std::io::Error),
}

/// Only the two fields the listing projects; everything else in the document
/// is irrelevant to the overview and must not make a file unlistable.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingFields {
    playlist_title: String,
    playlist_url: String,
}

#[derive(Clone)]
pub struct PlaylistStore {
    base_dir: PathBuf,
}

impl PlaylistStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        PlaylistStore {
            base_dir: base_dir.into(),
        }
    }

    fn document_path(&self, id: &PlaylistId) -> PathBuf {
        self.base_dir.join(format!("{id}.json"))
    }

    /// Merges the original url into the fetched data and writes the document,
    /// fully replacing any previous version. The write goes through a temp
    /// file in the same directory followed by a rename, so concurrent readers
    /// never observe a torn document. Returns the path written.
    pub fn save(
        &self,
        playlist_url: &str,
        id: &PlaylistId,
        fetched: FetchedPlaylist,
    ) -> Result<(PlaylistDocument, PathBuf), StoreError> {
        let document = PlaylistDocument {
            playlist_url: playlist_url.to_string(),
            playlist_title: fetched.title,
            videos: fetched.videos,
        };

        std::fs::create_dir_all(&self.base_dir)?;

        let path = self.document_path(id);
        let json = serde_json::to_vec_pretty(&document)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.base_dir)?;
        tmp.write_all(&json)?;
        tmp.persist(&path).map_err(|err| StoreError::Io(err.error))?;

        Ok((document, path))
    }

    /// Reads a previously cached document. Absent and unparseable files both
    /// mean the caller has to fetch fresh.
    pub fn load(&self, id: &PlaylistId) -> Result<(PlaylistDocument, PathBuf), StoreError> {
        let path = self.document_path(id);

        let raw = match std::fs::read(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotCached(id.clone()));
            }
            Err(err) => return Err(StoreError::Io(err)),
        };

        match serde_json::from_slice(&raw) {
            Ok(document) => Ok((document, path)),
            Err(err) => {
                log::warn!("unparseable cache file {}: {err}", path.display());
                Err(StoreError::NotCached(id.clone()))
            }
        }
    }

    /// Lists `{title, url}` for every readable `.json` document in the cache
    /// directory. A missing directory is an empty cache, not an error;
    /// malformed files are skipped.
    pub fn list(&self) -> Result<Vec<PlaylistSummary>, StoreError> {
        let entries = match std::fs::read_dir(&self.base_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::Io(err)),
        };

        let mut playlists = Vec::new();
        for entry in entries.filter_map(|entry| entry.ok()) {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let Ok(raw) = std::fs::read(&path) else {
                continue;
            };
            let Ok(fields) = serde_json::from_slice::<ListingFields>(&raw) else {
                log::debug!("skipping unlistable cache file {}", path.display());
                continue;
            };

            playlists.push(PlaylistSummary {
                title: fields.playlist_title,
                url: fields.playlist_url,
            });
        }

        Ok(playlists)
    }
}
