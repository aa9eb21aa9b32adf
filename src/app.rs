use crate::config::Config;
use crate::playlist::{PlaylistDocument, PlaylistId, PlaylistSummary};
use crate::store::{PlaylistStore, StoreError};
use crate::youtube::{ApiError, YouTubeClient};
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("could not find a valid playlist id in the url (expected a `list=` parameter)")]
    InvalidUrl,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Application core shared by the web daemon and the cli: one api client and
/// one store, both configured at startup and reused across requests. All
/// state lives in the filesystem, so the core itself is immutable.
pub struct App {
    pub config: Config,
    client: YouTubeClient,
    store: PlaylistStore,
}

impl App {
    pub fn new(config: Config, client: YouTubeClient, store: PlaylistStore) -> Self {
        App {
            config,
            client,
            store,
        }
    }

    /// Fetch path: resolve the id, pull title and videos from the api, then
    /// persist. Nothing is written when the fetch fails.
    pub fn fetch_and_save(&self, url: &str) -> Result<(PlaylistDocument, PathBuf), AppError> {
        let url = url.trim();
        let id = PlaylistId::from_url(url).ok_or(AppError::InvalidUrl)?;

        let fetched = self.client.fetch_playlist(id.as_str())?;
        log::info!(
            "fetched playlist {id}: \"{}\" ({} videos)",
            fetched.title,
            fetched.videos.len()
        );

        let (document, path) = self.store.save(url, &id, fetched)?;
        log::info!("saved playlist {id} to {}", path.display());

        Ok((document, path))
    }

    /// Load path: resolve the id and read the cached document, never touching
    /// the api.
    pub fn load_cached(&self, url: &str) -> Result<(PlaylistDocument, PathBuf), AppError> {
        let id = PlaylistId::from_url(url.trim()).ok_or(AppError::InvalidUrl)?;
        Ok(self.store.load(&id)?)
    }

    pub fn list_saved(&self) -> Result<Vec<PlaylistSummary>, AppError> {
        Ok(self.store.list()?)
    }
}
