use crate::playlist::{PlaylistId, Video};
use crate::store::{PlaylistStore, StoreError};
use crate::youtube::FetchedPlaylist;

const PLAYLIST_URL: &str = "https://www.youtube.com/playlist?list=PLtest123";

fn sample_fetch() -> FetchedPlaylist {
    FetchedPlaylist {
        title: "Synthwave Mix".to_string(),
        videos: vec![
            Video::from_upstream("Track One".to_string(), "aaaaaaaaaaa"),
            Video::from_upstream("Track Two".to_string(), "bbbbbbbbbbb"),
            Video::from_upstream("Track Three".to_string(), "ccccccccccc"),
        ],
    }
}

#[test]
fn test_save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = PlaylistStore::new(dir.path().join("playlists"));
    let id = PlaylistId::from("PLtest123");

    let (saved, path) = store.save(PLAYLIST_URL, &id, sample_fetch()).unwrap();
    assert!(path.ends_with("PLtest123.json"));

    let (loaded, _) = store.load(&id).unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(loaded.playlist_url, PLAYLIST_URL);
    assert_eq!(loaded.playlist_title, "Synthwave Mix");
    assert_eq!(
        loaded
            .videos
            .iter()
            .map(|v| v.title.as_str())
            .collect::<Vec<_>>(),
        vec!["Track One", "Track Two", "Track Three"]
    );
    assert_eq!(
        loaded.videos[0].url,
        "https://www.youtube.com/watch?v=aaaaaaaaaaa"
    );
    assert_eq!(
        loaded.videos[0].embed_url,
        "https://www.youtube.com/embed/aaaaaaaaaaa"
    );
}

#[test]
fn test_document_on_disk_uses_camel_case_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = PlaylistStore::new(dir.path().join("playlists"));
    let id = PlaylistId::from("PLtest123");

    let (_, path) = store.save(PLAYLIST_URL, &id, sample_fetch()).unwrap();

    let raw = std::fs::read_to_string(path).unwrap();
    assert!(raw.contains("\"playlistUrl\""));
    assert!(raw.contains("\"playlistTitle\""));
    assert!(raw.contains("\"embedUrl\""));
}

#[test]
fn test_refetch_overwrites_previous_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = PlaylistStore::new(dir.path().join("playlists"));
    let id = PlaylistId::from("PLtest123");

    store.save(PLAYLIST_URL, &id, sample_fetch()).unwrap();

    let updated = FetchedPlaylist {
        title: "Renamed Mix".to_string(),
        videos: vec![Video::from_upstream("Only Track".to_string(), "ddddddddddd")],
    };
    store.save(PLAYLIST_URL, &id, updated).unwrap();

    let (loaded, _) = store.load(&id).unwrap();
    assert_eq!(loaded.playlist_title, "Renamed Mix");
    assert_eq!(loaded.videos.len(), 1);
}

#[test]
fn test_load_missing_id_is_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let store = PlaylistStore::new(dir.path().join("playlists"));

    let err = store.load(&PlaylistId::from("PLmissing")).unwrap_err();
    assert!(matches!(err, StoreError::NotCached(id) if id.as_str() == "PLmissing"));
}

#[test]
fn test_load_unparseable_file_is_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let playlists = dir.path().join("playlists");
    std::fs::create_dir_all(&playlists).unwrap();
    std::fs::write(playlists.join("PLbroken.json"), "{ not json").unwrap();

    let store = PlaylistStore::new(playlists);
    let err = store.load(&PlaylistId::from("PLbroken")).unwrap_err();
    assert!(matches!(err, StoreError::NotCached(_)));
}

#[test]
fn test_list_missing_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = PlaylistStore::new(dir.path().join("never-created"));

    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_list_projects_titles_and_skips_malformed_files() {
    let dir = tempfile::tempdir().unwrap();
    let playlists = dir.path().join("playlists");
    let store = PlaylistStore::new(&playlists);
    let id = PlaylistId::from("PLtest123");

    store.save(PLAYLIST_URL, &id, sample_fetch()).unwrap();
    std::fs::write(playlists.join("PLgarbage.json"), "not json at all").unwrap();
    // parseable json but missing the projected fields
    std::fs::write(playlists.join("PLpartial.json"), r#"{"videos": []}"#).unwrap();
    // non-json files in the directory are ignored entirely
    std::fs::write(playlists.join("notes.txt"), "hello").unwrap();

    let summaries = store.list().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].title, "Synthwave Mix");
    assert_eq!(summaries[0].url, PLAYLIST_URL);
}
