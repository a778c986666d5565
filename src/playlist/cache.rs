//! JSON snapshots of fetched playlists.
//!
//! A snapshot is only a shortcut around paging through the remote again.
//! Whether it is still usable is decided by the caller, by comparing the
//! snapshot's revision with the one the service reports.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use super::model::Playlist;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache io error: {0}")]
    Io(#[from] io::Error),
    #[error("cache file is not a valid playlist: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct PlaylistCache {
    dir: PathBuf,
}

impl PlaylistCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name of the snapshot for the playlist with `playlist_id`.
    ///
    /// Characters outside `[A-Za-z0-9.-]` are written as `_` followed by
    /// their UTF-8 bytes in hex, so distinct ids never share a file.
    pub fn file_name(playlist_id: &str) -> String {
        let mut safe = String::with_capacity(playlist_id.len());
        for c in playlist_id.chars() {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '.') {
                safe.push(c);
            } else {
                let mut buf = [0; 4];
                for b in c.encode_utf8(&mut buf).bytes() {
                    safe.push_str(&format!("_{b:02x}"));
                }
            }
        }
        format!("playlist-{safe}.json")
    }

    fn find(&self, playlist_id: &str) -> Option<PathBuf> {
        let wanted = Self::file_name(playlist_id);
        WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .find(|e| e.file_name().to_str() == Some(wanted.as_str()))
            .map(|e| e.into_path())
    }

    /// Load the snapshot for `playlist_id`, if one exists.
    pub fn load(&self, playlist_id: &str) -> Result<Option<Playlist>, CacheError> {
        let Some(path) = self.find(playlist_id) else {
            debug!(playlist_id, dir = %self.dir.display(), "no cached playlist");
            return Ok(None);
        };
        let bytes = fs::read(&path)?;
        let playlist = serde_json::from_slice(&bytes)?;
        debug!(path = %path.display(), "loaded cached playlist");
        Ok(Some(playlist))
    }

    /// Write a snapshot of `playlist`, keyed by its id.
    pub fn save(&self, playlist: &Playlist) -> Result<PathBuf, CacheError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(Self::file_name(&playlist.id));
        let data = serde_json::to_vec_pretty(playlist)?;
        fs::write(&path, data)?;
        debug!(
            path = %path.display(),
            revision = %playlist.revision,
            "cached playlist"
        );
        Ok(path)
    }

    /// Remove the snapshot for `playlist_id`. Returns whether a file was
    /// removed.
    pub fn invalidate(&self, playlist_id: &str) -> Result<bool, CacheError> {
        let path = self.dir.join(Self::file_name(playlist_id));
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(CacheError::Io(err)),
        }
    }
}
